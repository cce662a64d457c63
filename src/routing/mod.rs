pub mod enumerate;
pub mod path;
pub mod shortest;
