pub mod cost;
pub mod distribution;
