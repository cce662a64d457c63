pub mod equilibrium;
pub mod social;
pub mod solver;
