//! Process descriptors and launch description assembly

mod node;
mod simulation;

pub use node::*;
pub use simulation::*;
