//! Binary quadratic formulation of the multi-vehicle routing problem.

pub mod variable;
pub mod objective;
pub mod export;

pub use variable::*;
pub use objective::*;
pub use export::*;
