//! Restricting a game to the moves a candidate strategy allows.
//!
//! [`MatrixPruner`] filters the transition matrix directly and serves
//! memoryless strategies. [`TreePruner`] unwinds the game into a bounded
//! history tree first, so conditions may look at the path taken, then
//! flattens the pruned tree back into a model.
mod matrix;
mod pruner;
mod semantics;
mod tree;
mod unwinding;

pub use matrix::*;
pub use pruner::*;
pub use semantics::*;
pub use tree::*;
pub use unwinding::*;
