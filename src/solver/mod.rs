//! Explicit-state evaluation of CTL and ATL.
//!
//! Every subformula denotes a [`crate::model::StateSet`]. Temporal
//! operators are least or greatest fixpoints of a one-step pre-image:
//! `EX` for `E`, `AX` for `A`, and the coalition pre-image for `<A>`.
mod checker;
mod evaluation;
mod fixpoint;
mod pre;
mod transitions;

pub use checker::*;
pub use evaluation::*;
pub use fixpoint::*;
pub use pre::*;
pub use transitions::*;
