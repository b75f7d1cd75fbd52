//! Natural strategies and the bounded spaces they are drawn from.
//!
//! A [`Natural`] strategy is an ordered list of condition → action
//! [`Rule`]s for one agent; a [`Collective`] gives one to each coalition
//! member. Generators enumerate them by exact complexity so the search
//! can raise its bound one step at a time.
mod candidates;
mod collective;
mod condition;
mod enumerator;
mod generator;
mod natural;
mod rule;

pub use candidates::*;
pub use collective::*;
pub use condition::*;
pub use enumerator::*;
pub use generator::*;
pub use natural::*;
pub use rule::*;
