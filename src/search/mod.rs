//! Bound-increasing strategy synthesis, Nash search and sequential NatSL.
//!
//! For `i = 1..=k` the [`Synthesizer`] enumerates every collective
//! strategy of complexity exactly `i`, prunes the model under it and
//! checks the goal on what is left. The first winner ends the search.
mod config;
mod nash;
mod natsl;
mod report;
mod synthesis;

pub use config::*;
pub use nash::*;
pub use report::*;
pub use synthesis::*;
