//! Formula syntax for every supported dialect.
//!
//! One lexer and one parser produce a shared [`Formula`] tree; each
//! [`Dialect`] then checks that only its own constructs appear. Parsers
//! are plain values built per call, so there is no process-wide state.
mod dialect;
mod formula;
mod history;
mod natatl;
mod natsl;
mod parser;
mod quantifier;
mod syntax;
mod token;

pub use dialect::*;
pub use formula::*;
pub use history::*;
pub use natatl::*;
pub use natsl::*;
pub use parser::*;
pub use quantifier::*;
pub use syntax::*;
pub use token::*;
