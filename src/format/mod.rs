//! Textual model formats.
//!
//! The flat file is the tool's native representation: line-oriented,
//! with case-sensitive section headers. The JSON bridge builds the same
//! [`crate::model::Cgs`] from a friendlier document.
mod json;
mod reader;
mod writer;

pub use json::*;
pub use reader::*;
pub use writer::*;
