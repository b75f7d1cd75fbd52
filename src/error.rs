use crate::logic::SyntaxError;
use crate::model::ModelError;

/// Failures that abort a whole request.
///
/// Strategy inadmissibility and search exhaustion are values, not errors:
/// see [`crate::prune::Pruned`] and [`crate::search::Report`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Model(ModelError),
    Syntax(SyntaxError),
    Interrupted,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(e) => write!(f, "model error: {}", e),
            Self::Syntax(e) => write!(f, "syntax error: {}", e),
            Self::Interrupted => write!(f, "interrupted before a result was obtained"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ModelError> for Error {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}
