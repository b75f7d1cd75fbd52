use crate::Agent;

/// Malformed model input or a violated structural invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A required section header never appeared.
    Section(&'static str),
    /// A line of the flat file could not be read.
    Line { line: usize, message: String },
    /// Dimensions or symbols that do not fit together.
    Shape(String),
    /// A state with no outgoing transition at all.
    DeadEnd(String),
    /// A state where some agent has no idle option.
    NoIdle { state: String, agent: Agent },
    /// A JSON document that could not be bridged.
    Json(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Section(name) => write!(f, "missing section {}", name),
            Self::Line { line, message } => write!(f, "line {}: {}", line, message),
            Self::Shape(message) => write!(f, "{}", message),
            Self::DeadEnd(state) => write!(f, "state {} has no outgoing transition", state),
            Self::NoIdle { state, agent } => {
                write!(f, "agent {} cannot idle in state {}", agent, state)
            }
            Self::Json(message) => write!(f, "json: {}", message),
        }
    }
}

impl std::error::Error for ModelError {}
