use crate::Agent;

/// A formula that cannot be evaluated, as opposed to one that is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A token that does not fit the grammar at this point.
    Unexpected {
        position: usize,
        found: String,
        expected: &'static str,
    },
    /// Input ended while more was expected.
    End { expected: &'static str },
    /// A proposition absent from the model's alphabet.
    UnknownAtom(String),
    /// A well-formed construct that the chosen dialect does not allow.
    Dialect {
        dialect: &'static str,
        construct: String,
    },
    /// A coalition naming an agent the model does not have.
    Agent { agent: Agent, agents: usize },
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unexpected {
                position,
                found,
                expected,
            } => write!(f, "expected {} at {}, found '{}'", expected, position, found),
            Self::End { expected } => write!(f, "expected {} at end of input", expected),
            Self::UnknownAtom(atom) => write!(f, "unknown atomic proposition '{}'", atom),
            Self::Dialect { dialect, construct } => {
                write!(f, "{} does not allow {}", dialect, construct)
            }
            Self::Agent { agent, agents } => {
                write!(f, "agent {} does not exist in a {}-agent model", agent, agents)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}
