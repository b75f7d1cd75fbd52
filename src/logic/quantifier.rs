use crate::Complexity;
use crate::model::Coalition;

/// Who chooses the path a temporal operator ranges over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// CTL `E`: some path.
    Exists,
    /// CTL `A`: every path.
    Forall,
    /// ATL `<A>`: the coalition can enforce it.
    Coalition(Coalition),
    /// NatATL `<{A}, k>`: the coalition can enforce it with a natural
    /// strategy of complexity at most `k`.
    Natural(Coalition, Complexity),
}

impl std::fmt::Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exists => write!(f, "E"),
            Self::Forall => write!(f, "A"),
            Self::Coalition(c) => write!(f, "<{}>", c),
            Self::Natural(c, k) => write!(f, "<{{{}}},{}>", c, k),
        }
    }
}
