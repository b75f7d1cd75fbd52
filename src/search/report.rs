use crate::Complexity;
use crate::strategy::Collective;

/// Outcome of checking one candidate strategy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum Attempt {
    Won,
    /// Admissible, but the goal fails on the pruned model.
    Lost(String),
    Inadmissible(String),
}

impl Attempt {
    pub fn won(&self) -> bool {
        matches!(self, Self::Won)
    }
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won => write!(f, "goal satisfied"),
            Self::Lost(reason) => write!(f, "goal not satisfied: {}", reason),
            Self::Inadmissible(reason) => write!(f, "inadmissible: {}", reason),
        }
    }
}

/// Result of a whole search.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Report {
    pub satisfiable: bool,
    /// Bound at which a strategy was found, or the bound exhausted.
    pub bound: Complexity,
    /// Candidates pruned and verified.
    pub attempts: usize,
    pub strategy: Option<Collective>,
    pub reason: Option<String>,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.strategy, &self.reason) {
            (Some(strategy), _) => write!(
                f,
                "satisfiable at bound {} after {} attempts\n{}",
                self.bound, self.attempts, strategy
            ),
            (None, Some(reason)) => write!(
                f,
                "unsatisfiable up to bound {} after {} attempts\n{}",
                self.bound, self.attempts, reason
            ),
            (None, None) => write!(
                f,
                "unsatisfiable up to bound {} after {} attempts",
                self.bound, self.attempts
            ),
        }
    }
}
