use crate::model::Move;

/// How strictly a rule binds its agent at a matched state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub enum Semantics {
    /// Only the declared action survives; a state left without moves
    /// makes the strategy inadmissible.
    #[default]
    Hard,
    /// The declared action and idling both survive.
    Soft,
}

impl Semantics {
    /// Whether an agent playing `played` is consistent with a rule
    /// prescribing `action`. Wildcard moves are never filtered.
    pub fn admits(&self, played: Move, action: Move) -> bool {
        match self {
            _ if played == Move::Any => true,
            Self::Hard => played == action,
            Self::Soft => played == action || played.is_idle(),
        }
    }
}

impl std::str::FromStr for Semantics {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hard" => Ok(Self::Hard),
            "soft" => Ok(Self::Soft),
            other => Err(format!("unknown semantics '{}'", other)),
        }
    }
}

impl std::fmt::Display for Semantics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hard => write!(f, "hard"),
            Self::Soft => write!(f, "soft"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission() {
        let a = Move::Act('A');
        let b = Move::Act('B');
        assert!(Semantics::Hard.admits(a, a));
        assert!(!Semantics::Hard.admits(Move::Idle, a));
        assert!(Semantics::Soft.admits(Move::Idle, a));
        assert!(!Semantics::Soft.admits(b, a));
        assert!(Semantics::Hard.admits(Move::Any, a));
        assert_eq!("soft".parse(), Ok(Semantics::Soft));
    }
}
