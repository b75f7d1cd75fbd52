use super::*;

/// What one agent contributes to a joint action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Idle,
    Act(char),
    /// Component of a wildcard self-loop; matches nothing in particular.
    Any,
}

impl Move {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
    /// The action symbol, if this is a real action.
    pub fn symbol(&self) -> Option<char> {
        match self {
            Self::Act(c) => Some(*c),
            _ => None,
        }
    }
}

impl TryFrom<char> for Move {
    type Error = ModelError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            crate::IDLE => Ok(Self::Idle),
            crate::WILDCARD => Ok(Self::Any),
            c if c.is_ascii_uppercase() => Ok(Self::Act(c)),
            c => Err(ModelError::Shape(format!("'{}' is not an action symbol", c))),
        }
    }
}

impl From<Move> for char {
    fn from(m: Move) -> Self {
        match m {
            Move::Idle => crate::IDLE,
            Move::Any => crate::WILDCARD,
            Move::Act(c) => c,
        }
    }
}

impl serde::Serialize for Move {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols() {
        assert_eq!(Move::try_from('I'), Ok(Move::Idle));
        assert_eq!(Move::try_from('*'), Ok(Move::Any));
        assert_eq!(Move::try_from('Q'), Ok(Move::Act('Q')));
        assert!(Move::try_from('q').is_err());
        assert_eq!(Move::Act('Q').symbol(), Some('Q'));
        assert_eq!(Move::Idle.symbol(), None);
    }
}
