use crate::Complexity;
use crate::logic::*;

/// When a rule fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Every state (or history) no earlier rule of the same agent covered.
    True,
    /// A state formula, evaluated on the model being pruned.
    Formula(Formula),
    /// A pattern over the labels along a history; needs an unwinding.
    History(History),
}

impl Condition {
    /// Read a condition as written in strategies: `T`, a state formula, or
    /// a history expression using `.` and `*`.
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let text = text.trim();
        match text {
            crate::TOP => Ok(Self::True),
            t if t.contains('.') || t.contains('*') => Ok(Self::from(History::parse(t)?)),
            t => Ok(Self::Formula(Ctl::parse(t)?)),
        }
    }
    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }
    pub fn complexity(&self) -> Complexity {
        complexity(&self.to_string())
    }
}

/// Words of the written form, plus one for any negation and one for any
/// repetition.
pub fn complexity(text: &str) -> Complexity {
    text.split_whitespace().count() + text.contains('!') as usize + text.contains('*') as usize
}

impl From<History> for Condition {
    /// A single plain letter is just a state formula.
    fn from(history: History) -> Self {
        match history.segments() {
            [segment] if !segment.star => Self::Formula(segment.letter.clone()),
            _ => Self::History(history),
        }
    }
}

impl From<Formula> for Condition {
    fn from(formula: Formula) -> Self {
        Self::Formula(formula)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "{}", crate::TOP),
            Self::Formula(formula) => write!(f, "{}", formula),
            Self::History(history) => write!(f, "{}", history),
        }
    }
}

impl serde::Serialize for Condition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Condition::parse(" T "), Ok(Condition::True));
        assert!(matches!(Condition::parse("p && !q"), Ok(Condition::Formula(_))));
        assert!(matches!(Condition::parse("EF p"), Ok(Condition::Formula(_))));
        assert!(matches!(Condition::parse("p . q*"), Ok(Condition::History(_))));
        assert!(matches!(Condition::parse("<1>F p"), Err(SyntaxError::Dialect { .. })));
    }

    #[test]
    fn complexities() {
        let of = |text: &str| Condition::parse(text).expect("valid condition").complexity();
        assert_eq!(of("T"), 1);
        assert_eq!(of("p"), 1);
        assert_eq!(of("!p"), 2);
        assert_eq!(of("p and q"), 3);
        assert_eq!(of("!p or q"), 4);
        assert_eq!(of("p . q*"), 4);
    }
}
