use super::*;
use crate::Complexity;

/// One agent's natural strategy: rules tried in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Natural {
    rules: Vec<Rule>,
}

impl Natural {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
    pub fn len(&self) -> usize {
        self.rules.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
    pub fn complexity(&self) -> Complexity {
        self.rules.iter().map(Rule::complexity).sum()
    }
    /// Whether any rule needs an unwinding to be evaluated.
    pub fn recalls(&self) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r.condition, Condition::History(_)))
    }
}

impl From<Vec<Rule>> for Natural {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}

impl std::fmt::Display for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules = self
            .rules
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", rules)
    }
}

impl serde::Serialize for Natural {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rules.iter())
    }
}
