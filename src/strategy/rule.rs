use super::*;
use crate::model::Move;

/// One condition → action pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rule {
    pub condition: Condition,
    pub action: Move,
}

impl Rule {
    pub fn new(condition: Condition, action: Move) -> Self {
        Self { condition, action }
    }
    pub fn complexity(&self) -> crate::Complexity {
        self.condition.complexity()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.condition, self.action)
    }
}
