use super::*;

/// One move per agent, in agent order.
///
/// Position `i` holds the move of agent `i + 1`. The width is fixed by the
/// model's agent count when the label is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointAction(Vec<Move>);

impl JointAction {
    /// Parse a label such as `AIB` for a model with `width` agents.
    pub fn parse(text: &str, width: usize) -> Result<Self, ModelError> {
        let moves = text
            .chars()
            .map(Move::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        match moves.len() == width && !moves.contains(&Move::Any) {
            true => Ok(Self(moves)),
            false => Err(ModelError::Shape(format!(
                "joint action '{}' does not have one action for each of {} agents",
                text, width
            ))),
        }
    }
    /// Everybody idles.
    pub fn idle(width: usize) -> Self {
        Self(vec![Move::Idle; width])
    }
    /// The expansion of a `*` cell.
    pub fn wildcard(width: usize) -> Self {
        Self(vec![Move::Any; width])
    }
    pub fn width(&self) -> usize {
        self.0.len()
    }
    pub fn moves(&self) -> &[Move] {
        &self.0
    }
    /// Move of a 1-based agent.
    pub fn of(&self, agent: crate::Agent) -> Option<Move> {
        agent.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }
}

impl From<Vec<Move>> for JointAction {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl std::fmt::Display for JointAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|m| write!(f, "{}", m))
    }
}
