use super::*;
use crate::Agent;

/// A set of agents acting together against the rest.
///
/// Agents are 1-based and kept sorted without repeats, so two coalitions
/// naming the same agents in different orders compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coalition(Vec<Agent>);

impl Coalition {
    pub fn empty() -> Self {
        Self::default()
    }
    /// Every agent of an `n`-agent model.
    pub fn all(n: usize) -> Self {
        Self((1..=n).collect())
    }
    pub fn agents(&self) -> &[Agent] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, agent: Agent) -> bool {
        self.0.binary_search(&agent).is_ok()
    }
    /// Whether every member exists in an `n`-agent model.
    pub fn fits(&self, n: usize) -> bool {
        self.0.iter().all(|a| (1..=n).contains(a))
    }
    /// Split a joint action into the coalition's part and everybody else's.
    pub fn split(&self, joint: &JointAction) -> (Vec<Move>, Vec<Move>) {
        let mut ours = Vec::with_capacity(self.len());
        let mut theirs = Vec::with_capacity(joint.width().saturating_sub(self.len()));
        for (i, m) in joint.moves().iter().enumerate() {
            match self.contains(i + 1) {
                true => ours.push(*m),
                false => theirs.push(*m),
            }
        }
        (ours, theirs)
    }
}

impl From<Vec<Agent>> for Coalition {
    fn from(mut agents: Vec<Agent>) -> Self {
        agents.sort_unstable();
        agents.dedup();
        Self(agents)
    }
}

impl FromIterator<Agent> for Coalition {
    fn from_iter<I: IntoIterator<Item = Agent>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl std::fmt::Display for Coalition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized() {
        let coalition = Coalition::from(vec![3, 1, 3]);
        assert_eq!(coalition.agents(), &[1, 3]);
        assert_eq!(coalition.to_string(), "1,3");
        assert!(coalition.contains(3));
        assert!(!coalition.contains(2));
        assert!(coalition.fits(3));
        assert!(!coalition.fits(2));
    }

    #[test]
    fn split_projects() {
        let joint = JointAction::parse("ABC", 3).expect("valid label");
        let (ours, theirs) = Coalition::from(vec![1, 3]).split(&joint);
        assert_eq!(ours, vec![Move::Act('A'), Move::Act('C')]);
        assert_eq!(theirs, vec![Move::Act('B')]);
        let (ours, theirs) = Coalition::empty().split(&joint);
        assert!(ours.is_empty());
        assert_eq!(theirs.len(), 3);
    }
}
