use super::*;
use crate::Agent;
use crate::Complexity;

/// One natural strategy per coalition agent, in coalition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Collective(Vec<(Agent, Natural)>);

impl Collective {
    pub fn agents(&self) -> impl Iterator<Item = Agent> + '_ {
        self.0.iter().map(|(a, _)| *a)
    }
    pub fn strategies(&self) -> &[(Agent, Natural)] {
        &self.0
    }
    pub fn get(&self, agent: Agent) -> Option<&Natural> {
        self.0.iter().find(|(a, _)| *a == agent).map(|(_, n)| n)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn complexity(&self) -> Complexity {
        self.0.iter().map(|(_, n)| n.complexity()).sum()
    }
    pub fn recalls(&self) -> bool {
        self.0.iter().any(|(_, n)| n.recalls())
    }
    /// Both profiles together, in agent order. `other` wins for agents in both.
    pub fn join(&self, other: &Self) -> Self {
        let mut joined = self
            .0
            .iter()
            .filter(|(a, _)| other.get(*a).is_none())
            .chain(other.0.iter())
            .cloned()
            .collect::<Vec<_>>();
        joined.sort_by_key(|(a, _)| *a);
        Self(joined)
    }
    /// The same profile with one agent's strategy swapped out.
    pub fn replace(&self, agent: Agent, natural: Natural) -> Self {
        Self(
            self.0
                .iter()
                .map(|(a, n)| match *a == agent {
                    true => (*a, natural.clone()),
                    false => (*a, n.clone()),
                })
                .collect(),
        )
    }
}

impl From<Vec<(Agent, Natural)>> for Collective {
    fn from(strategies: Vec<(Agent, Natural)>) -> Self {
        Self(strategies)
    }
}

impl FromIterator<(Agent, Natural)> for Collective {
    fn from_iter<I: IntoIterator<Item = (Agent, Natural)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Collective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .0
            .iter()
            .map(|(a, n)| format!("agent {}: {}", a, n))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", text)
    }
}

impl serde::Serialize for Collective {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(a, n)| (a.to_string(), n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Move;

    fn natural(rules: &[(&str, char)]) -> Natural {
        rules
            .iter()
            .map(|(c, a)| {
                Rule::new(
                    Condition::parse(c).expect("valid condition"),
                    Move::try_from(*a).expect("valid action"),
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn profile() {
        let profile = Collective::from(vec![
            (1, natural(&[("p", 'A'), ("T", 'B')])),
            (2, natural(&[("T", 'I')])),
        ]);
        assert_eq!(profile.complexity(), 3);
        assert_eq!(profile.to_string(), "agent 1: [(p, A), (T, B)]; agent 2: [(T, I)]");
        let swapped = profile.replace(2, natural(&[("!q", 'C')]));
        assert_eq!(swapped.get(2).map(|n| n.complexity()), Some(2));
        assert_eq!(swapped.get(1), profile.get(1));
        assert_eq!(swapped.agents().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn joins_in_agent_order() {
        let ours = Collective::from(vec![(2, natural(&[("T", 'A')]))]);
        let theirs = Collective::from(vec![
            (3, natural(&[("p", 'C')])),
            (1, natural(&[("T", 'B')])),
        ]);
        let joined = ours.join(&theirs);
        assert_eq!(joined.agents().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(joined.complexity(), 3);
        let overridden = joined.join(&Collective::from(vec![(2, natural(&[("q", 'D')]))]));
        assert_eq!(overridden.get(2).map(|n| n.to_string()), Some("[(q, D)]".into()));
        assert_eq!(overridden.len(), 3);
    }

    #[test]
    fn serializes() {
        let profile = Collective::from(vec![(1, natural(&[("p and q", 'A')]))]);
        assert_eq!(
            serde_json::to_string(&profile).expect("serializes"),
            r#"{"1":[{"condition":"p and q","action":"A"}]}"#
        );
    }
}
