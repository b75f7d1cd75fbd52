use crate::State;
use std::collections::BTreeSet;

/// A set of state indices; the value every formula node evaluates to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet(BTreeSet<State>);

impl StateSet {
    pub fn empty() -> Self {
        Self::default()
    }
    /// All states of an `n`-state model.
    pub fn full(n: usize) -> Self {
        Self((0..n).collect())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, state: State) -> bool {
        self.0.contains(&state)
    }
    pub fn insert(&mut self, state: State) -> bool {
        self.0.insert(state)
    }
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.0.iter().copied()
    }
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).copied().collect())
    }
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).copied().collect())
    }
    pub fn difference(&self, other: &Self) -> Self {
        Self(self.0.difference(&other.0).copied().collect())
    }
    /// Complement within an `n`-state model.
    pub fn complement(&self, n: usize) -> Self {
        Self((0..n).filter(|s| !self.0.contains(s)).collect())
    }
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StateSet {
    type Item = State;
    type IntoIter = std::collections::btree_set::IntoIter<State>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<const K: usize> From<[State; K]> for StateSet {
    fn from(states: [State; K]) -> Self {
        states.into_iter().collect()
    }
}

impl std::fmt::Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebra() {
        let a = StateSet::from([0, 1]);
        let b = StateSet::from([1, 2]);
        assert_eq!(a.union(&b), StateSet::from([0, 1, 2]));
        assert_eq!(a.intersection(&b), StateSet::from([1]));
        assert_eq!(a.difference(&b), StateSet::from([0]));
        assert_eq!(a.complement(4), StateSet::from([2, 3]));
        assert!(StateSet::from([1]).is_subset(&a));
        assert_eq!(a.to_string(), "{0, 1}");
    }
}
