use crate::State;
use crate::model::StateSet;

/// Satisfying states of every subformula, in post-order.
///
/// Entry `i` belongs to the `i`-th node of [`crate::logic::Formula::postorder`];
/// the root is last.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    nodes: Vec<StateSet>,
    initial: State,
}

impl Evaluation {
    pub fn new(nodes: Vec<StateSet>, initial: State) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes, initial }
    }
    pub fn root(&self) -> &StateSet {
        self.nodes.last().expect("every formula has a root")
    }
    pub fn node(&self, i: usize) -> Option<&StateSet> {
        self.nodes.get(i)
    }
    pub fn nodes(&self) -> &[StateSet] {
        &self.nodes
    }
    /// Whether the initial state satisfies the whole formula.
    pub fn holds(&self) -> bool {
        self.root().contains(self.initial)
    }
}

impl From<Evaluation> for StateSet {
    fn from(evaluation: Evaluation) -> Self {
        evaluation.nodes.into_iter().last().unwrap_or_default()
    }
}
