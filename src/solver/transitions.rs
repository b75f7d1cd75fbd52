use crate::State;
use crate::model::*;

/// Successor sets and labelled moves of every state, computed once per
/// model so fixpoint iterations never re-scan the matrix.
#[derive(Debug, Clone)]
pub struct Transitions {
    successors: Vec<StateSet>,
    moves: Vec<Vec<(JointAction, State)>>,
}

impl Transitions {
    pub fn n(&self) -> usize {
        self.successors.len()
    }
    pub fn successors(&self, s: State) -> &StateSet {
        &self.successors[s]
    }
    pub fn moves(&self, s: State) -> &[(JointAction, State)] {
        &self.moves[s]
    }
}

impl From<&Cgs> for Transitions {
    fn from(cgs: &Cgs) -> Self {
        Self {
            successors: (0..cgs.n()).map(|s| cgs.successors(s)).collect(),
            moves: (0..cgs.n()).map(|s| cgs.moves(s)).collect(),
        }
    }
}
