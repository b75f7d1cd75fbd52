use super::*;
use crate::Agent;
use crate::State;

/// A concurrent game structure.
///
/// States are indexed `0..n` in the order they were named. The transition
/// matrix is square; cell `(s, t)` lists the joint actions that move the
/// game from `s` to `t`. Labels are one boolean per atomic proposition.
///
/// A model is never mutated by pruning: restriction builds a new model
/// through [`Cgs::with_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cgs {
    states: Vec<String>,
    agents: usize,
    matrix: Vec<Vec<Cell>>,
    props: Vec<String>,
    labels: Vec<Vec<bool>>,
    initial: State,
    unknown: Vec<String>,
    costs: Option<Costs>,
}

impl Cgs {
    /// Assemble a model, checking dimensions but not the liveness or
    /// idle invariants; see [`Cgs::validate`].
    pub fn new(
        states: Vec<String>,
        agents: usize,
        matrix: Vec<Vec<Cell>>,
        props: Vec<String>,
        labels: Vec<Vec<bool>>,
        initial: State,
    ) -> Result<Self, ModelError> {
        let n = states.len();
        if n == 0 {
            return Err(ModelError::Shape("model has no states".into()));
        }
        if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
            return Err(ModelError::Shape(format!(
                "transition matrix must be {} by {}",
                n, n
            )));
        }
        if labels.len() != n || labels.iter().any(|row| row.len() != props.len()) {
            return Err(ModelError::Shape(format!(
                "labelling must be {} rows of {} bits",
                n,
                props.len()
            )));
        }
        if initial >= n {
            return Err(ModelError::Shape(format!("initial state {} out of range", initial)));
        }
        let widths = matrix
            .iter()
            .flatten()
            .flat_map(|cell| cell.joints())
            .all(|joint| joint.width() == agents);
        if !widths {
            return Err(ModelError::Shape(format!(
                "joint actions must have width {}",
                agents
            )));
        }
        Ok(Self {
            states,
            agents,
            matrix,
            props,
            labels,
            initial,
            unknown: Vec::new(),
            costs: None,
        })
    }

    /// Attach the verbatim `Unkown_Transition_by` section.
    pub fn with_unknown(mut self, lines: Vec<String>) -> Self {
        self.unknown = lines;
        self
    }
    /// Attach a resource bound and action costs.
    pub fn with_costs(mut self, costs: Costs) -> Self {
        self.costs = Some(costs);
        self
    }
    /// Same model over a different transition matrix of the same shape.
    pub fn with_matrix(&self, matrix: Vec<Vec<Cell>>) -> Self {
        debug_assert!(matrix.len() == self.n());
        Self {
            matrix,
            ..self.clone()
        }
    }

    /// Check liveness (no dead-end state) and idle availability (every
    /// agent can idle somewhere out of every state).
    pub fn validate(&self) -> Result<(), ModelError> {
        self.live()?;
        for (s, row) in self.matrix.iter().enumerate() {
            if row.iter().any(|c| matches!(c, Cell::Wildcard)) {
                continue;
            }
            for agent in 1..=self.agents {
                let idles = row
                    .iter()
                    .flat_map(|c| c.joints())
                    .any(|j| j.of(agent) == Some(Move::Idle));
                if !idles {
                    return Err(ModelError::NoIdle {
                        state: self.name(s).to_string(),
                        agent,
                    });
                }
            }
        }
        Ok(())
    }
    /// Check that no state is a dead end.
    pub fn live(&self) -> Result<(), ModelError> {
        match self.dead_end() {
            Some(s) => Err(ModelError::DeadEnd(self.name(s).to_string())),
            None => Ok(()),
        }
    }
    /// First state whose row is entirely empty.
    pub fn dead_end(&self) -> Option<State> {
        self.matrix
            .iter()
            .position(|row| row.iter().all(|c| c.is_empty()))
    }

    /// Number of states.
    pub fn n(&self) -> usize {
        self.states.len()
    }
    pub fn agents(&self) -> usize {
        self.agents
    }
    pub fn states(&self) -> &[String] {
        &self.states
    }
    pub fn name(&self, s: State) -> &str {
        &self.states[s]
    }
    pub fn index(&self, name: &str) -> Option<State> {
        self.states.iter().position(|s| s == name)
    }
    pub fn initial(&self) -> State {
        self.initial
    }
    pub fn props(&self) -> &[String] {
        &self.props
    }
    pub fn prop(&self, name: &str) -> Option<usize> {
        self.props.iter().position(|p| p == name)
    }
    pub fn label(&self, s: State) -> &[bool] {
        &self.labels[s]
    }
    pub fn labels(&self) -> &[Vec<bool>] {
        &self.labels
    }
    pub fn matrix(&self) -> &[Vec<Cell>] {
        &self.matrix
    }
    pub fn cell(&self, s: State, t: State) -> &Cell {
        &self.matrix[s][t]
    }
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }
    pub fn costs(&self) -> Option<&Costs> {
        self.costs.as_ref()
    }

    /// States where the proposition holds.
    pub fn satisfying(&self, prop: usize) -> StateSet {
        (0..self.n()).filter(|&s| self.labels[s][prop]).collect()
    }
    /// Every `(source, target)` pair with a transition. Wildcard cells
    /// contribute a self-loop at their source.
    pub fn edges(&self) -> Vec<(State, State)> {
        self.matrix
            .iter()
            .enumerate()
            .flat_map(|(s, row)| {
                row.iter().enumerate().filter_map(move |(t, cell)| match cell {
                    Cell::Empty => None,
                    Cell::Wildcard => Some((s, s)),
                    Cell::Joint(js) if js.is_empty() => None,
                    Cell::Joint(_) => Some((s, t)),
                })
            })
            .collect()
    }
    /// Successor set of one state.
    pub fn successors(&self, s: State) -> StateSet {
        self.matrix[s]
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(t, cell)| match cell {
                Cell::Wildcard => s,
                _ => t,
            })
            .collect()
    }
    /// Every joint action available at `s` with its destination.
    /// A wildcard cell yields one all-wildcard joint action looping on `s`.
    pub fn moves(&self, s: State) -> Vec<(JointAction, State)> {
        self.matrix[s]
            .iter()
            .enumerate()
            .flat_map(|(t, cell)| match cell {
                Cell::Empty => Vec::new(),
                Cell::Wildcard => vec![(JointAction::wildcard(self.agents), s)],
                Cell::Joint(js) => js.iter().map(|j| (j.clone(), t)).collect(),
            })
            .collect()
    }
    /// Distinct non-idle action symbols an agent plays anywhere, sorted.
    pub fn actions(&self, agent: Agent) -> Vec<char> {
        let mut actions = self
            .matrix
            .iter()
            .flatten()
            .flat_map(|c| c.joints())
            .filter_map(|j| j.of(agent))
            .filter_map(|m| m.symbol())
            .collect::<Vec<_>>();
        actions.sort_unstable();
        actions.dedup();
        actions
    }
    /// Cost of an action under the model's cost table; zero without one.
    pub fn cost(&self, agent: Agent, action: char) -> u32 {
        self.costs
            .as_ref()
            .map_or(0, |c| c.cost(&self.matrix, agent, action))
    }
}
