use crate::State;
use crate::logic::Formula;
use crate::logic::History;
use crate::logic::SyntaxError;
use crate::model::*;
use petgraph::Direction::Incoming;
use petgraph::Direction::Outgoing;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::collections::VecDeque;

/// A history: the game state it ends in and its length from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub state: State,
    pub depth: usize,
}

/// The game unwound into a tree of histories, `height` levels deep.
///
/// Vertices are grown breadth first from the initial state, one child per
/// joint action, so the same state appears once per distinct history
/// reaching it. Vertices at full height are leaves. Pruning removes edges
/// only; vertices cut off from the root are simply never reached again.
#[derive(Debug, Clone)]
pub struct Unwinding {
    graph: DiGraph<Vertex, JointAction>,
    height: usize,
}

impl Unwinding {
    pub fn new(cgs: &Cgs, height: usize) -> Self {
        let height = height.max(1);
        let mut graph = DiGraph::new();
        graph.add_node(Vertex {
            state: cgs.initial(),
            depth: 1,
        });
        let mut next = 0;
        while next < graph.node_count() {
            let parent = NodeIndex::new(next);
            let vertex = graph[parent];
            if vertex.depth < height {
                for (joint, t) in cgs.moves(vertex.state) {
                    let child = graph.add_node(Vertex {
                        state: t,
                        depth: vertex.depth + 1,
                    });
                    graph.add_edge(parent, child, joint);
                }
            }
            next += 1;
        }
        Self { graph, height }
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn vertex(&self, node: NodeIndex) -> Vertex {
        self.graph[node]
    }
    pub fn is_leaf(&self, node: NodeIndex) -> bool {
        self.graph[node].depth >= self.height
    }
    /// Joint actions still leaving a vertex.
    pub fn actions(&self, node: NodeIndex) -> Vec<&JointAction> {
        self.graph
            .edges_directed(node, Outgoing)
            .map(|e| e.weight())
            .collect()
    }
    /// Vertices still connected to the root, in breadth-first order.
    pub fn reachable(&self) -> Vec<NodeIndex> {
        let mut order = vec![self.root()];
        let mut queue = VecDeque::from([self.root()]);
        while let Some(node) = queue.pop_front() {
            for child in self.graph.neighbors_directed(node, Outgoing) {
                order.push(child);
                queue.push_back(child);
            }
        }
        order
    }
    /// Vertices from the root down to `node`.
    pub fn path(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.graph.neighbors_directed(current, Incoming).next() {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
    /// Drop the edges leaving `node` whose joint action fails `keep`.
    pub fn retain<F>(&mut self, node: NodeIndex, keep: F)
    where
        F: Fn(&JointAction) -> bool,
    {
        self.graph.retain_edges(|g, e| {
            g.edge_endpoints(e).is_none_or(|(s, _)| s != node) || keep(&g[e])
        });
    }
    /// Whether the history ending at `node` fits the expression: some
    /// word it generates, exactly as long as the history, labels every
    /// vertex on the way with a satisfied letter.
    pub fn matches(
        &self,
        node: NodeIndex,
        history: &History,
        cgs: &Cgs,
    ) -> Result<bool, SyntaxError> {
        let path = self.path(node);
        for word in history.witnesses(path.len()) {
            if fits(&word, &path, |n| cgs.label(self.graph[n].state), cgs.props())? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Rename the reachable vertices `s0, s1, ..` in breadth-first order
    /// and read the pruned tree back as a model. Leaves loop on themselves.
    pub fn flatten(&self, cgs: &Cgs) -> Result<Cgs, ModelError> {
        let order = self.reachable();
        let index = order
            .iter()
            .enumerate()
            .map(|(i, n)| (*n, i))
            .collect::<HashMap<_, _>>();
        let mut matrix = vec![vec![Cell::Empty; order.len()]; order.len()];
        for (i, node) in order.iter().enumerate() {
            if self.is_leaf(*node) {
                matrix[i][i] = Cell::Wildcard;
                continue;
            }
            for edge in self.graph.edges_directed(*node, Outgoing) {
                matrix[i][index[&edge.target()]].push(edge.weight().clone());
            }
        }
        Cgs::new(
            (0..order.len()).map(|i| format!("s{}", i)).collect(),
            cgs.agents(),
            matrix,
            cgs.props().to_vec(),
            order
                .iter()
                .map(|n| cgs.label(self.graph[*n].state).to_vec())
                .collect(),
            0,
        )
    }
}

fn fits<'a, L>(
    word: &[&Formula],
    path: &[NodeIndex],
    label: L,
    props: &[String],
) -> Result<bool, SyntaxError>
where
    L: Fn(NodeIndex) -> &'a [bool],
{
    for (letter, node) in word.iter().zip(path.iter()) {
        if !letter.holds(label(*node), props)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Dialect;

    const MODEL: &str = "Transition
I A
0 I
Name_State
s0 s1
Initial_State
s0
Atomic_propositions
p
Labelling
0
1
Number_of_agents
1
";

    fn cgs() -> Cgs {
        MODEL.parse().expect("valid model")
    }

    #[test]
    fn grows_breadth_first() {
        let tree = Unwinding::new(&cgs(), 3);
        // s0 -> {s0, s1}; s0 -> {s0, s1}, s1 -> {s1}
        assert_eq!(tree.reachable().len(), 1 + 2 + 3);
        assert_eq!(tree.vertex(tree.root()).state, 0);
        let leaves = tree.reachable().into_iter().filter(|n| tree.is_leaf(*n)).count();
        assert_eq!(leaves, 3);
    }

    #[test]
    fn history_matching() {
        let ref cgs = cgs();
        let tree = Unwinding::new(cgs, 3);
        let stays = History::parse("!p . !p*").expect("valid history");
        let moved = History::parse("!p . p*").expect("valid history");
        let ends = tree
            .reachable()
            .into_iter()
            .filter(|n| tree.matches(*n, &moved, cgs).expect("known atoms"))
            .map(|n| tree.path(n).len())
            .collect::<Vec<_>>();
        assert_eq!(ends, vec![1, 2, 3]);
        assert!(tree.matches(tree.root(), &stays, cgs).expect("known atoms"));
    }

    #[test]
    fn flatten_after_pruning() {
        let ref cgs = cgs();
        let mut tree = Unwinding::new(cgs, 2);
        tree.retain(tree.root(), |j| j.of(1) == Some(Move::Act('A')));
        let flat = tree.flatten(cgs).expect("well formed");
        assert_eq!(flat.n(), 2);
        assert_eq!(flat.successors(0), StateSet::from([1]));
        assert_eq!(flat.cell(1, 1), &Cell::Wildcard);
        assert_eq!(flat.label(1), &[true]);
        assert!(flat.live().is_ok());
    }
}
