use super::*;
use crate::Error;
use crate::Interrupt;
use crate::model::*;
use crate::solver::Checker;
use crate::strategy::*;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// Prunes a bounded unwinding of the model, so rules may depend on the
/// history that led to a state.
///
/// State formulas are evaluated once on the unpruned model and matched
/// against each vertex's state; history expressions are matched against
/// the labels along the vertex's path. Where none of an agent's rules
/// applies, the agent idles if it can.
#[derive(Debug, Clone, Copy)]
pub struct TreePruner {
    pub semantics: Semantics,
    pub height: usize,
}

impl Default for TreePruner {
    fn default() -> Self {
        Self {
            semantics: Semantics::default(),
            height: crate::UNWINDING_HEIGHT,
        }
    }
}

impl TreePruner {
    pub fn new(semantics: Semantics, height: usize) -> Self {
        Self { semantics, height }
    }

    fn targets(
        &self,
        tree: &Unwinding,
        open: &[NodeIndex],
        condition: &Condition,
        cgs: &Cgs,
        interrupt: &Interrupt,
    ) -> Result<Vec<NodeIndex>, Error> {
        match condition {
            Condition::True => Ok(open.to_vec()),
            Condition::Formula(formula) => {
                // Evaluated on the unpruned model, not on what earlier
                // rules left as the matrix form does.
                let states = Checker::new(cgs, interrupt).states(formula)?;
                Ok(open
                    .iter()
                    .copied()
                    .filter(|n| states.contains(tree.vertex(*n).state))
                    .collect())
            }
            Condition::History(history) => {
                let mut found = Vec::new();
                for node in open {
                    if tree.matches(*node, history, cgs)? {
                        found.push(*node);
                    }
                }
                Ok(found)
            }
        }
    }
}

impl Pruner for TreePruner {
    fn prune(
        &self,
        cgs: &Cgs,
        strategy: &Collective,
        interrupt: &Interrupt,
    ) -> Result<Pruned, Error> {
        if let Some(reason) = screen(cgs, strategy)? {
            return Ok(Pruned::Inadmissible(reason));
        }
        let mut tree = Unwinding::new(cgs, self.height);
        for (agent, natural) in strategy.strategies() {
            let agent = *agent;
            let mut covered = HashSet::new();
            for rule in natural.rules() {
                interrupt.check()?;
                let open = tree
                    .reachable()
                    .into_iter()
                    .filter(|n| !tree.is_leaf(*n) && !covered.contains(n))
                    .collect::<Vec<_>>();
                for node in self.targets(&tree, &open, &rule.condition, cgs, interrupt)? {
                    tree.retain(node, |joint| {
                        joint
                            .of(agent)
                            .is_some_and(|m| self.semantics.admits(m, rule.action))
                    });
                    if self.semantics == Semantics::Hard && tree.actions(node).is_empty() {
                        let reason = format!(
                            "rule {} of agent {} leaves a history ending in {} without a move",
                            rule,
                            agent,
                            cgs.name(tree.vertex(node).state)
                        );
                        log::debug!("inadmissible: {}", reason);
                        return Ok(Pruned::Inadmissible(reason));
                    }
                    covered.insert(node);
                }
            }
            let idle = |joint: &JointAction| {
                joint
                    .of(agent)
                    .is_some_and(|m| m.is_idle() || m == Move::Any)
            };
            for node in tree.reachable() {
                if tree.is_leaf(node) || covered.contains(&node) {
                    continue;
                }
                if tree.actions(node).into_iter().any(|j| idle(j)) {
                    tree.retain(node, idle);
                }
            }
        }
        let restricted = tree.flatten(cgs)?;
        match restricted.dead_end() {
            Some(s) => Ok(Pruned::Inadmissible(format!(
                "history {} has no move left under {}",
                restricted.name(s),
                strategy
            ))),
            None => Ok(Pruned::Restricted(restricted)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::*;
    use crate::solver::evaluate;

    // s0 -A-> s1 (p) -A-> s2 (q); everything may idle in place.
    const MODEL: &str = "Transition
I A 0
0 I A
0 0 I
Name_State
s0 s1 s2
Initial_State
s0
Atomic_propositions
p q
Labelling
0 0
1 0
0 1
Number_of_agents
1
";

    fn profile(rules: &[(&str, char)]) -> Collective {
        let rules = rules
            .iter()
            .map(|(c, a)| {
                Rule::new(
                    Condition::parse(c).expect("valid condition"),
                    Move::try_from(*a).expect("valid action"),
                )
            })
            .collect::<Vec<_>>();
        Collective::from(vec![(1, Natural::new(rules))])
    }
    fn prune(rules: &[(&str, char)]) -> Pruned {
        let cgs = MODEL.parse::<Cgs>().expect("valid model");
        TreePruner::new(Semantics::Hard, 4)
            .prune(&cgs, &profile(rules), &Interrupt::never())
            .expect("prunes")
    }
    fn wins(pruned: &Pruned, goal: &str) -> bool {
        let cgs = pruned.model().expect("admissible");
        evaluate(cgs, &Ctl::parse(goal).expect("valid CTL"))
            .expect("evaluates")
            .holds()
    }

    #[test]
    fn memoryless_rules_on_tree() {
        let pruned = prune(&[("T", 'A')]);
        assert!(matches!(pruned, Pruned::Inadmissible(_)), "s2 cannot play A");
        let pruned = prune(&[("!q", 'A')]);
        assert!(wins(&pruned, "AF q"));
    }

    #[test]
    fn idle_fallback() {
        let pruned = prune(&[("!p and !q", 'A')]);
        assert!(wins(&pruned, "AF p"));
        assert!(!wins(&pruned, "EF q"), "agent idles once past s0");
    }

    #[test]
    fn history_rules() {
        let pruned = prune(&[("!p . p", 'A'), ("!p and !q", 'A')]);
        assert!(wins(&pruned, "AF q"));
        let pruned = prune(&[("p . p", 'A'), ("!p and !q", 'A')]);
        assert!(!wins(&pruned, "EF q"), "no history starts in p");
    }
}
