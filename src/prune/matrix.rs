use super::*;
use crate::Error;
use crate::Interrupt;
use crate::model::*;
use crate::solver::Checker;
use crate::strategy::*;

/// Prunes the transition matrix of a model under a memoryless strategy.
///
/// Each agent's rules are applied in order. A rule targets the states its
/// condition selects on the model as pruned so far, minus the states an
/// earlier rule of the same agent already claimed, and keeps only the
/// joint actions where that agent plays as the rule says.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixPruner {
    pub semantics: Semantics,
}

impl MatrixPruner {
    pub fn new(semantics: Semantics) -> Self {
        Self { semantics }
    }
}

impl Pruner for MatrixPruner {
    fn prune(
        &self,
        cgs: &Cgs,
        strategy: &Collective,
        interrupt: &Interrupt,
    ) -> Result<Pruned, Error> {
        if let Some(reason) = screen(cgs, strategy)? {
            return Ok(Pruned::Inadmissible(reason));
        }
        let mut matrix = cgs.matrix().to_vec();
        for (agent, natural) in strategy.strategies() {
            let mut covered = StateSet::empty();
            for rule in natural.rules() {
                interrupt.check()?;
                let targets = match &rule.condition {
                    Condition::True => StateSet::full(cgs.n()),
                    Condition::Formula(formula) => {
                        let ref current = cgs.with_matrix(matrix.clone());
                        Checker::new(current, interrupt).states(formula)?
                    }
                    Condition::History(history) => {
                        return Ok(Pruned::Inadmissible(format!(
                            "condition {} of agent {} needs a strategy with recall",
                            history, agent
                        )));
                    }
                }
                .difference(&covered);
                for s in targets.iter() {
                    let row = matrix[s]
                        .iter()
                        .map(|cell| {
                            cell.retain(|joint| {
                                joint
                                    .of(*agent)
                                    .is_some_and(|m| self.semantics.admits(m, rule.action))
                            })
                        })
                        .collect::<Vec<_>>();
                    if self.semantics == Semantics::Hard && row.iter().all(Cell::is_empty) {
                        let reason = format!(
                            "rule {} of agent {} leaves state {} without a move",
                            rule,
                            agent,
                            cgs.name(s)
                        );
                        log::debug!("inadmissible: {}", reason);
                        return Ok(Pruned::Inadmissible(reason));
                    }
                    matrix[s] = row;
                }
                covered = covered.union(&targets);
            }
        }
        let restricted = cgs.with_matrix(matrix);
        match restricted.dead_end() {
            Some(s) => Ok(Pruned::Inadmissible(format!(
                "state {} has no move left under {}",
                cgs.name(s),
                strategy
            ))),
            None => Ok(Pruned::Restricted(restricted)),
        }
    }
}
