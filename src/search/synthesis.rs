use super::*;
use crate::Agent;
use crate::Complexity;
use crate::Error;
use crate::Interrupt;
use crate::logic::*;
use crate::model::*;
use crate::prune::*;
use crate::solver::Checker;
use crate::strategy::*;

/// Searches for natural strategies on one validated model.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    cgs: Cgs,
    config: Config,
}

/// What one bound's sweep over candidates produced.
#[derive(Debug, Default)]
struct Sweep {
    winner: Option<Collective>,
    attempts: usize,
    reason: Option<String>,
}

impl Synthesizer {
    /// Fails when the model violates liveness or idle availability.
    pub fn new(cgs: Cgs, config: Config) -> Result<Self, Error> {
        cgs.validate()?;
        Ok(Self { cgs, config })
    }
    pub fn model(&self) -> &Cgs {
        &self.cgs
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub(crate) fn interrupt(&self) -> Interrupt {
        Interrupt::within(self.config.timeout)
    }

    /// Find a collective strategy of complexity at most the query's bound
    /// under which the coalition wins.
    pub fn run(&self, query: &NatAtlQuery) -> Result<Report, Error> {
        self.search(query, &self.interrupt())
    }

    pub fn search(&self, query: &NatAtlQuery, interrupt: &Interrupt) -> Result<Report, Error> {
        self.admit(query.coalition())?;
        if self.config.prefilter && !query.negated() {
            let atl = query.to_atl();
            if !Checker::new(&self.cgs, interrupt).evaluate(&atl)?.holds() {
                log::info!("{} fails for unbounded strategies", atl);
                return Ok(Report {
                    satisfiable: false,
                    bound: query.bound(),
                    attempts: 0,
                    strategy: None,
                    reason: Some(format!("{} does not hold, so no bounded strategy wins", atl)),
                });
            }
        }
        let ref goal = query.to_ctl();
        let mut attempts = 0;
        let mut reason = None;
        for i in 1..=query.bound() {
            interrupt.check()?;
            let enumerator = Enumerator::new(self.pools(query.coalition(), i));
            log::info!("bound {}: {} candidate strategies", i, enumerator.total());
            let sweep = match self.config.parallel {
                true => self.parallel(goal, enumerator, interrupt)?,
                false => self.sequential(goal, enumerator, interrupt)?,
            };
            attempts += sweep.attempts;
            reason = sweep.reason.or(reason);
            if let Some(strategy) = sweep.winner {
                log::info!("bound {}: found {}", i, strategy);
                return Ok(Report {
                    satisfiable: true,
                    bound: i,
                    attempts,
                    strategy: Some(strategy),
                    reason: None,
                });
            }
        }
        log::info!("no strategy up to bound {}", query.bound());
        Ok(Report {
            satisfiable: false,
            bound: query.bound(),
            attempts,
            strategy: None,
            reason: Some(reason.unwrap_or_else(|| {
                format!("no strategy of complexity up to {}", query.bound())
            })),
        })
    }

    /// Check one given strategy without searching.
    pub fn check(&self, query: &NatAtlQuery, strategy: &Collective) -> Result<Attempt, Error> {
        self.admit(query.coalition())?;
        self.attempt(&query.to_ctl(), strategy, &self.interrupt())
    }

    /// Prune under `strategy` and verify `goal` at the initial state.
    pub(crate) fn attempt(
        &self,
        goal: &Formula,
        strategy: &Collective,
        interrupt: &Interrupt,
    ) -> Result<Attempt, Error> {
        let semantics = self.config.semantics;
        let pruned = match (self.config.memory, strategy.recalls()) {
            (Memory::Recall { height }, _) => {
                TreePruner::new(semantics, height).prune(&self.cgs, strategy, interrupt)?
            }
            (Memory::Memoryless, true) => TreePruner::new(semantics, crate::UNWINDING_HEIGHT)
                .prune(&self.cgs, strategy, interrupt)?,
            (Memory::Memoryless, false) => {
                MatrixPruner::new(semantics).prune(&self.cgs, strategy, interrupt)?
            }
        };
        match pruned {
            Pruned::Inadmissible(reason) => {
                log::debug!("{} is inadmissible: {}", strategy, reason);
                Ok(Attempt::Inadmissible(reason))
            }
            Pruned::Restricted(ref model) => {
                match Checker::new(model, interrupt).evaluate(goal)?.holds() {
                    true => Ok(Attempt::Won),
                    false => {
                        log::debug!("{} loses {}", strategy, goal);
                        Ok(Attempt::Lost(format!("{} fails under {}", goal, strategy)))
                    }
                }
            }
        }
    }

    /// Conditions available at complexity `k` for the configured memory.
    pub(crate) fn conditions(&self, k: Complexity) -> Vec<Condition> {
        match self.config.memory {
            Memory::Memoryless => conditions(self.cgs.props(), k),
            Memory::Recall { .. } => histories(self.cgs.props(), k),
        }
    }
    /// Each coalition agent's strategies of complexity exactly `k`.
    pub(crate) fn pools(&self, coalition: &Coalition, k: Complexity) -> Vec<(Agent, Vec<Natural>)> {
        let ref conditions = self.conditions(k);
        coalition
            .agents()
            .iter()
            .map(|&agent| (agent, candidates(&self.cgs.actions(agent), conditions, k)))
            .collect()
    }
    pub(crate) fn admit(&self, coalition: &Coalition) -> Result<(), Error> {
        match coalition.fits(self.cgs.agents()) {
            true => Ok(()),
            false => Err(SyntaxError::Agent {
                agent: coalition.agents().iter().copied().max().unwrap_or_default(),
                agents: self.cgs.agents(),
            }
            .into()),
        }
    }

    fn sequential(
        &self,
        goal: &Formula,
        enumerator: Enumerator,
        interrupt: &Interrupt,
    ) -> Result<Sweep, Error> {
        let mut sweep = Sweep::default();
        for strategy in enumerator {
            interrupt.check()?;
            sweep.attempts += 1;
            match self.attempt(goal, &strategy, interrupt)? {
                Attempt::Won => {
                    sweep.winner = Some(strategy);
                    return Ok(sweep);
                }
                Attempt::Lost(reason) | Attempt::Inadmissible(reason) => {
                    sweep.reason = Some(reason);
                }
            }
        }
        Ok(sweep)
    }

    /// Verify candidates in chunks across the rayon pool. The first winner
    /// raises a child interrupt so siblings still running give up.
    #[cfg(feature = "native")]
    fn parallel(
        &self,
        goal: &Formula,
        mut enumerator: Enumerator,
        interrupt: &Interrupt,
    ) -> Result<Sweep, Error> {
        use rayon::iter::IntoParallelRefIterator;
        use rayon::iter::ParallelIterator;
        let ref child = interrupt.child();
        let mut sweep = Sweep::default();
        loop {
            interrupt.check()?;
            let chunk = enumerator
                .by_ref()
                .take(crate::PARALLEL_CHUNK)
                .collect::<Vec<_>>();
            if chunk.is_empty() {
                return Ok(sweep);
            }
            sweep.attempts += chunk.len();
            let found = chunk.par_iter().find_map_any(|strategy| {
                match self.attempt(goal, strategy, child) {
                    Ok(Attempt::Won) => {
                        child.raise();
                        Some(Ok(strategy.clone()))
                    }
                    Ok(_) => None,
                    Err(Error::Interrupted) if !interrupt.interrupted() => None,
                    Err(e) => Some(Err(e)),
                }
            });
            match found {
                Some(Ok(strategy)) => {
                    sweep.winner = Some(strategy);
                    return Ok(sweep);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
    }

    #[cfg(not(feature = "native"))]
    fn parallel(
        &self,
        goal: &Formula,
        enumerator: Enumerator,
        interrupt: &Interrupt,
    ) -> Result<Sweep, Error> {
        self.sequential(goal, enumerator, interrupt)
    }
}
