use super::*;
use crate::Agent;
use crate::Complexity;
use crate::Error;
use crate::Interrupt;
use crate::logic::*;
use crate::strategy::*;

impl Synthesizer {
    /// Decide a sequential NatSL query.
    ///
    /// A winner of the existential agents' own NatATL search settles it
    /// outright. Failing that, each existential candidate is replayed
    /// against every universal profile within the universal bounds, and
    /// the first that wins them all is reported. Without universal agents
    /// the first search is the whole answer.
    pub fn solve(&self, query: &NatSlQuery) -> Result<Report, Error> {
        let ref interrupt = self.interrupt();
        let ref existential = query.coalition(Binder::Exists);
        self.admit(existential)?;
        self.admit(&query.coalition(Binder::Forall))?;
        let universal = query.universal();
        let mut attempts = 0;
        let mut reason = None;
        if let Some(ref natatl) = query.existential() {
            let report = self.search(natatl, interrupt)?;
            if report.satisfiable || universal.is_empty() {
                return Ok(report);
            }
            attempts += report.attempts;
            reason = report.reason;
            log::info!("{} fails outright, trying universal responses", natatl);
        }
        let ref goal = query.to_ctl();
        let ref responses = self.responses(&universal);
        let bound = query.bound(Binder::Exists);
        let bounds = match existential.is_empty() {
            true => 0..=0,
            false => 1..=bound,
        };
        for i in bounds {
            for strategy in Enumerator::new(self.pools(existential, i)) {
                interrupt.check()?;
                attempts += 1;
                if let Attempt::Inadmissible(why) = self.attempt(goal, &strategy, interrupt)? {
                    reason = Some(why);
                    continue;
                }
                match self.withstands(goal, &strategy, responses, interrupt)? {
                    (tried, None) => {
                        attempts += tried;
                        log::info!("bound {}: {} wins every response", i, strategy);
                        return Ok(Report {
                            satisfiable: true,
                            bound: i,
                            attempts,
                            strategy: Some(strategy),
                            reason: None,
                        });
                    }
                    (tried, Some(why)) => {
                        attempts += tried;
                        reason = Some(why);
                    }
                }
            }
        }
        log::info!("no strategy up to bound {} beats every response", bound);
        Ok(Report {
            satisfiable: false,
            bound,
            attempts,
            strategy: None,
            reason: Some(reason.unwrap_or_else(|| {
                format!("no strategy up to bound {} beats every response", bound)
            })),
        })
    }

    /// Each universal agent's strategies of complexity 1 up to its bound.
    /// Agents with nothing to play are left unconstrained.
    fn responses(&self, universal: &[(Agent, Complexity)]) -> Vec<(Agent, Vec<Natural>)> {
        universal
            .iter()
            .map(|&(agent, bound)| {
                let ref actions = self.model().actions(agent);
                let strategies = (1..=bound)
                    .flat_map(|i| candidates(actions, &self.conditions(i), i))
                    .collect::<Vec<_>>();
                (agent, strategies)
            })
            .filter(|(_, strategies)| !strategies.is_empty())
            .collect()
    }

    /// Replay `strategy` against every universal profile. Stops at the
    /// first admissible profile under which the goal fails.
    fn withstands(
        &self,
        goal: &Formula,
        strategy: &Collective,
        responses: &[(Agent, Vec<Natural>)],
        interrupt: &Interrupt,
    ) -> Result<(usize, Option<String>), Error> {
        let mut tried = 0;
        for response in Enumerator::new(responses.to_vec()) {
            interrupt.check()?;
            tried += 1;
            let ref joint = strategy.join(&response);
            if let Attempt::Lost(why) = self.attempt(goal, joint, interrupt)? {
                log::debug!("{} is beaten by {}", strategy, response);
                return Ok((tried, Some(why)));
            }
        }
        Ok((tried, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coalition;

    // Agent 2 keeps p away only by playing D in s0 and then C in s1.
    const MODEL: &str = "Transition
0 ID,AD II,AI,IC,AC 0
0 0 II,AI,ID,AD IC,AC
0 0 II,AI,IC,AC,ID,AD 0
0 0 0 II,AI,IC,AC,ID,AD
Name_State
s0 s1 s2 s3
Initial_State
s0
Atomic_propositions
p q
Labelling
0 0
0 1
1 0
0 0
Number_of_agents
2
";

    fn synthesizer(memory: Memory) -> Synthesizer {
        let config = Config::default().with_memory(memory);
        Synthesizer::new(MODEL.parse().expect("valid model"), config).expect("valid model")
    }
    fn query(text: &str) -> NatSlQuery {
        NatSl::parse(text).expect("valid NatSL")
    }
    const RECALL: Memory = Memory::Recall { height: 4 };

    #[test]
    fn simple_responses_cannot_spoil() {
        let report = synthesizer(RECALL)
            .solve(&query("E{1}xA{1}y:(x,1)(y,2)F p"))
            .expect("search completes");
        assert!(report.satisfiable);
        assert_eq!(report.bound, 1);
        let strategy = report.strategy.expect("winner");
        assert_eq!(strategy.agents().collect::<Vec<_>>(), vec![1]);
        assert!(report.attempts > 1);
    }

    #[test]
    fn richer_responses_spoil() {
        let report = synthesizer(RECALL)
            .solve(&query("E{1}xA{2}y:(x,1)(y,2)F p"))
            .expect("search completes");
        assert!(!report.satisfiable);
        assert_eq!(report.bound, 1);
        assert!(report.reason.is_some());
    }

    #[test]
    fn existential_only_is_natatl() {
        let ref synthesizer = synthesizer(RECALL);
        let report = synthesizer
            .solve(&query("E{1}x:(x,1)F p"))
            .expect("search completes");
        let natatl = synthesizer
            .run(&NatAtl::parse("<{1},1>F p").expect("valid NatATL"))
            .expect("search completes");
        assert_eq!(report, natatl);
        assert!(!report.satisfiable);
    }

    #[test]
    fn universal_only() {
        let ref synthesizer = synthesizer(RECALL);
        let report = synthesizer
            .solve(&query("A{1}y:(y,2)F p"))
            .expect("search completes");
        assert!(report.satisfiable);
        assert_eq!(report.strategy, Some(Collective::default()));
        let report = synthesizer
            .solve(&query("A{2}y:(y,2)F p"))
            .expect("search completes");
        assert!(!report.satisfiable);
    }

    #[test]
    fn agents_must_exist() {
        assert!(matches!(
            synthesizer(RECALL).solve(&query("E{1}xA{1}y:(x,1)(y,3)F p")),
            Err(Error::Syntax(SyntaxError::Agent { agent: 3, agents: 2 }))
        ));
        assert_eq!(
            query("ExAy:(x,2)(y,1)F p").coalition(Binder::Exists),
            Coalition::from(vec![2])
        );
    }
}
