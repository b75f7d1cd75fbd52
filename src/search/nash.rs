use super::*;
use crate::Agent;
use crate::Complexity;
use crate::Error;
use crate::logic::NatAtlQuery;
use crate::model::Coalition;
use crate::solver::Checker;
use crate::strategy::*;

/// Each agent's objective: one shared goal unless overridden per agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Goals {
    shared: NatAtlQuery,
    overrides: Vec<(Agent, NatAtlQuery)>,
}

impl Goals {
    pub fn shared(goal: NatAtlQuery) -> Self {
        Self {
            shared: goal,
            overrides: Vec::new(),
        }
    }
    pub fn with(mut self, agent: Agent, goal: NatAtlQuery) -> Self {
        self.overrides.retain(|(a, _)| *a != agent);
        self.overrides.push((agent, goal));
        self
    }
    pub fn of(&self, agent: Agent) -> &NatAtlQuery {
        self.overrides
            .iter()
            .find(|(a, _)| *a == agent)
            .map(|(_, g)| g)
            .unwrap_or(&self.shared)
    }
}

/// A unilateral change of strategy that wins an agent's goal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Deviation {
    pub agent: Agent,
    pub strategy: Natural,
}

impl std::fmt::Display for Deviation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent {} deviates to {}", self.agent, self.strategy)
    }
}

impl Synthesizer {
    /// Whether the coalition can surely win: the plain synthesis loop.
    pub fn sure_win(&self, query: &NatAtlQuery) -> Result<Report, Error> {
        self.run(query)
    }

    /// Look for a profitable deviation from `profile`.
    ///
    /// An agent whose goal already holds under the profile has nothing
    /// to gain. Any other agent deviates profitably when swapping in some
    /// strategy of complexity at most `k` makes its goal hold.
    pub fn is_not_nash(
        &self,
        profile: &Collective,
        goals: &Goals,
        k: Complexity,
    ) -> Result<Option<Deviation>, Error> {
        let ref interrupt = self.interrupt();
        let ref conditions = self.conditions(k);
        for (agent, current) in profile.strategies() {
            let goal = goals.of(*agent);
            self.admit(goal.coalition())?;
            let ref ctl = goal.to_ctl();
            if self.attempt(ctl, profile, interrupt)?.won() {
                continue;
            }
            let ref actions = self.model().actions(*agent);
            for strategy in deviations(current, actions, conditions, k) {
                interrupt.check()?;
                let deviated = profile.replace(*agent, strategy.clone());
                if self.attempt(ctl, &deviated, interrupt)?.won() {
                    log::info!("agent {} deviates from {} to {}", agent, current, strategy);
                    return Ok(Some(Deviation {
                        agent: *agent,
                        strategy,
                    }));
                }
            }
        }
        Ok(None)
    }

    /// First profile of `coalition`, by increasing complexity up to `k`,
    /// from which no agent deviates profitably.
    pub fn exists_nash(
        &self,
        goals: &Goals,
        coalition: &Coalition,
        k: Complexity,
    ) -> Result<Option<Collective>, Error> {
        self.find_nash(goals, coalition, k, |_| Ok(true))
    }

    /// First equilibrium under which `target` achieves its own goal.
    pub fn wins_some_nash(
        &self,
        goals: &Goals,
        coalition: &Coalition,
        target: Agent,
        k: Complexity,
    ) -> Result<Option<Collective>, Error> {
        self.find_nash(goals, coalition, k, |profile| {
            self.achieves(goals, target, profile)
        })
    }

    /// First equilibrium under which `target` misses its own goal.
    pub fn loses_some_nash(
        &self,
        goals: &Goals,
        coalition: &Coalition,
        target: Agent,
        k: Complexity,
    ) -> Result<Option<Collective>, Error> {
        self.find_nash(goals, coalition, k, |profile| {
            self.achieves(goals, target, profile).map(|won| !won)
        })
    }

    fn achieves(&self, goals: &Goals, agent: Agent, profile: &Collective) -> Result<bool, Error> {
        let goal = goals.of(agent);
        self.admit(goal.coalition())?;
        Ok(self
            .attempt(&goal.to_ctl(), profile, &self.interrupt())?
            .won())
    }

    /// Profiles failing `keep` are skipped before the deviation check.
    fn find_nash<F>(
        &self,
        goals: &Goals,
        coalition: &Coalition,
        k: Complexity,
        keep: F,
    ) -> Result<Option<Collective>, Error>
    where
        F: Fn(&Collective) -> Result<bool, Error>,
    {
        self.admit(coalition)?;
        let ref interrupt = self.interrupt();
        for i in 1..=k {
            for profile in Enumerator::new(self.pools(coalition, i)) {
                interrupt.check()?;
                if !keep(&profile)? {
                    continue;
                }
                if self.is_not_nash(&profile, goals, k)?.is_none() {
                    log::info!("equilibrium at bound {}: {}", i, profile);
                    return Ok(Some(profile));
                }
            }
        }
        Ok(None)
    }

    /// Whether a goal holds on the unpruned model, with the natural
    /// quantifier read as a plain coalition quantifier.
    pub fn holds(&self, goal: &NatAtlQuery) -> Result<bool, Error> {
        self.admit(goal.coalition())?;
        Ok(Checker::new(self.model(), &self.interrupt())
            .evaluate(&goal.to_atl())?
            .holds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::*;
    use crate::model::*;

    // Agent 2 reaches p from s0 by playing D; agent 1 cannot influence it.
    const MODEL: &str = "Transition
II,AI,IC,AC ID,AD
0 II,AI,IC,AC,ID,AD
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
2
";

    fn synthesizer(text: &str) -> Synthesizer {
        Synthesizer::new(text.parse().expect("valid model"), Config::default()).expect("valid model")
    }
    fn goals() -> Goals {
        Goals::shared(NatAtl::parse("<{1,2},1>F p").expect("valid NatATL"))
    }
    fn profile(first: char, second: char) -> Collective {
        let rule = |a| Natural::new(vec![Rule::new(Condition::True, Move::Act(a))]);
        Collective::from(vec![(1, rule(first)), (2, rule(second))])
    }

    #[test]
    fn profitable_deviation() {
        let deviation = synthesizer(MODEL)
            .is_not_nash(&profile('A', 'C'), &goals(), 1)
            .expect("search completes")
            .expect("agent 2 deviates");
        assert_eq!(deviation.agent, 2);
        assert_eq!(deviation.strategy.to_string(), "[(T, D)]");
    }

    #[test]
    fn equilibrium_without_the_deviation() {
        let restricted = MODEL
            .replace("II,AI,IC,AC ID,AD", "II,AI,IC,AC 0")
            .replace(",ID,AD", "");
        let found = synthesizer(&restricted)
            .is_not_nash(&profile('A', 'C'), &goals(), 1)
            .expect("search completes");
        assert_eq!(found, None);
    }

    #[test]
    fn winners_never_deviate() {
        let found = synthesizer(MODEL)
            .is_not_nash(&profile('A', 'D'), &goals(), 2)
            .expect("search completes");
        assert_eq!(found, None);
    }

    #[test]
    fn empty_profile_is_nash() {
        let found = synthesizer(MODEL)
            .is_not_nash(&Collective::default(), &goals(), 3)
            .expect("search completes");
        assert_eq!(found, None);
    }

    #[test]
    fn per_agent_goals() {
        let goals = goals().with(1, NatAtl::parse("<{1},1>G !p").expect("valid NatATL"));
        assert_eq!(goals.of(1).to_ctl().to_string(), "AG !p");
        assert_eq!(goals.of(2).to_ctl().to_string(), "AF p");
        let deviation = synthesizer(MODEL)
            .is_not_nash(&profile('A', 'D'), &goals, 1)
            .expect("search completes");
        assert_eq!(deviation, None, "agent 1 cannot stop agent 2");
    }

    #[test]
    fn finds_equilibrium() {
        let ref synthesizer = synthesizer(MODEL);
        let found = synthesizer
            .exists_nash(&goals(), &Coalition::from(vec![1, 2]), 1)
            .expect("search completes");
        assert_eq!(found, Some(profile('A', 'D')));
        assert!(synthesizer.holds(goals().of(2)).expect("evaluates"));
        assert!(synthesizer.sure_win(goals().of(1)).expect("search completes").satisfiable);
    }

    #[test]
    fn equilibria_by_target_outcome() {
        let ref coalition = Coalition::from(vec![1, 2]);
        let found = synthesizer(MODEL)
            .wins_some_nash(&goals(), coalition, 2, 1)
            .expect("search completes");
        assert_eq!(found, Some(profile('A', 'D')));
        let found = synthesizer(MODEL)
            .loses_some_nash(&goals(), coalition, 2, 1)
            .expect("search completes");
        assert_eq!(found, None, "the only losing profile is not stable");
        let restricted = MODEL
            .replace("II,AI,IC,AC ID,AD", "II,AI,IC,AC 0")
            .replace(",ID,AD", "");
        let found = synthesizer(&restricted)
            .loses_some_nash(&goals(), coalition, 2, 1)
            .expect("search completes");
        assert_eq!(found, Some(profile('A', 'C')));
        let found = synthesizer(&restricted)
            .wins_some_nash(&goals(), coalition, 2, 1)
            .expect("search completes");
        assert_eq!(found, None);
    }
}
