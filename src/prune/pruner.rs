use crate::Error;
use crate::Interrupt;
use crate::logic::SyntaxError;
use crate::model::*;
use crate::strategy::Collective;

/// Outcome of restricting a model to a strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Pruned {
    /// The moves the strategy leaves, ready for verification.
    Restricted(Cgs),
    /// The strategy cannot be followed; the reason names the culprit.
    Inadmissible(String),
}

impl Pruned {
    pub fn model(&self) -> Option<&Cgs> {
        match self {
            Self::Restricted(cgs) => Some(cgs),
            Self::Inadmissible(_) => None,
        }
    }
}

/// Restricts a model to the transitions consistent with a collective
/// strategy. Implementations never mutate the input model.
pub trait Pruner {
    fn prune(
        &self,
        cgs: &Cgs,
        strategy: &Collective,
        interrupt: &Interrupt,
    ) -> Result<Pruned, Error>;
}

/// Checks shared by every pruner: agents exist and each agent's rules fit
/// the model's resource bound.
pub(crate) fn screen(cgs: &Cgs, strategy: &Collective) -> Result<Option<String>, Error> {
    if let Some(agent) = strategy.agents().find(|a| !(1..=cgs.agents()).contains(a)) {
        return Err(SyntaxError::Agent {
            agent,
            agents: cgs.agents(),
        }
        .into());
    }
    let Some(resource) = cgs.costs().and_then(Costs::resource) else {
        return Ok(None);
    };
    Ok(strategy.strategies().iter().find_map(|(agent, natural)| {
        let spent = natural
            .rules()
            .iter()
            .filter_map(|r| r.action.symbol())
            .map(|a| cgs.cost(*agent, a))
            .sum::<u32>();
        (spent > resource).then(|| {
            format!(
                "agent {} spends {} on {} but the resource bound is {}",
                agent, spent, natural, resource
            )
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::*;

    fn model() -> Cgs {
        "Transition
I A,B
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
Resource
2
Actions_Costs_from_Transition
0 2,3
0 0
"
        .parse()
        .expect("valid model")
    }

    fn profile(action: char) -> Collective {
        let rule = Rule::new(Condition::True, Move::Act(action));
        Collective::from(vec![(1, Natural::new(vec![rule]))])
    }

    #[test]
    fn resource_bound() {
        let cgs = model();
        assert_eq!(screen(&cgs, &profile('A')), Ok(None));
        assert!(matches!(screen(&cgs, &profile('B')), Ok(Some(reason)) if reason.contains("resource bound is 2")));
    }

    #[test]
    fn unknown_agent() {
        let cgs = model();
        let stray = Collective::from(vec![(2, Natural::default())]);
        assert_eq!(
            screen(&cgs, &stray),
            Err(Error::Syntax(SyntaxError::Agent { agent: 2, agents: 1 }))
        );
    }
}
