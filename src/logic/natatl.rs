use super::*;
use crate::Complexity;
use crate::model::Coalition;

/// A parsed NatATL query: `<{agents}, k>` over a boolean temporal goal,
/// optionally negated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatAtlQuery {
    formula: Formula,
    coalition: Coalition,
    bound: Complexity,
}

impl NatAtlQuery {
    /// Assemble a query whose shape is already checked.
    pub(crate) fn new(formula: Formula, coalition: Coalition, bound: Complexity) -> Self {
        Self {
            formula,
            coalition,
            bound,
        }
    }
    pub fn formula(&self) -> &Formula {
        &self.formula
    }
    pub fn coalition(&self) -> &Coalition {
        &self.coalition
    }
    pub fn bound(&self) -> Complexity {
        self.bound
    }
    pub fn negated(&self) -> bool {
        matches!(self.formula, Formula::Not(_))
    }
    /// The goal checked on a pruned model: once the coalition's choices
    /// are fixed, the remaining agents resolve every path, so the natural
    /// quantifier becomes `A`.
    pub fn to_ctl(&self) -> Formula {
        self.formula.requantify(&|q| match q {
            Quantifier::Natural(..) => Quantifier::Forall,
            q => q.clone(),
        })
    }
    /// The same goal without the complexity bound.
    pub fn to_atl(&self) -> Formula {
        self.formula.requantify(&|q| match q {
            Quantifier::Natural(c, _) => Quantifier::Coalition(c.clone()),
            q => q.clone(),
        })
    }
}

impl std::fmt::Display for NatAtlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formula)
    }
}

/// Natural-strategy ATL: one bounded coalition quantifier at the root.
pub struct NatAtl;

impl Dialect for NatAtl {
    type Output = NatAtlQuery;
    const NAME: &'static str = "NatATL";
    fn parse(text: &str) -> Result<NatAtlQuery, SyntaxError> {
        let formula = parse(text)?;
        let goal = match &formula {
            Formula::Not(inner) => inner.as_ref(),
            f => f,
        };
        let (coalition, bound) = match goal.quantifier() {
            Some(Quantifier::Natural(c, k)) => (c.clone(), *k),
            _ => {
                return Err(SyntaxError::Dialect {
                    dialect: Self::NAME,
                    construct: format!("'{}' without a leading <{{agents}},k>", goal),
                });
            }
        };
        if let Some(nested) = goal.children().into_iter().find(|c| !c.is_boolean()) {
            return Err(SyntaxError::Dialect {
                dialect: Self::NAME,
                construct: format!("nested temporal operator in {}", nested),
            });
        }
        Ok(NatAtlQuery::new(formula, coalition, bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translations() {
        let query = NatAtl::parse("<{1,2},3>F p").expect("parses");
        assert_eq!(query.bound(), 3);
        assert_eq!(query.coalition(), &Coalition::from(vec![1, 2]));
        assert!(!query.negated());
        assert_eq!(query.to_ctl().to_string(), "AF p");
        assert_eq!(query.to_atl().to_string(), "<1,2>F p");
    }

    #[test]
    fn negation_kept() {
        let query = NatAtl::parse("!<{1},2>(p U q)").expect("parses");
        assert!(query.negated());
        assert_eq!(query.to_ctl().to_string(), "!A(p U q)");
        assert_eq!(query.to_atl().to_string(), "!<1>(p U q)");
    }

    #[test]
    fn shape() {
        assert!(NatAtl::parse("AF p").is_err());
        assert!(NatAtl::parse("<1>F p").is_err());
        assert!(NatAtl::parse("<{1},2>F EX p").is_err());
        assert!(NatAtl::parse("p and <{1},2>F p").is_err());
        assert!(NatAtl::parse("<{1},2>G(p or !q)").is_ok());
    }
}
