use super::*;

/// A logic's concrete syntax: which formulas it accepts and what parsing yields.
pub trait Dialect {
    type Output;
    const NAME: &'static str;
    fn parse(text: &str) -> Result<Self::Output, SyntaxError>;
}

/// Reject any quantifier the dialect does not admit.
fn admit<F>(formula: Formula, dialect: &'static str, allowed: F) -> Result<Formula, SyntaxError>
where
    F: Fn(&Quantifier) -> bool,
{
    let offending = formula
        .postorder()
        .into_iter()
        .find(|f| f.quantifier().is_some_and(|q| !allowed(q)))
        .map(|node| node.to_string());
    match offending {
        Some(construct) => Err(SyntaxError::Dialect { dialect, construct }),
        None => Ok(formula),
    }
}

/// Propositional formulas: the language of strategy conditions.
pub struct Boolean;

impl Dialect for Boolean {
    type Output = Formula;
    const NAME: &'static str = "a boolean condition";
    fn parse(text: &str) -> Result<Formula, SyntaxError> {
        admit(parse(text)?, Self::NAME, |_| false)
    }
}

/// Computation tree logic: `E` and `A` path quantifiers.
pub struct Ctl;

impl Dialect for Ctl {
    type Output = Formula;
    const NAME: &'static str = "CTL";
    fn parse(text: &str) -> Result<Formula, SyntaxError> {
        admit(parse(text)?, Self::NAME, |q| {
            matches!(q, Quantifier::Exists | Quantifier::Forall)
        })
    }
}

/// Alternating-time temporal logic: coalition quantifiers `<1,2>`.
pub struct Atl;

impl Dialect for Atl {
    type Output = Formula;
    const NAME: &'static str = "ATL";
    fn parse(text: &str) -> Result<Formula, SyntaxError> {
        admit(parse(text)?, Self::NAME, |q| matches!(q, Quantifier::Coalition(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_rejects_temporal() {
        assert!(Boolean::parse("p and !q").is_ok());
        assert!(matches!(
            Boolean::parse("p and EX q"),
            Err(SyntaxError::Dialect { .. })
        ));
    }

    #[test]
    fn ctl_rejects_coalitions() {
        assert!(Ctl::parse("AG(p -> EF q)").is_ok());
        assert!(Ctl::parse("p").is_ok());
        assert_eq!(
            Ctl::parse("EF <1>X p"),
            Err(SyntaxError::Dialect {
                dialect: "CTL",
                construct: "<1>X p".into(),
            })
        );
    }

    #[test]
    fn atl_rejects_paths() {
        assert!(Atl::parse("<1>G p and <2>(p U q)").is_ok());
        assert!(Atl::parse("<1>F EX p").is_err());
        assert!(Atl::parse("<{1},2>F p").is_err());
    }
}
