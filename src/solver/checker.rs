use super::*;
use crate::Error;
use crate::Interrupt;
use crate::logic::*;
use crate::model::*;

/// Evaluates formulas over one model.
///
/// Path quantifiers pick the one-step operator: `E` uses [`Transitions::ex`],
/// `A` uses [`Transitions::ax`] through its dualities and `<c>` uses the
/// coalition pre-image. Natural quantifiers must be translated away first;
/// see [`crate::logic::NatAtlQuery`].
pub struct Checker<'a> {
    cgs: &'a Cgs,
    graph: Transitions,
    interrupt: &'a Interrupt,
}

impl<'a> Checker<'a> {
    pub fn new(cgs: &'a Cgs, interrupt: &'a Interrupt) -> Self {
        Self {
            cgs,
            graph: Transitions::from(cgs),
            interrupt,
        }
    }

    pub fn evaluate(&self, formula: &Formula) -> Result<Evaluation, Error> {
        let mut nodes = Vec::with_capacity(formula.size());
        self.visit(formula, &mut nodes)?;
        Ok(Evaluation::new(nodes, self.cgs.initial()))
    }
    /// Satisfying states of the whole formula.
    pub fn states(&self, formula: &Formula) -> Result<StateSet, Error> {
        self.evaluate(formula).map(StateSet::from)
    }

    fn visit(&self, formula: &Formula, nodes: &mut Vec<StateSet>) -> Result<StateSet, Error> {
        let n = self.cgs.n();
        let set = match formula {
            Formula::Atom(a) => self
                .cgs
                .prop(a)
                .map(|p| self.cgs.satisfying(p))
                .ok_or_else(|| SyntaxError::UnknownAtom(a.clone()))?,
            Formula::Not(a) => self.visit(a, nodes)?.complement(n),
            Formula::And(a, b) => {
                let a = self.visit(a, nodes)?;
                a.intersection(&self.visit(b, nodes)?)
            }
            Formula::Or(a, b) => {
                let a = self.visit(a, nodes)?;
                a.union(&self.visit(b, nodes)?)
            }
            Formula::Implies(a, b) => {
                let a = self.visit(a, nodes)?;
                a.complement(n).union(&self.visit(b, nodes)?)
            }
            Formula::Next(q, a) => {
                let a = self.visit(a, nodes)?;
                let pre = self.step(q)?;
                pre(&a)
            }
            Formula::Finally(q, a) => {
                let a = self.visit(a, nodes)?;
                self.finally(q, &a)?
            }
            Formula::Globally(q, a) => {
                let a = self.visit(a, nodes)?;
                self.globally(q, &a)?
            }
            Formula::Until(q, a, b) => {
                let a = self.visit(a, nodes)?;
                let b = self.visit(b, nodes)?;
                self.until(q, &a, &b)?
            }
            Formula::Release(q, a, b) => {
                let a = self.visit(a, nodes)?;
                let b = self.visit(b, nodes)?;
                self.release(q, &a, &b)?
            }
        };
        nodes.push(set.clone());
        Ok(set)
    }

    /// One-step pre-image for a quantifier.
    fn step(&self, q: &Quantifier) -> Result<Box<dyn Fn(&StateSet) -> StateSet + '_>, Error> {
        let graph = &self.graph;
        match q {
            Quantifier::Exists => Ok(Box::new(move |x: &StateSet| graph.ex(x))),
            Quantifier::Forall => Ok(Box::new(move |x: &StateSet| graph.ax(x))),
            Quantifier::Coalition(c) => match c.fits(self.cgs.agents()) {
                true => {
                    let c = c.clone();
                    Ok(Box::new(move |x: &StateSet| graph.pre(&c, x)))
                }
                false => Err(SyntaxError::Agent {
                    agent: c.agents().iter().copied().max().unwrap_or_default(),
                    agents: self.cgs.agents(),
                }
                .into()),
            },
            Quantifier::Natural(..) => Err(SyntaxError::Dialect {
                dialect: "the fixpoint solver",
                construct: format!("natural quantifier {}", q),
            }
            .into()),
        }
    }

    fn finally(&self, q: &Quantifier, a: &StateSet) -> Result<StateSet, Error> {
        let n = self.cgs.n();
        match q {
            Quantifier::Forall => {
                let avoid = self.globally(&Quantifier::Exists, &a.complement(n))?;
                Ok(avoid.complement(n))
            }
            q => {
                let pre = self.step(q)?;
                least(self.interrupt, |x| a.union(&pre(x)))
            }
        }
    }
    fn globally(&self, q: &Quantifier, a: &StateSet) -> Result<StateSet, Error> {
        let n = self.cgs.n();
        match q {
            Quantifier::Forall => {
                let escape = self.finally(&Quantifier::Exists, &a.complement(n))?;
                Ok(escape.complement(n))
            }
            q => {
                let pre = self.step(q)?;
                greatest(n, self.interrupt, |x| a.intersection(&pre(x)))
            }
        }
    }
    fn until(&self, q: &Quantifier, a: &StateSet, b: &StateSet) -> Result<StateSet, Error> {
        let n = self.cgs.n();
        match q {
            // A(a U b) = !(E(!b U (!a and !b)) or EG !b)
            Quantifier::Forall => {
                let not_a = a.complement(n);
                let not_b = b.complement(n);
                let stuck = self.until(&Quantifier::Exists, &not_b, &not_a.intersection(&not_b))?;
                let avoid = self.globally(&Quantifier::Exists, &not_b)?;
                Ok(stuck.union(&avoid).complement(n))
            }
            q => {
                let pre = self.step(q)?;
                least(self.interrupt, |x| b.union(&a.intersection(&pre(x))))
            }
        }
    }
    fn release(&self, q: &Quantifier, a: &StateSet, b: &StateSet) -> Result<StateSet, Error> {
        let n = self.cgs.n();
        match q {
            // E(a R b) = !A(!a U !b), with A-until as a least fixpoint over AX
            Quantifier::Exists => {
                let not_a = a.complement(n);
                let not_b = b.complement(n);
                let escape = least(self.interrupt, |x| {
                    not_b.union(&not_a.intersection(&self.graph.ax(x)))
                })?;
                Ok(escape.complement(n))
            }
            q => {
                let pre = self.step(q)?;
                greatest(n, self.interrupt, |x| b.intersection(&a.union(&pre(x))))
            }
        }
    }
}

/// Evaluate a formula with no time limit.
pub fn evaluate(cgs: &Cgs, formula: &Formula) -> Result<Evaluation, Error> {
    Checker::new(cgs, &Interrupt::never()).evaluate(formula)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn ctl(text: &str) -> Formula {
        Ctl::parse(text).expect("valid CTL")
    }
    fn states(cgs: &Cgs, text: &str) -> StateSet {
        evaluate(cgs, &parse(text).expect("valid formula"))
            .expect("evaluates")
            .root()
            .clone()
    }
    fn random_formula(rng: &mut impl Rng, props: &[String], depth: usize) -> String {
        let atom = || props[0].clone();
        if depth == 0 {
            return props[rng.random_range(0..props.len())].clone();
        }
        let a = random_formula(rng, props, depth - 1);
        let b = random_formula(rng, props, depth - 1);
        match rng.random_range(0..12) {
            0 => format!("!({})", a),
            1 => format!("({}) and ({})", a, b),
            2 => format!("({}) or ({})", a, b),
            3 => format!("EX({})", a),
            4 => format!("AX({})", a),
            5 => format!("EF({})", a),
            6 => format!("AF({})", a),
            7 => format!("EG({})", a),
            8 => format!("AG({})", a),
            9 => format!("E(({}) U ({}))", a, b),
            10 => format!("A(({}) U ({}))", a, b),
            _ => format!("A(({}) R ({}))", a, atom()),
        }
    }

    #[test]
    fn negation_complements() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..64 {
            let cgs = Cgs::random(rng);
            let f = random_formula(rng, cgs.props(), 2);
            let negated = states(&cgs, &format!("!({})", f));
            assert_eq!(negated, states(&cgs, &f).complement(cgs.n()), "{}", f);
        }
    }

    #[test]
    fn finally_idempotent() {
        let ref mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..64 {
            let cgs = Cgs::random(rng);
            let f = random_formula(rng, cgs.props(), 1);
            assert_eq!(
                states(&cgs, &format!("EF EF({})", f)),
                states(&cgs, &format!("EF({})", f)),
                "{}",
                f
            );
        }
    }

    #[test]
    fn dualities() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..64 {
            let cgs = Cgs::random(rng);
            let f = random_formula(rng, cgs.props(), 1);
            let g = random_formula(rng, cgs.props(), 1);
            let eq = |a: String, b: String| {
                assert_eq!(states(&cgs, &a), states(&cgs, &b), "{} vs {}", a, b)
            };
            eq(format!("AG({})", f), format!("!EF !({})", f));
            eq(format!("AF({})", f), format!("!EG !({})", f));
            eq(format!("AX({})", f), format!("!EX !({})", f));
            eq(
                format!("E(({}) R ({}))", f, g),
                format!("!A(!({}) U !({}))", f, g),
            );
            eq(
                format!("A(({}) R ({}))", f, g),
                format!("!E(!({}) U !({}))", f, g),
            );
            eq(
                format!("<{}>F({})", Coalition::all(cgs.agents()), f),
                format!("EF({})", f),
            );
            eq(format!("<>G({})", f), format!("AG({})", f));
        }
    }

    #[test]
    fn reachability_through_action() {
        let cell = |text: &str| Cell::parse(text, 1).expect("valid cell");
        let labels = vec![vec![false], vec![true]];
        let linked = Cgs::new(
            vec!["s0".into(), "s1".into()],
            1,
            vec![vec![cell("I"), cell("A")], vec![cell("0"), cell("I")]],
            vec!["p".into()],
            labels.clone(),
            0,
        )
        .expect("valid model");
        assert_eq!(states(&linked, "EF p"), StateSet::from([0, 1]));
        assert!(evaluate(&linked, &ctl("EF p")).expect("evaluates").holds());
        let isolated = linked.with_matrix(vec![
            vec![cell("I"), cell("0")],
            vec![cell("0"), cell("I")],
        ]);
        assert_eq!(states(&isolated, "EF p"), StateSet::from([1]));
        assert!(!evaluate(&isolated, &ctl("EF p")).expect("evaluates").holds());
    }

    #[test]
    fn coalition_forces_goal() {
        let cell = |text: &str| Cell::parse(text, 2).expect("valid cell");
        let cgs = Cgs::new(
            vec!["s0".into(), "s1".into()],
            2,
            vec![
                vec![cell("II,IA"), cell("AI,AA")],
                vec![cell("0"), cell("II")],
            ],
            vec!["p".into()],
            vec![vec![false], vec![true]],
            0,
        )
        .expect("valid model");
        let forced = evaluate(&cgs, &Atl::parse("<1>F p").expect("valid ATL")).expect("evaluates");
        assert!(forced.holds());
        let alone = evaluate(&cgs, &Atl::parse("<2>F p").expect("valid ATL")).expect("evaluates");
        assert!(!alone.holds());
        assert_eq!(alone.root(), &StateSet::from([1]));
    }

    #[test]
    fn evaluation_errors() {
        let cgs = Cgs::generate(&mut SmallRng::seed_from_u64(6), 2, 1, 1, 1);
        assert_eq!(
            evaluate(&cgs, &ctl("EF q")),
            Err(Error::Syntax(SyntaxError::UnknownAtom("q".into())))
        );
        assert!(matches!(
            evaluate(&cgs, &parse("<3>F p0").expect("parses")),
            Err(Error::Syntax(SyntaxError::Agent { agent: 3, agents: 1 }))
        ));
        assert!(matches!(
            evaluate(&cgs, &parse("<{1},2>F p0").expect("parses")),
            Err(Error::Syntax(SyntaxError::Dialect { .. }))
        ));
    }

    #[test]
    fn postorder_nodes() {
        let cgs = Cgs::generate(&mut SmallRng::seed_from_u64(8), 3, 1, 1, 2);
        let formula = ctl("p0 and EX p1");
        let evaluation = evaluate(&cgs, &formula).expect("evaluates");
        assert_eq!(evaluation.nodes().len(), formula.size());
        assert_eq!(evaluation.node(0), Some(&cgs.satisfying(0)));
        assert_eq!(evaluation.node(1), Some(&cgs.satisfying(1)));
    }
}
