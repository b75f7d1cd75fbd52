use super::*;
use crate::model::*;
use std::collections::BTreeMap;

impl Transitions {
    /// States with some successor in `target`.
    pub fn ex(&self, target: &StateSet) -> StateSet {
        (0..self.n())
            .filter(|&s| self.successors(s).iter().any(|t| target.contains(t)))
            .collect()
    }
    /// States whose successors all lie in `target`. A state without
    /// successors qualifies vacuously.
    pub fn ax(&self, target: &StateSet) -> StateSet {
        (0..self.n())
            .filter(|&s| self.successors(s).is_subset(target))
            .collect()
    }
    /// States where the coalition has a move forcing the next state into
    /// `target` whatever the other agents play.
    pub fn pre(&self, coalition: &Coalition, target: &StateSet) -> StateSet {
        (0..self.n())
            .filter(|&s| self.forces(s, coalition, target))
            .collect()
    }

    fn forces(&self, s: crate::State, coalition: &Coalition, target: &StateSet) -> bool {
        let mut game = BTreeMap::<Vec<Move>, BTreeMap<Vec<Move>, StateSet>>::new();
        for (joint, t) in self.moves(s) {
            let (ours, theirs) = coalition.split(joint);
            game.entry(ours)
                .or_default()
                .entry(theirs)
                .or_default()
                .insert(*t);
        }
        game.values().any(|responses| {
            responses
                .values()
                .all(|outcomes| !outcomes.is_empty() && outcomes.is_subset(target))
        })
    }
}

/// Existential pre-image over a model.
pub fn ex(cgs: &Cgs, target: &StateSet) -> StateSet {
    Transitions::from(cgs).ex(target)
}
/// Universal pre-image over a model.
pub fn ax(cgs: &Cgs, target: &StateSet) -> StateSet {
    Transitions::from(cgs).ax(target)
}
/// Coalition pre-image over a model.
pub fn pre(cgs: &Cgs, coalition: &Coalition, target: &StateSet) -> StateSet {
    Transitions::from(cgs).pre(coalition, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn subset(rng: &mut impl Rng, n: usize) -> StateSet {
        (0..n).filter(|_| rng.random_bool(0.5)).collect()
    }

    #[test]
    fn grand_coalition_is_ex() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..64 {
            let cgs = Cgs::random(rng);
            let target = subset(rng, cgs.n());
            let all = Coalition::all(cgs.agents());
            assert_eq!(pre(&cgs, &all, &target), ex(&cgs, &target), "{}", cgs);
        }
    }

    #[test]
    fn empty_coalition_is_ax() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..64 {
            let cgs = Cgs::random(rng);
            let target = subset(rng, cgs.n());
            let none = Coalition::empty();
            assert_eq!(pre(&cgs, &none, &target), ax(&cgs, &target), "{}", cgs);
        }
    }

    #[test]
    fn single_agent_forces() {
        let cell = |text: &str| Cell::parse(text, 2).expect("valid cell");
        let cgs = Cgs::new(
            vec!["s0".into(), "s1".into(), "s2".into()],
            2,
            vec![
                vec![cell("II,IA"), cell("AI,AA"), cell("BI")],
                vec![cell("0"), cell("II"), cell("0")],
                vec![cell("0"), cell("0"), cell("II")],
            ],
            vec![],
            vec![vec![], vec![], vec![]],
            0,
        )
        .expect("valid model");
        let target = StateSet::from([1]);
        assert_eq!(pre(&cgs, &Coalition::from(vec![1]), &target), StateSet::from([0, 1]));
        assert_eq!(pre(&cgs, &Coalition::from(vec![2]), &target), StateSet::from([1]));
    }
}
