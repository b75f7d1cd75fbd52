use super::*;
use rand::Rng;

impl Cgs {
    /// A complete, deterministic random model.
    ///
    /// Every agent may idle or play one of `actions` symbols; every joint
    /// action of the full product (idle included) is listed exactly once
    /// per state, leading to a uniformly chosen successor. The result
    /// always satisfies [`Cgs::validate`].
    pub fn generate(
        rng: &mut impl Rng,
        states: usize,
        agents: usize,
        actions: usize,
        props: usize,
    ) -> Self {
        let states = states.max(1);
        let symbols = ('A'..='Z')
            .filter(|c| *c != crate::IDLE)
            .take(actions)
            .map(Move::Act);
        let choices = std::iter::once(Move::Idle).chain(symbols).collect::<Vec<_>>();
        let joints = (0..agents).fold(vec![Vec::<Move>::new()], |prefixes, _| {
            prefixes
                .into_iter()
                .flat_map(|p| {
                    choices.iter().map(move |m| {
                        let mut next = p.clone();
                        next.push(*m);
                        next
                    })
                })
                .collect()
        });
        let mut matrix = vec![vec![Cell::Empty; states]; states];
        for row in matrix.iter_mut() {
            for joint in joints.iter() {
                let t = rng.random_range(0..states);
                row[t].push(JointAction::from(joint.clone()));
            }
        }
        let labels = (0..states)
            .map(|_| (0..props).map(|_| rng.random_bool(0.5)).collect())
            .collect();
        Self::new(
            (0..states).map(|s| format!("s{}", s)).collect(),
            agents,
            matrix,
            (0..props).map(|p| format!("p{}", p)).collect(),
            labels,
            0,
        )
        .expect("generated dimensions agree")
    }
}

impl crate::Arbitrary for Cgs {
    fn random(rng: &mut impl Rng) -> Self {
        let states = rng.random_range(1..=crate::RANDOM_STATES);
        let agents = rng.random_range(1..=crate::RANDOM_AGENTS);
        let actions = rng.random_range(1..=crate::RANDOM_ACTIONS);
        let props = rng.random_range(1..=crate::RANDOM_PROPS);
        Self::generate(rng, states, agents, actions, props)
    }
}
