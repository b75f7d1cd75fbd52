use super::*;
use crate::Complexity;
use crate::model::Move;

/// One agent's strategies of complexity exactly `k`.
///
/// Rules guarded by proper conditions are drawn in condition-major order
/// and kept in that order. `T` only ever closes a strategy, as the default
/// for the states the earlier rules leave uncovered. No two rules share a
/// condition or an action. Strategies ending in `T` come first at every
/// length.
pub fn candidates(actions: &[char], conditions: &[Condition], k: Complexity) -> Vec<Natural> {
    let pairs = conditions
        .iter()
        .filter(|c| !c.is_true() && c.complexity() <= k)
        .flat_map(|c| actions.iter().map(move |a| Rule::new(c.clone(), Move::Act(*a))))
        .collect::<Vec<_>>();
    let defaults = match conditions.iter().any(Condition::is_true) {
        true => actions
            .iter()
            .map(|a| Rule::new(Condition::True, Move::Act(*a)))
            .collect::<Vec<_>>(),
        false => Vec::new(),
    };
    let mut found = Vec::new();
    let mut chosen = Vec::new();
    for r in 1..=k.min(actions.len()) {
        for default in defaults.iter() {
            if let Some(budget) = k.checked_sub(default.complexity()) {
                combine(&pairs, 0, r - 1, budget, Some(default), &mut chosen, &mut found);
            }
        }
        combine(&pairs, 0, r, k, None, &mut chosen, &mut found);
    }
    let mut seen = std::collections::HashSet::new();
    found.retain(|n: &Natural| seen.insert(n.clone()));
    found
}

/// Extend `chosen` with `r` more pairs from `start..` spending exactly
/// `budget`, then close with `last` if given.
fn combine(
    pairs: &[Rule],
    start: usize,
    r: usize,
    budget: Complexity,
    last: Option<&Rule>,
    chosen: &mut Vec<usize>,
    found: &mut Vec<Natural>,
) {
    if r == 0 {
        if budget == 0 {
            let rules = chosen
                .iter()
                .map(|&i| pairs[i].clone())
                .chain(last.cloned())
                .collect();
            found.push(Natural::new(rules));
        }
        return;
    }
    for i in start..pairs.len() {
        let ref rule = pairs[i];
        let clashes = last.is_some_and(|l| l.action == rule.action)
            || chosen.iter().any(|&j| {
                pairs[j].action == rule.action || pairs[j].condition == rule.condition
            });
        if rule.complexity() > budget || clashes {
            continue;
        }
        chosen.push(i);
        combine(pairs, i + 1, r - 1, budget - rule.complexity(), last, chosen, found);
        chosen.pop();
    }
}

/// Every strategy of complexity at most `k` other than `current`.
pub fn deviations<'a>(
    current: &'a Natural,
    actions: &'a [char],
    conditions: &'a [Condition],
    k: Complexity,
) -> impl Iterator<Item = Natural> + 'a {
    (1..=k)
        .flat_map(move |i| candidates(actions, conditions, i))
        .filter(move |n| n != current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn props() -> Vec<String> {
        vec!["p".into()]
    }

    #[test]
    fn single_rules() {
        let conditions = conditions(&props(), 1);
        let found = candidates(&['A', 'B'], &conditions, 1);
        let texts = found.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["[(T, A)]", "[(T, B)]", "[(p, A)]", "[(p, B)]"]);
    }

    #[test]
    fn exact_complexity_and_distinct_actions() {
        let conditions = conditions(&props(), 3);
        for k in 1..=3 {
            for natural in candidates(&['A', 'B', 'C'], &conditions, k) {
                assert_eq!(natural.complexity(), k, "{}", natural);
                let actions = natural
                    .rules()
                    .iter()
                    .map(|r| r.action)
                    .collect::<BTreeSet<_>>();
                assert_eq!(actions.len(), natural.len(), "{}", natural);
                let guards = natural
                    .rules()
                    .iter()
                    .map(|r| r.condition.to_string())
                    .collect::<BTreeSet<_>>();
                assert_eq!(guards.len(), natural.len(), "{}", natural);
            }
        }
        assert!(candidates(&['A'], &conditions, 2).iter().all(|n| n.len() == 1));
    }

    #[test]
    fn default_rule_closes() {
        let conditions = conditions(&props(), 2);
        let texts = candidates(&['A', 'B'], &conditions, 2)
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>();
        assert!(texts.contains(&"[(p, B), (T, A)]".to_string()));
        assert!(texts.contains(&"[(p, A), (T, B)]".to_string()));
        assert!(texts.contains(&"[(!p, A)]".to_string()));
        assert!(!texts.contains(&"[(T, A), (p, B)]".to_string()));
        assert!(!texts.contains(&"[(T, A), (T, B)]".to_string()));
        assert!(!texts.contains(&"[(p, A), (p, B)]".to_string()));
        for natural in candidates(&['A', 'B', 'C'], &super::super::generator::conditions(&props(), 4), 4) {
            let rules = natural.rules();
            let early = &rules[..rules.len() - 1];
            assert!(early.iter().all(|r| !r.condition.is_true()), "{}", natural);
        }
    }

    #[test]
    fn deviations_exclude_current() {
        let conditions = conditions(&props(), 1);
        let current = candidates(&['A', 'B'], &conditions, 1).remove(0);
        let others = deviations(&current, &['A', 'B'], &conditions, 1).collect::<Vec<_>>();
        assert_eq!(others.len(), 3);
        assert!(!others.contains(&current));
    }
}
