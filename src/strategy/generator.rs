use super::*;
use crate::Complexity;
use crate::logic::*;

/// Memoryless conditions of complexity at most `k`.
///
/// `T` comes first. The rest are conjunctions and disjunctions of distinct
/// propositions (sorted, every connective assignment) under every sign
/// pattern, ordered by complexity then text.
pub fn conditions(props: &[String], k: Complexity) -> Vec<Condition> {
    let mut sorted = props.to_vec();
    sorted.sort();
    sorted.dedup();
    let mut found = Vec::new();
    for size in 1..=sorted.len() {
        if 2 * size - 1 > k {
            break;
        }
        for subset in subsets(&sorted, size) {
            for connectives in patterns(crate::CONNECTIVES.len(), size - 1) {
                for signs in patterns(2, size) {
                    let formula = compose(&subset, &connectives, &signs);
                    let condition = Condition::Formula(formula);
                    if condition.complexity() <= k {
                        found.push(condition);
                    }
                }
            }
        }
    }
    ordered(found)
}

/// Conditions for strategies with recall: the memoryless ones plus
/// history expressions concatenating distinct (optionally starred)
/// letters, all of complexity at most `k`.
pub fn histories(props: &[String], k: Complexity) -> Vec<Condition> {
    let letters = conditions(props, k)
        .into_iter()
        .filter_map(|c| match c {
            Condition::Formula(f) => Some(f),
            _ => None,
        })
        .flat_map(|f| {
            [
                Segment {
                    letter: f.clone(),
                    star: false,
                },
                Segment {
                    letter: f,
                    star: true,
                },
            ]
        })
        .collect::<Vec<_>>();
    let mut found = vec![Condition::True];
    let mut stack = letters
        .iter()
        .map(|s| vec![s.clone()])
        .collect::<Vec<_>>();
    while let Some(word) = stack.pop() {
        let condition = Condition::from(History::new(word.clone()));
        if condition.complexity() > k {
            continue;
        }
        for next in letters.iter().filter(|l| !word.contains(l)) {
            let mut longer = word.clone();
            longer.push(next.clone());
            stack.push(longer);
        }
        found.push(condition);
    }
    ordered(found)
}

/// `T` first, then by complexity and text, without repeats.
fn ordered(mut conditions: Vec<Condition>) -> Vec<Condition> {
    conditions.sort_by_cached_key(|c| (!c.is_true(), c.complexity(), c.to_string()));
    conditions.dedup();
    match conditions.first().is_some_and(Condition::is_true) {
        true => conditions,
        false => std::iter::once(Condition::True).chain(conditions).collect(),
    }
}

/// Left-nested chain of literals joined by the chosen connectives.
fn compose(atoms: &[&String], connectives: &[usize], signs: &[usize]) -> Formula {
    let literal = |i: usize| match signs[i] {
        0 => Formula::atom(atoms[i]),
        _ => Formula::not(Formula::atom(atoms[i])),
    };
    (1..atoms.len()).fold(literal(0), |chain, i| match crate::CONNECTIVES[connectives[i - 1]] {
        "and" => Formula::and(chain, literal(i)),
        _ => Formula::or(chain, literal(i)),
    })
}

/// Every `size`-element subset, in lexicographic index order.
fn subsets(items: &[String], size: usize) -> Vec<Vec<&String>> {
    match size {
        0 => vec![vec![]],
        _ => (0..items.len())
            .flat_map(|i| {
                subsets(&items[i + 1..], size - 1)
                    .into_iter()
                    .map(move |mut rest| {
                        rest.insert(0, &items[i]);
                        rest
                    })
            })
            .collect(),
    }
}

/// Every length-`len` sequence over `0..base`.
fn patterns(base: usize, len: usize) -> Vec<Vec<usize>> {
    (0..len).fold(vec![vec![]], |prefixes, _| {
        prefixes
            .into_iter()
            .flat_map(|p| {
                (0..base).map(move |d| {
                    let mut next = p.clone();
                    next.push(d);
                    next
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> Vec<String> {
        vec!["q".into(), "p".into()]
    }
    fn texts(conditions: &[Condition]) -> Vec<String> {
        conditions.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn smallest_bounds() {
        assert_eq!(texts(&conditions(&props(), 1)), vec!["T", "p", "q"]);
        assert_eq!(
            texts(&conditions(&props(), 2)),
            vec!["T", "p", "q", "!p", "!q"]
        );
    }

    #[test]
    fn connectives_enumerated() {
        let found = texts(&conditions(&props(), 3));
        assert!(found.contains(&"p and q".to_string()));
        assert!(found.contains(&"p or q".to_string()));
        assert!(!found.contains(&"q and p".to_string()), "literals are sorted");
        assert!(!found.contains(&"!p and q".to_string()), "negation costs one more");
        let found = texts(&conditions(&props(), 4));
        assert!(found.contains(&"!p and !q".to_string()));
        assert!(found.iter().all(|c| complexity(c) <= 4));
    }

    #[test]
    fn recall_conditions() {
        let found = texts(&histories(&props(), 3));
        assert_eq!(found[0], "T");
        assert!(found.contains(&"p".to_string()));
        assert!(found.contains(&"p*".to_string()));
        assert!(found.contains(&"p . q".to_string()));
        assert!(found.contains(&"q . p".to_string()));
        assert!(!found.contains(&"p . p".to_string()));
        assert!(found.iter().all(|c| complexity(c) <= 3));
    }
}
