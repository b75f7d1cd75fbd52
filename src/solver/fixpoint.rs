use crate::Interrupt;
use crate::model::StateSet;

/// Iterate `step` upward from the empty set until it stops changing.
pub fn least<F>(interrupt: &Interrupt, step: F) -> Result<StateSet, crate::Error>
where
    F: Fn(&StateSet) -> StateSet,
{
    converge(StateSet::empty(), interrupt, step)
}

/// Iterate `step` downward from all `n` states until it stops changing.
pub fn greatest<F>(n: usize, interrupt: &Interrupt, step: F) -> Result<StateSet, crate::Error>
where
    F: Fn(&StateSet) -> StateSet,
{
    converge(StateSet::full(n), interrupt, step)
}

fn converge<F>(start: StateSet, interrupt: &Interrupt, step: F) -> Result<StateSet, crate::Error>
where
    F: Fn(&StateSet) -> StateSet,
{
    let mut current = start;
    for iteration in 0.. {
        interrupt.check()?;
        let next = step(&current);
        log::trace!("fixpoint iteration {} -> {}", iteration, next);
        if next == current {
            break;
        }
        current = next;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachability() {
        // 0 -> 1 -> 2, goal {2}
        let back = |x: &StateSet| {
            let mut y = StateSet::from([2]);
            for s in x.iter() {
                y.insert(s.saturating_sub(1));
            }
            y
        };
        assert_eq!(least(&Interrupt::never(), back), Ok(StateSet::from([0, 1, 2])));
    }

    #[test]
    fn shrinking() {
        let drop_top = |x: &StateSet| x.iter().filter(|&s| s + 1 < x.len()).collect();
        assert_eq!(greatest(3, &Interrupt::never(), drop_top), Ok(StateSet::empty()));
    }

    #[test]
    fn interrupted() {
        let interrupt = Interrupt::after(std::time::Duration::ZERO);
        assert_eq!(
            least(&interrupt, |x| x.clone()),
            Err(crate::Error::Interrupted)
        );
    }
}
