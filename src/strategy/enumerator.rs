use super::*;
use crate::Agent;

/// Lazy cartesian product of per-agent candidates.
///
/// Yields one [`Collective`] at a time with the last agent varying
/// fastest. An agent without candidates makes the product empty; no
/// agents at all yields the single empty profile.
#[derive(Debug, Clone)]
pub struct Enumerator {
    agents: Vec<Agent>,
    pools: Vec<Vec<Natural>>,
    cursor: Option<Vec<usize>>,
}

impl Enumerator {
    pub fn new(pools: Vec<(Agent, Vec<Natural>)>) -> Self {
        let (agents, pools): (Vec<_>, Vec<_>) = pools.into_iter().unzip();
        let cursor = match pools.iter().any(Vec::is_empty) {
            true => None,
            false => Some(vec![0; pools.len()]),
        };
        Self {
            agents,
            pools,
            cursor,
        }
    }
    /// Size of the whole product.
    pub fn total(&self) -> usize {
        self.pools.iter().map(Vec::len).product()
    }
}

impl Iterator for Enumerator {
    type Item = Collective;
    fn next(&mut self) -> Option<Collective> {
        let cursor = self.cursor.as_mut()?;
        let profile = self
            .agents
            .iter()
            .zip(self.pools.iter())
            .zip(cursor.iter())
            .map(|((agent, pool), &i)| (*agent, pool[i].clone()))
            .collect::<Collective>();
        let mut carried = true;
        for (i, pool) in cursor.iter_mut().zip(self.pools.iter()).rev() {
            *i += 1;
            if *i < pool.len() {
                carried = false;
                break;
            }
            *i = 0;
        }
        if carried {
            self.cursor = None;
        }
        Some(profile)
    }
}
