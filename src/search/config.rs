use crate::prune::Semantics;
use std::time::Duration;

/// What a strategy may observe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub enum Memory {
    /// Rules see the current state only.
    #[default]
    Memoryless,
    /// Rules see the history so far, up to `height` states long.
    Recall { height: usize },
}

impl Memory {
    pub fn recall() -> Self {
        Self::Recall {
            height: crate::UNWINDING_HEIGHT,
        }
    }
}

/// Run-time knobs of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub semantics: Semantics,
    pub memory: Memory,
    /// Reject up front when the goal fails even with unbounded strategies.
    pub prefilter: bool,
    /// Fan candidates of one bound out over the rayon pool.
    pub parallel: bool,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            semantics: Semantics::Hard,
            memory: Memory::Memoryless,
            prefilter: true,
            parallel: false,
            timeout: None,
        }
    }
}

impl Config {
    /// Defaults, with the timeout taken from `NATCHECK_TIMEOUT` (e.g. `30s`, `5m`).
    pub fn from_env() -> Self {
        let timeout = std::env::var("NATCHECK_TIMEOUT")
            .ok()
            .and_then(|s| crate::parse_duration(&s));
        Self::default().with_timeout(timeout)
    }
    pub fn with_semantics(self, semantics: Semantics) -> Self {
        Self { semantics, ..self }
    }
    pub fn with_memory(self, memory: Memory) -> Self {
        Self { memory, ..self }
    }
    pub fn with_prefilter(self, prefilter: bool) -> Self {
        Self { prefilter, ..self }
    }
    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }
    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { timeout, ..self }
    }
}
