//! Explicit-state model checking for strategic logics over concurrent game structures.
//!
//! Evaluates CTL and ATL by fixpoint iteration over state sets, and
//! synthesizes bounded-complexity natural strategies (NatATL, sequential
//! NatSL) by enumerating candidate rule lists, pruning the game under each
//! one and re-verifying the goal on what remains.
//!
//! # Module Structure
//!
//! - [`model`]: Concurrent game structures, joint actions, coalitions
//! - [`format`]: Flat-file reader/writer and the JSON model bridge
//! - [`logic`]: Formula AST and per-dialect parsers
//! - [`solver`]: CTL fixpoints and the ATL coalition pre-image
//! - [`strategy`]: Natural strategies and their enumeration
//! - [`prune`]: Restricting a model (or its unwinding) to a strategy
//! - [`search`]: Bound-increasing synthesis, Nash search and NatSL
pub mod format;
pub mod logic;
pub mod model;
pub mod prune;
pub mod search;
pub mod solver;
pub mod strategy;

mod error;
mod interrupt;

pub use error::*;
pub use interrupt::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Index of a state in a model's state sequence.
pub type State = usize;
/// Agent number, 1-based as written in formulas and strategies.
pub type Agent = usize;
/// Strategy complexity: token count of its conditions.
pub type Complexity = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for tests and benchmarks.
pub trait Arbitrary {
    /// Generate a random instance from the given source of randomness.
    fn random(rng: &mut impl rand::Rng) -> Self;
}

// ============================================================================
// FLAT FILE ALPHABET
// ============================================================================
/// Action symbol reserved for an idling agent.
pub const IDLE: char = 'I';
/// Cell marker for an unconditional self-loop no agent distinguishes.
pub const WILDCARD: char = '*';
/// Cell marker for "no transition".
pub const EMPTY: &str = "0";
/// Separator between alternative joint actions in one cell.
pub const ALTERNATIVE: char = ',';
/// Condition literal matching every state not yet covered by an earlier rule.
pub const TOP: &str = "T";

// ============================================================================
// STRATEGY SEARCH
// ============================================================================
/// Boolean connectives used when composing generated conditions.
pub const CONNECTIVES: [&str; 2] = ["and", "or"];
/// Depth of the history tree used by strategies with recall.
pub const UNWINDING_HEIGHT: usize = 4;
/// Candidates pulled from the enumerator per parallel batch.
pub const PARALLEL_CHUNK: usize = 256;

// ============================================================================
// RANDOM MODELS
// ============================================================================
/// Upper bound on states in a randomly generated model.
pub const RANDOM_STATES: usize = 8;
/// Upper bound on agents in a randomly generated model.
pub const RANDOM_AGENTS: usize = 2;
/// Upper bound on non-idle actions per agent in a randomly generated model.
pub const RANDOM_ACTIONS: usize = 2;
/// Upper bound on atomic propositions in a randomly generated model.
pub const RANDOM_PROPS: usize = 3;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "native")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => Some(std::time::Duration::from_secs(value * 60)),
        "h" => Some(std::time::Duration::from_secs(value * 3600)),
        "d" => Some(std::time::Duration::from_secs(value * 86400)),
        _ => None,
    }
}
