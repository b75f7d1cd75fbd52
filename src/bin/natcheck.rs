//! natcheck
//!
//! Model checking and natural-strategy synthesis from the command line.
//! Models are flat files, or JSON documents when the path ends in `.json`.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use natcheck::Interrupt;
use natcheck::format::Bridge;
use natcheck::logic::*;
use natcheck::model::Cgs;
use natcheck::prune::Semantics;
use natcheck::search::*;
use natcheck::solver::Checker;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Check a CTL formula at the initial state")]
    Ctl {
        #[arg(required = true)]
        model: PathBuf,
        #[arg(required = true)]
        formula: String,
    },
    #[command(about = "Check an ATL formula at the initial state")]
    Atl {
        #[arg(required = true)]
        model: PathBuf,
        #[arg(required = true)]
        formula: String,
    },
    #[command(
        about = "Search for a natural strategy satisfying a NatATL formula",
        alias = "synthesize"
    )]
    Natatl {
        #[arg(required = true)]
        model: PathBuf,
        /// Defaults to the document's formula for JSON models.
        formula: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    #[command(about = "Decide a sequential NatSL formula, e.g. E{1}xA{1}y:(x,1)(y,2)F p")]
    Natsl {
        #[arg(required = true)]
        model: PathBuf,
        #[arg(required = true)]
        formula: String,
        #[command(flatten)]
        search: Search,
    },
    #[command(about = "Verify one given strategy without searching")]
    CheckStrategy {
        /// A JSON model the strategy document refers to.
        #[arg(required = true)]
        model: PathBuf,
        #[arg(required = true)]
        strategy: PathBuf,
        formula: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    #[command(about = "Find a strategy profile no agent deviates from")]
    Nash {
        #[arg(required = true)]
        model: PathBuf,
        formula: Option<String>,
        /// Only accept equilibria under which this agent wins.
        #[arg(long, conflicts_with = "loses")]
        wins: Option<usize>,
        /// Only accept equilibria under which this agent loses.
        #[arg(long)]
        loses: Option<usize>,
        #[command(flatten)]
        search: Search,
    },
    #[command(about = "Translate a JSON model into the flat format")]
    Convert {
        #[arg(required = true)]
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct Search {
    /// Let strategies observe histories through an unwinding of this height.
    /// NatSL recalls by default.
    #[arg(long)]
    recall: Option<usize>,
    #[arg(long, default_value_t = Semantics::Hard)]
    semantics: Semantics,
    /// Give up after this long, e.g. 30s, 5m.
    #[arg(long, value_parser = duration)]
    timeout: Option<Duration>,
    #[arg(long)]
    parallel: bool,
    /// Skip the unbounded ATL check before enumerating.
    #[arg(long)]
    no_prefilter: bool,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

impl Search {
    fn config(&self) -> Config {
        self.configure(Memory::Memoryless)
    }

    fn configure(&self, fallback: Memory) -> Config {
        let memory = self
            .recall
            .map_or(fallback, |height| Memory::Recall { height });
        let config = Config::from_env()
            .with_semantics(self.semantics)
            .with_memory(memory)
            .with_prefilter(!self.no_prefilter)
            .with_parallel(self.parallel);
        match self.timeout {
            Some(timeout) => config.with_timeout(Some(timeout)),
            None => config,
        }
    }
}

fn duration(s: &str) -> Result<Duration, String> {
    natcheck::parse_duration(s).ok_or_else(|| format!("invalid duration '{}'", s))
}

/// A model with the JSON name maps it was read through, if any.
struct Loaded {
    cgs: Cgs,
    bridge: Option<Bridge>,
}

impl Loaded {
    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading model {}", path.display()))?;
        let json = path.extension().is_some_and(|e| e == "json");
        Self::parse(&text, json).with_context(|| format!("loading {}", path.display()))
    }

    /// Parse and validate, so every subcommand sees a live model.
    fn parse(text: &str, json: bool) -> anyhow::Result<Self> {
        let loaded = match json {
            true => {
                let bridge = Bridge::read(text).context("bridging JSON model")?;
                Self {
                    cgs: bridge.model().clone(),
                    bridge: Some(bridge),
                }
            }
            false => Self {
                cgs: text.parse::<Cgs>().context("parsing flat model")?,
                bridge: None,
            },
        };
        loaded.cgs.validate().context("validating model")?;
        Ok(loaded)
    }

    /// The given formula with JSON names translated, or the document's own.
    fn formula(&self, given: Option<&str>) -> anyhow::Result<String> {
        match (given, &self.bridge) {
            (Some(text), Some(bridge)) => Ok(bridge.translate(text)),
            (Some(text), None) => Ok(text.to_string()),
            (None, Some(bridge)) => bridge
                .formula()
                .map(str::to_string)
                .context("the JSON model carries no formula_natatl"),
            (None, None) => anyhow::bail!("a formula is required for flat models"),
        }
    }

    fn query(&self, given: Option<&str>) -> anyhow::Result<NatAtlQuery> {
        let text = self.formula(given)?;
        NatAtl::parse(&text).with_context(|| format!("parsing NatATL formula '{}'", text))
    }
}

fn verdict(holds: bool) -> colored::ColoredString {
    match holds {
        true => "satisfied".green().bold(),
        false => "not satisfied".red().bold(),
    }
}

fn evaluate(loaded: &Loaded, formula: Formula) -> anyhow::Result<()> {
    let ref interrupt = Interrupt::within(Config::from_env().timeout);
    let evaluation = Checker::new(&loaded.cgs, interrupt).evaluate(&formula)?;
    let states = evaluation
        .root()
        .iter()
        .map(|s| loaded.cgs.name(s))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}: {}", formula, verdict(evaluation.holds()));
    println!("holds in {{{}}}", states);
    Ok(())
}

fn report(report: &Report, json: bool) -> anyhow::Result<()> {
    match json {
        true => println!("{}", serde_json::to_string_pretty(report)?),
        false => {
            println!("{}", verdict(report.satisfiable));
            println!("{}", report);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    natcheck::log();
    match Command::parse() {
        Command::Ctl { model, formula } => {
            let loaded = Loaded::read(&model)?;
            let text = loaded.formula(Some(&formula))?;
            evaluate(&loaded, Ctl::parse(&text).context("parsing CTL formula")?)
        }
        Command::Atl { model, formula } => {
            let loaded = Loaded::read(&model)?;
            let text = loaded.formula(Some(&formula))?;
            evaluate(&loaded, Atl::parse(&text).context("parsing ATL formula")?)
        }
        Command::Natatl {
            model,
            formula,
            search,
        } => {
            let loaded = Loaded::read(&model)?;
            let ref query = loaded.query(formula.as_deref())?;
            log::info!("searching {} on {}", query, model.display());
            let synthesizer = Synthesizer::new(loaded.cgs, search.config())?;
            report(&synthesizer.run(query)?, search.json)
        }
        Command::Natsl {
            model,
            formula,
            search,
        } => {
            let loaded = Loaded::read(&model)?;
            let text = loaded.formula(Some(&formula))?;
            let ref query =
                NatSl::parse(&text).with_context(|| format!("parsing NatSL formula '{}'", text))?;
            log::info!("solving {} on {}", query, model.display());
            let synthesizer = Synthesizer::new(loaded.cgs, search.configure(Memory::recall()))?;
            report(&synthesizer.solve(query)?, search.json)
        }
        Command::CheckStrategy {
            model,
            strategy,
            formula,
            search,
        } => {
            let loaded = Loaded::read(&model)?;
            let ref query = loaded.query(formula.as_deref())?;
            let bridge = loaded
                .bridge
                .as_ref()
                .context("strategy documents refer to a JSON model")?;
            let text = std::fs::read_to_string(&strategy)
                .with_context(|| format!("reading strategy {}", strategy.display()))?;
            let ref collective = bridge.strategy(&text)?;
            let synthesizer = Synthesizer::new(loaded.cgs, search.config())?;
            let attempt = synthesizer.check(query, collective)?;
            match search.json {
                true => println!("{}", serde_json::to_string_pretty(&attempt)?),
                false => println!("{}\n{}\n{}", verdict(attempt.won()), collective, attempt),
            }
            Ok(())
        }
        Command::Nash {
            model,
            formula,
            wins,
            loses,
            search,
        } => {
            let loaded = Loaded::read(&model)?;
            let query = loaded.query(formula.as_deref())?;
            let synthesizer = Synthesizer::new(loaded.cgs, search.config())?;
            let coalition = query.coalition().clone();
            let bound = query.bound();
            let ref goals = Goals::shared(query);
            let found = match (wins, loses) {
                (Some(target), _) => synthesizer.wins_some_nash(goals, &coalition, target, bound)?,
                (_, Some(target)) => synthesizer.loses_some_nash(goals, &coalition, target, bound)?,
                (None, None) => synthesizer.exists_nash(goals, &coalition, bound)?,
            };
            match found {
                Some(profile) if search.json => {
                    println!("{}", serde_json::to_string_pretty(&profile)?)
                }
                Some(profile) => println!("{}\n{}", "equilibrium".green().bold(), profile),
                None => println!(
                    "{} up to bound {}",
                    "no equilibrium".red().bold(),
                    bound
                ),
            }
            Ok(())
        }
        Command::Convert { input, output } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let flat = Bridge::read(&text)?.into_model().to_string();
            match output {
                Some(path) => std::fs::write(&path, flat)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{}", flat),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "Transition
I A
0 I,A
Name_State
s0 s1
Initial_State
s0
Atomic_propositions
p
Labelling
0
1
Number_of_agents
1
";

    #[test]
    fn loads_live_models() {
        let loaded = Loaded::parse(MODEL, false).expect("valid model");
        assert!(loaded.bridge.is_none());
        let text = loaded.formula(Some("EF p")).expect("formula given");
        assert_eq!(text, "EF p");
        assert!(loaded.formula(None).is_err());
    }

    #[test]
    fn rejects_dead_ends_before_checking() {
        let dead = MODEL.replace("0 I,A", "0 0");
        let error = Loaded::parse(&dead, false).err().expect("dead end");
        assert!(format!("{:#}", error).contains("validating model"));
    }
}
