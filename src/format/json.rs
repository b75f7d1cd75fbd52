use crate::model::*;
use crate::strategy::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Model description as exchanged with front ends.
#[derive(Debug, Deserialize)]
struct Document {
    states: Vec<String>,
    agents: Vec<String>,
    actions: HashMap<String, Vec<String>>,
    transitions: Vec<Transition>,
    initial_state: String,
    #[serde(default)]
    labeling: HashMap<String, Vec<String>>,
    #[serde(default)]
    formula_natatl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Transition {
    from: String,
    to: String,
    joint: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Guard {
    cond: String,
    action: String,
}

/// A model read from JSON, with the name mappings needed to translate
/// formulas and strategies written against the same document.
///
/// Action names become single uppercase codes per agent (`I` is kept for
/// idling), proposition names become single lowercase symbols, and every
/// state gets an all-idle self-loop.
#[derive(Debug, Clone)]
pub struct Bridge {
    cgs: Cgs,
    agents: Vec<String>,
    codes: Vec<HashMap<String, Move>>,
    symbols: HashMap<String, String>,
    formula: Option<String>,
}

impl Bridge {
    pub fn read(text: &str) -> Result<Self, ModelError> {
        let value = serde_json::from_str::<serde_json::Value>(text).map_err(json)?;
        let input = value.get("input").unwrap_or(&value).clone();
        let document = serde_json::from_value::<Document>(input).map_err(json)?;
        Self::build(document)
    }

    pub fn model(&self) -> &Cgs {
        &self.cgs
    }
    pub fn into_model(self) -> Cgs {
        self.cgs
    }
    /// The document's NatATL formula over codes and agent indices.
    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }
    pub fn code(&self, agent: &str, action: &str) -> Option<Move> {
        let i = self.agents.iter().position(|a| a == agent)?;
        self.codes[i].get(action).copied()
    }
    pub fn symbol(&self, prop: &str) -> Option<&str> {
        self.symbols.get(prop).map(String::as_str)
    }

    /// Replace proposition names by their symbols and, inside a
    /// quantifier, agent names by their 1-based indices.
    pub fn translate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word = String::new();
        let mut quantified = false;
        for c in text.chars().chain(std::iter::once(' ')) {
            if c.is_ascii_alphanumeric() || c == '_' {
                word.push(c);
                continue;
            }
            if !word.is_empty() {
                let agent = self.agents.iter().position(|a| *a == word);
                match (quantified, agent, self.symbols.get(&word)) {
                    (true, Some(i), _) => out.push_str(&(i + 1).to_string()),
                    (_, _, Some(symbol)) => out.push_str(symbol),
                    _ => out.push_str(&word),
                }
                word.clear();
            }
            match c {
                '<' => quantified = true,
                '>' => quantified = false,
                _ => {}
            }
            out.push(c);
        }
        out.pop();
        out
    }

    /// Read a strategy document (`output.strategy_natural` or a root
    /// `strategy_natural`) written against this model's names.
    pub fn strategy(&self, text: &str) -> Result<Collective, ModelError> {
        let value = serde_json::from_str::<serde_json::Value>(text).map_err(json)?;
        let natural = value
            .get("output")
            .and_then(|o| o.get("strategy_natural"))
            .or_else(|| value.get("strategy_natural"))
            .cloned()
            .ok_or_else(|| ModelError::Json("no strategy_natural section".into()))?;
        let guards =
            serde_json::from_value::<BTreeMap<String, Vec<Guard>>>(natural).map_err(json)?;
        let mut profile = Vec::new();
        for (i, agent) in self.agents.iter().enumerate() {
            let Some(rules) = guards.get(agent) else {
                continue;
            };
            let rules = rules
                .iter()
                .map(|g| self.rule(i, g))
                .collect::<Result<Vec<_>, _>>()?;
            profile.push((i + 1, Natural::new(rules)));
        }
        if let Some(stray) = guards.keys().find(|a| !self.agents.contains(a)) {
            return Err(ModelError::Json(format!("unknown agent '{}'", stray)));
        }
        Ok(Collective::from(profile))
    }

    fn rule(&self, agent: usize, guard: &Guard) -> Result<Rule, ModelError> {
        let condition = match guard.cond.trim() {
            c if c.eq_ignore_ascii_case(crate::TOP) => Condition::True,
            c => Condition::parse(&self.translate(c))
                .map_err(|e| ModelError::Json(format!("condition '{}': {}", c, e)))?,
        };
        let action = self.codes[agent]
            .get(guard.action.trim())
            .copied()
            .ok_or_else(|| {
                ModelError::Json(format!(
                    "agent '{}' has no action '{}'",
                    self.agents[agent], guard.action
                ))
            })?;
        Ok(Rule::new(condition, action))
    }

    fn build(document: Document) -> Result<Self, ModelError> {
        let n = document.states.len();
        let width = document.agents.len();
        let state = |name: &str| {
            document
                .states
                .iter()
                .position(|s| s == name)
                .ok_or_else(|| ModelError::Json(format!("unknown state '{}'", name)))
        };
        let codes = document
            .agents
            .iter()
            .map(|agent| {
                let actions = document.actions.get(agent).map(Vec::as_slice).unwrap_or(&[]);
                codes(actions)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut matrix = vec![vec![Cell::Empty; n]; n];
        for transition in document.transitions.iter() {
            if transition.joint.len() != width {
                return Err(ModelError::Json(format!(
                    "joint action {:?} needs {} entries",
                    transition.joint, width
                )));
            }
            let moves = transition
                .joint
                .iter()
                .zip(codes.iter())
                .zip(document.agents.iter())
                .map(|((action, table), agent)| {
                    table.get(action).copied().ok_or_else(|| {
                        ModelError::Json(format!("agent '{}' has no action '{}'", agent, action))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let (from, to) = (state(&transition.from)?, state(&transition.to)?);
            matrix[from][to].push(JointAction::from(moves));
        }
        for s in 0..n {
            matrix[s][s].push(JointAction::idle(width));
        }
        let (props, symbols) = symbols(&document.states, &document.labeling)?;
        let labels = document
            .states
            .iter()
            .map(|s| {
                let held = document.labeling.get(s).map(Vec::as_slice).unwrap_or(&[]);
                props.iter().map(|p| held.contains(p)).collect()
            })
            .collect();
        let initial = state(&document.initial_state)?;
        let cgs = Cgs::new(
            document.states.clone(),
            width,
            matrix,
            props.iter().map(|p| symbols[p].clone()).collect(),
            labels,
            initial,
        )?;
        let mut bridge = Self {
            cgs,
            agents: document.agents,
            codes,
            symbols,
            formula: None,
        };
        let formula = document.formula_natatl.map(|f| bridge.translate(f.trim()));
        bridge.formula = formula;
        Ok(bridge)
    }
}

fn json(e: serde_json::Error) -> ModelError {
    ModelError::Json(e.to_string())
}

/// Pick the first candidate not yet used, else the first free letter.
fn pick(
    mut preferred: impl Iterator<Item = char>,
    mut alphabet: impl Iterator<Item = char>,
    used: &mut Vec<char>,
) -> Option<char> {
    let choice = preferred
        .find(|c| c.is_ascii_alphabetic() && !used.contains(c))
        .or_else(|| alphabet.find(|c| !used.contains(c)))?;
    used.push(choice);
    Some(choice)
}

/// Uppercase action codes for one agent.
fn codes(actions: &[String]) -> Result<HashMap<String, Move>, ModelError> {
    let mut used = vec![crate::IDLE];
    let mut table = HashMap::new();
    for action in actions {
        let name = action.trim();
        let code = match name.eq_ignore_ascii_case("idle") || name.eq_ignore_ascii_case("i") {
            true => Move::Idle,
            false => pick(
                name.chars().map(|c| c.to_ascii_uppercase()),
                'A'..='Z',
                &mut used,
            )
            .map(Move::Act)
            .ok_or_else(|| ModelError::Json(format!("no action code left for '{}'", name)))?,
        };
        table.insert(action.clone(), code);
    }
    Ok(table)
}

/// Propositions in order of first appearance, with lowercase symbols.
fn symbols(
    states: &[String],
    labeling: &HashMap<String, Vec<String>>,
) -> Result<(Vec<String>, HashMap<String, String>), ModelError> {
    let mut props = Vec::<String>::new();
    for held in states.iter().filter_map(|s| labeling.get(s)) {
        for p in held {
            if !props.contains(p) {
                props.push(p.clone());
            }
        }
    }
    let mut used = Vec::new();
    let mut table = HashMap::new();
    for prop in props.iter() {
        let initial = prop
            .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
            .find(|t| !t.is_empty())
            .and_then(|t| t.chars().next());
        let preferred = initial.into_iter().chain(prop.chars()).map(|c| c.to_ascii_lowercase());
        let symbol = pick(preferred, 'a'..='z', &mut used)
            .ok_or_else(|| ModelError::Json(format!("no symbol left for '{}'", prop)))?;
        table.insert(prop.clone(), symbol.to_string());
    }
    Ok((props, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::*;

    const DOCUMENT: &str = r#"{
        "input": {
            "states": ["home", "work"],
            "agents": ["robot_arm", "conveyor"],
            "actions": {
                "robot_arm": ["idle", "grab", "go"],
                "conveyor": ["idle", "move"]
            },
            "transitions": [
                {"from": "home", "to": "work", "joint": ["go", "idle"]},
                {"from": "home", "to": "home", "joint": ["grab", "move"]},
                {"from": "work", "to": "work", "joint": ["idle", "move"]}
            ],
            "initial_state": "home",
            "labeling": {"work": ["job_done", "just_arrived"]},
            "formula_natatl": "<{robot_arm}, 1> F job_done"
        }
    }"#;

    #[test]
    fn builds_model() {
        let bridge = Bridge::read(DOCUMENT).expect("valid document");
        assert_eq!(bridge.code("robot_arm", "grab"), Some(Move::Act('G')));
        assert_eq!(bridge.code("robot_arm", "go"), Some(Move::Act('O')));
        assert_eq!(bridge.code("conveyor", "idle"), Some(Move::Idle));
        assert_eq!(bridge.symbol("job_done"), Some("j"));
        assert_eq!(bridge.symbol("just_arrived"), Some("u"));
        let cgs = bridge.model();
        assert_eq!(cgs.props(), &["j".to_string(), "u".to_string()]);
        assert_eq!(cgs.cell(0, 1).to_string(), "OI");
        assert_eq!(cgs.cell(0, 0).to_string(), "GM,II");
        assert!(cgs.validate().is_ok());
    }

    #[test]
    fn translates_formula() {
        let bridge = Bridge::read(DOCUMENT).expect("valid document");
        assert_eq!(bridge.formula(), Some("<{1}, 1> F j"));
        assert_eq!(bridge.translate("<conveyor>G !job_done"), "<2>G !j");
        let query = NatAtl::parse(bridge.formula().expect("formula")).expect("valid NatATL");
        assert_eq!(query.coalition(), &Coalition::from(vec![1]));
    }

    #[test]
    fn reads_strategies() {
        let bridge = Bridge::read(DOCUMENT).expect("valid document");
        let strategy = bridge
            .strategy(r#"{"strategy_natural": {"robot_arm": [{"cond": "!job_done", "action": "go"}, {"cond": "T", "action": "idle"}]}}"#)
            .expect("valid strategy");
        assert_eq!(strategy.to_string(), "agent 1: [(!j, O), (T, I)]");
        assert!(matches!(
            bridge.strategy(r#"{"strategy_natural": {"robot_arm": [{"cond": "T", "action": "fly"}]}}"#),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(Bridge::read("{"), Err(ModelError::Json(_))));
        let unknown = DOCUMENT.replace(r#"["go", "idle"]"#, r#"["run", "idle"]"#);
        assert!(matches!(Bridge::read(&unknown), Err(ModelError::Json(_))));
    }
}
