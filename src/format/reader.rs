use crate::model::*;
use std::collections::HashMap;

pub const TRANSITION: &str = "Transition";
pub const UNKNOWN: &str = "Unkown_Transition_by";
pub const NAME_STATE: &str = "Name_State";
pub const INITIAL_STATE: &str = "Initial_State";
pub const PROPOSITIONS: &str = "Atomic_propositions";
pub const LABELLING: &str = "Labelling";
pub const AGENTS: &str = "Number_of_agents";
pub const RESOURCE: &str = "Resource";
pub const COSTS: &str = "Actions_Costs_from_Transition";

const SECTIONS: [&str; 9] = [
    TRANSITION,
    UNKNOWN,
    NAME_STATE,
    INITIAL_STATE,
    PROPOSITIONS,
    LABELLING,
    AGENTS,
    RESOURCE,
    COSTS,
];

/// Non-blank lines of a flat file grouped under their section header,
/// each with its 1-based line number.
struct Sections<'a>(HashMap<&'static str, Vec<(usize, &'a str)>>);

impl<'a> Sections<'a> {
    fn split(text: &'a str) -> Result<Self, ModelError> {
        let mut sections = HashMap::<&'static str, Vec<(usize, &'a str)>>::new();
        let mut current = None;
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if let Some(header) = SECTIONS.iter().copied().find(|h| *h == line) {
                current = Some(header);
                sections.entry(header).or_default();
                continue;
            }
            if line.is_empty() {
                continue;
            }
            match current {
                Some(header) => sections.entry(header).or_default().push((i + 1, line)),
                None => {
                    return Err(ModelError::Line {
                        line: i + 1,
                        message: format!("'{}' appears before any section header", line),
                    });
                }
            }
        }
        Ok(Self(sections))
    }
    fn lines(&self, name: &'static str) -> Result<&[(usize, &'a str)], ModelError> {
        self.0
            .get(name)
            .map(|v| v.as_slice())
            .ok_or(ModelError::Section(name))
    }
    fn optional(&self, name: &'static str) -> &[(usize, &'a str)] {
        self.0.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }
    fn single(&self, name: &'static str) -> Result<(usize, &'a str), ModelError> {
        self.lines(name)?
            .first()
            .copied()
            .ok_or(ModelError::Section(name))
    }
}

fn number<T: std::str::FromStr>(line: usize, text: &str) -> Result<T, ModelError> {
    text.parse().map_err(|_| ModelError::Line {
        line,
        message: format!("'{}' is not a number", text),
    })
}

fn at(line: usize) -> impl Fn(ModelError) -> ModelError {
    move |e| match e {
        ModelError::Line { .. } => e,
        e => ModelError::Line {
            line,
            message: e.to_string(),
        },
    }
}

/// Propositions must be names a formula can refer to.
fn atoms(line: usize, text: &str) -> Result<Vec<String>, ModelError> {
    text.split_whitespace()
        .map(|atom| match crate::logic::is_proposition(atom) {
            true => Ok(atom.to_string()),
            false => Err(ModelError::Line {
                line,
                message: format!(
                    "proposition '{}' is not a lowercase name formulas can refer to",
                    atom
                ),
            }),
        })
        .collect()
}

impl std::str::FromStr for Cgs {
    type Err = ModelError;
    /// Read a model from the flat format. Dimensions are checked here;
    /// the liveness and idle invariants are left to [`Cgs::validate`].
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let sections = Sections::split(text)?;
        let (line, agents) = sections.single(AGENTS)?;
        let agents = number::<usize>(line, agents)?;
        let states = sections
            .single(NAME_STATE)?
            .1
            .split_whitespace()
            .map(String::from)
            .collect::<Vec<_>>();
        let (line, initial) = sections.single(INITIAL_STATE)?;
        let initial = states
            .iter()
            .position(|s| s == initial)
            .ok_or_else(|| ModelError::Line {
                line,
                message: format!("initial state {} is not a named state", initial),
            })?;
        let matrix = sections
            .lines(TRANSITION)?
            .iter()
            .map(|(line, row)| {
                row.split_whitespace()
                    .map(|cell| Cell::parse(cell, agents))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(at(*line))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let props = match sections.optional(PROPOSITIONS).first() {
            Some((line, l)) => atoms(*line, l)?,
            None => Vec::new(),
        };
        let labels = match props.is_empty() && sections.optional(LABELLING).is_empty() {
            true => vec![Vec::new(); states.len()],
            false => sections
                .lines(LABELLING)?
                .iter()
                .map(|(line, row)| {
                    row.split_whitespace()
                        .map(|bit| match bit {
                            "0" => Ok(false),
                            "1" => Ok(true),
                            bit => Err(ModelError::Line {
                                line: *line,
                                message: format!("label bit '{}' is not 0 or 1", bit),
                            }),
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        let unknown = sections
            .optional(UNKNOWN)
            .iter()
            .map(|(_, l)| l.to_string())
            .collect();
        let resource = sections
            .optional(RESOURCE)
            .first()
            .map(|(line, r)| number::<u32>(*line, r))
            .transpose()?;
        let table = sections
            .optional(COSTS)
            .iter()
            .map(|(_, l)| l.split_whitespace().map(String::from).collect())
            .collect::<Vec<Vec<String>>>();
        let cgs = Cgs::new(states, agents, matrix, props, labels, initial)?.with_unknown(unknown);
        match resource.is_some() || !table.is_empty() {
            true => Ok(cgs.with_costs(Costs::new(resource, table))),
            false => Ok(cgs),
        }
    }
}
