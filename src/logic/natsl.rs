use super::*;
use crate::Agent;
use crate::Complexity;
use crate::model::Coalition;

/// Which way a strategy variable is quantified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binder {
    Exists,
    Forall,
}

/// A quantified strategy variable and the agent it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub binder: Binder,
    pub name: String,
    pub bound: Complexity,
    pub agent: Agent,
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let binder = match self.binder {
            Binder::Exists => 'E',
            Binder::Forall => 'A',
        };
        write!(f, "{}{{{}}}{}", binder, self.bound, self.name)
    }
}

/// A parsed NatSL query in the sequential fragment: a prefix of bounded
/// strategy quantifiers, one binding per variable, then a single
/// temporal goal read on every remaining path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatSlQuery {
    variables: Vec<Variable>,
    goal: Formula,
    negated: bool,
}

impl NatSlQuery {
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }
    pub fn negated(&self) -> bool {
        self.negated
    }
    pub fn coalition(&self, binder: Binder) -> Coalition {
        self.side(binder).map(|v| v.agent).collect()
    }
    /// Total complexity the variables under `binder` may spend.
    pub fn bound(&self, binder: Binder) -> Complexity {
        self.side(binder).map(|v| v.bound).sum()
    }
    /// Each universally bound agent with its own bound.
    pub fn universal(&self) -> Vec<(Agent, Complexity)> {
        self.side(Binder::Forall).map(|v| (v.agent, v.bound)).collect()
    }
    /// The existential agents' part as a NatATL query, when there are any.
    pub fn existential(&self) -> Option<NatAtlQuery> {
        let coalition = self.coalition(Binder::Exists);
        match coalition.is_empty() {
            true => None,
            false => {
                let bound = self.bound(Binder::Exists);
                let goal = self.goal.requantify(&|q| match q {
                    Quantifier::Forall => Quantifier::Natural(coalition.clone(), bound),
                    q => q.clone(),
                });
                let formula = match self.negated {
                    true => Formula::not(goal),
                    false => goal,
                };
                Some(NatAtlQuery::new(formula, coalition, bound))
            }
        }
    }
    /// The goal checked once every quantified agent is fixed.
    pub fn to_ctl(&self) -> Formula {
        match self.negated {
            true => Formula::not(self.goal.clone()),
            false => self.goal.clone(),
        }
    }
    fn side(&self, binder: Binder) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.iter().filter(move |v| v.binder == binder)
    }
}

impl std::fmt::Display for NatSlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for variable in self.variables.iter() {
            write!(f, "{}", variable)?;
        }
        write!(f, ":")?;
        for variable in self.variables.iter() {
            write!(f, "({},{})", variable.name, variable.agent)?;
        }
        let negation = match self.negated {
            true => "!",
            false => "",
        };
        write!(f, " {}{}", negation, self.goal)
    }
}

/// Natural strategy logic, sequential fragment:
/// `E{1}xA{2}y:(x,1)(y,2)F p`. A missing `{k}` means a bound of 1 and a
/// leading `!` on the goal negates it.
pub struct NatSl;

impl NatSl {
    fn reject(construct: String) -> SyntaxError {
        SyntaxError::Dialect {
            dialect: Self::NAME,
            construct,
        }
    }
}

impl Dialect for NatSl {
    type Output = NatSlQuery;
    const NAME: &'static str = "NatSL";
    fn parse(text: &str) -> Result<NatSlQuery, SyntaxError> {
        let (prefix, rest) = text.split_once(':').ok_or(SyntaxError::End {
            expected: "':' after the strategy quantifiers",
        })?;
        let offset = prefix.len() + 1;
        let quantified = quantifiers(prefix)?;
        let (bindings, start) = bindings(rest, offset)?;
        if quantified.is_empty() {
            return Err(SyntaxError::End {
                expected: "a strategy quantifier E or A",
            });
        }
        let mut variables = Vec::<Variable>::with_capacity(quantified.len());
        for (binder, name, bound) in quantified {
            if bound == 0 {
                return Err(Self::reject(format!("bound 0 on {}", name)));
            }
            if variables.iter().any(|v| v.name == name) {
                return Err(Self::reject(format!("{} quantified twice", name)));
            }
            let agents = bindings
                .iter()
                .filter(|(v, _)| *v == name)
                .map(|(_, a)| *a)
                .collect::<Vec<_>>();
            let agent = match agents.as_slice() {
                [agent] if *agent > 0 => *agent,
                [agent] => return Err(Self::reject(format!("agent {}", agent))),
                [] => return Err(Self::reject(format!("unbound variable {}", name))),
                _ => return Err(Self::reject(format!("{} bound twice", name))),
            };
            if let Some(other) = variables.iter().find(|v| v.agent == agent) {
                return Err(Self::reject(format!(
                    "agent {} bound to both {} and {}",
                    agent, other.name, name
                )));
            }
            variables.push(Variable {
                binder,
                name,
                bound,
                agent,
            });
        }
        if let Some((name, _)) = bindings
            .iter()
            .find(|(name, _)| !variables.iter().any(|v| v.name == *name))
        {
            return Err(Self::reject(format!("binding of unquantified {}", name)));
        }
        let body = rest[start..].trim();
        let (negated, body) = match body.strip_prefix('!') {
            Some(body) => (true, body.trim_start()),
            None => (false, body),
        };
        let goal = parse(&format!("A{}", body))?;
        if !matches!(goal.quantifier(), Some(Quantifier::Forall)) {
            return Err(Self::reject(format!("'{}' as a goal", body)));
        }
        if let Some(nested) = goal.children().into_iter().find(|c| !c.is_boolean()) {
            return Err(Self::reject(format!("nested temporal operator in {}", nested)));
        }
        Ok(NatSlQuery {
            variables,
            goal,
            negated,
        })
    }
}

fn unexpected(position: usize, token: &Token, expected: &'static str) -> SyntaxError {
    SyntaxError::Unexpected {
        position,
        found: token.to_string(),
        expected,
    }
}

/// `E{k}x A y ...` into (binder, variable, bound) triples.
fn quantifiers(text: &str) -> Result<Vec<(Binder, String, Complexity)>, SyntaxError> {
    let tokens = lex(text)?;
    let mut found = Vec::new();
    let mut rest = tokens.as_slice();
    loop {
        let (binder, tail) = match rest {
            [] => break,
            [(_, Token::Upper('E')), tail @ ..] => (Binder::Exists, tail),
            [(_, Token::Upper('A')), tail @ ..] => (Binder::Forall, tail),
            [(position, token), ..] => {
                return Err(unexpected(*position, token, "a strategy quantifier E or A"));
            }
        };
        let (bound, tail) = match tail {
            [
                (_, Token::LBrace),
                (_, Token::Number(k)),
                (_, Token::RBrace),
                tail @ ..,
            ] => (*k, tail),
            tail => (1, tail),
        };
        let (name, tail) = match tail {
            [(_, Token::Prop(name)), tail @ ..] => (name.clone(), tail),
            [(position, token), ..] => {
                return Err(unexpected(*position, token, "a strategy variable"));
            }
            [] => {
                return Err(SyntaxError::End {
                    expected: "a strategy variable",
                });
            }
        };
        found.push((binder, name, bound));
        rest = tail;
    }
    Ok(found)
}

/// Leading `(x,1)` pairs, and where the goal starts in `text`.
fn bindings(text: &str, offset: usize) -> Result<(Vec<(String, Agent)>, usize), SyntaxError> {
    let tokens = lex(text).map_err(|e| match e {
        SyntaxError::Unexpected {
            position,
            found,
            expected,
        } => SyntaxError::Unexpected {
            position: position + offset,
            found,
            expected,
        },
        e => e,
    })?;
    let mut found = Vec::new();
    let mut rest = tokens.as_slice();
    while let [
        (_, Token::LParen),
        (_, Token::Prop(name)),
        (_, Token::Comma),
        (_, Token::Number(agent)),
        (_, Token::RParen),
        tail @ ..,
    ] = rest
    {
        found.push((name.clone(), *agent));
        rest = tail;
    }
    match rest.first() {
        Some((position, _)) => Ok((found, *position)),
        None => Err(SyntaxError::End {
            expected: "a temporal goal",
        }),
    }
}
