use super::*;

/// Formula tree shared by every dialect.
///
/// Temporal nodes carry their path [`Quantifier`], so `EF p`, `<1>F p`
/// and `<{1},2>F p` differ only in the quantifier of one `Finally` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Next(Quantifier, Box<Formula>),
    Finally(Quantifier, Box<Formula>),
    Globally(Quantifier, Box<Formula>),
    Until(Quantifier, Box<Formula>, Box<Formula>),
    Release(Quantifier, Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(name: &str) -> Self {
        Self::Atom(name.to_string())
    }
    pub fn not(f: Self) -> Self {
        Self::Not(Box::new(f))
    }
    pub fn and(a: Self, b: Self) -> Self {
        Self::And(Box::new(a), Box::new(b))
    }
    pub fn or(a: Self, b: Self) -> Self {
        Self::Or(Box::new(a), Box::new(b))
    }

    /// Direct subformulas, left to right.
    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Self::Atom(_) => vec![],
            Self::Not(a)
            | Self::Next(_, a)
            | Self::Finally(_, a)
            | Self::Globally(_, a) => vec![a],
            Self::And(a, b)
            | Self::Or(a, b)
            | Self::Implies(a, b)
            | Self::Until(_, a, b)
            | Self::Release(_, a, b) => vec![a, b],
        }
    }
    pub fn quantifier(&self) -> Option<&Quantifier> {
        match self {
            Self::Next(q, _)
            | Self::Finally(q, _)
            | Self::Globally(q, _)
            | Self::Until(q, _, _)
            | Self::Release(q, _, _) => Some(q),
            _ => None,
        }
    }
    /// Every node in post-order.
    pub fn postorder(&self) -> Vec<&Formula> {
        let mut nodes = self
            .children()
            .into_iter()
            .flat_map(|c| c.postorder())
            .collect::<Vec<_>>();
        nodes.push(self);
        nodes
    }
    /// Number of nodes.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.size()).sum::<usize>()
    }
    /// Atomic propositions in order of appearance.
    pub fn atoms(&self) -> Vec<&str> {
        self.postorder()
            .into_iter()
            .filter_map(|f| match f {
                Self::Atom(a) => Some(a.as_str()),
                _ => None,
            })
            .collect()
    }
    /// Free of temporal operators.
    pub fn is_boolean(&self) -> bool {
        self.postorder().iter().all(|f| f.quantifier().is_none())
    }
    /// Rewrite every quantifier.
    pub fn requantify<F>(&self, f: &F) -> Self
    where
        F: Fn(&Quantifier) -> Quantifier,
    {
        let go = |x: &Formula| Box::new(x.requantify(f));
        match self {
            Self::Atom(a) => Self::Atom(a.clone()),
            Self::Not(a) => Self::Not(go(a)),
            Self::And(a, b) => Self::And(go(a), go(b)),
            Self::Or(a, b) => Self::Or(go(a), go(b)),
            Self::Implies(a, b) => Self::Implies(go(a), go(b)),
            Self::Next(q, a) => Self::Next(f(q), go(a)),
            Self::Finally(q, a) => Self::Finally(f(q), go(a)),
            Self::Globally(q, a) => Self::Globally(f(q), go(a)),
            Self::Until(q, a, b) => Self::Until(f(q), go(a), go(b)),
            Self::Release(q, a, b) => Self::Release(f(q), go(a), go(b)),
        }
    }
    /// Truth of a boolean formula under one label row.
    pub fn holds(&self, label: &[bool], props: &[String]) -> Result<bool, SyntaxError> {
        match self {
            Self::Atom(a) => props
                .iter()
                .position(|p| p == a)
                .map(|i| label[i])
                .ok_or_else(|| SyntaxError::UnknownAtom(a.clone())),
            Self::Not(a) => Ok(!a.holds(label, props)?),
            Self::And(a, b) => Ok(a.holds(label, props)? && b.holds(label, props)?),
            Self::Or(a, b) => Ok(a.holds(label, props)? || b.holds(label, props)?),
            Self::Implies(a, b) => Ok(!a.holds(label, props)? || b.holds(label, props)?),
            temporal => Err(SyntaxError::Dialect {
                dialect: "a state label",
                construct: format!("temporal operator in {}", temporal),
            }),
        }
    }

    /// Binding strength when printed: higher binds tighter.
    fn level(&self) -> u8 {
        match self {
            Self::Implies(..) => 1,
            Self::Or(..) => 2,
            Self::And(..) => 3,
            _ => 4,
        }
    }
    fn wrap(&self, at: u8) -> String {
        match self.level() < at {
            true => format!("({})", self),
            false => self.to_string(),
        }
    }
    fn operand(&self) -> String {
        let inner = self.wrap(4);
        match inner.starts_with('(') {
            true => inner,
            false => format!(" {}", inner),
        }
    }
}

impl std::fmt::Display for Formula {
    /// Prints with as few parentheses as re-parsing needs, so that token
    /// counts of generated conditions match the text they came from.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Atom(a) => write!(f, "{}", a),
            Self::Not(a) => write!(f, "!{}", a.wrap(4)),
            Self::And(a, b) => write!(f, "{} and {}", a.wrap(3), b.wrap(4)),
            Self::Or(a, b) => write!(f, "{} or {}", a.wrap(2), b.wrap(3)),
            Self::Implies(a, b) => write!(f, "{} -> {}", a.wrap(2), b.wrap(1)),
            Self::Next(q, a) => write!(f, "{}X{}", q, a.operand()),
            Self::Finally(q, a) => write!(f, "{}F{}", q, a.operand()),
            Self::Globally(q, a) => write!(f, "{}G{}", q, a.operand()),
            Self::Until(q, a, b) => write!(f, "{}({} U {})", q, a, b),
            Self::Release(q, a, b) => write!(f, "{}({} R {})", q, a, b),
        }
    }
}
