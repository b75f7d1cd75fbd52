use super::*;

/// One letter of a history expression: a boolean formula on a node's
/// label, repeated zero or more times when starred.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub letter: Formula,
    pub star: bool,
}

/// A regular expression over histories: segments joined by `.`.
///
/// `a and b . q*` matches histories whose first node satisfies `a and b`
/// followed by any number of `q` nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct History {
    segments: Vec<Segment>,
}

impl History {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    /// Every word of exactly `length` letters the expression generates.
    pub fn witnesses(&self, length: usize) -> Vec<Vec<&Formula>> {
        let mut words = Vec::new();
        let mut stack = vec![(0usize, Vec::<&Formula>::new())];
        while let Some((i, word)) = stack.pop() {
            match self.segments.get(i) {
                None if word.len() == length && !words.contains(&word) => words.push(word),
                None => {}
                Some(segment) if segment.star => {
                    for repeat in (0..=length.saturating_sub(word.len())).rev() {
                        let mut next = word.clone();
                        next.extend(std::iter::repeat(&segment.letter).take(repeat));
                        stack.push((i + 1, next));
                    }
                }
                Some(segment) if word.len() < length => {
                    let mut next = word;
                    next.push(&segment.letter);
                    stack.push((i + 1, next));
                }
                Some(_) => {}
            }
        }
        words
    }
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .segments
            .iter()
            .map(|s| match s.star {
                true => format!("{}*", s.letter),
                false => s.letter.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" . ");
        write!(f, "{}", text)
    }
}

impl Dialect for History {
    type Output = History;
    const NAME: &'static str = "a history expression";
    fn parse(text: &str) -> Result<History, SyntaxError> {
        let mut parser = Parser::new(text)?;
        let mut segments = Vec::new();
        loop {
            let letter = parser.expr()?;
            if !letter.is_boolean() {
                return Err(SyntaxError::Dialect {
                    dialect: Self::NAME,
                    construct: letter.to_string(),
                });
            }
            let star = parser.eat(&Token::Star);
            segments.push(Segment { letter, star });
            if !parser.eat(&Token::Dot) {
                break;
            }
        }
        parser.finish()?;
        Ok(History { segments })
    }
}
