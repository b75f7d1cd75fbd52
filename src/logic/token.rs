use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    LAngle,
    RAngle,
    LBrace,
    RBrace,
    Comma,
    Not,
    And,
    Or,
    Implies,
    Dot,
    Star,
    Number(usize),
    Prop(String),
    /// A single uppercase operator letter: `E`, `A`, `X`, `F`, `G`, `U`, `R`.
    Upper(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LAngle => write!(f, "<"),
            Self::RAngle => write!(f, ">"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Not => write!(f, "!"),
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
            Self::Implies => write!(f, "->"),
            Self::Dot => write!(f, "."),
            Self::Star => write!(f, "*"),
            Self::Number(n) => write!(f, "{}", n),
            Self::Prop(p) => write!(f, "{}", p),
            Self::Upper(c) => write!(f, "{}", c),
        }
    }
}

/// Split formula text into positioned tokens.
///
/// Propositions are lowercase words; `not`, `and`, `or` and `implies`
/// are reserved. Uppercase letters are operators, one token per letter,
/// so `AG` and `A G` lex the same.
pub fn lex(text: &str) -> Result<Vec<(usize, Token)>, SyntaxError> {
    let chars = text.char_indices().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut i = 0;
    while let Some(&(position, c)) = chars.get(i) {
        let next = chars.get(i + 1).map(|(_, c)| *c);
        let (token, width) = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            '<' => (Token::LAngle, 1),
            '>' => (Token::RAngle, 1),
            '{' => (Token::LBrace, 1),
            '}' => (Token::RBrace, 1),
            ',' => (Token::Comma, 1),
            '.' => (Token::Dot, 1),
            '*' => (Token::Star, 1),
            '!' => (Token::Not, 1),
            '&' if next == Some('&') => (Token::And, 2),
            '&' => (Token::And, 1),
            '|' if next == Some('|') => (Token::Or, 2),
            '|' => (Token::Or, 1),
            '-' if next == Some('>') => (Token::Implies, 2),
            c if c.is_ascii_uppercase() => (Token::Upper(c), 1),
            c if c.is_ascii_digit() => {
                let digits = chars[i..]
                    .iter()
                    .take_while(|(_, c)| c.is_ascii_digit())
                    .map(|(_, c)| *c)
                    .collect::<String>();
                let n = digits.parse().map_err(|_| SyntaxError::Unexpected {
                    position,
                    found: digits.clone(),
                    expected: "a number",
                })?;
                (Token::Number(n), digits.len())
            }
            c if c.is_ascii_lowercase() => {
                let word = chars[i..]
                    .iter()
                    .take_while(|(_, c)| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
                    .map(|(_, c)| *c)
                    .collect::<String>();
                let width = word.len();
                let token = match word.as_str() {
                    "not" => Token::Not,
                    "and" => Token::And,
                    "or" => Token::Or,
                    "implies" => Token::Implies,
                    _ => Token::Prop(word),
                };
                (token, width)
            }
            c => {
                return Err(SyntaxError::Unexpected {
                    position,
                    found: c.to_string(),
                    expected: "a formula symbol",
                });
            }
        };
        tokens.push((position, token));
        i += width;
    }
    Ok(tokens)
}

/// Whether `word` reads back as exactly one proposition.
pub fn is_proposition(word: &str) -> bool {
    matches!(lex(word).as_deref(), Ok([(_, Token::Prop(p))]) if p == word)
}
