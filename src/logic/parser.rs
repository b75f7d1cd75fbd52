use super::*;
use crate::model::Coalition;

/// Recursive-descent parser over the shared token stream.
///
/// ```text
/// expr       := or ( '->' expr )?
/// or         := and ( 'or' and )*
/// and        := unary ( 'and' unary )*
/// unary      := '!' unary | quantifier temporal | '(' expr ')' | prop
/// quantifier := 'E' | 'A' | '<' agents? '>' | '<' '{' agents? '}' ',' number '>'
/// temporal   := ('X' | 'F' | 'G') unary
///             | '(' expr ('U' | 'R') expr ')'
///             | unary ('U' | 'R') unary
/// ```
pub struct Parser {
    tokens: Vec<(usize, Token)>,
    cursor: usize,
}

impl Parser {
    pub fn new(text: &str) -> Result<Self, SyntaxError> {
        Ok(Self {
            tokens: lex(text)?,
            cursor: 0,
        })
    }

    /// Parse the whole input as one formula.
    pub fn formula(mut self) -> Result<Formula, SyntaxError> {
        let formula = self.expr()?;
        self.finish()?;
        Ok(formula)
    }

    pub fn finish(&self) -> Result<(), SyntaxError> {
        match self.tokens.get(self.cursor) {
            None => Ok(()),
            Some((position, token)) => Err(SyntaxError::Unexpected {
                position: *position,
                found: token.to_string(),
                expected: "end of formula",
            }),
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(_, t)| t)
    }
    pub fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).map(|(_, t)| t.clone());
        self.cursor += token.is_some() as usize;
        token
    }
    /// Consume the next token if it equals `token`.
    pub fn eat(&mut self, token: &Token) -> bool {
        match self.peek() == Some(token) {
            true => {
                self.cursor += 1;
                true
            }
            false => false,
        }
    }
    pub fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), SyntaxError> {
        match self.eat(&token) {
            true => Ok(()),
            false => Err(self.unexpected(expected)),
        }
    }
    pub fn unexpected(&self, expected: &'static str) -> SyntaxError {
        match self.tokens.get(self.cursor) {
            Some((position, token)) => SyntaxError::Unexpected {
                position: *position,
                found: token.to_string(),
                expected,
            },
            None => SyntaxError::End { expected },
        }
    }

    pub fn expr(&mut self) -> Result<Formula, SyntaxError> {
        let lhs = self.or()?;
        match self.eat(&Token::Implies) {
            true => Ok(Formula::Implies(Box::new(lhs), Box::new(self.expr()?))),
            false => Ok(lhs),
        }
    }
    fn or(&mut self) -> Result<Formula, SyntaxError> {
        let mut lhs = self.and()?;
        while self.eat(&Token::Or) {
            lhs = Formula::or(lhs, self.and()?);
        }
        Ok(lhs)
    }
    fn and(&mut self) -> Result<Formula, SyntaxError> {
        let mut lhs = self.unary()?;
        while self.eat(&Token::And) {
            lhs = Formula::and(lhs, self.unary()?);
        }
        Ok(lhs)
    }
    fn unary(&mut self) -> Result<Formula, SyntaxError> {
        match self.peek() {
            Some(Token::Not) => {
                self.bump();
                Ok(Formula::not(self.unary()?))
            }
            Some(Token::LParen) => {
                self.bump();
                let inner = self.expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(Token::Prop(_)) => match self.bump() {
                Some(Token::Prop(p)) => Ok(Formula::Atom(p)),
                _ => Err(self.unexpected("a proposition")),
            },
            Some(Token::Upper('E')) => {
                self.bump();
                self.temporal(Quantifier::Exists)
            }
            Some(Token::Upper('A')) => {
                self.bump();
                self.temporal(Quantifier::Forall)
            }
            Some(Token::LAngle) => {
                let quantifier = self.quantifier()?;
                self.temporal(quantifier)
            }
            _ => Err(self.unexpected("a proposition, '!', '(' or a quantifier")),
        }
    }

    fn quantifier(&mut self) -> Result<Quantifier, SyntaxError> {
        self.expect(Token::LAngle, "'<'")?;
        match self.eat(&Token::LBrace) {
            true => {
                let agents = self.agents(&Token::RBrace)?;
                self.expect(Token::RBrace, "'}'")?;
                self.expect(Token::Comma, "',' before the complexity bound")?;
                let bound = match self.bump() {
                    Some(Token::Number(k)) => k,
                    _ => {
                        self.cursor = self.cursor.saturating_sub(1);
                        return Err(self.unexpected("a complexity bound"));
                    }
                };
                self.expect(Token::RAngle, "'>'")?;
                Ok(Quantifier::Natural(agents, bound))
            }
            false => {
                let agents = self.agents(&Token::RAngle)?;
                self.expect(Token::RAngle, "'>'")?;
                Ok(Quantifier::Coalition(agents))
            }
        }
    }
    /// Comma-separated agent numbers up to (not including) `close`.
    fn agents(&mut self, close: &Token) -> Result<Coalition, SyntaxError> {
        let mut agents = Vec::new();
        if self.peek() == Some(close) {
            return Ok(Coalition::empty());
        }
        loop {
            match self.peek() {
                Some(Token::Number(a)) => {
                    agents.push(*a);
                    self.bump();
                }
                _ => return Err(self.unexpected("an agent number")),
            }
            if !self.eat(&Token::Comma) {
                return Ok(Coalition::from(agents));
            }
        }
    }

    fn temporal(&mut self, q: Quantifier) -> Result<Formula, SyntaxError> {
        match self.peek() {
            Some(Token::Upper('X')) => {
                self.bump();
                Ok(Formula::Next(q, Box::new(self.unary()?)))
            }
            Some(Token::Upper('F')) => {
                self.bump();
                Ok(Formula::Finally(q, Box::new(self.unary()?)))
            }
            Some(Token::Upper('G')) => {
                self.bump();
                Ok(Formula::Globally(q, Box::new(self.unary()?)))
            }
            Some(Token::LParen) => {
                self.bump();
                let lhs = self.expr()?;
                match self.binary()? {
                    Some(op) => {
                        let rhs = self.expr()?;
                        self.expect(Token::RParen, "')'")?;
                        Ok(op(q, lhs, rhs))
                    }
                    None => {
                        self.expect(Token::RParen, "'U', 'R' or ')'")?;
                        self.infix(q, lhs)
                    }
                }
            }
            _ => {
                let lhs = self.unary()?;
                self.infix(q, lhs)
            }
        }
    }
    fn infix(&mut self, q: Quantifier, lhs: Formula) -> Result<Formula, SyntaxError> {
        match self.binary()? {
            Some(op) => Ok(op(q, lhs, self.unary()?)),
            None => Err(self.unexpected("'U' or 'R'")),
        }
    }
    fn binary(&mut self) -> Result<Option<Infix>, SyntaxError> {
        match self.peek() {
            Some(Token::Upper('U')) => {
                self.bump();
                Ok(Some(until as Infix))
            }
            Some(Token::Upper('R')) => {
                self.bump();
                Ok(Some(release as Infix))
            }
            _ => Ok(None),
        }
    }
}

type Infix = fn(Quantifier, Formula, Formula) -> Formula;

fn until(q: Quantifier, a: Formula, b: Formula) -> Formula {
    Formula::Until(q, Box::new(a), Box::new(b))
}
fn release(q: Quantifier, a: Formula, b: Formula) -> Formula {
    Formula::Release(q, Box::new(a), Box::new(b))
}

/// Parse any formula without dialect restrictions.
pub fn parse(text: &str) -> Result<Formula, SyntaxError> {
    Parser::new(text)?.formula()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Box<Formula> {
        Box::new(Formula::atom("p"))
    }
    fn q() -> Box<Formula> {
        Box::new(Formula::atom("q"))
    }

    #[test]
    fn precedence() {
        let f = parse("!p and q or p -> q").expect("parses");
        assert_eq!(f.to_string(), "!p and q or p -> q");
        assert_eq!(
            f,
            Formula::Implies(
                Box::new(Formula::or(
                    Formula::and(Formula::not(Formula::atom("p")), Formula::atom("q")),
                    Formula::atom("p"),
                )),
                q(),
            )
        );
    }

    #[test]
    fn ctl_operators() {
        assert_eq!(parse("EX p"), Ok(Formula::Next(Quantifier::Exists, p())));
        assert_eq!(parse("AGp"), Ok(Formula::Globally(Quantifier::Forall, p())));
        assert_eq!(parse("E(p U q)"), Ok(Formula::Until(Quantifier::Exists, p(), q())));
        assert_eq!(parse("A(p R q)"), Ok(Formula::Release(Quantifier::Forall, p(), q())));
        assert_eq!(
            parse("AF AG p").map(|f| f.to_string()),
            Ok("AF AG p".to_string())
        );
    }

    #[test]
    fn strategic_quantifiers() {
        let coalition = Coalition::from(vec![1, 2]);
        assert_eq!(
            parse("<1,2>F p"),
            Ok(Formula::Finally(Quantifier::Coalition(coalition.clone()), p()))
        );
        assert_eq!(
            parse("<1,2>pUq"),
            Ok(Formula::Until(Quantifier::Coalition(coalition.clone()), p(), q()))
        );
        assert_eq!(
            parse("<1,2>(p) U q"),
            Ok(Formula::Until(Quantifier::Coalition(coalition.clone()), p(), q()))
        );
        assert_eq!(
            parse("<{2,1}, 3> G p"),
            Ok(Formula::Globally(Quantifier::Natural(coalition, 3), p()))
        );
        assert_eq!(
            parse("<>X p"),
            Ok(Formula::Next(Quantifier::Coalition(Coalition::empty()), p()))
        );
    }

    #[test]
    fn round_trip_text() {
        for text in ["<{1},2>F p", "<1>(p U q)", "E(p and q U !q)", "!<{1,2},4>G(p or q)"] {
            let f = parse(text).expect("parses");
            assert_eq!(parse(&f.to_string()), Ok(f), "{}", text);
        }
    }

    #[test]
    fn errors() {
        assert_eq!(parse("p and"), Err(SyntaxError::End {
            expected: "a proposition, '!', '(' or a quantifier"
        }));
        assert!(matches!(parse("p q"), Err(SyntaxError::Unexpected { position: 2, .. })));
        assert!(matches!(parse("EY p"), Err(SyntaxError::Unexpected { .. })));
        assert!(matches!(parse("<{1},>F p"), Err(SyntaxError::Unexpected { .. })));
        assert!(matches!(parse("(p"), Err(SyntaxError::End { .. })));
    }
}
