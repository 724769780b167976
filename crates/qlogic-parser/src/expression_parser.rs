//! Expression parser
//!
//! Precedence-climbing parser over the token stream produced by [`Lexer`].
//!
//! Grammar, lowest precedence first:
//! - `Or         := And (OR And)*`
//! - `And        := Not (AND Not)*`
//! - `Not        := (NOT | '!') Not | Comparison`
//! - `Comparison := AddSub (('==' | '!=' | '<' | '>' | '<=' | '>=') AddSub)?`
//! - `AddSub     := MulDiv (('+' | '-') MulDiv)*`
//! - `MulDiv     := Unary (('*' | '/' | '%') Unary)*`
//! - `Unary      := ('-' | '+') Unary | Primary`
//! - `Primary    := '(' Or ')' | Word '(' AddSub (',' AddSub)* ')' | Literal | Variable`
//!
//! Function arguments are parsed at `AddSub` level, so `if(Q1 == 1, 2, 3)`
//! passes `Q1` as the first argument. Stored surveys depend on that boundary.
//! [`ExpressionParser::parse_value`] starts at the same level for piped
//! values: `{Q2 > 3}` yields `Q2`.
//!
//! Every node that can hold another node counts against the nesting limit:
//! groups, calls, prefix operators, comparisons and each link of an operator
//! chain. `1 + 1 + 1` is three levels deep, so the tree the evaluator walks
//! is never deeper than the limit.

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Symbol, Token};
use qlogic_core::ast::{is_keyword, Expression, Operator, UnaryOperator};
use qlogic_core::types::number::parse_leading_float;
use qlogic_core::Value;

/// Default nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How the parser treats input that does not fit the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Runtime mode: recover from every syntax problem and keep going
    #[default]
    Lenient,
    /// Authoring mode: report every recovery as an error
    Strict,
}

/// Expression parser
#[derive(Debug, Clone, Copy)]
pub struct ExpressionParser {
    mode: ParseMode,
    max_depth: usize,
}

impl Default for ExpressionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionParser {
    /// Create a lenient parser
    pub fn new() -> Self {
        Self {
            mode: ParseMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a strict parser
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Self::new()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse an expression string into an AST.
    ///
    /// In lenient mode this only fails with [`ParseError::NestingTooDeep`];
    /// empty input parses to an absent literal.
    pub fn parse(&self, input: &str) -> Result<Expression> {
        let tokens = Lexer::tokenize(input);
        self.parse_tokens(&tokens)
    }

    /// Parse an already tokenized expression
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<Expression> {
        self.parse_from(tokens, Entry::Or)
    }

    /// Parse a piped value. Starts at `AddSub`, so a top-level comparison or
    /// boolean operator ends the value (lenient) or is trailing input
    /// (strict). Parenthesized groups still use the full grammar.
    pub fn parse_value(&self, input: &str) -> Result<Expression> {
        let tokens = Lexer::tokenize(input);
        self.parse_from(&tokens, Entry::AddSub)
    }

    fn parse_from(&self, tokens: &[Token], entry: Entry) -> Result<Expression> {
        if tokens.is_empty() {
            return match self.mode {
                ParseMode::Strict => Err(ParseError::EmptyExpression),
                ParseMode::Lenient => Ok(Expression::literal(Value::Absent)),
            };
        }

        let mut cursor = Cursor {
            tokens,
            pos: 0,
            depth: 0,
            mode: self.mode,
            max_depth: self.max_depth,
        };
        let expr = match entry {
            Entry::Or => cursor.parse_or()?,
            Entry::AddSub => cursor.parse_add_sub()?,
        };

        if let Some(token) = cursor.peek() {
            match self.mode {
                ParseMode::Strict => {
                    return Err(ParseError::TrailingInput {
                        found: token.to_string(),
                        index: cursor.pos,
                    })
                }
                ParseMode::Lenient => log::debug!(
                    "Ignoring {} trailing token(s) from '{}'",
                    tokens.len() - cursor.pos,
                    token
                ),
            }
        }

        Ok(expr)
    }
}

/// Grammar rule a parse starts from
#[derive(Debug, Clone, Copy)]
enum Entry {
    Or,
    AddSub,
}

/// Parse state over one token slice
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    mode: ParseMode,
    max_depth: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_symbol(&self) -> Option<Symbol> {
        match self.peek() {
            Some(Token::Op(symbol)) => Some(*symbol),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Release the levels taken by the links of one operator chain
    fn leave_chain(&mut self, links: usize) {
        self.depth -= links;
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        let mut links = 0;
        while self.peek_symbol() == Some(Symbol::Or) {
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.parse_and()?;
            left = Expression::binary(left, Operator::Or, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_not()?;
        let mut links = 0;
        while self.peek_symbol() == Some(Symbol::And) {
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.parse_not()?;
            left = Expression::binary(left, Operator::And, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression> {
        if matches!(self.peek_symbol(), Some(Symbol::Not | Symbol::Bang)) {
            self.pos += 1;
            self.enter()?;
            let operand = self.parse_not()?;
            self.leave();
            return Ok(Expression::unary(UnaryOperator::Not, operand));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let left = self.parse_add_sub()?;
        let op = match self.peek_symbol() {
            Some(Symbol::Eq) => Operator::Eq,
            Some(Symbol::Ne) => Operator::Ne,
            Some(Symbol::Lt) => Operator::Lt,
            Some(Symbol::Gt) => Operator::Gt,
            Some(Symbol::Le) => Operator::Le,
            Some(Symbol::Ge) => Operator::Ge,
            _ => return Ok(left),
        };
        self.pos += 1;
        self.enter()?;
        let right = self.parse_add_sub()?;
        self.leave();
        Ok(Expression::binary(left, op, right))
    }

    fn parse_add_sub(&mut self) -> Result<Expression> {
        let mut left = self.parse_mul_div()?;
        let mut links = 0;
        loop {
            let op = match self.peek_symbol() {
                Some(Symbol::Plus) => Operator::Add,
                Some(Symbol::Minus) => Operator::Sub,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.parse_mul_div()?;
            left = Expression::binary(left, op, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    fn parse_mul_div(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        let mut links = 0;
        loop {
            let op = match self.peek_symbol() {
                Some(Symbol::Star) => Operator::Mul,
                Some(Symbol::Slash) => Operator::Div,
                Some(Symbol::Percent) => Operator::Mod,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }
        self.leave_chain(links);
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let op = match self.peek_symbol() {
            Some(Symbol::Minus) => UnaryOperator::Negate,
            Some(Symbol::Plus) => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };
        self.pos += 1;
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expression::unary(op, operand))
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let index = self.pos;
        let Some(token) = self.next() else {
            if self.strict() {
                return Err(ParseError::UnexpectedEnd {
                    expected: "operand".to_string(),
                });
            }
            return Ok(Expression::literal(Value::Absent));
        };

        match token {
            Token::LParen => {
                self.enter()?;
                let inner = self.parse_or()?;
                self.leave();
                self.close_paren()?;
                Ok(inner)
            }
            Token::Word(word) if self.peek() == Some(&Token::LParen) => {
                self.pos += 1;
                self.enter()?;
                let args = self.parse_arguments()?;
                self.leave();
                Ok(Expression::function_call(word.to_lowercase(), args))
            }
            Token::Word(word) => Ok(classify_word(word)),
            Token::Str(s) => Ok(Expression::literal(s.as_str())),
            Token::Unterminated(raw) => {
                if self.strict() {
                    return Err(ParseError::UnterminatedString {
                        literal: raw.clone(),
                    });
                }
                Ok(Expression::literal(raw.as_str()))
            }
            Token::Op(_) | Token::RParen | Token::Comma => {
                if self.strict() {
                    return Err(ParseError::UnexpectedToken {
                        found: token.to_string(),
                        index,
                        expected: "operand".to_string(),
                    });
                }
                Ok(Expression::literal(token.to_string()))
            }
        }
    }

    /// Arguments after the opening `(`, consuming the closing `)`
    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut args = Vec::new();

        if !self.strict() {
            while let Some(token) = self.peek() {
                match token {
                    Token::RParen => break,
                    Token::Comma => self.pos += 1,
                    _ => args.push(self.parse_add_sub()?),
                }
            }
            self.close_paren()?;
            return Ok(args);
        }

        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.parse_add_sub()?);
            let index = self.pos;
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => return Ok(args),
                Some(token) => {
                    return Err(ParseError::UnexpectedToken {
                        found: token.to_string(),
                        index,
                        expected: "',' or ')'".to_string(),
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "')'".to_string(),
                    })
                }
            }
        }
    }

    /// Consume a `)`; a missing one is only an error in strict mode
    fn close_paren(&mut self) -> Result<()> {
        match self.peek() {
            Some(Token::RParen) => {
                self.pos += 1;
                Ok(())
            }
            _ if !self.strict() => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.to_string(),
                index: self.pos,
                expected: "')'".to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: "')'".to_string(),
            }),
        }
    }
}

/// Classify a bare word as a literal or a variable reference
fn classify_word(word: &str) -> Expression {
    match word {
        "true" => return Expression::literal(true),
        "false" => return Expression::literal(false),
        "undefined" | "null" => return Expression::literal(Value::Absent),
        _ => {}
    }

    if is_identifier(word) && !is_keyword(word) {
        return Expression::variable(word);
    }

    let number = parse_leading_float(word);
    if number.is_finite() {
        Expression::literal(number)
    } else {
        Expression::literal(word)
    }
}

/// `[A-Za-z][A-Za-z0-9_]*` with an optional `.[A-Za-z][A-Za-z0-9]*` suffix
fn is_identifier(word: &str) -> bool {
    let (base, suffix) = match word.split_once('.') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (word, None),
    };

    let starts_alpha = |s: &str| s.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_alpha(base) || !base.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }

    match suffix {
        None => true,
        Some(suffix) => starts_alpha(suffix) && suffix.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expression {
        ExpressionParser::new().parse(input).unwrap()
    }

    #[test]
    fn test_parse_comparison() {
        let expr = parse("Q1 == 'A2'");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::variable("Q1"),
                Operator::Eq,
                Expression::literal("A2")
            )
        );
    }

    #[test]
    fn test_arithmetic_precedence() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        let expr = parse("1 + 2 * 3");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::literal(1.0),
                Operator::Add,
                Expression::binary(Expression::literal(2.0), Operator::Mul, Expression::literal(3.0))
            )
        );
    }

    #[test]
    fn test_boolean_precedence() {
        // A AND B OR C parses as (A AND B) OR C
        let expr = parse("A AND B OR C");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(Expression::variable("A"), Operator::And, Expression::variable("B")),
                Operator::Or,
                Expression::variable("C")
            )
        );

        // NOT A AND B parses as (NOT A) AND B
        let expr = parse("NOT A AND B");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::unary(UnaryOperator::Not, Expression::variable("A")),
                Operator::And,
                Expression::variable("B")
            )
        );
    }

    #[test]
    fn test_function_call_lowercased() {
        let expr = parse("SUM(Q1, 2 * 3)");
        assert_eq!(
            expr,
            Expression::function_call(
                "sum",
                vec![
                    Expression::variable("Q1"),
                    Expression::binary(Expression::literal(2.0), Operator::Mul, Expression::literal(3.0)),
                ]
            )
        );
    }

    #[test]
    fn test_word_classification() {
        assert_eq!(classify_word("true"), Expression::literal(true));
        assert_eq!(classify_word("null"), Expression::literal(Value::Absent));
        assert_eq!(classify_word("Q1_SQ006.NAOK"), Expression::variable("Q1_SQ006.NAOK"));
        assert_eq!(classify_word("12.5"), Expression::literal(12.5));
        assert_eq!(classify_word("5kg"), Expression::literal(5.0));
        assert_eq!(classify_word("Q1.a.b"), Expression::literal("Q1.a.b"));
        assert_eq!(classify_word("_x"), Expression::literal("_x"));
    }

    #[test]
    fn test_identifier_grammar() {
        assert!(is_identifier("Q1"));
        assert!(is_identifier("Q1_SQ006"));
        assert!(is_identifier("Q1.SelectedValue"));
        assert!(!is_identifier("1Q"));
        assert!(!is_identifier("Q1."));
        assert!(!is_identifier("Q1.S_Q"));
    }

    #[test]
    fn test_lenient_recovery() {
        // Missing close paren
        assert_eq!(parse("(1 + 2"), parse("(1 + 2)"));
        // Trailing tokens are ignored
        assert_eq!(parse("Q1 == 1 2 3"), parse("Q1 == 1"));
        // Operator in operand position becomes a string literal
        assert_eq!(
            parse("Q1 == )"),
            Expression::binary(Expression::variable("Q1"), Operator::Eq, Expression::literal(")"))
        );
        // End of input in operand position is absent
        assert_eq!(
            parse("Q1 =="),
            Expression::binary(
                Expression::variable("Q1"),
                Operator::Eq,
                Expression::literal(Value::Absent)
            )
        );
        assert_eq!(parse(""), Expression::literal(Value::Absent));
    }

    #[test]
    fn test_strict_errors() {
        let strict = ExpressionParser::strict();
        assert_eq!(strict.parse("  "), Err(ParseError::EmptyExpression));
        assert!(matches!(
            strict.parse("(1 + 2"),
            Err(ParseError::UnexpectedEnd { .. })
        ));
        assert_eq!(
            strict.parse("Q1 == 1 2"),
            Err(ParseError::TrailingInput {
                found: "2".to_string(),
                index: 3
            })
        );
        assert!(matches!(
            strict.parse("Q1 = 1"),
            Err(ParseError::TrailingInput { index: 1, .. })
        ));
        assert!(matches!(
            strict.parse("Q1 == 'A2"),
            Err(ParseError::UnterminatedString { .. })
        ));
        assert!(matches!(
            strict.parse("sum(1 2)"),
            Err(ParseError::UnexpectedToken { index: 3, .. })
        ));
        assert!(strict.parse("sum()").is_ok());
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        let parser = ExpressionParser::new().with_max_depth(5);
        assert_eq!(parser.parse(&deep), Err(ParseError::NestingTooDeep { limit: 5 }));
        assert!(ExpressionParser::new().parse(&deep).is_ok());

        let negations = format!("{}1", "-".repeat(200));
        assert!(matches!(
            ExpressionParser::new().parse(&negations),
            Err(ParseError::NestingTooDeep { limit: DEFAULT_MAX_DEPTH })
        ));
    }

    #[test]
    fn test_operator_chains_count_toward_nesting() {
        let parser = ExpressionParser::new().with_max_depth(2);
        assert!(parser.parse("1 + 1 + 1").is_ok());
        assert_eq!(
            parser.parse("1 + 1 + 1 + 1"),
            Err(ParseError::NestingTooDeep { limit: 2 })
        );
        assert!(parser.parse("A OR B OR C").is_ok());
        assert!(parser.parse("A AND B AND C AND D").is_err());
        assert!(parser.parse("2 * 3 * 4 * 5").is_err());

        // A finished chain gives its levels back
        assert!(parser.parse("(1 + 1 + 1) == 3").is_err());
        assert!(parser.parse("1 + 1 == 2 AND 3 == 3").is_ok());
    }

    #[test]
    fn test_long_chain_fails_instead_of_nesting() {
        let chain = vec!["1"; 200_000].join(" + ");
        assert_eq!(
            ExpressionParser::new().parse(&chain),
            Err(ParseError::NestingTooDeep { limit: DEFAULT_MAX_DEPTH })
        );

        let chain = vec!["1"; DEFAULT_MAX_DEPTH].join(" + ");
        assert!(ExpressionParser::new().parse(&chain).is_ok());
    }

    #[test]
    fn test_parse_value_starts_at_add_sub() {
        let parser = ExpressionParser::new();
        assert_eq!(parser.parse_value("Q2 > 3"), Ok(Expression::variable("Q2")));
        assert_eq!(
            parser.parse_value("Q2 + 1 == 6 AND Q1"),
            Ok(Expression::binary(
                Expression::variable("Q2"),
                Operator::Add,
                Expression::literal(1.0)
            ))
        );
        assert_eq!(parser.parse_value("(Q2 > 3)"), parser.parse("Q2 > 3"));
        assert_eq!(parser.parse_value(""), Ok(Expression::literal(Value::Absent)));

        assert!(matches!(
            ExpressionParser::strict().parse_value("Q2 > 3"),
            Err(ParseError::TrailingInput { index: 1, .. })
        ));
    }
}
