//! Tokenizer
//!
//! Splits an expression into operators, parentheses, commas, quoted strings
//! and bare words. Tokens carry no source positions; the parser reports token
//! indices instead.

use std::fmt;

/// Operator symbols, with `||`/`&&` already normalized to `OR`/`AND`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Or,
    And,
    /// The `NOT` keyword
    Not,
    /// `!`
    Bang,
    Eq,
    Ne,
    Le,
    Ge,
    Lt,
    Gt,
    /// A lone `=`, which the grammar never accepts
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Or => "OR",
            Symbol::And => "AND",
            Symbol::Not => "NOT",
            Symbol::Bang => "!",
            Symbol::Eq => "==",
            Symbol::Ne => "!=",
            Symbol::Le => "<=",
            Symbol::Ge => ">=",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::Assign => "=",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::Percent => "%",
        }
    }

    fn from_pair(first: char, second: char) -> Option<Symbol> {
        match (first, second) {
            ('|', '|') => Some(Symbol::Or),
            ('&', '&') => Some(Symbol::And),
            ('=', '=') => Some(Symbol::Eq),
            ('!', '=') => Some(Symbol::Ne),
            ('<', '=') => Some(Symbol::Le),
            ('>', '=') => Some(Symbol::Ge),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Symbol> {
        match c {
            '<' => Some(Symbol::Lt),
            '>' => Some(Symbol::Gt),
            '=' => Some(Symbol::Assign),
            '+' => Some(Symbol::Plus),
            '-' => Some(Symbol::Minus),
            '*' => Some(Symbol::Star),
            '/' => Some(Symbol::Slash),
            '%' => Some(Symbol::Percent),
            '!' => Some(Symbol::Bang),
            _ => None,
        }
    }
}

/// Expression token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Op(Symbol),
    LParen,
    RParen,
    Comma,
    /// Quoted literal, quotes removed and `\<quote>` unescaped
    Str(String),
    /// Quoted literal that runs to end of input, raw text including the quote
    Unterminated(String),
    /// Bare identifier, number or other run of characters
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Op(symbol) => f.write_str(symbol.as_str()),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Str(s) => write!(f, "'{}'", s),
            Token::Unterminated(raw) => f.write_str(raw),
            Token::Word(word) => f.write_str(word),
        }
    }
}

/// Expression tokenizer
pub struct Lexer;

impl Lexer {
    /// Tokenize an expression. Never fails: an unterminated quote becomes a
    /// [`Token::Unterminated`].
    pub fn tokenize(input: &str) -> Vec<Token> {
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut word = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' || c == '"' {
                flush_word(&mut word, &mut tokens);
                let (token, next) = read_quoted(&chars, i);
                tokens.push(token);
                i = next;
                continue;
            }

            let single = match c {
                '(' => Some(Token::LParen),
                ')' => Some(Token::RParen),
                ',' => Some(Token::Comma),
                _ => None,
            };
            if let Some(token) = single {
                flush_word(&mut word, &mut tokens);
                tokens.push(token);
                i += 1;
                continue;
            }

            if c == ' ' || c == '\t' {
                flush_word(&mut word, &mut tokens);
                i += 1;
                continue;
            }

            if let Some(symbol) = chars.get(i + 1).and_then(|next| Symbol::from_pair(c, *next)) {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::Op(symbol));
                i += 2;
                continue;
            }

            if let Some(symbol) = Symbol::from_char(c) {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::Op(symbol));
                i += 1;
                continue;
            }

            word.push(c);
            i += 1;
        }

        flush_word(&mut word, &mut tokens);
        tokens
    }
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if word.is_empty() {
        return;
    }
    let token = match word.as_str() {
        "AND" => Token::Op(Symbol::And),
        "OR" => Token::Op(Symbol::Or),
        "NOT" => Token::Op(Symbol::Not),
        _ => Token::Word(word.clone()),
    };
    tokens.push(token);
    word.clear();
}

/// Read a quoted literal starting at `start`; returns the token and the index
/// just past it.
fn read_quoted(chars: &[char], start: usize) -> (Token, usize) {
    let quote = chars[start];
    let mut value = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i];
        if c == quote {
            if chars[i - 1] != '\\' {
                return (Token::Str(value), i + 1);
            }
            // `\<quote>`: drop the backslash already pushed
            value.pop();
        }
        value.push(c);
        i += 1;
    }

    let raw: String = chars[start..].iter().collect();
    (Token::Unterminated(raw), chars.len())
}
