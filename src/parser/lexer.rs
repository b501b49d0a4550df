//! Lexer for predicate expressions, nested expressions and propositional formulas.

use thiserror::Error;

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Names, arguments and propositional symbols alike; classification
    /// happens in the parser.
    Identifier(String),

    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Comma,    // ,

    // Logic operators (ASCII and Unicode)
    Not,     // ~ ¬ !
    And,     // ^ & ∧
    Or,      // | ∨
    Implies, // -> →
    Iff,     // <-> ↔

    // End of input
    Eof,
}

/// Lexer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    token_start: (usize, usize),
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            token_start: (1, 1),
        }
    }

    /// Line and column where the most recently lexed token starts.
    pub fn location(&self) -> (usize, usize) {
        self.token_start
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = (self.line, self.column);

        let Some(ch) = self.peek_char() else {
            return Ok(Token::Eof);
        };
        let remaining = &self.input[self.position..];

        let (token, width) = match ch {
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            '[' => (Token::LBracket, 1),
            ']' => (Token::RBracket, 1),
            ',' => (Token::Comma, 1),
            '~' | '!' => (Token::Not, 1),
            '^' | '&' => (Token::And, 1),
            '|' => (Token::Or, 1),
            '¬' => (Token::Not, ch.len_utf8()),
            '∧' => (Token::And, ch.len_utf8()),
            '∨' => (Token::Or, ch.len_utf8()),
            '→' => (Token::Implies, ch.len_utf8()),
            '↔' => (Token::Iff, ch.len_utf8()),
            '-' if remaining.starts_with("->") => (Token::Implies, 2),
            '<' if remaining.starts_with("<->") => (Token::Iff, 3),
            c if c.is_alphanumeric() || c == '_' => return Ok(self.lex_identifier()),
            _ => {
                return Err(LexError {
                    message: format!("unexpected character: '{}'", ch),
                    line: self.line,
                    column: self.column,
                })
            }
        };

        self.advance(width);
        Ok(token)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        let consumed = &self.input[self.position..self.position + bytes];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += bytes;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance(ch.len_utf8());
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
        Token::Identifier(self.input[start..self.position].to_string())
    }
}
