//! Recursive-descent parser for predicates, nested expressions and propositions.

use thiserror::Error;

use super::lexer::{LexError, Lexer, Token};
use crate::propositional::Prop;
use crate::syntax::{Arg, Predicate};
use crate::unify::general::Expr;

/// Parse error naming the offending input and the position of the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message} in `{input}`")]
pub struct ParseError {
    pub message: String,
    pub input: String,
    pub line: usize,
    pub column: usize,
}

/// How bare argument tokens are tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgMode {
    /// Every argument is a constant.
    Ground,
    /// Lowercase-initial arguments are variables.
    Template,
}

/// Parser state.
struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token().map_err(|e| lex_error(input, e))?;
        let (line, column) = lexer.location();
        Ok(Parser {
            input,
            lexer,
            current,
            line,
            column,
        })
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self
            .lexer
            .next_token()
            .map_err(|e| lex_error(self.input, e))?;
        let old = std::mem::replace(&mut self.current, next);
        let (line, column) = self.lexer.location();
        self.line = line;
        self.column = column;
        Ok(old)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!("expected {:?}, found {:?}", expected, self.current)))
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if self.current == Token::Eof {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing {:?}", self.current)))
        }
    }

    fn identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match &self.current {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(name)
            }
            other => Err(self.error(format!("expected {}, found {:?}", what, other))),
        }
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            input: self.input.to_string(),
            line: self.line,
            column: self.column,
        }
    }
}

fn lex_error(input: &str, e: LexError) -> ParseError {
    ParseError {
        message: e.message,
        input: input.to_string(),
        line: e.line,
        column: e.column,
    }
}

/// Parse a ground fact such as `Owns(A, t1)`. Every argument is a constant.
pub fn parse_fact(source: &str) -> Result<Predicate, ParseError> {
    parse_predicate(source, ArgMode::Ground)
}

/// Parse a rule template such as `Sells(Robert, x, A)`.
///
/// Arguments starting with a lowercase letter are variables.
pub fn parse_template(source: &str) -> Result<Predicate, ParseError> {
    parse_predicate(source, ArgMode::Template)
}

fn parse_predicate(source: &str, mode: ArgMode) -> Result<Predicate, ParseError> {
    let mut parser = Parser::new(source)?;
    if parser.current == Token::Eof {
        return Err(parser.error("empty predicate expression".to_string()));
    }
    let name = parser.identifier("predicate name")?;
    let mut args = Vec::new();

    if parser.current == Token::LParen {
        parser.advance()?;
        if parser.current != Token::RParen {
            loop {
                if parser.current == Token::LParen || parser.current == Token::LBracket {
                    return Err(parser.error("nested compound arguments are not supported".to_string()));
                }
                let token = parser.identifier("argument")?;
                if parser.current == Token::LParen {
                    return Err(parser.error(format!(
                        "nested compound argument `{}(...)` is not supported",
                        token
                    )));
                }
                args.push(match mode {
                    ArgMode::Ground => Arg::constant(token),
                    ArgMode::Template => Arg::from_token(&token),
                });
                if parser.current == Token::Comma {
                    parser.advance()?;
                } else {
                    break;
                }
            }
        }
        parser.expect(Token::RParen)?;
    }

    parser.expect_eof()?;
    Ok(Predicate::new(name, args))
}

/// Parse a propositional formula.
///
/// Operators, loosest first: `<->`, `->` (right-associative), `v`/`|`,
/// `^`/`&`, `~`. Unicode `↔ → ∨ ∧ ¬` are accepted too. A bare `v` in
/// operator position is disjunction, as in `Q v R`.
pub fn parse_proposition(source: &str) -> Result<Prop, ParseError> {
    let mut parser = Parser::new(source)?;
    let prop = parse_iff(&mut parser)?;
    parser.expect_eof()?;
    Ok(prop)
}

fn parse_iff(parser: &mut Parser) -> Result<Prop, ParseError> {
    let mut left = parse_implies(parser)?;
    while parser.current == Token::Iff {
        parser.advance()?;
        let right = parse_implies(parser)?;
        left = Prop::iff(left, right);
    }
    Ok(left)
}

fn parse_implies(parser: &mut Parser) -> Result<Prop, ParseError> {
    let left = parse_or(parser)?;
    if parser.current == Token::Implies {
        parser.advance()?;
        let right = parse_implies(parser)?;
        return Ok(Prop::implies(left, right));
    }
    Ok(left)
}

fn is_or(token: &Token) -> bool {
    match token {
        Token::Or => true,
        Token::Identifier(s) => s == "v",
        _ => false,
    }
}

fn parse_or(parser: &mut Parser) -> Result<Prop, ParseError> {
    let mut left = parse_and(parser)?;
    while is_or(&parser.current) {
        parser.advance()?;
        let right = parse_and(parser)?;
        left = Prop::or(left, right);
    }
    Ok(left)
}

fn parse_and(parser: &mut Parser) -> Result<Prop, ParseError> {
    let mut left = parse_unary(parser)?;
    while parser.current == Token::And {
        parser.advance()?;
        let right = parse_unary(parser)?;
        left = Prop::and(left, right);
    }
    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Prop, ParseError> {
    match &parser.current {
        Token::Not => {
            parser.advance()?;
            Ok(Prop::negation(parse_unary(parser)?))
        }
        Token::LParen => {
            parser.advance()?;
            let inner = parse_iff(parser)?;
            parser.expect(Token::RParen)?;
            Ok(inner)
        }
        Token::Identifier(_) => Ok(Prop::symbol(parser.identifier("symbol")?)),
        other => Err(parser.error(format!("expected a proposition, found {:?}", other))),
    }
}

/// Parse a nested expression such as `[f, X, [g, Y]]`.
///
/// The head of a list is a functor constant; other lowercase-initial atoms
/// are variables.
pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(source)?;
    let expr = parse_expr_inner(&mut parser, false)?;
    parser.expect_eof()?;
    Ok(expr)
}

fn parse_expr_inner(parser: &mut Parser, head: bool) -> Result<Expr, ParseError> {
    match &parser.current {
        Token::LBracket => {
            parser.advance()?;
            let mut items = Vec::new();
            if parser.current != Token::RBracket {
                loop {
                    items.push(parse_expr_inner(parser, items.is_empty())?);
                    if parser.current == Token::Comma {
                        parser.advance()?;
                    } else {
                        break;
                    }
                }
            }
            parser.expect(Token::RBracket)?;
            Ok(Expr::List(items))
        }
        Token::Identifier(_) => {
            let name = parser.identifier("atom")?;
            if !head && name.chars().next().is_some_and(|c| c.is_lowercase()) {
                Ok(Expr::var(name))
            } else {
                Ok(Expr::constant(name))
            }
        }
        other => Err(parser.error(format!("expected an expression, found {:?}", other))),
    }
}
