//! Parser for the textual surface syntax.

mod lexer;
mod parser;

pub use lexer::{LexError, Lexer, Token};
pub use parser::{parse_expr, parse_fact, parse_proposition, parse_template, ParseError};
