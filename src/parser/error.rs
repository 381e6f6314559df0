use thiserror::Error;

use crate::lexer::LexError;
use crate::token::Token;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Expected {expected}, got {found} at line {line}")]
    UnexpectedToken {
        expected: String,
        found: Token,
        line: usize,
    },
    #[error("Base class {base} not found for class {class} at line {line}")]
    UnknownBaseClass {
        base: String,
        class: String,
        line: usize,
    },
    #[error("Class {name} already exists at line {line}")]
    DuplicateClass { name: String, line: usize },
    #[error("Mython has no free functions: unknown call to {name}() at line {line}")]
    FreeFunction { name: String, line: usize },
    #[error("Function str takes exactly one argument, got {count} at line {line}")]
    StrArity { count: usize, line: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;
