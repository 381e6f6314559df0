use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::runtime::RuntimeError;

/// Any failure of a full lex, parse and run pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MythonError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<ParseError> for MythonError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Lex(error) => Self::Lex(error),
            error => Self::Parse(error),
        }
    }
}
