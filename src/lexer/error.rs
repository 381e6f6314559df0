use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unrecognized token at line {line}: '{remainder}'")]
    UnrecognizedToken { remainder: String, line: usize },
    #[error("Tabs are not supported for indentation at line {line}")]
    TabIndentation { line: usize },
    #[error("Invalid integer literal '{literal}' at line {line}")]
    InvalidIntegerLiteral { literal: String, line: usize },
    #[error("Unterminated string literal at line {line}")]
    UnterminatedString { line: usize },
    #[error("Failed to read source at line {line}: {message}")]
    Input { message: String, line: usize },
}

pub type LexResult<T> = Result<T, LexError>;
