//! Mython: an indentation-sensitive, class-based teaching language.
//!
//! Source flows through [`lexer::Lexer`] into [`parser::Parser`], which builds
//! an [`ast::Program`] that [`interpreter::Interpreter`] walks directly.

pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod token;

pub use interpreter::{Interpreter, MythonError, run_program};
