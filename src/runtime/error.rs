use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Unknown variable '{name}'")]
    UnknownVariable { name: String },
    #[error("Object '{object}' of type {type_name} has no field '{field}'")]
    UnknownField {
        object: String,
        field: String,
        type_name: String,
    },
    #[error("'{object}' is {type_name}, not a class instance")]
    NotAnInstance { object: String, type_name: String },
    #[error("Method {class}.{method} taking {arity} argument(s) doesn't exist")]
    MethodNotFound {
        class: String,
        method: String,
        arity: usize,
    },
    #[error("Unsupported operand types for {operation}: {left} and {right}")]
    UnsupportedOperands {
        operation: &'static str,
        left: String,
        right: String,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },
    #[error("Class '{name}' is already defined")]
    ClassRedefinition { name: String },
    #[error("Failed to write program output: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub(crate) fn unsupported(operation: &'static str, left: &str, right: &str) -> Self {
        Self::UnsupportedOperands {
            operation,
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
