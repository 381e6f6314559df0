//! Syntax tree built by the parser and walked by the interpreter.
//!
//! Nodes own their children exclusively and are never mutated after parsing.
//! Class definitions and instantiations share the parsed [`Class`] through an
//! `Rc`, since the class also owns its methods' bodies.

use std::rc::Rc;

use crate::runtime::class::Class;
use crate::runtime::comparators::Comparator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mult,
    Div,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mult => "*",
            Self::Div => "/",
        }
    }

    /// Name of the method a class instance on the left side may define to
    /// overload this operator.
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Add => "__add__",
            Self::Sub => "__sub__",
            Self::Mult => "__mult__",
            Self::Div => "__div__",
        }
    }
}

/// A dotted name such as `x` or `self.position.x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableValue {
    pub dotted_ids: Vec<String>,
}

impl VariableValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            dotted_ids: vec![name.into()],
        }
    }

    pub fn dotted(dotted_ids: Vec<String>) -> Self {
        Self { dotted_ids }
    }
}

#[derive(Debug)]
pub enum Statement {
    Assignment {
        name: String,
        value: Box<Statement>,
    },
    FieldAssignment {
        object: VariableValue,
        field: String,
        value: Box<Statement>,
    },
    VariableValue(VariableValue),
    NumericConst(i64),
    StringConst(String),
    BoolConst(bool),
    NoneConst,
    BinaryOp {
        left: Box<Statement>,
        op: BinaryOperator,
        right: Box<Statement>,
    },
    And {
        left: Box<Statement>,
        right: Box<Statement>,
    },
    Or {
        left: Box<Statement>,
        right: Box<Statement>,
    },
    Not(Box<Statement>),
    Comparison {
        comparator: Comparator,
        left: Box<Statement>,
        right: Box<Statement>,
    },
    Compound(Vec<Statement>),
    IfElse {
        condition: Box<Statement>,
        if_body: Box<Statement>,
        else_body: Option<Box<Statement>>,
    },
    Return(Box<Statement>),
    Print(Vec<Statement>),
    MethodCall {
        object: Box<Statement>,
        method: String,
        args: Vec<Statement>,
    },
    NewInstance {
        class: Rc<Class>,
        args: Vec<Statement>,
    },
    Stringify(Box<Statement>),
    ClassDefinition(Rc<Class>),
}

impl Statement {
    pub fn binary(left: Statement, op: BinaryOperator, right: Statement) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::VariableValue(VariableValue::new(name))
    }

    pub fn assignment(name: impl Into<String>, value: Statement) -> Self {
        Self::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    /// Nodes whose non-None result ends the enclosing compound statement.
    pub(crate) fn propagates_result(&self) -> bool {
        matches!(
            self,
            Self::Return(_) | Self::IfElse { .. } | Self::Compound(_)
        )
    }
}

#[derive(Debug)]
pub struct Program {
    pub statements: Vec<Statement>,
}
