use log::debug;

use crate::ast::{BinaryOperator, Statement, VariableValue};
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::execution::{Closure, Context};
use crate::runtime::object::ObjectHolder;

impl Statement {
    /// Evaluates this node against `closure`, returning its value.
    ///
    /// Execution never mutates the tree; only the closure and the heap
    /// objects reachable from it change.
    pub fn execute(
        &self,
        closure: &mut Closure,
        context: &mut Context<'_>,
    ) -> RuntimeResult<ObjectHolder> {
        match self {
            Statement::Assignment { name, value } => {
                let value = value.execute(closure, context)?;
                closure.insert(name.clone(), value.clone());
                Ok(value)
            }
            Statement::FieldAssignment {
                object,
                field,
                value,
            } => {
                let target = object.resolve(closure)?;
                let instance =
                    target
                        .as_instance()
                        .ok_or_else(|| RuntimeError::NotAnInstance {
                            object: object.dotted_ids.join("."),
                            type_name: target.type_name().to_string(),
                        })?;
                let value = value.execute(closure, context)?;
                instance.set_field(field, value.clone());
                Ok(value)
            }
            Statement::VariableValue(variable) => variable.resolve(closure),
            Statement::NumericConst(value) => Ok(ObjectHolder::number(*value)),
            Statement::StringConst(value) => Ok(ObjectHolder::string(value.clone())),
            Statement::BoolConst(value) => Ok(ObjectHolder::bool(*value)),
            Statement::NoneConst => Ok(ObjectHolder::none()),
            Statement::BinaryOp { left, op, right } => {
                let left = left.execute(closure, context)?;
                let right = right.execute(closure, context)?;
                eval_binary(*op, left, right, context)
            }
            // Both operands are always evaluated: no short-circuiting.
            Statement::And { left, right } => {
                let left = left.execute(closure, context)?;
                let right = right.execute(closure, context)?;
                Ok(ObjectHolder::bool(left.is_true() && right.is_true()))
            }
            Statement::Or { left, right } => {
                let left = left.execute(closure, context)?;
                let right = right.execute(closure, context)?;
                Ok(ObjectHolder::bool(left.is_true() || right.is_true()))
            }
            Statement::Not(operand) => {
                let operand = operand.execute(closure, context)?;
                Ok(ObjectHolder::bool(!operand.is_true()))
            }
            Statement::Comparison {
                comparator,
                left,
                right,
            } => {
                let left = left.execute(closure, context)?;
                let right = right.execute(closure, context)?;
                Ok(ObjectHolder::bool(comparator(&left, &right)?))
            }
            Statement::Compound(statements) => execute_block(statements, closure, context),
            Statement::IfElse {
                condition,
                if_body,
                else_body,
            } => {
                if condition.execute(closure, context)?.is_true() {
                    if_body.execute(closure, context)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, context)
                } else {
                    Ok(ObjectHolder::none())
                }
            }
            Statement::Return(value) => value.execute(closure, context),
            Statement::Print(args) => {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    let value = arg.execute(closure, context)?;
                    rendered.push(value.render(context)?);
                }
                context.write_line(&rendered.join(" "))?;
                Ok(ObjectHolder::none())
            }
            Statement::MethodCall {
                object,
                method,
                args,
            } => {
                let receiver = object.execute(closure, context)?;
                if receiver.as_instance().is_none() {
                    return Err(RuntimeError::NotAnInstance {
                        object: describe(object),
                        type_name: receiver.type_name().to_string(),
                    });
                }
                let args = execute_args(args, closure, context)?;
                receiver.call(method, args, context)
            }
            Statement::NewInstance { class, args } => {
                let instance = ObjectHolder::instance(class.clone());
                let args = execute_args(args, closure, context)?;
                instance.call("__init__", args, context)?;
                Ok(instance)
            }
            Statement::Stringify(value) => {
                let value = value.execute(closure, context)?;
                Ok(ObjectHolder::string(value.render(context)?))
            }
            Statement::ClassDefinition(class) => {
                if closure.contains_key(class.name()) {
                    return Err(RuntimeError::ClassRedefinition {
                        name: class.name().to_string(),
                    });
                }
                debug!("defining class {}", class.name());
                let holder = ObjectHolder::class(class.clone());
                closure.insert(class.name().to_string(), holder.clone());
                Ok(holder)
            }
        }
    }
}

/// Runs `statements` in order. A `Return`, `IfElse` or nested `Compound`
/// that yields a non-None value stops the block and becomes its result.
pub(crate) fn execute_block(
    statements: &[Statement],
    closure: &mut Closure,
    context: &mut Context<'_>,
) -> RuntimeResult<ObjectHolder> {
    for statement in statements {
        let result = statement.execute(closure, context)?;
        if statement.propagates_result() && !result.is_none() {
            return Ok(result);
        }
    }
    Ok(ObjectHolder::none())
}

impl VariableValue {
    /// Looks up the first segment in `closure`, then walks instance fields.
    pub(crate) fn resolve(&self, closure: &Closure) -> RuntimeResult<ObjectHolder> {
        let (first, rest) = self
            .dotted_ids
            .split_first()
            .ok_or_else(|| RuntimeError::UnknownVariable {
                name: String::new(),
            })?;
        let mut current = closure
            .get(first)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable {
                name: first.clone(),
            })?;

        for (depth, field) in rest.iter().enumerate() {
            let path = self.dotted_ids[..=depth].join(".");
            let instance = current
                .as_instance()
                .ok_or_else(|| RuntimeError::NotAnInstance {
                    object: path.clone(),
                    type_name: current.type_name().to_string(),
                })?;
            let next = instance
                .field(field)
                .ok_or_else(|| RuntimeError::UnknownField {
                    object: path,
                    field: field.clone(),
                    type_name: current.type_name().to_string(),
                })?;
            current = next;
        }
        Ok(current)
    }
}

fn execute_args(
    args: &[Statement],
    closure: &mut Closure,
    context: &mut Context<'_>,
) -> RuntimeResult<Vec<ObjectHolder>> {
    args.iter()
        .map(|arg| arg.execute(closure, context))
        .collect()
}

fn eval_binary(
    op: BinaryOperator,
    left: ObjectHolder,
    right: ObjectHolder,
    context: &mut Context<'_>,
) -> RuntimeResult<ObjectHolder> {
    if let (Some(lhs), Some(rhs)) = (left.as_number(), right.as_number()) {
        return eval_numeric(op, lhs, rhs).map(ObjectHolder::number);
    }
    if op == BinaryOperator::Add
        && let (Some(lhs), Some(rhs)) = (left.as_str(), right.as_str())
    {
        return Ok(ObjectHolder::string(format!("{lhs}{rhs}")));
    }
    if let Some(instance) = left.as_instance()
        && instance.has_method(op.method_name(), 1)
    {
        return left.call(op.method_name(), vec![right], context);
    }
    Err(RuntimeError::unsupported(
        op.symbol(),
        left.type_name(),
        right.type_name(),
    ))
}

fn eval_numeric(op: BinaryOperator, lhs: i64, rhs: i64) -> RuntimeResult<i64> {
    let result = match op {
        BinaryOperator::Add => lhs.checked_add(rhs),
        BinaryOperator::Sub => lhs.checked_sub(rhs),
        BinaryOperator::Mult => lhs.checked_mul(rhs),
        BinaryOperator::Div => {
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // Rust integer division truncates toward zero.
            lhs.checked_div(rhs)
        }
    };
    result.ok_or(RuntimeError::IntegerOverflow {
        operation: op.symbol(),
    })
}

/// Best-effort source-like name for a receiver expression in error messages.
fn describe(statement: &Statement) -> String {
    match statement {
        Statement::VariableValue(variable) => variable.dotted_ids.join("."),
        _ => "<expression>".to_string(),
    }
}
