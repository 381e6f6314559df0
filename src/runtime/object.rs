use std::rc::Rc;

use log::trace;

use crate::runtime::class::{Class, ClassInstance};
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::execution::{Closure, Context};

/// Heap value referenced through an [`ObjectHolder`].
#[derive(Debug)]
pub enum Object {
    Number(i64),
    String(String),
    Bool(bool),
    Class(Rc<Class>),
    Instance(ClassInstance),
}

/// Shared handle to a heap [`Object`], or to nothing (Mython's `None`).
///
/// Cloning a holder aliases the object: a field assigned through one clone is
/// visible through every other.
#[derive(Debug, Clone, Default)]
pub struct ObjectHolder(Option<Rc<Object>>);

impl ObjectHolder {
    pub fn own(object: Object) -> Self {
        Self(Some(Rc::new(object)))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn number(value: i64) -> Self {
        Self::own(Object::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::own(Object::String(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::own(Object::Bool(value))
    }

    pub fn class(class: Rc<Class>) -> Self {
        Self::own(Object::Class(class))
    }

    pub fn instance(class: Rc<Class>) -> Self {
        Self::own(Object::Instance(ClassInstance::new(class)))
    }

    pub fn get(&self) -> Option<&Object> {
        self.0.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_number(&self) -> Option<i64> {
        match self.get() {
            Some(Object::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.get() {
            Some(Object::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.get() {
            Some(Object::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Rc<Class>> {
        match self.get() {
            Some(Object::Class(class)) => Some(class),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&ClassInstance> {
        match self.get() {
            Some(Object::Instance(instance)) => Some(instance),
            _ => None,
        }
    }

    /// True when both holders reference the same heap object.
    pub fn ptr_eq(&self, other: &ObjectHolder) -> bool {
        match (&self.0, &other.0) {
            (Some(lhs), Some(rhs)) => Rc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &str {
        match self.get() {
            None => "NoneType",
            Some(Object::Number(_)) => "int",
            Some(Object::String(_)) => "str",
            Some(Object::Bool(_)) => "bool",
            Some(Object::Class(_)) => "class",
            Some(Object::Instance(instance)) => instance.class().name(),
        }
    }

    pub fn is_true(&self) -> bool {
        match self.get() {
            None => false,
            Some(Object::Number(value)) => *value != 0,
            Some(Object::String(value)) => !value.is_empty(),
            Some(Object::Bool(value)) => *value,
            Some(Object::Class(_)) | Some(Object::Instance(_)) => true,
        }
    }

    /// Textual form used by `print` and `str()`.
    ///
    /// Instances defining a zero-argument `__str__` render through it, which
    /// may execute arbitrary method code.
    pub fn render(&self, context: &mut Context<'_>) -> RuntimeResult<String> {
        let Some(object) = &self.0 else {
            return Ok("None".to_string());
        };
        match object.as_ref() {
            Object::Number(value) => Ok(value.to_string()),
            Object::String(value) => Ok(value.clone()),
            Object::Bool(true) => Ok("True".to_string()),
            Object::Bool(false) => Ok("False".to_string()),
            Object::Class(class) => Ok(format!("Class {}", class.name())),
            Object::Instance(instance) => {
                if instance.has_method("__str__", 0) {
                    self.call("__str__", Vec::new(), context)?.render(context)
                } else {
                    Ok(format!(
                        "<{} object at {:p}>",
                        instance.class().name(),
                        Rc::as_ptr(object)
                    ))
                }
            }
        }
    }

    /// Invokes `method` on the class instance this holder references.
    ///
    /// The body runs in a fresh closure holding `self` and the formal
    /// parameters bound positionally to `args`.
    pub fn call(
        &self,
        method: &str,
        args: Vec<ObjectHolder>,
        context: &mut Context<'_>,
    ) -> RuntimeResult<ObjectHolder> {
        let instance = self
            .as_instance()
            .ok_or_else(|| RuntimeError::NotAnInstance {
                object: "self".to_string(),
                type_name: self.type_name().to_string(),
            })?;
        let not_found = || RuntimeError::MethodNotFound {
            class: instance.class().name().to_string(),
            method: method.to_string(),
            arity: args.len(),
        };
        if !instance.has_method(method, args.len()) {
            return Err(not_found());
        }
        let target = instance
            .class()
            .method(method)
            .cloned()
            .ok_or_else(not_found)?;
        trace!("calling {}.{}", instance.class().name(), method);

        let mut closure = Closure::with_capacity(args.len() + 1);
        closure.insert("self".to_string(), self.clone());
        for (param, arg) in target.formal_params.iter().zip(args) {
            closure.insert(param.clone(), arg);
        }
        target.body.execute(&mut closure, context)
    }
}
