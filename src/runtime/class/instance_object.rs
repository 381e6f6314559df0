use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::class::Class;
use crate::runtime::execution::Closure;
use crate::runtime::object::ObjectHolder;

/// Runtime representation of a class instance with per-instance fields.
#[derive(Debug)]
pub struct ClassInstance {
    class: Rc<Class>,
    fields: RefCell<Closure>,
}

impl ClassInstance {
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            fields: RefCell::new(Closure::new()),
        }
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    /// True only when `method` exists and declares exactly `argument_count`
    /// parameters besides `self`.
    pub fn has_method(&self, method: &str, argument_count: usize) -> bool {
        self.class
            .method(method)
            .is_some_and(|method| method.formal_params.len() == argument_count)
    }

    pub fn field(&self, name: &str) -> Option<ObjectHolder> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: ObjectHolder) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::runtime::class::Method;

    #[test]
    fn has_method_checks_name_and_arity() {
        let class = Rc::new(Class::new(
            "Counter".to_string(),
            vec![Method {
                name: "add".to_string(),
                formal_params: vec!["amount".to_string()],
                body: Statement::NoneConst,
            }],
            None,
        ));
        let instance = ClassInstance::new(class);
        assert!(instance.has_method("add", 1));
        assert!(!instance.has_method("add", 0));
        assert!(!instance.has_method("sub", 1));
        assert!(instance.has_method("__init__", 0));
    }

    #[test]
    fn fields_start_empty_and_are_overwritten() {
        let class = Rc::new(Class::new("Empty".to_string(), Vec::new(), None));
        let instance = ClassInstance::new(class);
        assert!(instance.field("x").is_none());

        instance.set_field("x", ObjectHolder::number(1));
        instance.set_field("x", ObjectHolder::string("one"));
        let x = instance.field("x").expect("x");
        assert_eq!(x.as_str(), Some("one"));
        assert!(instance.field("y").is_none());
    }
}
