use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Statement;

const INIT_METHOD: &str = "__init__";

/// A method as declared in source: the implicit `self` is not part of
/// `formal_params`.
#[derive(Debug)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Statement,
}

/// Runtime representation of a Mython class.
///
/// The method table is flattened at construction: inherited methods are
/// copied in first and the class's own methods shadow them, so lookups never
/// walk the parent chain.
#[derive(Debug)]
pub struct Class {
    name: String,
    methods: HashMap<String, Rc<Method>>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new(name: String, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        let mut table = parent
            .as_ref()
            .map(|parent| parent.methods.clone())
            .unwrap_or_default();
        for method in methods {
            table.insert(method.name.clone(), Rc::new(method));
        }
        if !table.contains_key(INIT_METHOD) {
            table.insert(
                INIT_METHOD.to_string(),
                Rc::new(Method {
                    name: INIT_METHOD.to_string(),
                    formal_params: Vec::new(),
                    body: Statement::NoneConst,
                }),
            );
        }
        Self {
            name,
            methods: table,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    pub fn method(&self, name: &str) -> Option<&Rc<Method>> {
        self.methods.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: &[&str], value: i64) -> Method {
        Method {
            name: name.to_string(),
            formal_params: params.iter().map(|param| param.to_string()).collect(),
            body: Statement::Return(Box::new(Statement::NumericConst(value))),
        }
    }

    #[test]
    fn synthesizes_zero_argument_init() {
        let class = Class::new("Empty".to_string(), Vec::new(), None);
        let init = class.method("__init__").expect("__init__ should exist");
        assert!(init.formal_params.is_empty());
        assert!(matches!(init.body, Statement::NoneConst));
    }

    #[test]
    fn own_methods_shadow_inherited_ones() {
        let base = Rc::new(Class::new(
            "Base".to_string(),
            vec![method("name", &[], 1), method("only_base", &["x"], 2)],
            None,
        ));
        let derived = Class::new(
            "Derived".to_string(),
            vec![method("name", &[], 3)],
            Some(base.clone()),
        );

        let own = derived.method("name").expect("name");
        assert!(matches!(
            own.body,
            Statement::Return(ref value) if matches!(**value, Statement::NumericConst(3))
        ));
        let inherited = derived.method("only_base").expect("only_base");
        assert!(Rc::ptr_eq(
            inherited,
            base.method("only_base").expect("base method")
        ));
        assert!(derived.method("missing").is_none());
        assert_eq!(derived.parent().map(|parent| parent.name()), Some("Base"));
    }

    #[test]
    fn inherited_init_is_not_replaced_by_synthesized_one() {
        let base = Rc::new(Class::new(
            "Base".to_string(),
            vec![method("__init__", &["value"], 0)],
            None,
        ));
        let derived = Class::new("Derived".to_string(), Vec::new(), Some(base));
        let init = derived.method("__init__").expect("__init__");
        assert_eq!(init.formal_params, vec!["value".to_string()]);
    }
}
