//! Runtime object model: values, classes, comparison operators and the
//! per-run execution state the tree walker threads through every node.
pub mod class;
pub mod comparators;
pub mod error;
pub mod execution;
pub mod object;

pub use error::{RuntimeError, RuntimeResult};
pub use execution::{Closure, Context};
pub use object::{Object, ObjectHolder};
