//! User-defined classes and their instances.

mod class_object;
mod instance_object;

pub use class_object::{Class, Method};
pub use instance_object::ClassInstance;
