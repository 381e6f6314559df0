//! Comparison operators, chosen by the parser and stored in comparison nodes.
//!
//! Only number/number and string/string pairs are comparable.

use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::object::ObjectHolder;

pub type Comparator = fn(&ObjectHolder, &ObjectHolder) -> RuntimeResult<bool>;

pub fn equal(lhs: &ObjectHolder, rhs: &ObjectHolder) -> RuntimeResult<bool> {
    if let (Some(lhs), Some(rhs)) = (lhs.as_number(), rhs.as_number()) {
        return Ok(lhs == rhs);
    }
    if let (Some(lhs), Some(rhs)) = (lhs.as_str(), rhs.as_str()) {
        return Ok(lhs == rhs);
    }
    Err(RuntimeError::unsupported(
        "==",
        lhs.type_name(),
        rhs.type_name(),
    ))
}

pub fn less(lhs: &ObjectHolder, rhs: &ObjectHolder) -> RuntimeResult<bool> {
    if let (Some(lhs), Some(rhs)) = (lhs.as_number(), rhs.as_number()) {
        return Ok(lhs < rhs);
    }
    if let (Some(lhs), Some(rhs)) = (lhs.as_str(), rhs.as_str()) {
        return Ok(lhs < rhs);
    }
    Err(RuntimeError::unsupported(
        "<",
        lhs.type_name(),
        rhs.type_name(),
    ))
}

pub fn not_equal(lhs: &ObjectHolder, rhs: &ObjectHolder) -> RuntimeResult<bool> {
    Ok(!equal(lhs, rhs)?)
}

pub fn greater(lhs: &ObjectHolder, rhs: &ObjectHolder) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs)? && !equal(lhs, rhs)?)
}

pub fn less_or_equal(lhs: &ObjectHolder, rhs: &ObjectHolder) -> RuntimeResult<bool> {
    Ok(less(lhs, rhs)? || equal(lhs, rhs)?)
}

pub fn greater_or_equal(lhs: &ObjectHolder, rhs: &ObjectHolder) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs)?)
}
