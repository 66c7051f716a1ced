//! Defines the [`Value`] enum, representing any data a template can be
//! instantiated with.

mod from;
#[cfg(feature = "serde")]
mod ser;

pub use std::collections::BTreeMap as Map;
pub use std::vec::Vec as List;

#[cfg(feature = "serde")]
pub use crate::value::ser::to_value;
use crate::Mixin;

/// Context data represented as a recursive enum.
///
/// The [`Mixin`] variant holds a sub-template handle; the engine expects
/// mixins to live in a map under the reserved `mixins` context key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    Map(Map<String, Value>),
    Mixin(Mixin),
}
