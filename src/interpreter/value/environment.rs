use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// The mapping from identifiers to values for one program run.
///
/// There is exactly one environment per run. Loop bodies, conditional
/// branches and callable blocks all read and write it directly; nothing is
/// scoped or snapshotted.
///
/// # Example
/// ```
/// use relief::interpreter::value::{core::Value, environment::Environment};
///
/// let mut env = Environment::new();
/// assert!(env.is_empty());
///
/// env.bind("x", Value::from(1));
/// env.bind("x", Value::from("one"));
///
/// assert_eq!(env.len(), 1);
/// assert_eq!(env.get("x"), Some(&Value::from("one")));
/// assert_eq!(env.get("y"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Binds `name` to `value`, replacing any earlier value.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
