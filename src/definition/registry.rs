//! Named callbacks for definition documents.

use crate::core::{Callback, Flow, Step};
use std::collections::HashMap;

/// Lookup table from callback name to callback.
///
/// A definition document cannot carry closures, so it names them instead.
/// A document value counts as a function exactly when it is a string naming
/// an entry of this registry.
///
/// # Example
///
/// ```rust
/// use waypoint::definition::CallbackRegistry;
///
/// let registry = CallbackRegistry::<i64>::new()
///     .with("log", |step| println!("{} -> {:?}", step.from, step.to))
///     .with("deny", |_| false);
///
/// assert!(registry.contains("log"));
/// assert!(!registry.contains("missing"));
/// ```
pub struct CallbackRegistry<E> {
    callbacks: HashMap<String, Callback<E>>,
}

impl<E: 'static> CallbackRegistry<E> {
    /// Register a closure under `name`, consuming and returning the registry.
    pub fn with<F, R>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.register(name, callback);
        self
    }

    /// Register a closure under `name`, returning any callback it replaces.
    pub fn register<F, R>(&mut self, name: impl Into<String>, callback: F) -> Option<Callback<E>>
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.insert(name, Callback::new(callback))
    }
}

impl<E> CallbackRegistry<E> {
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        callback: Callback<E>,
    ) -> Option<Callback<E>> {
        self.callbacks.insert(name.into(), callback)
    }

    pub fn get(&self, name: &str) -> Option<&Callback<E>> {
        self.callbacks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for CallbackRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
