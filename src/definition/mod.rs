//! Validated machine definitions.
//!
//! A [`Definition`] is the immutable description a machine runs against:
//! its initial state, the ordered transition table and the callbacks.
//! It is validated once when it is built and never changes afterwards,
//! so many machines may share one definition behind an `Arc`.
//!
//! Definitions come from two front-ends that enforce the same rules:
//! - [`Definition::builder`] for Rust callers
//! - [`Definition::from_value`] / [`Definition::from_json`] for documents
//!   whose callbacks are named in a [`CallbackRegistry`]

mod document;
pub mod error;
mod registry;

pub use document::Violations;
pub use error::ConfigError;
pub use registry::CallbackRegistry;

use crate::builder::DefinitionBuilder;
use crate::core::{CallbackSet, TransitionRule};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Immutable, validated machine definition.
#[derive(Debug)]
pub struct Definition<E> {
    initial: String,
    transitions: Vec<TransitionRule<E>>,
    callbacks: CallbackSet<E>,
}

impl<E> Definition<E> {
    /// Start building a definition in code.
    pub fn builder() -> DefinitionBuilder<E> {
        DefinitionBuilder::new()
    }

    pub(crate) fn from_parts(
        initial: String,
        transitions: Vec<TransitionRule<E>>,
        callbacks: CallbackSet<E>,
    ) -> Self {
        debug!(
            initial = %initial,
            rules = transitions.len(),
            "validated machine definition"
        );
        Self {
            initial,
            transitions,
            callbacks,
        }
    }

    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Transition rules in declaration order.
    pub fn transitions(&self) -> &[TransitionRule<E>] {
        &self.transitions
    }

    pub fn callbacks(&self) -> &CallbackSet<E> {
        &self.callbacks
    }
}

impl<E: PartialEq> Definition<E> {
    /// Resolve the target state for `event` while in `current`.
    ///
    /// Every rule is scanned in declaration order and the last match wins,
    /// so a later rule overrides an earlier one for the same state and
    /// event. Returns `None` when no rule matches.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waypoint::core::TransitionRule;
    /// use waypoint::definition::Definition;
    ///
    /// let definition = Definition::builder()
    ///     .initial("a")
    ///     .transition(TransitionRule::new("a").on([1]).to("b"))
    ///     .transition(TransitionRule::new("a"))
    ///     .build()
    ///     .unwrap();
    ///
    /// // The later wildcard stay rule overrides the specific rule.
    /// assert_eq!(definition.resolve("a", &1), Some("a"));
    /// assert_eq!(definition.resolve("b", &1), None);
    /// ```
    pub fn resolve<'a>(&'a self, current: &'a str, event: &E) -> Option<&'a str> {
        self.transitions
            .iter()
            .filter(|rule| rule.matches(current, event))
            .last()
            .map(|rule| rule.resolve(current))
    }
}

impl<E: DeserializeOwned> Definition<E> {
    /// Validate a definition document, stopping at the first violation.
    pub fn from_value(raw: &Value, registry: &CallbackRegistry<E>) -> Result<Self, ConfigError> {
        document::parse(raw, registry).inspect_err(|err| {
            debug!(error = %err, "rejected machine definition");
        })
    }

    /// Parse and validate a JSON definition document.
    pub fn from_json(text: &str, registry: &CallbackRegistry<E>) -> Result<Self, ConfigError> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_value(&raw, registry)
    }

    /// Collect every violation in a definition document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use waypoint::definition::{CallbackRegistry, Definition};
    ///
    /// let registry = CallbackRegistry::<i64>::new();
    /// let raw = json!({ "transitions": [{ "on": [] }], "callbacks": 3 });
    ///
    /// let violations = Definition::lint(&raw, &registry);
    /// assert!(violations.is_failure());
    /// ```
    pub fn lint(raw: &Value, registry: &CallbackRegistry<E>) -> Violations {
        document::lint(raw, registry)
    }
}
