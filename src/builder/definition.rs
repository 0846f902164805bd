//! Builder for constructing definitions in code.

use crate::core::{Callback, CallbackSet, Flow, Hook, StateHook, Step, TransitionRule};
use crate::definition::{ConfigError, Definition};

/// Builder for constructing definitions with a fluent API.
///
/// Rules keep the order they are added in, which decides ties between
/// overlapping rules. Registering a callback twice for the same hook (and
/// state) keeps the later one.
pub struct DefinitionBuilder<E> {
    initial: Option<String>,
    transitions: Vec<TransitionRule<E>>,
    callbacks: CallbackSet<E>,
}

impl<E> DefinitionBuilder<E> {
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            callbacks: CallbackSet::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Append a transition rule.
    pub fn transition(mut self, rule: TransitionRule<E>) -> Self {
        self.transitions.push(rule);
        self
    }

    /// Append several transition rules at once.
    pub fn transitions<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = TransitionRule<E>>,
    {
        self.transitions.extend(rules);
        self
    }

    /// Install a pre-built callback for a single hook.
    pub fn hook(mut self, hook: Hook, callback: Callback<E>) -> Self {
        self.callbacks.set_hook(hook, callback);
        self
    }

    /// Install a pre-built callback for a per-state hook.
    pub fn state_hook(
        mut self,
        hook: StateHook,
        state: impl Into<String>,
        callback: Callback<E>,
    ) -> Self {
        self.callbacks.set_state_hook(hook, state, callback);
        self
    }

    /// Build the definition.
    /// Returns an error if the initial state is missing or empty.
    pub fn build(self) -> Result<Definition<E>, ConfigError> {
        let initial = self.initial.ok_or(ConfigError::InitialNotString)?;
        if initial.is_empty() {
            return Err(ConfigError::EmptyInitial);
        }

        Ok(Definition::from_parts(
            initial,
            self.transitions,
            self.callbacks,
        ))
    }
}

impl<E: 'static> DefinitionBuilder<E> {
    /// Runs before anything changes; returning `false` cancels the step.
    pub fn before<F, R>(self, callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.hook(Hook::Before, Callback::new(callback))
    }

    /// Runs after every committed step.
    pub fn after<F, R>(self, callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.hook(Hook::After, Callback::new(callback))
    }

    /// Runs when no rule matches the event.
    pub fn error<F, R>(self, callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.hook(Hook::Error, Callback::new(callback))
    }

    /// Runs after the machine commits a move into `state`.
    pub fn enter<F, R>(self, state: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.state_hook(StateHook::Enter, state, Callback::new(callback))
    }

    /// Runs before the machine moves out of `state`; returning `false`
    /// cancels the step.
    pub fn leave<F, R>(self, state: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.state_hook(StateHook::Leave, state, Callback::new(callback))
    }

    /// Runs when a step resolves back onto `state`.
    pub fn stay<F, R>(self, state: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        self.state_hook(StateHook::Stay, state, Callback::new(callback))
    }
}

impl<E> Default for DefinitionBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
