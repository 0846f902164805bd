//! State machine that dispatches lifecycle callbacks around each step.

use crate::core::{CallbackSet, Hook, StateHistory, StateHook, StateTransition, Step};
use crate::definition::{CallbackRegistry, ConfigError, Definition};
use crate::engine::outcome::{CancelPoint, StepOutcome};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// State machine running against a shared, immutable definition.
///
/// Each machine owns its current state; the definition behind the `Arc`
/// is never mutated and may back any number of machines. `step` takes
/// `&mut self`, so a machine shared between threads must be guarded by
/// the caller. Stepping a machine from inside one of its own callbacks is
/// not supported.
#[derive(Debug)]
pub struct Machine<E> {
    definition: Arc<Definition<E>>,
    current: String,
    history: StateHistory,
}

impl<E> Machine<E> {
    /// Create a machine in the definition's initial state.
    pub fn new(definition: impl Into<Arc<Definition<E>>>) -> Self {
        let definition = definition.into();
        let current = definition.initial().to_owned();
        debug!(initial = %current, "machine created");
        Self {
            definition,
            current,
            history: StateHistory::new(),
        }
    }

    /// Get current state
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Check whether the machine is currently in `state`
    pub fn is(&self, state: &str) -> bool {
        self.current == state
    }

    pub fn definition(&self) -> &Arc<Definition<E>> {
        &self.definition
    }

    /// Committed steps, oldest first
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Hand over the recorded steps, leaving an empty history behind.
    ///
    /// History grows by one entry per committed step; long-lived machines
    /// should drain it periodically.
    pub fn take_history(&mut self) -> StateHistory {
        std::mem::take(&mut self.history)
    }

    pub fn clear_history(&mut self) {
        self.history = StateHistory::new();
    }
}

impl<E: DeserializeOwned> Machine<E> {
    /// Validate a definition document and start a machine on it.
    pub fn from_value(raw: &Value, registry: &CallbackRegistry<E>) -> Result<Self, ConfigError> {
        Ok(Self::new(Definition::from_value(raw, registry)?))
    }

    /// Parse a JSON definition document and start a machine on it.
    pub fn from_json(text: &str, registry: &CallbackRegistry<E>) -> Result<Self, ConfigError> {
        Ok(Self::new(Definition::from_json(text, registry)?))
    }
}

impl<E: PartialEq> Machine<E> {
    /// Target state `event` would lead to, without running any callback.
    pub fn resolve(&self, event: &E) -> Option<&str> {
        self.definition.resolve(&self.current, event)
    }

    /// Whether any rule matches `event` in the current state.
    pub fn can(&self, event: &E) -> bool {
        self.resolve(event).is_some()
    }

    /// Move the machine forward by one event.
    ///
    /// Callbacks run in a fixed order:
    ///
    /// 1. `error` when no rule matches, and the step ends there
    /// 2. `before`; returning `false` cancels
    /// 3. `leave[from]` when the state changes (returning `false` cancels),
    ///    otherwise `stay[from]`
    /// 4. the new state is committed
    /// 5. `enter[to]` when the state changed
    /// 6. `after`
    ///
    /// A canceled or unresolved step leaves the current state untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waypoint::core::TransitionRule;
    /// use waypoint::definition::Definition;
    /// use waypoint::engine::{Machine, StepOutcome};
    ///
    /// let definition = Definition::builder()
    ///     .initial("locked")
    ///     .transition(TransitionRule::new("locked").on(["coin"]).to("open"))
    ///     .transition(TransitionRule::new("open").on(["push"]).to("locked"))
    ///     .build()
    ///     .unwrap();
    ///
    /// let mut turnstile = Machine::new(definition);
    /// assert!(turnstile.step("coin").is_committed());
    /// assert_eq!(turnstile.current(), "open");
    ///
    /// let outcome = turnstile.step("coin");
    /// assert_eq!(outcome, StepOutcome::Unresolved { from: "open".to_string() });
    /// ```
    pub fn step(&mut self, event: E) -> StepOutcome {
        let event = &event;
        let definition = Arc::clone(&self.definition);
        let callbacks = definition.callbacks();
        let from = self.current.clone();

        let Some(to) = definition.resolve(&from, event).map(str::to_owned) else {
            debug!(from = %from, "no transition matches event");
            if let Some(error) = callbacks.hook(Hook::Error) {
                error.call(&Step {
                    from: &from,
                    event,
                    to: None,
                });
            }
            return StepOutcome::Unresolved { from };
        };

        let step = Step {
            from: &from,
            event,
            to: Some(&to),
        };

        if let Some(by) = veto(callbacks, &step) {
            debug!(from = %from, to = %to, by = ?by, "transition canceled");
            return StepOutcome::Canceled { from, to, by };
        }

        self.current.clone_from(&to);
        self.history.push(StateTransition::now(from.as_str(), to.as_str()));
        debug!(from = %from, to = %to, "transition committed");

        if step.is_transition() {
            if let Some(enter) = callbacks.state_hook(StateHook::Enter, &to) {
                trace!(hook = "enter", state = %to, "invoking callback");
                enter.call(&step);
            }
        }

        if let Some(after) = callbacks.hook(Hook::After) {
            trace!(hook = "after", "invoking callback");
            after.call(&step);
        }

        if from == to {
            StepOutcome::Stayed { state: to }
        } else {
            StepOutcome::Transitioned { from, to }
        }
    }
}

impl<E> Clone for Machine<E> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            current: self.current.clone(),
            history: self.history.clone(),
        }
    }
}

/// Run the callbacks that may veto a resolved step.
fn veto<E>(callbacks: &CallbackSet<E>, step: &Step<'_, E>) -> Option<CancelPoint> {
    if let Some(before) = callbacks.hook(Hook::Before) {
        trace!(hook = "before", "invoking callback");
        if before.call(step).is_cancel() {
            return Some(CancelPoint::Before);
        }
    }

    if step.is_transition() {
        if let Some(leave) = callbacks.state_hook(StateHook::Leave, step.from) {
            trace!(hook = "leave", state = step.from, "invoking callback");
            if leave.call(step).is_cancel() {
                return Some(CancelPoint::Leave);
            }
        }
    } else if let Some(stay) = callbacks.state_hook(StateHook::Stay, step.from) {
        trace!(hook = "stay", state = step.from, "invoking callback");
        stay.call(step);
    }

    None
}
