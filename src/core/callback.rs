//! Lifecycle callbacks invoked around a transition.
//!
//! Every callback receives the same [`Step`] view of the transition in
//! progress and answers with a [`Flow`]. Only `before` and `leave` answers
//! are honored; the dispatcher ignores what the other hooks return.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Whether a callback lets the in-progress transition continue.
///
/// Closures registered as callbacks may return `()`, `bool`, `Option<bool>`
/// or `Flow`. Only an explicit `false` becomes [`Flow::Cancel`]; `()`,
/// `true` and `None` all continue.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Flow;
///
/// assert_eq!(Flow::from(()), Flow::Continue);
/// assert_eq!(Flow::from(None::<bool>), Flow::Continue);
/// assert_eq!(Flow::from(false), Flow::Cancel);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    /// Let the transition proceed
    #[default]
    Continue,

    /// Veto the transition before it commits
    Cancel,
}

impl Flow {
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Self::Continue
    }
}

impl From<bool> for Flow {
    fn from(proceed: bool) -> Self {
        if proceed {
            Self::Continue
        } else {
            Self::Cancel
        }
    }
}

impl From<Option<bool>> for Flow {
    fn from(answer: Option<bool>) -> Self {
        answer.map_or(Self::Continue, |proceed| Flow::from(proceed))
    }
}

/// The transition a callback is being asked about.
///
/// `to` is `None` only when the `error` callback reports that no rule
/// matched the event.
#[derive(Debug)]
pub struct Step<'a, E> {
    pub from: &'a str,
    pub event: &'a E,
    pub to: Option<&'a str>,
}

impl<E> Step<'_, E> {
    /// True when the step leaves its source state.
    pub fn is_transition(&self) -> bool {
        self.to.is_some_and(|to| to != self.from)
    }

    /// True when the step resolved back onto its source state.
    pub fn is_stay(&self) -> bool {
        self.to == Some(self.from)
    }
}

type CallbackFn<E> = Arc<dyn Fn(&Step<'_, E>) -> Flow + Send + Sync>;

/// A shareable lifecycle callback.
pub struct Callback<E> {
    inner: CallbackFn<E>,
}

impl<E: 'static> Callback<E> {
    /// Wrap a closure whose result converts into a [`Flow`].
    pub fn new<F, R>(callback: F) -> Self
    where
        F: Fn(&Step<'_, E>) -> R + Send + Sync + 'static,
        R: Into<Flow>,
    {
        Self {
            inner: Arc::new(move |step: &Step<'_, E>| callback(step).into()),
        }
    }
}

impl<E> Callback<E> {
    pub fn call(&self, step: &Step<'_, E>) -> Flow {
        (self.inner)(step)
    }
}

impl<E> Clone for Callback<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Callbacks that fire once per step regardless of state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hook {
    Before,
    After,
    Error,
}

/// Callbacks registered per state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateHook {
    Enter,
    Leave,
    Stay,
}

/// A named callback group as it appears in a definition document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackGroup {
    Single(Hook),
    Keyed(StateHook),
}

impl CallbackGroup {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "before" => Some(Self::Single(Hook::Before)),
            "after" => Some(Self::Single(Hook::After)),
            "error" => Some(Self::Single(Hook::Error)),
            "enter" => Some(Self::Keyed(StateHook::Enter)),
            "leave" => Some(Self::Keyed(StateHook::Leave)),
            "stay" => Some(Self::Keyed(StateHook::Stay)),
            _ => None,
        }
    }
}

/// Every callback a definition may carry, each independently optional.
#[derive(Debug)]
pub struct CallbackSet<E> {
    pub before: Option<Callback<E>>,
    pub after: Option<Callback<E>>,
    pub error: Option<Callback<E>>,
    pub enter: HashMap<String, Callback<E>>,
    pub leave: HashMap<String, Callback<E>>,
    pub stay: HashMap<String, Callback<E>>,
}

impl<E> CallbackSet<E> {
    pub fn new() -> Self {
        Self {
            before: None,
            after: None,
            error: None,
            enter: HashMap::new(),
            leave: HashMap::new(),
            stay: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_none()
            && self.after.is_none()
            && self.error.is_none()
            && self.enter.is_empty()
            && self.leave.is_empty()
            && self.stay.is_empty()
    }

    pub fn hook(&self, hook: Hook) -> Option<&Callback<E>> {
        match hook {
            Hook::Before => self.before.as_ref(),
            Hook::After => self.after.as_ref(),
            Hook::Error => self.error.as_ref(),
        }
    }

    pub fn state_hook(&self, hook: StateHook, state: &str) -> Option<&Callback<E>> {
        self.keyed(hook).get(state)
    }

    /// Install a single hook, replacing any previous one.
    pub fn set_hook(&mut self, hook: Hook, callback: Callback<E>) {
        let slot = match hook {
            Hook::Before => &mut self.before,
            Hook::After => &mut self.after,
            Hook::Error => &mut self.error,
        };
        *slot = Some(callback);
    }

    /// Install a per-state hook, replacing any previous one for that state.
    pub fn set_state_hook(
        &mut self,
        hook: StateHook,
        state: impl Into<String>,
        callback: Callback<E>,
    ) {
        self.keyed_mut(hook).insert(state.into(), callback);
    }

    fn keyed(&self, hook: StateHook) -> &HashMap<String, Callback<E>> {
        match hook {
            StateHook::Enter => &self.enter,
            StateHook::Leave => &self.leave,
            StateHook::Stay => &self.stay,
        }
    }

    fn keyed_mut(&mut self, hook: StateHook) -> &mut HashMap<String, Callback<E>> {
        match hook {
            StateHook::Enter => &mut self.enter,
            StateHook::Leave => &mut self.leave,
            StateHook::Stay => &mut self.stay,
        }
    }
}

impl<E> Default for CallbackSet<E> {
    fn default() -> Self {
        Self::new()
    }
}
