//! Declarative transition rules.

/// One row of a transition table: which events move `from` to `to`.
///
/// A rule with no events is a wildcard and matches every event for its
/// source state. A rule with no target is a stay rule and resolves back
/// onto its source state.
///
/// # Example
///
/// ```rust
/// use waypoint::core::TransitionRule;
///
/// let advance = TransitionRule::new("a").on([1]).to("b");
/// assert!(advance.matches("a", &1));
/// assert!(!advance.matches("a", &2));
/// assert_eq!(advance.resolve("a"), "b");
///
/// let idle = TransitionRule::<i32>::new("b");
/// assert!(idle.is_wildcard());
/// assert!(idle.matches("b", &42));
/// assert_eq!(idle.resolve("b"), "b");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRule<E> {
    from: String,
    on: Vec<E>,
    to: Option<String>,
}

impl<E> TransitionRule<E> {
    /// Create a wildcard stay rule for `from`.
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            on: Vec::new(),
            to: None,
        }
    }

    /// Add events that trigger this rule.
    pub fn on<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        self.on.extend(events);
        self
    }

    /// Set the target state. An empty name leaves the rule as a stay rule.
    pub fn to(mut self, state: impl Into<String>) -> Self {
        let state = state.into();
        self.to = (!state.is_empty()).then_some(state);
        self
    }

    pub fn source(&self) -> &str {
        &self.from
    }

    pub fn events(&self) -> &[E] {
        &self.on
    }

    /// The explicit target, if one was declared.
    pub fn target(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.on.is_empty()
    }

    pub fn is_stay(&self) -> bool {
        self.to.is_none()
    }

    /// The state this rule moves `current` to.
    pub fn resolve<'a>(&'a self, current: &'a str) -> &'a str {
        self.to.as_deref().unwrap_or(current)
    }
}

impl<E: PartialEq> TransitionRule<E> {
    /// Whether this rule applies to `event` while in `current`.
    pub fn matches(&self, current: &str, event: &E) -> bool {
        self.from == current && (self.on.is_empty() || self.on.contains(event))
    }
}
