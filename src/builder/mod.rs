//! Builder API for constructing definitions and machines in code.
//!
//! The builder enforces the same rules as document validation, most of them
//! through the type system: rule sources and targets are strings, event
//! lists are collections and callbacks are closures.

mod definition;

pub use definition::DefinitionBuilder;

use crate::core::TransitionRule;

/// Create a rule that moves `from` to `to` on any of `events`.
///
/// # Example
///
/// ```
/// use waypoint::builder::transition;
///
/// let rule = transition("idle", [1, 2], "busy");
/// assert!(rule.matches("idle", &2));
/// assert_eq!(rule.target(), Some("busy"));
/// ```
pub fn transition<E, I>(
    from: impl Into<String>,
    events: I,
    to: impl Into<String>,
) -> TransitionRule<E>
where
    I: IntoIterator<Item = E>,
{
    TransitionRule::new(from).on(events).to(to)
}

/// Create a rule that keeps the machine in `state` on any of `events`.
///
/// With no events the rule is a wildcard and absorbs every event.
///
/// # Example
///
/// ```
/// use waypoint::builder::stay;
///
/// let rule = stay::<u8, _>("idle", []);
/// assert!(rule.is_wildcard());
/// assert_eq!(rule.resolve("idle"), "idle");
/// ```
pub fn stay<E, I>(state: impl Into<String>, events: I) -> TransitionRule<E>
where
    I: IntoIterator<Item = E>,
{
    TransitionRule::new(state).on(events)
}
