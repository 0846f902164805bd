//! Stepping machines through their definitions.
//!
//! A [`Machine`] pairs a shared [`Definition`](crate::definition::Definition)
//! with its own current state. Each call to [`Machine::step`] resolves the
//! event against the transition table, runs the callback protocol and
//! reports how the step ended as a [`StepOutcome`].
//!
//! Stepping never fails: an event with no matching rule is routed to the
//! `error` callback, and a veto from `before` or `leave` simply leaves the
//! machine where it was.

mod machine;
mod outcome;

pub use machine::Machine;
pub use outcome::{CancelPoint, StepOutcome};
