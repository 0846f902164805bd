//! Waypoint: a declarative finite state machine engine
//!
//! A machine is described once by a transition table and a set of
//! lifecycle callbacks, validated up front, and then driven one event at a
//! time. Each step resolves the event against the table and runs the
//! callbacks in a fixed order, any of which may veto the step before it
//! commits.
//!
//! # Core Concepts
//!
//! - **Rules**: `(from, on, to)` rows; an empty `on` matches every event and
//!   a missing `to` keeps the machine where it is. When several rules match,
//!   the one declared last wins.
//! - **Callbacks**: `before`, `after` and `error` fire once per step; `enter`,
//!   `leave` and `stay` are registered per state. Returning `false` from
//!   `before` or `leave` cancels the step.
//! - **Definitions**: validated, immutable and shareable; built in code or
//!   loaded from JSON documents that name their callbacks.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use waypoint::{Definition, Machine, TransitionRule};
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let entered = Arc::clone(&log);
//!
//! let definition = Definition::builder()
//!     .initial("a")
//!     .transition(TransitionRule::new("a").on([1]).to("b"))
//!     .transition(TransitionRule::new("b"))
//!     .enter("b", move |step| {
//!         entered.lock().unwrap().push(format!("{} -> b", step.from));
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut machine = Machine::new(definition);
//! machine.step(1);
//! machine.step(1);
//!
//! assert_eq!(machine.current(), "b");
//! assert_eq!(*log.lock().unwrap(), vec!["a -> b"]);
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod engine;
pub mod termcaps;

// Re-export commonly used types
pub use crate::core::{Callback, CallbackSet, Flow, Step, TransitionRule};
pub use builder::DefinitionBuilder;
pub use definition::{CallbackRegistry, ConfigError, Definition};
pub use engine::{CancelPoint, Machine, StepOutcome};
