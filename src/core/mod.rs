//! Core machine vocabulary.
//!
//! This module contains the building blocks shared by every other layer:
//! - Transition rules and their matching logic
//! - Callbacks, the hooks they attach to, and the `Flow` they answer with
//! - Committed transition history

mod callback;
mod history;
mod rule;

pub use callback::{Callback, CallbackGroup, CallbackSet, Flow, Hook, StateHook, Step};
pub use history::{StateHistory, StateTransition};
pub use rule::TransitionRule;
