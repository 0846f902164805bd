//! Definition errors.

use thiserror::Error;

/// Errors that can occur when validating a machine definition.
///
/// The display text of each validation variant names the rule it violates.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("settings must be a dictionary")]
    SettingsNotMapping,

    #[error("transitions must be a list")]
    TransitionsNotList,

    #[error("transitions must be dictionaries")]
    TransitionNotMapping,

    #[error("transitions from must be a string")]
    FromNotString,

    #[error("transitions on must be iterable")]
    OnNotIterable,

    #[error("transitions on must contain valid events")]
    InvalidEvent,

    #[error("transitions to must be a string")]
    ToNotString,

    #[error("initial state must be a string")]
    InitialNotString,

    #[error("initial state must not be empty")]
    EmptyInitial,

    #[error("callbacks must be a dictionary")]
    CallbacksNotMapping,

    #[error("callback items must be dictionaries or functions")]
    CallbackItemInvalid,

    #[error("all callbacks must be functions")]
    CallbackNotFunction,

    #[error("before, after and error callbacks must be functions")]
    HookNotFunction,

    #[error("enter, leave and stay callbacks must be dictionaries")]
    StateHookNotMapping,

    #[error("definition is not valid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
