//! Validation of untyped definition documents.
//!
//! A document is a JSON value shaped like
//!
//! ```json
//! {
//!     "initial": "a",
//!     "transitions": [
//!         { "from": "a", "on": [1], "to": "b" },
//!         { "from": "b", "on": [] }
//!     ],
//!     "callbacks": {
//!         "before": "trace",
//!         "leave": { "a": "guard" }
//!     }
//! }
//! ```
//!
//! where callback values are names looked up in a [`CallbackRegistry`].
//! Checks run in a fixed order and `parse` stops at the first violation;
//! `lint` keeps going and reports every violation it can find.

use super::{CallbackRegistry, ConfigError, Definition};
use crate::core::{Callback, CallbackGroup, CallbackSet, TransitionRule};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

const INITIAL: &str = "initial";
const TRANSITIONS: &str = "transitions";
const CALLBACKS: &str = "callbacks";
const FROM: &str = "from";
const ON: &str = "on";
const TO: &str = "to";

/// Every violation found in a document, or success.
pub type Violations = Validation<(), NonEmptyVec<ConfigError>>;

pub(crate) fn parse<E>(
    raw: &Value,
    registry: &CallbackRegistry<E>,
) -> Result<Definition<E>, ConfigError>
where
    E: DeserializeOwned,
{
    let settings = raw.as_object().ok_or(ConfigError::SettingsNotMapping)?;

    let transitions = transition_entries(settings)?
        .iter()
        .map(parse_rule)
        .collect::<Result<Vec<_>, _>>()?;

    let initial = parse_initial(settings)?;

    let callbacks = match callback_groups(settings)? {
        Some(groups) => parse_callbacks(groups, registry)?,
        None => CallbackSet::new(),
    };

    Ok(Definition::from_parts(
        initial.to_owned(),
        transitions,
        callbacks,
    ))
}

pub(crate) fn lint<E>(raw: &Value, registry: &CallbackRegistry<E>) -> Violations
where
    E: DeserializeOwned,
{
    let Some(settings) = raw.as_object() else {
        return Validation::fail(ConfigError::SettingsNotMapping);
    };

    let mut checks: Vec<Violations> = Vec::new();

    match transition_entries(settings) {
        Ok(entries) => checks.extend(
            entries
                .iter()
                .map(|entry| check(parse_rule::<E>(entry).map(drop))),
        ),
        Err(err) => checks.push(Validation::fail(err)),
    }

    checks.push(check(parse_initial(settings).map(drop)));

    match callback_groups(settings) {
        Ok(Some(groups)) => {
            for (name, value) in groups {
                let verdict =
                    check_group(value, registry).and_then(|()| check_kind(name, value));
                checks.push(check(verdict.map(drop)));
            }
        }
        Ok(None) => {}
        Err(err) => checks.push(Validation::fail(err)),
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check(result: Result<(), ConfigError>) -> Violations {
    match result {
        Ok(()) => Validation::success(()),
        Err(err) => Validation::fail(err),
    }
}

fn transition_entries(settings: &Map<String, Value>) -> Result<&Vec<Value>, ConfigError> {
    settings
        .get(TRANSITIONS)
        .and_then(Value::as_array)
        .ok_or(ConfigError::TransitionsNotList)
}

fn parse_rule<E: DeserializeOwned>(entry: &Value) -> Result<TransitionRule<E>, ConfigError> {
    let entry = entry.as_object().ok_or(ConfigError::TransitionNotMapping)?;

    let from = entry
        .get(FROM)
        .and_then(Value::as_str)
        .ok_or(ConfigError::FromNotString)?;

    let on = entry
        .get(ON)
        .and_then(Value::as_array)
        .ok_or(ConfigError::OnNotIterable)?;

    let to = match entry.get(TO) {
        None | Some(Value::Null) => None,
        Some(Value::String(to)) => Some(to.as_str()),
        Some(_) => return Err(ConfigError::ToNotString),
    };

    let events = on
        .iter()
        .map(|event| {
            serde_json::from_value(event.clone()).map_err(|_| ConfigError::InvalidEvent)
        })
        .collect::<Result<Vec<E>, _>>()?;

    let rule = TransitionRule::new(from).on(events);
    Ok(match to {
        Some(to) => rule.to(to),
        None => rule,
    })
}

fn parse_initial(settings: &Map<String, Value>) -> Result<&str, ConfigError> {
    let initial = settings
        .get(INITIAL)
        .and_then(Value::as_str)
        .ok_or(ConfigError::InitialNotString)?;

    if initial.is_empty() {
        return Err(ConfigError::EmptyInitial);
    }
    Ok(initial)
}

fn callback_groups(
    settings: &Map<String, Value>,
) -> Result<Option<&Map<String, Value>>, ConfigError> {
    match settings.get(CALLBACKS) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(groups)) => Ok(Some(groups)),
        Some(_) => Err(ConfigError::CallbacksNotMapping),
    }
}

fn lookup<'r, E>(value: &Value, registry: &'r CallbackRegistry<E>) -> Option<&'r Callback<E>> {
    value.as_str().and_then(|name| registry.get(name))
}

/// A group is either a function or a mapping whose every value is one.
fn check_group<E>(value: &Value, registry: &CallbackRegistry<E>) -> Result<(), ConfigError> {
    match value {
        Value::Object(entries) => {
            if entries.values().all(|leaf| lookup(leaf, registry).is_some()) {
                Ok(())
            } else {
                Err(ConfigError::CallbackNotFunction)
            }
        }
        _ if lookup(value, registry).is_some() => Ok(()),
        _ => Err(ConfigError::CallbackItemInvalid),
    }
}

/// Known groups must also have the shape the dispatcher expects.
fn check_kind(name: &str, value: &Value) -> Result<Option<CallbackGroup>, ConfigError> {
    let group = CallbackGroup::from_name(name);
    match (group, value.is_object()) {
        (Some(CallbackGroup::Single(_)), true) => Err(ConfigError::HookNotFunction),
        (Some(CallbackGroup::Keyed(_)), false) => Err(ConfigError::StateHookNotMapping),
        _ => Ok(group),
    }
}

fn parse_callbacks<E>(
    groups: &Map<String, Value>,
    registry: &CallbackRegistry<E>,
) -> Result<CallbackSet<E>, ConfigError> {
    for value in groups.values() {
        check_group(value, registry)?;
    }

    let mut callbacks = CallbackSet::new();
    for (name, value) in groups {
        match check_kind(name, value)? {
            Some(CallbackGroup::Single(hook)) => {
                if let Some(callback) = lookup(value, registry) {
                    callbacks.set_hook(hook, callback.clone());
                }
            }
            Some(CallbackGroup::Keyed(hook)) => {
                for (state, leaf) in value.as_object().into_iter().flatten() {
                    if let Some(callback) = lookup(leaf, registry) {
                        callbacks.set_state_hook(hook, state.as_str(), callback.clone());
                    }
                }
            }
            None => warn!(group = %name, "ignoring unknown callback group"),
        }
    }
    Ok(callbacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> CallbackRegistry<i64> {
        CallbackRegistry::new().with("noop", |_| ())
    }

    fn parse_err(raw: Value) -> ConfigError {
        parse::<i64>(&raw, &registry()).unwrap_err()
    }

    #[test]
    fn transitions_are_checked_before_initial() {
        let err = parse_err(json!({ "initial": [], "transitions": [{}] }));
        assert_eq!(err, ConfigError::FromNotString);
    }

    #[test]
    fn null_to_and_callbacks_count_as_absent() {
        let raw = json!({
            "initial": "a",
            "transitions": [{ "from": "a", "on": [], "to": null }],
            "callbacks": null
        });

        let definition = parse::<i64>(&raw, &registry()).unwrap();
        assert!(definition.transitions()[0].is_stay());
        assert!(definition.callbacks().is_empty());
    }

    #[test]
    fn events_must_fit_event_type() {
        let err = parse_err(json!({
            "initial": "a",
            "transitions": [{ "from": "a", "on": ["one"], "to": "b" }]
        }));
        assert_eq!(err, ConfigError::InvalidEvent);
    }

    #[test]
    fn object_on_is_not_iterable() {
        let err = parse_err(json!({
            "initial": "a",
            "transitions": [{ "from": "a", "on": { "x": 1 } }]
        }));
        assert_eq!(err, ConfigError::OnNotIterable);
    }

    #[test]
    fn unregistered_name_is_not_a_function() {
        let err = parse_err(json!({
            "initial": "a",
            "transitions": [],
            "callbacks": { "before": "missing" }
        }));
        assert_eq!(err, ConfigError::CallbackItemInvalid);
    }

    #[test]
    fn shape_violations_win_over_kind_violations() {
        let err = parse_err(json!({
            "initial": "a",
            "transitions": [],
            "callbacks": { "before": { "a": "noop" }, "item": 3 }
        }));
        assert_eq!(err, ConfigError::CallbackItemInvalid);
    }

    #[test]
    fn single_hook_rejects_mapping() {
        let err = parse_err(json!({
            "initial": "a",
            "transitions": [],
            "callbacks": { "after": { "a": "noop" } }
        }));
        assert_eq!(err, ConfigError::HookNotFunction);
    }

    #[test]
    fn state_hook_rejects_function() {
        let err = parse_err(json!({
            "initial": "a",
            "transitions": [],
            "callbacks": { "enter": "noop" }
        }));
        assert_eq!(err, ConfigError::StateHookNotMapping);
    }

    #[test]
    fn unknown_groups_are_ignored() {
        let raw = json!({
            "initial": "state",
            "transitions": [],
            "callbacks": { "item": { "other": "noop" } }
        });

        let definition = parse::<i64>(&raw, &registry()).unwrap();
        assert!(definition.callbacks().is_empty());
    }

    #[test]
    fn lint_reports_every_violation() {
        let raw = json!({
            "transitions": [
                "thing",
                { "from": "a" },
                { "from": "a", "on": [], "to": 3 }
            ],
            "callbacks": { "before": 3, "leave": { "a": 4 } }
        });

        match lint::<i64>(&raw, &registry()) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 6);
                for expected in [
                    ConfigError::TransitionNotMapping,
                    ConfigError::OnNotIterable,
                    ConfigError::ToNotString,
                    ConfigError::InitialNotString,
                    ConfigError::CallbackItemInvalid,
                    ConfigError::CallbackNotFunction,
                ] {
                    assert!(errors.iter().any(|e| *e == expected), "missing {expected}");
                }
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn lint_stops_at_non_mapping_settings() {
        match lint::<i64>(&Value::Null, &registry()) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, ConfigError::SettingsNotMapping)));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn lint_accepts_valid_document() {
        let raw = json!({
            "initial": "a",
            "transitions": [{ "from": "a", "on": [1], "to": "b" }],
            "callbacks": { "after": "noop", "stay": { "b": "noop" } }
        });

        assert!(lint::<i64>(&raw, &registry()).is_success());
    }
}
