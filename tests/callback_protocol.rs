//! End-to-end checks of the step protocol on machines loaded from
//! definition documents.

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use waypoint::{CallbackRegistry, CancelPoint, Machine, Step, StepOutcome};

type Trace = Arc<Mutex<Vec<String>>>;

fn record(trace: &Trace, label: &'static str) -> impl Fn(&Step<'_, i64>) + Send + Sync {
    let trace = Arc::clone(trace);
    move |step: &Step<'_, i64>| {
        let to = step.to.unwrap_or("None");
        trace
            .lock()
            .unwrap()
            .push(format!("{label:<6}[f={};o={};t={to}]", step.from, step.event));
    }
}

fn registry(trace: &Trace) -> CallbackRegistry<i64> {
    CallbackRegistry::new()
        .with("before", record(trace, "before"))
        .with("after", record(trace, "after"))
        .with("leave", record(trace, "leave"))
        .with("enter", record(trace, "enter"))
        .with("stay", record(trace, "stay"))
        .with("error", record(trace, "error"))
}

fn document() -> Value {
    json!({
        "initial": "a",
        "transitions": [
            { "from": "a", "on": [1], "to": "b" },
            { "from": "b", "on": [] }
        ],
        "callbacks": {
            "before": "before",
            "after": "after",
            "leave": { "a": "leave", "b": "leave" },
            "enter": { "a": "enter", "b": "enter" },
            "stay": { "a": "stay", "b": "stay" },
            "error": "error"
        }
    })
}

fn lines(trace: &Trace) -> Vec<String> {
    trace.lock().unwrap().clone()
}

#[test]
fn step_sunny_day() {
    let trace = Trace::default();
    let mut machine = Machine::from_value(&document(), &registry(&trace)).unwrap();

    machine.step(1);
    machine.step(1);

    assert_eq!(
        lines(&trace),
        vec![
            "before[f=a;o=1;t=b]",
            "leave [f=a;o=1;t=b]",
            "enter [f=a;o=1;t=b]",
            "after [f=a;o=1;t=b]",
            "before[f=b;o=1;t=b]",
            "stay  [f=b;o=1;t=b]",
            "after [f=b;o=1;t=b]",
        ]
    );
    assert_eq!(machine.current(), "b");
}

#[test]
fn step_error() {
    let trace = Trace::default();
    let mut machine = Machine::from_value(&document(), &registry(&trace)).unwrap();

    let outcome = machine.step(2);

    assert_eq!(lines(&trace), vec!["error [f=a;o=2;t=None]"]);
    assert_eq!(machine.current(), "a");
    assert!(matches!(outcome, StepOutcome::Unresolved { .. }));
}

#[test]
fn unresolved_without_error_callback_is_silent() {
    let registry = CallbackRegistry::<i64>::new();
    let raw = json!({ "initial": "a", "transitions": [] });
    let mut machine = Machine::from_value(&raw, &registry).unwrap();

    assert_eq!(
        machine.step(5),
        StepOutcome::Unresolved {
            from: "a".to_string()
        }
    );
    assert_eq!(machine.current(), "a");
}

#[test]
fn later_wildcard_stay_overrides_specific_rule() {
    let registry = CallbackRegistry::<i64>::new();
    let raw = json!({
        "initial": "a",
        "transitions": [
            { "from": "a", "on": [1], "to": "b" },
            { "from": "a", "on": [] }
        ]
    });
    let mut machine = Machine::from_value(&raw, &registry).unwrap();

    let outcome = machine.step(1);

    assert_eq!(
        outcome,
        StepOutcome::Stayed {
            state: "a".to_string()
        }
    );
    assert_eq!(machine.current(), "a");
}

#[test]
fn wildcard_matches_every_event() {
    let registry = CallbackRegistry::<i64>::new();
    let raw = json!({
        "initial": "a",
        "transitions": [{ "from": "a", "on": [], "to": "b" }]
    });

    for event in [0, 7, -3, i64::MAX] {
        let mut machine = Machine::from_value(&raw, &registry).unwrap();
        machine.step(event);
        assert_eq!(machine.current(), "b");
    }
}

#[test]
fn later_rule_overrides_earlier_match() {
    let registry = CallbackRegistry::<i64>::new();
    let raw = json!({
        "initial": "a",
        "transitions": [
            { "from": "a", "on": [1], "to": "b" },
            { "from": "a", "on": [1], "to": "c" }
        ]
    });
    let mut machine = Machine::from_value(&raw, &registry).unwrap();

    machine.step(1);

    assert_eq!(machine.current(), "c");
}

#[test]
fn before_returning_false_cancels_everything_after_it() {
    let trace = Trace::default();
    let registry = registry(&trace).with("veto", |_| false);
    let mut raw = document();
    raw["callbacks"]["before"] = json!("veto");
    let mut machine = Machine::from_value(&raw, &registry).unwrap();

    let outcome = machine.step(1);

    assert_eq!(
        outcome,
        StepOutcome::Canceled {
            from: "a".to_string(),
            to: "b".to_string(),
            by: CancelPoint::Before,
        }
    );
    assert_eq!(machine.current(), "a");
    assert!(lines(&trace).is_empty());
    assert!(machine.history().is_empty());
}

#[test]
fn leave_returning_false_keeps_source_state() {
    let trace = Trace::default();
    let leave_trace = Arc::clone(&trace);
    let registry = registry(&trace).with("guard", move |step| {
        leave_trace
            .lock()
            .unwrap()
            .push(format!("guard [f={}]", step.from));
        false
    });
    let mut raw = document();
    raw["callbacks"]["leave"]["a"] = json!("guard");
    let mut machine = Machine::from_value(&raw, &registry).unwrap();

    let outcome = machine.step(1);

    assert!(outcome.is_canceled());
    assert_eq!(machine.current(), "a");
    assert_eq!(lines(&trace), vec!["before[f=a;o=1;t=b]", "guard [f=a]"]);
}

#[test]
fn stay_return_value_is_ignored() {
    let trace = Trace::default();
    let registry = registry(&trace).with("sulk", |_| false);
    let mut raw = document();
    raw["callbacks"]["stay"]["b"] = json!("sulk");
    let mut machine = Machine::from_value(&raw, &registry).unwrap();

    machine.step(1);
    let outcome = machine.step(1);

    assert_eq!(
        outcome,
        StepOutcome::Stayed {
            state: "b".to_string()
        }
    );
    assert_eq!(lines(&trace).last().unwrap(), "after [f=b;o=1;t=b]");
}

#[test]
fn after_fires_once_per_committed_step() {
    let trace = Trace::default();
    let mut machine = Machine::from_value(&document(), &registry(&trace)).unwrap();

    let outcomes: Vec<StepOutcome> = [2, 1, 1, 9].into_iter().map(|e| machine.step(e)).collect();

    let committed = outcomes.iter().filter(|o| o.is_committed()).count();
    let afters = lines(&trace)
        .iter()
        .filter(|line| line.starts_with("after"))
        .count();
    assert_eq!(committed, 3);
    assert_eq!(afters, committed);
    assert_eq!(machine.history().len(), committed);
}

#[test]
fn definition_is_shared_between_machines() {
    let trace = Trace::default();
    let mut first = Machine::from_value(&document(), &registry(&trace)).unwrap();
    let mut second = Machine::new(Arc::clone(first.definition()));

    first.step(1);

    assert_eq!(first.current(), "b");
    assert_eq!(second.current(), "a");
    second.step(2);
    assert_eq!(second.current(), "a");
}

#[test]
fn json_text_round_trips_through_machine() {
    let trace = Trace::default();
    let text = document().to_string();
    let mut machine = Machine::from_json(&text, &registry(&trace)).unwrap();

    assert!(machine.step(1).state_changed());
    assert_eq!(machine.current(), "b");
}
