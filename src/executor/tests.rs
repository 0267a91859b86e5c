use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::parser;
use crate::registry::ConsoleCommand;

fn defs() -> Vec<ArgumentDefinition> {
    vec![
        ArgumentDefinition::new("target", ArgumentType::String),
        ArgumentDefinition::new("jobs", ArgumentType::Int32).optional(),
        ArgumentDefinition::new("verbose", ArgumentType::Flag),
    ]
}

fn params(line: &str) -> Vec<Parameter> {
    parser::parse(line).unwrap().parameters
}

#[test]
fn test_bind_named_arguments() {
    let bound =
        bind_arguments(&defs(), &params("build target: release jobs: 4 --verbose")).unwrap();
    assert_eq!(
        bound.get("target"),
        Some(&ArgumentValue::String("release".to_string()))
    );
    assert_eq!(bound.get("jobs"), Some(&ArgumentValue::Int32(4)));
    assert_eq!(bound.get("verbose"), Some(&ArgumentValue::Flag(true)));
}

#[test]
fn test_bind_missing_flag_defaults_false() {
    let bound = bind_arguments(&defs(), &params("build target: release")).unwrap();
    assert_eq!(bound.get("verbose"), Some(&ArgumentValue::Flag(false)));
}

#[test]
fn test_bind_positional_fills_mandatory_first() {
    // `target` is the only missing mandatory definition, so the positional
    // value binds to it ahead of the optional `jobs`
    let bound = bind_arguments(&defs(), &params("build release")).unwrap();
    assert_eq!(
        bound.get("target"),
        Some(&ArgumentValue::String("release".to_string()))
    );
    assert_eq!(bound.get("jobs"), None);

    let bound = bind_arguments(&defs(), &params("build release 8")).unwrap();
    assert_eq!(bound.get("jobs"), Some(&ArgumentValue::Int32(8)));
}

#[test]
fn test_bind_positional_skips_named_definitions() {
    let bound = bind_arguments(&defs(), &params("build jobs: 2 release")).unwrap();
    assert_eq!(
        bound.get("target"),
        Some(&ArgumentValue::String("release".to_string()))
    );
    assert_eq!(bound.get("jobs"), Some(&ArgumentValue::Int32(2)));
}

#[test]
fn test_bind_duplicate_parameter() {
    let err = bind_arguments(&defs(), &params("build target: a target: b")).unwrap_err();
    assert_eq!(err.code, "DUPLICATE_PARAMETER");
    assert!(err.contains_msg("target"));

    // A flag repeated is a duplicate too
    let err = bind_arguments(&defs(), &params("build --verbose --verbose")).unwrap_err();
    assert_eq!(err.code, "DUPLICATE_PARAMETER");
}

#[test]
fn test_bind_unknown_parameter() {
    let err = bind_arguments(&defs(), &params("build traget: release")).unwrap_err();
    assert_eq!(err.code, "UNKNOWN_PARAMETER");
    assert!(err.contains_msg("traget"));
}

#[test]
fn test_bind_too_few_arguments() {
    let err = bind_arguments(&defs(), &params("build")).unwrap_err();
    assert_eq!(err.code, "TOO_FEW_ARGS");
}

#[test]
fn test_bind_too_many_arguments() {
    let err = bind_arguments(&defs(), &params("build a 1 extra")).unwrap_err();
    assert_eq!(err.code, "TOO_MANY_ARGS");
}

#[test]
fn test_bind_invalid_argument_type() {
    let err = bind_arguments(&defs(), &params("build target: x jobs: lots")).unwrap_err();
    assert_eq!(err.code, "INVALID_ARGUMENT");
    assert!(err.contains_msg("jobs"));
}

#[test]
fn test_bind_bool_accepts_numeric_forms() {
    let defs = vec![ArgumentDefinition::new("on", ArgumentType::Bool)];
    for (raw, expected) in [("true", true), ("1", true), ("false", false), ("0", false)] {
        let bound = bind_arguments(&defs, &params(&format!("cmd on: {raw}"))).unwrap();
        assert_eq!(bound.get("on"), Some(&ArgumentValue::Bool(expected)), "raw: {raw}");
    }
    let err = bind_arguments(&defs, &params("cmd on: yes")).unwrap_err();
    assert_eq!(err.code, "INVALID_ARGUMENT");
}

#[test]
fn test_bind_numeric_types() {
    let defs = vec![
        ArgumentDefinition::new("a", ArgumentType::Float32),
        ArgumentDefinition::new("b", ArgumentType::Float64),
        ArgumentDefinition::new("c", ArgumentType::Int64),
    ];
    let bound = bind_arguments(&defs, &params("cmd a: 1.5 b: 2.25 c: 9000000000")).unwrap();
    assert_eq!(bound.get("a"), Some(&ArgumentValue::Float32(1.5)));
    assert_eq!(bound.get("b"), Some(&ArgumentValue::Float64(2.25)));
    assert_eq!(bound.get("c"), Some(&ArgumentValue::Int64(9_000_000_000)));
}

#[test]
fn test_dispatch_invokes_callback() {
    let seen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let seen_inner = seen.clone();
    let mut registry = CommandRegistry::new().register(
        "echo",
        ConsoleCommand::new(
            move |args| {
                if let Some(ArgumentValue::String(s)) = args.get("message") {
                    *seen_inner.borrow_mut() = Some(s.clone());
                }
                Ok(())
            },
            vec![ArgumentDefinition::new("message", ArgumentType::String)],
            "echo a message",
        ),
    );

    dispatch(&mut registry, "echo \"hello world\"").unwrap();
    assert_eq!(seen.borrow().as_deref(), Some("hello world"));
}

#[test]
fn test_dispatch_unknown_command_with_suggestions() {
    let mut registry = CommandRegistry::new()
        .register("spawn", ConsoleCommand::new(|_| Ok(()), Vec::new(), "spawn"))
        .register(
            "spawn_many",
            ConsoleCommand::new(|_| Ok(()), Vec::new(), "spawn several"),
        );

    let err = dispatch(&mut registry, "spaw").unwrap_err();
    assert_eq!(err.code, "UNKNOWN_COMMAND");
    assert!(err.contains_msg("spawn, spawn_many"));

    let err = dispatch(&mut registry, "teleport").unwrap_err();
    assert_eq!(err.code, "UNKNOWN_COMMAND");
    assert!(!err.contains_msg("did you mean"));
}

#[test]
fn test_dispatch_propagates_parse_error() {
    let mut registry = CommandRegistry::new();
    let err = dispatch(&mut registry, "cmd \"unterminated").unwrap_err();
    assert_eq!(err.code, "UNTERMINATED_STRING");
    assert_eq!(err.kind, crate::error::ErrorKind::Parse);
}

#[test]
fn test_dispatch_callback_failure() {
    let mut registry = CommandRegistry::new().register(
        "fail",
        ConsoleCommand::new(|_| Err("deliberate".to_string()), Vec::new(), "always fails"),
    );
    let err = dispatch(&mut registry, "fail").unwrap_err();
    assert_eq!(err.code, "COMMAND_FAILED");
    assert!(err.contains_msg("deliberate"));
}
