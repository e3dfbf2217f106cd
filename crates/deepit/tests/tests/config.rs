//! Options loaded from JSON configuration drive the engine end to end.

use deepit_clone::{CloneOptions, CloneReport, DeepCloner, DepthAccounting};
use deepit_tests::{init_tracing, nested, object};
use deepit_value::Value;
use serde_json::json;

#[test]
fn json_options_drive_a_clone() {
    init_tracing();
    let options: CloneOptions = serde_json::from_value(json!({
        "maxDepth": 5,
        "skipKeys": ["password", "token"],
    }))
    .unwrap();
    assert_eq!(options.depth_accounting, DepthAccounting::Legacy);

    let user = Value::object([
        ("name", Value::from("ada")),
        ("password", Value::from("x")),
        ("session", Value::object([("token", Value::from("t"))])),
    ]);
    let copy = object(&DeepCloner::new(options).clone_value(&user).unwrap());
    assert!(!copy.has_own("password"));
    assert!(!object(&copy.get("session")).has_own("token"));
}

#[test]
fn empty_document_means_defaults() {
    let options: CloneOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, CloneOptions::default());
    assert!(DeepCloner::new(options).clone_value(&nested(64)).is_ok());
}

#[test]
fn unknown_accounting_mode_is_rejected() {
    let result = serde_json::from_value::<CloneOptions>(json!({ "depthAccounting": "sideways" }));
    assert!(result.is_err());
}

#[test]
fn options_serialize_with_camel_case_keys() {
    let options = CloneOptions::new()
        .with_max_depth(2)
        .skip_key("secret")
        .with_depth_accounting(DepthAccounting::Uniform);
    let value = serde_json::to_value(&options).unwrap();
    assert_eq!(
        value,
        json!({ "maxDepth": 2, "skipKeys": ["secret"], "depthAccounting": "uniform" })
    );
}

#[test]
fn report_serializes_for_diagnostics() {
    init_tracing();
    let (_, report) = DeepCloner::default()
        .clone_with_report(&nested(3))
        .unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["composites_cloned"], 3);
    assert_eq!(value["deepest"], 2);

    let back: CloneReport = serde_json::from_value(value).unwrap();
    assert_eq!(back, report);
}
