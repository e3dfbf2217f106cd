//! Shared fixtures for the deepit integration and property tests.

use std::sync::Once;

use deepit_value::{ObjectRef, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING: Once = Once::new();

/// Install a test-friendly subscriber once per test binary.
///
/// Silent unless `RUST_LOG` asks for output, e.g. `RUST_LOG=deepit_clone=trace`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "off".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .without_time(),
            )
            .try_init();
    });
}

/// Unwrap an object handle out of a value.
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn object(value: &Value) -> ObjectRef {
    match value.as_object() {
        Some(obj) => obj.clone(),
        None => panic!("expected an object, got {value:?}"),
    }
}

/// `{ x: 1, ...extra, self: <itself> }`
///
/// # Panics
///
/// Panics if any property cannot be assigned.
pub fn self_referencing(extra: &[(&str, Value)]) -> ObjectRef {
    let node = ObjectRef::from_entries([("x", Value::from(1))]);
    for (key, value) in extra {
        node.set(*key, value.clone()).unwrap();
    }
    node.set("self", Value::Object(node.clone())).unwrap();
    node
}

/// `{ p: shared, q: shared }` together with `shared`.
pub fn shared_pair() -> (Value, ObjectRef) {
    let shared = ObjectRef::plain();
    let root = Value::object([
        ("p", Value::Object(shared.clone())),
        ("q", Value::Object(shared.clone())),
    ]);
    (root, shared)
}

/// `levels` objects nested through a `child` key around a string leaf.
pub fn nested(levels: usize) -> Value {
    (0..levels).fold(Value::from("leaf"), |inner, _| {
        Value::object([("child", inner)])
    })
}

/// Number of object levels in a chain built by [`nested`].
pub fn chain_len(value: &Value) -> usize {
    let mut len = 0;
    let mut cursor = value.clone();
    while let Some(obj) = cursor.as_object().cloned() {
        len += 1;
        cursor = obj.get("child");
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_chain_has_requested_length() {
        assert_eq!(chain_len(&nested(0)), 0);
        assert_eq!(chain_len(&nested(5)), 5);
    }

    #[test]
    fn self_reference_points_home() {
        let node = self_referencing(&[("flag", Value::from(true))]);
        assert!(object(&node.get("self")).ptr_eq(&node));
        assert_eq!(node.get("flag").as_bool(), Some(true));
        assert_eq!(node.own_keys().len(), 3);
    }
}
