//! Structural equality over value graphs.

use std::collections::HashSet;

use crate::key::PropertyKey;
use crate::object::{ObjectId, ObjectKind, ObjectRef};
use crate::value::Value;

/// Deep structural equality.
///
/// Objects are equal when they carry the same tag, equal built-in slots and
/// the same own enumerable keys with deeply equal values. Prototypes are not
/// compared. Error objects compare by `name` and `message` only. `NaN`
/// equals `NaN`; functions and symbols compare by identity.
///
/// Cyclic graphs terminate: a pair of objects already under comparison is
/// assumed equal. Map and set members are matched without positional
/// correspondence, so each candidate pairing is tried on its own copy of
/// that bookkeeping.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut in_progress = HashSet::new();
    values_equal(a, b, &mut in_progress)
}

fn values_equal(a: &Value, b: &Value, in_progress: &mut HashSet<(ObjectId, ObjectId)>) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => objects_equal(x, y, in_progress),
        (Value::Number(x), Value::Number(y)) => (x.is_nan() && y.is_nan()) || x == y,
        _ => a.strict_equals(b),
    }
}

fn objects_equal(
    x: &ObjectRef,
    y: &ObjectRef,
    in_progress: &mut HashSet<(ObjectId, ObjectId)>,
) -> bool {
    if x.ptr_eq(y) || !in_progress.insert((x.id(), y.id())) {
        return true;
    }
    if x.tag() != y.tag() {
        return false;
    }

    let slots_equal = match (x.kind(), y.kind()) {
        (ObjectKind::Array(xs), ObjectKind::Array(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(&ys)
                    .all(|(a, b)| values_equal(a, b, in_progress))
        }
        (ObjectKind::Date(a), ObjectKind::Date(b)) => a == b,
        (ObjectKind::RegExp(a), ObjectKind::RegExp(b)) => a == b,
        (ObjectKind::Map(a), ObjectKind::Map(b)) => {
            a.len() == b.len()
                && a.entries().all(|(ka, va)| {
                    b.entries().any(|(kb, vb)| {
                        let mut trial = in_progress.clone();
                        values_equal(ka, kb, &mut trial) && values_equal(va, vb, &mut trial)
                    })
                })
        }
        (ObjectKind::Set(a), ObjectKind::Set(b)) => {
            a.len() == b.len()
                && a
                    .values()
                    .all(|va| b.values().any(|vb| values_equal(va, vb, &mut in_progress.clone())))
        }
        (ObjectKind::ArrayBuffer(a), ObjectKind::ArrayBuffer(b)) => a == b,
        (ObjectKind::TypedArray(a), ObjectKind::TypedArray(b)) => a == b,
        (ObjectKind::Error, ObjectKind::Error) => {
            return values_equal(&x.get("name"), &y.get("name"), in_progress)
                && values_equal(&x.get("message"), &y.get("message"), in_progress);
        }
        (ObjectKind::Ordinary, ObjectKind::Ordinary) | (ObjectKind::Host(_), ObjectKind::Host(_)) => {
            true
        }
        _ => false,
    };

    slots_equal && properties_equal(x, y, in_progress)
}

fn enumerable_keys(obj: &ObjectRef) -> Vec<PropertyKey> {
    obj.own_keys()
        .into_iter()
        .filter(|key| {
            obj.get_own_property(key)
                .is_some_and(|property| property.is_enumerable())
        })
        .collect()
}

fn properties_equal(
    x: &ObjectRef,
    y: &ObjectRef,
    in_progress: &mut HashSet<(ObjectId, ObjectId)>,
) -> bool {
    let xs = enumerable_keys(x);
    let ys = enumerable_keys(y);
    if xs.len() != ys.len() || !xs.iter().all(|key| ys.contains(key)) {
        return false;
    }
    xs.iter()
        .all(|key| values_equal(&x.get(key), &y.get(key), in_progress))
}
