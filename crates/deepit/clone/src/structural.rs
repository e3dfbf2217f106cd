//! Property-by-property copies: arrays, ordinary and fallback objects, errors.

use deepit_value::{ObjectKind, ObjectRef, Property};

use crate::engine::Walker;
use crate::error::CloneResult;

/// Copy an array element by element. Holes come across as `undefined`.
/// Own non-index properties of the array are not copied.
pub(crate) fn clone_array(
    walker: &mut Walker<'_>,
    source: &ObjectRef,
    depth: usize,
) -> CloneResult<ObjectRef> {
    let copy = ObjectRef::new(source.prototype(), ObjectKind::Array(Vec::new()));
    walker.register(source, &copy);

    let elements = source.array_elements()?;
    let child_depth = walker.child_depth(depth);
    for (index, element) in elements.iter().enumerate() {
        let element = walker.walk(element, child_depth)?;
        copy.array_set(index, element)?;
    }
    Ok(copy)
}

/// Copy an ordinary or fallback object, descriptor by descriptor.
///
/// The copy shares the source's prototype. Every own key is visited,
/// non-enumerable and symbol keys included, in own-key order. Data
/// properties keep their flags and get a deep copy of their value.
/// Accessor properties are installed as they are: the copy calls the very
/// same getter and setter, and whatever state those functions close over
/// stays shared between source and copy.
///
/// Host objects keep their tag but none of their host-internal state.
pub(crate) fn clone_object(
    walker: &mut Walker<'_>,
    source: &ObjectRef,
    depth: usize,
) -> CloneResult<ObjectRef> {
    let kind = match source.kind() {
        host @ ObjectKind::Host(_) => host,
        _ => ObjectKind::Ordinary,
    };
    let copy = ObjectRef::new(source.prototype(), kind);
    walker.register(source, &copy);

    let child_depth = walker.child_depth(depth);
    for key in source.own_keys() {
        if walker.skips(&key) {
            continue;
        }
        let Some(property) = source.get_own_property(&key) else {
            continue;
        };
        let property = match property {
            Property::Data {
                value,
                writable,
                enumerable,
                configurable,
            } => Property::Data {
                value: walker.walk(&value, child_depth)?,
                writable,
                enumerable,
                configurable,
            },
            accessor @ Property::Accessor { .. } => accessor,
        };
        copy.define_property(key, property)?;
    }
    Ok(copy)
}

/// Copy an error: same prototype, and only `name`, `message` and `stack`,
/// read through the prototype chain and assigned as-is without a deep copy.
/// Other own properties are dropped. The copy is not registered, so an
/// error reached twice is copied twice.
pub(crate) fn clone_error(source: &ObjectRef) -> CloneResult<ObjectRef> {
    let copy = ObjectRef::new(source.prototype(), ObjectKind::Error);
    for field in ["name", "message", "stack"] {
        copy.set(field, source.get(field))?;
    }
    Ok(copy)
}
