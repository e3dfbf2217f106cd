//! Copies of built-in value types.
//!
//! Dates, patterns, buffers and typed views are leaves: their slots hold no
//! references, so they are copied by value and never registered. Maps and
//! sets are composites and register before walking their elements.

use deepit_value::{MapData, ObjectKind, ObjectRef, RegExpData, SetData};

use crate::engine::Walker;
use crate::error::CloneResult;

/// New date at the same epoch timestamp. Invalid dates stay invalid.
pub(crate) fn clone_date(source: &ObjectRef) -> CloneResult<ObjectRef> {
    let time = source.date_value()?;
    Ok(ObjectRef::new(source.prototype(), ObjectKind::Date(time)))
}

/// New matcher compiled from the same source and flags.
pub(crate) fn clone_regexp(source: &ObjectRef) -> CloneResult<ObjectRef> {
    let data = source.regexp_data()?;
    let fresh = RegExpData::new(data.source(), data.flags())?;
    Ok(ObjectRef::new(source.prototype(), ObjectKind::RegExp(fresh)))
}

/// Keys and values are both deep-copied, at the depth the configured
/// accounting assigns to collection members.
pub(crate) fn clone_map(
    walker: &mut Walker<'_>,
    source: &ObjectRef,
    depth: usize,
) -> CloneResult<ObjectRef> {
    let copy = ObjectRef::new(source.prototype(), ObjectKind::Map(MapData::new()));
    walker.register(source, &copy);

    let entries = source.map_entries()?;
    let member_depth = walker.collection_depth(depth);
    for (key, value) in &entries {
        let key = walker.walk(key, member_depth)?;
        let value = walker.walk(value, member_depth)?;
        copy.map_set(key, value)?;
    }
    Ok(copy)
}

pub(crate) fn clone_set(
    walker: &mut Walker<'_>,
    source: &ObjectRef,
    depth: usize,
) -> CloneResult<ObjectRef> {
    let copy = ObjectRef::new(source.prototype(), ObjectKind::Set(SetData::new()));
    walker.register(source, &copy);

    let values = source.set_values()?;
    let member_depth = walker.collection_depth(depth);
    for value in &values {
        let value = walker.walk(value, member_depth)?;
        copy.set_add(value)?;
    }
    Ok(copy)
}

/// Byte-for-byte copy into new storage.
pub(crate) fn clone_array_buffer(source: &ObjectRef) -> CloneResult<ObjectRef> {
    let bytes = source.buffer_bytes()?;
    Ok(ObjectRef::new(source.prototype(), ObjectKind::ArrayBuffer(bytes)))
}

/// New view of the same element type and length, elements copied.
pub(crate) fn clone_typed_array(source: &ObjectRef) -> CloneResult<ObjectRef> {
    let view = source.typed_array_view()?;
    Ok(ObjectRef::new(source.prototype(), ObjectKind::TypedArray(view)))
}
