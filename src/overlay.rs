//! Map-like access to a record.
//!
//! Keys that resolve to a declared property go through its accessors; any
//! other key lives in the record's side storage. `has` is asymmetric: a
//! declared property is present only when its value is truthy, while a side
//! storage key is present whenever it holds a non-null value.

use crate::{Property, Record, Result, Value};

/// Where a key is routed.
#[derive(Debug)]
pub enum Access<R: 'static> {
    /// The key names a declared property.
    Bound(&'static Property<R>),
    /// The key has no declared property; it lives in side storage.
    Loose(String),
}

/// Route `key` for records of type `R`.
pub fn access<R: Record>(key: &str) -> Result<Access<R>> {
    Ok(match R::descriptor().lookup(key)? {
        Some(property) => Access::Bound(property),
        None => Access::Loose(key.to_owned()),
    })
}

/// Read `key`.
pub fn get<R: Record>(record: &R, key: &str) -> Result<Option<Value>> {
    if let Access::Bound(property) = access::<R>(key)? {
        if let Some(getter) = property.getter() {
            return getter(record).map(Some);
        }
    }

    Ok(record.base().side_storage().get(key).cloned())
}

/// Write `key`.
pub fn set<R: Record>(record: &mut R, key: &str, value: Value) -> Result<()> {
    if let Access::Bound(property) = access::<R>(key)? {
        if let Some(setter) = property.setter() {
            log::trace!("Setting {} via {}", key, property.setter_name());
            return setter(record, value);
        }
    }

    log::trace!("Storing {key} in side storage of `{}`", record.element_name());
    record
        .base_mut()
        .side_storage_mut()
        .insert(key.to_owned(), value);
    Ok(())
}

/// Whether `key` is present.
pub fn has<R: Record>(record: &R, key: &str) -> Result<bool> {
    if let Access::Bound(property) = access::<R>(key)? {
        if let Some(getter) = property.getter() {
            return Ok(!getter(record)?.is_falsy());
        }
    }

    Ok(record
        .base()
        .side_storage()
        .get(key)
        .is_some_and(|value| !value.is_null()))
}

/// Reset `key`: declared properties are set to null, side storage entries
/// are removed.
pub fn delete<R: Record>(record: &mut R, key: &str) -> Result<()> {
    if let Access::Bound(property) = access::<R>(key)? {
        if let Some(setter) = property.setter() {
            return setter(record, Value::Null);
        }
    }

    record.base_mut().side_storage_mut().shift_remove(key);
    Ok(())
}
