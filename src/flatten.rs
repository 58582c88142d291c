//! Projection of a record onto a flat map keyed by output name.

use crate::{Map, Record, Result, Value};

/// Read every declared property of `record` into a map keyed by canonical
/// name, in declaration order.
///
/// Properties without a getter read as null. A null optional property is
/// left out; a null non-optional property is kept. Unless `keep_nested` is
/// set, nested records are replaced by their own flat maps, recursively for
/// a direct record value and one level deep inside collections.
pub fn data_properties<R: Record>(record: &R, keep_nested: bool) -> Result<Map> {
    let mut data = Map::new();

    for property in R::descriptor().properties() {
        let mut value = match property.getter() {
            Some(getter) => getter(record)?,
            None => Value::Null,
        };

        if !keep_nested {
            value = flatten_nested(value)?;
        }

        if value.is_null() && property.is_optional() {
            log::trace!("Leaving out optional {}", property.name());
            continue;
        }

        data.insert(property.canonical_name().to_owned(), value);
    }

    Ok(data)
}

fn flatten_nested(value: Value) -> Result<Value> {
    Ok(match value {
        Value::Record(record) => Value::Map(record.flatten(false)?),
        Value::List(items) => Value::List(
            items
                .into_iter()
                .map(flatten_entry)
                .collect::<Result<_>>()?,
        ),
        Value::Map(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, item)| flatten_entry(item).map(|item| (key, item)))
                .collect::<Result<_>>()?,
        ),
        other => other,
    })
}

fn flatten_entry(item: Value) -> Result<Value> {
    match item {
        Value::Record(record) => Ok(Value::Map(record.flatten(false)?)),
        other => Ok(other),
    }
}
