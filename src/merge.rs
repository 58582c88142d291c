//! First-write-wins population of records from data bags.

use crate::{Map, Record, Result, Value};

/// Write each entry of `data` into `target` through its setter.
///
/// An entry is skipped when the property already holds a truthy value, or
/// when the incoming value is falsy, so populated properties are never
/// overwritten and empty data is never written. Keys with no setter are
/// dropped; they never reach side storage.
///
/// Entries are written in order and nothing is rolled back: when a key fails
/// to normalize or a setter rejects its value, the entries before it stay
/// written.
pub fn merge_into<R: Record>(target: &mut R, data: &Map) -> Result<()> {
    log::trace!(
        "Merging {} entries into `{}`",
        data.len(),
        target.element_name()
    );
    let descriptor = R::descriptor();

    for (key, value) in data {
        let property = descriptor.lookup(key)?;

        let current = match property.and_then(|p| p.getter()) {
            Some(getter) => getter(&*target)?,
            None => Value::Null,
        };
        if !current.is_falsy() || value.is_falsy() {
            log::trace!("Skipping {key}: already set or nothing to write");
            continue;
        }

        match property.and_then(|p| p.setter().map(|setter| (p, setter))) {
            Some((property, setter)) => {
                log::trace!("Merging {key} via {}", property.setter_name());
                setter(&mut *target, value.clone())?;
            }
            None => log::debug!(
                "Dropping {key}: `{}` has no setter for it",
                target.element_name()
            ),
        }
    }

    Ok(())
}
