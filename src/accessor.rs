//! Resolution of data keys to canonical property names and accessor names.
//!
//! A key such as `"_first_name"`, `"first_name"` or `"FirstName"` all resolve
//! to the canonical name `FirstName`, whose accessors are `getFirstName` and
//! `setFirstName`.

use crate::{RecordErrorKind, Result};

/// Marks a property name as internal; one leading occurrence is ignored.
pub const INTERNAL_MARKER: char = '_';

const SEGMENT_SEPARATOR: char = '_';

/// Returns `name` without one leading [`INTERNAL_MARKER`], if present.
pub fn strip_marker(name: &str) -> &str {
    name.strip_prefix(INTERNAL_MARKER).unwrap_or(name)
}

/// Normalize a property name: `"_first_name"` becomes `"FirstName"`.
///
/// Each underscore-delimited segment has its first character upper-cased;
/// the rest of the segment is left untouched. Normalizing an already
/// normalized name returns it unchanged.
pub fn normalize(name: &str) -> Result<String> {
    let canonical: String = strip_marker(name)
        .split(SEGMENT_SEPARATOR)
        .map(upper_first)
        .collect();

    if canonical.is_empty() {
        return Err(RecordErrorKind::InvalidArgument(format!(
            "property name {name:?} does not resolve to an accessor"
        ))
        .into());
    }

    Ok(upper_first(&canonical))
}

/// Name of the getter bound to `name`, e.g. `getFirstName`.
pub fn getter_of(name: &str) -> Result<String> {
    Ok(format!("get{}", normalize(name)?))
}

/// Name of the setter bound to `name`, e.g. `setFirstName`.
pub fn setter_of(name: &str) -> Result<String> {
    Ok(format!("set{}", normalize(name)?))
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
