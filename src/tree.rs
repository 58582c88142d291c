//! Expansion of records into output trees.

use crate::{AnyRecord, Map, OutputNode, Record, RecordErrorKind, Result, Value, merge};

/// Merge `data` into `target` when given, then expand `target` into a tree.
///
/// The root is named after the record. Each flattened property becomes:
///
/// - nothing, when it is null or `""` (zero and `false` are kept);
/// - a leaf named after the property, when it is a scalar;
/// - a subtree, when it is a record or a prebuilt node;
/// - for collections, one entry at a time: an entry under a named key gets
///   a wrapper node of that name, an entry under a numeric key is attached
///   directly to the current node.
pub fn build_tree<R: Record>(target: &mut R, data: Option<&Map>) -> Result<OutputNode> {
    if let Some(data) = data {
        merge::merge_into(target, data)?;
    }

    log::trace!("Building tree for `{}`", target.element_name());
    let mut root = OutputNode::new(target.element_name());
    append_properties(&mut root, target.data_properties(true)?)?;
    Ok(root)
}

/// Build the subtree of a nested record.
pub fn record_node(record: &dyn AnyRecord) -> Result<OutputNode> {
    let mut node = OutputNode::new(record.node_name());
    append_properties(&mut node, record.flatten(true)?)?;
    Ok(node)
}

fn append_properties(node: &mut OutputNode, properties: Map) -> Result<()> {
    for (key, value) in properties {
        if value.is_blank() {
            continue;
        }

        match value {
            Value::List(items) => {
                for item in items {
                    append_item(node, None, item)?;
                }
            }
            Value::Map(entries) => {
                for (item_key, item) in entries {
                    let wrapper = (!is_numeric_key(&item_key)).then_some(item_key);
                    append_item(node, wrapper, item)?;
                }
            }
            Value::Record(record) => {
                node.push(record_node(record.as_ref())?);
            }
            Value::Node(child) => {
                node.push(*child);
            }
            scalar => {
                node.push(OutputNode::leaf(key, scalar));
            }
        }
    }

    Ok(())
}

/// Attach one collection entry, under a fresh wrapper when it has a name.
fn append_item(node: &mut OutputNode, wrapper: Option<String>, item: Value) -> Result<()> {
    let Some(wrapper) = wrapper else {
        return append_item_contents(node, item);
    };

    log::trace!("Wrapping {} entry in `{wrapper}`", item.type_name());
    let mut wrapper = OutputNode::new(wrapper);
    if item.is_scalar() {
        wrapper.set_value(item);
    } else if !item.is_null() {
        append_item_contents(&mut wrapper, item)?;
    }
    node.push(wrapper);
    Ok(())
}

fn append_item_contents(parent: &mut OutputNode, item: Value) -> Result<()> {
    match item {
        Value::Record(record) => {
            parent.push(record_node(record.as_ref())?);
        }
        Value::Node(child) => {
            parent.push(*child);
        }
        Value::List(entries) => {
            for (index, entry) in entries.into_iter().enumerate() {
                append_entry(parent, index.to_string(), entry)?;
            }
        }
        Value::Map(entries) => {
            for (key, entry) in entries {
                append_entry(parent, key, entry)?;
            }
        }
        other => {
            log::debug!(
                "Dropping unnamed {} entry under `{}`",
                other.type_name(),
                parent.name()
            );
        }
    }

    Ok(())
}

fn append_entry(parent: &mut OutputNode, key: String, entry: Value) -> Result<()> {
    match entry {
        Value::Record(record) => {
            parent.push(record_node(record.as_ref())?);
        }
        Value::Node(child) => {
            parent.push(*child);
        }
        Value::List(_) | Value::Map(_) => {
            return Err(RecordErrorKind::UnsupportedValue(format!(
                "collection under `{}` in `{}` is nested too deeply to expand",
                key,
                parent.name()
            ))
            .into());
        }
        scalar => {
            parent.push(OutputNode::leaf(key, scalar));
        }
    }

    Ok(())
}

/// Whether a collection key counts as numeric: optional leading
/// whitespace, then a decimal integer or float literal.
pub(crate) fn is_numeric_key(key: &str) -> bool {
    let number = key.trim_start();
    !number.is_empty()
        && number
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && number.bytes().any(|b| b.is_ascii_digit())
        && number.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::is_numeric_key;

    #[test]
    fn numeric_keys() {
        for key in ["0", "12", "-3", "1.5", " 7", "1e3", ".5"] {
            assert!(is_numeric_key(key), "{key}");
        }
        for key in ["", "foo", "1a", "inf", "NaN", "e", "-", "1-2"] {
            assert!(!is_numeric_key(key), "{key}");
        }
    }
}
