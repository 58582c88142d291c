//! Rendering output trees as KDL.
//!
//! A node's value becomes its first argument, attributes become KDL
//! properties, and children go in a child block.

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};

use crate::{OutputNode, Value};

/// Rendering options.
#[derive(Debug, Clone)]
pub struct KdlOptions {
    /// Run KDL autoformatting on the rendered document.
    pub autoformat: bool,
}

impl Default for KdlOptions {
    fn default() -> Self {
        Self { autoformat: true }
    }
}

/// Render `root` as a one-node KDL document.
pub fn to_document(root: &OutputNode) -> KdlDocument {
    to_document_with(root, &KdlOptions::default())
}

/// Render `root` as a one-node KDL document with explicit options.
pub fn to_document_with(root: &OutputNode, options: &KdlOptions) -> KdlDocument {
    let mut document = KdlDocument::new();
    document.nodes_mut().push(to_kdl_node(root));
    if options.autoformat {
        document.autoformat();
    }
    document
}

/// Render `root` as KDL text.
pub fn to_string(root: &OutputNode) -> String {
    to_document(root).to_string()
}

fn to_kdl_node(node: &OutputNode) -> KdlNode {
    let mut res = KdlNode::new(node.name());

    if let Some(value) = node.value().and_then(to_kdl_value) {
        res.push(value);
    }

    for (name, value) in node.attributes() {
        match to_kdl_value(value) {
            Some(value) => res.push(KdlEntry::new_prop(name, value)),
            None => log::debug!(
                "Attribute {name} of `{}` holds a {}, which has no KDL form",
                node.name(),
                value.type_name()
            ),
        }
    }

    if !node.children().is_empty() {
        let mut children = KdlDocument::new();
        for child in node.children() {
            children.nodes_mut().push(to_kdl_node(child));
        }
        res.set_children(children);
    }

    res
}

fn to_kdl_value(value: &Value) -> Option<KdlValue> {
    Some(match value {
        Value::Null => KdlValue::Null,
        Value::Bool(b) => (*b).into(),
        Value::Int(i) => i128::from(*i).into(),
        Value::Float(f) => (*f).into(),
        Value::String(s) => s.as_str().into(),
        Value::List(_) | Value::Map(_) | Value::Record(_) | Value::Node(_) => return None,
    })
}
