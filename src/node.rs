//! The output tree.

use indexmap::IndexMap;

use crate::Value;

/// A node of the output tree: a name, attributes, an optional scalar value
/// and ordered children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputNode {
    name: String,
    attributes: IndexMap<String, Value>,
    value: Option<Value>,
    children: Vec<OutputNode>,
}

impl OutputNode {
    /// An empty node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A node holding `value`; a null value leaves it empty.
    pub fn leaf(name: impl Into<String>, value: Value) -> Self {
        let mut node = Self::new(name);
        node.set_value(value);
        node
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's value, if it has one.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The node's value as text.
    pub fn text(&self) -> Option<String> {
        self.value.as_ref().and_then(Value::to_text)
    }

    /// Replace the node's value; null clears it.
    pub fn set_value(&mut self, value: Value) {
        self.value = (!value.is_null()).then_some(value);
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A single attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Add or replace an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[OutputNode] {
        &self.children
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&OutputNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OutputNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Append a child and return it.
    pub fn push(&mut self, child: OutputNode) -> &mut OutputNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }
}
