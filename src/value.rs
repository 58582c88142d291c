//! Loosely-typed data carried between data bags, records and output trees.

use std::fmt;

use indexmap::IndexMap;

use crate::{AnyRecord, OutputNode, Record};

/// Ordered string-keyed mapping, the shape of every data bag.
pub type Map = IndexMap<String, Value>;

/// Build a [`Map`] from key/value pairs, keeping their order.
pub fn map_of<I, K, V>(entries: I) -> Map
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// A loosely-typed value.
///
/// Lists stand for numerically keyed collections, maps for named ones.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Numerically keyed collection.
    List(Vec<Value>),
    /// Collection with named keys, in insertion order.
    Map(Map),
    /// A nested record.
    Record(Box<dyn AnyRecord>),
    /// A prebuilt output node.
    Node(Box<OutputNode>),
}

impl Value {
    /// Wrap a record.
    pub fn record<R: Record>(record: R) -> Self {
        Value::Record(Box::new(record))
    }

    /// Whether this value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this is a bool, number or string.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_)
        )
    }

    /// Falsiness used when merging data and when probing declared
    /// properties: null, `false`, zero, `""`, `"0"` and empty collections.
    ///
    /// Records and nodes are never falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty() || s == "0",
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Record(_) | Value::Node(_) => false,
        }
    }

    /// Emptiness used when expanding a tree: only null and `""`.
    ///
    /// Unlike [`Value::is_falsy`], zero and `false` are not blank and still
    /// produce output nodes.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Node(_) => "node",
        }
    }

    /// The string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The bool, if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The nested record, if it is an `R`.
    pub fn as_record<R: Record>(&self) -> Option<&R> {
        match self {
            Value::Record(record) => record.as_any().downcast_ref::<R>(),
            _ => None,
        }
    }

    /// Text form of a scalar; `None` for null and non-scalars.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => {
                a.node_name() == b.node_name()
                    && matches!(
                        (a.flatten(true), b.flatten(true)),
                        (Ok(a), Ok(b)) if a == b
                    )
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => write!(f, "<{}>", self.type_name()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<OutputNode> for Value {
    fn from(value: OutputNode) -> Self {
        Value::Node(Box::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Conversion of a record field into a [`Value`] when it is read.
pub trait ToValue {
    /// Snapshot of the field as a value.
    fn to_value(&self) -> Value;
}

/// Conversion of a [`Value`] into a record field when it is written.
pub trait FromValue: Sized {
    /// What the conversion accepts, for error messages.
    const EXPECTED: &'static str;

    /// Convert, handing the value back when it does not fit.
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            Value::Int(_) | Value::Float(_) => Ok(value.to_string()),
            other => Err(other),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(i) => Ok(i),
            Value::String(ref s) => s.trim().parse().map_err(|_| value),
            other => Err(other),
        }
    }
}

macro_rules! narrow_integer {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Int((*self).into())
                }
            }

            impl FromValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_value(value: Value) -> Result<Self, Value> {
                    let wide = i64::from_value(value)?;
                    <$ty>::try_from(wide).map_err(|_| Value::Int(wide))
                }
            }
        )*
    };
}

narrow_integer!(i32, u32, u16);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            Value::String(ref s) => s.trim().parse().map_err(|_| value),
            other => Err(other),
        }
    }
}

impl ToValue for Map {
    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }
}

impl FromValue for Map {
    const EXPECTED: &'static str = "map";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Map(entries) => Ok(entries),
            other => Err(other),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: Value) -> Result<Self, Value> {
        let Value::List(items) = value else {
            return Err(value);
        };

        let snapshot = items.clone();
        items
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Value::List(snapshot))
    }
}
