#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use std::{
    error::Error,
    fmt::{self, Display},
};

use facet_reflect::ReflectError;

pub mod accessor;
pub mod flatten;
pub mod merge;
mod node;
pub mod overlay;
mod record;
pub mod reflect;
pub mod render;
pub mod tree;
mod value;

pub use node::OutputNode;
pub use overlay::Access;
pub use record::{
    AnyRecord, Descriptor, DescriptorBuilder, Getter, Property, Record, RecordBase, Setter,
};
pub use value::{FromValue, Map, ToValue, Value, map_of};

/// Result type used throughout the crate.
pub type Result<T, E = RecordError> = std::result::Result<T, E>;

/// Error type for record mapping and tree building.
#[derive(Debug)]
pub struct RecordError {
    kind: RecordErrorKind,
}

impl RecordError {
    /// Returns a reference to the error kind for detailed error inspection.
    pub fn kind(&self) -> &RecordErrorKind {
        &self.kind
    }
}

impl Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        let kind = &self.kind;
        write!(f, "{kind}")
    }
}
impl Error for RecordError {}

impl<K: Into<RecordErrorKind>> From<K> for RecordError {
    fn from(value: K) -> Self {
        let kind = value.into();
        RecordError { kind }
    }
}

/// Detailed classification of record errors.
#[derive(Debug)]
#[non_exhaustive]
pub enum RecordErrorKind {
    /// A property name that resolves to no accessor, such as `""` or `"_"`,
    /// or a descriptor declaring the same property twice.
    InvalidArgument(String),
    /// A setter was handed a value it cannot store.
    InvalidValue {
        /// The property being written.
        property: String,
        /// What the property accepts.
        expected: &'static str,
        /// The kind of value it was given.
        actual: &'static str,
    },
    /// A value the tree builder or the reflection bridge cannot represent.
    UnsupportedValue(String),
    /// Error from the reflection system while reading a value.
    Reflect(ReflectError),
}

impl Display for RecordErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordErrorKind::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            RecordErrorKind::InvalidValue {
                property,
                expected,
                actual,
            } => write!(
                f,
                "invalid value for property '{property}': expected {expected}, got {actual}"
            ),
            RecordErrorKind::UnsupportedValue(msg) => write!(f, "unsupported value: {msg}"),
            RecordErrorKind::Reflect(reflect_error) => write!(f, "{reflect_error}"),
        }
    }
}

impl From<ReflectError> for RecordErrorKind {
    fn from(value: ReflectError) -> Self {
        Self::Reflect(value)
    }
}
