//! Records and the descriptors that declare their properties.

use std::{any::Any, collections::HashMap, fmt};

use crate::{
    FromValue, Map, OutputNode, RecordError, RecordErrorKind, Result, ToValue, Value, accessor,
    overlay::{self, Access},
};

/// A bound getter.
pub type Getter<R> = dyn Fn(&R) -> Result<Value> + Send + Sync;
/// A bound setter.
pub type Setter<R> = dyn Fn(&mut R, Value) -> Result<()> + Send + Sync;

/// A data holder whose declared properties map onto an output tree.
///
/// Implementors hold a [`RecordBase`] and register their properties once in
/// a [`Descriptor`]:
///
/// ```
/// use std::sync::OnceLock;
/// use record_tree::{Descriptor, Record, RecordBase, map_of};
///
/// #[derive(Debug, Clone, Default)]
/// struct Person {
///     base: RecordBase,
///     first_name: String,
///     middle_name: Option<String>,
/// }
///
/// impl Record for Person {
///     fn descriptor() -> &'static Descriptor<Self> {
///         static DESCRIPTOR: OnceLock<Descriptor<Person>> = OnceLock::new();
///         DESCRIPTOR.get_or_init(|| {
///             Descriptor::<Person>::builder("Person")
///                 .field("first_name", |p| &p.first_name, |p| &mut p.first_name)
///                 .field("middle_name", |p| &p.middle_name, |p| &mut p.middle_name)
///                 .optional(["middle_name"])
///                 .build()
///                 .expect("person properties are well-formed")
///         })
///     }
///
///     fn base(&self) -> &RecordBase {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut RecordBase {
///         &mut self.base
///     }
/// }
///
/// # fn main() -> record_tree::Result<()> {
/// let mut person = Person::default();
/// let tree = person.build_tree(Some(&map_of([("first_name", "Ada")])))?;
/// assert_eq!(tree.name(), "Person");
/// assert_eq!(tree.child("FirstName").and_then(|n| n.text()).as_deref(), Some("Ada"));
/// # Ok(())
/// # }
/// ```
///
/// Nested records are owned by value, so a record can never contain itself.
pub trait Record: fmt::Debug + Clone + 'static {
    /// The property table for this type, built once.
    fn descriptor() -> &'static Descriptor<Self>;

    /// Shared record state: node name and side storage.
    fn base(&self) -> &RecordBase;

    /// Mutable access to the shared record state.
    fn base_mut(&mut self) -> &mut RecordBase;

    /// Name of the node this record becomes.
    fn element_name(&self) -> &str {
        self.base()
            .name()
            .unwrap_or(Self::descriptor().default_name())
    }

    /// Property names declared as required. Not enforced.
    fn required_properties(&self) -> &'static [&'static str] {
        Self::descriptor().required()
    }

    /// Property names whose null value is left out of the output.
    fn optional_properties(&self) -> &'static [&'static str] {
        Self::descriptor().optional()
    }

    /// Populate empty properties from `data`, see [`crate::merge::merge_into`].
    fn merge(&mut self, data: &Map) -> Result<&mut Self> {
        crate::merge::merge_into(self, data)?;
        Ok(self)
    }

    /// Flat view of the declared properties, see
    /// [`crate::flatten::data_properties`].
    fn data_properties(&self, keep_nested: bool) -> Result<Map> {
        crate::flatten::data_properties(self, keep_nested)
    }

    /// Merge `data`, then expand this record into an output tree.
    fn build_tree(&mut self, data: Option<&Map>) -> Result<OutputNode> {
        crate::tree::build_tree(self, data)
    }

    /// Where `key` is routed by the index overlay.
    fn access(&self, key: &str) -> Result<Access<Self>> {
        overlay::access::<Self>(key)
    }

    /// Read `key` through its getter, or from side storage.
    fn get(&self, key: &str) -> Result<Option<Value>> {
        overlay::get(self, key)
    }

    /// Write `key` through its setter, or into side storage.
    fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        overlay::set(self, key, value.into())
    }

    /// Whether `key` holds a non-empty declared value, or is present in side
    /// storage.
    fn has(&self, key: &str) -> Result<bool> {
        overlay::has(self, key)
    }

    /// Reset `key` through its setter, or remove it from side storage.
    fn delete(&mut self, key: &str) -> Result<()> {
        overlay::delete(self, key)
    }
}

/// State every record carries besides its declared properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBase {
    name: Option<String>,
    side_storage: Map,
}

impl RecordBase {
    /// A base that uses the descriptor's default node name.
    pub fn new() -> Self {
        Self::default()
    }

    /// A base with an explicit node name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            side_storage: Map::new(),
        }
    }

    /// The explicit node name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Values stored under keys with no declared property.
    pub fn side_storage(&self) -> &Map {
        &self.side_storage
    }

    /// Mutable side storage.
    pub fn side_storage_mut(&mut self) -> &mut Map {
        &mut self.side_storage
    }
}

/// A record with its concrete type erased, as held inside a [`Value`].
pub trait AnyRecord: fmt::Debug {
    /// See [`Record::element_name`].
    fn node_name(&self) -> &str;

    /// See [`Record::data_properties`].
    fn flatten(&self, keep_nested: bool) -> Result<Map>;

    #[doc(hidden)]
    fn clone_box(&self) -> Box<dyn AnyRecord>;

    /// For downcasting to the concrete record type.
    fn as_any(&self) -> &dyn Any;

    /// For downcasting an owned record to its concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<R: Record> AnyRecord for R {
    fn node_name(&self) -> &str {
        self.element_name()
    }

    fn flatten(&self, keep_nested: bool) -> Result<Map> {
        self.data_properties(keep_nested)
    }

    fn clone_box(&self) -> Box<dyn AnyRecord> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Clone for Box<dyn AnyRecord> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// One declared property of `R` and its accessors.
pub struct Property<R> {
    name: &'static str,
    canonical: String,
    optional: bool,
    required: bool,
    getter: Option<Box<Getter<R>>>,
    setter: Option<Box<Setter<R>>>,
}

impl<R> Property<R> {
    /// The declared name, e.g. `_first_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The normalized name, e.g. `FirstName`; also the output key.
    pub fn canonical_name(&self) -> &str {
        &self.canonical
    }

    /// Whether a null value is left out of the output.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether the property is listed as required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The bound getter, if any.
    pub fn getter(&self) -> Option<&Getter<R>> {
        self.getter.as_deref()
    }

    /// The bound setter, if any.
    pub fn setter(&self) -> Option<&Setter<R>> {
        self.setter.as_deref()
    }

    /// Conventional getter name, e.g. `getFirstName`.
    pub fn getter_name(&self) -> String {
        format!("get{}", self.canonical)
    }

    /// Conventional setter name, e.g. `setFirstName`.
    pub fn setter_name(&self) -> String {
        format!("set{}", self.canonical)
    }
}

impl<R> fmt::Debug for Property<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("canonical", &self.canonical)
            .field("optional", &self.optional)
            .field("required", &self.required)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

/// Property table of a record type: default node name, declared
/// properties in declaration order, and the optional/required name sets.
pub struct Descriptor<R> {
    default_name: &'static str,
    properties: Vec<Property<R>>,
    by_canonical: HashMap<String, usize>,
    required: Vec<&'static str>,
    optional: Vec<&'static str>,
}

impl<R: Record> Descriptor<R> {
    /// Start declaring a record type whose nodes are named `default_name`.
    pub fn builder(default_name: &'static str) -> DescriptorBuilder<R> {
        DescriptorBuilder {
            default_name,
            properties: Vec::new(),
            required: Vec::new(),
            optional: Vec::new(),
        }
    }
}

impl<R> Descriptor<R> {
    /// Node name used when a record is built without one.
    pub fn default_name(&self) -> &'static str {
        self.default_name
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property<R>> {
        self.properties.iter()
    }

    /// Required property names (metadata only).
    pub fn required(&self) -> &[&'static str] {
        &self.required
    }

    /// Optional property names.
    pub fn optional(&self) -> &[&'static str] {
        &self.optional
    }

    /// The property bound to `key` once normalized, if one is declared.
    pub fn lookup(&self, key: &str) -> Result<Option<&Property<R>>> {
        let canonical = accessor::normalize(key)?;
        Ok(self
            .by_canonical
            .get(&canonical)
            .map(|&index| &self.properties[index]))
    }
}

impl<R> fmt::Debug for Descriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("default_name", &self.default_name)
            .field("properties", &self.properties)
            .finish()
    }
}

struct PendingProperty<R> {
    name: &'static str,
    getter: Option<Box<Getter<R>>>,
    setter: Option<Box<Setter<R>>>,
}

/// Declares the properties of a record type; see [`Descriptor::builder`].
pub struct DescriptorBuilder<R> {
    default_name: &'static str,
    properties: Vec<PendingProperty<R>>,
    required: Vec<&'static str>,
    optional: Vec<&'static str>,
}

impl<R: Record> DescriptorBuilder<R> {
    /// A property backed by a plain field.
    ///
    /// Writing null resets the field to its default.
    pub fn field<T>(
        self,
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self
    where
        T: ToValue + FromValue + Default + 'static,
    {
        self.property(
            name,
            move |record: &R| Ok(get(record).to_value()),
            move |record: &mut R, value: Value| {
                *get_mut(record) = match value {
                    Value::Null => T::default(),
                    value => T::from_value(value).map_err(|rejected| {
                        invalid_value(name, T::EXPECTED, rejected.type_name())
                    })?,
                };
                Ok(())
            },
        )
    }

    /// A property backed by an optional nested record.
    ///
    /// Accepts a record of type `C`, or a map merged into a fresh `C`.
    pub fn record<C>(
        self,
        name: &'static str,
        get: fn(&R) -> &Option<C>,
        get_mut: fn(&mut R) -> &mut Option<C>,
    ) -> Self
    where
        C: Record + Default,
    {
        self.property(
            name,
            move |record: &R| Ok(get(record).clone().map_or(Value::Null, Value::record)),
            move |record: &mut R, value: Value| {
                *get_mut(record) = match value {
                    Value::Null => None,
                    value => Some(into_record::<C>(name, value)?),
                };
                Ok(())
            },
        )
    }

    /// A property backed by a list of nested records.
    ///
    /// Accepts a list whose entries are records of type `C` or maps.
    pub fn records<C>(
        self,
        name: &'static str,
        get: fn(&R) -> &Vec<C>,
        get_mut: fn(&mut R) -> &mut Vec<C>,
    ) -> Self
    where
        C: Record + Default,
    {
        self.property(
            name,
            move |record: &R| {
                Ok(Value::List(
                    get(record).iter().cloned().map(Value::record).collect(),
                ))
            },
            move |record: &mut R, value: Value| {
                *get_mut(record) = match value {
                    Value::Null => Vec::new(),
                    Value::List(items) => items
                        .into_iter()
                        .map(|item| into_record::<C>(name, item))
                        .collect::<Result<_>>()?,
                    other => {
                        return Err(invalid_value(name, "list of records", other.type_name()));
                    }
                };
                Ok(())
            },
        )
    }

    /// A property with hand-written accessors.
    pub fn property(
        mut self,
        name: &'static str,
        getter: impl Fn(&R) -> Result<Value> + Send + Sync + 'static,
        setter: impl Fn(&mut R, Value) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.properties.push(PendingProperty {
            name,
            getter: Some(Box::new(getter)),
            setter: Some(Box::new(setter)),
        });
        self
    }

    /// A property with a getter only; overlay writes to it land in side
    /// storage and merges skip it.
    pub fn read_only(
        mut self,
        name: &'static str,
        getter: impl Fn(&R) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.properties.push(PendingProperty {
            name,
            getter: Some(Box::new(getter)),
            setter: None,
        });
        self
    }

    /// Mark property names (without internal marker) as optional.
    pub fn optional(mut self, names: impl IntoIterator<Item = &'static str>) -> Self {
        self.optional.extend(names);
        self
    }

    /// Mark property names (without internal marker) as required.
    pub fn required(mut self, names: impl IntoIterator<Item = &'static str>) -> Self {
        self.required.extend(names);
        self
    }

    /// Resolve canonical names and freeze the table.
    ///
    /// Fails when a name does not normalize, or when two properties
    /// normalize to the same name.
    pub fn build(self) -> Result<Descriptor<R>> {
        let mut properties = Vec::with_capacity(self.properties.len());
        let mut by_canonical = HashMap::with_capacity(self.properties.len());

        for pending in self.properties {
            let canonical = accessor::normalize(pending.name)?;
            let bare = accessor::strip_marker(pending.name);
            if by_canonical
                .insert(canonical.clone(), properties.len())
                .is_some()
            {
                return Err(RecordErrorKind::InvalidArgument(format!(
                    "property {:?} of {} collides with another property named {canonical}",
                    pending.name, self.default_name
                ))
                .into());
            }

            log::trace!(
                "Declared property `{}` of `{}` as {canonical}",
                pending.name,
                self.default_name
            );
            properties.push(Property {
                name: pending.name,
                canonical,
                optional: self.optional.contains(&bare),
                required: self.required.contains(&bare),
                getter: pending.getter,
                setter: pending.setter,
            });
        }

        Ok(Descriptor {
            default_name: self.default_name,
            properties,
            by_canonical,
            required: self.required,
            optional: self.optional,
        })
    }
}

fn into_record<C: Record + Default>(property: &'static str, value: Value) -> Result<C> {
    match value {
        Value::Record(record) => match record.into_any().downcast::<C>() {
            Ok(record) => Ok(*record),
            Err(_) => Err(invalid_value(
                property,
                C::descriptor().default_name(),
                "record",
            )),
        },
        Value::Map(data) => {
            let mut record = C::default();
            record.merge(&data)?;
            Ok(record)
        }
        other => Err(invalid_value(
            property,
            C::descriptor().default_name(),
            other.type_name(),
        )),
    }
}

fn invalid_value(property: &str, expected: &'static str, actual: &'static str) -> RecordError {
    RecordErrorKind::InvalidValue {
        property: property.to_owned(),
        expected,
        actual,
    }
    .into()
}
