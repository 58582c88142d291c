//! Data bags from reflected values.
//!
//! Any struct deriving `Facet` can feed a merge:
//!
//! ```
//! use facet::Facet;
//!
//! #[derive(Facet)]
//! struct Applicant {
//!     first_name: String,
//!     age: u8,
//!     email: Option<String>,
//! }
//!
//! let data = record_tree::reflect::to_map(&Applicant {
//!     first_name: "Ada".into(),
//!     age: 36,
//!     email: None,
//! })
//! .unwrap();
//! assert_eq!(data["first_name"], record_tree::Value::from("Ada"));
//! assert_eq!(data["age"], record_tree::Value::Int(36));
//! assert!(data["email"].is_null());
//! ```
//!
//! Enums are externally tagged: a unit variant reads as its name, a variant
//! with fields as a one-entry map from its name to those fields.

use std::borrow::Cow;

use facet_core::{Facet, NumericType, PrimitiveType, Shape, Type, UserType};
use facet_reflect::{HasFields, Peek, PeekEnum, ReflectError, ScalarType};

use crate::{Map, RecordErrorKind, Result, Value};

/// Read the fields of a struct into a [`Map`] keyed by field name.
pub fn to_map<'a, T: Facet<'a>>(value: &'a T) -> Result<Map> {
    let peek = Peek::new(value).innermost_peek();
    let shape = peek.shape();

    match to_value(peek)? {
        Value::Map(map) => Ok(map),
        _ => Err(ReflectError::WasNotA {
            expected: "struct",
            actual: shape,
        }
        .into()),
    }
}

/// Read any supported value: options, strings, primitives, lists, string
/// keyed maps, enums and structs.
pub fn to_value(peek: Peek) -> Result<Value> {
    let peek = peek.innermost_peek();

    if let Ok(option) = peek.into_option() {
        return match option.value() {
            Some(inner) => to_value(inner),
            None => Ok(Value::Null),
        };
    }

    // Strings aren't primitive but are treated as such
    if let Ok(s) = peek.get::<String>() {
        return Ok(Value::String(s.clone()));
    }
    if let Ok(s) = peek.get::<Cow<str>>() {
        return Ok(Value::String(s.as_ref().to_owned()));
    }

    if let Ok(list) = peek.into_list_like() {
        return list
            .iter()
            .map(to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::List);
    }

    if let Ok(map) = peek.into_map() {
        let mut entries = Map::new();
        for (key, value) in map.iter() {
            let key = match key.get::<String>() {
                Ok(key) => key.clone(),
                Err(_) => key.to_string(),
            };
            entries.insert(key, to_value(value)?);
        }
        return Ok(Value::Map(entries));
    }

    let shape = peek.shape();
    if let Ok(variant) = peek.into_enum() {
        return enum_to_value(variant, shape);
    }

    match peek.shape().ty {
        Type::Primitive(PrimitiveType::Boolean) => Ok(Value::Bool(*peek.get::<bool>()?)),
        Type::Primitive(PrimitiveType::Numeric(NumericType::Integer { .. })) => {
            into_i64(peek).map(Value::Int)
        }
        Type::Primitive(PrimitiveType::Numeric(NumericType::Float)) => {
            into_f64(peek).map(Value::Float)
        }
        Type::Primitive(PrimitiveType::Textual(_)) => Ok(Value::String(peek.to_string())),
        Type::User(UserType::Struct(_)) => struct_to_value(peek),
        _ => Err(RecordErrorKind::UnsupportedValue(format!(
            "{} has no data bag representation",
            peek.shape()
        ))
        .into()),
    }
}

fn struct_to_value(peek: Peek) -> Result<Value> {
    let shape = peek.shape();
    let peek = peek.into_struct()?;

    let mut entries = Map::new();
    for (i, field) in peek.ty().fields.iter().enumerate() {
        let field_peek = match peek.field(i) {
            Ok(field_peek) => field_peek,
            Err(_) => {
                return Err(RecordErrorKind::UnsupportedValue(format!(
                    "field `{}` of {shape} cannot be read",
                    field.name
                ))
                .into());
            }
        };
        log::trace!("Reading field `{}` of {shape}", field.name);
        entries.insert(field.name.to_owned(), to_value(field_peek)?);
    }

    Ok(Value::Map(entries))
}

fn enum_to_value(peek: PeekEnum, shape: &Shape) -> Result<Value> {
    let Ok(name) = peek.variant_name_active() else {
        return Err(RecordErrorKind::UnsupportedValue(format!(
            "active variant of {shape} cannot be read"
        ))
        .into());
    };

    let mut fields = Map::new();
    for (field, field_peek) in peek.fields() {
        fields.insert(field.name.to_owned(), to_value(field_peek)?);
    }

    if fields.is_empty() {
        return Ok(Value::String(name.to_owned()));
    }
    log::trace!("Reading variant `{name}` of {shape}");
    Ok(Value::Map(Map::from([(name.to_owned(), Value::Map(fields))])))
}

fn into_i64(peek: Peek) -> Result<i64> {
    let too_large = || RecordErrorKind::UnsupportedValue(format!("{peek} does not fit in an i64"));

    Ok(match peek.scalar_type() {
        Some(ScalarType::I8) => i64::from(*peek.get::<i8>()?),
        Some(ScalarType::I16) => i64::from(*peek.get::<i16>()?),
        Some(ScalarType::I32) => i64::from(*peek.get::<i32>()?),
        Some(ScalarType::I64) => *peek.get::<i64>()?,
        Some(ScalarType::ISize) => i64::try_from(*peek.get::<isize>()?).map_err(|_| too_large())?,
        Some(ScalarType::I128) => i64::try_from(*peek.get::<i128>()?).map_err(|_| too_large())?,

        Some(ScalarType::U8) => i64::from(*peek.get::<u8>()?),
        Some(ScalarType::U16) => i64::from(*peek.get::<u16>()?),
        Some(ScalarType::U32) => i64::from(*peek.get::<u32>()?),
        Some(ScalarType::U64) => i64::try_from(*peek.get::<u64>()?).map_err(|_| too_large())?,
        Some(ScalarType::USize) => i64::try_from(*peek.get::<usize>()?).map_err(|_| too_large())?,
        Some(ScalarType::U128) => i64::try_from(*peek.get::<u128>()?).map_err(|_| too_large())?,

        Some(_) | None => {
            return Err(RecordErrorKind::UnsupportedValue(format!(
                "{} is not a supported integer type",
                peek.shape()
            ))
            .into());
        }
    })
}

fn into_f64(peek: Peek) -> Result<f64> {
    match peek.scalar_type() {
        Some(ScalarType::F32) => Ok(f64::from(*peek.get::<f32>()?)),
        Some(ScalarType::F64) => Ok(*peek.get::<f64>()?),

        Some(_) | None => Err(RecordErrorKind::UnsupportedValue(format!(
            "{} is not a supported float type",
            peek.shape()
        ))
        .into()),
    }
}
