//! Definition of a decoded Smile value.

pub use crate::value::big_decimal::BigDecimal;
pub use crate::value::big_integer::BigInteger;
pub use crate::value::builder::ValueBuilder;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_bytes::Bytes;

mod big_decimal;
mod big_integer;
mod builder;

/// A representation of a Smile value.
///
/// Objects preserve the order in which their fields appeared in the input. When a field name repeats within one
/// object, the last value wins but the field keeps its original position.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    /// A null value.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i32),
    /// A long value.
    Long(i64),
    /// A big integer value.
    BigInteger(BigInteger),
    /// A float value.
    Float(f32),
    /// A double value.
    Double(f64),
    /// A big decimal value.
    BigDecimal(BigDecimal),
    /// A string value.
    String(String),
    /// A binary value.
    Binary(Vec<u8>),
    /// An array value.
    Array(Vec<Value>),
    /// An object value.
    Object(IndexMap<String, Value>),
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::Integer(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::BigInteger(v) => v.serialize(serializer),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::BigDecimal(v) => v.serialize(serializer),
            Value::String(v) => serializer.serialize_str(v),
            Value::Binary(v) => Bytes::new(v).serialize(serializer),
            Value::Array(v) => v.serialize(serializer),
            Value::Object(v) => v.serialize(serializer),
        }
    }
}
