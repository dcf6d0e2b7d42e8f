//! [`PackValue`]: the decoded value tree.

use crate::PackExtension;

/// A decoded CBOR data item.
///
/// Maps keep their on-the-wire field order; record lookups are linear, which
/// is fine for the handful of fields a model record carries.
#[derive(Debug, Clone, PartialEq)]
pub enum PackValue {
    Null,
    Undefined,
    Bool(bool),
    /// Every integer in `i64` range, including non-negative ones.
    Integer(i64),
    /// Only unsigned integers above `i64::MAX`.
    UInteger(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<PackValue>),
    Object(Vec<(String, PackValue)>),
    Extension(Box<PackExtension>),
}

impl PackValue {
    /// Builds an object from `(key, value)` pairs, preserving their order.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PackValue)>,
    {
        PackValue::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wraps `val` in a CBOR tag.
    pub fn tagged(tag: u64, val: PackValue) -> Self {
        PackValue::Extension(Box::new(PackExtension::new(tag, val)))
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PackValue::Null => "null",
            PackValue::Undefined => "undefined",
            PackValue::Bool(_) => "bool",
            PackValue::Integer(_) | PackValue::UInteger(_) => "integer",
            PackValue::Float(_) => "float",
            PackValue::Bytes(_) => "bytes",
            PackValue::Str(_) => "string",
            PackValue::Array(_) => "array",
            PackValue::Object(_) => "object",
            PackValue::Extension(_) => "tag",
        }
    }

    /// Numeric value as `f64`; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            PackValue::Float(f) => Some(f),
            PackValue::Integer(i) => Some(i as f64),
            PackValue::UInteger(u) => Some(u as f64),
            _ => None,
        }
    }

    /// Non-negative integer value.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            PackValue::UInteger(u) => Some(u),
            PackValue::Integer(i) => u64::try_from(i).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PackValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PackValue]> {
        match self {
            PackValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, PackValue)]> {
        match self {
            PackValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a field of an object. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&PackValue> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl From<f64> for PackValue {
    fn from(f: f64) -> Self {
        PackValue::Float(f)
    }
}

impl From<u64> for PackValue {
    /// Canonical form: `Integer` when the value fits in `i64`.
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(int) => PackValue::Integer(int),
            Err(_) => PackValue::UInteger(u),
        }
    }
}

impl From<&str> for PackValue {
    fn from(s: &str) -> Self {
        PackValue::Str(s.to_owned())
    }
}

impl<T: Into<PackValue>> From<Vec<T>> for PackValue {
    fn from(items: Vec<T>) -> Self {
        PackValue::Array(items.into_iter().map(Into::into).collect())
    }
}
