use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::Getter;
use crate::value::{Val, Value};

/// The value of a span attribute.
///
/// Attributes are flat. Structured data is rendered into one of these scalars before it is stored.
/// Unsigned integers that do not fit into `i64` deserialize as their decimal string.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean value.
    Bool(bool),
    /// A signed integer value.
    I64(i64),
    /// A floating point value.
    F64(f64),
    /// A string value.
    String(String),
}

impl AttributeValue {
    /// Converts a scalar [`Val`] into an attribute value.
    ///
    /// Returns `None` for arrays, keyed containers and structured objects. Unsigned integers that
    /// do not fit into `i64` are stored as their string representation.
    pub fn from_scalar(val: Val<'_>) -> Option<Self> {
        Some(match val {
            Val::Bool(value) => Self::Bool(value),
            Val::I64(value) => Self::I64(value),
            Val::U64(value) => match i64::try_from(value) {
                Ok(value) => Self::I64(value),
                Err(_) => Self::String(value.to_string()),
            },
            Val::F64(value) => Self::F64(value),
            Val::String(value) => Self::String(value.to_owned()),
            Val::Array(_) | Val::Object(_) | Val::Struct(_) => return None,
        })
    }

    /// Returns the value if it is a boolean, otherwise `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value if it is an integer, otherwise `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string if this value is a string, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns `true` if both values have the same canonical string form.
    ///
    /// This allows configured values, which are often strings, to match typed attributes: `404`
    /// equals `"404"` and `true` equals `"true"`.
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(left), Self::String(right)) => left == right,
            (left, right) => left == right || left.to_string() == right.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttributeValueVisitor;

        impl Visitor<'_> for AttributeValueVisitor {
            type Value = AttributeValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a boolean, number or string")
            }

            #[inline]
            fn visit_bool<E>(self, value: bool) -> Result<AttributeValue, E> {
                Ok(AttributeValue::Bool(value))
            }

            #[inline]
            fn visit_i64<E>(self, value: i64) -> Result<AttributeValue, E> {
                Ok(AttributeValue::I64(value))
            }

            #[inline]
            fn visit_u64<E>(self, value: u64) -> Result<AttributeValue, E> {
                Ok(match i64::try_from(value) {
                    Ok(value) => AttributeValue::I64(value),
                    Err(_) => AttributeValue::String(value.to_string()),
                })
            }

            #[inline]
            fn visit_f64<E>(self, value: f64) -> Result<AttributeValue, E> {
                Ok(AttributeValue::F64(value))
            }

            #[inline]
            fn visit_str<E>(self, value: &str) -> Result<AttributeValue, E>
            where
                E: de::Error,
            {
                self.visit_string(String::from(value))
            }

            #[inline]
            fn visit_string<E>(self, value: String) -> Result<AttributeValue, E> {
                Ok(AttributeValue::String(value))
            }
        }

        deserializer.deserialize_any(AttributeValueVisitor)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::I64(value) => fmt::Display::fmt(value, f),
            Self::F64(value) => fmt::Display::fmt(value, f),
            Self::String(value) => f.pad(value),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<usize> for AttributeValue {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(value) => Self::I64(value),
            Err(_) => Self::String(value.to_string()),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Bool(value) => Value::Bool(value),
            AttributeValue::I64(value) => Value::I64(value),
            AttributeValue::F64(value) => Value::F64(value),
            AttributeValue::String(value) => Value::String(value),
        }
    }
}

impl<'a> From<&'a AttributeValue> for Val<'a> {
    fn from(value: &'a AttributeValue) -> Self {
        match value {
            AttributeValue::Bool(value) => Val::Bool(*value),
            AttributeValue::I64(value) => Val::I64(*value),
            AttributeValue::F64(value) => Val::F64(*value),
            AttributeValue::String(value) => Val::String(value),
        }
    }
}

/// A flat map of span attributes, keyed by namespaced attribute names.
///
/// Keys are unique and iteration is ordered by key. An `Attributes` map is created per request,
/// mutated by decoration and then handed off to whatever attaches it to a span.
///
/// Keys are looked up as a whole by the [`Getter`] implementation, so paths into an attribute map
/// must escape dots: `http\.status_code`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Returns the value of an attribute if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_str)
    }

    /// Returns `true` if the attribute is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets an attribute, returning the previous value.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<AttributeValue>
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.0.insert(key.into(), value.into())
    }

    /// Removes an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.0.remove(key)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all attributes in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, AttributeValue> {
        self.0.iter()
    }

    /// Returns the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, AttributeValue> {
        self.0
    }
}

impl Getter for Attributes {
    fn get_field(&self, name: &str) -> Option<Val<'_>> {
        self.get(name).map(Val::from)
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.clone().into()))
                .collect(),
        ))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttributeValue);
    type IntoIter = btree_map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
