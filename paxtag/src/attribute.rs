use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::ClassList;

/// Represents a typed attribute value.
///
/// How a value renders depends on both the variant and the attribute name; see
/// [`AttributeRenderer`](crate::AttributeRenderer) for the rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    /// The attribute is absent.
    #[default]
    Null,
    /// A boolean flag. `true` renders a bare attribute, `false` renders nothing.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
    /// A sequence of values.
    List(Vec<AttributeValue>),
    /// An ordered mapping of values.
    Map(IndexMap<String, AttributeValue>),
    /// A keyed list of CSS classes.
    Classes(ClassList),
}

impl AttributeValue {
    /// Build a [`AttributeValue::Map`] from key/value pairs, keeping their order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        AttributeValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a [`AttributeValue::List`] from values.
    pub fn list<V: Into<AttributeValue>>(values: impl IntoIterator<Item = V>) -> Self {
        AttributeValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if this is [`AttributeValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for strings and numbers.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::String(_))
    }

    /// Returns the value as a string slice if this is a String variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Int variant.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value if this is a Float variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Bool variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string form of a scalar value as it appears in markup.
    ///
    /// Floats with no fractional part print without a trailing `.0`. Returns
    /// `None` for null, booleans and collections.
    pub fn to_attribute_string(&self) -> Option<String> {
        match self {
            AttributeValue::String(s) => Some(s.clone()),
            AttributeValue::Int(i) => Some(i.to_string()),
            AttributeValue::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    /// A short description of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::List(_) => "list",
            AttributeValue::Map(_) => "map",
            AttributeValue::Classes(_) => "class list",
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Null => serializer.serialize_unit(),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::Int(i) => serializer.serialize_i64(*i),
            AttributeValue::Float(f) => serializer.serialize_f64(*f),
            AttributeValue::String(s) => serializer.serialize_str(s),
            AttributeValue::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            AttributeValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            AttributeValue::Classes(classes) => classes.serialize(serializer),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}
impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}
impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}
impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        AttributeValue::String(value.clone())
    }
}
impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        AttributeValue::Float(value as f64)
    }
}
impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}
impl From<ClassList> for AttributeValue {
    fn from(value: ClassList) -> Self {
        AttributeValue::Classes(value)
    }
}
impl From<IndexMap<String, AttributeValue>> for AttributeValue {
    fn from(value: IndexMap<String, AttributeValue>) -> Self {
        AttributeValue::Map(value)
    }
}
impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Null, Into::into)
    }
}
impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        AttributeValue::list(values)
    }
}
impl<T: Into<AttributeValue>, const N: usize> From<[T; N]> for AttributeValue {
    fn from(values: [T; N]) -> Self {
        AttributeValue::list(values)
    }
}

macro_rules! int_conversions {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    AttributeValue::Int(value as i64)
                }
            }
        )*
    };
}
int_conversions!(i8, i16, i32, i64, u8, u16, u32, isize);

impl TryFrom<u64> for AttributeValue {
    type Error = std::num::TryFromIntError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value).map(AttributeValue::Int)
    }
}
impl TryFrom<usize> for AttributeValue {
    type Error = std::num::TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value).map(AttributeValue::Int)
    }
}

/// An insertion-ordered mapping from attribute names to values.
///
/// Assigning to an existing name keeps its position; removing a name keeps the
/// order of the others.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes(IndexMap<String, AttributeValue>);

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, returning the map for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set `name` to `value`, returning the previous value if there was one.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Get the value stored for `name`.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Returns `true` if `name` is present, even when its value is null.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove `name`, keeping the order of the remaining attributes.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.0.shift_remove(name)
    }

    /// Shallow merge: every entry of `other` overrides or extends `self`.
    pub fn merge(&mut self, other: Attributes) {
        self.0.extend(other.0);
    }

    /// Add the entries of `other` whose names are not present yet.
    pub fn union(&mut self, other: Attributes) {
        for (name, value) in other.0 {
            self.0.entry(name).or_insert(value);
        }
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, AttributeValue> {
        self.0.iter()
    }

    /// The number of attributes, including null ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
impl<K: Into<String>, V: Into<AttributeValue>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
impl IntoIterator for Attributes {
    type Item = (String, AttributeValue);
    type IntoIter = indexmap::map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render_attributes(self))
    }
}
