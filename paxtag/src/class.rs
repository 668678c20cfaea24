//! CSS class lists and the helpers that merge them into attribute maps.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{AttributeValue, Attributes, Error, Result};

/// The key of an entry in a [`ClassList`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassKey {
    /// A positional entry. Indices are kept when earlier entries are removed.
    Index(usize),
    /// A named class slot that later additions can overwrite by name.
    Slot(String),
}

/// An ordered, keyed collection of CSS class names.
///
/// Positional entries behave like a plain list. Slot entries let one layer register
/// a class under a name so another layer can replace just that class later:
///
/// ```
/// use paxtag::{add_class, render_attributes, Attributes, ClassList};
///
/// let mut attributes = Attributes::new();
/// add_class(&mut attributes, ClassList::from(["btn"]).with_slot("size", "btn-lg"));
/// add_class(&mut attributes, ClassList::new().with_slot("size", "btn-sm"));
/// assert_eq!(render_attributes(&attributes), r#" class="btn btn-sm""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassList {
    entries: IndexMap<ClassKey, String>,
}

impl ClassList {
    /// Create an empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a space-separated class string into positional entries.
    pub fn parse(classes: &str) -> Self {
        classes.split_whitespace().collect()
    }

    /// Append a positional entry. Empty strings are ignored.
    pub fn push(&mut self, class: impl Into<String>) {
        let class = class.into();
        if class.is_empty() {
            return;
        }
        let index = self.next_index();
        self.entries.insert(ClassKey::Index(index), class);
    }

    /// Set the class stored under `slot`, replacing any previous one.
    pub fn set_slot(&mut self, slot: impl Into<String>, class: impl Into<String>) {
        self.entries.insert(ClassKey::Slot(slot.into()), class.into());
    }

    /// Builder form of [`ClassList::set_slot`].
    pub fn with_slot(mut self, slot: impl Into<String>, class: impl Into<String>) -> Self {
        self.set_slot(slot, class);
        self
    }

    /// The class stored under `slot`.
    pub fn slot(&self, slot: &str) -> Option<&str> {
        self.entries
            .get(&ClassKey::Slot(slot.to_string()))
            .map(String::as_str)
    }

    /// Returns `true` if any entry holds exactly `class`.
    pub fn contains(&self, class: &str) -> bool {
        self.entries.values().any(|c| c == class)
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClassKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Iterate over the class names in order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The classes joined with single spaces.
    pub fn to_class_string(&self) -> String {
        self.classes().collect::<Vec<_>>().join(" ")
    }

    /// Merge `additional` into this list.
    ///
    /// Positional entries are appended unless the class is already present. A slot
    /// entry overwrites the same slot, or is added if its class isn't present yet.
    /// Duplicate classes are then dropped, keeping the first occurrence.
    pub fn merge(&mut self, additional: ClassList) {
        for (key, class) in additional.entries {
            match key {
                ClassKey::Index(_) => {
                    if !self.contains(&class) {
                        self.push(class);
                    }
                }
                ClassKey::Slot(slot) => {
                    let key = ClassKey::Slot(slot);
                    if self.entries.contains_key(&key) || !self.contains(&class) {
                        self.entries.insert(key, class);
                    }
                }
            }
        }
        self.dedup();
    }

    /// Remove every entry whose class is in `classes`. Remaining keys are kept.
    pub fn remove_classes(&mut self, classes: &[&str]) {
        self.entries.retain(|_, class| !classes.contains(&class.as_str()));
    }

    fn dedup(&mut self) {
        let mut seen = Vec::with_capacity(self.entries.len());
        self.entries.retain(|_, class| {
            if seen.contains(class) {
                false
            } else {
                seen.push(class.clone());
                true
            }
        });
    }

    fn next_index(&self) -> usize {
        self.entries
            .keys()
            .filter_map(|key| match key {
                ClassKey::Index(i) => Some(i + 1),
                ClassKey::Slot(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Returns `true` if the keys are exactly `0..len` in order, i.e. the list
    /// has no slots and no holes.
    fn is_sequential(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, key)| *key == ClassKey::Index(i))
    }

    /// Build a class list from whatever is stored under a `class` attribute.
    ///
    /// Unlike [`normalize_class_to_list`], scalars are accepted and treated as a
    /// class string.
    fn from_value_lossy(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Classes(classes) => classes.clone(),
            AttributeValue::List(_) | AttributeValue::Map(_) => {
                let mut classes = ClassList::new();
                for (key, class) in collection_entries(value) {
                    match key {
                        Some(slot) => classes.set_slot(slot, class),
                        None => classes.push(class),
                    }
                }
                classes
            }
            other => other
                .to_attribute_string()
                .map(|s| ClassList::parse(&s))
                .unwrap_or_default(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut classes = ClassList::new();
        for class in iter {
            classes.push(class);
        }
        classes
    }
}
impl<S: Into<String>> From<Vec<S>> for ClassList {
    fn from(classes: Vec<S>) -> Self {
        classes.into_iter().collect()
    }
}
impl<S: Into<String>, const N: usize> From<[S; N]> for ClassList {
    fn from(classes: [S; N]) -> Self {
        classes.into_iter().collect()
    }
}

impl Serialize for ClassList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_sequential() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for class in self.classes() {
                seq.serialize_element(class)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, class) in &self.entries {
                match key {
                    ClassKey::Index(i) => map.serialize_entry(&i.to_string(), class)?,
                    ClassKey::Slot(slot) => map.serialize_entry(slot, class)?,
                }
            }
            map.end()
        }
    }
}

/// A class value as accepted by [`add_class`] and [`remove_class`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassValue {
    /// A space-separated class string.
    Text(String),
    /// A keyed class list.
    List(ClassList),
}

impl ClassValue {
    fn into_list(self) -> ClassList {
        match self {
            ClassValue::Text(text) => ClassList::parse(&text),
            ClassValue::List(list) => list,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ClassValue::Text(text) => text.trim().is_empty(),
            ClassValue::List(list) => list.is_empty(),
        }
    }
}

impl From<&str> for ClassValue {
    fn from(classes: &str) -> Self {
        ClassValue::Text(classes.to_string())
    }
}
impl From<String> for ClassValue {
    fn from(classes: String) -> Self {
        ClassValue::Text(classes)
    }
}
impl From<ClassList> for ClassValue {
    fn from(classes: ClassList) -> Self {
        ClassValue::List(classes)
    }
}
impl<S: Into<String>> From<Vec<S>> for ClassValue {
    fn from(classes: Vec<S>) -> Self {
        ClassValue::List(classes.into())
    }
}
impl<S: Into<String>, const N: usize> From<[S; N]> for ClassValue {
    fn from(classes: [S; N]) -> Self {
        ClassValue::List(classes.into())
    }
}
impl From<ClassValue> for AttributeValue {
    fn from(classes: ClassValue) -> Self {
        match classes {
            ClassValue::Text(text) => AttributeValue::String(text),
            ClassValue::List(list) => AttributeValue::Classes(list),
        }
    }
}

/// Yields `(slot, class)` for each usable entry of a list, map or class list.
///
/// Map entries keep their key as a slot unless the key is numeric. Nested
/// collections contribute their scalar members.
fn collection_entries(value: &AttributeValue) -> Vec<(Option<String>, String)> {
    fn scalar_classes(value: &AttributeValue) -> Vec<String> {
        match value {
            AttributeValue::List(values) => values
                .iter()
                .filter_map(AttributeValue::to_attribute_string)
                .filter(|class| !class.is_empty())
                .collect(),
            AttributeValue::Map(entries) => entries
                .values()
                .filter_map(AttributeValue::to_attribute_string)
                .filter(|class| !class.is_empty())
                .collect(),
            AttributeValue::Classes(classes) => classes.classes().map(str::to_string).collect(),
            other => other
                .to_attribute_string()
                .filter(|class| !class.is_empty())
                .into_iter()
                .collect(),
        }
    }

    match value {
        AttributeValue::List(values) => values
            .iter()
            .flat_map(scalar_classes)
            .map(|class| (None, class))
            .collect(),
        AttributeValue::Map(entries) => entries
            .iter()
            .flat_map(|(key, value)| {
                let slot = key.parse::<usize>().is_err().then(|| key.clone());
                let classes = scalar_classes(value);
                // A slot holds a single class; nested collections are spread positionally.
                if classes.len() == 1 {
                    vec![(slot, classes.into_iter().next().unwrap_or_default())]
                } else {
                    classes.into_iter().map(|class| (None, class)).collect()
                }
            })
            .collect(),
        AttributeValue::Classes(classes) => classes
            .iter()
            .map(|(key, class)| {
                let slot = match key {
                    ClassKey::Slot(slot) => Some(slot.clone()),
                    ClassKey::Index(_) => None,
                };
                (slot, class.to_string())
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize a class attribute value to an ordered list of class names.
///
/// Strings are split on whitespace. Collections are flattened one level, dropping
/// null and empty entries; duplicates are kept.
///
/// ## Errors
///
/// Returns [`Error::NotIterable`] for booleans and numbers.
pub fn normalize_class_to_list(value: &AttributeValue) -> Result<Vec<String>> {
    match value {
        AttributeValue::Null => Ok(Vec::new()),
        AttributeValue::String(classes) => Ok(classes
            .split_whitespace()
            .map(str::to_string)
            .collect()),
        AttributeValue::List(_) | AttributeValue::Map(_) | AttributeValue::Classes(_) => {
            Ok(collection_entries(value)
                .into_iter()
                .map(|(_, class)| class)
                .collect())
        }
        other => {
            #[cfg(feature = "tracing")]
            tracing::debug!(found = other.type_name(), "rejected non-iterable class value");
            Err(Error::NotIterable {
                found: other.type_name(),
            })
        }
    }
}

/// Add classes to the `class` attribute.
///
/// If there is no class yet, the value is stored as given. A string class stays a
/// string when a string is added, and becomes a [`ClassList`] when a list is added.
/// Adding a class that's already present changes nothing.
pub fn add_class(attributes: &mut Attributes, classes: impl Into<ClassValue>) {
    let classes = classes.into();
    if classes.is_empty() {
        return;
    }

    let existing = match attributes.get("class") {
        None | Some(AttributeValue::Null) => {
            attributes.set("class", classes);
            return;
        }
        Some(existing) => existing,
    };

    let keep_string = !matches!(
        existing,
        AttributeValue::List(_) | AttributeValue::Map(_) | AttributeValue::Classes(_)
    ) && matches!(classes, ClassValue::Text(_));

    let mut merged = ClassList::from_value_lossy(existing);
    merged.merge(classes.into_list());

    if keep_string {
        attributes.set("class", merged.to_class_string());
    } else {
        attributes.set("class", merged);
    }
}

/// Remove classes from the `class` attribute.
///
/// Remaining entries keep their keys. When no class is left the `class` attribute is
/// removed entirely.
pub fn remove_class(attributes: &mut Attributes, classes: impl Into<ClassValue>) {
    let removed = classes.into().into_list();
    let removed: Vec<&str> = removed.classes().collect();

    let Some(existing) = attributes.get("class") else {
        return;
    };
    let is_collection = matches!(
        existing,
        AttributeValue::List(_) | AttributeValue::Map(_) | AttributeValue::Classes(_)
    );

    let mut remaining = ClassList::from_value_lossy(existing);
    remaining.remove_classes(&removed);

    if remaining.is_empty() {
        attributes.remove("class");
    } else if is_collection {
        attributes.set("class", remaining);
    } else {
        attributes.set("class", remaining.to_class_string());
    }
}
