//! Inline CSS declarations and the helpers that merge them into attribute maps.

use indexmap::IndexMap;

use crate::{AttributeValue, Attributes};

/// CSS properties mapped to their values, in declaration order.
pub type StyleMap = IndexMap<String, String>;

/// A style value as accepted by [`add_style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// A raw declaration string such as `"width: 1px; color: red;"`.
    Text(String),
    /// Declarations keyed by property.
    Map(StyleMap),
}

impl StyleValue {
    fn into_map(self) -> StyleMap {
        match self {
            StyleValue::Text(css) => style_to_map(&css),
            StyleValue::Map(map) => map,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(css: &str) -> Self {
        StyleValue::Text(css.to_string())
    }
}
impl From<String> for StyleValue {
    fn from(css: String) -> Self {
        StyleValue::Text(css)
    }
}
impl From<StyleMap> for StyleValue {
    fn from(map: StyleMap) -> Self {
        StyleValue::Map(map)
    }
}
impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for StyleValue {
    fn from(declarations: [(K, V); N]) -> Self {
        StyleValue::Map(
            declarations
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
impl From<StyleValue> for AttributeValue {
    fn from(style: StyleValue) -> Self {
        match style {
            StyleValue::Text(css) => AttributeValue::String(css),
            StyleValue::Map(map) => map_to_value(map),
        }
    }
}

/// Parse a declaration string into a property map.
///
/// Declarations are split on `;` and then on their first `:`; both sides are
/// trimmed. Declarations without a `:` or with an empty property are skipped.
pub fn style_to_map(css: &str) -> StyleMap {
    css.split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            (!property.is_empty()).then(|| (property.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Serialize a property map as `prop: value;` pairs separated by single spaces.
///
/// Returns `None` for an empty map so callers can omit the attribute.
pub fn map_to_style(map: &StyleMap) -> Option<String> {
    if map.is_empty() {
        return None;
    }
    Some(
        map.iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Read whatever is stored under a `style` attribute as a property map.
///
/// Map entries whose value is not a scalar are skipped.
pub(crate) fn style_map_from_value(value: &AttributeValue) -> StyleMap {
    match value {
        AttributeValue::String(css) => style_to_map(css),
        AttributeValue::Map(entries) => entries
            .iter()
            .filter_map(|(property, value)| {
                value
                    .to_attribute_string()
                    .map(|value| (property.clone(), value))
            })
            .collect(),
        _ => StyleMap::new(),
    }
}

fn map_to_value(map: StyleMap) -> AttributeValue {
    AttributeValue::Map(
        map.into_iter()
            .map(|(property, value)| (property, AttributeValue::String(value)))
            .collect(),
    )
}

fn has_declarations(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::String(css) => !css.trim().is_empty(),
        AttributeValue::Map(entries) => !entries.is_empty(),
        _ => false,
    }
}

/// Add declarations to the `style` attribute.
///
/// Properties already present keep their position; new properties are appended.
/// With `overwrite` unset, existing properties keep their old value. The stored
/// value keeps the form it already had (string or map).
pub fn add_style(attributes: &mut Attributes, style: impl Into<StyleValue>, overwrite: bool) {
    let style = style.into();

    let existing = match attributes.get("style") {
        Some(existing) if has_declarations(existing) => existing,
        _ => {
            attributes.set("style", style);
            return;
        }
    };
    let as_string = matches!(existing, AttributeValue::String(_));

    let mut merged = style_map_from_value(existing);
    for (property, value) in style.into_map() {
        if overwrite || !merged.contains_key(&property) {
            merged.insert(property, value);
        }
    }

    if as_string {
        attributes.set("style", map_to_style(&merged));
    } else {
        attributes.set("style", map_to_value(merged));
    }
}

/// Remove declarations from the `style` attribute.
///
/// When no declaration is left, `style` is set to [`AttributeValue::Null`]; the key
/// itself stays in the map.
pub fn remove_style<S: AsRef<str>>(
    attributes: &mut Attributes,
    properties: impl IntoIterator<Item = S>,
) {
    let Some(existing) = attributes.get("style") else {
        return;
    };
    if !has_declarations(existing) {
        return;
    }
    let as_string = matches!(existing, AttributeValue::String(_));

    let mut style = style_map_from_value(existing);
    for property in properties {
        style.shift_remove(property.as_ref());
    }

    if style.is_empty() {
        attributes.set("style", AttributeValue::Null);
    } else if as_string {
        attributes.set("style", map_to_style(&style));
    } else {
        attributes.set("style", map_to_value(style));
    }
}
