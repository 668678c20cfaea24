use std::fmt::Write;

use crate::class::normalize_class_to_list;
use crate::encode::encode_attribute;
use crate::json::to_html_json;
use crate::style::{map_to_style, style_map_from_value};
use crate::{AttributeValue, Attributes};

/// Attribute names whose map value expands into `name-key` attributes.
pub const DEFAULT_PREFIXES: &[&str] = &["data", "data-ng", "ng", "aria"];

/// Attribute names whose list value renders space-joined instead of as JSON.
pub const DEFAULT_CONCATENATED: &[&str] = &["aria-describedby", "aria-labelledby"];

/// Renders attribute maps to markup.
///
/// The output starts with a space unless it is empty, and follows the insertion
/// order of the map. For each attribute:
///
/// - null and `false` render nothing, `true` renders the bare name;
/// - `class` renders its normalized class list, and nothing if that is empty;
/// - `style` renders its declarations, and nothing if there are none;
/// - a prefix such as `data` with a map value renders one `data-key` attribute per
///   entry, through these same rules;
/// - strings and numbers render as `name="escaped value"`;
/// - anything else renders as `name='json'`.
///
/// ```
/// use paxtag::{render_attributes, AttributeValue, Attributes};
///
/// let attributes = Attributes::new()
///     .with("id", "x")
///     .with("class", ["a", "b"])
///     .with("data", AttributeValue::map([("a", 1), ("b", 2)]))
///     .with("style", AttributeValue::map([("width", "100px")]))
///     .with("any", [1, 2]);
/// assert_eq!(
///     render_attributes(&attributes),
///     r#" id="x" class="a b" data-a="1" data-b="2" style="width: 100px;" any='[1,2]'"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRenderer {
    prefixes: Vec<String>,
    concatenated: Vec<String>,
}

impl Default for AttributeRenderer {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            concatenated: DEFAULT_CONCATENATED.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl AttributeRenderer {
    /// Creates a renderer with the default prefixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers another prefix whose map value expands into `prefix-key` attributes.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    /// Registers an attribute whose list value renders space-joined.
    pub fn with_concatenated(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.concatenated.contains(&name) {
            self.concatenated.push(name);
        }
        self
    }

    /// Returns `true` if `name` expands map values into prefixed attributes.
    pub fn is_prefix(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| p == name)
    }

    /// Render `attributes` to a string.
    pub fn render(&self, attributes: &Attributes) -> String {
        let mut output = String::new();
        for (name, value) in attributes {
            self.render_attribute(&mut output, name, value);
        }
        output
    }

    fn render_attribute(&self, output: &mut String, name: &str, value: &AttributeValue) {
        match value {
            AttributeValue::Null | AttributeValue::Bool(false) => {}
            AttributeValue::Bool(true) => {
                let _ = write!(output, " {name}");
            }
            _ if name == "class" => {
                if let Ok(classes) = normalize_class_to_list(value) {
                    if !classes.is_empty() {
                        write_quoted(output, name, &classes.join(" "));
                    }
                    return;
                }
                self.render_value(output, name, value);
            }
            AttributeValue::String(_) | AttributeValue::Map(_) if name == "style" => {
                let declarations = match value {
                    AttributeValue::String(css) => Some(css.trim().to_string()),
                    _ => map_to_style(&style_map_from_value(value)),
                };
                if let Some(declarations) = declarations.filter(|d| !d.is_empty()) {
                    write_quoted(output, name, &declarations);
                }
            }
            AttributeValue::List(values) if name == "style" && values.is_empty() => {}
            AttributeValue::Map(entries) if self.is_prefix(name) => {
                for (key, value) in entries {
                    self.render_attribute(output, &format!("{name}-{key}"), value);
                }
            }
            _ => self.render_value(output, name, value),
        }
    }

    fn render_value(&self, output: &mut String, name: &str, value: &AttributeValue) {
        if let Some(scalar) = value.to_attribute_string() {
            write_quoted(output, name, &scalar);
            return;
        }
        if self.concatenated.iter().any(|c| c == name) {
            if let AttributeValue::List(values) = value {
                let joined: Vec<String> = values
                    .iter()
                    .filter_map(AttributeValue::to_attribute_string)
                    .collect();
                write_quoted(output, name, &joined.join(" "));
                return;
            }
        }
        match to_html_json(value) {
            Ok(json) => {
                let _ = write!(output, " {name}='{json}'");
            }
            Err(_error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(attribute = name, error = %_error, "skipping attribute that can't be JSON-encoded");
            }
        }
    }
}

fn write_quoted(output: &mut String, name: &str, value: &str) {
    let _ = write!(output, " {name}=\"{}\"", encode_attribute(value));
}

/// Render `attributes` with the default [`AttributeRenderer`].
pub fn render_attributes(attributes: &Attributes) -> String {
    AttributeRenderer::default().render(attributes)
}
