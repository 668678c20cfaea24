use crate::{AttributeValue, Error, Result, Tag};

/// Whether the content of a tag gets HTML-escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Escape every item, including raw markup and nested tags.
    Always,
    /// Never escape.
    Never,
    /// Escape [`Content::Text`] items only.
    #[default]
    Auto,
}

impl From<bool> for Encoding {
    fn from(encode: bool) -> Self {
        if encode {
            Encoding::Always
        } else {
            Encoding::Never
        }
    }
}
impl From<Option<bool>> for Encoding {
    fn from(encode: Option<bool>) -> Self {
        encode.map_or(Encoding::Auto, Encoding::from)
    }
}

/// A piece of tag content.
///
/// Whether an item is safe to emit without escaping is decided when it is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Plain text, escaped unless encoding is [`Encoding::Never`].
    Text(String),
    /// Trusted markup, emitted as is unless encoding is [`Encoding::Always`].
    Raw(String),
    /// A nested tag, treated like [`Content::Raw`] once rendered.
    Tag(Box<Tag>),
}

impl Content {
    /// Create a text item.
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    /// Create a raw markup item.
    pub fn raw(html: impl Into<String>) -> Self {
        Content::Raw(html.into())
    }

    /// Create a text item from a dynamic value.
    ///
    /// Null yields `None`.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::InvalidContent`] for anything that is neither a string nor null.
    pub fn from_value(value: &AttributeValue) -> Result<Option<Self>> {
        match value {
            AttributeValue::Null => Ok(None),
            AttributeValue::String(text) => Ok(Some(Content::Text(text.clone()))),
            other => {
                #[cfg(feature = "tracing")]
                tracing::debug!(found = other.type_name(), "rejected content value");
                Err(Error::InvalidContent {
                    found: other.type_name(),
                })
            }
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}
impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}
impl From<&String> for Content {
    fn from(text: &String) -> Self {
        Content::Text(text.clone())
    }
}
impl From<Tag> for Content {
    fn from(tag: Tag) -> Self {
        Content::Tag(Box::new(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        assert_eq!(Content::from_value(&AttributeValue::Null), Ok(None));
        assert_eq!(
            Content::from_value(&AttributeValue::from("caption")),
            Ok(Some(Content::text("caption")))
        );
        assert_eq!(
            Content::from_value(&AttributeValue::from([1, 2])),
            Err(Error::InvalidContent { found: "list" })
        );
        assert_eq!(
            Content::from_value(&AttributeValue::Bool(true)),
            Err(Error::InvalidContent { found: "bool" })
        );
    }

    #[test]
    fn test_encoding_from_flag() {
        assert_eq!(Encoding::from(true), Encoding::Always);
        assert_eq!(Encoding::from(false), Encoding::Never);
        assert_eq!(Encoding::from(None), Encoding::Auto);
    }
}
