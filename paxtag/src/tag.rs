use std::fmt;

use crate::{
    add_class, add_style, remove_class, remove_style, AttributeRenderer, AttributeValue,
    Attributes, ClassValue, Content, ContentEncoder, Encoding, Error, IdGenerator, Result,
    StyleValue,
};

/// How a tag is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// No content and no closing tag, e.g. `<br>`.
    Void,
    /// Content between an opening and a closing tag.
    Normal,
    /// Like [`TagKind::Normal`], but the content is never escaped (`<script>`, `<style>`).
    RawContent,
}

/// An immutable HTML tag.
///
/// Every `with_*` method returns a modified copy and leaves the receiver untouched,
/// so a tag can be shared as a template and specialized freely.
///
/// ```
/// use paxtag::builder::{a, div};
///
/// let link = a().with_attribute("href", "/docs").with_content("Docs & more");
/// let card = div().with_added_class("card").with_added_content(link.clone());
/// assert_eq!(
///     card.render(),
///     r#"<div class="card"><a href="/docs">Docs &amp; more</a></div>"#
/// );
/// assert_eq!(link.with_id("x").to_string(), r#"<a href="/docs" id="x">Docs &amp; more</a>"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: String,
    kind: TagKind,
    attributes: Attributes,
    content: Vec<Content>,
    encoder: ContentEncoder,
}

impl Tag {
    /// Create a tag whose name is known to be valid.
    pub(crate) fn new_unchecked(name: &str, kind: TagKind) -> Self {
        Tag {
            name: name.to_string(),
            kind,
            attributes: Attributes::new(),
            content: Vec::new(),
            encoder: ContentEncoder::default(),
        }
    }

    /// Create a tag with an arbitrary name.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::InvalidTagName`] if the name is empty or contains whitespace,
    /// control characters or any of `<>/"'=`.
    pub fn custom(name: impl Into<String>, kind: TagKind) -> Result<Self> {
        let name = name.into();
        let invalid = name.is_empty()
            || name.chars().any(|c| {
                c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '=')
            });
        if invalid {
            #[cfg(feature = "tracing")]
            tracing::debug!(name = %name, "rejected tag name");
            return Err(Error::InvalidTagName(name));
        }
        Ok(Self::new_unchecked(&name, kind))
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the tag is written out.
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// The tag's attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The tag's content items.
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// The encoder applied to the content.
    pub fn encoder(&self) -> &ContentEncoder {
        &self.encoder
    }

    fn modified(&self, modify: impl FnOnce(&mut Tag)) -> Tag {
        let mut tag = self.clone();
        modify(&mut tag);
        tag
    }

    /// Set a single attribute.
    #[must_use]
    pub fn with_attribute(&self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Tag {
        self.modified(|tag| {
            tag.attributes.set(name, value);
        })
    }

    /// Merge `attributes` into the existing ones; unspecified attributes survive.
    #[must_use]
    pub fn with_attributes(&self, attributes: impl Into<Attributes>) -> Tag {
        self.modified(|tag| tag.attributes.merge(attributes.into()))
    }

    /// Replace all attributes with `attributes`.
    #[must_use]
    pub fn with_replaced_attributes(&self, attributes: impl Into<Attributes>) -> Tag {
        self.modified(|tag| tag.attributes = attributes.into())
    }

    /// Add the entries of `attributes` that aren't set yet.
    #[must_use]
    pub fn with_union_attributes(&self, attributes: impl Into<Attributes>) -> Tag {
        self.modified(|tag| tag.attributes.union(attributes.into()))
    }

    /// Set the `id` attribute. `None` or [`AttributeValue::Null`] removes it from the output.
    #[must_use]
    pub fn with_id(&self, id: impl Into<AttributeValue>) -> Tag {
        self.with_attribute("id", id)
    }

    /// Set `id` to a fresh identifier from `ids`.
    #[must_use]
    pub fn with_generated_id(&self, ids: &IdGenerator, prefix: &str) -> Tag {
        self.with_attribute("id", ids.next_id(prefix))
    }

    /// Replace the `class` attribute.
    #[must_use]
    pub fn with_class(&self, classes: impl Into<ClassValue>) -> Tag {
        let classes: AttributeValue = classes.into().into();
        self.with_attribute("class", classes)
    }

    /// Add classes; see [`add_class`].
    #[must_use]
    pub fn with_added_class(&self, classes: impl Into<ClassValue>) -> Tag {
        self.modified(|tag| add_class(&mut tag.attributes, classes))
    }

    /// Remove classes; see [`remove_class`].
    #[must_use]
    pub fn with_removed_class(&self, classes: impl Into<ClassValue>) -> Tag {
        self.modified(|tag| remove_class(&mut tag.attributes, classes))
    }

    /// Add style declarations; see [`add_style`].
    #[must_use]
    pub fn with_added_style(&self, style: impl Into<StyleValue>, overwrite: bool) -> Tag {
        self.modified(|tag| add_style(&mut tag.attributes, style, overwrite))
    }

    /// Remove style declarations; see [`remove_style`].
    #[must_use]
    pub fn with_removed_style<S: AsRef<str>>(&self, properties: impl IntoIterator<Item = S>) -> Tag {
        self.modified(|tag| remove_style(&mut tag.attributes, properties))
    }

    /// Replace the content with a single item.
    #[must_use]
    pub fn with_content(&self, content: impl Into<Content>) -> Tag {
        self.modified(|tag| tag.content = vec![content.into()])
    }

    /// Replace the content with several items.
    #[must_use]
    pub fn with_contents<C: Into<Content>>(&self, content: impl IntoIterator<Item = C>) -> Tag {
        self.modified(|tag| tag.content = content.into_iter().map(Into::into).collect())
    }

    /// Append a content item.
    #[must_use]
    pub fn with_added_content(&self, content: impl Into<Content>) -> Tag {
        self.modified(|tag| tag.content.push(content.into()))
    }

    /// Set which content items get escaped. Accepts an [`Encoding`], a `bool` or an
    /// `Option<bool>` (`None` meaning [`Encoding::Auto`]).
    #[must_use]
    pub fn with_encoding(&self, encoding: impl Into<Encoding>) -> Tag {
        self.modified(|tag| tag.encoder.encoding = encoding.into())
    }

    /// Set whether existing character references in text are escaped again.
    #[must_use]
    pub fn with_double_encode(&self, double_encode: bool) -> Tag {
        self.modified(|tag| tag.encoder.double_encode = double_encode)
    }

    /// Set whether spaces in text become `&nbsp;`.
    #[must_use]
    pub fn with_encoded_spaces(&self, encode_spaces: bool) -> Tag {
        self.modified(|tag| tag.encoder.encode_spaces = encode_spaces)
    }

    /// Render the tag with the default [`AttributeRenderer`].
    pub fn render(&self) -> String {
        self.render_with(&AttributeRenderer::default())
    }

    /// Render the tag, using `renderer` for its own attributes.
    ///
    /// Void tags ignore any content they hold.
    pub fn render_with(&self, renderer: &AttributeRenderer) -> String {
        let mut output = format!("<{}{}>", self.name, renderer.render(&self.attributes));
        match self.kind {
            TagKind::Void => return output,
            TagKind::Normal => output.push_str(&self.encoder.encode_all(&self.content)),
            TagKind::RawContent => {
                for item in &self.content {
                    match item {
                        Content::Text(text) | Content::Raw(text) => output.push_str(text),
                        Content::Tag(tag) => output.push_str(&tag.render()),
                    }
                }
            }
        }
        output.push_str("</");
        output.push_str(&self.name);
        output.push('>');
        output
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;

    #[test]
    fn test_setters_leave_receiver_unchanged() {
        let original = div().with_attribute("id", "a");
        let changed = original.with_attribute("id", "b").with_content("x");
        assert_ne!(original, changed);
        assert_eq!(original.render(), r#"<div id="a"></div>"#);
        assert_eq!(changed.render(), r#"<div id="b">x</div>"#);
    }

    #[test]
    fn test_render_is_repeatable() {
        let tag = p().with_content("<hi>");
        assert_eq!(tag.render(), tag.render());
        assert_eq!(tag.render(), tag.to_string());
    }

    #[test]
    fn test_void_element() {
        assert_eq!(br().render(), "<br>");
        assert_eq!(
            input().with_attribute("type", "checkbox").with_attribute("checked", true).render(),
            r#"<input type="checkbox" checked>"#
        );
        assert_eq!(hr().with_content("ignored").render(), "<hr>");
    }

    #[test]
    fn test_merge_and_replace_attributes() {
        let tag = span().with_attributes([("id", "a"), ("title", "t")]);
        assert_eq!(
            tag.with_attributes([("id", "b")]).render(),
            r#"<span id="b" title="t"></span>"#
        );
        assert_eq!(
            tag.with_replaced_attributes([("lang", "en")]).render(),
            r#"<span lang="en"></span>"#
        );
        assert_eq!(
            tag.with_union_attributes([("id", "b"), ("lang", "en")]).render(),
            r#"<span id="a" title="t" lang="en"></span>"#
        );
    }

    #[test]
    fn test_content_encoding() {
        let tag = div()
            .with_content("<b>")
            .with_added_content(Content::raw("<i>ok</i>"))
            .with_added_content(span().with_content("&amp;"));
        assert_eq!(
            tag.render(),
            "<div>&lt;b&gt;<i>ok</i><span>&amp;amp;</span></div>"
        );
        assert_eq!(
            tag.with_encoding(false).render(),
            "<div><b><i>ok</i><span>&amp;amp;</span></div>"
        );
        assert_eq!(
            tag.with_encoding(true).render(),
            "<div>&lt;b&gt;&lt;i&gt;ok&lt;/i&gt;&lt;span&gt;&amp;amp;amp;&lt;/span&gt;</div>"
        );
    }

    #[test]
    fn test_double_encode_and_spaces() {
        let tag = option()
            .with_content("Tom &amp; Jerry")
            .with_double_encode(false)
            .with_encoded_spaces(true);
        assert_eq!(tag.render(), "<option>Tom&nbsp;&amp;&nbsp;Jerry</option>");
    }

    #[test]
    fn test_raw_content_tag() {
        let tag = script().with_content("if (a < b && c) { run(); }");
        assert_eq!(tag.render(), "<script>if (a < b && c) { run(); }</script>");
    }

    #[test]
    fn test_class_and_style_helpers() {
        let tag = div()
            .with_class("a")
            .with_added_class(["b", "c"])
            .with_removed_class("a")
            .with_added_style("width: 1px", true)
            .with_added_style([("width", "2px"), ("color", "red")], false);
        assert_eq!(
            tag.render(),
            r#"<div class="b c" style="width: 1px; color: red;"></div>"#
        );
        assert_eq!(
            tag.with_removed_style(["width", "color"]).render(),
            r#"<div class="b c"></div>"#
        );
        assert!(tag
            .with_removed_style(["width", "color"])
            .attributes()
            .contains_key("style"));
    }

    #[test]
    fn test_generated_id() {
        let ids = IdGenerator::new();
        let first = div().with_generated_id(&ids, "w");
        let second = div().with_generated_id(&ids, "w");
        assert_eq!(first.render(), r#"<div id="w1"></div>"#);
        assert_eq!(second.render(), r#"<div id="w2"></div>"#);
    }

    #[test]
    fn test_with_id_none_is_omitted() {
        assert_eq!(div().with_id(None::<&str>).render(), "<div></div>");
    }

    #[test]
    fn test_custom_names() {
        assert_eq!(
            Tag::custom("my-widget", TagKind::Normal).map(|t| t.render()),
            Ok("<my-widget></my-widget>".to_string())
        );
        assert_eq!(
            Tag::custom("", TagKind::Normal),
            Err(Error::InvalidTagName(String::new()))
        );
        assert!(Tag::custom("a b", TagKind::Void).is_err());
        assert!(Tag::custom("x>", TagKind::Void).is_err());
    }

    #[test]
    fn test_render_with_custom_prefix() {
        let tag = button().with_attribute("hx", AttributeValue::map([("post", "/save")]));
        assert_eq!(
            tag.render_with(&AttributeRenderer::new().with_prefix("hx")),
            r#"<button hx-post="/save"></button>"#
        );
    }
}
