//! HTML escaping for text content and attribute values.

use std::borrow::Cow;

use crate::{Content, Encoding};

/// Escape `&`, `<`, `>`, `"` and `'` in `text`.
///
/// With `double_encode` unset, well-formed character references already in `text`
/// (`&amp;`, `&#39;`, `&#x27;`, ...) are copied as they are while every other special
/// character is still escaped.
///
/// ```
/// use paxtag::encode;
///
/// assert_eq!(encode("a < b & c", true), "a &lt; b &amp; c");
/// assert_eq!(encode("&lt;b&gt; & co", false), "&lt;b&gt; &amp; co");
/// ```
pub fn encode(text: &str, double_encode: bool) -> Cow<'_, str> {
    if double_encode || !text.contains('&') {
        return html_escape::encode_quoted_attribute(text);
    }

    let mut output = String::with_capacity(text.len() + 8);
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        html_escape::encode_quoted_attribute_to_string(&rest[..amp], &mut output);
        let tail = &rest[amp..];
        match entity_len(tail) {
            Some(len) => {
                output.push_str(&tail[..len]);
                rest = &tail[len..];
            }
            None => {
                output.push_str("&amp;");
                rest = &tail[1..];
            }
        }
    }
    html_escape::encode_quoted_attribute_to_string(rest, &mut output);
    Cow::Owned(output)
}

/// Escape a value for use inside a quoted attribute. Always double encodes.
pub fn encode_attribute(value: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(value)
}

/// Escape a value for use as an unquoted attribute value.
pub fn encode_unquoted_attribute(value: &str) -> Cow<'_, str> {
    html_escape::encode_unquoted_attribute(value)
}

/// Length of the character reference at the start of `s`, which begins with `&`.
fn entity_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let body = match bytes.get(1)? {
        b'#' => match bytes.get(2)? {
            b'x' | b'X' => {
                let digits = count_while(&bytes[3..], u8::is_ascii_hexdigit);
                (digits > 0).then_some(3 + digits)?
            }
            _ => {
                let digits = count_while(&bytes[2..], u8::is_ascii_digit);
                (digits > 0).then_some(2 + digits)?
            }
        },
        c if c.is_ascii_alphabetic() => 1 + count_while(&bytes[1..], u8::is_ascii_alphanumeric),
        _ => return None,
    };
    (bytes.get(body) == Some(&b';')).then_some(body + 1)
}

fn count_while(bytes: &[u8], predicate: impl Fn(&u8) -> bool) -> usize {
    bytes.iter().take_while(|&b| predicate(b)).count()
}

/// Encodes tag content.
///
/// The encoder decides, per content item, whether to escape it, and can replace
/// spaces with `&nbsp;` after escaping.
///
/// ```
/// use paxtag::{Content, ContentEncoder, Encoding};
///
/// let encoder = ContentEncoder::new().encode_spaces(true);
/// assert_eq!(encoder.encode_text("hello world"), "hello&nbsp;world");
///
/// let items = [Content::text("<b>"), Content::raw("<i>raw</i>")];
/// assert_eq!(encoder.encode_all(&items), "&lt;b&gt;<i>raw</i>");
/// assert_eq!(
///     encoder.encoding(Encoding::Always).encode_all(&items),
///     "&lt;b&gt;&lt;i&gt;raw&lt;/i&gt;"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentEncoder {
    /// Which items get escaped.
    pub encoding: Encoding,
    /// Whether existing character references are escaped again.
    pub double_encode: bool,
    /// Whether spaces become `&nbsp;` after escaping.
    pub encode_spaces: bool,
}

impl Default for ContentEncoder {
    fn default() -> Self {
        Self {
            encoding: Encoding::Auto,
            double_encode: true,
            encode_spaces: false,
        }
    }
}

impl ContentEncoder {
    /// Creates an encoder that escapes text items and double encodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the encoding policy.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets whether existing character references are escaped again.
    pub fn double_encode(mut self, double_encode: bool) -> Self {
        self.double_encode = double_encode;
        self
    }

    /// Sets whether spaces become `&nbsp;` after escaping.
    pub fn encode_spaces(mut self, encode_spaces: bool) -> Self {
        self.encode_spaces = encode_spaces;
        self
    }

    /// Encode a single string value.
    ///
    /// A plain string carries no marker of its own, so only
    /// [`Encoding::Never`] leaves it unescaped.
    pub fn encode_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let text = match self.encoding {
            Encoding::Never => Cow::Borrowed(text),
            Encoding::Always | Encoding::Auto => encode(text, self.double_encode),
        };
        self.apply_spaces(text)
    }

    /// Encode one content item.
    pub fn encode_item(&self, item: &Content) -> String {
        match item {
            Content::Text(text) => self.encode_text(text).into_owned(),
            Content::Raw(html) => match self.encoding {
                Encoding::Always => self.escape_markup(html),
                Encoding::Never | Encoding::Auto => html.clone(),
            },
            Content::Tag(tag) => {
                let html = tag.render();
                match self.encoding {
                    Encoding::Always => self.escape_markup(&html),
                    Encoding::Never | Encoding::Auto => html,
                }
            }
        }
    }

    /// Encode and concatenate a sequence of content items.
    pub fn encode_all<'a>(&self, items: impl IntoIterator<Item = &'a Content>) -> String {
        let mut output = String::new();
        for item in items {
            output.push_str(&self.encode_item(item));
        }
        output
    }

    fn escape_markup(&self, html: &str) -> String {
        self.apply_spaces(encode(html, self.double_encode))
            .into_owned()
    }

    fn apply_spaces<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if self.encode_spaces && text.contains(' ') {
            Cow::Owned(text.replace(' ', "&nbsp;"))
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("<script>", "&lt;script&gt;")]
    #[case(r#"say "hi" & 'bye'"#, "say &quot;hi&quot; &amp; &#x27;bye&#x27;")]
    #[case("&amp;", "&amp;amp;")]
    fn test_encode_double(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode(input, true), expected);
    }

    #[rstest]
    #[case("&amp; &lt; &#39; &#x27; &nbsp;", "&amp; &lt; &#39; &#x27; &nbsp;")]
    #[case("a & b", "a &amp; b")]
    #[case("&#; &#x; &; &amp", "&amp;#; &amp;#x; &amp;; &amp;amp")]
    #[case("&amp;<b>", "&amp;&lt;b&gt;")]
    #[case("\"&quot;\"", "&quot;&quot;&quot;")]
    fn test_encode_without_double_encoding(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode(input, false), expected);
    }

    #[test]
    fn test_already_escaped_text_is_stable() {
        let escaped = encode("<a href=\"x\">Tom & Jerry's</a>", true).into_owned();
        assert_eq!(encode(&escaped, false), escaped);
        assert_ne!(encode(&escaped, true), escaped);
    }

    #[test]
    fn test_nbsp_applies_after_escaping() {
        let encoder = ContentEncoder::new().encode_spaces(true);
        assert_eq!(encoder.encode_text("a & b"), "a&nbsp;&amp;&nbsp;b");
        assert_eq!(
            encoder.double_encode(false).encode_text("&nbsp; x"),
            "&nbsp;&nbsp;x"
        );
    }

    #[test]
    fn test_encoding_auto_skips_tags() {
        let items = [
            Content::text("1 < 2"),
            Content::from(builder::b().with_content("bold")),
        ];
        let encoder = ContentEncoder::new();
        assert_eq!(encoder.encode_all(&items), "1 &lt; 2<b>bold</b>");
        assert_eq!(
            encoder.encoding(Encoding::Always).encode_all(&items),
            "1 &lt; 2&lt;b&gt;bold&lt;/b&gt;"
        );
        assert_eq!(
            encoder.encoding(Encoding::Never).encode_all(&items),
            "1 < 2<b>bold</b>"
        );
    }

    #[test]
    fn test_nbsp_skips_raw_items() {
        let encoder = ContentEncoder::new().encode_spaces(true);
        assert_eq!(
            encoder.encode_item(&Content::raw("<a href=\"#\">x y</a>")),
            "<a href=\"#\">x y</a>"
        );
    }

    #[test]
    fn test_unquoted_attribute_escapes_spaces() {
        assert!(!encode_unquoted_attribute("a b").contains(' '));
    }
}
