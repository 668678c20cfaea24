//! JSON encoding for values embedded in single-quoted attributes.

use std::io;

use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, Serializer};

/// A compact JSON formatter whose output is safe inside an HTML attribute.
///
/// Inside strings, `<`, `>`, `&`, `'` and `"` are written as `\uXXXX` escapes and
/// `/` as `\/`, so the result never contains a character that ends the attribute or
/// opens a tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            let escaped = match c {
                '<' => "\\u003C",
                '>' => "\\u003E",
                '&' => "\\u0026",
                '\'' => "\\u0027",
                '/' => "\\/",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = index + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\u0022"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

/// Serialize `value` as compact, HTML-safe JSON.
///
/// ## Errors
///
/// Returns the serializer's error if `value` can't be represented as JSON.
pub fn to_html_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut output = Vec::with_capacity(64);
    let mut serializer = Serializer::with_formatter(&mut output, HtmlSafeFormatter);
    value.serialize(&mut serializer)?;
    // The serializer only ever writes UTF-8.
    Ok(String::from_utf8_lossy(&output).into_owned())
}
