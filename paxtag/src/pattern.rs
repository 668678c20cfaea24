//! Conversion of delimited regular expressions into HTML `pattern` values.

use crate::{Error, Result};

/// Turn a delimited regular expression such as `/^[a-z]+$/i` into a value for the
/// HTML `pattern` attribute.
///
/// The delimiters and any trailing flags are stripped, and `\xHH` / `\x{HHHH}`
/// escapes are rewritten as `\uHHHH`, the form JavaScript understands. With
/// `delimiter` unset, the first character of `regexp` is used.
///
/// ```
/// use paxtag::normalize_regexp_pattern;
///
/// assert_eq!(normalize_regexp_pattern("/^[a-z]+$/i", None).unwrap(), "^[a-z]+$");
/// assert_eq!(normalize_regexp_pattern("~a/b~", Some('~')).unwrap(), "a/b");
/// ```
///
/// ## Errors
///
/// Returns [`Error::InvalidPattern`] if `regexp` is shorter than two characters,
/// doesn't start with the delimiter, or has no closing delimiter.
pub fn normalize_regexp_pattern(regexp: &str, delimiter: Option<char>) -> Result<String> {
    if regexp.chars().count() < 2 {
        return Err(invalid("pattern is too short"));
    }

    let pattern = rewrite_hex_escapes(regexp);
    let mut chars = pattern.chars();
    let first = chars.next().ok_or_else(|| invalid("pattern is too short"))?;
    let delimiter = match delimiter {
        None => first,
        Some(delimiter) if delimiter == first => delimiter,
        Some(_) => return Err(invalid("pattern does not start with the delimiter")),
    };

    let body_start = first.len_utf8();
    let body_end = pattern[body_start..]
        .rfind(delimiter)
        .map(|end| body_start + end)
        .ok_or_else(|| invalid("missing closing delimiter"))?;
    Ok(pattern[body_start..body_end].to_string())
}

fn invalid(reason: &str) -> Error {
    #[cfg(feature = "tracing")]
    tracing::debug!(reason, "rejected regular expression");
    Error::InvalidPattern(reason.to_string())
}

/// Rewrite `\xHH` and `\x{HHHH}` as `\uHHHH`.
fn rewrite_hex_escapes(regexp: &str) -> String {
    let mut output = String::with_capacity(regexp.len());
    let mut rest = regexp;
    while let Some(index) = rest.find("\\x") {
        output.push_str(&rest[..index]);
        let after = &rest[index + 2..];
        let braced = after.strip_prefix('{');
        let digits_from = braced.unwrap_or(after);
        let digits = digits_from
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(digits_from.len());
        if digits == 0 {
            output.push_str("\\x");
            rest = after;
            continue;
        }
        output.push_str("\\u");
        output.push_str(&digits_from[..digits]);
        let remainder = &digits_from[digits..];
        rest = remainder.strip_prefix('}').unwrap_or(remainder);
    }
    output.push_str(rest);
    output
}
