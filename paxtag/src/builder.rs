//! Constructors for the standard HTML elements.
//!
//! Each function returns an empty [`Tag`] of the right [`TagKind`], ready to be
//! specialized through its `with_*` methods.
//!
//! ```
//! use paxtag::builder::{br, li, ul};
//!
//! let list = ul().with_contents([li().with_content("one"), li().with_content("two")]);
//! assert_eq!(list.render(), "<ul><li>one</li><li>two</li></ul>");
//! assert_eq!(br().render(), "<br>");
//! ```

use crate::{Result, Tag, TagKind};

macro_rules! tag_builders {
    ($kind:ident, $list:ident, $list_doc:literal; $($tag_ident:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `<", stringify!($tag_ident), ">` tag.")]
            pub fn $tag_ident() -> Tag {
                Tag::new_unchecked(stringify!($tag_ident), TagKind::$kind)
            }
        )*
        #[doc = $list_doc]
        pub const $list: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}

tag_builders! {
    Normal, NON_VOID_TAGS, "A list of all tags with content and a closing tag.";
    html, head, body, title, header, footer, nav, article, section, aside,
    div, span, p, pre, code, blockquote, a, b, i, u, s, q, em, strong, small,
    sup, sub, time, abbr, mark, h1, h2, h3, h4, h5, h6, ol, ul, li, dl, dt, dd,
    figure, figcaption, table, caption, colgroup, thead, tbody, tfoot, tr, td, th,
    form, fieldset, legend, label, button, select, optgroup, option, datalist,
    textarea, output, progress, meter, details, summary, dialog, audio, video,
    picture, canvas, iframe, noscript, template,
}

tag_builders! {
    Void, VOID_TAGS, "A list of all void tags.";
    area, base, br, col, embed, hr, img, input, link, meta, param, source, track, wbr,
}

tag_builders! {
    RawContent, RAW_CONTENT_TAGS, "A list of all tags whose content is never escaped.";
    script, style,
}

/// The [`TagKind`] a tag name is written with. Unknown names are [`TagKind::Normal`].
pub fn kind_of(name: &str) -> TagKind {
    let name = name.to_ascii_lowercase();
    if VOID_TAGS.contains(&name.as_str()) {
        TagKind::Void
    } else if RAW_CONTENT_TAGS.contains(&name.as_str()) {
        TagKind::RawContent
    } else {
        TagKind::Normal
    }
}

/// Create a tag by name, picking its kind with [`kind_of`].
///
/// ## Errors
///
/// Returns [`Error::InvalidTagName`](crate::Error::InvalidTagName) for names that
/// can't appear in markup.
pub fn tag(name: &str) -> Result<Tag> {
    Tag::custom(name, kind_of(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("img", TagKind::Void)]
    #[case("BR", TagKind::Void)]
    #[case("script", TagKind::RawContent)]
    #[case("div", TagKind::Normal)]
    #[case("my-element", TagKind::Normal)]
    fn test_kind_of(#[case] name: &str, #[case] kind: TagKind) {
        assert_eq!(kind_of(name), kind);
    }

    #[test]
    fn test_tag_by_name() {
        assert_eq!(tag("img").map(|t| t.render()), Ok("<img>".to_string()));
        assert_eq!(tag("div").map(|t| t.kind()), Ok(TagKind::Normal));
        assert!(tag("").is_err());
    }

    #[test]
    fn test_lists_are_disjoint() {
        for name in VOID_TAGS {
            assert!(!NON_VOID_TAGS.contains(name), "{name} is listed twice");
            assert!(!RAW_CONTENT_TAGS.contains(name), "{name} is listed twice");
        }
    }

    #[test]
    fn test_style_tag_keeps_css() {
        let css = style().with_content("a > b { color: \"red\"; }");
        assert_eq!(css.render(), "<style>a > b { color: \"red\"; }</style>");
    }
}
