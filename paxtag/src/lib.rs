#![deny(missing_docs)]
//! A crate for building HTML tags as immutable values and rendering them to markup.
//!
//! Tags are created through [builder] (or [`Tag::custom`]) and specialized with
//! `with_*` methods, each of which returns a new [Tag]. Attribute maps are rendered by
//! [AttributeRenderer], which knows how to expand `class`, `style`, `data-*` and
//! `aria-*` values, and content is escaped by [ContentEncoder].
//!
//! The same machinery is available as free functions over an [Attributes] map, for
//! code that assembles attributes before a tag exists: [render_attributes],
//! [add_class], [remove_class], [add_style], [remove_style], [encode].
//!
//! # Example
//!
//! ```
//! use paxtag::{builder::*, AttributeValue, Content};
//!
//! let field = div()
//!     .with_class("field")
//!     .with_attribute("data", AttributeValue::map([("role", "name"), ("max", "20")]))
//!     .with_contents([
//!         Content::from(label().with_attribute("for", "name").with_content("Name & title")),
//!         Content::from(input().with_id("name").with_attribute("required", true)),
//!     ]);
//! assert_eq!(
//!     field.render(),
//!     r#"<div class="field" data-role="name" data-max="20"><label for="name">Name &amp; title</label><input id="name" required></div>"#
//! );
//! ```

pub mod builder;
pub mod class;
pub mod encode;
pub mod json;
pub mod pattern;
pub mod style;

mod attribute;
pub use attribute::{AttributeValue, Attributes};

pub use class::{add_class, normalize_class_to_list, remove_class, ClassKey, ClassList, ClassValue};

mod content;
pub use content::{Content, Encoding};

pub use encode::{encode, encode_attribute, encode_unquoted_attribute, ContentEncoder};

mod error;
pub use error::{Error, Result};

mod id;
pub use id::{generate_id, global_ids, reset_ids, IdGenerator, DEFAULT_ID_PREFIX};

pub use json::to_html_json;

pub use pattern::normalize_regexp_pattern;

mod render;
pub use render::{render_attributes, AttributeRenderer, DEFAULT_CONCATENATED, DEFAULT_PREFIXES};

pub use style::{add_style, map_to_style, remove_style, style_to_map, StyleMap, StyleValue};

mod tag;
pub use tag::{Tag, TagKind};
