use paxtag::{
    add_class, add_style, encode, map_to_style, remove_style, render_attributes, style_to_map,
    AttributeValue, Attributes,
};
use rstest::rstest;

#[test]
fn test_end_to_end_attribute_rendering() {
    let attributes = Attributes::new()
        .with("id", "x")
        .with("class", ["a", "b"])
        .with("data", AttributeValue::map([("a", 1), ("b", 2)]))
        .with("style", AttributeValue::map([("width", "100px")]))
        .with("any", [1, 2]);
    assert_eq!(
        render_attributes(&attributes),
        r#" id="x" class="a b" data-a="1" data-b="2" style="width: 100px;" any='[1,2]'"#
    );
}

#[rstest]
#[case("disabled", AttributeValue::Bool(true), " disabled")]
#[case("disabled", AttributeValue::Bool(false), "")]
#[case("class", AttributeValue::List(vec![]), "")]
#[case("style", AttributeValue::List(vec![]), "")]
#[case("class", AttributeValue::from(["a", "b"]), r#" class="a b""#)]
#[case("value", AttributeValue::from(42.00), r#" value="42""#)]
#[case("value", AttributeValue::from(42.56), r#" value="42.56""#)]
#[case("any", AttributeValue::from([1, 2]), " any='[1,2]'")]
#[case("data", AttributeValue::map([("foo", AttributeValue::List(vec![]))]), " data-foo='[]'")]
fn test_single_attribute(
    #[case] name: &str,
    #[case] value: AttributeValue,
    #[case] expected: &str,
) {
    assert_eq!(render_attributes(&Attributes::new().with(name, value)), expected);
}

#[test]
fn test_absent_values_render_like_missing_keys() {
    for absent in [AttributeValue::Null, AttributeValue::Bool(false)] {
        let with_key = Attributes::new()
            .with("id", "x")
            .with("title", absent)
            .with("lang", "en");
        let without_key = Attributes::new().with("id", "x").with("lang", "en");
        assert_eq!(render_attributes(&with_key), render_attributes(&without_key));
    }
}

#[test]
fn test_add_class_twice_matches_once() {
    let mut once = Attributes::from([("class", "base")]);
    add_class(&mut once, "x");
    let mut twice = Attributes::from([("class", "base")]);
    add_class(&mut twice, "x");
    add_class(&mut twice, "x");
    assert_eq!(render_attributes(&once), render_attributes(&twice));
    assert_eq!(render_attributes(&once), r#" class="base x""#);
}

#[test]
fn test_style_round_trip() {
    let style = style_to_map("color: red; margin: 0 auto; font-family: serif");
    let css = map_to_style(&style).unwrap();
    assert_eq!(css, "color: red; margin: 0 auto; font-family: serif;");
    assert_eq!(style_to_map(&css), style);
}

#[test]
fn test_remove_style_keeps_null_key() {
    let mut attributes = Attributes::new();
    add_style(&mut attributes, [("width", "1px")], true);
    remove_style(&mut attributes, ["width"]);
    assert_eq!(attributes.get("style"), Some(&AttributeValue::Null));
    assert_eq!(render_attributes(&attributes), "");
}

#[test]
fn test_encode_is_stable_without_double_encoding() {
    let escaped = encode(r#"<p class="x">Fish & 'Chips'</p>"#, true).into_owned();
    assert_eq!(encode(&escaped, false), escaped);
    assert_eq!(encode("&amp;", true), "&amp;amp;");
}
