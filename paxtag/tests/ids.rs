use paxtag::builder::div;
use paxtag::{generate_id, global_ids, reset_ids, DEFAULT_ID_PREFIX};

// The only test in this binary touching the process-wide counter, so resets can't race.
#[test]
fn test_process_wide_ids() {
    reset_ids();
    assert_eq!(generate_id(DEFAULT_ID_PREFIX), "i1");
    assert_eq!(generate_id("field-"), "field-2");

    let tag = div().with_generated_id(global_ids(), "w");
    assert_eq!(tag.render(), r#"<div id="w3"></div>"#);

    reset_ids();
    assert_eq!(generate_id("x"), "x1");
}
