use super::*;

#[test]
fn escape_html_covers_markup_characters() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
}

#[test]
fn escape_html_leaves_plain_text_alone() {
    assert_eq!(escape_html("Saved 3 files"), "Saved 3 files");
}

#[test]
fn strip_tags_keeps_text_and_decodes_entities() {
    assert_eq!(strip_tags("<p>a &lt; b <em>and</em> c</p>"), "a < b and c");
}

#[test]
fn strip_tags_does_not_double_decode() {
    assert_eq!(strip_tags("&amp;lt;"), "&lt;");
}
