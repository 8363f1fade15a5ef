use super::*;

struct Subject {
    tag: &'static str,
    attrs: Vec<(&'static str, &'static str)>,
    invalid: bool,
}

impl Subject {
    fn new(tag: &'static str, attrs: &[(&'static str, &'static str)]) -> Self {
        Self { tag, attrs: attrs.to_vec(), invalid: false }
    }
}

impl SelectorSubject for Subject {
    fn tag(&self) -> String {
        self.tag.to_owned()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| (*v).to_owned())
    }

    fn is_invalid(&self) -> bool {
        self.invalid
    }
}

fn sel(s: &str) -> Selector {
    Selector::parse(s).expect("selector should parse")
}

#[test]
fn class_selector_matches_any_listed_class() {
    let card = Subject::new("div", &[("class", "card tool-card shadow")]);
    assert!(sel(".tool-card").matches(&card));
    assert!(!sel(".feature-card").matches(&card));
}

#[test]
fn selector_list_matches_any_alternative() {
    let card = Subject::new("div", &[("class", "provider-card")]);
    assert!(sel(".feature-card, .tool-card, .provider-card").matches(&card));
}

#[test]
fn tag_and_attribute_equality() {
    let file = Subject::new("input", &[("type", "file")]);
    let text = Subject::new("input", &[("type", "text")]);
    assert!(sel(r#"input[type="file"]"#).matches(&file));
    assert!(!sel(r#"input[type="file"]"#).matches(&text));
    assert!(sel("INPUT[type=file]").matches(&file));
}

#[test]
fn attribute_prefix_for_anchor_links() {
    let anchor = Subject::new("a", &[("href", "#pricing")]);
    let external = Subject::new("a", &[("href", "/tools")]);
    assert!(sel(r##"a[href^="#"]"##).matches(&anchor));
    assert!(!sel(r##"a[href^="#"]"##).matches(&external));
}

#[test]
fn attribute_presence_and_word_match() {
    let area = Subject::new("textarea", &[("data-max-length", "500"), ("rel", "a b")]);
    assert!(sel("textarea[data-max-length]").matches(&area));
    assert!(sel("[rel~=b]").matches(&area));
    assert!(!sel("[rel~=c]").matches(&area));
}

#[test]
fn id_and_invalid_pseudo() {
    let mut field = Subject::new("input", &[("id", "email")]);
    assert!(sel("#email").matches(&field));
    assert!(!sel(":invalid").matches(&field));
    field.invalid = true;
    assert!(sel("input:invalid").matches(&field));
}

#[test]
fn universal_selector_matches_everything() {
    assert!(sel("*").matches(&Subject::new("span", &[])));
}

#[test]
fn combinators_are_rejected() {
    assert!(matches!(
        Selector::parse(".card-body input"),
        Err(SelectorError::Unsupported { .. })
    ));
    assert!(matches!(Selector::parse("ul > li"), Err(SelectorError::Unsupported { .. })));
}

#[test]
fn empty_and_unterminated_inputs_fail() {
    assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
    assert!(matches!(
        Selector::parse("[data-target"),
        Err(SelectorError::Unterminated(_))
    ));
    assert!(matches!(
        Selector::parse(r#"[type="file]"#),
        Err(SelectorError::Unterminated(_))
    ));
}

#[test]
fn unknown_pseudo_class_is_rejected() {
    assert!(Selector::parse("a:hover").is_err());
}
