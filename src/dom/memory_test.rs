use super::*;

#[test]
fn new_document_has_html_root_and_body() {
    let dom = MemoryDom::new();
    assert_eq!(dom.root().tag_name(), "html");
    assert_eq!(dom.body().tag_name(), "body");
    assert!(dom.body().parent().is_some_and(|p| p.same_node(&dom.root())));
}

#[test]
fn class_list_operations_keep_other_classes() {
    let dom = MemoryDom::new();
    let el = dom.create_element("div");
    el.set_class_name("card tool-card");
    el.add_class("active");
    el.add_class("active");
    assert_eq!(el.class_name(), "card tool-card active");
    el.remove_class("tool-card");
    assert_eq!(el.class_name(), "card active");
    assert!(el.has_class("card"));
    assert!(!el.has_class("tool-card"));
}

#[test]
fn inner_html_round_trips_opaque_markup_and_children() {
    let dom = MemoryDom::new();
    let parent = dom.create_element("div");
    parent.set_inner_html("<i class=\"fas fa-copy\"></i> Copy");
    assert_eq!(parent.inner_html(), "<i class=\"fas fa-copy\"></i> Copy");

    let child = dom.create_element("span");
    child.set_attribute("class", "badge");
    child.set_text_content("new");
    parent.append_child(&child);
    assert_eq!(
        parent.inner_html(),
        "<i class=\"fas fa-copy\"></i> Copy<span class=\"badge\">new</span>"
    );
    assert_eq!(parent.text_content(), " Copynew");
}

#[test]
fn set_inner_html_detaches_previous_children() {
    let dom = MemoryDom::new();
    let parent = dom.create_element("div");
    let child = dom.create_element("span");
    parent.append_child(&child);
    parent.set_inner_html("replaced");
    assert!(child.parent().is_none());
    assert!(parent.children().is_empty());
}

#[test]
fn remove_is_idempotent() {
    let dom = MemoryDom::new();
    let el = dom.create_element("div");
    dom.body().append_child(&el);
    el.remove();
    el.remove();
    assert!(el.parent().is_none());
    assert!(dom.body().children().is_empty());
}

#[test]
fn append_child_moves_between_parents() {
    let dom = MemoryDom::new();
    let a = dom.create_element("div");
    let b = dom.create_element("div");
    let child = dom.create_element("p");
    a.append_child(&child);
    b.append_child(&child);
    assert!(a.children().is_empty());
    assert_eq!(b.children().len(), 1);
}

#[test]
fn query_and_closest_walk_attached_elements() {
    let dom = MemoryDom::new();
    let card = dom.create_element("div");
    card.set_class_name("card-body");
    let input = dom.create_element("input");
    input.set_attribute("type", "file");
    card.append_child(&input);
    dom.body().append_child(&card);

    let found = dom.query_selector(r#"input[type="file"]"#);
    assert!(found.is_some_and(|f| f.same_node(&input)));
    assert!(input.closest(".card-body").is_some_and(|c| c.same_node(&card)));
    assert!(input.closest(".modal").is_none());
    assert!(dom.query_selector("div input").is_none());
}

#[test]
fn check_validity_includes_descendants() {
    let dom = MemoryDom::new();
    let form = dom.create_element("form");
    let field = dom.create_element("input");
    form.append_child(&field);
    assert!(form.check_validity());
    field.set_valid(false);
    assert!(!form.check_validity());
    assert!(form.query_selector(":invalid").is_some_and(|f| f.same_node(&field)));
}

#[test]
fn events_bubble_to_ancestors_then_document() {
    let dom = MemoryDom::new();
    let button = dom.create_element("button");
    dom.body().append_child(&button);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let record = |label: &'static str| {
        let log = Rc::clone(&seen);
        Rc::new(move |_: &MemoryEvent| log.borrow_mut().push(label))
    };
    dom.listen(&button, EventKind::Click, record("button"));
    dom.listen(&dom.body(), EventKind::Click, record("body"));
    dom.listen_document(EventKind::Click, record("document"));

    dom.click(&button);
    assert_eq!(*seen.borrow(), vec!["button", "body", "document"]);
}

#[test]
fn stop_propagation_halts_bubbling() {
    let dom = MemoryDom::new();
    let button = dom.create_element("button");
    dom.body().append_child(&button);
    let reached = Rc::new(Cell::new(false));

    dom.listen(&button, EventKind::Click, Rc::new(|ev: &MemoryEvent| ev.stop_propagation()));
    let flag = Rc::clone(&reached);
    dom.listen_document(EventKind::Click, Rc::new(move |_: &MemoryEvent| flag.set(true)));

    let event = dom.click(&button);
    assert!(event.propagation_stopped());
    assert!(!reached.get());
}

#[test]
fn detached_elements_do_not_reach_document_listeners() {
    let dom = MemoryDom::new();
    let orphan = dom.create_element("button");
    let reached = Rc::new(Cell::new(false));
    let flag = Rc::clone(&reached);
    dom.listen_document(EventKind::Click, Rc::new(move |_: &MemoryEvent| flag.set(true)));
    dom.click(&orphan);
    assert!(!reached.get());
}

#[test]
fn listeners_only_fire_for_their_kind() {
    let dom = MemoryDom::new();
    let input = dom.create_element("input");
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    dom.listen(&input, EventKind::Input, Rc::new(move |_: &MemoryEvent| c.set(c.get() + 1)));
    dom.fire(&input, EventKind::Change);
    dom.fire(&input, EventKind::Input);
    assert_eq!(count.get(), 1);
}

#[test]
fn clipboard_records_or_rejects_writes() {
    let dom = MemoryDom::new();
    let ok = futures::executor::block_on(dom.write_clipboard("hello"));
    assert_eq!(ok, Ok(()));
    assert_eq!(dom.clipboard_text().as_deref(), Some("hello"));

    dom.set_clipboard_failure(true);
    let err = futures::executor::block_on(dom.write_clipboard("nope"));
    assert!(matches!(err, Err(ClipboardError::Rejected(_))));
    assert_eq!(dom.clipboard_text().as_deref(), Some("hello"));
}

#[test]
fn assign_dropped_files_copies_event_files() {
    let dom = MemoryDom::new();
    let zone = dom.create_element("div");
    let input = dom.create_element("input");
    let event = dom.fire_with_files(&zone, EventKind::Drop, vec![FileMeta::new("a.pdf", 10)]);
    assert_eq!(dom.assign_dropped_files(&event, &input), 1);
    assert_eq!(input.files(), vec![FileMeta::new("a.pdf", 10)]);
}

#[test]
fn reveal_notifies_matching_observers_only() {
    let dom = MemoryDom::new();
    let watched = dom.create_element("div");
    let other = dom.create_element("div");
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let options = ViewportOptions { threshold: 0.1, root_margin: "0px".to_owned() };
    dom.observe_viewport(
        std::slice::from_ref(&watched),
        &options,
        Rc::new(move |_: &MemoryElement| h.set(h.get() + 1)),
    );
    dom.reveal(&other);
    dom.reveal(&watched);
    assert_eq!(hits.get(), 1);
    assert_eq!(dom.viewport_options(), Some(options));
}
