//! Drag-and-drop onto file inputs and selected-file feedback.
//!
//! The drop zone is the input's enclosing `.card-body`, or its parent when
//! there is none. Dropped files are moved into the input and a bubbling
//! `change` is dispatched, so dropping and picking share one feedback path.

use std::rc::Rc;

use crate::dom::{Dom, Element, Event, EventKind, FileMeta};
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::ui::PageContext;
use crate::util::format::format_file_size;
use crate::util::html::escape_html;

const FILE_ICON: &str = r#"<i class="fas fa-file me-2"></i>"#;

const DRAG_EVENTS: [EventKind; 4] =
    [EventKind::DragEnter, EventKind::DragOver, EventKind::DragLeave, EventKind::Drop];

pub fn wire<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    for input in ctx.dom.query_selector_all(r#"input[type="file"]"#) {
        let Some(zone) = input.closest(".card-body").or_else(|| input.parent()) else {
            continue;
        };
        wire_drop_zone(ctx, &input, &zone);
        wire_feedback(ctx, &input, &zone);
    }
}

fn wire_drop_zone<D, S, K>(ctx: &Rc<PageContext<D, S, K>>, input: &D::Element, zone: &D::Element)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    for kind in DRAG_EVENTS {
        let weak = Rc::downgrade(ctx);
        let input = input.clone();
        let area = zone.clone();
        ctx.dom.listen(
            zone,
            kind,
            Rc::new(move |event: &D::Event| {
                event.prevent_default();
                event.stop_propagation();
                match kind {
                    EventKind::DragEnter | EventKind::DragOver => area.add_class("dragover"),
                    EventKind::DragLeave => area.remove_class("dragover"),
                    _ => {
                        area.remove_class("dragover");
                        if event.dropped_files().is_empty() {
                            return;
                        }
                        let Some(ctx) = weak.upgrade() else {
                            return;
                        };
                        if ctx.dom.assign_dropped_files(event, &input) > 0 {
                            ctx.dom.dispatch(&input, EventKind::Change);
                        }
                    }
                }
            }),
        );
    }
}

fn wire_feedback<D, S, K>(ctx: &Rc<PageContext<D, S, K>>, input: &D::Element, zone: &D::Element)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    let weak = Rc::downgrade(ctx);
    let field = input.clone();
    let area = zone.clone();
    ctx.dom.listen(
        input,
        EventKind::Change,
        Rc::new(move |_: &D::Event| {
            let Some(file) = field.files().into_iter().next() else {
                return;
            };
            if let Some(ctx) = weak.upgrade() {
                show_file_info(&ctx.dom, &area, &file);
            }
        }),
    );
}

/// Create or refresh the `.file-info` block inside `zone`.
pub fn show_file_info<D: Dom>(dom: &D, zone: &D::Element, file: &FileMeta) {
    let info = zone.query_selector(".file-info").unwrap_or_else(|| {
        let block = dom.create_element("div");
        block.set_class_name("file-info mt-2");
        zone.append_child(&block);
        block
    });
    info.set_inner_html(&format!(
        r#"<div class="alert alert-info">{FILE_ICON}<strong>{}</strong> ({})</div>"#,
        escape_html(&file.name),
        format_file_size(file.size),
    ));
}
