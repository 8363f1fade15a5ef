//! Copy-to-clipboard buttons.
//!
//! A click anywhere inside a `.copy-btn` copies the text of the element named
//! by the button's `data-target` selector. The button shows "Copied!" for a
//! moment, then gets its markup back. A failed write is reported through the
//! same path as an unhandled rejection.

use std::rc::Rc;

use futures::FutureExt;

use super::errors;
use crate::dom::{Dom, Element, Event, EventKind, PageFault};
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::ui::PageContext;

pub const COPIED_HTML: &str = r#"<i class="fas fa-check me-1"></i>Copied!"#;

/// Holds the button's own markup while it shows the copied state, so a second
/// click during feedback does not capture the feedback as the original.
const ORIGINAL_ATTR: &str = "data-copy-original";

pub fn wire<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    let weak = Rc::downgrade(ctx);
    ctx.dom.listen_document(
        EventKind::Click,
        Rc::new(move |event: &D::Event| {
            let Some(button) = event.target().and_then(|t| t.closest(".copy-btn")) else {
                return;
            };
            if let Some(ctx) = weak.upgrade() {
                copy_from_button(&ctx, &button);
            }
        }),
    );
}

/// Copy the text named by `button`'s `data-target`, with visual feedback.
pub fn copy_from_button<D, S, K>(ctx: &Rc<PageContext<D, S, K>>, button: &D::Element)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    let Some(selector) = button.attribute("data-target") else {
        return;
    };
    let Some(target) = ctx.dom.query_selector(&selector) else {
        log::debug!("copy target {selector:?} not found");
        return;
    };
    let text = copy_text_of(&target);

    let write = ctx.dom.write_clipboard(&text);
    let weak = Rc::downgrade(ctx);
    let button = button.clone();
    ctx.scheduler.spawn_local(
        async move {
            let result = write.await;
            let Some(ctx) = weak.upgrade() else {
                return;
            };
            match result {
                Ok(()) => show_copied(&ctx, &button),
                Err(err) => errors::report(
                    &ctx,
                    &PageFault::UnhandledRejection { reason: err.to_string() },
                ),
            }
        }
        .boxed_local(),
    );
}

/// Text content, or the control value when the element has no text.
fn copy_text_of<E: Element>(target: &E) -> String {
    let text = target.text_content();
    if text.is_empty() {
        target.value().unwrap_or_default()
    } else {
        text
    }
}

fn show_copied<D, S, K>(ctx: &PageContext<D, S, K>, button: &D::Element)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore,
{
    let original = button.attribute(ORIGINAL_ATTR).unwrap_or_else(|| {
        let markup = button.inner_html();
        button.set_attribute(ORIGINAL_ATTR, &markup);
        markup
    });
    button.set_inner_html(COPIED_HTML);

    let restoring = button.clone();
    ctx.scheduler.set_timeout(
        ctx.config.copy_feedback(),
        Box::new(move || {
            if restoring.attribute(ORIGINAL_ATTR).is_some() {
                restoring.set_inner_html(&original);
                restoring.remove_attribute(ORIGINAL_ATTR);
            }
        }),
    );
}
