//! Textarea auto-resize, submit-time validation feedback, and character
//! counters.

use std::rc::Rc;

use crate::dom::{Dom, Element, Event, EventKind};
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::ui::PageContext;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

pub fn wire<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    auto_resize(&ctx.dom);
    validate_on_submit(ctx);
    character_counters(ctx);
}

fn auto_resize<D: Dom>(dom: &D) {
    for textarea in dom.query_selector_all("textarea") {
        let el = textarea.clone();
        dom.listen(
            &textarea,
            EventKind::Input,
            Rc::new(move |_: &D::Event| {
                el.set_style("height", "auto");
                el.set_style("height", &format!("{}px", el.scroll_height()));
            }),
        );
    }
}

fn validate_on_submit<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    for form in ctx.dom.query_selector_all("form") {
        let weak = Rc::downgrade(ctx);
        let target = form.clone();
        ctx.dom.listen(
            &form,
            EventKind::Submit,
            Rc::new(move |event: &D::Event| {
                if !target.check_validity() {
                    event.prevent_default();
                    event.stop_propagation();
                    if let Some(first) = target.query_selector(":invalid") {
                        first.focus();
                        if let Some(ctx) = weak.upgrade() {
                            ctx.notifications.warning(REQUIRED_FIELDS_MESSAGE);
                        }
                    }
                }
                target.add_class("was-validated");
            }),
        );
    }
}

fn character_counters<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    let threshold = ctx.config.counter_warning_threshold;
    for textarea in ctx.dom.query_selector_all("textarea[data-max-length]") {
        let raw = textarea.attribute("data-max-length").unwrap_or_default();
        let Ok(max) = raw.trim().parse::<i64>() else {
            log::warn!("ignoring textarea with data-max-length={raw:?}");
            continue;
        };
        let Some(parent) = textarea.parent() else {
            continue;
        };
        let counter = ctx.dom.create_element("small");
        counter.set_class_name("text-muted");
        parent.append_child(&counter);

        let field = textarea.clone();
        let update = move || {
            let used = field.value().map_or(0, |v| v.chars().count());
            let remaining = remaining_chars(max, used);
            counter.set_text_content(&format!("{remaining} characters remaining"));
            counter.set_class_name(counter_class(remaining, threshold));
        };
        update();
        ctx.dom.listen(&textarea, EventKind::Input, Rc::new(move |_: &D::Event| update()));
    }
}

/// Characters left under `max`, clamped at the `i64` range.
#[must_use]
pub fn remaining_chars(max: i64, used: usize) -> i64 {
    max.saturating_sub(i64::try_from(used).unwrap_or(i64::MAX))
}

/// Styling for a counter with `remaining` characters left. Overflow is
/// checked before the warning band so it is reachable.
#[must_use]
pub fn counter_class(remaining: i64, warning_below: i64) -> &'static str {
    if remaining < 0 {
        "text-danger"
    } else if remaining < warning_below {
        "text-warning"
    } else {
        "text-muted"
    }
}
