//! Active nav-link highlighting and smooth in-page anchor scrolling.

use std::rc::Rc;

use crate::dom::{Dom, Element, Event, EventKind};
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::ui::PageContext;

pub fn wire<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    let path = ctx.dom.location_path();
    for link in ctx.dom.query_selector_all(".nav-link") {
        if link.attribute("href").as_deref() == Some(path.as_str()) {
            link.add_class("active");
        }
    }

    for anchor in ctx.dom.query_selector_all(r##"a[href^="#"]"##) {
        let weak = Rc::downgrade(ctx);
        let link = anchor.clone();
        ctx.dom.listen(
            &anchor,
            EventKind::Click,
            Rc::new(move |event: &D::Event| {
                event.prevent_default();
                let Some(ctx) = weak.upgrade() else {
                    return;
                };
                let href = link.attribute("href").unwrap_or_default();
                if href.len() < 2 {
                    return;
                }
                if let Some(target) = ctx.dom.query_selector(&href) {
                    target.scroll_into_view();
                }
            }),
        );
    }
}
