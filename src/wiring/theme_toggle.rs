//! Restores the saved theme and toggles it from any `.theme-toggle` click.

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
    ctx.theme.init();

    // Clicks usually land on the icon inside the button.
    let weak = Rc::downgrade(ctx);
    ctx.dom.listen_document(
        EventKind::Click,
        Rc::new(move |event: &D::Event| {
            let on_toggle = event.target().and_then(|t| t.closest(".theme-toggle")).is_some();
            if !on_toggle {
                return;
            }
            if let Some(ctx) = weak.upgrade() {
                ctx.theme.toggle();
            }
        }),
    );
}
