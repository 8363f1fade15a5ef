//! Fade-in of cards as they scroll into view.

use std::rc::Rc;

use crate::dom::{Dom, Element, ViewportOptions};
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::ui::PageContext;

pub fn wire<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    let animation = &ctx.config.animation;
    let targets = ctx.dom.query_selector_all(&animation.selector);
    if targets.is_empty() {
        return;
    }
    let options = ViewportOptions {
        threshold: animation.threshold,
        root_margin: animation.root_margin.clone(),
    };
    let class = animation.class.clone();
    log::debug!("observing {} animated elements", targets.len());
    ctx.dom.observe_viewport(
        &targets,
        &options,
        Rc::new(move |el: &D::Element| el.add_class(&class)),
    );
}
