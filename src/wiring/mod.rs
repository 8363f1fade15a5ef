//! Binds the widgets to the page's markup.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`init_page`] runs once after the document is ready. Each submodule scans
//! for the markup it owns (`.copy-btn`, `textarea[data-max-length]`,
//! `input[type="file"]`, ...) and subscribes handlers through the [`Dom`]
//! backend, so the whole layer runs unchanged against `MemoryDom` in tests.
//!
//! DESIGN
//! ======
//! Handlers capture a `Weak<PageContext>`; whoever built the context owns it.
//! Elements captured by handlers are plain handles and never point back at
//! the document, so the listener registry holds no cycles.
//!
//! TRADE-OFFS
//! ==========
//! Elements are scanned once. Markup added later is not wired, matching how
//! the page has always behaved; copy and theme buttons are the exception
//! because they are handled by delegation at document level.

pub mod animations;
pub mod copy;
pub mod errors;
pub mod forms;
pub mod navigation;
pub mod theme_toggle;
pub mod uploads;

use std::rc::Rc;

use crate::dom::Dom;
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::ui::PageContext;

/// Wire every page behaviour. Call once per page.
pub fn init_page<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    errors::wire(ctx);
    animations::wire(ctx);
    forms::wire(ctx);
    navigation::wire(ctx);
    uploads::wire(ctx);
    copy::wire(ctx);
    theme_toggle::wire(ctx);
    log::debug!("page wiring complete");
}
