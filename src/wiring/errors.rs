//! Last-resort reporting of uncaught errors and unhandled rejections.

use std::rc::Rc;

use crate::dom::{Dom, PageFault};
use crate::schedule::Scheduler;
use crate::storage::KeyValueStore;
use crate::ui::PageContext;

pub const ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const REJECTION_MESSAGE: &str = "An error occurred while processing your request.";

pub fn wire<D, S, K>(ctx: &Rc<PageContext<D, S, K>>)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore + 'static,
{
    let weak = Rc::downgrade(ctx);
    ctx.dom.listen_faults(Rc::new(move |fault: &PageFault| {
        if let Some(ctx) = weak.upgrade() {
            report(&ctx, fault);
        }
    }));
}

/// Log `fault` and show the matching danger notification.
pub fn report<D, S, K>(ctx: &PageContext<D, S, K>, fault: &PageFault)
where
    D: Dom,
    S: Scheduler,
    K: KeyValueStore,
{
    match fault {
        PageFault::Error { message } => {
            log::error!("Global error: {message}");
            ctx.notifications.danger(ERROR_MESSAGE);
        }
        PageFault::UnhandledRejection { reason } => {
            log::error!("Unhandled promise rejection: {reason}");
            ctx.notifications.danger(REJECTION_MESSAGE);
        }
    }
}
