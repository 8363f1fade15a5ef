//! Utility helpers shared across UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure helpers with no document access, so they are usable from wiring code,
//! JS exports and tests alike.

pub mod format;
pub mod html;
pub mod rate_limit;
pub mod validate;
