//! Client-side UI utilities for the server-rendered platform pages.
//!
//! This crate is compiled to WebAssembly (feature `hydrate`) and runs in the
//! browser after the server has rendered the markup. It wires the page's
//! widget behaviours and exposes reusable helpers to page scripts. Every
//! browser global is reached through an injectable backend, so the whole
//! layer also builds natively and is tested against in-memory backends.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | [`config::UiConfig`] tunables with serde defaults |
//! | [`dom`] | `Dom`/`Element`/`Event` traits, selector engine, in-memory document |
//! | [`schedule`] | Timers and local task spawning; virtual-time scheduler for tests |
//! | [`storage`] | JSON key-value storage over `localStorage` or memory |
//! | [`net`] | JSON fetch wrapper over a pluggable HTTP transport |
//! | [`ui`] | Notifications, loading state, theme, and the shared page context |
//! | [`util`] | Debounce/throttle, file size formatting, validation, HTML escaping |
//! | [`wiring`] | Binds everything to the page markup at load |
//! | `web` | web-sys backends and JS exports (hydrate only) |
//! | `boot` | wasm entry point (hydrate only) |

pub mod config;
pub mod dom;
pub mod net;
pub mod schedule;
pub mod storage;
pub mod ui;
pub mod util;
pub mod wiring;

#[cfg(feature = "hydrate")]
pub mod boot;
#[cfg(feature = "hydrate")]
pub mod web;
