//! # eigerdash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: pure HTML forms + `<meta http-equiv="refresh">`
//!   for live updates
//! - Map view links (`/view/<panel>`) onto the view router and form posts
//!   onto detector and file-writer commands
//! - Expose the rendered page as JSON and dashboard updates as an SSE stream
//!
//! ## No-JS dashboard approach
//! - Every page is rendered server-side as complete HTML; every panel is
//!   present and all but the visible one carry the `hidden` attribute.
//! - Controls are `<form>` elements that POST back to the server and
//!   redirect (PRG pattern).
//! - The page reloads itself with `<meta http-equiv="refresh" content="N">`.
//!
//! ## Dependency rule
//! Depends on `eigerdash-app` (for port traits and services) and
//! `eigerdash-domain` (for page and command types). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
