//! # eigerdash-domain
//!
//! Pure domain model of the Eiger detector dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, API paths
//! - Define **status schemas** for every polled endpoint (detector config and
//!   status, frame receiver and frame processor unit lists)
//! - Define the **page view model**: element id → cell (text or indicator)
//! - Render decoded responses into the page, including positional **unit
//!   tables** and **indicator** icons
//! - Resolve location fragments into the visible **panel** (view routing)
//! - Expand user **commands** into ordered PUT requests
//! - Sequence overlapping poll requests so stale responses are discarded
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod endpoint;
pub mod indicator;
pub mod page;
pub mod render;
pub mod sequence;
pub mod status;
pub mod unit_table;
pub mod view;
