//! # eigerdash-adapter-http-reqwest
//!
//! Status API adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `StatusApi` port defined in `eigerdash-app::ports`
//! - Send JSON `GET`/`PUT` requests to the detector control server
//! - Map non-success responses to `DashError::Rejected`, carrying the
//!   server-reported `error` text
//!
//! ## Dependency rule
//! Depends on `eigerdash-app` (for port traits) and `eigerdash-domain` (for error types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod client;
pub mod error;

pub use client::{Config, ReqwestStatusApi};
pub use error::HttpClientError;
