//! # eigerdash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatusApi`: JSON GET/PUT against the detector control server
//!   - `Notifier`: user-facing alerts
//! - Own the shared **dashboard state** (page, visible panel, API version,
//!   per-endpoint sequence gates)
//! - Define **driving/inbound ports** as use-case structs:
//!   - `StatusService`: fetch, decode and render one endpoint
//!   - `Poller`: periodic refresh of the detector and unit endpoints
//!   - `CommandDispatcher`: turn user commands into PUTs and alert on failure
//!   - `Navigator`: switch panels and refresh the summary on entering home
//! - Provide **in-process infrastructure** (update bus, alert queue) that
//!   doesn't need IO
//!
//! ## Dependency rule
//! Depends on `eigerdash-domain` only (plus `tokio` for tasks, timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod alerts;
pub mod dashboard;
pub mod ports;
pub mod services;
pub mod update_bus;

#[cfg(test)]
mod testing;
