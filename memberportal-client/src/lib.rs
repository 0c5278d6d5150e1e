//! # Member Portal Client Library
//!
//! This library talks to the member portal back-end services (users,
//! members, affiliations, the logged-in account) and implements the form
//! workflows of the portal independently of any UI framework.
//!
//! ## Modules
//!
//! - `app`: Client wiring
//! - `config`: Configuration management
//! - `error`: Error handling
//! - `events`: Portal event bus
//! - `http`: Shared HTTP plumbing
//! - `services`: REST service wrappers
//! - `session`: Identity and member-data cache
//! - `workflow`: Form workflows (user/member editors, settings, password reset)

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod services;
pub mod session;
pub mod workflow;

pub use app::PortalClient;
