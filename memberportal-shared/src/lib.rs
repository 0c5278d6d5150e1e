//! # Member Portal Shared Library
//!
//! This crate contains the types and business rules shared by the member
//! portal client: wire DTOs, role predicates, the save policy, validators and
//! display texts.
//!
//! ## Module Organization
//!
//! - `models`: Wire DTOs (users, members, accounts, affiliations, pages)
//! - `auth`: Authorities and the save/ownership policy
//! - `validation`: Form validators (e-mail shape)
//! - `alerts`: Alert and event types with their display texts
//! - `dates`: Form date-time formatting

pub mod alerts;
pub mod auth;
pub mod dates;
pub mod models;
pub mod validation;

/// Current version of the member portal shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of rows per page in list views
pub const ITEMS_PER_PAGE: u32 = 20;
