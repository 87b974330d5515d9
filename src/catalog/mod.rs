//! Movie catalog access.
//!
//! The plugin talks to an OMDb-compatible HTTP API through Zellij's
//! `web_request`. This module only builds request URLs and decodes response
//! bodies; sending requests and routing their results is done by the
//! [`fetch`](crate::fetch) slots and the plugin shim.
//!
//! # Organization
//!
//! - [`client`]: Endpoint configuration and URL construction
//! - [`response`]: Wire types and conversion into domain models

pub mod client;
pub mod response;

pub use client::{CatalogClient, DEFAULT_API_URL};
pub use response::{parse_detail, parse_search};
