//! Synchronous client for the Blue Box "Box Panel" provisioning API.
//!
//! # Overview
//! Lists, fetches, creates and destroys blocks (virtual compute instances)
//! and block templates over HTTPS with HTTP Basic authentication. Each call
//! is one blocking request/response round trip.
//!
//! # Design
//! - `Client` is stateless between calls; it holds config, credentials and
//!   an `HttpTransport` (ureq by default).
//! - Requests are built as plain data (`HttpRequest`) before being sent, so
//!   construction is testable without the network.
//! - `Resource` + `Service` give blocks and templates one shared
//!   List/Get/Create/Destroy implementation.
//!
//! ```no_run
//! use bluebox_core::{BlockParams, Client};
//!
//! let client = Client::new("customer-id", "api-key");
//! let block = client
//!     .blocks()
//!     .create(&BlockParams::with_password("the-product", "the-template", "hunter2"))?;
//! println!("{} is {}", block.hostname, block.status);
//! # Ok::<(), bluebox_core::ApiError>(())
//! ```

pub mod blocks;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod templates;
pub mod types;

#[cfg(test)]
mod testing;

pub use blocks::Blocks;
pub use client::Client;
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, UreqTransport, MAX_BODY_BYTES};
pub use resource::{Resource, Service};
pub use templates::Templates;
pub use types::{Block, BlockIp, BlockParams, Template, TemplateCreationStatus, TemplateParams};
