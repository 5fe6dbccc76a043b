//! Client core for the easyDNS REST API.
//!
//! # Overview
//! Creates or updates a single DNS A record. `ApiClient` builds
//! authenticated `HttpRequest` values, hands them to a `Transport`, and
//! normalizes the provider's success and error envelopes into
//! `ApiResponse` or `ApiError`.
//!
//! # Design
//! - `Config` is an immutable value passed in at construction.
//! - The network sits behind the `Transport` trait, so request building and
//!   response interpretation are testable without sockets.
//! - No error terminates the process here; the caller decides.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{summarize, ApiClient};
pub use config::{Config, ResponseFormat};
pub use error::ApiError;
pub use http::{basic_auth, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{ApiResponse, CallSummary, CreateRecord, DnsRecord, RecordLookup, UpdateRecord};
