//! Authenticated request builder and response interpreter for easyDNS.
//!
//! # Design
//! `ApiClient` owns an immutable `Config` and a `Transport`. Each operation
//! is split the same way: a `build_*` method produces an `HttpRequest`,
//! `request` sleeps the configured delay and runs it through the transport,
//! and `parse_response` turns the raw `HttpResponse` into either an
//! `ApiResponse` or an `ApiError`. The `build_*` and `parse_response`
//! halves are deterministic and are what the test vectors exercise.

use std::net::Ipv4Addr;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{basic_auth, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{
    display_value, truthy_field, ApiResponse, CallSummary, CreateRecord, UpdateRecord,
    RSTATUS_UNAVAILABLE,
};

/// Domain queried by the credential check. Any registered domain works;
/// the provider only has to accept the token/key pair.
const CHECK_DOMAIN: &str = "easydns.net";

const RECORD_TYPE_A: &str = "A";

/// Client for the easyDNS REST API.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    config: Config,
    transport: T,
}

impl<T> ApiClient<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_verify_credentials(&self) -> HttpRequest {
        self.build(HttpMethod::Get, &format!("/domains/check/{CHECK_DOMAIN}"), None)
    }

    pub fn build_create_record(
        &self,
        hostname: &str,
        address: Ipv4Addr,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_body(&CreateRecord {
            domain: self.config.domain().to_string(),
            host: hostname.to_string(),
            ttl: self.config.ttl(),
            prio: 0,
            record_type: RECORD_TYPE_A.to_string(),
            rdata: address.to_string(),
        })?;
        let action = format!("/zones/records/add/{}/{RECORD_TYPE_A}", self.config.domain());
        Ok(self.build(HttpMethod::Put, &action, Some(body)))
    }

    pub fn build_list_records(&self) -> HttpRequest {
        let action = format!("/zones/records/all/{}", self.config.domain());
        self.build(HttpMethod::Get, &action, None)
    }

    pub fn build_update_record(
        &self,
        zone_id: &str,
        hostname: &str,
        address: Ipv4Addr,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_body(&UpdateRecord {
            host: hostname.to_string(),
            ttl: self.config.ttl(),
            record_type: RECORD_TYPE_A.to_string(),
            rdata: address.to_string(),
        })?;
        Ok(self.build(HttpMethod::Post, &format!("/zones/records/{zone_id}"), Some(body)))
    }

    /// Interpret a raw response received for `url`.
    ///
    /// A body that is not JSON is a `Decode` error. A truthy `error` member
    /// is an `Api` error whose message and code fall back to the HTTP reason
    /// phrase and status. Anything else is a success and is logged.
    pub fn parse_response(&self, url: &str, response: HttpResponse) -> Result<ApiResponse, ApiError> {
        let payload: Value = serde_json::from_str(&response.body).map_err(|_| ApiError::Decode {
            url: url.to_string(),
            status: response.status,
            body: response.body.clone(),
        })?;

        if let Some(error) = truthy_field(&payload, "error") {
            let (message, code) = match error {
                Value::Object(_) => (
                    truthy_field(error, "message").map(display_value),
                    truthy_field(error, "code").map(display_value),
                ),
                Value::String(message) => (Some(message.clone()), None),
                _ => (None, None),
            };
            return Err(ApiError::Api {
                url: url.to_string(),
                message: message.unwrap_or_else(|| response.reason().to_string()),
                code: code.unwrap_or_else(|| response.status.to_string()),
            });
        }

        let summary = summarize(&payload, &response);
        info!(
            "easydns API call successful (msg: {}, code: {}, rstatus: {})",
            summary.msg, summary.code, summary.rstatus
        );

        Ok(ApiResponse {
            url: url.to_string(),
            status: response.status,
            payload,
        })
    }

    fn build(&self, method: HttpMethod, action: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            (
                "authorization".to_string(),
                basic_auth(self.config.token(), self.config.key()),
            ),
            ("accept".to_string(), "application/json".to_string()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: format!(
                "{}{action}?format={}",
                self.config.endpoint(),
                self.config.format()
            ),
            headers,
            body,
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// Sleep the configured delay, execute `request`, and interpret the reply.
    pub fn request(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let delay = self.config.delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.execute(&request)?;
        debug!("response status: {}", response.status);

        self.parse_response(&request.url, response)
    }

    /// Confirm the token/key pair is accepted by the provider.
    pub fn verify_credentials(&self) -> Result<ApiResponse, ApiError> {
        info!("verifying API endpoint, token and key...");
        self.request(self.build_verify_credentials())
    }

    /// Create a new A record `hostname.domain` pointing at `address`.
    pub fn create_record(&self, hostname: &str, address: Ipv4Addr) -> Result<ApiResponse, ApiError> {
        info!(
            "creating record {hostname}.{} pointing to {address}...",
            self.config.domain()
        );
        self.request(self.build_create_record(hostname, address)?)
    }

    /// Point the existing A record for `hostname` at `address`.
    ///
    /// Lists every record of the domain, picks the first whose host matches,
    /// then overwrites its rdata and ttl. The two calls are not atomic.
    pub fn update_record(&self, hostname: &str, address: Ipv4Addr) -> Result<ApiResponse, ApiError> {
        let domain = self.config.domain();
        info!("checking {hostname}.{domain} exists...");

        let listing = self.request(self.build_list_records())?;
        let lookup = listing.find_record(hostname)?;
        info!("... total hostnames searched: {}", lookup.searched);

        let record = lookup.record.ok_or_else(|| ApiError::NotFound {
            hostname: hostname.to_string(),
            domain: domain.to_string(),
            searched: lookup.searched,
        })?;

        info!(
            "hostname exists (zone ID: {}, ttl: {}, last modified: {}, address: {})",
            record.id,
            record.ttl.map_or_else(|| "unknown".to_string(), |ttl| ttl.to_string()),
            record.last_mod.as_deref().unwrap_or("unknown"),
            record.rdata
        );
        info!("updating record {hostname}.{domain} pointing to {address}...");

        self.request(self.build_update_record(&record.id, hostname, address)?)
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Pick the values reported for a successful call.
///
/// `msg` falls back to the reason phrase, `code` to `status` and then the
/// HTTP status, `rstatus` to `N/A`.
pub fn summarize(payload: &Value, response: &HttpResponse) -> CallSummary {
    let msg = truthy_field(payload, "msg")
        .map(display_value)
        .unwrap_or_else(|| response.reason().to_string());
    let code = truthy_field(payload, "code")
        .or_else(|| truthy_field(payload, "status"))
        .map(display_value)
        .unwrap_or_else(|| response.status.to_string());
    let rstatus = payload
        .get("rstatus")
        .map(display_value)
        .unwrap_or_else(|| RSTATUS_UNAVAILABLE.to_string());
    CallSummary { msg, code, rstatus }
}
