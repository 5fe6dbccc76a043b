use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A zone record as the provider stores and reports it. Numeric fields are
/// strings on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub domain: String,
    pub host: String,
    pub ttl: String,
    pub prio: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub rdata: String,
    pub last_mod: String,
}

#[derive(Deserialize)]
pub struct AddRecord {
    pub domain: String,
    pub host: String,
    pub ttl: u32,
    #[serde(default)]
    pub prio: u32,
    #[serde(rename = "type")]
    pub record_type: String,
    pub rdata: String,
}

#[derive(Deserialize)]
pub struct EditRecord {
    pub host: String,
    pub ttl: u32,
    #[serde(rename = "type")]
    pub record_type: String,
    pub rdata: String,
}

/// Method and path of one request that reached the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    pub path: String,
}

/// In-memory provider: one domain, one credential pair, its records, and a
/// log of every call received.
#[derive(Debug)]
pub struct Provider {
    domain: String,
    authorization: String,
    records: Vec<Record>,
    next_id: u64,
    calls: Vec<Call>,
}

impl Provider {
    pub fn new(domain: &str, token: &str, key: &str) -> Self {
        Self {
            domain: domain.to_string(),
            authorization: format!("Basic {}", STANDARD.encode(format!("{token}:{key}"))),
            records: Vec::new(),
            next_id: 1,
            calls: Vec::new(),
        }
    }

    /// Add an A record with a fixed id, bypassing the API.
    pub fn seed(&mut self, id: &str, host: &str, rdata: &str, ttl: u32) {
        self.records.push(Record {
            id: id.to_string(),
            domain: self.domain.clone(),
            host: host.to_string(),
            ttl: ttl.to_string(),
            prio: "0".to_string(),
            record_type: "A".to_string(),
            rdata: rdata.to_string(),
            last_mod: now(),
        });
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn shared(self) -> Db {
        Arc::new(RwLock::new(self))
    }

    fn allocate_id(&mut self) -> String {
        while self.records.iter().any(|r| r.id == self.next_id.to_string()) {
            self.next_id += 1;
        }
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}

pub type Db = Arc<RwLock<Provider>>;

pub const DEFAULT_DOMAIN: &str = "example.com";
pub const DEFAULT_TOKEN: &str = "token";
pub const DEFAULT_KEY: &str = "key";

pub fn app() -> Router {
    app_with(Provider::new(DEFAULT_DOMAIN, DEFAULT_TOKEN, DEFAULT_KEY).shared())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/domains/check/{domain}", get(check_domain))
        .route("/zones/records/add/{domain}/{record_type}", put(add_record))
        .route("/zones/records/all/{domain}", get(list_records))
        .route("/zones/records/{id}", post(edit_record))
        .layer(middleware::from_fn_with_state(db.clone(), guard))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

fn now() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default()
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({"error": {"code": status.as_u16(), "message": message}})),
    )
        .into_response()
}

fn ok(status: StatusCode, data: Value) -> Response {
    (
        status,
        Json(json!({"msg": "OK", "status": status.as_u16(), "data": data})),
    )
        .into_response()
}

/// Log the call, then reject bad credentials and non-JSON formats the way
/// the real API does: an error envelope for auth, plain text for format.
async fn guard(State(db): State<Db>, request: Request, next: Next) -> Response {
    let authorized = {
        let mut provider = db.write().await;
        provider.calls.push(Call {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
        });
        request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(provider.authorization.as_str())
    };
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "Invalid API token or key");
    }

    let json_format = request
        .uri()
        .query()
        .is_some_and(|q| q.split('&').any(|pair| pair == "format=json"));
    if !json_format {
        return (StatusCode::NOT_ACCEPTABLE, "unsupported format").into_response();
    }

    next.run(request).await
}

async fn check_domain(Path(domain): Path<String>) -> Response {
    ok(StatusCode::OK, json!({"domain": domain, "exists": "Y"}))
}

async fn add_record(
    State(db): State<Db>,
    Path((domain, record_type)): Path<(String, String)>,
    Json(input): Json<AddRecord>,
) -> Response {
    let mut provider = db.write().await;
    if domain != provider.domain || input.domain != provider.domain {
        return error(StatusCode::NOT_FOUND, "Domain not found");
    }
    if record_type != "A" || input.record_type != "A" {
        return error(StatusCode::BAD_REQUEST, "Unsupported record type");
    }

    let record = Record {
        id: provider.allocate_id(),
        domain,
        host: input.host,
        ttl: input.ttl.to_string(),
        prio: input.prio.to_string(),
        record_type,
        rdata: input.rdata,
        last_mod: now(),
    };
    provider.records.push(record.clone());
    ok(StatusCode::CREATED, json!(record))
}

async fn list_records(State(db): State<Db>, Path(domain): Path<String>) -> Response {
    let provider = db.read().await;
    if domain != provider.domain {
        return error(StatusCode::NOT_FOUND, "Domain not found");
    }
    ok(StatusCode::OK, json!(provider.records))
}

async fn edit_record(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<EditRecord>,
) -> Response {
    if input.record_type != "A" {
        return error(StatusCode::BAD_REQUEST, "Unsupported record type");
    }
    let mut provider = db.write().await;
    let Some(record) = provider.records.iter_mut().find(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Record not found");
    };
    record.host = input.host;
    record.ttl = input.ttl.to_string();
    record.rdata = input.rdata;
    record.last_mod = now();
    let record = record.clone();
    ok(StatusCode::OK, json!(record))
}
