//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected outcomes. Request bodies are compared as parsed JSON so key
//! order does not matter.

use std::net::Ipv4Addr;
use std::time::Duration;

use easydns_core::{summarize, ApiClient, ApiError, Config, HttpMethod, HttpResponse, ResponseFormat};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ApiClient<()> {
    let config = Config::new(
        "example.com",
        "tok",
        "sekret",
        BASE_URL,
        ResponseFormat::Json,
        Duration::ZERO,
        300,
    );
    ApiClient::new(config, ())
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(sim: &Value) -> HttpResponse {
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn input(case: &Value) -> (String, Ipv4Addr) {
    let hostname = case["input"]["hostname"].as_str().unwrap().to_string();
    let address = case["input"]["address"].as_str().unwrap().parse().unwrap();
    (hostname, address)
}

/// Check `result` against either `expected_error` or `expected_summary`.
fn check_outcome(name: &str, case: &Value, result: Result<easydns_core::ApiResponse, ApiError>) {
    if let Some(expected) = case.get("expected_error") {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), expected["kind"].as_str().unwrap(), "{name}: kind");
        match err {
            ApiError::Api { message, code, .. } => {
                assert_eq!(message, expected["message"].as_str().unwrap(), "{name}: message");
                assert_eq!(code, expected["code"].as_str().unwrap(), "{name}: code");
            }
            ApiError::Decode { status, body, .. } => {
                assert_eq!(u64::from(status), expected["status"].as_u64().unwrap(), "{name}: status");
                assert_eq!(body, expected["body"].as_str().unwrap(), "{name}: body");
            }
            other => panic!("{name}: unexpected error {other:?}"),
        }
    } else {
        let expected = &case["expected_summary"];
        let parsed = result.unwrap();
        let response = HttpResponse {
            status: parsed.status,
            headers: Vec::new(),
            body: String::new(),
        };
        let summary = summarize(&parsed.payload, &response);
        assert_eq!(summary.msg, expected["msg"].as_str().unwrap(), "{name}: msg");
        assert_eq!(summary.code, expected["code"].as_str().unwrap(), "{name}: code");
        assert_eq!(summary.rstatus, expected["rstatus"].as_str().unwrap(), "{name}: rstatus");
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (hostname, address) = input(case);
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_create_record(&hostname, address).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let result = c.parse_response(&req.url, simulated(&case["simulated_response"]));
        check_outcome(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (hostname, address) = input(case);

        // Verify lookup
        let list_req = c.build_list_records();
        assert_eq!(list_req.method, HttpMethod::Get, "{name}: list method");
        assert_eq!(
            list_req.url,
            format!("{BASE_URL}/zones/records/all/example.com?format=json"),
            "{name}: list url"
        );
        let listing = c.parse_response(&list_req.url, simulated(&case["listing"])).unwrap();
        let lookup = listing.find_record(&hostname).unwrap();
        let expected_lookup = &case["expected_lookup"];
        assert_eq!(
            lookup.searched as u64,
            expected_lookup["searched"].as_u64().unwrap(),
            "{name}: searched"
        );

        let Some(expected_id) = expected_lookup["id"].as_str() else {
            assert!(lookup.record.is_none(), "{name}: expected no match");
            continue;
        };
        let record = lookup.record.unwrap();
        assert_eq!(record.id, expected_id, "{name}: id");

        // Verify build
        let expected_req = &case["expected_request"];
        let req = c.build_update_record(&record.id, &hostname, address).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    let url = c.build_verify_credentials().url;
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = c.parse_response(&url, simulated(&case["response"]));
        check_outcome(name, case, result);
    }
}
