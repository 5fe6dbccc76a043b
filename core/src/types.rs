//! Wire types for the easyDNS API.
//!
//! # Design
//! Request payloads are typed so their JSON shape is fixed at compile time.
//! Responses stay as `serde_json::Value` until a specific field is needed:
//! the success envelope varies between endpoints and only `data` entries of
//! the list call are ever decoded into `DnsRecord`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Body of `PUT /zones/records/add/{domain}/A`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateRecord {
    pub domain: String,
    pub host: String,
    pub ttl: u32,
    pub prio: u32,
    #[serde(rename = "type")]
    pub record_type: String,
    pub rdata: String,
}

/// Body of `POST /zones/records/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRecord {
    pub host: String,
    pub ttl: u32,
    #[serde(rename = "type")]
    pub record_type: String,
    pub rdata: String,
}

/// One entry of the `data` array returned by `GET /zones/records/all/{domain}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub host: String,
    #[serde(default)]
    pub rdata: String,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub last_mod: Option<String>,
}

/// A decoded success payload together with where it came from.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: u16,
    pub payload: Value,
}

/// Outcome of scanning a record listing for one hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLookup {
    /// First record whose `host` matched, if any.
    pub record: Option<DnsRecord>,
    /// Entries inspected, including the match.
    pub searched: usize,
}

impl ApiResponse {
    /// Scan `data` for the first entry whose `host` equals `hostname`.
    ///
    /// Matching is exact and case-sensitive; the scan stops at the first
    /// hit. A missing or non-array `data` member is an empty listing.
    pub fn find_record(&self, hostname: &str) -> Result<RecordLookup, ApiError> {
        let entries: &[Value] = match self.payload.get("data") {
            Some(Value::Array(entries)) => entries.as_slice(),
            _ => &[],
        };

        let mut searched = 0;
        for entry in entries {
            searched += 1;
            if entry.get("host").and_then(Value::as_str) != Some(hostname) {
                continue;
            }
            let record = serde_json::from_value(entry.clone()).map_err(|e| ApiError::Decode {
                url: self.url.clone(),
                status: self.status,
                body: format!("{entry} ({e})"),
            })?;
            return Ok(RecordLookup {
                record: Some(record),
                searched,
            });
        }

        Ok(RecordLookup {
            record: None,
            searched,
        })
    }
}

/// Values summarized in the success log line of every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSummary {
    pub msg: String,
    pub code: String,
    pub rstatus: String,
}

/// Placeholder for a success envelope without `rstatus`.
pub const RSTATUS_UNAVAILABLE: &str = "N/A";

/// Truthiness of a JSON value: `null`, `false`, `0`, `""`, `[]` and `{}`
/// are false, everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// `payload[key]` when present and truthy.
pub fn truthy_field<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|v| is_truthy(v))
}

/// Render a scalar for log output without JSON quoting.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn opt_u32_lenient<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_record_serializes_type_key() {
        let body = CreateRecord {
            domain: "example.com".to_string(),
            host: "www".to_string(),
            ttl: 300,
            prio: 0,
            record_type: "A".to_string(),
            rdata: "1.2.3.4".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({"domain":"example.com","host":"www","ttl":300,"prio":0,"type":"A","rdata":"1.2.3.4"})
        );
    }

    #[test]
    fn dns_record_accepts_string_ids_and_ttls() {
        let record: DnsRecord = serde_json::from_value(json!({
            "id": "42", "host": "api", "rdata": "10.0.0.1", "ttl": "300",
            "last_mod": "2020-01-01 00:00:00"
        }))
        .unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.ttl, Some(300));
        assert_eq!(record.last_mod.as_deref(), Some("2020-01-01 00:00:00"));
    }

    #[test]
    fn dns_record_accepts_numeric_ids() {
        let record: DnsRecord =
            serde_json::from_value(json!({"id": 7, "host": "www", "ttl": 60})).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.ttl, Some(60));
        assert_eq!(record.rdata, "");
        assert!(record.last_mod.is_none());
    }

    #[test]
    fn dns_record_requires_id() {
        let result = serde_json::from_value::<DnsRecord>(json!({"host": "www"}));
        assert!(result.is_err());
    }

    fn listing(payload: Value) -> ApiResponse {
        ApiResponse {
            url: "http://localhost/zones/records/all/example.com?format=json".to_string(),
            status: 200,
            payload,
        }
    }

    #[test]
    fn find_record_returns_first_match_and_count() {
        let response = listing(json!({"data": [
            {"id": "1", "host": "www", "rdata": "1.1.1.1", "ttl": "300"},
            {"id": "2", "host": "api", "rdata": "2.2.2.2", "ttl": "300"},
            {"id": "3", "host": "api", "rdata": "3.3.3.3", "ttl": "300"},
            {"id": "4", "host": "mail", "rdata": "4.4.4.4", "ttl": "300"}
        ]}));
        let lookup = response.find_record("api").unwrap();
        assert_eq!(lookup.record.unwrap().id, "2");
        assert_eq!(lookup.searched, 2);
    }

    #[test]
    fn find_record_is_case_sensitive() {
        let response = listing(json!({"data": [{"id": "1", "host": "WWW"}]}));
        let lookup = response.find_record("www").unwrap();
        assert!(lookup.record.is_none());
        assert_eq!(lookup.searched, 1);
    }

    #[test]
    fn find_record_treats_missing_data_as_empty() {
        let lookup = listing(json!({"msg": "OK"})).find_record("www").unwrap();
        assert!(lookup.record.is_none());
        assert_eq!(lookup.searched, 0);

        let lookup = listing(json!({"data": {"id": "1"}})).find_record("www").unwrap();
        assert!(lookup.record.is_none());
    }

    #[test]
    fn find_record_skips_entries_without_string_host() {
        let response = listing(json!({"data": [{"id": "1", "host": null}, {"id": "2", "host": "www"}]}));
        let lookup = response.find_record("www").unwrap();
        assert_eq!(lookup.record.unwrap().id, "2");
        assert_eq!(lookup.searched, 2);
    }

    #[test]
    fn find_record_rejects_match_without_id() {
        let response = listing(json!({"data": [{"host": "www"}]}));
        let err = response.find_record("www").unwrap_err();
        assert!(matches!(err, ApiError::Decode { status: 200, .. }));
    }

    #[test]
    fn truthiness_matches_loose_json_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!({"code": 1})));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(0.5)));
    }

    #[test]
    fn display_value_unquotes_strings() {
        assert_eq!(display_value(&json!("OK")), "OK");
        assert_eq!(display_value(&json!(200)), "200");
    }
}
