//! Websupport DNS record wire types

use serde::{Deserialize, Serialize};
use std::fmt;

/// TTL for challenge records; short so stale tokens disappear quickly.
pub const CHALLENGE_TTL: u32 = 30;

/// Record id as returned by the listing API.
///
/// The API sends integers, but strings are accepted too so an id can be
/// passed through to the delete path untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Str(s) => Self(s),
        })
    }
}

/// Body of the create request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateTxtRecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub priority: u32,
    pub port: u32,
    pub weight: u32,
}

impl CreateTxtRecordRequest {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            record_type: "TXT".to_string(),
            name: name.into(),
            content: content.into(),
            ttl: CHALLENGE_TTL,
            priority: 0,
            port: 0,
            weight: 0,
        }
    }
}

/// A record as seen in search results.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub data: Option<Vec<RemoteRecord>>,
}

/// Result of searching for a challenge record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLookup {
    NotFound,
    Found(RecordId),
    /// More than one record matched; none of them is safe to act on.
    Ambiguous(usize),
}

impl RecordLookup {
    /// Classify search results; only a single match with an id is usable
    pub fn from_records(records: &[RemoteRecord]) -> Self {
        match records {
            [] => Self::NotFound,
            [only] => match &only.id {
                Some(id) => Self::Found(id.clone()),
                None => Self::NotFound,
            },
            many => Self::Ambiguous(many.len()),
        }
    }

    /// The id when exactly one record matched
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Found(id) => Some(id),
            _ => None,
        }
    }
}

/// What cleanup did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(RecordId),
    NotFound,
    Ambiguous(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<RemoteRecord> {
        serde_json::from_str::<ListResponse>(body)
            .unwrap()
            .data
            .unwrap_or_default()
    }

    #[test]
    fn test_create_request_body() {
        let body = serde_json::to_value(CreateTxtRecordRequest::new("_acme-challenge.sub", "tok"))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "TXT",
                "name": "_acme-challenge.sub",
                "content": "tok",
                "ttl": 30,
                "priority": 0,
                "port": 0,
                "weight": 0,
            })
        );
    }

    #[test]
    fn test_record_id_accepts_number_and_string() {
        let records = parse(r#"{"data":[{"id":42,"name":"a","type":"TXT"}]}"#);
        assert_eq!(records[0].id, Some(RecordId::from(42u64)));

        let records = parse(r#"{"data":[{"id":"abc","name":"a","type":"TXT"}]}"#);
        assert_eq!(records[0].id, Some(RecordId::from("abc")));
    }

    #[test]
    fn test_lookup_requires_exactly_one_match() {
        assert_eq!(RecordLookup::from_records(&parse(r#"{"data":[]}"#)), RecordLookup::NotFound);
        assert_eq!(
            RecordLookup::from_records(&parse(r#"{"data":[{"id":7}]}"#)),
            RecordLookup::Found(RecordId::from(7u64))
        );
        assert_eq!(
            RecordLookup::from_records(&parse(r#"{"data":[{"id":7},{"id":8}]}"#)),
            RecordLookup::Ambiguous(2)
        );
    }

    #[test]
    fn test_lookup_single_match_without_id() {
        let records = parse(r#"{"data":[{"name":"_acme-challenge"}]}"#);
        assert_eq!(RecordLookup::from_records(&records), RecordLookup::NotFound);
    }

    #[test]
    fn test_missing_data_field() {
        let records = parse(r#"{"items":[]}"#);
        assert!(records.is_empty());
    }
}
