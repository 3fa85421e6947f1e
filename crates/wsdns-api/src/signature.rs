//! Request signing for the Websupport REST API v2
//!
//! Every request carries HTTP Basic auth where the password is an
//! HMAC-SHA1 over `"<METHOD> <PATH> <TIMESTAMP>"`, plus a `Date` header
//! rendering the same timestamp. The provider checks both against one
//! time window, so they must always be built from a single value.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{ACCEPT, CONTENT_TYPE, DATE, HeaderMap, HeaderValue};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Signature for one outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature {
    pub method: String,
    pub path: String,
    pub timestamp: i64,
    pub digest: String,
}

impl RequestSignature {
    /// Sign `method path timestamp` with `secret`
    pub fn new(secret: &str, method: &str, path: &str, timestamp: i64) -> Self {
        let method = method.to_ascii_uppercase();
        let digest = sign(secret, &method, path, timestamp);
        Self {
            method,
            path: path.to_string(),
            timestamp,
            digest,
        }
    }

    /// Headers matching this signature's timestamp.
    pub fn headers(&self) -> HeaderMap {
        build_headers(self.timestamp)
    }
}

/// The string the provider expects us to sign. `path` excludes any query.
pub fn canonical_request(method: &str, path: &str, timestamp: i64) -> String {
    format!("{} {} {}", method.to_ascii_uppercase(), path, timestamp)
}

/// Lowercase hex HMAC-SHA1 of the canonical request, keyed by `secret`.
pub fn sign(secret: &str, method: &str, path: &str, timestamp: i64) -> String {
    hmac_sha1_hex(
        secret.as_bytes(),
        canonical_request(method, path, timestamp).as_bytes(),
    )
}

fn hmac_sha1_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// ISO-8601 UTC rendering used in the `Date` header, e.g.
/// `2023-11-14T22:13:20+00:00`.
pub fn format_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .to_rfc3339()
}

/// JSON content headers plus `Date` for `timestamp`
pub fn build_headers(timestamp: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Ok(date) = HeaderValue::from_str(&format_date(timestamp)) {
        headers.insert(DATE, date);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "s3cr3t";
    const PATH: &str = "/v2/service/123/dns/record";
    const TS: i64 = 1_700_000_000;

    #[test]
    fn test_hmac_sha1_known_vector() {
        assert_eq!(
            hmac_sha1_hex(b"key", b"The quick brown fox jumps over the lazy dog"),
            "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9"
        );
    }

    #[test]
    fn test_canonical_request() {
        assert_eq!(
            canonical_request("post", PATH, TS),
            "POST /v2/service/123/dns/record 1700000000"
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign(SECRET, "POST", PATH, TS);
        let b = sign(SECRET, "POST", PATH, TS);
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_changes_with_each_input() {
        let base = sign(SECRET, "POST", PATH, TS);
        assert_ne!(base, sign("other", "POST", PATH, TS));
        assert_ne!(base, sign(SECRET, "GET", PATH, TS));
        assert_ne!(base, sign(SECRET, "POST", "/v2/service/124/dns/record", TS));
        assert_ne!(base, sign(SECRET, "POST", PATH, TS + 1));
    }

    #[test]
    fn test_method_case_is_normalized() {
        assert_eq!(sign(SECRET, "delete", PATH, TS), sign(SECRET, "DELETE", PATH, TS));
    }

    #[test]
    fn test_build_headers() {
        let headers = build_headers(TS);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[DATE], "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_request_signature_shares_timestamp() {
        let sig = RequestSignature::new(SECRET, "get", PATH, TS);
        assert_eq!(sig.method, "GET");
        assert_eq!(sig.digest, sign(SECRET, "GET", PATH, TS));
        assert_eq!(sig.headers()[DATE], format_date(sig.timestamp));
    }
}
