//! Websupport DNS API client
//!
//! Direct REST API v2 implementation for DNS-01 challenge records.
//! Each request is signed with HMAC-SHA1 (see [`crate::signature`]).
//!
//! The client holds only immutable credentials and caches nothing, so a
//! record created by one instance can be found and removed by another.

use crate::error::{ApiError, Result};
use crate::record::{CreateTxtRecordRequest, DeleteOutcome, ListResponse, RecordId, RecordLookup};
use crate::signature::RequestSignature;
use crate::subdomain::derive_subdomain;
use reqwest::{Method, RequestBuilder};
use std::fmt;
use std::time::Duration;

pub const WEBSUPPORT_API_BASE: &str = "https://rest.websupport.sk";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API credentials for one Websupport service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub secret: String,
    pub service_id: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        secret: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
            service_id: service_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .field("service_id", &self.service_id)
            .finish()
    }
}

/// Transport settings
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: WEBSUPPORT_API_BASE.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// Websupport DNS record manager
pub struct WebsupportDns {
    client: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl WebsupportDns {
    /// Create a client against the production API
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_options(credentials, ClientOptions::default())
    }

    /// Create a client with a custom base URL or timeout
    pub fn with_options(credentials: Credentials, options: ClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            credentials,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn records_path(&self) -> String {
        format!("/v2/service/{}/dns/record", self.credentials.service_id)
    }

    fn record_path(&self, record_id: &RecordId) -> String {
        format!("{}/{}", self.records_path(), record_id)
    }

    /// Build a request signed for `path` at the current second.
    fn signed(&self, method: Method, path: &str) -> RequestBuilder {
        let timestamp = chrono::Utc::now().timestamp();
        let signature =
            RequestSignature::new(&self.credentials.secret, method.as_str(), path, timestamp);

        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .headers(signature.headers())
            .basic_auth(&self.credentials.api_key, Some(signature.digest))
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Http { status, body });
        }
        Ok(body)
    }

    fn subdomain_for(fqdn: &str) -> Result<String> {
        if fqdn.trim().is_empty() {
            return Err(ApiError::InvalidName(fqdn.to_string()));
        }
        Ok(derive_subdomain(fqdn))
    }

    /// Create a TXT record holding `content` for `fqdn`.
    ///
    /// Existing records with the same name are left alone, so repeated
    /// calls create duplicates.
    pub async fn create_txt_record(&self, fqdn: &str, content: &str) -> Result<()> {
        let name = Self::subdomain_for(fqdn)?;
        let path = self.records_path();
        let request_body = CreateTxtRecordRequest::new(name.as_str(), content);

        self.send(self.signed(Method::POST, &path).json(&request_body))
            .await?;

        tracing::info!(
            "Record with name \"{}\" created in service {}",
            name,
            self.credentials.service_id
        );
        Ok(())
    }

    /// Search for the TXT record belonging to `fqdn`.
    pub async fn lookup_txt_record(&self, fqdn: &str) -> Result<RecordLookup> {
        let name = Self::subdomain_for(fqdn)?;
        let path = self.records_path();

        let body = self
            .send(
                self.signed(Method::GET, &path)
                    .query(&[("filters[name]", name.as_str()), ("filters[type][0]", "TXT")]),
            )
            .await?;

        let response: ListResponse = serde_json::from_str(&body)?;
        let records = response.data.unwrap_or_default();
        tracing::debug!("Search for \"{}\" returned {} record(s)", name, records.len());

        let lookup = RecordLookup::from_records(&records);
        match &lookup {
            RecordLookup::Found(id) => tracing::info!("Record with id {} found", id),
            RecordLookup::Ambiguous(n) => tracing::warn!(
                "{} records named \"{}\" found, refusing to pick one",
                n,
                name
            ),
            RecordLookup::NotFound => {}
        }
        Ok(lookup)
    }

    /// Delete a record by id
    pub async fn delete_record_by_id(&self, record_id: &RecordId) -> Result<()> {
        let path = self.record_path(record_id);
        self.send(self.signed(Method::DELETE, &path)).await?;

        tracing::info!("Record with id {} deleted", record_id);
        Ok(())
    }

    /// Remove the challenge record for `fqdn` if exactly one exists.
    pub async fn delete_txt_record(&self, fqdn: &str) -> Result<DeleteOutcome> {
        match self.lookup_txt_record(fqdn).await? {
            RecordLookup::Found(id) => {
                self.delete_record_by_id(&id).await?;
                Ok(DeleteOutcome::Deleted(id))
            }
            RecordLookup::NotFound => {
                tracing::info!("No record found for {}", fqdn);
                Ok(DeleteOutcome::NotFound)
            }
            RecordLookup::Ambiguous(n) => Ok(DeleteOutcome::Ambiguous(n)),
        }
    }

    // ============ Best-effort forms ============
    //
    // These never fail: errors are logged and turned into a negative result.

    /// Returns `true` when the provider accepted the record.
    pub async fn add_record(&self, fqdn: &str, content: &str) -> bool {
        match self.create_txt_record(fqdn, content).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("An error occurred while creating record for {}: {}", fqdn, e);
                false
            }
        }
    }

    /// The id of the single matching record, or `None` when there are zero,
    /// several, or the search failed.
    pub async fn find_record_id(&self, fqdn: &str) -> Option<RecordId> {
        match self.lookup_txt_record(fqdn).await {
            Ok(lookup) => lookup.id().cloned(),
            Err(e) => {
                tracing::warn!("An error occurred while searching for record id: {}", e);
                None
            }
        }
    }

    /// Returns `true` only when a record was actually deleted.
    pub async fn delete_record(&self, fqdn: &str) -> bool {
        let Some(id) = self.find_record_id(fqdn).await else {
            tracing::info!("No record found for {}", fqdn);
            return false;
        };

        match self.delete_record_by_id(&id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("An error occurred while removing record {}: {}", id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("key", "secret", "123")
    }

    #[test]
    fn test_paths() {
        let dns = WebsupportDns::new(credentials()).unwrap();
        assert_eq!(dns.records_path(), "/v2/service/123/dns/record");
        assert_eq!(
            dns.record_path(&RecordId::from(99u64)),
            "/v2/service/123/dns/record/99"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let options = ClientOptions {
            base_url: "http://localhost:8080/".to_string(),
            timeout: None,
        };
        let dns = WebsupportDns::with_options(credentials(), options).unwrap();
        assert_eq!(dns.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", credentials());
        assert!(debug.contains("key"));
        assert!(!debug.contains("\"secret\""));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(
            WebsupportDns::subdomain_for("  "),
            Err(ApiError::InvalidName(_))
        ));
    }
}
