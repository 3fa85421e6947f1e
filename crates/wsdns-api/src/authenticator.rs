//! Hook points for an ACME client
//!
//! The certificate manager calls [`Authenticator::perform`] when a DNS-01
//! challenge starts and [`Authenticator::cleanup`] when it is done. A fresh
//! [`WebsupportDns`] is built for each call.

use crate::client::{ClientOptions, Credentials, WebsupportDns};
use crate::error::{ApiError, Result};
use crate::record::DeleteOutcome;

/// What to do when the provider rejects or cannot be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and report success to the caller. Issuance then
    /// fails later at ACME validation.
    #[default]
    LogAndContinue,
    /// Return the error to the caller.
    Strict,
}

#[derive(Debug, Default)]
pub struct Authenticator {
    credentials: Option<Credentials>,
    options: ClientOptions,
    policy: FailurePolicy,
}

impl Authenticator {
    /// Create an authenticator that still needs `prepare`
    pub fn new(options: ClientOptions, policy: FailurePolicy) -> Self {
        Self {
            credentials: None,
            options,
            policy,
        }
    }

    /// Policy applied to provider failures
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Supply credentials; must happen before `perform` or `cleanup`.
    pub fn prepare(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Credentials are checked outside the policy: a missing `prepare` is
    /// a caller bug and always propagates. Client construction failures go
    /// through the policy like any other provider error.
    fn credentials(&self) -> Result<Credentials> {
        self.credentials.clone().ok_or(ApiError::NotPrepared)
    }

    fn client(&self, credentials: Credentials) -> Result<WebsupportDns> {
        WebsupportDns::with_options(credentials, self.options.clone())
    }

    /// Provision the TXT record for a challenge.
    ///
    /// `Ok(false)` means the failure was logged and swallowed.
    pub async fn perform(&self, domain: &str, fqdn: &str, validation: &str) -> Result<bool> {
        tracing::debug!("Performing dns-01 challenge for {}", domain);
        let credentials = self.credentials()?;
        let result = match self.client(credentials) {
            Ok(client) => client
                .create_txt_record(fqdn, validation)
                .await
                .map(|()| true),
            Err(e) => Err(e),
        };
        self.apply_policy(result, "creating", fqdn)
    }

    /// Remove the TXT record for a challenge. `validation` is not needed:
    /// the record is found by name.
    ///
    /// `Ok(None)` means the failure was logged and swallowed.
    pub async fn cleanup(
        &self,
        domain: &str,
        fqdn: &str,
        _validation: &str,
    ) -> Result<Option<DeleteOutcome>> {
        tracing::debug!("Cleaning up dns-01 challenge for {}", domain);
        let credentials = self.credentials()?;
        let result = match self.client(credentials) {
            Ok(client) => client.delete_txt_record(fqdn).await.map(Some),
            Err(e) => Err(e),
        };
        self.apply_policy(result, "removing", fqdn)
    }

    fn apply_policy<T: Default>(&self, result: Result<T>, action: &str, fqdn: &str) -> Result<T> {
        match (result, self.policy) {
            (Ok(value), _) => Ok(value),
            (Err(e), FailurePolicy::LogAndContinue) => {
                tracing::error!("An error occurred while {} record for {}: {}", action, fqdn, e);
                Ok(T::default())
            }
            (Err(e), FailurePolicy::Strict) => Err(e),
        }
    }
}
