use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use wsdns_api::{Authenticator, ClientOptions, FailurePolicy, WEBSUPPORT_API_BASE};

/// Arguments shared by both hooks; certbot passes them through the environment.
#[derive(Args, Debug)]
pub struct HookArgs {
    /// Domain being validated
    #[arg(long, env = "CERTBOT_DOMAIN")]
    pub domain: String,
    /// Validation token to publish
    #[arg(long, env = "CERTBOT_VALIDATION", default_value = "")]
    pub validation: String,
    /// Record name to use instead of _acme-challenge.<domain>
    #[arg(long)]
    pub validation_name: Option<String>,
    /// Credentials INI file (api_key, secret, service)
    #[arg(short, long)]
    pub credentials: Option<PathBuf>,
    /// Websupport API base URL
    #[arg(long, env = "WEBSUPPORT_API_URL", default_value = WEBSUPPORT_API_BASE)]
    pub api_url: String,
    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
    /// Exit with an error when the API call fails instead of only logging it
    #[arg(long)]
    pub strict: bool,
}

impl HookArgs {
    /// FQDN of the challenge record
    pub fn fqdn(&self) -> String {
        self.validation_name
            .clone()
            .unwrap_or_else(|| wsdns_api::challenge_name(&self.domain))
    }

    pub fn policy(&self) -> FailurePolicy {
        if self.strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::LogAndContinue
        }
    }

    /// Load credentials and build a prepared authenticator.
    pub fn authenticator(&self) -> anyhow::Result<Authenticator> {
        let credentials = wsdns_config::load_credentials(self.credentials.as_deref())
            .context("Failed to load Websupport credentials")?;

        let options = ClientOptions {
            base_url: self.api_url.clone(),
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
        };

        let mut authenticator = Authenticator::new(options, self.policy());
        authenticator.prepare(credentials);
        Ok(authenticator)
    }
}
