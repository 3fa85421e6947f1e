//! Websupport REST API v2 client for DNS-01 challenges
//!
//! This crate creates and removes the `_acme-challenge` TXT records an ACME
//! client needs, authenticating each request with an HMAC-SHA1 signature.
//!
//! # Features
//!
//! - Request signing (`signature`)
//! - Challenge record create / search / delete (`client`)
//! - Hook points for a certificate manager (`authenticator`)
//!
//! # Example
//!
//! ```ignore
//! use wsdns_api::{Authenticator, ClientOptions, Credentials, FailurePolicy};
//!
//! let mut auth = Authenticator::new(ClientOptions::default(), FailurePolicy::Strict);
//! auth.prepare(Credentials::new("api-key", "secret", "123456"));
//!
//! auth.perform("example.com", "_acme-challenge.example.com", "token").await?;
//! // ... ACME validation ...
//! auth.cleanup("example.com", "_acme-challenge.example.com", "token").await?;
//! ```

pub mod authenticator;
pub mod client;
pub mod error;
pub mod record;
pub mod signature;
pub mod subdomain;

pub use authenticator::{Authenticator, FailurePolicy};
pub use client::{ClientOptions, Credentials, WEBSUPPORT_API_BASE, WebsupportDns};
pub use error::{ApiError, Result};
pub use record::{DeleteOutcome, RecordId, RecordLookup, RemoteRecord};
pub use subdomain::{challenge_name, derive_subdomain};
