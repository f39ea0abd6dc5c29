//! # Console Federation
//!
//! Turns a set of temporary AWS credentials into a federated sign-in URL
//! for the AWS web console.
//!
//! The exchange happens in two steps:
//!
//! 1. [`FederationClient::get_signin_token`] sends the credentials to the
//!    federation endpoint (`Action=getSigninToken`) and receives a
//!    short-lived [`SigninToken`].
//! 2. [`build_login_url`] combines that token with the configured issuer
//!    and destination into a [`LoginUrl`] (`Action=login`).
//!
//! [`FederationClient::create_login_url`] runs both steps and stops at the
//! first failure.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use console_federation::{Credentials, FederationClient, FederationConfig};
//!
//! # async fn run() -> Result<(), console_federation::FederationError> {
//! let client = FederationClient::new(FederationConfig::default())?;
//! let credentials = Credentials::new("ASIA...", "secret", "session-token");
//!
//! let url = client.create_login_url(&credentials).await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod exchange;
pub mod login_url;

#[cfg(test)]
mod testutil;

pub use client::FederationClient;
pub use config::FederationConfig;
pub use credentials::Credentials;
pub use error::FederationError;
pub use exchange::SigninToken;
pub use login_url::{build_login_url, LoginUrl};
