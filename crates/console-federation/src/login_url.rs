//! `Action=login`: the final console sign-in URL.

use std::fmt;

use reqwest::Url;

use crate::config::FederationConfig;
use crate::exchange::{set_query_pairs, SigninToken};

/// Absolute URL that signs the browser into the console.
///
/// Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUrl(Url);

impl LoginUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for LoginUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for LoginUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Build the console login URL for `token`.
///
/// Sets `Action=login`, `Issuer`, `Destination` and `SigninToken` on the
/// federation base URL, form-encoding every value.  Pure: the same inputs
/// always give the same URL.
pub fn build_login_url(config: &FederationConfig, token: SigninToken) -> LoginUrl {
    LoginUrl(set_query_pairs(
        &config.federation_url,
        &[
            ("Action", "login"),
            ("Issuer", &config.issuer),
            ("Destination", config.destination.as_str()),
            ("SigninToken", token.as_str()),
        ],
    ))
}
