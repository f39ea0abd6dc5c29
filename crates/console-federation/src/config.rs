//! Federation endpoint configuration.
//!
//! [`FederationConfig`] holds the endpoint, issuer and destination used by
//! both exchange steps.  [`Default`] gives the public AWS values; tests and
//! local setups point `federation_url` at a mock endpoint instead.

use std::time::Duration;

use reqwest::Url;

use crate::error::FederationError;

/// Federation endpoint of the public AWS partition.
pub const DEFAULT_FEDERATION_URL: &str = "https://signin.aws.amazon.com/federation";

/// Console page the login redirects to.
pub const DEFAULT_DESTINATION_URL: &str = "https://console.aws.amazon.com/";

/// Issuer label recorded by AWS for audit.
pub const DEFAULT_ISSUER: &str = "IssuedGoAWSConsole";

/// Visiting this first drops any console session already open in the browser.
pub const DEFAULT_LOGOUT_URL: &str = "https://signin.aws.amazon.com/oauth?Action=logout";

/// Lifetime requested for every signin token, in seconds.
pub const SESSION_DURATION_SECS: u32 = 1800;

/// Endpoint and login parameters for the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederationConfig {
    /// Base URL for both `getSigninToken` and `login` actions.
    pub federation_url: Url,
    /// `Destination` of the login URL.
    pub destination: Url,
    /// `Issuer` of the login URL.
    pub issuer: String,
    /// Logout page opened before the login URL, when requested.
    pub logout_url: Url,
    /// Overall timeout of the token request. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for FederationConfig {
    fn default() -> Self {
        Self {
            federation_url: Url::parse(DEFAULT_FEDERATION_URL).expect("valid default federation URL"),
            destination: Url::parse(DEFAULT_DESTINATION_URL).expect("valid default destination URL"),
            issuer: DEFAULT_ISSUER.to_string(),
            logout_url: Url::parse(DEFAULT_LOGOUT_URL).expect("valid default logout URL"),
            request_timeout: None,
        }
    }
}

impl FederationConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                    | Default                                             |
    /// |-----------------------------|-----------------------------------------------------|
    /// | `CONSOLE_FEDERATION_URL`    | `https://signin.aws.amazon.com/federation`          |
    /// | `CONSOLE_DESTINATION_URL`   | `https://console.aws.amazon.com/`                   |
    /// | `CONSOLE_ISSUER`            | `IssuedGoAWSConsole`                                |
    /// | `CONSOLE_LOGOUT_URL`        | `https://signin.aws.amazon.com/oauth?Action=logout` |
    /// | `CONSOLE_HTTP_TIMEOUT_SECS` | unset (no timeout)                                  |
    ///
    /// # Errors
    ///
    /// Returns [`FederationError::Config`] if a URL or the timeout does not
    /// parse.
    pub fn from_env() -> Result<Self, FederationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`FederationError::Config`] if a URL or the timeout does not
    /// parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FederationError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("CONSOLE_FEDERATION_URL") {
            config.federation_url = parse_url("CONSOLE_FEDERATION_URL", &raw)?;
        }
        if let Some(raw) = lookup("CONSOLE_DESTINATION_URL") {
            config.destination = parse_url("CONSOLE_DESTINATION_URL", &raw)?;
        }
        if let Some(issuer) = lookup("CONSOLE_ISSUER") {
            config.issuer = issuer;
        }
        if let Some(raw) = lookup("CONSOLE_LOGOUT_URL") {
            config.logout_url = parse_url("CONSOLE_LOGOUT_URL", &raw)?;
        }
        if let Some(raw) = lookup("CONSOLE_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                FederationError::Config(format!("CONSOLE_HTTP_TIMEOUT_SECS={raw:?}: {e}"))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, FederationError> {
    let url = Url::parse(raw).map_err(|e| FederationError::Config(format!("{key}={raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(FederationError::Config(format!(
            "{key}={raw:?}: not an absolute http(s) URL"
        )));
    }
    Ok(url)
}
