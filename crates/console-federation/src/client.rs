//! HTTP client for the federation endpoint.
//!
//! [`FederationClient`] performs the one network call of the exchange and
//! chains it with the login-URL builder.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use console_federation::{Credentials, FederationClient, FederationConfig};
//!
//! # async fn run() -> Result<(), console_federation::FederationError> {
//! let client = FederationClient::new(FederationConfig::from_env()?)?;
//! let credentials = Credentials::new("ASIA...", "secret", "session-token");
//!
//! let token = client.get_signin_token(&credentials).await?;
//! let url = client.login_url(token);
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

use crate::config::FederationConfig;
use crate::credentials::Credentials;
use crate::error::FederationError;
use crate::exchange::{self, SigninToken};
use crate::login_url::{build_login_url, LoginUrl};

/// Exchanges credentials for console login URLs.
///
/// Holds no state between calls: every call to
/// [`create_login_url`](Self::create_login_url) fetches a fresh token and
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct FederationClient {
    http: reqwest::Client,
    config: FederationConfig,
}

impl FederationClient {
    /// Create a client, applying `config.request_timeout` to the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FederationError::Config`] if the HTTP client cannot be built
    /// (e.g. no TLS backend available).
    pub fn new(config: FederationConfig) -> Result<Self, FederationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FederationError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Create a client around an existing [`reqwest::Client`].
    pub fn with_http_client(http: reqwest::Client, config: FederationConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &FederationConfig {
        &self.config
    }

    /// Exchange `credentials` for a signin token (`Action=getSigninToken`).
    ///
    /// Sends exactly one GET request.  The response body is read to the end
    /// before it is interpreted, whatever the status.
    ///
    /// # Errors
    ///
    /// * [`FederationError::Serialization`] if the session payload cannot be encoded.
    /// * [`FederationError::Transport`] if the endpoint cannot be reached.
    /// * [`FederationError::RemoteRejection`] on any status other than 200.
    /// * [`FederationError::MalformedResponse`] if a 200 body has no token.
    pub async fn get_signin_token(
        &self,
        credentials: &Credentials,
    ) -> Result<SigninToken, FederationError> {
        let url = exchange::signin_token_url(&self.config.federation_url, credentials)?;

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        exchange::parse_signin_response(status, &body)
    }

    /// Build the console login URL for `token` (`Action=login`).
    pub fn login_url(&self, token: SigninToken) -> LoginUrl {
        build_login_url(&self.config, token)
    }

    /// Run the whole exchange: fetch a token, then build the login URL.
    ///
    /// Stops at the first failure and returns it unchanged.
    ///
    /// # Errors
    ///
    /// Any error of [`get_signin_token`](Self::get_signin_token).
    pub async fn create_login_url(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginUrl, FederationError> {
        let token = self.get_signin_token(credentials).await?;
        Ok(self.login_url(token))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::testutil::{closed_endpoint, MockFederation};

    fn creds() -> Credentials {
        Credentials::new("AKID1", "SECRET1", "TOK1")
    }

    #[tokio::test]
    async fn happy_path_builds_login_url() {
        let mock = MockFederation::start(&[(StatusCode::OK, r#"{"SigninToken":"STKN123"}"#)]).await;
        let client = FederationClient::new(mock.config()).unwrap();

        let url = client.create_login_url(&creds()).await.unwrap();

        let expected = format!(
            "{}?Action=login&Issuer=IssuedGoAWSConsole\
             &Destination=https%3A%2F%2Fconsole.aws.amazon.com%2F&SigninToken=STKN123",
            mock.config().federation_url
        );
        assert_eq!(url.as_str(), expected);
    }

    #[tokio::test]
    async fn exchange_request_carries_session_payload() {
        let mock = MockFederation::start(&[(StatusCode::OK, r#"{"SigninToken":"STKN123"}"#)]).await;
        let client = FederationClient::new(mock.config()).unwrap();

        client.get_signin_token(&creds()).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let query = &requests[0];
        assert_eq!(query["Action"], "getSigninToken");
        assert_eq!(query["SessionDuration"], "1800");
        let session: serde_json::Value = serde_json::from_str(&query["Session"]).unwrap();
        assert_eq!(session["sessionId"], "AKID1");
        assert_eq!(session["sessionKey"], "SECRET1");
        assert_eq!(session["sessionToken"], "TOK1");
    }

    #[tokio::test]
    async fn rejection_carries_body_and_skips_login() {
        let mock = MockFederation::start(&[(StatusCode::FORBIDDEN, "access denied")]).await;
        let client = FederationClient::new(mock.config()).unwrap();

        let err = client.create_login_url(&creds()).await.unwrap_err();

        match err {
            FederationError::RemoteRejection { status, message } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(message, "access denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn malformed_success_body() {
        let mock = MockFederation::start(&[(StatusCode::OK, "{not json")]).await;
        let client = FederationClient::new(mock.config()).unwrap();

        let err = client.get_signin_token(&creds()).await.unwrap_err();
        assert!(matches!(err, FederationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn first_failure_is_not_retried() {
        let mock = MockFederation::start(&[
            (StatusCode::SERVICE_UNAVAILABLE, "try again"),
            (StatusCode::OK, r#"{"SigninToken":"STKN123"}"#),
        ])
        .await;
        let client = FederationClient::new(mock.config()).unwrap();

        let err = client.create_login_url(&creds()).await.unwrap_err();

        assert!(matches!(
            err,
            FederationError::RemoteRejection { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn each_call_fetches_a_fresh_token() {
        let mock = MockFederation::start(&[
            (StatusCode::OK, r#"{"SigninToken":"FIRST"}"#),
            (StatusCode::OK, r#"{"SigninToken":"SECOND"}"#),
        ])
        .await;
        let client = FederationClient::new(mock.config()).unwrap();

        let first = client.create_login_url(&creds()).await.unwrap();
        let second = client.create_login_url(&creds()).await.unwrap();

        assert!(first.as_str().ends_with("SigninToken=FIRST"));
        assert!(second.as_str().ends_with("SigninToken=SECOND"));
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let config = FederationConfig {
            federation_url: closed_endpoint().await,
            request_timeout: Some(Duration::from_secs(5)),
            ..FederationConfig::default()
        };
        let client = FederationClient::new(config).unwrap();

        let err = client.create_login_url(&creds()).await.unwrap_err();
        assert!(matches!(err, FederationError::Transport(_)));
    }

    #[test]
    fn login_url_uses_client_config() {
        let client = FederationClient::with_http_client(
            reqwest::Client::new(),
            FederationConfig {
                issuer: "custom".into(),
                ..FederationConfig::default()
            },
        );
        let url = client.login_url(SigninToken::new("T"));
        assert!(url.as_str().contains("Issuer=custom"));
        assert_eq!(client.config().issuer, "custom");
    }
}
