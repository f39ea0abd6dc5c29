//! `Action=getSigninToken`: request encoding and response handling.
//!
//! The network call itself lives in [`FederationClient`](crate::FederationClient);
//! this module only turns credentials into a request URL and a response
//! into a [`SigninToken`].

use std::fmt;

use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::config::SESSION_DURATION_SECS;
use crate::credentials::{Credentials, FederationSessionPayload};
use crate::error::FederationError;

/// Short-lived bearer token returned by the federation endpoint.
///
/// Consumed by value when the login URL is built, so a token is used at
/// most once.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SigninToken {
    #[serde(rename = "SigninToken")]
    token: String,
}

impl SigninToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for SigninToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigninToken({} chars)", self.token.len())
    }
}

/// Build the `getSigninToken` request URL for `creds`.
///
/// Query: `Action=getSigninToken`, `SessionDuration=1800` and `Session`
/// set to the compact JSON payload.
pub(crate) fn signin_token_url(base: &Url, creds: &Credentials) -> Result<Url, FederationError> {
    let session = serde_json::to_string(&FederationSessionPayload::from(creds))
        .map_err(FederationError::Serialization)?;

    let duration = SESSION_DURATION_SECS.to_string();
    Ok(set_query_pairs(
        base,
        &[
            ("Action", "getSigninToken"),
            ("SessionDuration", &duration),
            ("Session", &session),
        ],
    ))
}

/// Copy `base` with each of `pairs` set in its query.
///
/// Existing parameters with the same keys are replaced, others are kept.
pub(crate) fn set_query_pairs(base: &Url, pairs: &[(&str, &str)]) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| pairs.iter().all(|(name, _)| &**key != *name))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_query(None);
    url.query_pairs_mut().extend_pairs(&kept).extend_pairs(pairs);
    url
}

/// Interpret a fully-read federation response.
pub(crate) fn parse_signin_response(
    status: StatusCode,
    body: &str,
) -> Result<SigninToken, FederationError> {
    if status != StatusCode::OK {
        return Err(FederationError::RemoteRejection {
            status,
            message: body.to_string(),
        });
    }

    serde_json::from_str(body).map_err(FederationError::MalformedResponse)
}
