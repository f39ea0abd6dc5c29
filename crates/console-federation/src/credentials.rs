//! Temporary credentials and their federation wire shape.

use std::fmt;

use serde::Serialize;

/// Temporary AWS credentials (access key, secret key, session token).
///
/// Supplied by an external resolver and held in memory only.  The [`Debug`]
/// implementation never prints the secret key or the session token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: String,
}

impl Credentials {
    /// Bundle the three credential parts.
    ///
    /// Blank values are accepted as-is: the federation endpoint decides
    /// whether they are valid.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
        }
    }

    /// The access key id. Safe to log.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .finish()
    }
}

/// The `Session` JSON object expected by `Action=getSigninToken`.
///
/// A field-for-field rename of [`Credentials`]; it borrows from them and
/// only lives long enough to be serialized.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FederationSessionPayload<'a> {
    session_id: &'a str,
    session_key: &'a str,
    session_token: &'a str,
}

impl fmt::Debug for FederationSessionPayload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FederationSessionPayload")
            .field("session_id", &self.session_id)
            .field("session_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .finish()
    }
}

impl<'a> From<&'a Credentials> for FederationSessionPayload<'a> {
    fn from(creds: &'a Credentials) -> Self {
        Self {
            session_id: &creds.access_key_id,
            session_key: &creds.secret_access_key,
            session_token: &creds.session_token,
        }
    }
}
