//! Credential resolution from a named AWS profile.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use console_federation::{Credentials, FederationError};

/// Resolves credentials through the AWS SDK default chain, scoped to one
/// profile and region.
#[derive(Debug, Clone)]
pub struct AwsProfileResolver {
    profile: String,
    region: String,
}

impl AwsProfileResolver {
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
        }
    }

    /// Load the profile and fetch its current credentials.
    ///
    /// Every failure is reported as [`FederationError::UpstreamCredential`].
    pub async fn resolve(&self) -> Result<Credentials, FederationError> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&self.profile)
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        let provider = config.credentials_provider().ok_or_else(|| {
            FederationError::UpstreamCredential(
                format!("no credentials provider for profile `{}`", self.profile).into(),
            )
        })?;

        let creds = provider
            .provide_credentials()
            .await
            .map_err(|e| FederationError::UpstreamCredential(Box::new(e)))?;

        into_federation_credentials(&creds)
    }
}

/// Convert SDK credentials, requiring a session token.
///
/// Console federation only accepts temporary credentials, so long-term
/// keys without a session token are refused here.
pub fn into_federation_credentials(
    creds: &aws_credential_types::Credentials,
) -> Result<Credentials, FederationError> {
    let session_token = creds.session_token().ok_or_else(|| {
        FederationError::UpstreamCredential(
            "credentials have no session token; console sign-in needs temporary credentials"
                .into(),
        )
    })?;

    Ok(Credentials::new(
        creds.access_key_id(),
        creds.secret_access_key(),
        session_token,
    ))
}
