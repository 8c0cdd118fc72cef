//! Traits for external identity provider integration

use async_trait::async_trait;

/// Identity extracted from a provider-signed id token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthUserInfo {
    /// Display name asserted by the provider
    pub name: String,
    /// Email address, already verified by the provider
    pub email: String,
    /// Provider-scoped subject identifier
    pub subject_id: String,
}

/// Trait for verifying id tokens against a trusted identity provider
///
/// Injected into the auth service so tests can substitute a fake; never a
/// process-wide singleton.
#[async_trait]
pub trait IdTokenVerifierTrait: Send + Sync {
    /// Verify an id token and extract the asserted identity
    ///
    /// Fails when the token is invalid, expired, or signed for another
    /// audience.
    async fn verify_id_token(&self, id_token: &str) -> Result<OAuthUserInfo, String>;
}
