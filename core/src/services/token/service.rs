//! Session token issuance and validation

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use aran_shared::utils::email::mask_email;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};

/// Service for signing and validating session tokens
///
/// This is the single place blocking is enforced for session issuance: a
/// blocked user may still complete email verification but can never obtain
/// a session.
pub struct TokenService {
    config: super::TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: super::TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a session token for a verified, non-blocked identity
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Signed token plus the user metadata
    /// * `Err(AuthError::UserBlocked)` - The account is blocked
    pub fn issue_session(&self, user: &User) -> DomainResult<AuthResponse> {
        if user.is_blocked {
            tracing::warn!(
                email = %mask_email(&user.email),
                event = "session_refused_blocked",
                "Refused session for blocked account"
            );
            return Err(AuthError::UserBlocked.into());
        }

        let expiry = Duration::minutes(self.config.session_token_expiry_minutes);
        let mut claims = Claims::new_session_token(user.id, user.is_admin, user.is_verified, expiry);
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "token_sign_failed", "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })?;

        Ok(AuthResponse::new(
            user,
            token,
            self.config.session_token_expiry_minutes * 60,
        ))
    }

    /// Validates a session token and recovers its claims
    ///
    /// Used by the transport layer to authorize unrelated endpoints.
    pub fn validate_token(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let kind = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        TokenError::TokenNotYetValid
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => TokenError::InvalidTokenFormat,
                    _ => TokenError::InvalidClaims,
                };
                DomainError::Token(kind)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::TokenServiceConfig;
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new(TokenServiceConfig {
            jwt_secret: "test-secret".to_string(),
            ..Default::default()
        })
    }

    fn test_user() -> User {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        user.verify();
        user
    }

    #[test]
    fn test_issue_and_validate_session() {
        let service = test_service();
        let user = test_user();

        let response = service.issue_session(&user).unwrap();
        assert!(!response.token.is_empty());
        assert_eq!(response.user_id, user.id);
        assert_eq!(response.expires_in, 7 * 24 * 60 * 60);

        let claims = service.validate_token(&response.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert!(claims.is_verified);
        assert!(!claims.is_admin);
    }

    #[test]
    fn test_session_carries_admin_flag() {
        let service = test_service();
        let mut user = test_user();
        user.is_admin = true;

        let response = service.issue_session(&user).unwrap();
        let claims = service.validate_token(&response.token).unwrap();
        assert!(claims.is_admin);
    }

    #[test]
    fn test_blocked_user_is_refused() {
        let service = test_service();
        let mut user = test_user();
        user.block();

        let err = service.issue_session(&user).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::UserBlocked)
        ));
    }

    #[test]
    fn test_wrong_secret_fails_validation() {
        let service = test_service();
        let other = TokenService::new(TokenServiceConfig {
            jwt_secret: "different-secret".to_string(),
            ..Default::default()
        });
        let response = service.issue_session(&test_user()).unwrap();

        let err = other.validate_token(&response.token).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Token(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_fails_validation() {
        let service = TokenService::new(TokenServiceConfig {
            jwt_secret: "test-secret".to_string(),
            session_token_expiry_minutes: -5,
            ..Default::default()
        });
        let response = service.issue_session(&test_user()).unwrap();

        let err = service.validate_token(&response.token).unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token_fails_validation() {
        let service = test_service();
        let err = service.validate_token("not-a-jwt").unwrap_err();
        assert!(matches!(err, DomainError::Token(_)));
    }
}
