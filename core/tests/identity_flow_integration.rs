//! End-to-end identity lifecycle test against the public crate API
//!
//! Drives registration, OTP verification, login, and password reset through
//! `AuthService` wired up the way a composition root would, with in-memory
//! collaborators standing in for the store, the mailer, and Google.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use aran_core::errors::{AuthError, DomainError};
use aran_core::repositories::MockUserRepository;
use aran_core::services::auth::{
    AuthService, ConsumePasswordResetRequest, IdTokenVerifierTrait, LoginRequest, OAuthUserInfo,
    RegisterRequest, RequestPasswordResetRequest, VerifyOtpRequest,
};
use aran_core::services::verification::EmailServiceTrait;
use aran_shared::config::AuthConfig;

struct RecordingMailer {
    codes: Mutex<Vec<String>>,
}

impl RecordingMailer {
    fn new() -> Self {
        Self {
            codes: Mutex::new(Vec::new()),
        }
    }

    fn last_code(&self) -> String {
        self.codes.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingMailer {
    async fn send_otp_email(&self, _email: &str, code: &str) -> Result<String, String> {
        self.codes.lock().unwrap().push(code.to_string());
        Ok("queued".to_string())
    }
}

struct StaticVerifier;

#[async_trait]
impl IdTokenVerifierTrait for StaticVerifier {
    async fn verify_id_token(&self, id_token: &str) -> Result<OAuthUserInfo, String> {
        if id_token != "trusted-google-token" {
            return Err("token rejected".to_string());
        }
        Ok(OAuthUserInfo {
            name: "Carol".to_string(),
            email: "carol@example.com".to_string(),
            subject_id: "google-sub-777".to_string(),
        })
    }
}

fn build_service() -> (
    AuthService<MockUserRepository, RecordingMailer, StaticVerifier>,
    Arc<RecordingMailer>,
) {
    let mailer = Arc::new(RecordingMailer::new());
    let service = AuthService::from_config(
        Arc::new(MockUserRepository::new()),
        Arc::clone(&mailer),
        Arc::new(StaticVerifier),
        &AuthConfig::default(),
    );
    (service, mailer)
}

#[tokio::test]
async fn full_lifecycle_register_verify_login_reset() {
    let (service, mailer) = build_service();

    let registered = service
        .register(RegisterRequest {
            name: "Alice".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(registered.email, "alice@example.com");

    // Unverified accounts cannot log in yet
    let err = service
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotVerified)));

    let session = service
        .verify_otp(VerifyOtpRequest {
            email: "alice@example.com".to_string(),
            code: mailer.last_code(),
        })
        .await
        .unwrap();
    assert!(!session.token.is_empty());

    service
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();

    let token = service
        .request_password_reset(RequestPasswordResetRequest {
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap()
        .unwrap();
    service
        .consume_password_reset(ConsumePasswordResetRequest {
            token,
            new_password: "rotated-secret".to_string(),
        })
        .await
        .unwrap();

    service
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "rotated-secret".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn google_login_skips_the_otp_flow() {
    let (service, mailer) = build_service();

    let session = service.oauth_login("trusted-google-token").await.unwrap();
    assert_eq!(session.email, "carol@example.com");
    // No code was ever dispatched on this path
    assert!(mailer.codes.lock().unwrap().is_empty());

    let err = service.oauth_login("forged").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::OAuthProviderFailure)
    ));
}
