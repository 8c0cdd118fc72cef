//! Traits for email delivery integration

use async_trait::async_trait;

/// Trait for the email dispatch collaborator
///
/// Delivery is fire-and-forget from the state machine's perspective: a
/// failure is logged, never propagated, and never rolls back the stored
/// code (the user can always request a resend).
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to an email address
    ///
    /// Returns a provider message id on success.
    async fn send_otp_email(&self, email: &str, code: &str) -> Result<String, String>;
}
