//! Authentication service module
//!
//! The orchestrator for the complete identity flow:
//! - Email + password registration gated by OTP verification
//! - Resend with cooldown
//! - Password and Google sign-in login paths
//! - Password reset request and consumption
//! - Session issuance

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use traits::{IdTokenVerifierTrait, OAuthUserInfo};
pub use types::{
    ConsumePasswordResetRequest, LoginRequest, RegisterRequest, RequestPasswordResetRequest,
    ResendOtpRequest, VerifyOtpRequest,
};
