//! Verification service module for email OTP authentication
//!
//! This module provides the complete verification code workflow:
//! - Cryptographically secure code generation and salted hashing
//! - Code issuance with email dispatch
//! - Attempt-limited verification
//! - Resend with cooldown enforcement

pub mod generator;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::VerificationService;
pub use traits::EmailServiceTrait;
pub use types::SendCodeResult;
