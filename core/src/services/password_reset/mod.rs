//! Password reset service module
//!
//! Issues single-use, time-boxed reset tokens and consumes them to install
//! a new password hash. Only the token digest is stored; the plaintext goes
//! to the caller exactly once for embedding in a reset link.

mod service;


pub use service::PasswordResetService;
