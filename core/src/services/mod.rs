//! Business services containing domain logic and use cases.

pub mod auth;
pub mod password_reset;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, IdTokenVerifierTrait, OAuthUserInfo};
pub use password_reset::PasswordResetService;
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{EmailServiceTrait, SendCodeResult, VerificationService};
