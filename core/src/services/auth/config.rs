//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Maximum accepted password length (bcrypt truncates beyond 72 bytes)
    pub max_password_length: usize,
    /// Whether a reset request for an unknown email reports "user not
    /// found" (source-compatible) or responds identically either way
    /// (leak-resistant)
    pub reveal_unknown_email: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            max_password_length: 72,
            reveal_unknown_email: true,
        }
    }
}
