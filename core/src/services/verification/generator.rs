//! Cryptographically secure generation of verification codes and reset tokens
//!
//! Predictability of either credential is a direct account-takeover vector,
//! so everything here draws from `OsRng` (the OS CSPRNG), never a
//! general-purpose PRNG. Only digests of these values are ever persisted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Salt length for OTP digests
const OTP_SALT_BYTES: usize = 16;

/// Entropy of a reset token (256 bits)
const RESET_TOKEN_BYTES: usize = 32;

/// Generates a 6-digit verification code
///
/// Drawn uniformly from 100000..=999999; `gen_range` rejection-samples, so
/// the distribution carries no modulo bias.
pub fn generate_otp() -> String {
    let mut rng = OsRng;
    let code: u32 = rng.gen_range(100_000..=999_999);
    code.to_string()
}

/// Hashes a verification code with a fresh random salt
///
/// The result is encoded as `salt$digest` (both hex) and is the only form
/// of the code that reaches the store.
pub fn hash_otp(code: &str) -> String {
    let mut salt = [0u8; OTP_SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    let digest = otp_digest(&salt, code);
    format!("{}${}", hex::encode(salt), hex::encode(digest))
}

/// Verifies a submitted code against a stored `salt$digest` value
///
/// Digest comparison is constant-time to avoid a timing oracle.
pub fn verify_otp_hash(code: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };
    let digest = otp_digest(&salt, code);
    constant_time_eq(&digest, &expected)
}

fn otp_digest(salt: &[u8], code: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(code.as_bytes());
    hasher.finalize().into()
}

/// Generates a password reset token
///
/// Returns `(plaintext, digest)`: the plaintext is a URL-safe string with
/// 256 bits of entropy, handed to the caller exactly once for embedding in
/// a reset link; the SHA-256 hex digest is what gets stored.
pub fn generate_reset_token() -> (String, String) {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let plaintext = URL_SAFE_NO_PAD.encode(bytes);
    let digest = hash_reset_token(&plaintext);
    (plaintext, digest)
}

/// Digests a presented reset token for lookup
pub fn hash_reset_token(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_otp_format() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let num: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&num));
        }
    }

    #[test]
    fn test_otp_codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_otp()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_otp_hash_round_trip() {
        let code = generate_otp();
        let stored = hash_otp(&code);

        assert!(verify_otp_hash(&code, &stored));
        assert!(!verify_otp_hash("000000", &stored));
    }

    #[test]
    fn test_otp_hash_is_salted() {
        let first = hash_otp("483920");
        let second = hash_otp("483920");
        assert_ne!(first, second);
        assert!(verify_otp_hash("483920", &first));
        assert!(verify_otp_hash("483920", &second));
    }

    #[test]
    fn test_otp_hash_never_contains_code() {
        let stored = hash_otp("483920");
        assert!(!stored.contains("483920"));
    }

    #[test]
    fn test_verify_rejects_malformed_stored_value() {
        assert!(!verify_otp_hash("483920", "no-separator"));
        assert!(!verify_otp_hash("483920", "nothex$nothex"));
    }

    #[test]
    fn test_generate_reset_token() {
        let (plaintext, digest) = generate_reset_token();

        // 32 bytes -> 43 URL-safe base64 chars without padding
        assert_eq!(plaintext.len(), 43);
        assert!(plaintext
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

        // SHA-256 hex digest, reproducible from the plaintext
        assert_eq!(digest.len(), 64);
        assert_eq!(hash_reset_token(&plaintext), digest);
    }

    #[test]
    fn test_reset_tokens_vary() {
        let (first, _) = generate_reset_token();
        let (second, _) = generate_reset_token();
        assert_ne!(first, second);
    }
}
