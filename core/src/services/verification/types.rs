//! Result types for the verification service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of issuing or resending a verification code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResult {
    /// Normalized email the code was sent to
    pub email: String,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Earliest time a resend will be accepted
    pub next_resend_at: DateTime<Utc>,
}
