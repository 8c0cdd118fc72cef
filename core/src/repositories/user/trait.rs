//! User repository trait defining the interface for user data persistence.
//!
//! This module defines the repository pattern interface for User entities.
//! The trait is async-first and uses Result types for proper error handling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
///
/// Every OTP and password-reset state transition goes through
/// [`update_if_unchanged`](UserRepository::update_if_unchanged), an
/// optimistic compare-and-swap scoped to a single row. A plain
/// read-then-write would let two concurrent verifications both pass the
/// attempt-count check before either increments it.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their normalized email address
    ///
    /// # Arguments
    /// * `email` - Email address, already normalized to lowercase
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user holding the given reset token digest
    ///
    /// Expiry is not checked here; the caller owns the time comparison.
    async fn find_by_reset_token(&self, token_hash: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// Email uniqueness is enforced at the store level; a violation surfaces
    /// as `AuthError::UserAlreadyExists`, not a generic failure.
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g., duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user unconditionally
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - Update failed (e.g., user not found)
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Atomically replace a row only if it still matches `expected`
    ///
    /// # Arguments
    /// * `expected` - The row as last read by the caller
    /// * `updated` - The replacement row (same id)
    ///
    /// # Returns
    /// * `Ok(true)` - The swap was applied
    /// * `Ok(false)` - The row changed since `expected` was read; reload and retry
    /// * `Err(DomainError)` - Database error or row missing
    async fn update_if_unchanged(
        &self,
        expected: &User,
        updated: User,
    ) -> Result<bool, DomainError>;
}
