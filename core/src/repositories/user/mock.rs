//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// Holds rows behind a single `RwLock`; the write lock taken in
/// `update_if_unchanged` makes the compare-and-swap atomic the same way a
/// conditional `UPDATE ... WHERE` would against a real database.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_reset_token(&self, token_hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        // Unique constraint on email
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_if_unchanged(
        &self,
        expected: &User,
        updated: User,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get(&expected.id) {
            Some(current) if current == expected => {
                users.insert(updated.id, updated);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(email: &str) -> User {
        User::new("Alice".to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let repo = MockUserRepository::new();
        let user = repo.create(sample_user("alice@example.com")).await.unwrap();

        let found = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));

        let missing = repo.find_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = MockUserRepository::new();
        repo.create(sample_user("alice@example.com")).await.unwrap();

        let result = repo.create(sample_user("alice@example.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::UserAlreadyExists))
        ));
    }

    #[tokio::test]
    async fn test_find_by_reset_token() {
        let repo = MockUserRepository::new();
        let mut user = sample_user("alice@example.com");
        user.reset_token_hash = Some("digest".to_string());
        repo.create(user.clone()).await.unwrap();

        let found = repo.find_by_reset_token("digest").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(repo.find_by_reset_token("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_if_unchanged_detects_conflict() {
        let repo = MockUserRepository::new();
        let user = repo.create(sample_user("alice@example.com")).await.unwrap();

        // First writer wins
        let mut first = user.clone();
        first.record_failed_otp_attempt();
        assert!(repo.update_if_unchanged(&user, first.clone()).await.unwrap());

        // Second writer read the same snapshot and must be told to retry
        let mut second = user.clone();
        second.record_failed_otp_attempt();
        assert!(!repo.update_if_unchanged(&user, second).await.unwrap());

        // Retry from the fresh row succeeds
        let fresh = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fresh.otp_attempts, 1);
        let mut third = fresh.clone();
        third.record_failed_otp_attempt();
        assert!(repo.update_if_unchanged(&fresh, third).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = MockUserRepository::new();
        let user = sample_user("ghost@example.com");

        let result = repo.update(user.clone()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let result = repo.update_if_unchanged(&user, user.clone()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
