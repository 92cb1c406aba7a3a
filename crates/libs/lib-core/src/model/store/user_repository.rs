//! # User Repository
//!
//! SQL access for the `users` table.
//!
//! Passwords arrive here already hashed (see `lib_auth::hash_password`);
//! this layer never sees plaintext.

use super::models::User;
use super::DbPool;
use crate::error::{AppError, Result};
use sqlx::query_as;

pub struct UserRepository;

impl UserRepository {
    /// Create a new user.
    ///
    /// # Returns
    ///
    /// * `Ok(id)` - The id of the new user
    /// * `Err(AppError::DuplicateUsername)` - The username is already registered
    /// * `Err(AppError::Storage)` - Any other database failure
    pub async fn create(pool: &DbPool, username: &str, password_hash: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::DuplicateUsername
                }
                other => AppError::from(other),
            })?;

        Ok(result.last_insert_rowid())
    }

    /// Find a user by their username.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching username
    /// * `Ok(None)` - No user found with that username
    /// * `Err(AppError::Storage)` - Database error occurred
    pub async fn find_by_username(pool: &DbPool, username: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT id, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Fetch a user by username, failing with `AppError::NotFound` if absent.
    pub async fn get_by_username(pool: &DbPool, username: &str) -> Result<User> {
        Self::find_by_username(pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::create_pool;

    async fn setup_test_db() -> DbPool {
        create_pool("sqlite::memory:")
            .await
            .expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_create_user() {
        let pool = setup_test_db().await;

        let id = UserRepository::create(&pool, "bob", "$argon2id$first").await.unwrap();
        let user = UserRepository::get_by_username(&pool, "bob").await.unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.username, "bob");
        assert_eq!(user.password, "$argon2id$first");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let pool = setup_test_db().await;

        let first_id = UserRepository::create(&pool, "bob", "$argon2id$first").await.unwrap();

        let result = UserRepository::create(&pool, "bob", "$argon2id$second").await;
        assert!(matches!(result, Err(AppError::DuplicateUsername)));

        // The original record is untouched.
        let user = UserRepository::get_by_username(&pool, "bob").await.unwrap();
        assert_eq!(user.id, first_id);
        assert_eq!(user.password, "$argon2id$first");
    }

    #[tokio::test]
    async fn test_find_by_username_not_found() {
        let pool = setup_test_db().await;

        assert!(UserRepository::find_by_username(&pool, "nobody").await.unwrap().is_none());
        assert!(matches!(
            UserRepository::get_by_username(&pool, "nobody").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_failure_propagates() {
        let pool = setup_test_db().await;
        sqlx::query("DROP TABLE users").execute(&pool).await.unwrap();

        let result = UserRepository::create(&pool, "bob", "$argon2id$first").await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_username_lookup_does_not_interpolate() {
        let pool = setup_test_db().await;
        UserRepository::create(&pool, "bob", "$argon2id$first").await.unwrap();

        let found = UserRepository::find_by_username(&pool, "' OR '1'='1").await.unwrap();
        assert!(found.is_none());
    }
}
