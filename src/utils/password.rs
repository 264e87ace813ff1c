//! Password hashing with argon2id.
//!
//! Hashing is deliberately slow and memory hungry, so both operations run on
//! tokio's blocking pool instead of an actix worker.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::error::AppError;

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
    })
    .await
    .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
}

/// `Ok(false)` means the password does not match; `Err` means the stored hash is unusable.
pub async fn verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| AppError::internal(format!("Stored hash is malformed: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_not_the_password_and_verifies() {
        let hash = hash_password("123".to_string()).await.unwrap();

        assert_ne!(hash, "123");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("123".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("1234".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_hashes_differently() {
        let a = hash_password("one-punch".to_string()).await.unwrap();
        let b = hash_password("one-punch".to_string()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_internal_error() {
        let res = verify_password("123".to_string(), "not-a-hash".to_string()).await;
        assert!(matches!(res, Err(AppError::Internal(_))));
    }
}
