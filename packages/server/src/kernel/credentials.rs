//! Argon2id credential hashing.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool instead of
//! stalling the request executor.

use anyhow::{anyhow, Context, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::BaseCredentialHasher;

/// Production hasher: Argon2id with default parameters, PHC string output
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher {
    /// Hash of a random secret, verified against on lookup misses
    decoy: Arc<OnceCell<String>>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseCredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, plaintext: &str) -> Result<String> {
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow!("Failed to hash credential: {}", e))
        })
        .await
        .context("Credential hashing task panicked")?
    }

    async fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool> {
        let plaintext = plaintext.to_owned();
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&stored_hash)
                .map_err(|e| anyhow!("Stored credential hash is malformed: {}", e))?;
            Ok(Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .context("Credential verification task panicked")?
    }

    async fn verify_missing(&self, plaintext: &str) -> Result<()> {
        let decoy = self
            .decoy
            .get_or_try_init(|| async {
                let secret = Uuid::now_v7().to_string();
                self.hash(&secret).await
            })
            .await?;
        self.verify(plaintext, decoy).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash("correct horse").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = Argon2CredentialHasher::new();
        let first = hasher.hash("p1").await.unwrap();
        let second = hasher.hash("p1").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_missing_reuses_one_decoy_hash() {
        let hasher = Argon2CredentialHasher::new();
        hasher.verify_missing("p1").await.unwrap();
        let decoy = hasher.decoy.get().cloned().unwrap();

        hasher.clone().verify_missing("p2").await.unwrap();
        assert_eq!(hasher.decoy.get(), Some(&decoy));
        assert!(decoy.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let hasher = Argon2CredentialHasher::new();
        assert!(hasher.verify("p1", "not-a-phc-string").await.is_err());
    }
}
