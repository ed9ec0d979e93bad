// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseCredentialHasher)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Credential hashing (Infrastructure - one-way secret storage)
// =============================================================================

/// One-way credential hashing. Hashes are opaque to callers and never reversed.
#[async_trait]
pub trait BaseCredentialHasher: Send + Sync {
    /// Hash a plaintext secret for storage
    async fn hash(&self, plaintext: &str) -> Result<String>;

    /// Check a plaintext secret against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
    async fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool>;

    /// Do the work of `verify` when there is no stored hash to check against,
    /// so a lookup miss costs as much as a wrong password
    async fn verify_missing(&self, plaintext: &str) -> Result<()>;
}
