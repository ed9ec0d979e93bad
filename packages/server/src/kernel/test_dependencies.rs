// TestDependencies - mock implementations for testing
//
// Provides cheap stand-ins for services that are slow or nondeterministic in tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::BaseCredentialHasher;

// =============================================================================
// Mock Credential Hasher
// =============================================================================

const PREFIX: &str = "plain$";

/// Reversible "hash" for tests: Argon2 costs ~tens of ms per call.
///
/// Records how many times `hash` and `verify` ran so tests can assert that a
/// rejected registration never reached hashing, and that a login miss still
/// paid for a verification.
#[derive(Debug, Clone, Default)]
pub struct PlaintextCredentialHasher {
    hash_calls: Arc<AtomicUsize>,
    verify_calls: Arc<AtomicUsize>,
}

impl PlaintextCredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaseCredentialHasher for PlaintextCredentialHasher {
    async fn hash(&self, plaintext: &str) -> Result<String> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}{}", PREFIX, plaintext))
    }

    async fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        let stored = stored_hash
            .strip_prefix(PREFIX)
            .ok_or_else(|| anyhow::anyhow!("Not a test credential hash"))?;
        Ok(stored == plaintext)
    }

    async fn verify_missing(&self, plaintext: &str) -> Result<()> {
        self.verify(plaintext, PREFIX).await.map(|_| ())
    }
}
