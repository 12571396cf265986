//! Password hashing with Argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    Params(String),

    #[error("Password hashing failed")]
    Hash,
}

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Failed,
    Success,
    /// Correct password, but the stored hash uses weaker or foreign parameters.
    SuccessRehashNeeded,
}

impl Verification {
    pub fn is_success(&self) -> bool {
        !matches!(self, Verification::Failed)
    }
}

/// Argon2id hasher. Work runs on the blocking pool.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// OWASP minimum memory cost: 19 MiB.
    const MEMORY_COST: u32 = 19_456;
    const TIME_COST: u32 = 2;
    const PARALLELISM: u32 = 1;
    const OUTPUT_LEN: usize = 32;

    pub fn new() -> Result<Self, PasswordError> {
        Self::with_params(Self::MEMORY_COST, Self::TIME_COST, Self::PARALLELISM)
    }

    /// Custom cost parameters, for constrained hosts and tests.
    pub fn with_params(
        memory_cost: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_cost, time_cost, parallelism, Some(Self::OUTPUT_LEN))
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }

    /// Hash a password into a PHC string.
    pub async fn hash(&self, password: String) -> Result<String, PasswordError> {
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::argon2(params)
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
        })
        .await
        .map_err(|e| {
            tracing::error!("Password hash task panicked: {}", e);
            PasswordError::Hash
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            PasswordError::Hash
        })
    }

    /// Verify a password. Unparseable or empty stored hashes fail verification.
    pub async fn verify(&self, password: String, stored: String) -> Result<Verification, PasswordError> {
        let current = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let Ok(parsed) = PasswordHash::new(&stored) else {
                return Verification::Failed;
            };
            // The verifier takes algorithm, version and costs from the hash itself.
            if Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_err()
            {
                return Verification::Failed;
            }
            if needs_rehash(&parsed, &current) {
                Verification::SuccessRehashNeeded
            } else {
                Verification::Success
            }
        })
        .await
        .map_err(|e| {
            tracing::error!("Password verify task panicked: {}", e);
            PasswordError::Hash
        })
    }
}

fn needs_rehash(parsed: &PasswordHash<'_>, current: &Params) -> bool {
    if parsed.algorithm.as_str() != Algorithm::Argon2id.ident().as_str() {
        return true;
    }
    match Params::try_from(parsed) {
        Ok(stored) => {
            stored.m_cost() < current.m_cost()
                || stored.t_cost() < current.t_cost()
                || stored.p_cost() < current.p_cost()
        }
        Err(_) => true,
    }
}
