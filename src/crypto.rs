//! Credential hashing.
//!
//! [`UserDao`](crate::user::UserDao) stores `password` exactly as given.
//! Callers wanting hashed credentials pass the output of
//! [`PasswordManager::hash_password`] instead of the clear password.

use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::config::Argon2 as ArgonConfig;

type Result<T> = std::result::Result<T, CryptoError>;

#[derive(thiserror::Error, Debug)]
pub enum CryptoError {
    #[error("argon2 error: {0}")]
    Argon2(String),
    #[error("invalid password")]
    InvalidPassword,
}

/// Password manager that uses Argon2id and PHC string format for hashing and
/// verification.
pub struct PasswordManager {
    params: Params,
}

impl PasswordManager {
    /// Create a new [`PasswordManager`].
    pub fn new(config: Option<ArgonConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(config.hash_length),
        )
        .map_err(|err| CryptoError::Argon2(err.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
    }

    /// Hash password using Argon2id.
    pub fn hash_password(&self, password: impl AsRef<[u8]>) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_ref(), &salt)
            .map_err(|e| CryptoError::Argon2(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify password against a PHC.
    pub fn verify_password(
        &self,
        password: impl AsRef<[u8]>,
        phc_hash: &str,
    ) -> Result<()> {
        let parsed = PasswordHash::new(phc_hash)
            .map_err(|_| CryptoError::InvalidPassword)?;

        self.argon2()
            .verify_password(password.as_ref(), &parsed)
            .map_err(|_| CryptoError::InvalidPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> PasswordManager {
        PasswordManager::new(Some(ArgonConfig {
            memory_cost: 1024,
            iterations: 1,
            parallelism: 1,
            hash_length: 32,
        }))
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let pwd = manager();

        let hash = pwd.hash_password("pw1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(pwd.verify_password("pw1", &hash).is_ok());
        assert!(matches!(
            pwd.verify_password("pw2", &hash),
            Err(CryptoError::InvalidPassword)
        ));
    }

    #[test]
    fn test_salt_is_random() {
        let pwd = manager();
        assert_ne!(
            pwd.hash_password("pw1").unwrap(),
            pwd.hash_password("pw1").unwrap()
        );
    }

    #[test]
    fn test_verify_plaintext_value() {
        assert!(manager().verify_password("pw1", "pw1").is_err());
    }

    #[test]
    fn test_invalid_params() {
        let config = ArgonConfig {
            parallelism: 0,
            ..Default::default()
        };
        assert!(PasswordManager::new(Some(config)).is_err());
    }
}
