//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] producing salted Argon2id PHC strings.
///
/// Verification reads the parameters embedded in the stored digest, so
/// digests created under different cost settings keep verifying.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters: memory in KiB, iterations, parallelism.
    pub fn with_cost(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordHashError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest.as_phc())
            .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_cost(8, 1, 1).expect("valid params")
    }

    #[rstest]
    fn digests_are_salted_phc_strings(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("admin123").expect("hash");
        let second = hasher.hash("admin123").expect("hash");
        assert!(first.as_phc().starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(hasher.verify("admin123", &first).expect("verify"));
        assert!(hasher.verify("admin123", &second).expect("verify"));
    }

    #[rstest]
    #[case("admin124")]
    #[case("")]
    #[case("ADMIN123")]
    fn other_passwords_fail(hasher: Argon2PasswordHasher, #[case] attempt: &str) {
        let digest = hasher.hash("admin123").expect("hash");
        assert!(!hasher.verify(attempt, &digest).expect("verify"));
    }

    #[rstest]
    fn default_cost_verifies_low_cost_digests(hasher: Argon2PasswordHasher) {
        let digest = hasher.hash("pw").expect("hash");
        assert!(Argon2PasswordHasher::default().verify("pw", &digest).expect("verify"));
    }

    #[rstest]
    fn malformed_digest_is_an_error(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("pw", &PasswordDigest::new("plaintext"))
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedDigest { .. }));
    }

    #[rstest]
    fn invalid_cost_is_rejected() {
        assert!(Argon2PasswordHasher::with_cost(0, 0, 0).is_err());
    }
}
