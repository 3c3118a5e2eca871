use crate::error::AuthError;

/// One-way password hashing (bcrypt).
///
/// Each call to [`hash`](Self::hash) draws a fresh salt, so equal plaintexts
/// produce different hashes; matching goes through [`verify`](Self::verify).
/// There is no reversal operation.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Hasher with the library's default work factor (production wiring).
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Hasher with an explicit work factor. Tests use the bcrypt minimum to
    /// stay fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AuthError::crypto(format!("password hashing failed: {e}")))
    }

    /// Check a plaintext against a stored hash.
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(plaintext, hash)
            .map_err(|e| AuthError::crypto(format!("password verification failed: {e}")))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        // bcrypt's minimum work factor, to keep tests fast.
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn hash_then_verify_accepts_the_original() {
        let hasher = hasher();
        let hash = hasher.hash("hunter2!").unwrap();

        assert!(hasher.verify("hunter2!", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_a_different_plaintext() {
        let hasher = hasher();
        let hash = hasher.hash("hunter2!").unwrap();

        assert!(!hasher.verify("hunter3!", &hash).unwrap());
    }

    #[test]
    fn equal_plaintexts_hash_differently() {
        let hasher = hasher();

        // Fresh salt per call.
        let a = hasher.hash("same-password").unwrap();
        let b = hasher.hash("same-password").unwrap();
        assert_ne!(a, b);

        assert!(hasher.verify("same-password", &a).unwrap());
        assert!(hasher.verify("same-password", &b).unwrap());
    }
}
