use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Salted bcrypt; the salt and cost are embedded in the returned hash string.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor used for every stored credential.
    pub const DEFAULT_COST: u32 = 10;

    /// Create a new password hasher with the default work factor.
    pub fn new() -> Self {
        Self::with_cost(Self::DEFAULT_COST)
    }

    /// Create a password hasher with an explicit bcrypt work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost, between 4 and 31
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    ///
    /// Two calls with the same password yield different hashes since each
    /// call draws a fresh salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$10$...`)
    ///
    /// # Errors
    /// * `HashingFailed` - Invalid cost or the salt could not be drawn
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash produced by [`PasswordHasher::hash`]
    ///
    /// # Errors
    /// * `Mismatch` - Password does not reproduce the hash
    /// * `VerificationFailed` - Stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        match bcrypt::verify(password, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::VerificationFailed(format!(
                "Invalid password hash: {}",
                e
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
