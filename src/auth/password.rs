//! Password hashing. bcrypt is deliberately slow and salts per hash;
//! plaintext never leaves this module's callers.

use crate::auth::AuthError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Constant-time comparison via bcrypt. A hash that fails to parse
/// counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
