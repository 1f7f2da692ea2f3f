use crate::core::errors::CatalogError;

pub const BCRYPT_COST: u32 = 8;

/// Salted bcrypt hash. Call right before any write that sets a password.
pub fn hash_password(plain: &str) -> Result<String, CatalogError> {
    bcrypt::hash(plain, BCRYPT_COST)
        .map_err(|e| CatalogError::InternalServerError(format!("Password hashing error: {}", e)))
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, CatalogError> {
    bcrypt::verify(plain, hash)
        .map_err(|e| CatalogError::InternalServerError(format!("Password verification error: {}", e)))
}
