// src/domain/utils/guards.rs
use crate::error::DomainError;

/// The authentication collaborator's view of the signed-in session. The host
/// application implements this over its identity provider (the console checks
/// an `admin` custom claim on the ID token).
pub trait AdminAuthority {
    /// Whether the current caller is authorized as an administrator.
    fn is_admin(&self) -> bool;
}

/// Checks the administrator claim before a mutation-producing operation.
///
/// # Errors
///
/// Returns `DomainError::NotAuthorized` if the caller lacks the admin claim.
pub fn check_admin(auth: &impl AdminAuthority) -> Result<(), DomainError> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(DomainError::NotAuthorized(
            "caller does not hold the admin claim".to_string(),
        ))
    }
}
