// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The phone key is empty or otherwise unusable as an account key.
    #[error("invalid account key: {0:?}")]
    InvalidKey(String),

    /// The device record carries no phone and the caller supplied none;
    /// binding without an identifying phone would create an orphan account.
    #[error("device {0} has no phone to bind to")]
    MissingPhone(String),

    /// The caller declined to attach a device to an already-existing account.
    /// A normal negative outcome, not a failure of the module.
    #[error("attachment of device {device_id} to existing account {phone} declined")]
    AttachmentDeclined { phone: String, device_id: String },

    /// The caller does not hold the administrator claim.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// A request failed field validation before reaching the services.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
