//! Error types for registry operations.

use folio_types::{ObjectId, Owner};
use thiserror::Error;

/// Errors that can occur during registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The owner already has a registered profile.
    #[error("{owner} is already registered to profile {existing}")]
    AlreadyRegistered { owner: Owner, existing: ObjectId },
}

/// Convenience type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
