use thiserror::Error;

use folio_registry::RegistryError;
use folio_store::StoreError;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("registration rejected: {0}")]
    Registry(#[from] RegistryError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    /// Whether this is the owner-uniqueness rejection from profile creation.
    pub fn is_already_registered(&self) -> bool {
        matches!(
            self,
            SdkError::Registry(RegistryError::AlreadyRegistered { .. })
        )
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
