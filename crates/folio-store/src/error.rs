use folio_types::TypeTag;

/// Errors from attachment store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The tag is already bound to an attachment of a different Rust type.
    #[error("type tag {tag} holds {found}, not {expected}")]
    TypeMismatch {
        tag: TypeTag,
        expected: &'static str,
        found: &'static str,
    },

    /// Merging would exceed the representable amount.
    #[error("balance overflow for {tag}: {current} + {incoming}")]
    Overflow {
        tag: TypeTag,
        current: u64,
        incoming: u64,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
