//! The [`Registry`] trait defining the registration interface.

use folio_types::{ObjectId, Owner};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One owner → profile association.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub owner: Owner,
    pub profile: ObjectId,
}

/// Storage backend for owner registrations.
///
/// Implementations must be thread-safe and must perform the uniqueness check
/// and the insert of [`register`](Registry::register) as one atomic step.
pub trait Registry: Send + Sync {
    /// Record that `owner` owns `profile`.
    ///
    /// Fails with `AlreadyRegistered` if `owner` has any registration,
    /// leaving the registry unchanged.
    fn register(&self, owner: Owner, profile: ObjectId) -> Result<()>;

    /// The profile registered by `owner`, if any.
    fn lookup(&self, owner: &Owner) -> Option<ObjectId>;

    /// Number of registered owners.
    fn len(&self) -> usize;

    /// All registrations, sorted by owner.
    fn registrations(&self) -> Vec<Registration>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_registered(&self, owner: &Owner) -> bool {
        self.lookup(owner).is_some()
    }
}
