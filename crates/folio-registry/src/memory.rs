//! In-memory registry.
//!
//! [`InMemoryRegistry`] keeps registrations in a `HashMap` behind a
//! `RwLock`. Data is lost when the registry is dropped.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use folio_types::{ObjectId, Owner};
use tracing::{debug, warn};

use crate::error::{RegistryError, Result};
use crate::traits::{Registration, Registry};

/// An in-memory implementation of [`Registry`].
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    users: RwLock<HashMap<Owner, ObjectId>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Registry for InMemoryRegistry {
    fn register(&self, owner: Owner, profile: ObjectId) -> Result<()> {
        // A poisoned lock still guards a consistent map: every write is a
        // single insert.
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        match users.entry(owner) {
            Entry::Occupied(existing) => {
                let existing = *existing.get();
                warn!(%owner, %existing, "registration rejected");
                Err(RegistryError::AlreadyRegistered { owner, existing })
            }
            Entry::Vacant(slot) => {
                slot.insert(profile);
                debug!(%owner, %profile, "owner registered");
                Ok(())
            }
        }
    }

    fn lookup(&self, owner: &Owner) -> Option<ObjectId> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.get(owner).copied()
    }

    fn len(&self) -> usize {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn registrations(&self) -> Vec<Registration> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<Registration> = users
            .iter()
            .map(|(owner, profile)| Registration {
                owner: *owner,
                profile: *profile,
            })
            .collect();
        all.sort_by(|a, b| a.owner.cmp(&b.owner));
        all
    }
}
