//! Capabilities supplied by the embedding environment.
//!
//! The core needs exactly three things from outside: fresh identities
//! ([`IdAllocator`]), the current caller ([`CallContext`]), and somewhere to
//! send notifications ([`EventSink`](folio_events::EventSink)).

use std::sync::atomic::{AtomicU64, Ordering};

use folio_types::{ObjectId, Owner};

/// Mints globally unique container identities.
///
/// An allocator must never return the same id twice, nor the null id.
pub trait IdAllocator: Send + Sync {
    fn next_id(&self) -> ObjectId;
}

/// Allocates ids from a UUIDv7 plus 16 random bytes, hashed under a namespace.
#[derive(Clone, Debug)]
pub struct RandomIdAllocator {
    namespace: String,
}

impl RandomIdAllocator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl IdAllocator for RandomIdAllocator {
    fn next_id(&self) -> ObjectId {
        let mut seed = [0u8; 32];
        seed[..16].copy_from_slice(uuid::Uuid::now_v7().as_bytes());
        rand::Rng::fill(&mut rand::thread_rng(), &mut seed[16..]);
        ObjectId::derive(&self.namespace, &seed)
    }
}

/// Deterministic allocator: the n-th id is derived from `n`.
///
/// Two allocators with the same namespace produce the same sequence, which
/// makes runs reproducible in tests and replays.
#[derive(Debug)]
pub struct SequentialIdAllocator {
    namespace: String,
    issued: AtomicU64,
}

impl SequentialIdAllocator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            issued: AtomicU64::new(0),
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

impl IdAllocator for SequentialIdAllocator {
    fn next_id(&self) -> ObjectId {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        ObjectId::derive(&self.namespace, &n.to_le_bytes())
    }
}

/// The identity initiating the current operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    sender: Owner,
}

impl CallContext {
    pub fn new(sender: Owner) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> Owner {
        self.sender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_ids_are_unique() {
        let ids = RandomIdAllocator::new("folio");
        let seen: HashSet<ObjectId> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1000);
        assert!(!seen.contains(&ObjectId::null()));
    }

    #[test]
    fn sequential_ids_are_reproducible() {
        let a = SequentialIdAllocator::new("folio");
        let b = SequentialIdAllocator::new("folio");
        let first: Vec<ObjectId> = (0..5).map(|_| a.next_id()).collect();
        let second: Vec<ObjectId> = (0..5).map(|_| b.next_id()).collect();
        assert_eq!(first, second);
        assert_eq!(a.issued(), 5);

        let distinct: HashSet<ObjectId> = first.into_iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn namespaces_do_not_collide() {
        let a = SequentialIdAllocator::new("alpha");
        let b = SequentialIdAllocator::new("beta");
        assert_ne!(a.next_id(), b.next_id());
    }

    #[test]
    fn call_context_exposes_sender() {
        let owner = Owner::from_raw([5; 32]);
        assert_eq!(CallContext::new(owner).sender(), owner);
    }
}
