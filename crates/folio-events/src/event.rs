use std::fmt;

use serde::{Deserialize, Serialize};

use folio_types::{ObjectId, Owner, TypeTag};

/// Content-derived identifier of an emitted record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    pub hash: [u8; 32],
}

impl EventId {
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self { hash }
    }

    /// Short hex representation (first 8 hex chars).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.hash[..4])
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}", self.short_hex())
    }
}

/// Classification of state-transition notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// An owner registered a new profile.
    ProfileCreated,
    /// A folder was created under a profile.
    FolderCreated,
    /// Value was merged into a folder's balance.
    ValueDeposited,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ProfileCreated => "ProfileCreated",
            Self::FolderCreated => "FolderCreated",
            Self::ValueDeposited => "ValueDeposited",
        };
        write!(f, "{s}")
    }
}

/// A state transition, emitted exactly once after the mutation it describes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ProfileCreated {
        profile: ObjectId,
        owner: Owner,
    },
    FolderCreated {
        folder: ObjectId,
        owner: Owner,
    },
    ValueDeposited {
        folder: ObjectId,
        coin_type: TypeTag,
        amount: u64,
        new_balance: u64,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ProfileCreated { .. } => EventKind::ProfileCreated,
            Self::FolderCreated { .. } => EventKind::FolderCreated,
            Self::ValueDeposited { .. } => EventKind::ValueDeposited,
        }
    }

    /// The container the event is about.
    pub fn subject(&self) -> ObjectId {
        match self {
            Self::ProfileCreated { profile, .. } => *profile,
            Self::FolderCreated { folder, .. } => *folder,
            Self::ValueDeposited { folder, .. } => *folder,
        }
    }

    /// The owner named by the event, if it names one.
    pub fn owner(&self) -> Option<Owner> {
        match self {
            Self::ProfileCreated { owner, .. } | Self::FolderCreated { owner, .. } => Some(*owner),
            Self::ValueDeposited { .. } => None,
        }
    }
}

/// An [`Event`] as recorded by a log: positioned and integrity-hashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based position in the log that accepted the event.
    pub seq: u64,
    pub event: Event,
    /// BLAKE3 over (seq, event).
    pub integrity_hash: [u8; 32],
}

impl EventRecord {
    pub fn new(seq: u64, event: Event) -> Self {
        let integrity_hash = Self::compute_integrity(seq, &event);
        Self {
            seq,
            event,
            integrity_hash,
        }
    }

    pub fn id(&self) -> EventId {
        EventId::from_hash(self.integrity_hash)
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    pub fn verify_integrity(&self) -> bool {
        self.integrity_hash == Self::compute_integrity(self.seq, &self.event)
    }

    fn compute_integrity(seq: u64, event: &Event) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"folio-event-v1:");
        hasher.update(&seq.to_le_bytes());
        if let Ok(event_bytes) = bincode::serialize(event) {
            hasher.update(&event_bytes);
        }
        *hasher.finalize().as_bytes()
    }
}
