//! High-level API for Folio.
//!
//! Folio keeps a per-owner registry of profiles. Each profile owns an
//! ordered list of folders, and each folder accumulates typed balances keyed
//! by value type. Every state transition emits one notification.
//!
//! ```
//! use folio_sdk::{CallContext, Coin, CoinType, Folio, FolioConfig, Owner};
//!
//! struct Usd;
//! impl CoinType for Usd {
//!     const TYPE_NAME: &'static str = "folio::coin::USD";
//! }
//!
//! let (folio, events) = Folio::in_memory(FolioConfig::default()).unwrap();
//! let alice = CallContext::new(Owner::ephemeral());
//!
//! let mut profile = folio.create_profile(&alice, "alice", "bio").unwrap();
//! let mut folder = folio.create_folder(alice.sender(), &mut profile, "savings", "");
//! folio.deposit(&mut folder, Coin::<Usd>::new(100)).unwrap();
//!
//! assert_eq!(folder.balance_of::<Usd>(), 100);
//! assert_eq!(folio.lookup(&alice.sender()), Some(profile.id()));
//! assert_eq!(events.len(), 3);
//! ```

pub mod config;
pub mod container;
pub mod env;
pub mod error;
pub mod folio;
pub mod telemetry;

pub use config::FolioConfig;
pub use container::{Folder, Profile};
pub use env::{CallContext, IdAllocator, RandomIdAllocator, SequentialIdAllocator};
pub use error::{SdkError, SdkResult};
pub use folio::{Folio, FolioBuilder};
pub use telemetry::init_tracing;

// Re-export key types
pub use folio_events::{Event, EventFilter, EventKind, EventRecord, EventSink, InMemoryEventLog};
pub use folio_registry::{InMemoryRegistry, Registry, RegistryError};
pub use folio_store::{AmountOf, Attachment, AttachmentSet, Balance, Coin, CoinType, StoreError};
pub use folio_types::{ObjectId, Owner, TypeTag};
