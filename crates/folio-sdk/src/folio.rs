use std::sync::Arc;

use tracing::{debug, info};

use folio_events::{Event, EventSink, FanoutSink, InMemoryEventLog, TracingSink};
use folio_registry::{InMemoryRegistry, Registry};
use folio_store::{Coin, CoinType};
use folio_types::{ObjectId, Owner};

use crate::config::FolioConfig;
use crate::container::{Folder, Profile};
use crate::env::{CallContext, IdAllocator, RandomIdAllocator};
use crate::error::SdkResult;

/// Entry point for every Folio operation.
///
/// A `Folio` owns the shared registry and the injected capabilities. Profiles
/// and folders are *not* held here: they belong to the caller, who passes
/// them back in by reference. Operations on the same folder or profile must
/// be serialized by the caller.
pub struct Folio {
    config: FolioConfig,
    registry: Arc<dyn Registry>,
    events: Arc<dyn EventSink>,
    ids: Arc<dyn IdAllocator>,
}

impl Folio {
    /// Start building a `Folio` with in-memory defaults.
    pub fn builder(config: FolioConfig) -> FolioBuilder {
        FolioBuilder {
            config,
            registry: None,
            events: None,
            ids: None,
        }
    }

    /// A self-contained instance that records events in memory and mirrors
    /// them to `tracing`.
    pub fn in_memory(config: FolioConfig) -> SdkResult<(Self, Arc<InMemoryEventLog>)> {
        let log = Arc::new(InMemoryEventLog::with_channel_capacity(
            config.event_channel_capacity,
        ));
        let sink = FanoutSink::new()
            .with(log.clone())
            .with(Arc::new(TracingSink));
        let folio = Self::builder(config).events(Arc::new(sink)).build()?;
        Ok((folio, log))
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }

    /// Register the caller and create their profile.
    ///
    /// Fails with `AlreadyRegistered` if the caller already owns a profile;
    /// in that case no profile is returned and no event is emitted.
    pub fn create_profile(
        &self,
        ctx: &CallContext,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> SdkResult<Profile> {
        let owner = ctx.sender();
        let id = self.ids.next_id();
        self.registry.register(owner, id)?;

        let profile = Profile::new(id, name.into(), description.into());
        info!(%owner, profile = %id, name = profile.name(), "profile created");
        self.events.emit(Event::ProfileCreated { profile: id, owner });
        Ok(profile)
    }

    /// Create a folder owned by `owner` and append it to `profile`.
    ///
    /// `owner` is not checked against the profile's registered owner: any
    /// holder of a profile may create folders for any owner.
    pub fn create_folder(
        &self,
        owner: Owner,
        profile: &mut Profile,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Folder {
        let id = self.ids.next_id();
        let folder = Folder::new(id, name.into(), description.into());
        profile.append_folder(id);

        debug!(%owner, folder = %id, profile = %profile.id(), "folder created");
        self.events.emit(Event::FolderCreated { folder: id, owner });
        folder
    }

    /// Merge `amount` into the folder's `T` balance, creating it on first
    /// deposit. Returns the new balance.
    ///
    /// On error (overflow, or a type tag already bound to another Rust type)
    /// the folder is unchanged and nothing is emitted.
    pub fn deposit<T: CoinType>(&self, folder: &mut Folder, amount: Coin<T>) -> SdkResult<u64> {
        let deposited = amount.value();
        let new_balance = folio_store::deposit(folder.attachments_mut(), amount)?;

        debug!(folder = %folder.id(), coin_type = T::TYPE_NAME, deposited, new_balance, "value deposited");
        self.events.emit(Event::ValueDeposited {
            folder: folder.id(),
            coin_type: T::type_tag(),
            amount: deposited,
            new_balance,
        });
        Ok(new_balance)
    }

    /// The profile registered by `owner`, if any.
    pub fn lookup(&self, owner: &Owner) -> Option<ObjectId> {
        self.registry.lookup(owner)
    }

    pub fn balance_of<T: CoinType>(&self, folder: &Folder) -> u64 {
        folder.balance_of::<T>()
    }

    pub fn exists<T: CoinType>(&self, folder: &Folder) -> bool {
        folder.exists::<T>()
    }
}

impl std::fmt::Debug for Folio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Folio")
            .field("config", &self.config)
            .field("registered", &self.registry.len())
            .finish()
    }
}

/// Assembles a [`Folio`] from injected capabilities.
///
/// Unset parts default to an [`InMemoryRegistry`], a [`TracingSink`], and a
/// [`RandomIdAllocator`] under the configured namespace.
pub struct FolioBuilder {
    config: FolioConfig,
    registry: Option<Arc<dyn Registry>>,
    events: Option<Arc<dyn EventSink>>,
    ids: Option<Arc<dyn IdAllocator>>,
}

impl FolioBuilder {
    pub fn registry(mut self, registry: Arc<dyn Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn ids(mut self, ids: Arc<dyn IdAllocator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> SdkResult<Folio> {
        self.config.validate()?;
        let registry: Arc<dyn Registry> = match self.registry {
            Some(registry) => registry,
            None => Arc::new(InMemoryRegistry::new()),
        };
        let events: Arc<dyn EventSink> = match self.events {
            Some(events) => events,
            None => Arc::new(TracingSink),
        };
        let ids: Arc<dyn IdAllocator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(RandomIdAllocator::new(self.config.id_namespace.clone())),
        };
        Ok(Folio {
            config: self.config,
            registry,
            events,
            ids,
        })
    }
}
