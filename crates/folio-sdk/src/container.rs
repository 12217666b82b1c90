use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use folio_store::{AttachmentSet, CoinType};
use folio_types::{ObjectId, TypeTag};

/// An owner's root container.
///
/// `folders` only grows: the sole mutation is the append performed by
/// [`Folio::create_folder`](crate::Folio::create_folder). The folders
/// themselves are separate entities referenced by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ObjectId,
    name: String,
    description: String,
    folders: Vec<ObjectId>,
}

impl Profile {
    pub(crate) fn new(id: ObjectId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            folders: Vec::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Folder ids in creation order.
    pub fn folders(&self) -> &[ObjectId] {
        &self.folders
    }

    pub(crate) fn append_folder(&mut self, folder: ObjectId) {
        self.folders.push(folder);
    }
}

/// A sub-container holding typed balances.
#[derive(Clone, Debug)]
pub struct Folder {
    id: ObjectId,
    name: String,
    description: String,
    attachments: AttachmentSet,
}

impl Folder {
    pub(crate) fn new(id: ObjectId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            attachments: AttachmentSet::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The `T` balance, or 0 if this folder never received `T`.
    pub fn balance_of<T: CoinType>(&self) -> u64 {
        folio_store::balance_of::<T>(&self.attachments)
    }

    pub fn exists<T: CoinType>(&self) -> bool {
        folio_store::exists::<T>(&self.attachments)
    }

    /// Every balance held, by type tag.
    pub fn balances(&self) -> BTreeMap<TypeTag, u64> {
        self.attachments.snapshot()
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    pub(crate) fn attachments_mut(&mut self) -> &mut AttachmentSet {
        &mut self.attachments
    }
}
