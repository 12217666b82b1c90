use std::any::{type_name, Any};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use folio_types::TypeTag;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A value that can be attached to a container, one per type tag.
///
/// `merge` is the combiner used when an attachment with the same tag is
/// already present. It must leave `self` untouched when it returns an error.
pub trait Attachment: Any + Clone + Send + Sync + fmt::Debug {
    /// The descriptor this attachment is stored under.
    fn type_tag() -> TypeTag;

    /// Amount carried by the attachment, readable without knowing its type.
    fn value(&self) -> u64;

    /// Fold `incoming` into `self`.
    fn merge(&mut self, incoming: Self) -> StoreResult<()>;
}

/// Object-safe view of an [`Attachment`] used for storage.
trait ErasedAttachment: Send + Sync + fmt::Debug {
    fn value(&self) -> u64;
    fn rust_type(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_box(&self) -> Box<dyn ErasedAttachment>;
}

impl<A: Attachment> ErasedAttachment for A {
    fn value(&self) -> u64 {
        Attachment::value(self)
    }

    fn rust_type(&self) -> &'static str {
        type_name::<A>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn ErasedAttachment> {
        Box::new(self.clone())
    }
}

/// Heterogeneous, type-indexed set of attachments owned by one container.
///
/// Entries are stored type-erased and keyed by [`TypeTag`]. Typed accessors
/// resolve an entry by the tag of the requested type and downcast it.
/// Entries are never removed.
#[derive(Default)]
pub struct AttachmentSet {
    entries: BTreeMap<TypeTag, Box<dyn ErasedAttachment>>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an attachment is stored under `A`'s tag.
    pub fn exists<A: Attachment>(&self) -> bool {
        self.contains_tag(&A::type_tag())
    }

    pub fn contains_tag(&self, tag: &TypeTag) -> bool {
        self.entries.contains_key(tag)
    }

    /// Borrow the attachment stored under `A`'s tag.
    ///
    /// Returns `None` when nothing is stored there or when the stored value
    /// is a different Rust type that happens to share the tag.
    pub fn get<A: Attachment>(&self) -> Option<&A> {
        self.entries
            .get(&A::type_tag())?
            .as_any()
            .downcast_ref::<A>()
    }

    /// Merge-or-insert: attach `incoming` if its tag is absent, otherwise
    /// merge it into the attachment already present.
    ///
    /// On error the set is unchanged.
    pub fn insert_or_merge<A: Attachment>(&mut self, incoming: A) -> StoreResult<&A> {
        match self.entries.entry(A::type_tag()) {
            Entry::Vacant(slot) => {
                debug!(tag = %slot.key(), value = Attachment::value(&incoming), "attachment inserted");
                let tag = slot.key().clone();
                let stored = slot.insert(Box::new(incoming) as Box<dyn ErasedAttachment>);
                // Always `A`: it was inserted on the line above.
                let inserted = downcast_entry::<A>(&tag, stored)?;
                Ok(&*inserted)
            }
            Entry::Occupied(slot) => {
                let tag = slot.key().clone();
                let current = downcast_entry::<A>(&tag, slot.into_mut())?;
                current.merge(incoming)?;
                debug!(%tag, value = Attachment::value(&*current), "attachment merged");
                Ok(&*current)
            }
        }
    }

    /// Amount stored under `tag`, or 0 when absent.
    pub fn value_of(&self, tag: &TypeTag) -> u64 {
        self.entries.get(tag).map_or(0, |entry| entry.value())
    }

    /// Tags present in the set, in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = &TypeTag> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point-in-time copy of every tag and its amount.
    pub fn snapshot(&self) -> BTreeMap<TypeTag, u64> {
        self.entries
            .iter()
            .map(|(tag, entry)| (tag.clone(), entry.value()))
            .collect()
    }
}

/// Resolve a stored entry as `A`, or report which type actually holds the tag.
fn downcast_entry<'a, A: Attachment>(
    tag: &TypeTag,
    stored: &'a mut Box<dyn ErasedAttachment>,
) -> StoreResult<&'a mut A> {
    let found = stored.rust_type();
    stored
        .as_any_mut()
        .downcast_mut::<A>()
        .ok_or_else(|| StoreError::TypeMismatch {
            tag: tag.clone(),
            expected: type_name::<A>(),
            found,
        })
}

impl Clone for AttachmentSet {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(tag, entry)| (tag.clone(), entry.clone_box()))
                .collect(),
        }
    }
}

impl fmt::Debug for AttachmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(tag, entry)| (tag, entry.value())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps the largest value seen.
    #[derive(Clone, Debug, PartialEq)]
    struct HighWater(u64);

    impl Attachment for HighWater {
        fn type_tag() -> TypeTag {
            TypeTag::from_static("tests::marks::HighWater")
        }

        fn value(&self) -> u64 {
            self.0
        }

        fn merge(&mut self, incoming: Self) -> StoreResult<()> {
            self.0 = self.0.max(incoming.0);
            Ok(())
        }
    }

    /// Counts merges.
    #[derive(Clone, Debug, PartialEq)]
    struct Visits(u64);

    impl Attachment for Visits {
        fn type_tag() -> TypeTag {
            TypeTag::from_static("tests::marks::Visits")
        }

        fn value(&self) -> u64 {
            self.0
        }

        fn merge(&mut self, incoming: Self) -> StoreResult<()> {
            self.0 += incoming.0;
            Ok(())
        }
    }

    /// Claims the same tag as `Visits`.
    #[derive(Clone, Debug)]
    struct Impostor;

    impl Attachment for Impostor {
        fn type_tag() -> TypeTag {
            Visits::type_tag()
        }

        fn value(&self) -> u64 {
            u64::MAX
        }

        fn merge(&mut self, _incoming: Self) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_set_reports_absence() {
        let set = AttachmentSet::new();
        assert!(set.is_empty());
        assert!(!set.exists::<HighWater>());
        assert!(set.get::<HighWater>().is_none());
        assert_eq!(set.value_of(&HighWater::type_tag()), 0);
    }

    #[test]
    fn first_write_inserts() {
        let mut set = AttachmentSet::new();
        let stored = set.insert_or_merge(HighWater(4)).unwrap();
        assert_eq!(stored, &HighWater(4));
        assert!(set.exists::<HighWater>());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn later_writes_use_the_attachment_merge() {
        let mut set = AttachmentSet::new();
        set.insert_or_merge(HighWater(4)).unwrap();
        set.insert_or_merge(HighWater(2)).unwrap();
        assert_eq!(set.get::<HighWater>(), Some(&HighWater(4)));

        set.insert_or_merge(Visits(1)).unwrap();
        set.insert_or_merge(Visits(1)).unwrap();
        assert_eq!(set.get::<Visits>(), Some(&Visits(2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn returned_reference_reflects_the_write() {
        let mut set = AttachmentSet::new();
        assert_eq!(set.insert_or_merge(Visits(2)).unwrap(), &Visits(2));
        assert_eq!(set.insert_or_merge(Visits(3)).unwrap(), &Visits(5));
    }

    #[test]
    fn types_do_not_interfere() {
        let mut set = AttachmentSet::new();
        set.insert_or_merge(Visits(9)).unwrap();
        assert!(!set.exists::<HighWater>());
        set.insert_or_merge(HighWater(1)).unwrap();
        assert_eq!(set.get::<Visits>(), Some(&Visits(9)));
    }

    #[test]
    fn tag_collision_is_rejected_without_change() {
        let mut set = AttachmentSet::new();
        set.insert_or_merge(Visits(3)).unwrap();

        let err = set.insert_or_merge(Impostor).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));
        assert_eq!(set.get::<Visits>(), Some(&Visits(3)));
        assert!(set.get::<Impostor>().is_none());
        // Reads by descriptor still see the stored entry.
        assert!(set.exists::<Impostor>());
    }

    #[test]
    fn snapshot_and_tags_are_ordered() {
        let mut set = AttachmentSet::new();
        set.insert_or_merge(Visits(5)).unwrap();
        set.insert_or_merge(HighWater(7)).unwrap();

        let tags: Vec<&str> = set.tags().map(TypeTag::as_str).collect();
        assert_eq!(tags, ["tests::marks::HighWater", "tests::marks::Visits"]);

        let snap = set.snapshot();
        assert_eq!(snap[&HighWater::type_tag()], 7);
        assert_eq!(snap[&Visits::type_tag()], 5);
    }

    #[test]
    fn clone_is_deep() {
        let mut set = AttachmentSet::new();
        set.insert_or_merge(Visits(1)).unwrap();
        let copy = set.clone();
        set.insert_or_merge(Visits(1)).unwrap();
        assert_eq!(copy.get::<Visits>(), Some(&Visits(1)));
        assert_eq!(set.get::<Visits>(), Some(&Visits(2)));
    }

    #[test]
    fn debug_lists_values() {
        let mut set = AttachmentSet::new();
        set.insert_or_merge(Visits(12)).unwrap();
        let debug = format!("{set:?}");
        assert!(debug.contains("tests::marks::Visits"));
        assert!(debug.contains("12"));
    }
}
