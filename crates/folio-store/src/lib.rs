//! Type-indexed attachment storage for Folio containers.
//!
//! A container (a folder) carries an open-ended set of attachments, at most
//! one per value type. There is no fixed schema: any type implementing
//! [`Attachment`] can be attached, and the set is keyed by the type's
//! [`TypeTag`](folio_types::TypeTag).
//!
//! # Storage Model
//!
//! - [`AttachmentSet`] stores attachments type-erased, keyed by tag, and
//!   resolves them back to their concrete type with a checked downcast.
//! - Writes are merge-or-insert: the first write for a tag inserts, every
//!   later write merges into the existing attachment.
//! - There is no removal. An attachment only moves from absent to present,
//!   and a present balance never decreases.
//!
//! # Value Types
//!
//! - [`CoinType`] marks a fungible value type and names its tag.
//! - [`Coin<T>`] is an amount of `T` in flight.
//! - [`Balance<T>`] is the accumulator attached to a container.

pub mod attachment;
pub mod balance;
pub mod error;

pub use attachment::{Attachment, AttachmentSet};
pub use balance::{balance_of, deposit, exists, AmountOf, Balance, Coin, CoinType};
pub use error::{StoreError, StoreResult};
