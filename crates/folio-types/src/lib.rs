//! Foundation types for Folio.
//!
//! This crate provides the identity and type-descriptor primitives shared by
//! every other Folio crate.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Globally unique container identity (profiles and folders)
//! - [`Owner`] — Opaque external caller identity
//! - [`TypeTag`] — Fully-qualified value-type descriptor used as a map key

pub mod error;
pub mod object;
pub mod owner;
pub mod tag;

pub use error::TypeError;
pub use object::ObjectId;
pub use owner::Owner;
pub use tag::{is_valid_type_name, TypeTag};
