//! Owner registry for Folio.
//!
//! The registry maps each owner to the one profile it registered. It is the
//! only globally shared mutable state in the system and is passed around
//! explicitly rather than living in a process-wide singleton.
//!
//! # Rules
//!
//! - An owner appears at most once.
//! - Registrations are permanent: there is no update or removal.
//! - Reads never fail; an unknown owner simply has no registration.
//!
//! # Modules
//!
//! - [`error`] — [`RegistryError`]
//! - [`traits`] — The [`Registry`] trait and [`Registration`] record
//! - [`memory`] — [`InMemoryRegistry`]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{RegistryError, Result};
pub use memory::InMemoryRegistry;
pub use traits::{Registration, Registry};
