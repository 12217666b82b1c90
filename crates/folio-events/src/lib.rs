//! Notifications for Folio state transitions.
//!
//! Every successful registration, folder creation, and deposit produces one
//! [`Event`], emitted after the mutation it describes. Sinks are
//! fire-and-forget: an operation never fails because of its notification.
//!
//! - [`EventSink`] — the emission capability the core depends on
//! - [`InMemoryEventLog`] — append-only log with filtering and subscriptions
//! - [`TracingSink`] — structured `tracing` output
//! - [`FanoutSink`] — delivers to several sinks

pub mod event;
pub mod log;
pub mod sink;

pub use event::{Event, EventId, EventKind, EventRecord};
pub use log::{EventFilter, EventStream, InMemoryEventLog, DEFAULT_CHANNEL_CAPACITY};
pub use sink::{EventSink, FanoutSink, TracingSink};
