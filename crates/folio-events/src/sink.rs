use std::sync::Arc;

use tracing::info;

use crate::event::Event;

/// Destination for state-transition notifications.
///
/// Emission is fire-and-forget: a sink never reports failure to the
/// operation that produced the event.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Writes every event as a structured `tracing` record at INFO level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match &event {
            Event::ProfileCreated { profile, owner } => {
                info!(kind = %event.kind(), %profile, %owner, "folio event");
            }
            Event::FolderCreated { folder, owner } => {
                info!(kind = %event.kind(), %folder, %owner, "folio event");
            }
            Event::ValueDeposited {
                folder,
                coin_type,
                amount,
                new_balance,
            } => {
                info!(
                    kind = %event.kind(),
                    %folder,
                    %coin_type,
                    amount,
                    new_balance,
                    "folio event"
                );
            }
        }
    }
}

/// Forwards each event to every inner sink, in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone());
        }
    }
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
