use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::debug;

use folio_types::ObjectId;

use crate::event::{Event, EventKind, EventRecord};
use crate::sink::EventSink;

/// Default capacity of per-subscriber broadcast channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Filter for reading or subscribing to a subset of records.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// If set, only records of these kinds match.
    pub kinds: Option<Vec<EventKind>>,
    /// If set, only records about these containers match.
    pub subjects: Option<Vec<ObjectId>>,
    /// If set, only records with a larger sequence number match.
    pub after_seq: Option<u64>,
}

impl EventFilter {
    pub fn kind(kind: EventKind) -> Self {
        Self {
            kinds: Some(vec![kind]),
            ..Self::default()
        }
    }

    pub fn subject(id: ObjectId) -> Self {
        Self {
            subjects: Some(vec![id]),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &EventRecord) -> bool {
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&record.kind()) {
                return false;
            }
        }
        if let Some(ref subjects) = self.subjects {
            if !subjects.contains(&record.event.subject()) {
                return false;
            }
        }
        if let Some(after) = self.after_seq {
            if record.seq <= after {
                return false;
            }
        }
        true
    }
}

/// A broadcast channel receiver for log records.
pub type EventStream = broadcast::Receiver<EventRecord>;

struct Subscriber {
    filter: EventFilter,
    sender: broadcast::Sender<EventRecord>,
}

/// Append-only, in-process event log.
///
/// Stands in for the environment's durable log in tests and embedded use.
/// Records are numbered from 1 in emission order and fanned out to matching
/// subscribers as they are appended.
pub struct InMemoryEventLog {
    records: RwLock<Vec<EventRecord>>,
    subscribers: RwLock<Vec<Subscriber>>,
    channel_capacity: usize,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::with_channel_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// A log whose subscriber channels buffer up to `capacity` records.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn with_channel_capacity(capacity: usize) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            subscribers: RwLock::new(Vec::new()),
            channel_capacity: capacity.max(1),
        }
    }

    /// Copy of every record, in emission order.
    pub fn records(&self) -> Vec<EventRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records matching `filter`, in emission order.
    pub fn filter(&self, filter: &EventFilter) -> Vec<EventRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<EventRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive every record appended from now on that matches `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> EventStream {
        let (sender, receiver) = broadcast::channel(self.channel_capacity);
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber { filter, sender });
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Deliver to matching subscribers, dropping those whose receivers are gone.
    fn route(&self, record: &EventRecord) {
        let mut subs = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        subs.retain(|sub| {
            if sub.filter.matches(record) {
                sub.sender.send(record.clone()).is_ok()
            } else {
                sub.sender.receiver_count() > 0
            }
        });
    }
}

impl Default for InMemoryEventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for InMemoryEventLog {
    fn emit(&self, event: Event) {
        // Routing happens under the append lock so subscribers observe
        // records in sequence order.
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let record = EventRecord::new(records.len() as u64 + 1, event);
        debug!(id = %record.id(), seq = record.seq, kind = %record.kind(), "event recorded");
        self.route(&record);
        records.push(record);
    }
}

impl std::fmt::Debug for InMemoryEventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEventLog")
            .field("records", &self.len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{Owner, TypeTag};
    use tokio::sync::broadcast::error::TryRecvError;

    fn folder(n: u8) -> ObjectId {
        ObjectId::from_raw([n; 32])
    }

    fn created(n: u8) -> Event {
        Event::FolderCreated {
            folder: folder(n),
            owner: Owner::from_raw([0xee; 32]),
        }
    }

    fn deposited(n: u8, amount: u64) -> Event {
        Event::ValueDeposited {
            folder: folder(n),
            coin_type: TypeTag::parse("folio::coin::USD").unwrap(),
            amount,
            new_balance: amount,
        }
    }

    #[test]
    fn records_are_numbered_in_emission_order() {
        let log = InMemoryEventLog::new();
        assert!(log.is_empty());
        log.emit(created(1));
        log.emit(deposited(1, 5));
        log.emit(created(2));

        let records = log.records();
        let seqs: Vec<u64> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert!(records.iter().all(EventRecord::verify_integrity));
        assert_eq!(log.last().map(|r| r.event), Some(created(2)));
    }

    #[test]
    fn filter_by_kind_subject_and_position() {
        let log = InMemoryEventLog::new();
        log.emit(created(1));
        log.emit(deposited(1, 5));
        log.emit(created(2));
        log.emit(deposited(2, 7));

        assert_eq!(log.filter(&EventFilter::kind(EventKind::FolderCreated)).len(), 2);
        assert_eq!(log.filter(&EventFilter::subject(folder(2))).len(), 2);

        let later = EventFilter {
            after_seq: Some(2),
            ..EventFilter::default()
        };
        let seqs: Vec<u64> = log.filter(&later).iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![3, 4]);

        assert_eq!(log.filter(&EventFilter::default()).len(), 4);
    }

    #[test]
    fn subscribers_receive_matching_records() {
        let log = InMemoryEventLog::new();
        let mut deposits = log.subscribe(EventFilter::kind(EventKind::ValueDeposited));
        let mut everything = log.subscribe(EventFilter::default());

        log.emit(created(1));
        log.emit(deposited(1, 9));

        let got = deposits.try_recv().unwrap();
        assert_eq!(got.seq, 2);
        assert_eq!(got.event, deposited(1, 9));
        assert!(matches!(deposits.try_recv(), Err(TryRecvError::Empty)));

        assert_eq!(everything.try_recv().unwrap().seq, 1);
        assert_eq!(everything.try_recv().unwrap().seq, 2);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let log = InMemoryEventLog::new();
        let rx = log.subscribe(EventFilter::default());
        assert_eq!(log.subscriber_count(), 1);
        drop(rx);
        log.emit(created(1));
        assert_eq!(log.subscriber_count(), 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let log = InMemoryEventLog::with_channel_capacity(0);
        let mut rx = log.subscribe(EventFilter::default());
        log.emit(created(1));
        assert_eq!(rx.try_recv().unwrap().seq, 1);
    }
}
