use std::{
    sync::{
        mpsc::{channel, Receiver, Sender},
        Arc, RwLock,
    },
    thread,
};

use crate::model::Collection;

/// Fired after every committed mutation so consumers can re-fetch instead
/// of polling on a timer. Seed writes do not notify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    pub id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Fan-out channel owned by the store. Dropped receivers are lazily
/// cleaned up on the next notify.
#[derive(Clone, Default)]
pub struct ChangeBus {
    senders: Arc<RwLock<Vec<Sender<StoreEvent>>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn notify(&self, collection: Collection, kind: ChangeKind, id: &str) {
        let event = StoreEvent {
            collection,
            kind,
            id: id.to_string(),
        };
        let mut senders = self.senders.write().unwrap();
        senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn observer(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel();
        self.senders.write().unwrap().push(tx);
        rx
    }

    pub fn observe(&self, mut callback: impl FnMut(StoreEvent) + Send + 'static) {
        let rx = self.observer();
        thread::spawn(move || {
            rx.iter().for_each(|e| callback(e));
        });
    }
}
