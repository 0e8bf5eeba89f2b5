//! Change notifications from the data store to the views built on it.
//!
//! Views subscribe once and rebuild whatever depends on a resource when its
//! tag arrives. Dropping the receiver is the only way to unsubscribe.

use log::debug;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Mutex, PoisonError};
use strum_macros::{AsRefStr, EnumIter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ResourceTag {
    JournalEntries,
    Goals,
}

#[derive(Debug, Default)]
pub struct InvalidationBus {
    subscribers: Mutex<Vec<Sender<ResourceTag>>>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<ResourceTag> {
        let (tx, rx) = channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Sends `tag` to every live subscriber and forgets the ones that hung up.
    /// Returns how many subscribers received it.
    pub fn publish(&self, tag: ResourceTag) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(tag).is_ok());
        debug!(
            "event=invalidate module=events resource={} delivered={}",
            tag.as_ref(),
            subscribers.len()
        );
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
