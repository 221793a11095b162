//! Change notification bus.
//!
//! Presentation shells observe the store through a publish/subscribe bus
//! built on [`tokio::sync::broadcast`]. Sending never blocks and needs no
//! runtime, and receivers can be drained synchronously with
//! [`try_recv`](broadcast::Receiver::try_recv), so the bus fits the store's
//! single-threaded model.
//!
//! Events are wrapped in [`Arc`] so broadcasting to several subscribers does
//! not clone the payload.
//!
//! ```rust
//! # use skilltrack_core::events::{ChangeBus, StoreEvent};
//! let bus = ChangeBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(StoreEvent::Reset { count: 25 });
//!
//! let event = rx.try_recv().unwrap();
//! assert!(matches!(*event, StoreEvent::Reset { count: 25 }));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::model::{Category, SkillId};

/// Default channel capacity used by [`SkillStore`](crate::SkillStore).
pub const DEFAULT_CAPACITY: usize = 64;

/// A state change published after the store has applied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// A skill's completion flag flipped.
    SkillToggled {
        id: SkillId,
        /// The new completion state.
        completed: bool,
    },

    /// A skill was appended to the list.
    SkillAdded { id: SkillId },

    /// A skill was removed from the list.
    SkillDeleted { id: SkillId },

    /// The category filter changed. `None` means no filter.
    FilterChanged { category: Option<Category> },

    /// The list was replaced by the default seed list.
    Reset {
        /// Number of skills after the reset.
        count: usize,
    },
}

/// Publish/subscribe bus for [`StoreEvent`]s.
///
/// Cheaply cloneable; clones share the same channel.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<Arc<StoreEvent>>,
}

impl ChangeBus {
    /// Create a bus with the given channel capacity.
    ///
    /// A subscriber that falls more than `capacity` events behind gets
    /// [`broadcast::error::TryRecvError::Lagged`] on its next receive.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all current subscribers and return how many will
    /// observe it. No subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) -> usize {
        match self.sender.send(Arc::new(event)) {
            Ok(n) => {
                tracing::trace!(receivers = n, "store event published");
                n
            }
            Err(_) => {
                tracing::trace!("store event published but no active receivers");
                0
            }
        }
    }

    /// Create a subscriber that receives all future events. Earlier events
    /// are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<StoreEvent>> {
        tracing::trace!("new store subscriber created");
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
