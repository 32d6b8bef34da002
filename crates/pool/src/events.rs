//! Event broadcasting for pool observability.
//!
//! Provides [`PoolEvent`] variants emitted after each successful state change
//! and an [`EventBus`] backed by `tokio::sync::broadcast`.

use ido_core::{AccountId, Amount};
use tokio::sync::broadcast;

use crate::config::PoolConfig;

// ---------------------------------------------------------------------------
// PoolEvent
// ---------------------------------------------------------------------------

/// Events emitted by an [`AllocationPool`](crate::AllocationPool).
///
/// Only successful operations emit; a rejected call leaves no trace here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    /// A configuration was installed or replaced.
    Configured {
        /// The new configuration.
        config: PoolConfig,
    },
    /// An account joined the whitelist.
    WhitelistAdded {
        /// The account.
        account: AccountId,
    },
    /// An account left the whitelist.
    WhitelistRemoved {
        /// The account.
        account: AccountId,
    },
    /// A per-user cap was set or overwritten.
    UserAllocationSet {
        /// The account.
        account: AccountId,
        /// The new cap.
        cap: Amount,
    },
    /// The pool cap changed.
    MaxPoolAllocationChanged {
        /// Cap before the change.
        previous: Amount,
        /// Cap after the change.
        current: Amount,
    },
    /// A participant joined.
    Joined {
        /// The participant.
        participant: AccountId,
        /// Amount of this join.
        amount: Amount,
        /// Participant's cumulative commitment after the join.
        cumulative: Amount,
        /// Pool-wide committed total after the join.
        total_committed: Amount,
    },
    /// Ownership moved to another account.
    OwnershipTransferred {
        /// Former owner.
        previous: AccountId,
        /// New owner.
        current: AccountId,
    },
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Broadcast-based event bus for pool events.
///
/// Emission is fire-and-forget: if no subscribers are listening or the
/// channel is full, events are dropped (no backpressure on the pool).
pub struct EventBus {
    sender: broadcast::Sender<PoolEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer size.
    ///
    /// Subscribers that fall more than `buffer_size` events behind receive
    /// `Lagged` and skip ahead.
    ///
    /// # Panics
    /// Panics if `buffer_size` is zero.
    #[must_use]
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Emit an event to all current subscribers.
    pub fn emit(&self, event: PoolEvent) {
        // no receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribe to events emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PoolEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new(16);
        bus.emit(PoolEvent::WhitelistAdded {
            account: AccountId::from_seed(1),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_emitted_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(PoolEvent::MaxPoolAllocationChanged {
            previous: 1_000,
            current: 1_500,
        });

        let event = rx.recv().await.expect("should receive event");
        assert_eq!(
            event,
            PoolEvent::MaxPoolAllocationChanged {
                previous: 1_000,
                current: 1_500,
            }
        );
    }

    #[tokio::test]
    async fn multiple_subscribers_all_receive() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(PoolEvent::WhitelistRemoved {
            account: AccountId::from_seed(2),
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();

        assert!(matches!(e1, PoolEvent::WhitelistRemoved { .. }));
        assert!(matches!(e2, PoolEvent::WhitelistRemoved { .. }));
    }
}
