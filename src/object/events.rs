//! Removal notification registry
//!
//! The destruction engine applies voxel removal asynchronously and reports
//! each applied result through the owning object's [`RemovalEvents`].
//! Subscribers receive notices through a FIFO inbox rather than a callback,
//! so handling runs on the subscriber's own schedule within the frame and
//! no notice is ever lost to coalescing.

use std::sync::mpsc::{Receiver, Sender, channel};

/// One removal result reported by the destruction engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalNotice {
    /// Number of voxels the destructive edit removed
    pub removed: u32,
    /// Frame the result was applied on
    pub frame: u64,
}

/// Identity of one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a subscription
#[derive(Debug)]
pub struct RemovalSubscription {
    id: SubscriptionId,
    inbox: Receiver<RemovalNotice>,
}

impl RemovalSubscription {
    /// Identity to pass back to [`RemovalEvents::unsubscribe`]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take the next undelivered notice, oldest first
    pub fn poll(&self) -> Option<RemovalNotice> {
        self.inbox.try_recv().ok()
    }
}

/// Registry of removal subscribers, owned by the destructible object side
#[derive(Debug, Default)]
pub struct RemovalEvents {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Sender<RemovalNotice>)>,
}

impl RemovalEvents {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and hand back its inbox
    pub fn subscribe(&mut self) -> RemovalSubscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = channel();
        self.subscribers.push((id, tx));
        RemovalSubscription { id, inbox: rx }
    }

    /// Remove a subscription; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Report a removal result to every subscriber
    ///
    /// Subscriptions whose inbox has been dropped are pruned here.
    pub fn emit(&mut self, notice: RemovalNotice) {
        self.subscribers.retain(|(_, tx)| tx.send(notice).is_ok());
    }
}
