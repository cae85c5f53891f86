//! Typed Event Channels
//!
//! Each emitting component owns one [`EventChannel`] for its own event type and
//! hands it out for subscription. There is no global bus.
//!
//! Delivery is synchronous: [`EventChannel::emit`] returns only after every
//! subscriber has seen the event, in registration order. Two subscriber
//! flavours exist:
//! - callbacks (`FnMut(&E)`), invoked inline;
//! - queues ([`flume::Receiver`]), for subscribers that need `&mut` access to
//!   state the callback could not borrow. The event is enqueued inline; the
//!   subscriber drains it on its own schedule.

use flume::{Receiver, Sender};

/// Identifies a subscription so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

enum Subscriber<E> {
    Callback(Box<dyn FnMut(&E)>),
    Queue(Sender<E>),
}

pub struct EventChannel<E> {
    subscribers: Vec<(SubscriptionId, Subscriber<E>)>,
    next_id: u64,
    emitted: u64,
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventChannel<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            emitted: 0,
        }
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a callback invoked for every subsequent event.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = self.allocate_id();
        self.subscribers
            .push((id, Subscriber::Callback(Box::new(callback))));
        id
    }

    /// Registers a queue subscriber and returns its receiving end.
    ///
    /// Dropping the receiver unsubscribes on the next emit.
    pub fn channel(&mut self) -> Receiver<E> {
        let (tx, rx) = flume::unbounded();
        let id = self.allocate_id();
        self.subscribers.push((id, Subscriber::Queue(tx)));
        rx
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Total number of events emitted on this channel.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl<E: Clone> EventChannel<E> {
    /// Delivers `event` to every subscriber before returning.
    pub fn emit(&mut self, event: E) {
        self.emitted += 1;
        self.subscribers.retain_mut(|(_, subscriber)| match subscriber {
            Subscriber::Callback(callback) => {
                callback(&event);
                true
            }
            // A disconnected receiver means the subscriber is gone.
            Subscriber::Queue(tx) => tx.send(event.clone()).is_ok(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<u32>::new();

        let first = Rc::clone(&log);
        channel.subscribe(move |e| first.borrow_mut().push(("a", *e)));
        let rx = channel.channel();
        let second = Rc::clone(&log);
        channel.subscribe(move |e| second.borrow_mut().push(("b", *e)));

        channel.emit(7);

        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
        assert_eq!(rx.try_recv().ok(), Some(7));
        assert_eq!(channel.emitted(), 1);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut channel = EventChannel::<u32>::new();
        let rx = channel.channel();
        assert_eq!(channel.subscriber_count(), 1);
        drop(rx);
        channel.emit(1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hits = Rc::new(RefCell::new(0));
        let mut channel = EventChannel::<()>::new();
        let counter = Rc::clone(&hits);
        let id = channel.subscribe(move |_| *counter.borrow_mut() += 1);

        channel.emit(());
        assert!(channel.unsubscribe(id));
        channel.emit(());

        assert_eq!(*hits.borrow(), 1);
        assert!(!channel.unsubscribe(id));
    }
}
