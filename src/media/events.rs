// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media lifecycle events and listener subscriptions.
//!
//! A surface owns an `EventHub`. Each `subscribe()` call hands out a
//! `Subscription` that queues every event emitted afterwards until it is
//! dropped, at which point it is detached from the hub.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

/// Lifecycle event emitted by a media surface.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata is ready; `duration` is infinite for unbounded sources.
    LoadedMetadata { duration: f64 },
    TimeUpdate { position: f64 },
    Play,
    Pause,
    Failed(String),
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    queues: HashMap<u64, VecDeque<MediaEvent>>,
}

/// Single-threaded event fan-out.
#[derive(Debug, Clone, Default)]
pub struct EventHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.queues.insert(id, VecDeque::new());
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Queue `event` for every attached subscription.
    pub fn emit(&self, event: MediaEvent) {
        let mut listeners = self.listeners.borrow_mut();
        for queue in listeners.queues.values_mut() {
            queue.push_back(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().queues.len()
    }
}

/// Attached listener. Detaches from its hub when dropped.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Take all queued events in emission order.
    pub fn drain(&self) -> Vec<MediaEvent> {
        let Some(listeners) = self.listeners.upgrade() else {
            return Vec::new();
        };
        let mut listeners = listeners.borrow_mut();
        listeners
            .queues
            .get_mut(&self.id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().queues.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_receives_events_after_subscribe() {
        let hub = EventHub::new();
        hub.emit(MediaEvent::Play);

        let subscription = hub.subscribe();
        hub.emit(MediaEvent::TimeUpdate { position: 1.0 });
        hub.emit(MediaEvent::Pause);

        assert_eq!(
            subscription.drain(),
            vec![MediaEvent::TimeUpdate { position: 1.0 }, MediaEvent::Pause]
        );
        assert!(subscription.drain().is_empty());
    }

    #[test]
    fn test_drop_detaches() {
        let hub = EventHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();
        assert_eq!(hub.listener_count(), 2);

        drop(first);
        assert_eq!(hub.listener_count(), 1);

        hub.emit(MediaEvent::Play);
        assert_eq!(second.drain(), vec![MediaEvent::Play]);
    }

    #[test]
    fn test_detaches_during_unwind() {
        let hub = EventHub::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _subscription = hub.subscribe();
            panic!("teardown");
        }));
        assert!(result.is_err());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_hub() {
        let hub = EventHub::new();
        let subscription = hub.subscribe();
        drop(hub);
        assert!(subscription.drain().is_empty());
    }
}
