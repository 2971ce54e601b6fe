use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::rc::Rc;

use log::trace;

pub type SubscriptionId = u64;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: SubscriptionId,
    by_id: BTreeMap<SubscriptionId, Listener<T>>,
}

/// Single-threaded broadcast channel, split into a sending and a subscribing
/// half that share one listener table.
pub struct Channel;

impl Channel {
    pub fn new<T: Debug>() -> (EventEmitter<T>, EventObserver<T>) {
        let listeners = Rc::new(RefCell::new(Listeners {
            next_id: 0,
            by_id: BTreeMap::new(),
        }));
        (
            EventEmitter {
                listeners: Rc::clone(&listeners),
            },
            EventObserver { listeners },
        )
    }
}

pub struct EventEmitter<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: Debug> EventEmitter<T> {
    /// Listeners run in subscription order. The table is snapshotted first so
    /// a listener may subscribe or unsubscribe while being called.
    pub fn emit(&self, event: &T) {
        let snapshot: Vec<Listener<T>> = self.listeners.borrow().by_id.values().cloned().collect();
        trace!(target: "events", "Emitting to {} listeners: {:?}", snapshot.len(), event);
        for listener in snapshot {
            listener(event);
        }
    }
}

pub struct EventObserver<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.by_id.insert(id, Rc::new(callback));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().by_id.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().by_id.len()
    }
}
