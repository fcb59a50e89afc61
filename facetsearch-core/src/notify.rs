use crate::models::ItemId;
use std::fmt;

/// Change notifications produced by the engine.
/// Each one is emitted only when the underlying value actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An item became visible or hidden
    VisibilityChanged { item: ItemId, visible: bool },
    /// A facet value was switched on or off
    ActiveChanged {
        facet: String,
        value: String,
        active: bool,
    },
    /// The match counts of a facet changed; carries every value's new count
    CountsChanged {
        facet: String,
        counts: Vec<(String, usize)>,
    },
}

/// Receiver of engine notifications
pub trait Listener {
    fn notify(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> Listener for F {
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}

/// Handle returned by [`Notifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Observer registry dispatching events to listeners in subscription order
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(SubscriptionId, Box<dyn Listener>)>,
    next_id: usize,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl Listener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: &Event) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.notify(event);
        }
    }

    /// Dispatch a batch, event-major: every listener sees event N before event N+1
    pub fn emit_all(&mut self, events: &[Event]) {
        for event in events {
            self.emit(event);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn visibility(id: usize, visible: bool) -> Event {
        Event::VisibilityChanged {
            item: ItemId(id),
            visible,
        }
    }

    #[test]
    fn test_listeners_receive_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();

        let first = seen.clone();
        notifier.subscribe(move |e: &Event| first.borrow_mut().push(("first", e.clone())));
        let second = seen.clone();
        notifier.subscribe(move |e: &Event| second.borrow_mut().push(("second", e.clone())));

        notifier.emit_all(&[visibility(0, false), visibility(1, true)]);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], ("first", visibility(0, false)));
        assert_eq!(seen[1], ("second", visibility(0, false)));
        assert_eq!(seen[3], ("second", visibility(1, true)));
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();

        let c = count.clone();
        let id = notifier.subscribe(move |_: &Event| *c.borrow_mut() += 1);
        notifier.emit(&visibility(0, true));

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert!(notifier.is_empty());

        notifier.emit(&visibility(0, false));
        assert_eq!(*count.borrow(), 1);
    }
}
