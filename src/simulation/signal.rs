use crate::error::SignalError;
use std::cell::{Cell, RefCell};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Synchronous notification with subscription-order delivery.
///
/// Emitting while a previous emission is still notifying listeners is
/// refused with [`SignalError::Reentrant`] instead of recursing.
pub struct Signal<T> {
    listeners: RefCell<Vec<(ListenerId, Listener<T>)>>,
    next_id: u64,
    dispatching: Cell<bool>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: 0,
            dispatching: Cell::new(false),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.get_mut().push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let listeners = self.listeners.get_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn emit(&self, value: &T) -> Result<(), SignalError> {
        if self.dispatching.replace(true) {
            return Err(SignalError::Reentrant);
        }
        let _guard = DispatchGuard(&self.dispatching);

        let mut listeners = self.listeners.borrow_mut();
        for (_, listener) in listeners.iter_mut() {
            listener(value);
        }
        Ok(())
    }
}

// Clears the dispatching flag on every exit, including a listener panic.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn delivers_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new();

        let first = Rc::clone(&log);
        signal.subscribe(move |v: &u32| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&log);
        signal.subscribe(move |v: &u32| second.borrow_mut().push(("second", *v)));

        signal.emit(&7).unwrap();
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let hits = Rc::new(Cell::new(0));
        let mut signal = Signal::new();
        let counter = Rc::clone(&hits);
        let id = signal.subscribe(move |_: &()| counter.set(counter.get() + 1));

        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.emit(&()).unwrap();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn panicking_listener_does_not_wedge_the_signal() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let calls = Rc::new(Cell::new(0));
        let mut signal = Signal::new();
        let counter = Rc::clone(&calls);
        signal.subscribe(move |v: &u32| {
            counter.set(counter.get() + 1);
            if *v == 0 {
                panic!("listener failed");
            }
        });

        assert!(catch_unwind(AssertUnwindSafe(|| signal.emit(&0))).is_err());
        assert_eq!(signal.emit(&1), Ok(()));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn reentrant_emit_is_refused() {
        let shared: Rc<RefCell<Option<Rc<Signal<u32>>>>> = Rc::new(RefCell::new(None));
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut signal = Signal::new();
        let handle = Rc::clone(&shared);
        let seen = Rc::clone(&results);
        signal.subscribe(move |v: &u32| {
            if let Some(inner) = handle.borrow().as_ref() {
                seen.borrow_mut().push(inner.emit(&(v + 1)));
            }
        });

        let signal = Rc::new(signal);
        *shared.borrow_mut() = Some(Rc::clone(&signal));

        assert_eq!(signal.emit(&1), Ok(()));
        assert_eq!(*results.borrow(), vec![Err(SignalError::Reentrant)]);

        // The guard is released once dispatch finishes.
        assert_eq!(signal.emit(&2), Ok(()));
        shared.borrow_mut().take();
    }
}
