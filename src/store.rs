//! Single-writer value cell with change notification.
//!
//! Readers either take a snapshot (`get`) or register an observer.  `set`
//! replaces the whole value, releases the borrow, then notifies observers
//! with the new value, so an observer may read or even write the cell again.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_id: u64,
}

pub struct Observable<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Default + Clone> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    /// Replace the value wholesale and notify every observer.
    pub fn set(&self, value: T) {
        let (snapshot, observers) = {
            let mut slot = self.slot.borrow_mut();
            slot.value = value;
            let observers: Vec<Observer<T>> = slot.observers.iter().map(|(_, f)| Rc::clone(f)).collect();
            (slot.value.clone(), observers)
        };
        for observer in observers {
            observer(&snapshot);
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> SubscriptionId {
        let mut slot = self.slot.borrow_mut();
        let id = SubscriptionId(slot.next_id);
        slot.next_id += 1;
        slot.observers.push((id, Rc::new(observer)));
        id
    }

    /// Returns false when the id was not (or no longer) registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut slot = self.slot.borrow_mut();
        let before = slot.observers.len();
        slot.observers.retain(|(sid, _)| *sid != id);
        slot.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.slot.borrow().observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_replaces_and_notifies_every_observer() {
        let cell = Observable::new(String::from("a"));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s1 = Rc::clone(&seen);
        cell.subscribe(move |v: &String| s1.borrow_mut().push(format!("1:{}", v)));
        let s2 = Rc::clone(&seen);
        cell.subscribe(move |v: &String| s2.borrow_mut().push(format!("2:{}", v)));

        cell.set("b".into());

        assert_eq!(cell.get(), "b");
        assert_eq!(*seen.borrow(), vec!["1:b".to_string(), "2:b".to_string()]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let cell = Observable::new(0u32);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = cell.subscribe(move |_| h.set(h.get() + 1));

        cell.set(1);
        assert!(cell.unsubscribe(id));
        assert!(!cell.unsubscribe(id));
        cell.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(cell.observer_count(), 0);
    }

    #[test]
    fn observers_may_read_the_cell_during_notification() {
        let cell = Observable::new(1i32);
        let reader = cell.clone();
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        cell.subscribe(move |_| s.set(reader.get()));

        cell.set(7);

        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn clones_share_the_same_value() {
        let a = Observable::new(vec![1]);
        let b = a.clone();
        b.set(vec![1, 2]);
        assert_eq!(a.with(|v| v.len()), 2);
    }
}
