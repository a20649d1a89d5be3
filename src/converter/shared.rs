use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub trait AmountObserver {
    fn on_amount_changed(&self, value: f64);
}

struct SharedAmountCell {
    value: Cell<f64>,
    observers: RefCell<Vec<Weak<dyn AmountObserver>>>,
}

/// Base amount shared by every entry of a table.
///
/// Cloning gives another handle on the same cell. Observers are held weakly so
/// that dropping an entry is enough to unsubscribe it.
#[derive(Clone)]
pub struct SharedAmount {
    cell: Rc<SharedAmountCell>,
}

impl SharedAmount {
    pub fn new(value: f64) -> Self {
        Self {
            cell: Rc::new(SharedAmountCell {
                value: Cell::new(value),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn read(&self) -> f64 {
        self.cell.value.get()
    }

    /// Every write notifies every observer, even when the value is unchanged.
    pub fn write(&self, value: f64) {
        debug_assert!(value.is_finite() && value >= 0.0);
        self.cell.value.set(value);

        // snapshot, observers may subscribe or drop while being notified
        let observers = self
            .cell
            .observers
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect::<Vec<_>>();
        debug!("shared amount {} notify {} observers", value, observers.len());
        for observer in observers {
            observer.on_amount_changed(value);
        }

        self.cell
            .observers
            .borrow_mut()
            .retain(|observer| observer.strong_count() > 0);
    }

    pub fn subscribe(&self, observer: Weak<dyn AmountObserver>) {
        self.cell.observers.borrow_mut().push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.cell
            .observers
            .borrow()
            .iter()
            .filter(|observer| observer.strong_count() > 0)
            .count()
    }

    pub fn same_cell(&self, other: &SharedAmount) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl std::fmt::Debug for SharedAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedAmount")
            .field("value", &self.read())
            .field("observers", &self.observer_count())
            .finish()
    }
}
