use crate::converter::shared::{AmountObserver, SharedAmount};
use crate::marketdata::Currency;

use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing,
}

impl EditState {
    pub fn begin(self) -> Self {
        EditState::Editing
    }

    pub fn end(self) -> Self {
        EditState::Idle
    }

    // rate updates only reach the display of an idle entry
    pub fn follows_rate(self) -> bool {
        self == EditState::Idle
    }
}

/// Fixed two fraction digits, no grouping.
///
/// Rounding is the one of `std::fmt`: nearest on the exact binary value, ties
/// to even.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Largest amount accepted from the user, still exact to the cent.
pub const MAX_AMOUNT: f64 = 1e15;

/// Decimal text to amount. Anything that is not a number in
/// `0..=MAX_AMOUNT` is rejected.
pub fn parse_amount(text: Option<&str>) -> Option<f64> {
    text.and_then(|text| text.parse::<f64>().ok())
        .filter(|value| (0.0..=MAX_AMOUNT).contains(value))
}

#[derive(Debug)]
pub struct CurrencyEntry {
    currency: Currency,
    name: &'static str,
    rate: Cell<f64>,
    input: RefCell<Option<String>>,
    output: RefCell<Option<String>>,
    state: Cell<EditState>,
    shared: SharedAmount,
}

impl CurrencyEntry {
    pub fn new(currency: Currency, rate: f64, shared: &SharedAmount) -> Rc<Self> {
        debug_assert!(rate.is_finite() && rate > 0.0);
        let entry = Rc::new(Self {
            currency,
            name: currency.name(),
            rate: Cell::new(rate),
            input: RefCell::new(None),
            output: RefCell::new(None),
            state: Cell::new(EditState::Idle),
            shared: shared.clone(),
        });

        let observer: Weak<Self> = Rc::downgrade(&entry);
        shared.subscribe(observer);
        entry.update_(shared.read());
        entry
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn code(&self) -> &'static str {
        self.currency.code()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rate(&self) -> f64 {
        self.rate.get()
    }

    pub fn input(&self) -> Option<String> {
        self.input.borrow().clone()
    }

    pub fn output(&self) -> Option<String> {
        self.output.borrow().clone()
    }

    pub fn state(&self) -> EditState {
        self.state.get()
    }

    pub fn is_editing(&self) -> bool {
        self.state.get() == EditState::Editing
    }

    pub fn on_user_input(&self, text: Option<&str>) {
        *self.input.borrow_mut() = text.map(|text| text.to_string());

        // a tiny rate can push the base amount out of f64 range
        let base = parse_amount(text)
            .map(|value| value / self.rate())
            .filter(|base| base.is_finite());
        match base {
            Some(base) => {
                debug!("{} input {:?} rate {}", self.code(), text, self.rate());
                // notifies this entry as well
                self.shared.write(base);
            }
            None => {
                debug!("{} invalid input {:?}", self.code(), text);
                self.update_(self.shared.read());
            }
        }
    }

    pub fn on_shared_amount_changed(&self, value: f64) {
        self.update_(value);
    }

    pub fn apply_rate_update(&self, rate: f64) {
        debug_assert!(rate.is_finite() && rate > 0.0);
        self.rate.set(rate);
        if self.state.get().follows_rate() {
            self.update_(self.shared.read());
        } else {
            debug!("{} rate {} kept out of display while editing", self.code(), rate);
        }
    }

    pub fn set_editing(&self, editing: bool) {
        let state = self.state.get();
        let next = if editing { state.begin() } else { state.end() };
        self.state.set(next);
    }

    fn update_(&self, value: f64) {
        *self.output.borrow_mut() = Some(format_amount(value * self.rate()));
    }
}

impl AmountObserver for CurrencyEntry {
    fn on_amount_changed(&self, value: f64) {
        self.on_shared_amount_changed(value);
    }
}
