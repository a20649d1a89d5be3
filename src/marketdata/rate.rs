use crate::alias::Date;
use crate::marketdata::Currency;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    pub currency: Currency,
    pub value: f64,
}

impl Rate {
    #[inline]
    pub fn new(currency: Currency, value: f64) -> Self {
        Self { currency, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateResponse {
    pub base: Currency,
    pub date: Date,
    pub rates: Vec<Rate>,
}

impl RateResponse {
    pub fn new(base: Currency, date: Date, rates: Vec<Rate>) -> Self {
        Self { base, date, rates }
    }
}
