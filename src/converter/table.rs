use crate::alias::Date;
use crate::converter::entry::CurrencyEntry;
use crate::converter::shared::SharedAmount;
use crate::error::Error;
use crate::marketdata::{Currency, Rate, RateResponse};

use log::{debug, info, warn};
use std::collections::HashMap;
use std::rc::Rc;

pub const DEFAULT_AMOUNT: f64 = 100.0;

pub struct ConversionTable {
    shared: SharedAmount,
    entries: Vec<Rc<CurrencyEntry>>,
    focused: Option<usize>,
    as_of: Option<Date>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::with_amount(DEFAULT_AMOUNT)
    }

    pub fn with_amount(amount: f64) -> Self {
        Self {
            shared: SharedAmount::new(amount),
            entries: Vec::new(),
            focused: None,
            as_of: None,
        }
    }

    pub fn shared(&self) -> &SharedAmount {
        &self.shared
    }

    pub fn entries(&self) -> &[Rc<CurrencyEntry>] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Rc<CurrencyEntry>> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_entry(&self) -> Option<&Rc<CurrencyEntry>> {
        self.focused.and_then(|index| self.entries.get(index))
    }

    pub fn base(&self) -> Option<Currency> {
        self.entries.first().map(|entry| entry.currency())
    }

    pub fn as_of(&self) -> Option<Date> {
        self.as_of
    }

    pub fn position(&self, currency: Currency) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.currency() == currency)
    }

    /// First load or merge, depending on whether the table is populated.
    pub fn apply(&mut self, response: &RateResponse) {
        if self.is_empty() {
            self.load_initial(response.base, &response.rates);
        } else if self.base() != Some(response.base) {
            warn!(
                "ignore rates based on {} for a table based on {:?}",
                response.base,
                self.base()
            );
            return;
        } else {
            self.merge_rates(&response.rates);
        }
        self.as_of = Some(response.date);
    }

    pub fn load_initial(&mut self, base: Currency, rates: &[Rate]) {
        if !self.is_empty() {
            warn!(
                "initial load on a table with {} entries ignored",
                self.entries.len()
            );
            return;
        }

        let mut others = rates
            .iter()
            .filter(|rate| rate.currency != base)
            .collect::<Vec<_>>();
        others.sort_by(|left, right| left.currency.code().cmp(right.currency.code()));
        others.dedup_by_key(|rate| rate.currency);

        let mut entries = Vec::with_capacity(others.len() + 1);
        entries.push(CurrencyEntry::new(base, 1.0, &self.shared));
        for rate in others {
            entries.push(CurrencyEntry::new(rate.currency, rate.value, &self.shared));
        }

        self.entries = entries;
        self.focused = None;
        info!(
            "load {} currencies based on {}",
            self.entries.len(),
            base
        );
    }

    pub fn merge_rates(&mut self, rates: &[Rate]) {
        if self.is_empty() {
            warn!("merge of {} rates on an empty table ignored", rates.len());
            return;
        }

        // same rules as the first load: base stays at 1.0, first duplicate wins
        let base = self.base();
        let mut by_currency = HashMap::with_capacity(rates.len());
        for rate in rates.iter().filter(|rate| Some(rate.currency) != base) {
            by_currency.entry(rate.currency).or_insert(rate.value);
        }

        let mut updated = 0;
        for entry in self.entries.iter() {
            if let Some(rate) = by_currency.get(&entry.currency()) {
                entry.apply_rate_update(*rate);
                updated += 1;
            }
        }

        // the set of currencies is fixed by the first load
        for rate in rates {
            if self.position(rate.currency).is_none() {
                debug!("ignore rate for {} not in table", rate.currency);
            }
        }
        debug!("merge {} rates on {} entries", updated, self.entries.len());
    }

    pub fn select_focus(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.entries.len() {
            return Err(Error::new_out_of_range(format!(
                "unable to focus row {} on {} rows",
                index,
                self.entries.len()
            )));
        }

        if let Some(previous) = self.focused_entry() {
            previous.set_editing(false);
        }
        self.focused = Some(index);
        self.entries[index].set_editing(true);
        Ok(())
    }

    pub fn release_focus(&mut self) {
        if let Some(previous) = self.focused_entry() {
            previous.set_editing(false);
        }
        self.focused = None;
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        ConversionTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use assert_float_eq::*;

    fn make_table_() -> ConversionTable {
        let mut table = ConversionTable::new();
        table.load_initial(
            Currency::Eur,
            &[
                Rate::new(Currency::Usd, 1.2),
                Rate::new(Currency::Aud, 1.5),
                Rate::new(Currency::Cad, 2.0),
            ],
        );
        table
    }

    fn codes_(table: &ConversionTable) -> Vec<&'static str> {
        table.entries().iter().map(|entry| entry.code()).collect()
    }

    fn outputs_(table: &ConversionTable) -> Vec<String> {
        table
            .entries()
            .iter()
            .map(|entry| entry.output().unwrap_or_default())
            .collect()
    }

    fn editing_count_(table: &ConversionTable) -> usize {
        table
            .entries()
            .iter()
            .filter(|entry| entry.is_editing())
            .count()
    }

    #[test]
    fn table_load_initial() {
        let mut table = ConversionTable::new();
        table.load_initial(Currency::Eur, &[Rate::new(Currency::Aud, 1.5)]);

        assert_eq!(codes_(&table), vec!["EUR", "AUD"]);
        assert_eq!(outputs_(&table), vec!["100.00", "150.00"]);
        assert_eq!(table.base(), Some(Currency::Eur));
        assert!(table.focused().is_none());
    }

    #[test]
    fn table_load_initial_order() {
        let table = make_table_();
        assert_eq!(codes_(&table), vec!["EUR", "AUD", "CAD", "USD"]);
        assert_eq!(
            outputs_(&table),
            vec!["100.00", "150.00", "200.00", "120.00"]
        );
        assert_float_absolute_eq!(table.entries()[0].rate(), 1.0, 1e-12);
    }

    #[test]
    fn table_load_initial_skip_base() {
        let mut table = ConversionTable::new();
        table.load_initial(
            Currency::Usd,
            &[
                Rate::new(Currency::Usd, 3.0),
                Rate::new(Currency::Chf, 0.9),
                Rate::new(Currency::Aud, 1.5),
            ],
        );
        assert_eq!(codes_(&table), vec!["USD", "AUD", "CHF"]);
        assert_float_absolute_eq!(table.entries()[0].rate(), 1.0, 1e-12);
    }

    #[test]
    fn table_load_initial_only_once() {
        let mut table = make_table_();
        let first = table.entries()[1].clone();

        table.load_initial(Currency::Usd, &[Rate::new(Currency::Gbp, 0.8)]);
        assert_eq!(codes_(&table), vec!["EUR", "AUD", "CAD", "USD"]);
        assert!(Rc::ptr_eq(&first, &table.entries()[1]));
    }

    #[test]
    fn table_merge_rates() {
        let mut table = ConversionTable::new();
        table.load_initial(Currency::Eur, &[Rate::new(Currency::Aud, 1.5)]);
        let aud = table.entries()[1].clone();

        table.merge_rates(&[Rate::new(Currency::Aud, 2.0)]);

        assert!(Rc::ptr_eq(&aud, &table.entries()[1]));
        assert_float_absolute_eq!(aud.rate(), 2.0, 1e-12);
        assert_eq!(outputs_(&table), vec!["100.00", "200.00"]);
    }

    #[test]
    fn table_merge_rates_partial() {
        let mut table = make_table_();
        table.merge_rates(&[
            Rate::new(Currency::Cad, 3.0),
            Rate::new(Currency::Gbp, 0.8),
        ]);

        assert_eq!(codes_(&table), vec!["EUR", "AUD", "CAD", "USD"]);
        assert_eq!(
            outputs_(&table),
            vec!["100.00", "150.00", "300.00", "120.00"]
        );
    }

    #[test]
    fn table_merge_rates_like_load() {
        let mut table = make_table_();
        table.merge_rates(&[
            Rate::new(Currency::Eur, 3.0),
            Rate::new(Currency::Aud, 2.0),
            Rate::new(Currency::Aud, 4.0),
        ]);

        assert_float_absolute_eq!(table.entries()[0].rate(), 1.0, 1e-12);
        assert_eq!(table.entries()[0].output().as_deref(), Some("100.00"));
        let aud = table.position(Currency::Aud).unwrap();
        assert_float_absolute_eq!(table.entries()[aud].rate(), 2.0, 1e-12);

        let mut loaded = ConversionTable::new();
        loaded.load_initial(
            Currency::Eur,
            &[
                Rate::new(Currency::Eur, 3.0),
                Rate::new(Currency::Aud, 2.0),
                Rate::new(Currency::Aud, 4.0),
            ],
        );
        assert_float_absolute_eq!(loaded.entries()[0].rate(), 1.0, 1e-12);
        assert_float_absolute_eq!(loaded.entries()[1].rate(), 2.0, 1e-12);
    }

    #[test]
    fn table_merge_rates_empty_table() {
        let mut table = ConversionTable::new();
        table.merge_rates(&[Rate::new(Currency::Cad, 3.0)]);
        assert!(table.is_empty());
    }

    #[test]
    fn table_merge_keeps_editing_display() {
        let mut table = make_table_();
        table.select_focus(2).unwrap();
        table.entries()[2].on_user_input(Some("50"));

        table.merge_rates(&[
            Rate::new(Currency::Cad, 5.0),
            Rate::new(Currency::Usd, 2.0),
        ]);

        let cad = &table.entries()[2];
        assert_eq!(cad.output().as_deref(), Some("50.00"));
        assert_eq!(cad.input().as_deref(), Some("50"));
        assert!(cad.is_editing());
        assert_eq!(table.entries()[3].output().as_deref(), Some("50.00"));
    }

    #[test]
    fn table_select_focus() {
        let mut table = make_table_();
        assert_eq!(editing_count_(&table), 0);

        table.select_focus(1).unwrap();
        assert_eq!(table.focused(), Some(1));
        assert!(table.entries()[1].is_editing());
        assert_eq!(editing_count_(&table), 1);

        table.select_focus(0).unwrap();
        assert_eq!(table.focused(), Some(0));
        assert!(table.entries()[0].is_editing());
        assert!(!table.entries()[1].is_editing());
        assert_eq!(editing_count_(&table), 1);

        table.select_focus(0).unwrap();
        assert_eq!(editing_count_(&table), 1);
    }

    #[test]
    fn table_select_focus_out_of_range() {
        let mut table = make_table_();
        table.select_focus(1).unwrap();

        let error = table.select_focus(4).unwrap_err();
        assert_eq!(error.kind, ErrorKind::IndexOutOfRange);
        assert_eq!(table.focused(), Some(1));
        assert_eq!(editing_count_(&table), 1);
    }

    #[test]
    fn table_release_focus() {
        let mut table = make_table_();
        table.select_focus(3).unwrap();
        table.release_focus();

        assert!(table.focused().is_none());
        assert_eq!(editing_count_(&table), 0);
    }

    #[test]
    fn table_apply_response() {
        let date = Date::from_ymd_opt(2018, 8, 1).unwrap();
        let mut table = ConversionTable::with_amount(10.0);

        table.apply(&RateResponse::new(
            Currency::Eur,
            date,
            vec![Rate::new(Currency::Aud, 1.5)],
        ));
        assert_eq!(outputs_(&table), vec!["10.00", "15.00"]);
        assert_eq!(table.as_of(), Some(date));

        let next = date.succ_opt().unwrap();
        table.apply(&RateResponse::new(
            Currency::Eur,
            next,
            vec![Rate::new(Currency::Aud, 1.6), Rate::new(Currency::Usd, 1.1)],
        ));
        assert_eq!(codes_(&table), vec!["EUR", "AUD"]);
        assert_eq!(outputs_(&table), vec!["10.00", "16.00"]);
        assert_eq!(table.as_of(), Some(next));
    }

    #[test]
    fn table_apply_other_base() {
        let date = Date::from_ymd_opt(2018, 8, 1).unwrap();
        let mut table = make_table_();

        table.apply(&RateResponse::new(
            Currency::Usd,
            date,
            vec![Rate::new(Currency::Aud, 9.0)],
        ));
        assert_eq!(
            outputs_(&table),
            vec!["100.00", "150.00", "200.00", "120.00"]
        );
        assert!(table.as_of().is_none());
    }

    #[test]
    fn table_input_updates_every_entry() {
        let table = make_table_();
        table.entries()[1].on_user_input(Some("3"));

        assert_float_absolute_eq!(table.shared().read(), 2.0, 1e-12);
        assert_eq!(outputs_(&table), vec!["2.00", "3.00", "4.00", "2.40"]);
    }
}
