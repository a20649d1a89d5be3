use crate::alias::Date;
use crate::error::{Error, ErrorKind};
use crate::marketdata::{Currency, Rate, RateResponse};

use serde::Deserialize;
use std::collections::BTreeMap;

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(
            ErrorKind::MalformedRateResponse,
            format!("not rate json format : {error}"),
        )
    }
}

#[derive(Debug, Deserialize)]
struct RateResponseJson {
    base: String,
    date: String,
    rates: BTreeMap<String, f64>,
}

pub fn from_str(content: &str) -> Result<RateResponse, Error> {
    let json: RateResponseJson = serde_json::from_str(content)?;

    let base = json.base.parse::<Currency>()?;
    let date = Date::parse_from_str(&json.date, "%Y-%m-%d")
        .map_err(|error| Error::new_malformed(format!("invalid date {} : {error}", json.date)))?;

    let mut rates = Vec::with_capacity(json.rates.len());
    for (code, value) in json.rates.iter() {
        let currency = code.parse::<Currency>()?;
        if !value.is_finite() || *value <= 0.0 {
            return Err(Error::new_malformed(format!(
                "rate {value} for {code} must be positive"
            )));
        }
        rates.push(Rate::new(currency, *value));
    }

    Ok(RateResponse::new(base, date, rates))
}
