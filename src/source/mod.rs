use crate::error::Error;
use crate::marketdata::RateResponse;

pub mod decode;
mod file;
mod http;

pub use file::*;
pub use http::*;

/// Producer of rate sets, called from a refresh worker thread.
pub trait RateSource: Send + Sync {
    fn name(&self) -> &str;
    fn fetch_rates(&self) -> Result<RateResponse, Error>;
}

#[cfg(test)]
pub struct StaticRateSource {
    response: Option<RateResponse>,
}

#[cfg(test)]
impl StaticRateSource {
    pub fn new(response: Option<RateResponse>) -> Self {
        Self { response }
    }
}

#[cfg(test)]
impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_rates(&self) -> Result<RateResponse, Error> {
        self.response
            .clone()
            .ok_or_else(|| Error::new_refresh("no response available"))
    }
}
