use super::{RateSource, decode};
use crate::error::{Error, ErrorKind};
use crate::marketdata::RateResponse;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://api.frankfurter.app/latest?from=EUR";

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::new(ErrorKind::RefreshFailed, format!("request failed : {error}"))
    }
}

pub struct HttpRateSource {
    url: String,
    reqwest_client: Client,
}

impl HttpRateSource {
    pub fn new<T: Into<String>>(url: T, timeout: Duration) -> Result<Self, Error> {
        // always ask for fresh rates
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|error| Error::new_config(format!("failed to init reqwest : {error}")))?;

        Ok(Self {
            url: url.into(),
            reqwest_client: client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RateSource for HttpRateSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_rates(&self) -> Result<RateResponse, Error> {
        debug!("request rates from url {}", self.url);
        let output = self
            .reqwest_client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;
        debug!("request result: {}", output);
        decode::from_str(&output)
    }
}
