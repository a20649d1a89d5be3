use super::{RateSource, decode};
use crate::error::Error;
use crate::marketdata::RateResponse;

use log::debug;
use std::path::PathBuf;

/// Reads the rate json from disk on every refresh.
pub struct FileRateSource {
    path: PathBuf,
}

impl FileRateSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self, Error> {
        let path = path.into();
        if !path.is_file() {
            return Err(Error::new_config(format!(
                "{} is not valid file",
                path.display()
            )));
        }
        Ok(Self { path })
    }
}

impl RateSource for FileRateSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_rates(&self) -> Result<RateResponse, Error> {
        debug!("read rates from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path).map_err(|error| {
            Error::new_refresh(format!(
                "unable to read {} : {error}",
                self.path.display()
            ))
        })?;
        decode::from_str(&content)
    }
}
