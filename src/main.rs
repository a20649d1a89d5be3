use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;
use log::info;

mod alias;
mod converter;
mod error;
mod marketdata;
mod output;
mod schedule;
mod session;
mod source;

use converter::{ConversionTable, DEFAULT_AMOUNT, MAX_AMOUNT};
use output::{Output, TextOutput};
use schedule::TimerService;
use session::{RefreshWorker, Session, run, spawn_line_reader};
use source::{DEFAULT_URL, FileRateSource, HttpRateSource, RateSource};

use error::Error;
use std::io::BufReader;
use std::sync::Arc;
use std::sync::mpsc::channel;
use std::time::Duration;

// one year
const MAX_INTERVAL_SECS: f64 = 365.0 * 24.0 * 3600.0;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum RateSourceKind {
    Http,
    File,
}

impl std::fmt::Display for RateSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

/// Convert one amount into every currency of a rate set, kept in sync while
/// rates refresh
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// rate source
    #[clap(default_value_t = RateSourceKind::Http, short, long, value_parser)]
    source: RateSourceKind,

    /// rate endpoint for the http source
    #[clap(default_value = DEFAULT_URL, short, long, value_parser)]
    url: String,

    /// rate json file for the file source
    #[clap(short, long, value_parser)]
    rates_file: Option<String>,

    /// refresh interval in seconds
    #[clap(default_value_t = 1.0, short, long, value_parser)]
    interval: f64,

    /// initial base amount
    #[clap(default_value_t = DEFAULT_AMOUNT, short, long, value_parser)]
    amount: f64,
}

impl Args {
    fn refresh_interval(&self) -> Result<Duration, Error> {
        if !(self.interval > 0.0 && self.interval <= MAX_INTERVAL_SECS) {
            return Err(Error::new_config(format!(
                "interval must be a number of seconds in ]0, {}], got {}",
                MAX_INTERVAL_SECS, self.interval
            )));
        }
        Duration::try_from_secs_f64(self.interval).map_err(|error| {
            Error::new_config(format!("invalid interval {} : {}", self.interval, error))
        })
    }

    fn initial_amount(&self) -> Result<f64, Error> {
        if !(0.0..=MAX_AMOUNT).contains(&self.amount) {
            return Err(Error::new_config(format!(
                "amount must be a number in [0, {}], got {}",
                MAX_AMOUNT, self.amount
            )));
        }
        Ok(self.amount)
    }
}

fn make_source(args: &Args, interval: Duration) -> Result<Arc<dyn RateSource>, Error> {
    let value: Arc<dyn RateSource> = match args.source {
        RateSourceKind::Http => {
            let timeout = interval.max(Duration::from_secs(5));
            Arc::new(HttpRateSource::new(args.url.clone(), timeout)?)
        }
        RateSourceKind::File => {
            let path = args.rates_file.as_ref().ok_or_else(|| {
                Error::new_config("file source needs --rates-file")
            })?;
            Arc::new(FileRateSource::new(path)?)
        }
    };
    Ok(value)
}

fn main() -> Result<(), Error> {
    //
    // cli arg
    let args = Args::parse();

    //
    // logger
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info);
    builder.parse_default_env();
    builder.init();

    //
    // config
    let interval = args.refresh_interval()?;
    let amount = args.initial_amount()?;
    let source = make_source(&args, interval)?;
    info!(
        "converter start with source {} every {:?} amount {}",
        source.name(),
        interval,
        amount
    );

    //
    // session
    let (sender, receiver) = channel();
    let mut output = TextOutput::new(std::io::stdout());
    output.write_message("commands: focus <row>, <amount>, clear, release, show, quit")?;
    let mut session = Session::new(ConversionTable::with_amount(amount), output);

    //
    // refresh and input
    let mut timers = TimerService::new();
    let worker = RefreshWorker::new(source, sender.clone());
    worker.start(&mut timers, interval)?;
    spawn_line_reader(BufReader::new(std::io::stdin()), sender)?;

    run(&mut session, &mut timers, &receiver)?;
    info!("converter stop");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn make_args_(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("converter-rs").chain(args.iter().copied()))
    }

    #[test]
    fn args_default() {
        let args = make_args_(&[]);
        assert_eq!(args.source, RateSourceKind::Http);
        assert_eq!(args.refresh_interval().unwrap(), Duration::from_secs(1));
        assert_eq!(args.initial_amount().unwrap(), DEFAULT_AMOUNT);
    }

    #[test]
    fn args_invalid_interval() {
        for interval in ["0", "-1", "NaN", "inf", "1.5e19", "1e20"] {
            let flag = format!("--interval={interval}");
            let args = make_args_(&[flag.as_str()]);
            let error = args.refresh_interval().unwrap_err();
            assert_eq!(error.kind, ErrorKind::Config, "{interval}");
        }
        let args = make_args_(&["--interval", "0.25"]);
        assert_eq!(args.refresh_interval().unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn args_invalid_amount() {
        for amount in ["-1", "NaN", "inf", "1e16"] {
            let flag = format!("--amount={amount}");
            let args = make_args_(&[flag.as_str()]);
            let error = args.initial_amount().unwrap_err();
            assert_eq!(error.kind, ErrorKind::Config, "{amount}");
        }
    }

    #[test]
    fn args_file_source_without_file() {
        let args = make_args_(&["--source", "file"]);
        let error = make_source(&args, Duration::from_secs(1)).err().unwrap();
        assert_eq!(error.kind, ErrorKind::Config);
    }
}
