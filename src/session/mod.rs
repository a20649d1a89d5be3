use crate::converter::ConversionTable;
use crate::error::Error;
use crate::marketdata::RateResponse;
use crate::output::Output;
use crate::schedule::TimerService;

use log::{debug, info, warn};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;

mod command;
mod input;
mod worker;

pub use command::*;
pub use input::*;
pub use worker::*;

pub const LOAD_FAILURE_MESSAGE: &str = "Fail to load data";

/// Everything the session thread reacts to.
#[derive(Debug)]
pub enum Event {
    Rates {
        cycle: u64,
        result: Result<RateResponse, Error>,
    },
    Line(String),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Session<O: Output> {
    table: ConversionTable,
    output: O,
    applied_cycle: Option<u64>,
}

impl<O: Output> Session<O> {
    pub fn new(table: ConversionTable, output: O) -> Self {
        Self {
            table,
            output,
            applied_cycle: None,
        }
    }

    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    pub fn handle(&mut self, event: Event) -> Result<Flow, Error> {
        match event {
            Event::Rates { cycle, result } => {
                self.on_rates(cycle, result)?;
                Ok(Flow::Continue)
            }
            Event::Line(line) => match line.parse::<Command>() {
                Ok(command) => self.on_command(command),
                Err(error) => {
                    self.output.write_message(&error.message)?;
                    Ok(Flow::Continue)
                }
            },
            Event::Closed => Ok(Flow::Stop),
        }
    }

    fn on_rates(&mut self, cycle: u64, result: Result<RateResponse, Error>) -> Result<(), Error> {
        if let Some(applied) = self.applied_cycle {
            if cycle <= applied {
                debug!(
                    "drop refresh cycle {} older than applied cycle {}",
                    cycle, applied
                );
                return Ok(());
            }
        }

        match result {
            Ok(response) => {
                self.table.apply(&response);
                self.applied_cycle = Some(cycle);
                self.output.write_table(&self.table)
            }
            Err(error) => {
                warn!("refresh cycle {} not applied : {}", cycle, error);
                self.output.write_error(LOAD_FAILURE_MESSAGE, &error)
            }
        }
    }

    fn on_command(&mut self, command: Command) -> Result<Flow, Error> {
        match command {
            Command::Quit => {
                info!("quit requested");
                return Ok(Flow::Stop);
            }
            Command::Show => {}
            Command::Release => self.table.release_focus(),
            Command::Focus(index) => {
                if index >= self.table.len() {
                    self.output
                        .write_message(&format!("no row {} to focus", index))?;
                    return Ok(Flow::Continue);
                }
                self.table.select_focus(index)?;
            }
            Command::Type(text) => match self.table.focused_entry().cloned() {
                Some(entry) => entry.on_user_input(text.as_deref()),
                None => {
                    self.output
                        .write_message("select a row first with: focus <row>")?;
                    return Ok(Flow::Continue);
                }
            },
        }
        self.output.write_table(&self.table)?;
        Ok(Flow::Continue)
    }
}

/// Single consumer loop: timers fire between events, the session owns every
/// mutation of the table.
pub fn run<O: Output>(
    session: &mut Session<O>,
    timers: &mut TimerService,
    receiver: &Receiver<Event>,
) -> Result<(), Error> {
    loop {
        timers.fire_due(Instant::now());

        let event = match timers.next_deadline() {
            Some(deadline) => {
                match receiver.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(event) => event,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match receiver.recv() {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        if session.handle(event)? == Flow::Stop {
            break;
        }
    }
    Ok(())
}
