use super::Event;
use crate::error::Error;
use crate::schedule::Scheduler;
use crate::source::RateSource;

use log::{debug, info, warn};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

/// Runs each refresh cycle on its own thread and posts the result back to the
/// session queue, tagged with the cycle number.
///
/// At most one fetch is in flight: a tick that comes while the previous fetch
/// is still running is skipped.
#[derive(Clone)]
pub struct RefreshWorker {
    source: Arc<dyn RateSource>,
    sender: Sender<Event>,
    cycle: Rc<Cell<u64>>,
    busy: Arc<AtomicBool>,
}

impl RefreshWorker {
    pub fn new(source: Arc<dyn RateSource>, sender: Sender<Event>) -> Self {
        Self {
            source,
            sender,
            cycle: Rc::new(Cell::new(0)),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn last_cycle(&self) -> u64 {
        self.cycle.get()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Returns the cycle started, none when a fetch is still running.
    pub fn dispatch(&self) -> Option<u64> {
        if self.busy.swap(true, Ordering::AcqRel) {
            debug!("refresh cycle {} still running, skip tick", self.cycle.get());
            return None;
        }
        let cycle = self.cycle.get() + 1;
        self.cycle.set(cycle);

        let source = self.source.clone();
        let sender = self.sender.clone();
        let busy = self.busy.clone();
        let spawned = thread::Builder::new()
            .name(format!("refresh-{cycle}"))
            .spawn(move || {
                debug!("refresh cycle {} from {}", cycle, source.name());
                let result = source.fetch_rates();
                match &result {
                    Ok(response) => info!(
                        "refresh cycle {} got {} rates based on {} at {}",
                        cycle,
                        response.rates.len(),
                        response.base,
                        response.date.format("%Y-%m-%d")
                    ),
                    Err(error) => warn!("refresh cycle {} failed : {}", cycle, error),
                }
                // idle before posting, whoever reads the result sees it free
                busy.store(false, Ordering::Release);
                if sender.send(Event::Rates { cycle, result }).is_err() {
                    debug!("session closed, drop refresh cycle {}", cycle);
                }
            });
        if let Err(error) = spawned {
            warn!("unable to start refresh cycle {} : {}", cycle, error);
            self.busy.store(false, Ordering::Release);
        }
        Some(cycle)
    }

    /// First cycle right away, then one per interval.
    pub fn start(&self, scheduler: &mut dyn Scheduler, interval: Duration) -> Result<(), Error> {
        self.dispatch();
        let worker = self.clone();
        scheduler.scheduled_timer(
            interval,
            Box::new(move || {
                worker.dispatch();
            }),
        )
    }
}
