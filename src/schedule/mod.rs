use crate::error::Error;

use log::{debug, warn};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

pub trait Scheduler {
    fn scheduled_timer(
        &mut self,
        interval: Duration,
        block: Box<dyn FnMut()>,
    ) -> Result<(), Error>;
}

struct TimerEntry {
    interval: Duration,
    deadline: Instant,
    blocks: Vec<Box<dyn FnMut()>>,
}

impl TimerEntry {
    fn new(interval: Duration, now: Instant, block: Box<dyn FnMut()>) -> Result<Self, Error> {
        let deadline = now.checked_add(interval).ok_or_else(|| {
            Error::new_config(format!("timer interval {:?} is out of range", interval))
        })?;
        Ok(Self {
            interval,
            deadline,
            blocks: vec![block],
        })
    }

    fn notify(&mut self) {
        for block in self.blocks.iter_mut() {
            block();
        }
    }

    /// Returns false once the next deadline can no longer be represented.
    fn reschedule(&mut self, now: Instant) -> bool {
        // late ticks are skipped, not replayed
        while self.deadline <= now {
            match self.deadline.checked_add(self.interval) {
                Some(deadline) => self.deadline = deadline,
                None => return false,
            }
        }
        true
    }
}

/// Repeating timers driven by the session loop.
///
/// Callbacks registered with the same interval share one timer and are all
/// invoked once per tick, in registration order.
pub struct TimerService {
    entries: BTreeMap<Duration, TimerEntry>,
}

impl TimerService {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn register(
        &mut self,
        interval: Duration,
        now: Instant,
        block: Box<dyn FnMut()>,
    ) -> Result<(), Error> {
        let interval = interval.max(Duration::from_millis(1));
        match self.entries.get_mut(&interval) {
            Some(entry) => entry.blocks.push(block),
            None => {
                let entry = TimerEntry::new(interval, now, block)?;
                debug!("new timer every {:?}", interval);
                self.entries.insert(interval, entry);
            }
        }
        Ok(())
    }

    pub fn timer_count(&self) -> usize {
        self.entries.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    /// Returns the number of timers that ticked.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        self.entries.retain(|interval, entry| {
            if entry.deadline > now {
                return true;
            }
            entry.notify();
            fired += 1;
            let alive = entry.reschedule(now);
            if !alive {
                warn!("timer every {:?} stopped, next tick out of range", interval);
            }
            alive
        });
        fired
    }
}

impl Default for TimerService {
    fn default() -> Self {
        TimerService::new()
    }
}

impl Scheduler for TimerService {
    fn scheduled_timer(
        &mut self,
        interval: Duration,
        block: Box<dyn FnMut()>,
    ) -> Result<(), Error> {
        self.register(interval, Instant::now(), block)
    }
}
