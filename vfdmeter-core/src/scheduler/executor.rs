//! Worklist execution
//!
//! The scheduler owns the worklist and a cursor into it. Each step either
//! runs the current entry's workload once, or (when the entry is exhausted)
//! takes its post delay and moves to the next entry, wrapping at the end.

use embedded_hal::delay::DelayNs;
use vfdmeter_hal::Transport;

use super::worklist::{EntryId, Worklist, MAX_ENTRIES};
use crate::display::Display;
use crate::workload::Workload;

/// Scheduler construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Nothing to run
    EmptyWorklist,
}

/// Current entry and how many invocations it has left this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub entry: EntryId,
    pub remaining: u32,
}

/// What one scheduling step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Ran the workload of `entry` once
    Executed { entry: EntryId },
    /// Took the post delay of `from` and moved to `to`
    Advanced { from: EntryId, to: EntryId },
}

/// Worklist scheduler
pub struct Scheduler<W, const N: usize = MAX_ENTRIES> {
    worklist: Worklist<W, N>,
    cursor: Cursor,
}

impl<W, const N: usize> Scheduler<W, N> {
    /// Start at the first entry with its full repeat count
    pub fn new(worklist: Worklist<W, N>) -> Result<Self, SchedulerError> {
        let first = worklist
            .entries()
            .first()
            .ok_or(SchedulerError::EmptyWorklist)?;
        let cursor = Cursor {
            entry: EntryId(0),
            remaining: first.repeat,
        };
        Ok(Self { worklist, cursor })
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn worklist(&self) -> &Worklist<W, N> {
        &self.worklist
    }

    /// Perform one scheduling step
    pub fn step<T, D>(&mut self, display: &mut Display<T>, delay: &mut D) -> Step
    where
        T: Transport,
        W: Workload<T>,
        D: DelayNs,
    {
        let current = self.cursor.entry;
        let len = self.worklist.len();

        let Some(entry) = self.worklist.get_mut(current) else {
            // Unreachable: the list is non-empty and the cursor wraps modulo len
            self.cursor = Cursor {
                entry: EntryId(0),
                remaining: 0,
            };
            return Step::Advanced {
                from: current,
                to: EntryId(0),
            };
        };

        if self.cursor.remaining == 0 {
            delay.delay_ms(entry.post_delay_ms);

            let next = EntryId((current.0 + 1) % len);
            let remaining = self.worklist.get(next).map_or(0, |e| e.repeat);
            self.cursor = Cursor {
                entry: next,
                remaining,
            };
            return Step::Advanced {
                from: current,
                to: next,
            };
        }

        entry.workload.execute(display);
        self.cursor.remaining -= 1;
        delay.delay_ms(entry.inter_delay_ms);

        Step::Executed { entry: current }
    }

    /// Drive `cycles` complete passes over the worklist
    ///
    /// A pass ends when control wraps from the last entry back to the first.
    pub fn run_cycles<T, D>(&mut self, display: &mut Display<T>, delay: &mut D, cycles: usize)
    where
        T: Transport,
        W: Workload<T>,
        D: DelayNs,
    {
        let mut completed = 0;
        while completed < cycles {
            if let Step::Advanced { to: EntryId(0), .. } = self.step(display, delay) {
                completed += 1;
            }
        }
    }

    /// Run forever
    pub fn run<T, D>(&mut self, display: &mut Display<T>, delay: &mut D) -> !
    where
        T: Transport,
        W: Workload<T>,
        D: DelayNs,
    {
        loop {
            self.step(display, delay);
        }
    }
}
