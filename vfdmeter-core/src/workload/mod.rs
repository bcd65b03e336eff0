//! Display workloads
//!
//! A workload is one animation or update routine. The scheduler only knows
//! how to run one step of it; everything else (phases, toggles) is private
//! state owned by the workload itself.

pub mod bars;
pub mod blank;
pub mod blink;
pub mod job;

pub use bars::{level_for_phase, packs_evenly, BarAnimation, Layout, MAX_COLUMNS, PERIOD};
pub use blank::Blank;
pub use blink::BlinkText;
pub use job::{build_worklist, Job};

use vfdmeter_hal::Transport;

use crate::display::Display;

/// One schedulable unit of display work
pub trait Workload<T: Transport> {
    /// Execute one step
    ///
    /// Transport failures are handled (reported and dropped) inside the
    /// step; the scheduler never sees them.
    fn execute(&mut self, display: &mut Display<T>);
}
