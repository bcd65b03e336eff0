//! Worklist scheduler
//!
//! Runs an ordered, circular list of workloads forever. Each entry runs its
//! workload `repeat` times with `inter_delay_ms` between invocations, then
//! pauses `post_delay_ms` before control moves to the next entry.

pub mod executor;
pub mod worklist;

pub use executor::{Cursor, Scheduler, SchedulerError, Step};
pub use worklist::{Entry, EntryId, Worklist, WorklistError, MAX_ENTRIES};
