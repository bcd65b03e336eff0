//! Ordered worklist entries

use heapless::Vec;

/// Default worklist capacity
pub const MAX_ENTRIES: usize = 16;

/// Worklist errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorklistError {
    /// Capacity exhausted
    Full,
}

/// Position of an entry in its worklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryId(pub usize);

/// A workload with its repeat count and delays
///
/// Timing fields are fixed once appended; only the workload's own state
/// changes while the scheduler runs.
#[derive(Debug, Clone)]
pub struct Entry<W> {
    pub workload: W,
    /// Invocations per cycle (0 = skipped, post delay still applies)
    pub repeat: u32,
    /// Pause after each invocation
    pub inter_delay_ms: u32,
    /// Pause after the entry is exhausted
    pub post_delay_ms: u32,
}

/// Fixed-capacity ordered collection of entries
#[derive(Debug, Clone)]
pub struct Worklist<W, const N: usize = MAX_ENTRIES> {
    entries: Vec<Entry<W>, N>,
}

impl<W, const N: usize> Worklist<W, N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry at the end
    pub fn append(
        &mut self,
        workload: W,
        repeat: u32,
        inter_delay_ms: u32,
        post_delay_ms: u32,
    ) -> Result<EntryId, WorklistError> {
        let id = EntryId(self.entries.len());
        self.entries
            .push(Entry {
                workload,
                repeat,
                inter_delay_ms,
                post_delay_ms,
            })
            .map_err(|_| WorklistError::Full)?;
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry<W>] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry<W>> {
        self.entries.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry<W>> {
        self.entries.get_mut(id.0)
    }
}

impl<W, const N: usize> Default for Worklist<W, N> {
    fn default() -> Self {
        Self::new()
    }
}
