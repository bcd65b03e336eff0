//! Configuration type definitions
//!
//! These types represent the meter configuration. Configuration is embedded
//! in the firmware image as TOML and parsed once at boot.

use heapless::{String, Vec};
use vfdmeter_hal::TransportConfig;
use vfdmeter_protocol::NUM_CELLS;

use crate::workload::Layout;

/// Maximum job name length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum jobs per config
pub const MAX_JOBS: usize = 16;

/// Longest text a job can show
pub const MAX_TEXT_LEN: usize = NUM_CELLS;

/// Display power-on settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySettings {
    /// Dimming level sent at startup
    pub dimming: u8,
    /// Lightness level sent at startup
    pub lightness: u8,
    /// Text shown while the display settles
    pub greeting: String<MAX_TEXT_LEN>,
    /// Pause after the greeting, in milliseconds
    pub greeting_pause_ms: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let mut greeting = String::new();
        let _ = greeting.push_str("Init....");
        Self {
            dimming: 7,
            lightness: 63,
            greeting,
            greeting_pause_ms: 1000,
        }
    }
}

/// Bar animation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BarSettings {
    /// Number of animated columns
    pub columns: u8,
    /// Column placement
    pub layout: Layout,
    /// Seed for the starting phases
    pub seed: u32,
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            columns: 2 * NUM_CELLS as u8,
            layout: Layout::Packed,
            seed: 1,
        }
    }
}

/// Job type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JobKind {
    #[default]
    Bars,
    Blank,
    Blink,
}

/// One worklist entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JobConfig {
    /// Name from the section header
    pub name: String<MAX_LABEL_LEN>,
    /// What the job does
    pub kind: JobKind,
    /// Invocations per cycle
    pub repeat: u32,
    /// Pause after each invocation
    pub inter_delay_ms: u32,
    /// Pause after the last invocation
    pub post_delay_ms: u32,
    /// Text (blink only)
    pub text: String<MAX_TEXT_LEN>,
    /// First cell of the text (blink only)
    pub position: u8,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: JobKind::Bars,
            repeat: 1,
            inter_delay_ms: 0,
            post_delay_ms: 0,
            text: String::new(),
            position: 0,
        }
    }
}

impl JobConfig {
    fn new(
        name: &str,
        kind: JobKind,
        repeat: u32,
        inter_delay_ms: u32,
        post_delay_ms: u32,
    ) -> Self {
        let mut job = Self {
            kind,
            repeat,
            inter_delay_ms,
            post_delay_ms,
            ..Self::default()
        };
        let _ = job.name.push_str(name);
        job
    }
}

/// Complete meter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterConfig {
    /// Bus settings
    pub transport: TransportConfig,
    /// Startup settings
    pub display: DisplaySettings,
    /// Bar animation settings
    pub bars: BarSettings,
    /// Worklist, in schedule order
    pub jobs: Vec<JobConfig, MAX_JOBS>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        let mut jobs = Vec::new();
        let _ = jobs.push(JobConfig::new("bars", JobKind::Bars, 20, 20, 0));
        let _ = jobs.push(JobConfig::new("clear", JobKind::Blank, 1, 0, 200));

        let mut blink = JobConfig::new("blink", JobKind::Blink, 11, 100, 0);
        let _ = blink.text.push_str("Damn~!");
        blink.position = 1;
        let _ = jobs.push(blink);

        let _ = jobs.push(JobConfig::new("clear2", JobKind::Blank, 1, 0, 200));

        Self {
            transport: TransportConfig::default(),
            display: DisplaySettings::default(),
            bars: BarSettings::default(),
            jobs,
        }
    }
}
