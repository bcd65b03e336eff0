//! Schedulable jobs built from configuration

use vfdmeter_hal::Transport;

use super::{BarAnimation, BlinkText, Blank, Workload};
use crate::config::{BarSettings, JobConfig, JobKind, MeterConfig, MAX_JOBS};
use crate::display::Display;
use crate::scheduler::{Worklist, WorklistError};

/// Any workload the firmware can schedule
#[derive(Debug, Clone)]
pub enum Job {
    Bars(BarAnimation),
    Blank(Blank),
    Blink(BlinkText),
}

impl Job {
    /// Build the workload for one configured job
    ///
    /// `index` perturbs the bar seed so two bar jobs do not move in lockstep.
    pub fn from_config(job: &JobConfig, bars: &BarSettings, index: usize) -> Self {
        match job.kind {
            JobKind::Bars => Job::Bars(BarAnimation::seeded(
                bars.columns as usize,
                bars.layout,
                bars.seed.wrapping_add(index as u32),
            )),
            JobKind::Blank => Job::Blank(Blank),
            JobKind::Blink => Job::Blink(BlinkText::new(job.text.clone(), job.position)),
        }
    }
}

impl<T: Transport> Workload<T> for Job {
    fn execute(&mut self, display: &mut Display<T>) {
        match self {
            Job::Bars(bars) => bars.execute(display),
            Job::Blank(blank) => blank.execute(display),
            Job::Blink(blink) => blink.execute(display),
        }
    }
}

/// Build the worklist for a configuration, in job order
pub fn build_worklist(config: &MeterConfig) -> Result<Worklist<Job, MAX_JOBS>, WorklistError> {
    let mut worklist = Worklist::new();
    for (index, job) in config.jobs.iter().enumerate() {
        worklist.append(
            Job::from_config(job, &config.bars, index),
            job.repeat,
            job.inter_delay_ms,
            job.post_delay_ms,
        )?;
    }
    Ok(worklist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_worklist_shape() {
        let worklist = build_worklist(&MeterConfig::default()).unwrap();
        assert_eq!(worklist.len(), 4);

        let entries = worklist.entries();
        assert!(matches!(entries[0].workload, Job::Bars(ref b) if b.columns() == 16));
        assert!(matches!(entries[1].workload, Job::Blank(_)));
        assert!(matches!(
            entries[2].workload,
            Job::Blink(ref b) if b.text() == "Damn~!" && b.position() == 1
        ));
        assert!(matches!(entries[3].workload, Job::Blank(_)));

        assert_eq!(entries[0].repeat, 20);
        assert_eq!(entries[0].inter_delay_ms, 20);
        assert_eq!(entries[1].post_delay_ms, 200);
        assert_eq!(entries[2].repeat, 11);
        assert_eq!(entries[2].inter_delay_ms, 100);
    }

    #[test]
    fn test_bar_jobs_use_bar_settings() {
        let mut config = MeterConfig::default();
        config.bars.columns = 40;
        config.bars.layout = crate::workload::Layout::Simple;

        let worklist = build_worklist(&config).unwrap();
        match &worklist.entries()[0].workload {
            Job::Bars(bars) => {
                assert_eq!(bars.columns(), 40);
                assert_eq!(bars.layout(), crate::workload::Layout::Simple);
            }
            other => panic!("unexpected job {:?}", other),
        }
    }
}
