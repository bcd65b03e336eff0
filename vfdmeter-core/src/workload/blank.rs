//! Blank workload

use vfdmeter_hal::Transport;

use super::Workload;
use crate::display::Display;

/// Shows spaces on every cell
#[derive(Debug, Clone, Copy, Default)]
pub struct Blank;

impl<T: Transport> Workload<T> for Blank {
    fn execute(&mut self, display: &mut Display<T>) {
        let _ = display.clear();
    }
}
