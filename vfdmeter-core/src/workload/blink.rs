//! Blinking text workload

use heapless::String;
use vfdmeter_hal::Transport;

use super::Workload;
use crate::config::MAX_TEXT_LEN;
use crate::display::Display;

/// Alternates between a text and a blank display
///
/// The first invocation shows the text; the toggle persists across
/// invocations and scheduler cycles.
#[derive(Debug, Clone)]
pub struct BlinkText {
    text: String<MAX_TEXT_LEN>,
    position: u8,
    visible_next: bool,
}

impl BlinkText {
    pub fn new(text: String<MAX_TEXT_LEN>, position: u8) -> Self {
        Self {
            text,
            position,
            visible_next: true,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn position(&self) -> u8 {
        self.position
    }
}

impl<T: Transport> Workload<T> for BlinkText {
    fn execute(&mut self, display: &mut Display<T>) {
        let _ = if self.visible_next {
            display.show_text(self.position, self.text.as_str())
        } else {
            display.clear()
        };
        self.visible_next = !self.visible_next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;

    fn blink(text: &str, position: u8) -> BlinkText {
        BlinkText::new(String::try_from(text).unwrap(), position)
    }

    #[test]
    fn test_alternates_text_and_blank() {
        let mut display = Display::new(RecordingTransport::new());
        let mut job = blink("Damn~!", 1);

        for _ in 0..3 {
            job.execute(&mut display);
        }

        let sent = &display.transport().sent;
        assert_eq!(sent[0], b"\x21Damn~!");
        assert_eq!(sent[1], b"\x20        ");
        assert_eq!(sent[2], b"\x21Damn~!");
    }

    #[test]
    fn test_text_clamped_to_display() {
        let mut display = Display::new(RecordingTransport::new());
        let mut job = blink("ABCDEFGH", 6);

        job.execute(&mut display);

        assert_eq!(display.transport().sent[0], b"\x26AB");
    }

    #[test]
    fn test_toggle_survives_failed_send() {
        let mut display = Display::new(RecordingTransport::failing());
        let mut job = blink("x", 0);

        job.execute(&mut display);
        job.execute(&mut display);

        assert!(job.visible_next);
        assert_eq!(display.send_failures(), 2);
    }
}
