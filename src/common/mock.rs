// src/common/mock.rs

//! Recording line used by the unit tests.

use super::format::Level;
use super::hal_traits::{OokLine, OokTimer};
use super::symbol::Pulse;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockLineError {
    NotPresent,
    Fault,
}

/// Records every level change as a new [`Pulse`] and adds delays to the
/// most recent one, so the recorded list is the emitted waveform.
pub struct RecordingLine {
    pub pulses: Vec<Pulse>,
    pub acquire_count: u32,
    pub release_count: u32,
    /// Returned by `acquire` when set.
    pub acquire_error: Option<MockLineError>,
    /// Zero-based index of the `set_level` call that fails (once).
    pub fail_at: Option<usize>,
    /// Sleep for real during delays, to widen race windows.
    pub real_delay: bool,
    /// Called at the start of every `set_level`.
    pub on_set_level: Option<Box<dyn FnMut() + Send>>,
    set_level_calls: usize,
}

impl RecordingLine {
    pub fn new() -> Self {
        RecordingLine {
            pulses: Vec::new(),
            acquire_count: 0,
            release_count: 0,
            acquire_error: None,
            fail_at: None,
            real_delay: false,
            on_set_level: None,
            set_level_calls: 0,
        }
    }

    /// Level the line was last driven to.
    pub fn level(&self) -> Option<Level> {
        self.pulses.last().map(|p| p.level)
    }
}

impl OokLine for RecordingLine {
    type Error = MockLineError;

    fn acquire(&mut self) -> Result<(), Self::Error> {
        if let Some(e) = self.acquire_error {
            return Err(e);
        }
        self.acquire_count += 1;
        Ok(())
    }

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        if let Some(hook) = self.on_set_level.as_mut() {
            hook();
        }
        let call = self.set_level_calls;
        self.set_level_calls += 1;
        if self.fail_at == Some(call) {
            return Err(MockLineError::Fault);
        }
        self.pulses.push(Pulse { level, duration_us: 0 });
        Ok(())
    }

    fn release(&mut self) {
        self.release_count += 1;
    }
}

impl OokTimer for RecordingLine {
    fn delay_us(&mut self, us: u32) {
        if let Some(last) = self.pulses.last_mut() {
            last.duration_us += us;
        }
        if self.real_delay && us > 0 {
            std::thread::sleep(std::time::Duration::from_micros(us as u64));
        }
    }
}
