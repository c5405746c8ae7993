// src/control/device.rs

use super::error::DeviceError;
use super::formatter::{format_timings, TIMINGS_TEXT_LEN};
use super::parser::{parse_frame, parse_timings};
use crate::common::{
    config::{ConfigStore, RawTimingConfig, TimingConfig},
    error::{ConfigError, TxError},
    frame::Frame,
    hal_traits::{OokLine, OokTimer},
};
use crate::transmitter::FrameTransmitter;
use arrayvec::ArrayString;
use core::fmt;
use crate::fmt::info;

/// A registered OOK output: the installed timings plus the transmitter that
/// owns the line.
///
/// Exposes the two text attributes of the driver (`timings` read/write,
/// `frame` write-only) and their typed equivalents.
#[derive(Debug)]
pub struct OokDevice<L> {
    config: ConfigStore,
    transmitter: FrameTransmitter<L>,
}

impl<L> OokDevice<L>
where
    L: OokLine + OokTimer,
{
    /// Registers the device on `line`, parking the line low.
    ///
    /// Starts with [`TimingConfig::default()`], under which frames are
    /// accepted but not transmitted until timings are written.
    pub fn probe(line: L) -> Result<Self, TxError<L::Error>> {
        let transmitter = FrameTransmitter::new(line);
        transmitter.park()?;
        info!("OOK modulation driver registered");
        Ok(OokDevice {
            config: ConfigStore::default(),
            transmitter,
        })
    }

    /// Unregisters the device and hands the line back.
    pub fn remove(self) -> L {
        info!("OOK modulation driver removed");
        self.transmitter.into_inner()
    }

    // --- `timings` attribute ---

    /// Parses and installs a timings record (see [`parse_timings`]).
    pub fn store_timings(&self, input: &str) -> Result<(), DeviceError<L::Error>> {
        let raw = parse_timings(input)?;
        self.config.validate_and_store(raw)?;
        Ok(())
    }

    /// The installed timings in record form.
    pub fn show_timings(&self) -> Result<ArrayString<TIMINGS_TEXT_LEN>, fmt::Error> {
        format_timings(&self.config.read())
    }

    pub fn validate_and_store(&self, candidate: RawTimingConfig) -> Result<(), ConfigError> {
        self.config.validate_and_store(candidate)
    }

    pub fn set_timings(&self, config: TimingConfig) {
        self.config.store(config);
    }

    pub fn timings(&self) -> TimingConfig {
        self.config.read()
    }

    // --- `frame` attribute ---

    /// Parses a frame submission (see [`parse_frame`]) and sends it with the
    /// installed timings.
    pub fn store_frame(&self, input: &str) -> Result<(), DeviceError<L::Error>> {
        let request = parse_frame(input)?;
        let frame = request.frame().map_err(TxError::<L::Error>::from)?;
        self.send_frame(&frame)?;
        Ok(())
    }

    /// Sends the first `bit_len` bits of `bytes` with the installed timings.
    pub fn send(&self, bytes: &[u8], bit_len: usize) -> Result<(), TxError<L::Error>> {
        let frame = Frame::new(bytes, bit_len)?;
        self.send_frame(&frame)
    }

    /// Sends `frame` with the timings installed when the line is taken.
    ///
    /// The snapshot and the whole transmission share one critical section, so
    /// a concurrent update applies either to this frame entirely or not at all.
    pub fn send_frame(&self, frame: &Frame<'_>) -> Result<(), TxError<L::Error>> {
        critical_section::with(|cs| {
            let config = self.config.snapshot(cs);
            self.transmitter.send_frame_in(cs, &config, frame)
        })
    }

    pub fn transmitter(&self) -> &FrameTransmitter<L> {
        &self.transmitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{
        format::BitFormat,
        mock::{MockLineError, RecordingLine},
        symbol::{encode_frame, Pulse},
    };
    use crate::control::ControlError;
    use std::sync::Arc;

    const REFERENCE_TIMINGS: &str = "100,50,80,40,20,60,60,20,0,2\n";

    fn probed() -> OokDevice<RecordingLine> {
        let device = OokDevice::probe(RecordingLine::new()).unwrap();
        device
            .transmitter()
            .with_line(|line| line.pulses.clear())
            .unwrap();
        device
    }

    #[test]
    fn test_probe_parks_line_low() {
        let device = OokDevice::probe(RecordingLine::new()).unwrap();
        assert_eq!(device.timings(), TimingConfig::default());
        let line = device.remove();
        assert_eq!(line.pulses, vec![Pulse::low(0)]);
        assert_eq!(line.release_count, 1);
    }

    #[test]
    fn test_probe_fails_without_line() {
        let mut line = RecordingLine::new();
        line.acquire_error = Some(MockLineError::NotPresent);
        let result = OokDevice::probe(line).map(|_| ());
        assert_eq!(result, Err(TxError::LineUnavailable(MockLineError::NotPresent)));
    }

    #[test]
    fn test_timings_attribute_roundtrip() {
        let device = probed();
        device.store_timings(REFERENCE_TIMINGS).unwrap();
        assert_eq!(device.show_timings().unwrap().as_str(), REFERENCE_TIMINGS);
        assert_eq!(device.timings().start_high, 100);
    }

    #[test]
    fn test_rejected_timings_keep_previous() {
        let device = probed();
        device.store_timings(REFERENCE_TIMINGS).unwrap();

        assert_eq!(
            device.store_timings("1,1,1,1,1,1,1,1,2,1"),
            Err(DeviceError::Config(ConfigError::InvalidFormat(2)))
        );
        assert_eq!(
            device.store_timings("1,1,1"),
            Err(DeviceError::Control(ControlError::FieldCount { expected: 10, found: 3 }))
        );
        assert_eq!(device.show_timings().unwrap().as_str(), REFERENCE_TIMINGS);
    }

    #[test]
    fn test_frame_attribute_sends_reference_frame() {
        let device = probed();
        device.store_timings(REFERENCE_TIMINGS).unwrap();
        device.store_frame("4,0xA0\n").unwrap();

        let line = device.remove();
        assert_eq!(line.pulses.len(), 26);
        assert_eq!(line.pulses[0], Pulse::high(100));
        assert_eq!(line.pulses[2], Pulse::high(60));
        assert_eq!(line.pulses[12], Pulse::low(0));
        assert_eq!(line.pulses[25], Pulse::low(0));
    }

    #[test]
    fn test_malformed_frame_touches_nothing() {
        let device = probed();
        device.store_timings(REFERENCE_TIMINGS).unwrap();

        assert_eq!(
            device.store_frame("16,0xFF"),
            Err(DeviceError::Control(ControlError::MissingSeparator { byte: 1 }))
        );
        assert_eq!(
            device.send(&[0xFF], 12),
            Err(TxError::InvalidBitLength { bit_len: 12, capacity: 8 })
        );

        let line = device.remove();
        assert!(line.pulses.is_empty());
    }

    #[test]
    fn test_unconfigured_device_sends_nothing() {
        let device = probed();
        device.store_frame("8,0x55").unwrap();
        assert!(device.remove().pulses.is_empty());
    }

    #[test]
    fn test_config_update_during_send_applies_to_next_frame() {
        let device = Arc::new(probed());
        let old = TimingConfig {
            start_high: 100,
            start_low: 50,
            end_high: 80,
            end_low: 40,
            bit0_high: 20,
            bit0_low: 60,
            bit1_high: 60,
            bit1_low: 20,
            format: BitFormat::HighThenLow,
            repeat_count: 2,
        };
        let new = TimingConfig {
            start_high: 7,
            format: BitFormat::LowThenHigh,
            repeat_count: 1,
            ..old
        };
        device.set_timings(old);

        // Install the new timings from inside the first level change.
        let hook_device = Arc::clone(&device);
        let mut fired = false;
        device
            .transmitter()
            .with_line(move |line| {
                line.on_set_level = Some(Box::new(move || {
                    if !fired {
                        fired = true;
                        hook_device.set_timings(new);
                    }
                }));
            })
            .unwrap();

        let bytes = [0b1010_0000];
        device.send(&bytes, 4).unwrap();
        assert_eq!(device.timings(), new);

        let first: std::vec::Vec<Pulse> = device
            .transmitter()
            .with_line(|line| {
                line.on_set_level = None;
                core::mem::take(&mut line.pulses)
            })
            .unwrap();
        let frame = Frame::new(&bytes, 4).unwrap();
        let expected_old: std::vec::Vec<Pulse> = encode_frame(&old, &frame).collect();
        assert_eq!(first, expected_old);

        device.send(&bytes, 4).unwrap();
        let second = Arc::try_unwrap(device).ok().unwrap().remove().pulses;
        let expected_new: std::vec::Vec<Pulse> = encode_frame(&new, &frame).collect();
        assert_eq!(second, expected_new);
    }
}
