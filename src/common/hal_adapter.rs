// src/common/hal_adapter.rs

//! Bridges an `embedded-hal` v1 output pin and delay provider to the
//! [`OokLine`] / [`OokTimer`] traits.

use super::format::Level;
use super::hal_traits::{OokLine, OokTimer};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// An OOK line made of one push-pull output pin and a blocking delay.
///
/// The pin is owned by value, so acquisition cannot be contended; `acquire`
/// only parks the line low, which also surfaces a dead pin before the frame
/// starts.
#[derive(Debug)]
pub struct HalLine<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> HalLine<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        HalLine { pin, delay }
    }

    /// Returns the pin and delay provider.
    pub fn into_parts(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> OokLine for HalLine<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn acquire(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        }
    }

    fn release(&mut self) {}
}

impl<P, D> OokTimer for HalLine<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn delay_us(&mut self, us: u32) {
        if us > 0 {
            self.delay.delay_us(us);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BitFormat, TimingConfig};
    use crate::transmitter::FrameTransmitter;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn test_hal_line_drives_pin() {
        let expectations = [
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ];
        let mut pin = PinMock::new(&expectations);
        let mut line = HalLine::new(pin.clone(), NoopDelay::new());

        line.acquire().unwrap();
        line.set_level(Level::High).unwrap();
        line.delay_us(10);
        line.set_level(Level::Low).unwrap();
        line.release();

        pin.done();
    }

    #[test]
    fn test_hal_line_frame_transmission() {
        let config = TimingConfig {
            start_high: 10,
            start_low: 5,
            end_high: 8,
            end_low: 4,
            bit0_high: 2,
            bit0_low: 6,
            bit1_high: 6,
            bit1_low: 2,
            format: BitFormat::HighThenLow,
            repeat_count: 1,
        };

        // acquire, start, bit 1, bit 0, end, forced idle
        let expectations = [
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::Low),
        ];
        let mut pin = PinMock::new(&expectations);
        let transmitter = FrameTransmitter::new(HalLine::new(pin.clone(), NoopDelay::new()));

        transmitter.send(&config, &[0b1000_0000], 2).unwrap();

        let (_pin, _delay) = transmitter.into_inner().into_parts();
        pin.done();
    }
}
