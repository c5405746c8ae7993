// src/transmitter/sync_transmitter/mod.rs

use crate::common::{
    config::TimingConfig,
    error::TxError,
    frame::Frame,
    hal_traits::{OokLine, OokTimer},
    symbol::{encode_frame, Pulse},
};
use core::cell::RefCell;
use critical_section::{CriticalSection, Mutex};
use crate::fmt::{debug, trace};

mod transaction;

use transaction::LineSession;

/// Plays OOK frames on one output line.
///
/// The line lives behind a single lock for the transmitter's whole lifetime.
/// Each `send` holds that lock, inside a critical section, from before the
/// first start marker until after the last forced idle pulse, so two frames
/// never interleave and the busy-wait delays are not preempted.
///
/// Correct symbol timing still depends on the platform: on hosted targets
/// the critical section only serialises callers, it cannot stop the OS
/// scheduler from stretching a delay.
pub struct FrameTransmitter<L> {
    line: Mutex<RefCell<L>>,
}

impl<L> core::fmt::Debug for FrameTransmitter<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameTransmitter").finish_non_exhaustive()
    }
}

impl<L> FrameTransmitter<L>
where
    L: OokLine + OokTimer,
{
    pub const fn new(line: L) -> Self {
        FrameTransmitter {
            line: Mutex::new(RefCell::new(line)),
        }
    }

    /// Sends the first `bit_len` bits of `bytes` (MSB first) using `config`.
    ///
    /// Fails with [`TxError::InvalidBitLength`] before touching the line if
    /// `bytes` holds fewer than `bit_len` bits.
    pub fn send(
        &self,
        config: &TimingConfig,
        bytes: &[u8],
        bit_len: usize,
    ) -> Result<(), TxError<L::Error>> {
        let frame = Frame::new(bytes, bit_len)?;
        self.send_frame(config, &frame)
    }

    /// Sends an already validated frame.
    pub fn send_frame(
        &self,
        config: &TimingConfig,
        frame: &Frame<'_>,
    ) -> Result<(), TxError<L::Error>> {
        critical_section::with(|cs| self.send_frame_in(cs, config, frame))
    }

    /// Sends a frame inside a critical section the caller already holds.
    ///
    /// Lets a caller capture other shared state (typically the current
    /// configuration) atomically with the start of the frame.
    pub fn send_frame_in(
        &self,
        cs: CriticalSection<'_>,
        config: &TimingConfig,
        frame: &Frame<'_>,
    ) -> Result<(), TxError<L::Error>> {
        if config.repeat_count == 0 {
            debug!("repeat count is 0, nothing to send");
            return Ok(());
        }

        let mut line = self
            .line
            .borrow(cs)
            .try_borrow_mut()
            .map_err(|_| TxError::<L::Error>::Busy)?;

        debug!(
            "sending {} bits x{}",
            frame.bit_len(),
            config.repeat_count
        );

        let mut session = LineSession::acquire(&mut *line)?;
        let played = session.play(encode_frame(config, frame))?;

        trace!("frame done, {} pulses", played);
        Ok(())
    }

    /// Acquires the line, drives it low and releases it again.
    ///
    /// Used at registration to put the line in its idle state before the
    /// first frame.
    pub fn park(&self) -> Result<(), TxError<L::Error>> {
        critical_section::with(|cs| {
            let mut line = self
                .line
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| TxError::<L::Error>::Busy)?;
            LineSession::acquire(&mut *line)?.play([Pulse::IDLE])?;
            Ok(())
        })
    }

    /// Runs `f` with exclusive access to the line, outside of any frame.
    ///
    /// Returns [`TxError::Busy`] when called from inside a transmission.
    pub fn with_line<R>(&self, f: impl FnOnce(&mut L) -> R) -> Result<R, TxError<L::Error>> {
        critical_section::with(|cs| {
            let mut line = self
                .line
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| TxError::<L::Error>::Busy)?;
            Ok(f(&mut line))
        })
    }

    /// Consumes the transmitter and returns the line.
    pub fn into_inner(self) -> L {
        self.line.into_inner().into_inner()
    }
}
