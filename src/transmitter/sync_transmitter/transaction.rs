// src/transmitter/sync_transmitter/transaction.rs

use crate::common::{
    error::TxError,
    format::Level,
    hal_traits::{OokLine, OokTimer},
    symbol::Pulse,
};
use crate::fmt::error;

/// Exclusive use of an acquired line for one transmission.
///
/// The line is released when the session is dropped, whatever the outcome.
pub(super) struct LineSession<'l, L>
where
    L: OokLine + OokTimer,
{
    line: &'l mut L,
}

impl<'l, L> LineSession<'l, L>
where
    L: OokLine + OokTimer,
{
    /// Claims the line. Nothing is toggled if this fails.
    pub(super) fn acquire(line: &'l mut L) -> Result<Self, TxError<L::Error>> {
        match line.acquire() {
            Ok(()) => Ok(LineSession { line }),
            Err(e) => {
                error!("line acquisition failed");
                Err(TxError::LineUnavailable(e))
            }
        }
    }

    /// Plays `pulses` in order: set the level, then hold it.
    ///
    /// A failing level change aborts the rest of the sequence, parks the line
    /// low (best effort) and reports a fault. Returns the number of pulses
    /// played on success.
    pub(super) fn play<I>(&mut self, pulses: I) -> Result<usize, TxError<L::Error>>
    where
        I: IntoIterator<Item = Pulse>,
    {
        let mut played = 0;
        for pulse in pulses {
            if let Err(e) = self.line.set_level(pulse.level) {
                error!("line fault after {} pulses, frame aborted", played);
                let _ = self.line.set_level(Level::Low);
                return Err(TxError::LineFault(e));
            }
            self.line.delay_us(pulse.duration_us);
            played += 1;
        }
        Ok(played)
    }
}

impl<L> Drop for LineSession<'_, L>
where
    L: OokLine + OokTimer,
{
    fn drop(&mut self) {
        self.line.release();
    }
}
