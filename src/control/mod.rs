// src/control/mod.rs

// Text transport in front of the core: the `timings` and `frame` attributes
// of a registered device.

mod device;
mod error;
mod formatter;
mod parser;

// --- Public Re-exports ---
pub use device::OokDevice;
pub use error::{ControlError, DeviceError};
pub use formatter::{format_timings, TIMINGS_TEXT_LEN};
pub use parser::{parse_frame, parse_timings, FrameRequest, MAX_FRAME_BYTES, TIMING_FIELDS};
