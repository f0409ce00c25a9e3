//! Time utilities driven by the event pump.
//!
//! - one `FrameClock` per session, ticked once per paint
//! - one `IntervalTimer` per session, polled by the pump

mod frame_clock;
mod timer;

pub use frame_clock::{FrameClock, FrameTime};
pub use timer::IntervalTimer;
