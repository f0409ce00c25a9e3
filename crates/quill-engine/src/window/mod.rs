//! Window and event pump.
//!
//! Owns the `winit` window (or none, for headless sessions) and the CPU
//! surface the backbuffer is presented to. The event loop is pumped
//! cooperatively: the session decides when and for how long to wait.

mod config;
mod platform;
mod surface;
mod translate;

pub use config::{WindowConfig, WindowStyle};
pub(crate) use platform::Platform;
pub(crate) use translate::PlatformEvent;
