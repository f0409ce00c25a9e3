//! Color model shared by the state cache and the compositor.
//!
//! Scalars are stored as straight-alpha bytes; premultiplication happens at
//! materialization time.

pub mod color;

pub use color::Rgba;
