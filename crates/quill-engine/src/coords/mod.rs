//! Coordinate types shared by the canvas and the text layout.
//!
//! Canonical space:
//! - backbuffer pixels
//! - origin top-left
//! - +X right, +Y down (positive rotation angles are clockwise)

mod point;
mod viewport;

pub use point::Point;
pub use viewport::Viewport;
