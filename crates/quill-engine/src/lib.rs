//! Quill engine crate.
//!
//! A small immediate-mode 2D drawing toolkit: one window, one backbuffer, and
//! callbacks that draw shapes, text and images into it between presents.
//!
//! ```no_run
//! use quill_engine::{Rgba, Session, WindowConfig};
//!
//! let mut session = Session::init(WindowConfig::new("hello", 320, 240))?;
//! session.events().on_paint(|ctx| {
//!     ctx.canvas.clear(Rgba::BLACK);
//!     ctx.canvas.fill_color(Rgba::rgb(200, 40, 40));
//!     ctx.canvas.fill_rect(20.0, 20.0, 100.0, 60.0);
//! });
//! session.run();
//! # Ok::<(), quill_engine::error::InitError>(())
//! ```

pub mod canvas;
pub mod coords;
pub mod error;
pub mod events;
pub mod image;
pub mod input;
pub mod logging;
pub mod paint;
mod session;
pub mod text;
pub mod time;
pub mod window;

pub use canvas::{Canvas, EffectLevel, PenStyle};
pub use events::{Event, EventCtx, EventKind, MouseEvent};
pub use image::{Image, ImageId, ImageKey};
pub use input::Key;
pub use paint::Rgba;
pub use session::Session;
pub use text::{FontStyle, TextAlign};
pub use window::{WindowConfig, WindowStyle};
