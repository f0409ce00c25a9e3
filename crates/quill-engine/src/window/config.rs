/// How the session window is created.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WindowStyle {
    /// Fixed-size decorated window.
    #[default]
    Fixed,
    /// Decorated window the user can resize.
    Sizeable,
    /// Borderless fullscreen on the current monitor.
    Fullscreen,
    /// No window at all: drawing goes to a backbuffer that is presented into
    /// an in-memory front buffer.
    Backbuffer,
}

/// Window creation parameters.
///
/// Sizes are physical pixels; the backbuffer is allocated at the same size.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Outer position; `None` lets the platform choose.
    pub position: Option<(i32, i32)>,
    pub width: u32,
    pub height: u32,
    pub style: WindowStyle,
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "quill".to_string(),
            position: None,
            width: 640,
            height: 480,
            style: WindowStyle::Fixed,
            visible: true,
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Headless configuration: no window, no event loop.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::new("quill", width, height).style(WindowStyle::Backbuffer)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}
