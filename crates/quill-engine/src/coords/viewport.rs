/// Placement of the backbuffer inside the window's client area.
///
/// `width`/`height` are the backbuffer dimensions; `x`/`y` is where its top-left
/// corner lands when the backbuffer is presented.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub const fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_viewport_is_invalid() {
        assert!(!Viewport::sized(0, 10).is_valid());
        assert!(!Viewport::sized(10, 0).is_valid());
        assert!(Viewport::new(-5, 3, 1, 1).is_valid());
    }
}
