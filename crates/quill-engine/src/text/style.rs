use bitflags::bitflags;

bitflags! {
    /// Font style bits; any combination is allowed.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct FontStyle: u32 {
        const BOLD      = 1;
        const ITALIC    = 2;
        const UNDERLINE = 4;
        const STRIKEOUT = 8;
    }
}

impl FontStyle {
    pub const NORMAL: FontStyle = FontStyle::empty();
}

bitflags! {
    /// Placement of text inside a `draw_text` box.
    ///
    /// Setting both bits of an axis centers on that axis; no bits means
    /// top-left.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct TextAlign: u32 {
        const LEFT   = 1;
        const RIGHT  = 2;
        const TOP    = 4;
        const BOTTOM = 8;

        const CENTER_H = Self::LEFT.bits() | Self::RIGHT.bits();
        const CENTER_V = Self::TOP.bits() | Self::BOTTOM.bits();
        const CENTER   = Self::CENTER_H.bits() | Self::CENTER_V.bits();
    }
}

impl TextAlign {
    pub(crate) fn horizontal(self) -> fontdue::layout::HorizontalAlign {
        use fontdue::layout::HorizontalAlign;
        match (self.contains(Self::LEFT), self.contains(Self::RIGHT)) {
            (true, true) => HorizontalAlign::Center,
            (false, true) => HorizontalAlign::Right,
            _ => HorizontalAlign::Left,
        }
    }

    pub(crate) fn vertical(self) -> fontdue::layout::VerticalAlign {
        use fontdue::layout::VerticalAlign;
        match (self.contains(Self::TOP), self.contains(Self::BOTTOM)) {
            (true, true) => VerticalAlign::Middle,
            (false, true) => VerticalAlign::Bottom,
            _ => VerticalAlign::Top,
        }
    }
}
