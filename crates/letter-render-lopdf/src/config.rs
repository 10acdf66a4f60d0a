/// Page geometry, in PostScript points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Height of one spacer block.
    pub spacer_height: f32,
}

impl PageConfig {
    /// A4 with the letter's default margins.
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_left: 50.0,
            margin_right: 50.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
            spacer_height: 14.0,
        }
    }

    pub fn usable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn usable_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4()
    }
}
