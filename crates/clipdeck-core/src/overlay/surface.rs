/// Horizontal anchor of drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor at the left edge of the text.
    Left,
    /// Anchor at the right edge of the text.
    Right,
}

/// Vertical anchor of drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// Anchor at the top of the em box.
    Top,
    /// Anchor at the alphabetic baseline.
    Alphabetic,
}

/// Text rendering configuration for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS-like font shorthand.
    pub font: String,
    /// Fill colour.
    pub fill: String,
    /// Drop shadow colour.
    pub shadow_color: String,
    /// Drop shadow blur radius.
    pub shadow_blur: f64,
    /// Horizontal anchor.
    pub align: TextAlign,
    /// Vertical anchor.
    pub baseline: TextBaseline,
    /// Distance in pixels from the top-right corner.
    pub margin: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "24px Inter".to_string(),
            fill: "white".to_string(),
            shadow_color: "black".to_string(),
            shadow_blur: 5.0,
            align: TextAlign::Right,
            baseline: TextBaseline::Top,
            margin: 20.0,
        }
    }
}

/// Drawable layer on top of the playback surface.
pub trait OverlaySurface: Send {
    /// Show or hide the layer.
    fn set_visible(&mut self, visible: bool);

    /// Match the layer to the playback surface's displayed size.
    fn resize(&mut self, width: u32, height: u32);

    /// Apply the text style used by subsequent draws.
    fn configure(&mut self, style: &TextStyle);

    /// Erase everything drawn.
    fn clear(&mut self);

    /// Draw text anchored at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
