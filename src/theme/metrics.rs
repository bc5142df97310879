//! Metrics - Sizes, Spacing and Type Scale

/// Layout and type constants
pub struct Metrics;

impl Metrics {
    // Font sizes
    pub const TEXT_XS: f32 = 12.0;
    pub const TEXT_SM: f32 = 14.0;
    pub const TEXT_BASE: f32 = 16.0;
    pub const TEXT_LG: f32 = 18.0;
    pub const TEXT_XL: f32 = 20.0;

    // Spacing
    pub const GAP_SM: f32 = 4.0;
    pub const GAP_MD: f32 = 8.0;
    pub const GAP_LG: f32 = 16.0;
    pub const PADDING_ROW: f32 = 12.0;

    // Radii
    pub const RADIUS_SM: f32 = 6.0;
    pub const RADIUS_LG: f32 = 12.0;
    pub const RADIUS_FULL: f32 = 9999.0;

    // Row content
    pub const AVATAR_SIZE: f32 = 48.0;
    pub const CHECKBOX_SIZE: f32 = 18.0;
    pub const SCROLL_TOP_BUTTON: f32 = 40.0;

    /// Pixels per line for line-based wheel deltas
    pub const WHEEL_LINE_HEIGHT: f32 = 20.0;
}
