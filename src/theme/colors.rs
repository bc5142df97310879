//! Colors - Roster Theme Colors
//!
//! Dark slate surface with an emerald accent. Amber marks degraded states
//! (offline, cached data), red marks failures.

use gpui::{Rgba, rgb, rgba};

/// Roster color palette - All colors are accessed via associated functions
pub struct RosterColors;

impl RosterColors {
    // Backgrounds
    /// Window background
    pub fn background() -> Rgba { rgb(0x0f172a) }
    /// Card / list container
    pub fn surface() -> Rgba { rgb(0x111c33) }
    /// Raised surface (inputs, chips)
    pub fn surface_raised() -> Rgba { rgb(0x1e293b) }
    /// Row hover
    pub fn row_hover() -> Rgba { rgba(0xffffff0d) }
    /// Selected row
    pub fn row_selected() -> Rgba { rgba(0x10b98126) }
    /// Skeleton placeholder block
    pub fn skeleton() -> Rgba { rgba(0xffffff14) }

    // Text
    pub fn text_primary() -> Rgba { rgb(0xffffff) }
    pub fn text_secondary() -> Rgba { rgb(0x94a3b8) }
    pub fn text_muted() -> Rgba { rgb(0x64748b) }

    // Accent
    /// Primary accent - Emerald
    pub fn accent() -> Rgba { rgb(0x10b981) }
    pub fn accent_hover() -> Rgba { rgb(0x059669) }
    pub fn accent_text() -> Rgba { rgb(0x34d399) }
    /// Accent tint for chips and badges
    pub fn accent_soft() -> Rgba { rgba(0x10b98133) }

    // Status
    /// Warning - Amber (network loss, cached data)
    pub fn warning() -> Rgba { rgb(0xf59e0b) }
    pub fn warning_text() -> Rgba { rgb(0xfcd34d) }
    pub fn warning_soft() -> Rgba { rgba(0xf59e0b1a) }
    /// Error - Red
    pub fn danger() -> Rgba { rgb(0xef4444) }
    pub fn danger_text() -> Rgba { rgb(0xf87171) }
    pub fn danger_soft() -> Rgba { rgba(0xef444433) }
    /// Committed badge - Blue
    pub fn info() -> Rgba { rgb(0x3b82f6) }
    pub fn info_soft() -> Rgba { rgba(0x3b82f633) }

    // Borders
    pub fn border() -> Rgba { rgba(0xffffff1a) }
    pub fn border_focus() -> Rgba { rgb(0x10b981) }

    // Buttons
    pub fn button_primary_bg() -> Rgba { rgb(0x10b981) }
    pub fn button_primary_text() -> Rgba { rgb(0xffffff) }
    pub fn button_ghost_text() -> Rgba { rgb(0x94a3b8) }
}
