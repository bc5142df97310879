//! UI and Loader Constants
//!
//! Centralized defaults for the list loader and the windowed renderer.

/// Default window dimensions
pub const DEFAULT_WINDOW_WIDTH: f32 = 1200.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 860.0;

/// Page size requested from the record source
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Retry configuration
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Fetch timeout; keeps the loader from sitting in `Loading` forever
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Cache configuration
pub const DEFAULT_CACHE_KEY: &str = "player_list_cache";
pub const MEMORY_STORE_CAPACITY: usize = 64;

/// Virtual list geometry (pixels)
pub const DEFAULT_ROW_HEIGHT: f32 = 120.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
pub const DEFAULT_OVERSCAN: usize = 5;

/// Scroll offset past which the "scroll to top" affordance is shown
pub const SCROLL_TOP_THRESHOLD: f32 = 300.0;

/// Missing-value sentinels used when sorting
pub const MISSING_METRIC_SENTINEL: f64 = 0.0;
pub const MISSING_SIXTY_TIME_SENTINEL: f64 = 999.0;

/// Vertical space taken by the header, toolbar, footer and padding around
/// the list viewport
pub const LIST_CHROME_HEIGHT: f32 = 320.0;

/// Width of the player detail panel
pub const DETAIL_PANEL_WIDTH: f32 = 320.0;
