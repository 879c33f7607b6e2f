//! Shared numeric constants for the map editor core.

// ── Interaction ─────────────────────────────────────────────────

/// Click proximity threshold in raw lat/lng degrees. A click closer than this
/// to an existing point is a removal request; at or beyond it, a new point.
pub const PROXIMITY_EPSILON: f64 = 0.0001;

/// Prompt shown before a point is removed by click.
pub const REMOVE_POINT_PROMPT: &str = "Are you sure you want to remove this point?";

/// Zone assigned to points created by click.
pub const DEFAULT_ZONE: u32 = 0;

// ── Markers ─────────────────────────────────────────────────────

/// Marker colours indexed by zone.
pub const ZONE_COLORS: [&str; 4] = ["blue", "red", "goldenrod", "green"];

/// Colour for zones outside [`ZONE_COLORS`] (the map library's default path colour).
pub const FALLBACK_ZONE_COLOR: &str = "#3388ff";

/// Marker circle radius in metres.
pub const MARKER_RADIUS_M: f64 = 4.0;

// ── Mask ────────────────────────────────────────────────────────

/// Neutral RGBA colour covering everything outside the boundary (`#B7B7B7`).
pub const MASK_FILL_RGBA: [u8; 4] = [0xB7, 0xB7, 0xB7, 0xFF];

/// Default raster tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Mask tiles kept per layer before the cache is flushed.
pub const MASK_CACHE_CAPACITY: usize = 1024;

// ── Viewport ────────────────────────────────────────────────────

/// Padding in pixels applied on every side when fitting the boundary.
pub const FIT_PADDING_PX: f64 = 20.0;

/// Max-bounds viscosity applied once a boundary is known (no overscroll).
pub const BOUNDARY_VISCOSITY: f64 = 1.0;

/// Lowest zoom the editor allows.
pub const MIN_ZOOM: u8 = 14;

/// Highest zoom the editor allows.
pub const MAX_ZOOM: u8 = 18;

/// Deepest zoom level accepted for tile requests.
pub const MAX_TILE_ZOOM: u8 = 24;

/// Map surface size assumed until the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1024.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 500.0;

/// Initial map center (latitude) before a boundary is fitted.
pub const INITIAL_CENTER_LAT: f64 = 48.682_366;

/// Initial map center (longitude) before a boundary is fitted.
pub const INITIAL_CENTER_LNG: f64 = 20.115_659;

/// Latitude limit of the spherical Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

// ── Backend ─────────────────────────────────────────────────────

/// Place-listing backend used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:1488";

/// Whole-request timeout for boundary and place fetches.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// TCP connect timeout for boundary and place fetches.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
