/// Web front-end tuning and DOM wiring constants.
///
/// Navigation tuning lives in `museum_core::constants`; this file only holds
/// what the browser host needs.
// Largest frame delta handed to the core (seconds); guards against tab-switch spikes
pub const MAX_FRAME_DT: f32 = 0.1;

// Catalog fetched next to the page; the built-in gallery is used on failure
pub const GALLERY_URL: &str = "gallery.toml";

// Loading overlay element ids and classes
pub const LOADING_OVERLAY_ID: &str = "loading-overlay";
pub const LOADING_BAR_ID: &str = "loading-bar";
pub const LOADING_TEXT_ID: &str = "loading-text";
pub const HIDDEN_CLASS: &str = "hidden";
pub const FLASH_CLASS: &str = "flash";

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`.
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
