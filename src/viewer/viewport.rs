// SPDX-License-Identifier: MPL-2.0
//! Viewport scaling engine: zoom factor, fit-to-window mode, and scroll
//! offsets, kept consistent across every zoom change.
//!
//! The scroll synchronization formula anchors the point at the center of the
//! visible page across a zoom step:
//!
//! ```text
//! new_offset = round(f * old_offset + (f - 1) * page_extent / 2)
//! ```
//!
//! clamped to `[0, content_extent - page_extent]`. This is deliberately the
//! page center, not the image center, so whatever the user is looking at
//! stays put while zooming.

// Zoom enablement limits live in the centralized config.
pub use crate::config::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};

/// Multiplier applied by one zoom-in step (25% in).
pub const ZOOM_IN_FACTOR: f64 = 1.25;

/// Multiplier applied by one zoom-out step (25% out).
pub const ZOOM_OUT_FACTOR: f64 = 0.75;

/// Display mode of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomMode {
    /// User-controlled zoom factor. The default.
    Manual,
    /// Zoom implicitly tracks the viewport size. The engine only flags the
    /// mode; the host resizes the content continuously.
    FitToWindow,
}

/// Visible (non-scrolled) extent of the viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageExtent {
    pub width: u32,
    pub height: u32,
}

/// Zoom factors past which the zoom commands are disabled. The stored factor
/// itself is unbounded; bounds are checked after a step is applied, so the
/// factor can slightly exceed them (about 3.05 after five zoom-ins).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub max: f64,
    pub min: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX_ZOOM,
            min: DEFAULT_MIN_ZOOM,
        }
    }
}

/// Owns zoom factor, mode, and scroll offsets for the displayed image.
///
/// Lifecycle is tied to the displayed buffer: every new image resets to
/// manual mode at 1.0 with the scroll at the origin.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom_factor: f64,
    mode: ZoomMode,
    scroll_x: u32,
    scroll_y: u32,
    page: PageExtent,
    image_size: Option<(u32, u32)>,
    limits: ZoomLimits,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl Viewport {
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            zoom_factor: 1.0,
            mode: ZoomMode::Manual,
            scroll_x: 0,
            scroll_y: 0,
            page: PageExtent::default(),
            image_size: None,
            limits,
        }
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    #[must_use]
    pub fn mode(&self) -> ZoomMode {
        self.mode
    }

    #[must_use]
    pub fn fit_to_window(&self) -> bool {
        self.mode == ZoomMode::FitToWindow
    }

    /// Current scroll offsets `(x, y)`.
    #[must_use]
    pub fn scroll(&self) -> (u32, u32) {
        (self.scroll_x, self.scroll_y)
    }

    #[must_use]
    pub fn page_extent(&self) -> PageExtent {
        self.page
    }

    /// Scaled content extent `(width, height)` at the current zoom, if an
    /// image is present.
    #[must_use]
    pub fn content_extent(&self) -> Option<(u64, u64)> {
        let (width, height) = self.image_size?;
        Some((
            scaled_extent(width, self.zoom_factor),
            scaled_extent(height, self.zoom_factor),
        ))
    }

    /// Resets for a newly loaded image: manual mode, zoom 1.0, scroll at the
    /// origin.
    pub fn load_new_image(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.mode = ZoomMode::Manual;
        self.zoom_factor = 1.0;
        self.scroll_x = 0;
        self.scroll_y = 0;
    }

    /// Updates the visible page extent (host window geometry changed).
    pub fn set_page_extent(&mut self, page: PageExtent) {
        self.page = page;
        self.clamp_scroll();
    }

    /// Sets the scroll offsets, clamped to the content bounds.
    pub fn set_scroll(&mut self, x: u32, y: u32) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll();
    }

    /// Whether a further zoom-in step should be offered.
    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.zoom_factor < self.limits.max
    }

    /// Whether a further zoom-out step should be offered.
    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.zoom_factor > self.limits.min
    }

    /// Zooms in by one step. Only meaningful in manual mode with an image.
    pub fn zoom_in(&mut self) {
        if self.mode == ZoomMode::Manual {
            self.scale_by(ZOOM_IN_FACTOR);
        }
    }

    /// Zooms out by one step. Only meaningful in manual mode with an image.
    pub fn zoom_out(&mut self) {
        if self.mode == ZoomMode::Manual {
            self.scale_by(ZOOM_OUT_FACTOR);
        }
    }

    /// Resets the zoom factor to 1.0 without moving the scroll offsets
    /// (beyond the clamp the shrunken content forces).
    pub fn normal_size(&mut self) {
        if self.mode == ZoomMode::Manual {
            self.zoom_factor = 1.0;
            self.clamp_scroll();
        }
    }

    /// Switches between fit-to-window and manual mode. Leaving fit mode
    /// resets to normal size, matching the menu semantics of unchecking
    /// "Fit to Window".
    pub fn set_fit_to_window(&mut self, enabled: bool) {
        if enabled {
            self.mode = ZoomMode::FitToWindow;
        } else {
            self.mode = ZoomMode::Manual;
            self.normal_size();
        }
    }

    /// Zoom factor that would fit the image inside the current page extent,
    /// for hosts that drive fit-to-window rendering.
    #[must_use]
    pub fn fit_zoom_factor(&self) -> Option<f64> {
        let (width, height) = self.image_size?;
        if self.page.width == 0 || self.page.height == 0 || width == 0 || height == 0 {
            return None;
        }
        let scale_x = f64::from(self.page.width) / f64::from(width);
        let scale_y = f64::from(self.page.height) / f64::from(height);
        Some(scale_x.min(scale_y))
    }

    /// Applies a multiplicative zoom step and synchronizes both scroll axes.
    fn scale_by(&mut self, factor: f64) {
        if self.image_size.is_none() {
            return;
        }
        self.zoom_factor *= factor;

        let (content_w, content_h) = self.content_extent().unwrap_or((0, 0));
        self.scroll_x = sync_axis(self.scroll_x, factor, self.page.width, content_w);
        self.scroll_y = sync_axis(self.scroll_y, factor, self.page.height, content_h);
    }

    fn clamp_scroll(&mut self) {
        let Some((content_w, content_h)) = self.content_extent() else {
            self.scroll_x = 0;
            self.scroll_y = 0;
            return;
        };
        self.scroll_x = self.scroll_x.min(max_offset(self.page.width, content_w));
        self.scroll_y = self.scroll_y.min(max_offset(self.page.height, content_h));
    }
}

/// Content extent of one axis at the given zoom.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_extent(length: u32, zoom: f64) -> u64 {
    (f64::from(length) * zoom).round().max(0.0) as u64
}

/// Largest legal scroll offset for one axis.
fn max_offset(page: u32, content: u64) -> u32 {
    u32::try_from(content.saturating_sub(u64::from(page))).unwrap_or(u32::MAX)
}

/// Keeps the center of the visible page anchored across a zoom step, then
/// clamps into the content bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sync_axis(offset: u32, factor: f64, page: u32, content: u64) -> u32 {
    let anchored = factor * f64::from(offset) + (factor - 1.0) * f64::from(page) / 2.0;
    let max = f64::from(max_offset(page, content));
    anchored.round().clamp(0.0, max) as u32
}
