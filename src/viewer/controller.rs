// SPDX-License-Identifier: MPL-2.0
//! The image viewport controller: owns the pixel buffer and viewport state,
//! orchestrates load/save through the gateway and normalizer, and publishes
//! a status line plus command availability for the shell to reflect.
//!
//! All operations run synchronously on the caller's thread. The buffer is
//! replaced atomically on a successful load; a failed load or save leaves
//! the previously displayed image and viewport untouched.

use crate::config::Config;
use crate::error::{Error, Result, SaveErrorReason};
use crate::media::{self, PixelBuffer};
use crate::viewer::commands::{CommandAvailability, CommandId};
use crate::viewer::viewport::{PageExtent, Viewport, ZoomLimits};
use std::path::Path;

pub struct ViewerController {
    image: Option<PixelBuffer>,
    viewport: Viewport,
    availability: CommandAvailability,
    status: String,
}

impl ViewerController {
    /// Builds a controller with zoom limits and the initial fit preference
    /// taken from the configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let limits = ZoomLimits {
            max: config.max_zoom.unwrap_or(crate::config::DEFAULT_MAX_ZOOM),
            min: config.min_zoom.unwrap_or(crate::config::DEFAULT_MIN_ZOOM),
        };
        let mut viewport = Viewport::new(limits);
        if config.fit_to_window.unwrap_or(false) {
            viewport.set_fit_to_window(true);
        }
        Self {
            image: None,
            viewport,
            availability: CommandAvailability::default(),
            status: String::new(),
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The human-readable message describing the last open/save outcome.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Currently published command enablement.
    #[must_use]
    pub fn availability(&self) -> CommandAvailability {
        self.availability
    }

    /// Opens and displays the image at `path`.
    ///
    /// On success the normalized buffer replaces the previous one wholesale
    /// and the viewport resets. On failure everything but the status line is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`Error::Load`] after recording it in the
    /// status surface.
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        match media::load_image(path) {
            Ok(decoded) => {
                let normalized = media::normalize(decoded);
                self.status = format!(
                    "Opened \"{}\", {}x{}, Depth: {}",
                    path.display(),
                    normalized.width(),
                    normalized.height(),
                    normalized.depth()
                );
                self.viewport
                    .load_new_image(normalized.width(), normalized.height());
                self.image = Some(normalized);
                self.refresh_availability();
                Ok(())
            }
            Err(error) => {
                self.status = error.to_string();
                Err(error)
            }
        }
    }

    /// Writes the current image to `path`, in whatever format the extension
    /// selects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Save`] when no image is loaded or the gateway fails;
    /// either way the displayed image is not marked dirty or altered.
    pub fn save_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let Some(buffer) = &self.image else {
            let error = Error::Save {
                path: path.to_path_buf(),
                reason: SaveErrorReason::NothingToSave,
            };
            self.status = error.to_string();
            return Err(error);
        };

        match media::save_image(path, buffer) {
            Ok(()) => {
                self.status = format!("Saved \"{}\"", path.display());
                Ok(())
            }
            Err(error) => {
                self.status = error.to_string();
                Err(error)
            }
        }
    }

    /// Zooms in by one step, if currently permitted.
    pub fn zoom_in(&mut self) {
        if self.availability.zoom_in {
            self.viewport.zoom_in();
            self.refresh_availability();
        }
    }

    /// Zooms out by one step, if currently permitted.
    pub fn zoom_out(&mut self) {
        if self.availability.zoom_out {
            self.viewport.zoom_out();
            self.refresh_availability();
        }
    }

    /// Resets the zoom to 1.0, if currently permitted.
    pub fn normal_size(&mut self) {
        if self.availability.normal_size {
            self.viewport.normal_size();
            self.refresh_availability();
        }
    }

    /// Enables or disables fit-to-window mode, if an image is loaded.
    pub fn set_fit_to_window(&mut self, enabled: bool) {
        if self.availability.fit_to_window {
            self.viewport.set_fit_to_window(enabled);
            self.refresh_availability();
        }
    }

    /// Tells the viewport how large the visible page currently is.
    pub fn set_page_extent(&mut self, page: PageExtent) {
        self.viewport.set_page_extent(page);
    }

    /// Updates the scroll position from the shell's scrollbars.
    pub fn set_scroll(&mut self, x: u32, y: u32) {
        self.viewport.set_scroll(x, y);
    }

    /// Dispatch table from command identifier to controller method,
    /// replacing UI-framework signal wiring. Returns `false` for commands
    /// that need more context than an identifier (`Save` requires a target
    /// path; call [`Self::save_file`]) and for disabled commands.
    pub fn dispatch(&mut self, command: CommandId) -> bool {
        if !self.availability.is_enabled(command) {
            return false;
        }
        match command {
            CommandId::ZoomIn => self.zoom_in(),
            CommandId::ZoomOut => self.zoom_out(),
            CommandId::NormalSize => self.normal_size(),
            CommandId::FitToWindow => {
                let enabled = !self.viewport.fit_to_window();
                self.set_fit_to_window(enabled);
            }
            CommandId::Save => return false,
        }
        true
    }

    /// Recomputes the published availability from scratch: the pure
    /// coordinator rules, with the zoom commands additionally masked by the
    /// viewport's post-step bound checks.
    fn refresh_availability(&mut self) {
        let mut availability = CommandAvailability::recompute(
            self.image.is_some(),
            self.viewport.fit_to_window(),
        );
        availability.zoom_in &= self.viewport.can_zoom_in();
        availability.zoom_out &= self.viewport.can_zoom_out();
        self.availability = availability;
    }
}
