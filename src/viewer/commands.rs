// SPDX-License-Identifier: MPL-2.0
//! Command identifiers and derived enablement state.
//!
//! Availability is recomputed wholesale from controller state after every
//! mutation, never patched incrementally, so the shell's controls cannot
//! drift from the model.

/// The user-facing commands a shell can bind to menus or shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Save,
    ZoomIn,
    ZoomOut,
    NormalSize,
    FitToWindow,
}

impl CommandId {
    pub const ALL: [CommandId; 5] = [
        CommandId::Save,
        CommandId::ZoomIn,
        CommandId::ZoomOut,
        CommandId::NormalSize,
        CommandId::FitToWindow,
    ];

    /// Stable identifier for display and logging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CommandId::Save => "save",
            CommandId::ZoomIn => "zoom-in",
            CommandId::ZoomOut => "zoom-out",
            CommandId::NormalSize => "normal-size",
            CommandId::FitToWindow => "fit-to-window",
        }
    }
}

/// Enabled/disabled state for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandAvailability {
    pub save: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub normal_size: bool,
    pub fit_to_window: bool,
}

impl CommandAvailability {
    /// Derives enablement purely from controller state: saving needs an
    /// image; the zoom commands need an image and manual mode; the fit
    /// toggle needs an image.
    #[must_use]
    pub fn recompute(has_image: bool, fit_to_window: bool) -> Self {
        let manual = has_image && !fit_to_window;
        Self {
            save: has_image,
            zoom_in: manual,
            zoom_out: manual,
            normal_size: manual,
            fit_to_window: has_image,
        }
    }

    #[must_use]
    pub fn is_enabled(&self, id: CommandId) -> bool {
        match id {
            CommandId::Save => self.save,
            CommandId::ZoomIn => self.zoom_in,
            CommandId::ZoomOut => self.zoom_out,
            CommandId::NormalSize => self.normal_size,
            CommandId::FitToWindow => self.fit_to_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_image_disables_everything() {
        let availability = CommandAvailability::recompute(false, false);
        for id in CommandId::ALL {
            assert!(!availability.is_enabled(id), "{} should be disabled", id.name());
        }
    }

    #[test]
    fn loaded_image_in_manual_mode_enables_everything() {
        let availability = CommandAvailability::recompute(true, false);
        for id in CommandId::ALL {
            assert!(availability.is_enabled(id), "{} should be enabled", id.name());
        }
    }

    #[test]
    fn fit_mode_disables_manual_zoom_commands() {
        let availability = CommandAvailability::recompute(true, true);
        assert!(availability.save);
        assert!(availability.fit_to_window);
        assert!(!availability.zoom_in);
        assert!(!availability.zoom_out);
        assert!(!availability.normal_size);
    }

    #[test]
    fn command_names_are_stable() {
        assert_eq!(CommandId::Save.name(), "save");
        assert_eq!(CommandId::FitToWindow.name(), "fit-to-window");
    }
}
