// SPDX-License-Identifier: MPL-2.0
//! Viewer state management modules
//!
//! Everything with real state lives here: the scaling engine, the derived
//! command enablement, and the controller that ties them to the media layer.

pub mod commands;
pub mod controller;
pub mod viewport;

// Re-export commonly used types for convenience
pub use commands::{CommandAvailability, CommandId};
pub use controller::ViewerController;
pub use viewport::{PageExtent, Viewport, ZoomLimits, ZoomMode};
