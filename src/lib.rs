// SPDX-License-Identifier: MPL-2.0
//! `photo_lens` is the headless core of a single-image viewer and light
//! editor.
//!
//! It owns the in-memory pixel buffer, normalizes its color representation,
//! keeps zoom and scroll state consistent, and negotiates file formats on
//! load and save. A UI shell binds to [`viewer::ViewerController`], renders
//! the buffer at the viewport's scale and scroll position, and reflects the
//! controller's status line and [`viewer::CommandAvailability`] back to the
//! user.

#![doc(html_root_url = "https://docs.rs/photo_lens/0.1.0")]

pub mod config;
pub mod error;
pub mod media;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_utils;
