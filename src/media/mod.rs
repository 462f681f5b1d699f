// SPDX-License-Identifier: MPL-2.0
//! Pixel buffer model and file handling for still images.
//!
//! The controller owns exactly one [`PixelBuffer`] at a time. A buffer is
//! replaced wholesale on every successful load and never mutated in place,
//! so no torn image state is ever observable.

pub mod color;
pub mod formats;
pub mod image;

// Re-export commonly used types
pub use color::normalize;
pub use formats::{filters_for, CodecRegistry, DialogIntent, DialogSession, FilterSet, FormatFilter};
pub use image::{load_image, save_image};

/// Channel ordering of the raw samples, 8 bits per channel.
///
/// `Rgba8` is the canonical in-memory layout the viewport renders from;
/// everything else is a decoder output that [`color::normalize`] rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Rgba8,
    Bgra8,
    Rgb8,
    Bgr8,
    Gray8,
    GrayAlpha8,
}

impl ChannelLayout {
    /// Number of channels per pixel.
    #[must_use]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgba8 | ChannelLayout::Bgra8 => 4,
            ChannelLayout::Rgb8 | ChannelLayout::Bgr8 => 3,
            ChannelLayout::GrayAlpha8 => 2,
            ChannelLayout::Gray8 => 1,
        }
    }

    /// Bytes occupied by one pixel.
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        self.channels()
    }

    /// Whether the layout carries an alpha channel.
    #[must_use]
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            ChannelLayout::Rgba8 | ChannelLayout::Bgra8 | ChannelLayout::GrayAlpha8
        )
    }
}

/// Color space the samples are expressed in.
///
/// `Untagged` means the source carried no embedded tag; such samples are
/// assumed canonical and passed through unchanged by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    LinearRgb,
    Untagged,
}

/// A decoded raster image: dimensions, sample layout, and contiguous raw
/// samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    color_space: ColorSpace,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer from raw samples.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or if the sample length does not
    /// equal `width * height * bytes_per_pixel`. Callers decode real files
    /// through [`image::load_image`], which reports those cases as errors
    /// instead of constructing an invalid buffer.
    #[must_use]
    pub fn new(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        color_space: ColorSpace,
        samples: Vec<u8>,
    ) -> Self {
        assert!(width > 0 && height > 0, "pixel buffer dimensions must be non-zero");
        assert_eq!(
            samples.len(),
            width as usize * height as usize * layout.bytes_per_pixel(),
            "sample length must match dimensions and layout"
        );
        Self {
            width,
            height,
            layout,
            color_space,
            samples,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    #[must_use]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Raw samples in the buffer's [`ChannelLayout`].
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Bits per pixel, as reported in the status line after a load.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.layout.channels() as u32 * 8
    }
}
