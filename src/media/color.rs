// SPDX-License-Identifier: MPL-2.0
//! Color normalization to the canonical in-memory representation.
//!
//! The viewport always renders RGBA8 in sRGB. Decoders may hand back other
//! channel orderings (BGRA is common) or linear-light samples; this module
//! rewrites both. Normalization has no failure mode: an untagged or
//! unsupported color space is passed through unchanged rather than reported
//! as an error.

use crate::media::{ChannelLayout, ColorSpace, PixelBuffer};

/// Converts a decoded buffer into the canonical representation.
///
/// The output is always `Rgba8`. If the source carried a color-space tag the
/// samples are converted to sRGB and retagged; untagged samples keep their
/// values (assumed already canonical). Idempotent: normalizing a canonical
/// buffer returns it unchanged.
#[must_use]
pub fn normalize(buffer: PixelBuffer) -> PixelBuffer {
    let canonical_layout = buffer.layout() == ChannelLayout::Rgba8;
    let canonical_space = matches!(buffer.color_space(), ColorSpace::Srgb | ColorSpace::Untagged);
    if canonical_layout && canonical_space {
        return buffer;
    }

    let width = buffer.width();
    let height = buffer.height();
    let color_space = buffer.color_space();
    let mut rgba = to_rgba8(&buffer);

    let out_space = match color_space {
        ColorSpace::LinearRgb => {
            encode_srgb_in_place(&mut rgba);
            ColorSpace::Srgb
        }
        other => other,
    };

    PixelBuffer::new(width, height, ChannelLayout::Rgba8, out_space, rgba)
}

/// Rewrites the samples into RGBA order, expanding grayscale and adding an
/// opaque alpha channel where the source has none.
fn to_rgba8(buffer: &PixelBuffer) -> Vec<u8> {
    let samples = buffer.samples();
    let pixel_count = buffer.width() as usize * buffer.height() as usize;
    let mut rgba = Vec::with_capacity(pixel_count * 4);

    match buffer.layout() {
        ChannelLayout::Rgba8 => rgba.extend_from_slice(samples),
        ChannelLayout::Bgra8 => {
            for px in samples.chunks_exact(4) {
                rgba.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        }
        ChannelLayout::Rgb8 => {
            for px in samples.chunks_exact(3) {
                rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        ChannelLayout::Bgr8 => {
            for px in samples.chunks_exact(3) {
                rgba.extend_from_slice(&[px[2], px[1], px[0], 255]);
            }
        }
        ChannelLayout::Gray8 => {
            for &luma in samples {
                rgba.extend_from_slice(&[luma, luma, luma, 255]);
            }
        }
        ChannelLayout::GrayAlpha8 => {
            for px in samples.chunks_exact(2) {
                rgba.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
        }
    }

    rgba
}

/// Applies the sRGB transfer function to the color channels of RGBA samples.
/// Alpha is coverage, not light, and stays untouched.
fn encode_srgb_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        px[0] = linear_to_srgb(px[0]);
        px[1] = linear_to_srgb(px[1]);
        px[2] = linear_to_srgb(px[2]);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn linear_to_srgb(value: u8) -> u8 {
    let v = f64::from(value) / 255.0;
    let encoded = if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}
