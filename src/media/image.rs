// SPDX-License-Identifier: MPL-2.0
//! File I/O gateway: decoding files into pixel buffers and encoding buffers
//! back to disk.
//!
//! Decoding sniffs the content rather than trusting the extension; encoding
//! resolves the codec from the target extension. Buffers come back exactly
//! as the decoder produced them (plus EXIF auto-orientation); color
//! normalization is the caller's concern, which keeps decode and color
//! policy independently testable.

use crate::error::{Error, LoadErrorReason, Result, SaveErrorReason};
use crate::media::{ChannelLayout, ColorSpace, PixelBuffer};
use image_rs::{DynamicImage, ExtendedColorType, GenericImageView, ImageError, ImageFormat};
use std::borrow::Cow;
use std::fs;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Decodes the file at `path` into a raw pixel buffer.
///
/// EXIF orientation is applied so the buffer is upright, mirroring what
/// camera files expect of a viewer. An EXIF sRGB tag becomes the buffer's
/// color-space tag; files without one are `Untagged`.
///
/// # Errors
///
/// Returns [`Error::Load`] when the path does not exist, no decoder
/// recognizes the contents, or decoding produces a zero-dimension result.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|e| {
        let reason = if e.kind() == std::io::ErrorKind::NotFound {
            LoadErrorReason::NotFound
        } else {
            LoadErrorReason::Io(e.to_string())
        };
        load_error(path, reason)
    })?;

    let decoded = image_rs::load_from_memory(&bytes).map_err(|e| {
        let reason = match e {
            ImageError::IoError(io) => LoadErrorReason::Io(io.to_string()),
            other => LoadErrorReason::UnrecognizedFormat(other.to_string()),
        };
        load_error(path, reason)
    })?;

    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(load_error(path, LoadErrorReason::EmptyImage));
    }

    let (orientation, color_space) = read_exif_hints(&bytes);
    let upright = apply_orientation(decoded, orientation);
    // Orientation may have swapped the axes.
    let (width, height) = upright.dimensions();

    let (layout, samples) = match upright {
        DynamicImage::ImageLuma8(buf) => (ChannelLayout::Gray8, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (ChannelLayout::GrayAlpha8, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (ChannelLayout::Rgb8, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (ChannelLayout::Rgba8, buf.into_raw()),
        // 16-bit and float variants are reduced to 8 bits per channel.
        other => (ChannelLayout::Rgba8, other.into_rgba8().into_raw()),
    };

    Ok(PixelBuffer::new(width, height, layout, color_space, samples))
}

/// Encodes `buffer` to the file at `path`, resolving the codec from the
/// extension.
///
/// JPEG has no alpha channel, so alpha layouts are flattened before handing
/// the samples to that encoder. Non-canonical sample orders (BGR family) are
/// rejected; callers hold normalized buffers in practice.
///
/// # Errors
///
/// Returns [`Error::Save`] when the extension has no encoder, the
/// destination is unwritable, or the encoder rejects the buffer's shape.
pub fn save_image<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();

    let format = ImageFormat::from_path(path).map_err(|_| {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        save_error(path, SaveErrorReason::NoEncoder(ext))
    })?;

    let (color, samples) = encodable_samples(buffer, format)
        .map_err(|reason| save_error(path, reason))?;

    image_rs::save_buffer_with_format(
        path,
        &samples,
        buffer.width(),
        buffer.height(),
        color,
        format,
    )
    .map_err(|e| {
        let reason = match e {
            ImageError::IoError(io) => SaveErrorReason::Unwritable(io.to_string()),
            other => SaveErrorReason::UnsupportedShape(other.to_string()),
        };
        save_error(path, reason)
    })
}

fn load_error(path: &Path, reason: LoadErrorReason) -> Error {
    Error::Load {
        path: path.to_path_buf(),
        reason,
    }
}

fn save_error(path: &Path, reason: SaveErrorReason) -> Error {
    Error::Save {
        path: path.to_path_buf(),
        reason,
    }
}

/// Maps the buffer to samples the target encoder accepts.
fn encodable_samples<'a>(
    buffer: &'a PixelBuffer,
    format: ImageFormat,
) -> std::result::Result<(ExtendedColorType, Cow<'a, [u8]>), SaveErrorReason> {
    let alpha_less_target = format == ImageFormat::Jpeg;

    match buffer.layout() {
        ChannelLayout::Rgba8 if alpha_less_target => {
            Ok((ExtendedColorType::Rgb8, Cow::Owned(drop_alpha(buffer.samples(), 4))))
        }
        ChannelLayout::Rgba8 => Ok((ExtendedColorType::Rgba8, Cow::Borrowed(buffer.samples()))),
        ChannelLayout::Rgb8 => Ok((ExtendedColorType::Rgb8, Cow::Borrowed(buffer.samples()))),
        ChannelLayout::Gray8 => Ok((ExtendedColorType::L8, Cow::Borrowed(buffer.samples()))),
        ChannelLayout::GrayAlpha8 if alpha_less_target => {
            Ok((ExtendedColorType::L8, Cow::Owned(drop_alpha(buffer.samples(), 2))))
        }
        ChannelLayout::GrayAlpha8 => {
            Ok((ExtendedColorType::La8, Cow::Borrowed(buffer.samples())))
        }
        ChannelLayout::Bgra8 | ChannelLayout::Bgr8 => Err(SaveErrorReason::UnsupportedShape(
            "BGR sample order is not encodable".to_string(),
        )),
    }
}

/// Strips the trailing alpha byte from each pixel.
fn drop_alpha(samples: &[u8], bytes_per_pixel: usize) -> Vec<u8> {
    samples
        .chunks_exact(bytes_per_pixel)
        .flat_map(|px| &px[..bytes_per_pixel - 1])
        .copied()
        .collect()
}

/// Reads the EXIF orientation and color-space tags, if any.
///
/// Both hints are best-effort: files without EXIF segments (most PNGs) yield
/// the identity orientation and an untagged color space.
fn read_exif_hints(bytes: &[u8]) -> (u32, ColorSpace) {
    let mut reader = BufReader::new(Cursor::new(bytes));
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return (1, ColorSpace::Untagged);
    };

    let orientation = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1);

    // EXIF ColorSpace: 1 = sRGB, 0xFFFF = uncalibrated. Anything but an
    // explicit sRGB tag is treated as untagged (conservative no-op).
    let color_space = exif
        .get_field(exif::Tag::ColorSpace, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map_or(ColorSpace::Untagged, |value| {
            if value == 1 {
                ColorSpace::Srgb
            } else {
                ColorSpace::Untagged
            }
        });

    (orientation, color_space)
}

/// Applies an EXIF orientation (1..=8) so the image displays upright.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn load_png_returns_expected_buffer() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("sample.png");

        let image = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        image
            .save(&image_path)
            .expect("failed to write temporary png");

        let buffer = load_image(&image_path).expect("png should load successfully");
        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.layout(), ChannelLayout::Rgba8);
        assert_eq!(buffer.color_space(), ColorSpace::Untagged);
    }

    #[test]
    fn load_missing_file_reports_not_found() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("does_not_exist.png");

        match load_image(&missing) {
            Err(Error::Load { reason, .. }) => assert_eq!(reason, LoadErrorReason::NotFound),
            other => panic!("expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn load_unrecognized_bytes_reports_format_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let bad_path = temp_dir.path().join("invalid.png");
        fs::write(&bad_path, b"not a png").expect("failed to write invalid data");

        match load_image(&bad_path) {
            Err(Error::Load {
                reason: LoadErrorReason::UnrecognizedFormat(message),
                ..
            }) => assert!(!message.is_empty()),
            other => panic!("expected UnrecognizedFormat, got {other:?}"),
        }
    }

    #[test]
    fn save_to_unknown_extension_reports_no_encoder() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let target = temp_dir.path().join("out.xyz");
        let buffer = PixelBuffer::new(
            1,
            1,
            ChannelLayout::Rgba8,
            ColorSpace::Srgb,
            vec![1, 2, 3, 4],
        );

        match save_image(&target, &buffer) {
            Err(Error::Save {
                reason: SaveErrorReason::NoEncoder(ext),
                ..
            }) => assert_eq!(ext, "xyz"),
            other => panic!("expected NoEncoder, got {other:?}"),
        }
    }

    #[test]
    fn save_to_unwritable_destination_reports_unwritable() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let target = temp_dir.path().join("no_such_dir").join("out.png");
        let buffer = PixelBuffer::new(
            1,
            1,
            ChannelLayout::Rgba8,
            ColorSpace::Srgb,
            vec![1, 2, 3, 4],
        );

        match save_image(&target, &buffer) {
            Err(Error::Save {
                reason: SaveErrorReason::Unwritable(_),
                ..
            }) => {}
            other => panic!("expected Unwritable, got {other:?}"),
        }
    }

    #[test]
    fn jpeg_save_flattens_alpha() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let target = temp_dir.path().join("out.jpg");
        let buffer = PixelBuffer::new(
            2,
            2,
            ChannelLayout::Rgba8,
            ColorSpace::Srgb,
            vec![200; 2 * 2 * 4],
        );

        save_image(&target, &buffer).expect("jpeg save should succeed");

        let reloaded = load_image(&target).expect("reload");
        assert_eq!(reloaded.width(), 2);
        assert_eq!(reloaded.height(), 2);
        assert!(!reloaded.layout().has_alpha());
    }

    #[test]
    fn bgra_buffer_is_rejected_by_encoder() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let target = temp_dir.path().join("out.png");
        let buffer = PixelBuffer::new(
            1,
            1,
            ChannelLayout::Bgra8,
            ColorSpace::Srgb,
            vec![1, 2, 3, 4],
        );

        match save_image(&target, &buffer) {
            Err(Error::Save {
                reason: SaveErrorReason::UnsupportedShape(_),
                ..
            }) => {}
            other => panic!("expected UnsupportedShape, got {other:?}"),
        }
    }

    #[test]
    fn png_round_trip_preserves_samples() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let target = temp_dir.path().join("roundtrip.png");
        let samples = vec![10, 20, 30, 255, 40, 50, 60, 128];
        let buffer = PixelBuffer::new(
            2,
            1,
            ChannelLayout::Rgba8,
            ColorSpace::Srgb,
            samples.clone(),
        );

        save_image(&target, &buffer).expect("png save");
        let reloaded = load_image(&target).expect("reload");
        assert_eq!(reloaded.samples(), samples.as_slice());
    }

    #[test]
    fn orientation_six_rotates_quarter_turn() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));

        let upright = apply_orientation(DynamicImage::ImageRgba8(img), 6);
        assert_eq!(upright.dimensions(), (1, 2));
    }

    #[test]
    fn identity_orientation_leaves_image_alone() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let upright = apply_orientation(DynamicImage::ImageRgba8(img), 1);
        assert_eq!(upright.dimensions(), (3, 2));
    }

    #[test]
    fn drop_alpha_strips_every_fourth_byte() {
        let flattened = drop_alpha(&[1, 2, 3, 4, 5, 6, 7, 8], 4);
        assert_eq!(flattened, vec![1, 2, 3, 5, 6, 7]);
    }
}
