// SPDX-License-Identifier: MPL-2.0
//! Format negotiation for open/save dialogs.
//!
//! Given an intent and the host's codec capabilities, produces the ordered
//! filter list a file dialog should show, with a deterministic default
//! selection. Ordering is lexicographic by MIME type so dialog contents are
//! reproducible across runs (and assertable in tests).

use std::path::{Path, PathBuf};

/// What the dialog is for: decodable types for `Open`, encodable for `Save`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogIntent {
    Open,
    Save,
}

/// One codec the host can use, with its capability flags.
#[derive(Debug, Clone)]
pub struct Codec {
    pub mime: &'static str,
    pub label: &'static str,
    pub extensions: &'static [&'static str],
    pub can_decode: bool,
    pub can_encode: bool,
}

/// The set of codecs compiled into the host.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    codecs: Vec<Codec>,
}

impl CodecRegistry {
    /// Builds a registry from an explicit codec list.
    #[must_use]
    pub fn new(codecs: Vec<Codec>) -> Self {
        Self { codecs }
    }

    pub fn codecs(&self) -> &[Codec] {
        &self.codecs
    }
}

impl Default for CodecRegistry {
    /// Mirrors the `image` crate features this crate is built with.
    fn default() -> Self {
        Self::new(vec![
            Codec {
                mime: "image/bmp",
                label: "BMP Image",
                extensions: &["bmp"],
                can_decode: true,
                can_encode: true,
            },
            Codec {
                mime: "image/gif",
                label: "GIF Image",
                extensions: &["gif"],
                can_decode: true,
                can_encode: true,
            },
            Codec {
                mime: "image/jpeg",
                label: "JPEG Image",
                extensions: &["jpg", "jpeg"],
                can_decode: true,
                can_encode: true,
            },
            Codec {
                mime: "image/png",
                label: "PNG Image",
                extensions: &["png"],
                can_decode: true,
                can_encode: true,
            },
            Codec {
                mime: "image/tiff",
                label: "TIFF Image",
                extensions: &["tif", "tiff"],
                can_decode: true,
                can_encode: true,
            },
            Codec {
                mime: "image/webp",
                label: "WebP Image",
                extensions: &["webp"],
                can_decode: true,
                can_encode: true,
            },
            Codec {
                mime: "image/x-icon",
                label: "ICO Image",
                extensions: &["ico"],
                can_decode: true,
                can_encode: true,
            },
        ])
    }
}

/// One dialog filter entry: label plus the MIME type and extensions it
/// matches. Built fresh per invocation, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFilter {
    pub label: String,
    pub mime: String,
    pub extensions: Vec<String>,
    pub is_default: bool,
}

/// Ordered filters plus the default selection for one dialog invocation.
#[derive(Debug, Clone)]
pub struct FilterSet {
    filters: Vec<FormatFilter>,
    default_index: usize,
}

const DEFAULT_MIME: &str = "image/jpeg";
const DEFAULT_SUFFIX: &str = "jpg";

impl FilterSet {
    pub fn filters(&self) -> &[FormatFilter] {
        &self.filters
    }

    /// The filter a dialog should preselect.
    #[must_use]
    pub fn default_filter(&self) -> &FormatFilter {
        &self.filters[self.default_index]
    }

    /// Default filename suffix for save dialogs: `jpg` when the JPEG filter
    /// is the default, otherwise the default filter's first extension.
    #[must_use]
    pub fn default_suffix(&self) -> &str {
        let default = self.default_filter();
        if default.mime == DEFAULT_MIME {
            DEFAULT_SUFFIX
        } else {
            default
                .extensions
                .first()
                .map_or(DEFAULT_SUFFIX, String::as_str)
        }
    }
}

/// Enumerates the codec capability set for `intent`, deduplicates by MIME
/// type, and sorts lexicographically. The JPEG-family filter is the default
/// when present; otherwise the first filter in sorted order is.
///
/// Returns `None` when no codec supports the intent at all (a host without
/// encoders has nothing to put in a save dialog).
#[must_use]
pub fn filters_for(intent: DialogIntent, registry: &CodecRegistry) -> Option<FilterSet> {
    let mut filters: Vec<FormatFilter> = Vec::new();

    for codec in registry.codecs() {
        let capable = match intent {
            DialogIntent::Open => codec.can_decode,
            DialogIntent::Save => codec.can_encode,
        };
        if !capable {
            continue;
        }
        if filters.iter().any(|f| f.mime == codec.mime) {
            continue;
        }
        filters.push(FormatFilter {
            label: codec.label.to_string(),
            mime: codec.mime.to_string(),
            extensions: codec.extensions.iter().map(|e| (*e).to_string()).collect(),
            is_default: false,
        });
    }

    if filters.is_empty() {
        return None;
    }

    filters.sort_by(|a, b| a.mime.cmp(&b.mime));

    let default_index = filters
        .iter()
        .position(|f| f.mime == DEFAULT_MIME)
        .unwrap_or(0);
    filters[default_index].is_default = true;

    Some(FilterSet {
        filters,
        default_index,
    })
}

/// Remembers the directory the user last picked a file from.
///
/// Replaces the process-wide "first dialog" flag from earlier designs: the
/// shell owns one session per window and threads it through every dialog.
#[derive(Debug, Clone, Default)]
pub struct DialogSession {
    last_directory: Option<PathBuf>,
}

impl DialogSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory the next dialog should start in: the last used one, falling
    /// back to the platform pictures folder, then the current directory.
    #[must_use]
    pub fn starting_directory(&self) -> PathBuf {
        if let Some(dir) = &self.last_directory {
            return dir.clone();
        }
        if let Some(pictures) = dirs::picture_dir() {
            return pictures;
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Records the directory of a file the user selected.
    pub fn remember(&mut self, selected: &Path) {
        let dir = if selected.is_dir() {
            Some(selected.to_path_buf())
        } else {
            selected.parent().map(Path::to_path_buf)
        };
        if let Some(dir) = dir {
            self.last_directory = Some(dir);
        }
    }

    #[must_use]
    pub fn last_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref()
    }
}
