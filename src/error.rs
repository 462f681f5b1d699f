// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy for the viewer core.
//!
//! Load and save failures are local and recoverable: they are reported once
//! through the controller's status surface and the prior state is preserved.
//! Nothing here is fatal; the embedding shell decides whether to re-prompt.
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A file could not be decoded into a pixel buffer.
    Load { path: PathBuf, reason: LoadErrorReason },
    /// A pixel buffer could not be encoded to a file.
    Save { path: PathBuf, reason: SaveErrorReason },
    Config(String),
}

/// Why a load failed.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadErrorReason {
    /// The path does not exist.
    NotFound,
    /// No decoder recognized the file contents.
    UnrecognizedFormat(String),
    /// Decoding produced a zero-dimension result.
    EmptyImage,
    /// The file exists but could not be read.
    Io(String),
}

/// Why a save failed.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveErrorReason {
    /// The target extension has no registered encoder.
    NoEncoder(String),
    /// The destination could not be written.
    Unwritable(String),
    /// The encoder rejected the buffer's shape.
    UnsupportedShape(String),
    /// No image is loaded.
    NothingToSave,
}

impl fmt::Display for LoadErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorReason::NotFound => write!(f, "no such file"),
            LoadErrorReason::UnrecognizedFormat(msg) => {
                write!(f, "unrecognized image format ({msg})")
            }
            LoadErrorReason::EmptyImage => write!(f, "image has empty dimensions"),
            LoadErrorReason::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for SaveErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveErrorReason::NoEncoder(ext) => write!(f, "no encoder for \"{ext}\" files"),
            SaveErrorReason::Unwritable(msg) => write!(f, "{msg}"),
            SaveErrorReason::UnsupportedShape(msg) => write!(f, "{msg}"),
            SaveErrorReason::NothingToSave => write!(f, "no image loaded"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load { path, reason } => {
                write!(f, "Cannot load \"{}\": {}", path.display(), reason)
            }
            Error::Save { path, reason } => {
                write!(f, "Cannot write \"{}\": {}", path.display(), reason)
            }
            Error::Config(msg) => write!(f, "Config Error: {msg}"),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
