//! Crate error type.

use std::path::PathBuf;

use crate::device::DeviceId;

/// Errors produced by the input core.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// A device with this id is already in the registry.
    #[error("device {0} is already registered")]
    DuplicateDevice(DeviceId),

    /// No live device carries this id.
    #[error("device {0} is not registered")]
    UnknownDevice(DeviceId),

    /// A raw sample source can no longer be read (unplugged, read error).
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file extension is neither `toml` nor `json`.
    #[error("unsupported settings format: {0}")]
    UnsupportedFormat(String),

    #[cfg(feature = "hid")]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

pub type Result<T> = std::result::Result<T, InputError>;
