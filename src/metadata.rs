//! Device metadata snapshot.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of a device suitable
//! for UI display, logging, and persistence. Platform glue populates what it
//! knows; unknown fields remain `None`. A copy is stored with every registry
//! record so command dispatch can reach it through
//! [`Registry::lookup_device`](crate::registry::Registry::lookup_device).
//!
//! # Conventions
//! - `bus` is a short, human-readable bus hint like `"usb"`, `"bluetooth"`, `"evdev"` or `"xinput"`.
//! - `product_string` should be a friendly, user-facing name when available.
//! - `path` is an OS/topology path (opaque string) useful for diagnostics.
//!
//! ## Persistence notes
//! - `vid`/`pid` select the gamepad layout (see [`crate::gamepad::config`]).
//! - `path` is platform-specific and may change across ports, drivers, and reconnects; treat it as
//!   diagnostic first, identity second.

use serde::{Deserialize, Serialize};

/// Snapshot of metadata describing a single device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// High-level bus classification (e.g., `"usb"`, `"bluetooth"`, `"xinput"`).
    pub bus: Option<String>,

    /// USB Vendor ID (VID), if known.
    pub vid: Option<u16>,

    /// USB Product ID (PID), if known.
    pub pid: Option<u16>,

    /// Human-readable product name from the driver/firmware.
    pub product_string: Option<String>,

    /// Device serial number supplied by firmware/OS, if present.
    pub serial_number: Option<String>,

    /// HID Usage Page (e.g., `0x01` for Generic Desktop), if known.
    pub usage_page: Option<u16>,

    /// HID Usage within the page (e.g., `0x04` Joystick, `0x05` Gamepad), if known.
    pub usage: Option<u16>,

    /// OS/topological path to the device. Opaque.
    pub path: Option<String>,
}

impl DeviceMeta {
    /// Metadata carrying only a product name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            product_string: Some(name.into()),
            ..Self::default()
        }
    }

    /// Metadata for a device identified by vendor/product id.
    pub fn usb(vid: u16, pid: u16, name: impl Into<String>) -> Self {
        Self {
            bus: Some("usb".to_string()),
            vid: Some(vid),
            pid: Some(pid),
            product_string: Some(name.into()),
            ..Self::default()
        }
    }

    /// Display name, falling back to `"Unknown"`.
    pub fn display_name(&self) -> &str {
        self.product_string.as_deref().unwrap_or("Unknown")
    }
}
