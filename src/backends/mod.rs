//! Raw-sample adapters for `inputcore`.
//!
//! Platform pollers do not talk to the normalizer directly. They translate
//! whatever the OS hands them into [`RawSample`]s and feed those to a
//! [`GamepadDevice`](crate::gamepad::GamepadDevice), either one at a time or
//! through a [`SampleSource`]. The modules here are the thin, mostly pure
//! translators for each source format:
//!
//! - [`hid`]: HID usage page/usage pairs (macOS IOHID, Windows HIDP, hidraw).
//! - [`evdev`]: Linux input event codes, including key and mouse button codes.
//! - [`virtual_input`]: an in-memory source for tests and injected input.
//!
//! # Feature flags
//! - **`hid`**: adds `hidapi` descriptor helpers to [`hid`].
//! - **`xinput`**: Windows-only XInput slot poller (`windows` module).
//!
//! The OS calls that produce raw data live outside this crate except for the
//! two feature-gated helpers above.

use crate::error::Result;
use crate::gamepad::{AxisSlot, GamepadButton};

pub mod evdev;
pub mod hid;
pub mod virtual_input;

#[cfg(all(feature = "xinput", target_os = "windows"))]
#[cfg_attr(docsrs, doc(cfg(all(feature = "xinput", target_os = "windows"))))]
pub mod windows;

/// One raw gamepad input, before layout resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawSample {
    /// Numbered button (zero-based), resolved through the device's layout.
    Button { index: usize, pressed: bool },
    /// Button whose canonical meaning the source already knows (evdev `BTN_SOUTH`, ...).
    Mapped { button: GamepadButton, pressed: bool },
    /// Calibrated axis element.
    Axis { slot: AxisSlot, value: i32 },
    /// Hat switch position as reported by the element.
    Hat { value: i32 },
}

/// Something that can be drained for raw samples.
///
/// `poll` returning `Err` means the device is gone; platform glue then drops
/// the owning device object, which emits its disconnect event.
pub trait SampleSource {
    /// Append pending samples to `out`, oldest first.
    fn poll(&mut self, out: &mut Vec<RawSample>) -> Result<()>;
}
