//! HID usage translation.
//!
//! Any HID stack (IOHID on macOS, HIDP on Windows, hidraw + a report parser
//! on Linux) ends up with `(usage_page, usage, value)` triples for input
//! elements. [`translate_usage`] turns one of those into a [`RawSample`]:
//!
//! | page | usage | sample |
//! |------|-------|--------|
//! | `0x09` Button | `n` (1-based) | `Button { index: n - 1 }` |
//! | `0x01` Generic Desktop | `0x30..=0x35` (X..Rz) | `Axis { slot }` |
//! | `0x01` Generic Desktop | `0x39` Hat Switch | `Hat` |
//! | `0x01` Generic Desktop | `0x90..=0x93` D-pad | `Mapped { DpadUp.. }` |
//!
//! With the `hid` feature, [`describe`], [`list_gamepads`] and
//! [`discover_gamepads`] build [`GamepadDescriptor`]s straight from `hidapi`.

use crate::backends::RawSample;
use crate::gamepad::{AxisSlot, GamepadButton};

pub const GENERIC_DESKTOP_PAGE: u16 = 0x01;
pub const BUTTON_PAGE: u16 = 0x09;

pub const USAGE_JOYSTICK: u16 = 0x04;
pub const USAGE_GAMEPAD: u16 = 0x05;
pub const USAGE_MULTI_AXIS_CONTROLLER: u16 = 0x08;
pub const USAGE_HAT_SWITCH: u16 = 0x39;

/// Whether a top-level collection usage describes a game controller.
pub fn is_gamepad_usage(usage_page: u16, usage: u16) -> bool {
    usage_page == GENERIC_DESKTOP_PAGE
        && matches!(
            usage,
            USAGE_JOYSTICK | USAGE_GAMEPAD | USAGE_MULTI_AXIS_CONTROLLER
        )
}

/// Axis slot for a Generic Desktop usage (X = `0x30` .. Rz = `0x35`).
pub fn axis_slot(usage: u16) -> Option<AxisSlot> {
    match usage {
        0x30 => Some(AxisSlot::X),
        0x31 => Some(AxisSlot::Y),
        0x32 => Some(AxisSlot::Z),
        0x33 => Some(AxisSlot::Rx),
        0x34 => Some(AxisSlot::Ry),
        0x35 => Some(AxisSlot::Rz),
        _ => None,
    }
}

/// Translate one HID input element value. Usages outside the table yield `None`.
pub fn translate_usage(usage_page: u16, usage: u16, value: i32) -> Option<RawSample> {
    match usage_page {
        BUTTON_PAGE if usage > 0 => Some(RawSample::Button {
            index: usize::from(usage - 1),
            pressed: value != 0,
        }),
        GENERIC_DESKTOP_PAGE => {
            if let Some(slot) = axis_slot(usage) {
                return Some(RawSample::Axis { slot, value });
            }
            let button = match usage {
                USAGE_HAT_SWITCH => return Some(RawSample::Hat { value }),
                0x90 => GamepadButton::DpadUp,
                0x91 => GamepadButton::DpadDown,
                0x92 => GamepadButton::DpadRight,
                0x93 => GamepadButton::DpadLeft,
                _ => return None,
            };
            Some(RawSample::Mapped {
                button,
                pressed: value != 0,
            })
        }
        _ => None,
    }
}

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
mod hidapi_support {
    use hidapi::{DeviceInfo, HidApi};

    use super::is_gamepad_usage;
    use crate::error::Result;
    use crate::gamepad::GamepadDescriptor;
    use crate::metadata::DeviceMeta;

    /// Metadata for a `hidapi` device entry.
    pub fn describe(info: &DeviceInfo) -> DeviceMeta {
        DeviceMeta {
            bus: Some(format!("{:?}", info.bus_type()).to_lowercase()),
            vid: Some(info.vendor_id()),
            pid: Some(info.product_id()),
            product_string: info.product_string().map(str::to_string),
            serial_number: info.serial_number().map(str::to_string),
            usage_page: Some(info.usage_page()),
            usage: Some(info.usage()),
            path: Some(info.path().to_string_lossy().to_string()),
        }
    }

    /// Descriptors for every HID game controller `hidapi` can see.
    ///
    /// Only identity is filled in; axis ranges come from the platform's
    /// report descriptor parser.
    pub fn list_gamepads(api: &HidApi) -> Vec<GamepadDescriptor> {
        api.device_list()
            .filter(|info| is_gamepad_usage(info.usage_page(), info.usage()))
            .map(|info| {
                log::debug!(
                    "found HID gamepad {:04x}:{:04x} {:?}",
                    info.vendor_id(),
                    info.product_id(),
                    info.product_string()
                );
                GamepadDescriptor {
                    meta: describe(info),
                    ..GamepadDescriptor::default()
                }
            })
            .collect()
    }

    /// Opens a `hidapi` context and lists its game controllers.
    ///
    /// Fails with [`InputError::Hid`](crate::InputError::Hid) when the
    /// HID library cannot be initialized.
    pub fn discover_gamepads() -> Result<Vec<GamepadDescriptor>> {
        let api = HidApi::new()?;
        Ok(list_gamepads(&api))
    }
}

#[cfg(feature = "hid")]
pub use hidapi_support::{describe, discover_gamepads, list_gamepads};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_page_is_one_based() {
        assert_eq!(
            translate_usage(BUTTON_PAGE, 1, 1),
            Some(RawSample::Button { index: 0, pressed: true })
        );
        assert_eq!(
            translate_usage(BUTTON_PAGE, 12, 0),
            Some(RawSample::Button { index: 11, pressed: false })
        );
        assert_eq!(translate_usage(BUTTON_PAGE, 0, 1), None);
    }

    #[test]
    fn generic_desktop_elements() {
        assert_eq!(
            translate_usage(GENERIC_DESKTOP_PAGE, 0x35, -7),
            Some(RawSample::Axis { slot: AxisSlot::Rz, value: -7 })
        );
        assert_eq!(
            translate_usage(GENERIC_DESKTOP_PAGE, USAGE_HAT_SWITCH, 15),
            Some(RawSample::Hat { value: 15 })
        );
        assert_eq!(
            translate_usage(GENERIC_DESKTOP_PAGE, 0x92, 1),
            Some(RawSample::Mapped { button: GamepadButton::DpadRight, pressed: true })
        );
        assert_eq!(translate_usage(GENERIC_DESKTOP_PAGE, 0x36, 5), None);
        assert_eq!(translate_usage(0xff00, 0x30, 5), None);
    }

    #[test]
    fn gamepad_collections() {
        assert!(is_gamepad_usage(GENERIC_DESKTOP_PAGE, USAGE_GAMEPAD));
        assert!(is_gamepad_usage(GENERIC_DESKTOP_PAGE, USAGE_JOYSTICK));
        assert!(!is_gamepad_usage(GENERIC_DESKTOP_PAGE, 0x06));
    }

    #[cfg(feature = "hid")]
    #[test]
    fn hidapi_failures_become_input_errors() {
        let err = crate::InputError::from(hidapi::HidError::HidApiErrorEmpty);
        assert!(matches!(err, crate::InputError::Hid(_)));
        assert!(err.to_string().starts_with("HID error"));
    }
}
