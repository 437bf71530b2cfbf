//! Gamepad vocabulary, layout tables and normalization.
//!
//! Raw gamepad input arrives in three shapes: numbered buttons, calibrated
//! axes and hat switches. All of them are turned into canonical
//! [`GamepadButton`] transitions carrying a `pressed` flag and an analog
//! `value` in `[0, 1]`:
//!
//! - [`config`] picks the canonical layout for a vendor/product pair.
//! - [`normalizer`] holds the hat, axis and deadzone math.
//! - [`xinput`] adapts XInput state blocks onto the same math.
//! - [`device`] is the registry-backed [`GamepadDevice`].

use serde::{Deserialize, Serialize};

pub mod config;
pub mod device;
pub mod normalizer;
pub mod xinput;

pub use config::{resolve_config, GamepadConfig, GamepadConfigTable, GENERIC_CONFIG};
pub use device::{AxisElement, GamepadDescriptor, GamepadDevice, HatElement};
pub use normalizer::{AxisChannel, ButtonChange, Calibration, HatSwitch, THUMB_DEADZONE};

/// Canonical gamepad buttons.
///
/// Stick directions are buttons too: a two-button axis reports its negative
/// and positive half through the matching `*Left`/`*Right`/`*Up`/`*Down`
/// entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GamepadButton {
    None,
    DpadLeft,
    DpadRight,
    DpadUp,
    DpadDown,
    /// A on Xbox, cross on PlayStation.
    FaceBottom,
    /// B on Xbox, circle on PlayStation.
    FaceRight,
    /// X on Xbox, square on PlayStation.
    FaceLeft,
    /// Y on Xbox, triangle on PlayStation.
    FaceTop,
    LeftShoulder,
    LeftTrigger,
    RightShoulder,
    RightTrigger,
    LeftThumb,
    RightThumb,
    Start,
    Back,
    Pause,
    LeftThumbLeft,
    LeftThumbRight,
    LeftThumbUp,
    LeftThumbDown,
    RightThumbLeft,
    RightThumbRight,
    RightThumbUp,
    RightThumbDown,
}

impl GamepadButton {
    /// Number of variants, `None` included.
    pub const COUNT: usize = 26;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Canonical gamepad axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadAxis {
    None,
    LeftThumbX,
    LeftThumbY,
    RightThumbX,
    RightThumbY,
    LeftTrigger,
    RightTrigger,
}

impl GamepadAxis {
    /// `(negative, positive)` buttons driven by this axis.
    ///
    /// HID and evdev report Y growing downwards, so the negative half of a Y
    /// axis is "up". Triggers bind the same button to both halves, which marks
    /// them as one-sided axes.
    pub fn buttons(self) -> (GamepadButton, GamepadButton) {
        use GamepadButton as B;
        match self {
            GamepadAxis::None => (B::None, B::None),
            GamepadAxis::LeftThumbX => (B::LeftThumbLeft, B::LeftThumbRight),
            GamepadAxis::LeftThumbY => (B::LeftThumbUp, B::LeftThumbDown),
            GamepadAxis::RightThumbX => (B::RightThumbLeft, B::RightThumbRight),
            GamepadAxis::RightThumbY => (B::RightThumbUp, B::RightThumbDown),
            GamepadAxis::LeftTrigger => (B::LeftTrigger, B::LeftTrigger),
            GamepadAxis::RightTrigger => (B::RightTrigger, B::RightTrigger),
        }
    }
}

/// Physical axis slot as reported by HID (Generic Desktop X..Rz) and evdev (ABS_X..ABS_RZ).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSlot {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
}

impl AxisSlot {
    pub const ALL: [AxisSlot; 6] = [
        AxisSlot::X,
        AxisSlot::Y,
        AxisSlot::Z,
        AxisSlot::Rx,
        AxisSlot::Ry,
        AxisSlot::Rz,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Last known state of one canonical button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonState {
    pub pressed: bool,
    pub value: f32,
}
