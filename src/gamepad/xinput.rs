//! XInput state blocks onto canonical buttons.
//!
//! XInput controllers do not go through the vendor/product table: the API
//! already exposes a fixed layout. Polling code hands each
//! [`XInputGamepadState`] to an [`XInputNormalizer`], which diffs the button
//! bitfield and runs sticks and triggers through the same [`AxisChannel`]
//! math as HID devices, using the fixed XInput ranges.
//!
//! ## Ranges
//! - Thumbsticks: `-32768..=32767`, Y grows upwards. Rest is `0`; each half
//!   is scaled by its own bound.
//! - Triggers: `0..=255`.

use super::normalizer::{AxisChannel, ButtonChange, Calibration};
use super::GamepadButton;

pub const XINPUT_GAMEPAD_DPAD_UP: u16 = 0x0001;
pub const XINPUT_GAMEPAD_DPAD_DOWN: u16 = 0x0002;
pub const XINPUT_GAMEPAD_DPAD_LEFT: u16 = 0x0004;
pub const XINPUT_GAMEPAD_DPAD_RIGHT: u16 = 0x0008;
pub const XINPUT_GAMEPAD_START: u16 = 0x0010;
pub const XINPUT_GAMEPAD_BACK: u16 = 0x0020;
pub const XINPUT_GAMEPAD_LEFT_THUMB: u16 = 0x0040;
pub const XINPUT_GAMEPAD_RIGHT_THUMB: u16 = 0x0080;
pub const XINPUT_GAMEPAD_LEFT_SHOULDER: u16 = 0x0100;
pub const XINPUT_GAMEPAD_RIGHT_SHOULDER: u16 = 0x0200;
pub const XINPUT_GAMEPAD_A: u16 = 0x1000;
pub const XINPUT_GAMEPAD_B: u16 = 0x2000;
pub const XINPUT_GAMEPAD_X: u16 = 0x4000;
pub const XINPUT_GAMEPAD_Y: u16 = 0x8000;

/// Bitfield mask to canonical button. Order is the emission order.
const BUTTON_MAP: &[(u16, GamepadButton)] = &[
    (XINPUT_GAMEPAD_DPAD_UP, GamepadButton::DpadUp),
    (XINPUT_GAMEPAD_DPAD_DOWN, GamepadButton::DpadDown),
    (XINPUT_GAMEPAD_DPAD_LEFT, GamepadButton::DpadLeft),
    (XINPUT_GAMEPAD_DPAD_RIGHT, GamepadButton::DpadRight),
    (XINPUT_GAMEPAD_START, GamepadButton::Start),
    (XINPUT_GAMEPAD_BACK, GamepadButton::Back),
    (XINPUT_GAMEPAD_LEFT_THUMB, GamepadButton::LeftThumb),
    (XINPUT_GAMEPAD_RIGHT_THUMB, GamepadButton::RightThumb),
    (XINPUT_GAMEPAD_LEFT_SHOULDER, GamepadButton::LeftShoulder),
    (XINPUT_GAMEPAD_RIGHT_SHOULDER, GamepadButton::RightShoulder),
    (XINPUT_GAMEPAD_A, GamepadButton::FaceBottom),
    (XINPUT_GAMEPAD_B, GamepadButton::FaceRight),
    (XINPUT_GAMEPAD_X, GamepadButton::FaceLeft),
    (XINPUT_GAMEPAD_Y, GamepadButton::FaceTop),
];

/// Mirror of `XINPUT_GAMEPAD`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct XInputGamepadState {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

/// Per-slot normalizer state.
#[derive(Clone, Debug)]
pub struct XInputNormalizer {
    buttons: u16,
    left_x: AxisChannel,
    left_y: AxisChannel,
    right_x: AxisChannel,
    right_y: AxisChannel,
    left_trigger: AxisChannel,
    right_trigger: AxisChannel,
}

impl XInputNormalizer {
    pub fn new(deadzone: f32) -> Self {
        use GamepadButton as B;
        let thumb = Calibration::zero_centered(i16::MIN.into(), i16::MAX.into());
        let trigger = Calibration::new(0, 255);
        // Seed with the rest state so an idle pad emits nothing on first poll.
        Self {
            buttons: 0,
            left_x: AxisChannel::new(B::LeftThumbLeft, B::LeftThumbRight, thumb, deadzone).with_initial(0),
            left_y: AxisChannel::new(B::LeftThumbDown, B::LeftThumbUp, thumb, deadzone).with_initial(0),
            right_x: AxisChannel::new(B::RightThumbLeft, B::RightThumbRight, thumb, deadzone).with_initial(0),
            right_y: AxisChannel::new(B::RightThumbDown, B::RightThumbUp, thumb, deadzone).with_initial(0),
            left_trigger: AxisChannel::new(B::LeftTrigger, B::LeftTrigger, trigger, deadzone).with_initial(0),
            right_trigger: AxisChannel::new(B::RightTrigger, B::RightTrigger, trigger, deadzone).with_initial(0),
        }
    }

    /// Diff `state` against the previous poll and append the transitions.
    pub fn update(&mut self, state: &XInputGamepadState, out: &mut Vec<ButtonChange>) {
        let changed = state.buttons ^ self.buttons;
        for &(mask, button) in BUTTON_MAP {
            if changed & mask != 0 {
                out.push(ButtonChange::digital(button, state.buttons & mask != 0));
            }
        }
        self.buttons = state.buttons;

        self.left_x.update(state.thumb_lx.into(), out);
        self.left_y.update(state.thumb_ly.into(), out);
        self.right_x.update(state.thumb_rx.into(), out);
        self.right_y.update(state.thumb_ry.into(), out);
        self.left_trigger.update(state.left_trigger.into(), out);
        self.right_trigger.update(state.right_trigger.into(), out);
    }

    /// Release everything that is still held (used when the slot disconnects).
    pub fn reset(&mut self, out: &mut Vec<ButtonChange>) {
        self.update(&XInputGamepadState::default(), out);
    }
}
