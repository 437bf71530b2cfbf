//! Linux evdev code translation.
//!
//! The poller reads `input_event { type, code, value }` records from
//! `/dev/input/event*`; this module maps them onto the crate's vocabulary.
//!
//! - Gamepad `EV_KEY` codes in the `BTN_GAMEPAD` block already have a fixed
//!   meaning and become [`RawSample::Mapped`].
//! - `ABS_X..ABS_RZ` become [`RawSample::Axis`] and go through the layout table,
//!   because `ABS_Z`/`ABS_RZ` mean triggers on some pads and a right stick on others.
//! - `ABS_HAT0X`/`ABS_HAT0Y` are two `-1..1` axes; [`EvdevGamepadTranslator`]
//!   folds them into a single `0..7` / centered hat position.
//!
//! Keyboard and mouse codes are mapped by [`key_from_code`] and
//! [`mouse_button_from_code`].

use crate::backends::RawSample;
use crate::gamepad::{AxisSlot, GamepadButton};
use crate::keyboard::Key;
use crate::mouse::MouseButton;

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_ABS: u16 = 0x03;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_Z: u16 = 0x02;
pub const ABS_RX: u16 = 0x03;
pub const ABS_RY: u16 = 0x04;
pub const ABS_RZ: u16 = 0x05;
pub const ABS_HAT0X: u16 = 0x10;
pub const ABS_HAT0Y: u16 = 0x11;

pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;

pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const BTN_SIDE: u16 = 0x113;
pub const BTN_EXTRA: u16 = 0x114;

pub const BTN_SOUTH: u16 = 0x130;
pub const BTN_EAST: u16 = 0x131;
pub const BTN_NORTH: u16 = 0x133;
pub const BTN_WEST: u16 = 0x134;
pub const BTN_TL: u16 = 0x136;
pub const BTN_TR: u16 = 0x137;
pub const BTN_TL2: u16 = 0x138;
pub const BTN_TR2: u16 = 0x139;
pub const BTN_SELECT: u16 = 0x13a;
pub const BTN_START: u16 = 0x13b;
pub const BTN_MODE: u16 = 0x13c;
pub const BTN_THUMBL: u16 = 0x13d;
pub const BTN_THUMBR: u16 = 0x13e;

pub const BTN_DPAD_UP: u16 = 0x220;
pub const BTN_DPAD_DOWN: u16 = 0x221;
pub const BTN_DPAD_LEFT: u16 = 0x222;
pub const BTN_DPAD_RIGHT: u16 = 0x223;

pub fn abs_slot(code: u16) -> Option<AxisSlot> {
    match code {
        ABS_X => Some(AxisSlot::X),
        ABS_Y => Some(AxisSlot::Y),
        ABS_Z => Some(AxisSlot::Z),
        ABS_RX => Some(AxisSlot::Rx),
        ABS_RY => Some(AxisSlot::Ry),
        ABS_RZ => Some(AxisSlot::Rz),
        _ => None,
    }
}

pub fn gamepad_button_from_code(code: u16) -> Option<GamepadButton> {
    use GamepadButton as B;
    let button = match code {
        BTN_SOUTH => B::FaceBottom,
        BTN_EAST => B::FaceRight,
        BTN_NORTH => B::FaceTop,
        BTN_WEST => B::FaceLeft,
        BTN_TL => B::LeftShoulder,
        BTN_TR => B::RightShoulder,
        BTN_TL2 => B::LeftTrigger,
        BTN_TR2 => B::RightTrigger,
        BTN_SELECT => B::Back,
        BTN_START => B::Start,
        BTN_MODE => B::Pause,
        BTN_THUMBL => B::LeftThumb,
        BTN_THUMBR => B::RightThumb,
        BTN_DPAD_UP => B::DpadUp,
        BTN_DPAD_DOWN => B::DpadDown,
        BTN_DPAD_LEFT => B::DpadLeft,
        BTN_DPAD_RIGHT => B::DpadRight,
        _ => return None,
    };
    Some(button)
}

pub fn mouse_button_from_code(code: u16) -> Option<MouseButton> {
    match code {
        BTN_LEFT => Some(MouseButton::Left),
        BTN_RIGHT => Some(MouseButton::Right),
        BTN_MIDDLE => Some(MouseButton::Middle),
        BTN_SIDE => Some(MouseButton::X1),
        BTN_EXTRA => Some(MouseButton::X2),
        _ => None,
    }
}

/// Fold a `(hat0x, hat0y)` pair into a hat position (Up = 0, clockwise, 8 = centered).
pub fn hat_position(x: i32, y: i32) -> i32 {
    match (x.signum(), y.signum()) {
        (0, -1) => 0,
        (1, -1) => 1,
        (1, 0) => 2,
        (1, 1) => 3,
        (0, 1) => 4,
        (-1, 1) => 5,
        (-1, 0) => 6,
        (-1, -1) => 7,
        _ => 8,
    }
}

/// Stateful gamepad translator for one evdev node.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvdevGamepadTranslator {
    hat_x: i32,
    hat_y: i32,
}

impl EvdevGamepadTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one event record. Sync reports and unknown codes yield `None`.
    pub fn translate(&mut self, event_type: u16, code: u16, value: i32) -> Option<RawSample> {
        match event_type {
            EV_KEY => gamepad_button_from_code(code).map(|button| RawSample::Mapped {
                button,
                // 2 is autorepeat; still held.
                pressed: value != 0,
            }),
            EV_ABS => match code {
                ABS_HAT0X => {
                    self.hat_x = value;
                    Some(RawSample::Hat {
                        value: hat_position(self.hat_x, self.hat_y),
                    })
                }
                ABS_HAT0Y => {
                    self.hat_y = value;
                    Some(RawSample::Hat {
                        value: hat_position(self.hat_x, self.hat_y),
                    })
                }
                _ => abs_slot(code).map(|slot| RawSample::Axis { slot, value }),
            },
            _ => None,
        }
    }
}

/// Map a Linux `KEY_*` code to a [`Key`].
pub fn key_from_code(code: u16) -> Key {
    match code {
        1 => Key::Escape,
        2 => Key::Num1,
        3 => Key::Num2,
        4 => Key::Num3,
        5 => Key::Num4,
        6 => Key::Num5,
        7 => Key::Num6,
        8 => Key::Num7,
        9 => Key::Num8,
        10 => Key::Num9,
        11 => Key::Num0,
        12 => Key::Minus,
        13 => Key::Equal,
        14 => Key::Backspace,
        15 => Key::Tab,
        16 => Key::Q,
        17 => Key::W,
        18 => Key::E,
        19 => Key::R,
        20 => Key::T,
        21 => Key::Y,
        22 => Key::U,
        23 => Key::I,
        24 => Key::O,
        25 => Key::P,
        26 => Key::LeftBracket,
        27 => Key::RightBracket,
        28 => Key::Enter,
        29 => Key::LeftControl,
        30 => Key::A,
        31 => Key::S,
        32 => Key::D,
        33 => Key::F,
        34 => Key::G,
        35 => Key::H,
        36 => Key::J,
        37 => Key::K,
        38 => Key::L,
        39 => Key::Semicolon,
        40 => Key::Quote,
        41 => Key::Grave,
        42 => Key::LeftShift,
        43 => Key::Backslash,
        44 => Key::Z,
        45 => Key::X,
        46 => Key::C,
        47 => Key::V,
        48 => Key::B,
        49 => Key::N,
        50 => Key::M,
        51 => Key::Comma,
        52 => Key::Period,
        53 => Key::Slash,
        54 => Key::RightShift,
        55 => Key::NumpadMultiply,
        56 => Key::LeftAlt,
        57 => Key::Space,
        58 => Key::CapsLock,
        59 => Key::F1,
        60 => Key::F2,
        61 => Key::F3,
        62 => Key::F4,
        63 => Key::F5,
        64 => Key::F6,
        65 => Key::F7,
        66 => Key::F8,
        67 => Key::F9,
        68 => Key::F10,
        69 => Key::NumLock,
        70 => Key::ScrollLock,
        71 => Key::Numpad7,
        72 => Key::Numpad8,
        73 => Key::Numpad9,
        74 => Key::NumpadMinus,
        75 => Key::Numpad4,
        76 => Key::Numpad5,
        77 => Key::Numpad6,
        78 => Key::NumpadPlus,
        79 => Key::Numpad1,
        80 => Key::Numpad2,
        81 => Key::Numpad3,
        82 => Key::Numpad0,
        83 => Key::NumpadDecimal,
        87 => Key::F11,
        88 => Key::F12,
        96 => Key::NumpadEnter,
        97 => Key::RightControl,
        98 => Key::NumpadDivide,
        99 => Key::PrintScreen,
        100 => Key::RightAlt,
        102 => Key::Home,
        103 => Key::Up,
        104 => Key::PageUp,
        105 => Key::Left,
        106 => Key::Right,
        107 => Key::End,
        108 => Key::Down,
        109 => Key::PageDown,
        110 => Key::Insert,
        111 => Key::Delete,
        113 => Key::Mute,
        114 => Key::VolumeDown,
        115 => Key::VolumeUp,
        117 => Key::NumpadEqual,
        119 => Key::Pause,
        125 => Key::LeftSuper,
        126 => Key::RightSuper,
        127 => Key::Menu,
        183 => Key::F13,
        184 => Key::F14,
        185 => Key::F15,
        186 => Key::F16,
        187 => Key::F17,
        188 => Key::F18,
        189 => Key::F19,
        190 => Key::F20,
        191 => Key::F21,
        192 => Key::F22,
        193 => Key::F23,
        194 => Key::F24,
        _ => Key::Unknown,
    }
}
