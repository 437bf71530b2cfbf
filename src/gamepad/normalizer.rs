//! Hat, axis and deadzone math shared by every gamepad back-end.
//!
//! Everything here is pure: it takes raw samples and appends canonical
//! [`ButtonChange`]s to an output vector. [`GamepadDevice`](super::GamepadDevice)
//! turns those changes into events.
//!
//! ## Hat switches
//! A hat reports `0..7` (Up = 0, clockwise) or a centered sentinel (`8`, or an
//! all-ones raw value). Each sample is decoded into a 4-bit mask
//! (bit0 = up, bit1 = right, bit2 = down, bit3 = left); diagonals set two
//! adjacent bits. Every changed bit emits one transition; presses come
//! before releases.
//!
//! ## Axes
//! - One-sided axes (triggers; same button on both halves) map
//!   `[min, max] -> [0, 1]` and count as pressed whenever the value is above 0.
//! - Two-button axes map `[min, max] -> [-1, 1]`. The half the value lies on is
//!   pressed once its magnitude exceeds the deadzone. A sample landing exactly
//!   on `0.0` releases the half the stick came from.
//! - A sample equal to the previous raw value emits nothing.

use super::GamepadButton;

/// Default deadzone for two-button (stick) axes.
pub const THUMB_DEADZONE: f32 = 0.2;

/// Directional buttons in hat bit order.
pub const HAT_BUTTONS: [GamepadButton; 4] = [
    GamepadButton::DpadUp,
    GamepadButton::DpadRight,
    GamepadButton::DpadDown,
    GamepadButton::DpadLeft,
];

/// One canonical button transition produced by the normalizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonChange {
    pub button: GamepadButton,
    pub pressed: bool,
    pub value: f32,
}

impl ButtonChange {
    #[inline]
    pub fn new(button: GamepadButton, pressed: bool, value: f32) -> Self {
        Self {
            button,
            pressed,
            value,
        }
    }

    /// Digital transition: value `1.0` when pressed, `0.0` otherwise.
    #[inline]
    pub fn digital(button: GamepadButton, pressed: bool) -> Self {
        Self::new(button, pressed, if pressed { 1.0 } else { 0.0 })
    }
}

/// Decode a zero-based hat position into a direction bitmask.
///
/// Anything outside `0..8` is centered.
#[inline]
pub fn hat_bitmask(position: i64) -> u8 {
    if !(0..8).contains(&position) {
        return 0;
    }
    let p = position as u32;
    ((1u32 << (p / 2)) | (1u32 << ((p / 2 + p % 2) % 4))) as u8
}

/// Hat switch state: logical minimum and last decoded mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HatSwitch {
    logical_min: i32,
    bitmask: u8,
}

impl HatSwitch {
    /// Hat whose first direction (Up) is reported as `logical_min`.
    pub fn new(logical_min: i32) -> Self {
        Self {
            logical_min,
            bitmask: 0,
        }
    }

    /// Last decoded direction mask.
    #[inline]
    pub fn bitmask(&self) -> u8 {
        self.bitmask
    }

    /// Feed one raw sample; appends 0..=4 transitions to `out`.
    pub fn update(&mut self, raw: i32, out: &mut Vec<ButtonChange>) {
        let bitmask = hat_bitmask(i64::from(raw) - i64::from(self.logical_min));
        let changed = bitmask ^ self.bitmask;
        self.bitmask = bitmask;
        if changed == 0 {
            return;
        }

        for (bit, &button) in HAT_BUTTONS.iter().enumerate() {
            let mask = 1u8 << bit;
            if changed & mask != 0 && bitmask & mask != 0 {
                out.push(ButtonChange::digital(button, true));
            }
        }
        for (bit, &button) in HAT_BUTTONS.iter().enumerate() {
            let mask = 1u8 << bit;
            if changed & mask != 0 && bitmask & mask == 0 {
                out.push(ButtonChange::digital(button, false));
            }
        }
    }
}

/// Logical range of one axis element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    min: i32,
    max: i32,
    range: f32,
    zero_centered: bool,
}

impl Calibration {
    pub fn new(min: i32, max: i32) -> Self {
        let range = (i64::from(max) - i64::from(min)) as f32;
        Self {
            min,
            max,
            range,
            zero_centered: false,
        }
    }

    /// Signed element whose rest value is `0` (XInput thumbsticks).
    ///
    /// [`centered`](Self::centered) scales each half by its own bound, so `0`
    /// maps to exactly `0.0` even when `min` and `max` are asymmetric.
    pub fn zero_centered(min: i32, max: i32) -> Self {
        Self {
            zero_centered: true,
            ..Self::new(min, max)
        }
    }

    #[inline]
    pub fn min(&self) -> i32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.range
    }

    /// `[min, max] -> [0, 1]`, clamped.
    pub fn one_sided(&self, raw: i32) -> f32 {
        if self.range <= 0.0 {
            return 0.0;
        }
        let offset = (i64::from(raw) - i64::from(self.min)) as f32;
        (offset / self.range).clamp(0.0, 1.0)
    }

    /// `[min, max] -> [-1, 1]`, clamped.
    pub fn centered(&self, raw: i32) -> f32 {
        if self.zero_centered {
            let value = match raw {
                r if r > 0 && self.max > 0 => r as f32 / self.max as f32,
                r if r < 0 && self.min < 0 => r as f32 / -(self.min as f32),
                _ => 0.0,
            };
            return value.clamp(-1.0, 1.0);
        }
        if self.range <= 0.0 {
            return 0.0;
        }
        let offset = (i64::from(raw) - i64::from(self.min)) as f32;
        (2.0 * offset / self.range - 1.0).clamp(-1.0, 1.0)
    }
}

/// Resolve a centered axis value into one button transition.
///
/// `from_positive` breaks the tie when `value` is exactly `0.0`: the stick
/// is returning from the positive half, so that half is released.
pub fn split_two_button(
    value: f32,
    from_positive: bool,
    negative: GamepadButton,
    positive: GamepadButton,
    deadzone: f32,
) -> ButtonChange {
    if value > 0.0 {
        ButtonChange::new(positive, value > deadzone, value)
    } else if value < 0.0 {
        ButtonChange::new(negative, -value > deadzone, -value)
    } else if from_positive {
        ButtonChange::new(positive, false, 0.0)
    } else {
        ButtonChange::new(negative, false, 0.0)
    }
}

/// One raw axis bound to a pair of canonical buttons.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisChannel {
    negative: GamepadButton,
    positive: GamepadButton,
    calibration: Calibration,
    deadzone: f32,
    last_raw: Option<i32>,
}

impl AxisChannel {
    /// `negative == positive` makes a one-sided (trigger) channel.
    pub fn new(
        negative: GamepadButton,
        positive: GamepadButton,
        calibration: Calibration,
        deadzone: f32,
    ) -> Self {
        Self {
            negative,
            positive,
            calibration,
            deadzone,
            last_raw: None,
        }
    }

    /// Seed the previous raw value (usually the element's value when the device was opened).
    pub fn with_initial(mut self, raw: i32) -> Self {
        self.last_raw = Some(raw);
        self
    }

    #[inline]
    pub fn is_one_sided(&self) -> bool {
        self.negative == self.positive
    }

    #[inline]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    #[inline]
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Feed one raw sample; appends at most one transition to `out`.
    pub fn update(&mut self, raw: i32, out: &mut Vec<ButtonChange>) {
        let previous = self.last_raw.replace(raw);
        if previous == Some(raw) {
            return;
        }

        if self.is_one_sided() {
            let value = self.calibration.one_sided(raw);
            out.push(ButtonChange::new(self.positive, value > 0.0, value));
        } else {
            let value = self.calibration.centered(raw);
            let from_positive = previous.is_some_and(|p| p > raw);
            out.push(split_two_button(
                value,
                from_positive,
                self.negative,
                self.positive,
                self.deadzone,
            ));
        }
    }
}
