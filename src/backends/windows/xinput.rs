//! XInput slot poller.
//!
//! Xbox-style controllers are exposed through four fixed XInput slots.
//! [`XInputBackend::poll`] reads every slot with `XInputGetState`:
//!
//! - a slot that starts answering gets a fresh [`GamepadDevice`]
//!   (connect event, new id),
//! - a connected slot is diffed by its [`XInputNormalizer`] and the button
//!   changes go through the device,
//! - a slot that stops answering has its device dropped (disconnect event).
//!
//! The backend is also a [`CommandExecutor`]: `SetVibration` commands for one
//! of its devices end up in `XInputSetState`.

use std::sync::Arc;

use windows_sys::Win32::UI::Input::XboxController::{
    XInputGetState, XInputSetState, XINPUT_STATE, XINPUT_VIBRATION,
};

use crate::command::{Command, CommandExecutor, Motor};
use crate::device::{DeviceId, InputDevice};
use crate::error::Result;
use crate::gamepad::config::XBOX_360_CONFIG;
use crate::gamepad::xinput::{XInputGamepadState, XInputNormalizer};
use crate::gamepad::{ButtonChange, GamepadDescriptor, GamepadDevice};
use crate::metadata::DeviceMeta;
use crate::registry::{DeviceRecord, Registry};
use crate::settings::InputSettings;

/// Number of XInput user slots.
pub const XINPUT_SLOTS: u32 = 4;

const ERROR_SUCCESS: u32 = 0;

struct Slot {
    index: u32,
    normalizer: XInputNormalizer,
    device: Option<GamepadDevice>,
    vibration: XINPUT_VIBRATION,
}

pub struct XInputBackend {
    registry: Arc<Registry>,
    deadzone: f32,
    slots: Vec<Slot>,
    changes: Vec<ButtonChange>,
}

impl XInputBackend {
    pub fn new(registry: Arc<Registry>, settings: &InputSettings) -> Self {
        let deadzone = settings.thumb_deadzone;
        let slots = (0..XINPUT_SLOTS)
            .map(|index| Slot {
                index,
                normalizer: XInputNormalizer::new(deadzone),
                device: None,
                vibration: XINPUT_VIBRATION {
                    wLeftMotorSpeed: 0,
                    wRightMotorSpeed: 0,
                },
            })
            .collect();
        Self {
            registry,
            deadzone,
            slots,
            changes: Vec::new(),
        }
    }

    /// Poll every slot once. Returns the number of connected controllers.
    pub fn poll(&mut self) -> usize {
        let mut connected = 0;
        for slot in &mut self.slots {
            // SAFETY: XINPUT_STATE is plain data; all-zero is a valid value.
            let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };
            // SAFETY: `state` is a live, writable XINPUT_STATE for the duration of the call.
            let res = unsafe { XInputGetState(slot.index, &mut state) };

            if res != ERROR_SUCCESS {
                if let Some(device) = slot.device.take() {
                    log::debug!("xinput slot {} lost ({})", slot.index, device.id());
                    // Dropping the device queues its disconnect event.
                    drop(device);
                    slot.normalizer = XInputNormalizer::new(self.deadzone);
                }
                continue;
            }
            connected += 1;

            if slot.device.is_none() {
                match open_slot(&self.registry, slot.index, self.deadzone) {
                    Ok(device) => {
                        log::debug!("xinput slot {} connected as {}", slot.index, device.id());
                        slot.device = Some(device);
                    }
                    Err(e) => {
                        log::warn!("xinput slot {}: {e}", slot.index);
                        continue;
                    }
                }
            }

            let pad = state.Gamepad;
            let sample = XInputGamepadState {
                buttons: pad.wButtons,
                left_trigger: pad.bLeftTrigger,
                right_trigger: pad.bRightTrigger,
                thumb_lx: pad.sThumbLX,
                thumb_ly: pad.sThumbLY,
                thumb_rx: pad.sThumbRX,
                thumb_ry: pad.sThumbRY,
            };
            self.changes.clear();
            slot.normalizer.update(&sample, &mut self.changes);
            if let Some(device) = slot.device.as_mut() {
                device.handle_changes(&self.changes);
            }
        }
        connected
    }

    /// Device currently bound to `slot`, if that slot is connected.
    pub fn device_id(&self, slot: u32) -> Option<DeviceId> {
        self.slots
            .get(slot as usize)
            .and_then(|s| s.device.as_ref())
            .map(|d| d.id())
    }

    fn set_vibration(&mut self, device_id: DeviceId, motor: Motor, speed: f32) {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|s| s.device.as_ref().is_some_and(|d| d.id() == device_id))
        else {
            return;
        };
        let speed = motor_speed(speed);
        match motor {
            Motor::All => {
                slot.vibration.wLeftMotorSpeed = speed;
                slot.vibration.wRightMotorSpeed = speed;
            }
            Motor::Left => slot.vibration.wLeftMotorSpeed = speed,
            Motor::Right => slot.vibration.wRightMotorSpeed = speed,
        }
        // SAFETY: `slot.vibration` is a valid XINPUT_VIBRATION for the duration of the call.
        let res = unsafe { XInputSetState(slot.index, &slot.vibration) };
        if res != ERROR_SUCCESS {
            log::debug!("XInputSetState({}) failed: {res}", slot.index);
        }
    }
}

impl CommandExecutor for XInputBackend {
    fn execute(&mut self, command: &Command, _target: Option<&DeviceRecord>) {
        match *command {
            Command::SetVibration {
                device_id,
                motor,
                speed,
            } => self.set_vibration(device_id, motor, speed),
            _ => {}
        }
    }
}

fn open_slot(registry: &Arc<Registry>, index: u32, deadzone: f32) -> Result<GamepadDevice> {
    let descriptor = GamepadDescriptor {
        meta: DeviceMeta {
            bus: Some("xinput".to_string()),
            product_string: Some(format!("XInput Controller {index}")),
            path: Some(format!("xinput:{index}")),
            ..DeviceMeta::default()
        },
        ..GamepadDescriptor::default()
    };
    GamepadDevice::new(
        registry.clone(),
        registry.next_device_id(),
        &descriptor,
        XBOX_360_CONFIG,
        deadzone,
    )
}

/// `[0, 1]` to the XInput motor range.
fn motor_speed(speed: f32) -> u16 {
    (speed.clamp(0.0, 1.0) * f32::from(u16::MAX)).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor_speed_range() {
        assert_eq!(motor_speed(0.0), 0);
        assert_eq!(motor_speed(1.0), u16::MAX);
        assert_eq!(motor_speed(7.0), u16::MAX);
        assert_eq!(motor_speed(-1.0), 0);
    }
}
