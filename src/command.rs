//! Commands: requests from the application down to the platform layer.
//!
//! The application submits a [`Command`] through
//! [`Registry::submit_command`](crate::registry::Registry::submit_command)
//! (usually via [`InputManager`](crate::manager::InputManager)); the
//! platform side drains the queue with [`dispatch_commands`], which hands
//! each command to a [`CommandExecutor`] exactly once.

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;
use crate::geometry::Vector2;
use crate::registry::{DeviceRecord, Registry, ResourceId};

/// Which rumble motor a vibration command addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motor {
    #[default]
    All,
    /// Low-frequency (heavy) motor.
    Left,
    /// High-frequency (light) motor.
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemCursor {
    #[default]
    Arrow,
    IBeam,
    Crosshair,
    Hand,
    ResizeHorizontal,
    ResizeVertical,
    Wait,
    NotAllowed,
}

/// Cursor appearance carried by [`Command::InitCursor`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CursorImage {
    System(SystemCursor),
    /// Tightly packed RGBA8 pixels, `width * height * 4` bytes.
    Image {
        data: Vec<u8>,
        width: u32,
        height: u32,
        hot_spot: Vector2,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    StartDeviceDiscovery,
    StopDeviceDiscovery,
    /// Report the d-pad as absolute buttons instead of relative swipes (touch remotes).
    SetAbsoluteDpadValues { device_id: DeviceId, enabled: bool },
    SetRotationAllowed { device_id: DeviceId, allowed: bool },
    /// Player LED index; `-1` clears it.
    SetPlayerIndex { device_id: DeviceId, index: i32 },
    /// `speed` in `[0, 1]`.
    SetVibration {
        device_id: DeviceId,
        motor: Motor,
        speed: f32,
    },
    /// Warp the pointer of a mouse device.
    SetPosition { device_id: DeviceId, position: Vector2 },
    InitCursor {
        resource: ResourceId,
        image: CursorImage,
    },
    DestroyCursor { resource: ResourceId },
    /// [`ResourceId::NONE`] restores the default cursor.
    SetCursor {
        device_id: DeviceId,
        resource: ResourceId,
    },
    SetCursorVisible { device_id: DeviceId, visible: bool },
    SetCursorLocked { device_id: DeviceId, locked: bool },
    ShowVirtualKeyboard { device_id: DeviceId },
    HideVirtualKeyboard { device_id: DeviceId },
}

/// Flat discriminant of [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandType {
    StartDeviceDiscovery,
    StopDeviceDiscovery,
    SetAbsoluteDpadValues,
    SetRotationAllowed,
    SetPlayerIndex,
    SetVibration,
    SetPosition,
    InitCursor,
    DestroyCursor,
    SetCursor,
    SetCursorVisible,
    SetCursorLocked,
    ShowVirtualKeyboard,
    HideVirtualKeyboard,
}

impl Command {
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::StartDeviceDiscovery => CommandType::StartDeviceDiscovery,
            Command::StopDeviceDiscovery => CommandType::StopDeviceDiscovery,
            Command::SetAbsoluteDpadValues { .. } => CommandType::SetAbsoluteDpadValues,
            Command::SetRotationAllowed { .. } => CommandType::SetRotationAllowed,
            Command::SetPlayerIndex { .. } => CommandType::SetPlayerIndex,
            Command::SetVibration { .. } => CommandType::SetVibration,
            Command::SetPosition { .. } => CommandType::SetPosition,
            Command::InitCursor { .. } => CommandType::InitCursor,
            Command::DestroyCursor { .. } => CommandType::DestroyCursor,
            Command::SetCursor { .. } => CommandType::SetCursor,
            Command::SetCursorVisible { .. } => CommandType::SetCursorVisible,
            Command::SetCursorLocked { .. } => CommandType::SetCursorLocked,
            Command::ShowVirtualKeyboard { .. } => CommandType::ShowVirtualKeyboard,
            Command::HideVirtualKeyboard { .. } => CommandType::HideVirtualKeyboard,
        }
    }

    /// Target device, for commands addressed to one.
    pub fn device_id(&self) -> Option<DeviceId> {
        match *self {
            Command::SetAbsoluteDpadValues { device_id, .. }
            | Command::SetRotationAllowed { device_id, .. }
            | Command::SetPlayerIndex { device_id, .. }
            | Command::SetVibration { device_id, .. }
            | Command::SetPosition { device_id, .. }
            | Command::SetCursor { device_id, .. }
            | Command::SetCursorVisible { device_id, .. }
            | Command::SetCursorLocked { device_id, .. }
            | Command::ShowVirtualKeyboard { device_id }
            | Command::HideVirtualKeyboard { device_id } => Some(device_id),
            Command::StartDeviceDiscovery
            | Command::StopDeviceDiscovery
            | Command::InitCursor { .. }
            | Command::DestroyCursor { .. } => None,
        }
    }
}

/// Platform side of the command channel.
///
/// Implementations match on the commands they support and ignore the rest
/// with a catch-all arm. `target` is the registry record of the addressed
/// device, or `None` for global commands.
pub trait CommandExecutor {
    fn execute(&mut self, command: &Command, target: Option<&DeviceRecord>);
}

impl<F> CommandExecutor for F
where
    F: FnMut(&Command, Option<&DeviceRecord>),
{
    fn execute(&mut self, command: &Command, target: Option<&DeviceRecord>) {
        self(command, target)
    }
}

/// Drain the registry's command queue into `executor`.
///
/// Commands addressed to a device that is no longer registered are skipped.
/// Returns the number of commands executed.
pub fn dispatch_commands(registry: &Registry, executor: &mut dyn CommandExecutor) -> usize {
    let mut executed = 0;
    for command in registry.drain_commands() {
        match command.device_id() {
            Some(id) => match registry.lookup_device(id) {
                Some(record) => executor.execute(&command, Some(&record)),
                None => {
                    log::debug!("dropping {:?}: {id} is not registered", command.command_type());
                    continue;
                }
            },
            None => executor.execute(&command, None),
        }
        executed += 1;
    }
    executed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ControllerType;
    use crate::metadata::DeviceMeta;

    fn record(registry: &Registry) -> DeviceId {
        let id = registry.next_device_id();
        registry
            .register_device(DeviceRecord {
                id,
                controller_type: ControllerType::Gamepad,
                meta: DeviceMeta::named("pad"),
            })
            .unwrap();
        id
    }

    #[test]
    fn targets() {
        let id = DeviceId::from_raw(3);
        let cmd = Command::SetVibration {
            device_id: id,
            motor: Motor::Left,
            speed: 0.5,
        };
        assert_eq!(cmd.device_id(), Some(id));
        assert_eq!(cmd.command_type(), CommandType::SetVibration);
        assert_eq!(
            Command::DestroyCursor { resource: ResourceId(1) }.device_id(),
            None
        );
    }

    #[test]
    fn dispatch_routes_and_skips_stale_targets() {
        let registry = Registry::new();
        let live = record(&registry);
        let gone = registry.next_device_id();

        registry.submit_command(Command::StartDeviceDiscovery);
        registry.submit_command(Command::SetPlayerIndex { device_id: gone, index: 1 });
        registry.submit_command(Command::SetPlayerIndex { device_id: live, index: 2 });

        let mut seen = Vec::new();
        let mut executor = |cmd: &Command, target: Option<&DeviceRecord>| {
            seen.push((cmd.clone(), target.map(|r| r.id)));
        };
        assert_eq!(dispatch_commands(&registry, &mut executor), 2);
        assert_eq!(
            seen,
            vec![
                (Command::StartDeviceDiscovery, None),
                (Command::SetPlayerIndex { device_id: live, index: 2 }, Some(live)),
            ]
        );
        assert!(registry.drain_commands().is_empty());
    }
}
