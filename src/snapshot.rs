//! Last-known state of every device.
//!
//! [`Snapshot`] is an **owned** view built by folding events in with
//! [`Snapshot::apply`]. [`InputManager`](crate::manager::InputManager) keeps
//! one up to date while it dispatches; clone it for per-frame fan-out.
//!
//! # Semantics
//! - `DeviceConnect` creates an entry, `DeviceDisconnect` removes it.
//! - Key, mouse button and touch sets only contain what is currently down.
//! - Gamepad buttons keep the last reported `pressed`/`value` pair.
//! - A snapshot does **not** poll anything; it reflects the events applied so far.
//!
//! # Examples
//! ```
//! use inputcore::{DeviceId, Snapshot, GamepadButton};
//!
//! fn fire_held(snap: &Snapshot, pad: DeviceId) -> bool {
//!     snap.get(pad)
//!         .map(|state| state.gamepad_button(GamepadButton::RightTrigger).pressed)
//!         .unwrap_or(false)
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::device::{ControllerType, DeviceId};
use crate::event::{Event, EventKind};
use crate::gamepad::{ButtonState, GamepadButton};
use crate::geometry::Vector2;
use crate::keyboard::Key;
use crate::mouse::MouseButton;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub position: Vector2,
    pub force: f32,
}

/// State of one device.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceState {
    pub controller_type: ControllerType,
    pub keys: BTreeSet<Key>,
    pub mouse_buttons: BTreeSet<MouseButton>,
    /// Last absolute pointer position, if any was reported.
    pub cursor: Option<Vector2>,
    pub cursor_locked: bool,
    pub touches: BTreeMap<u64, TouchPoint>,
    pub gamepad: BTreeMap<GamepadButton, ButtonState>,
}

impl DeviceState {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    pub fn gamepad_button(&self, button: GamepadButton) -> ButtonState {
        self.gamepad.get(&button).copied().unwrap_or_default()
    }
}

/// Owned map of `DeviceId → DeviceState`.
#[derive(Clone, Debug, Default)]
pub struct Snapshot(HashMap<DeviceId, DeviceState>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, device_id: DeviceId) -> Option<&DeviceState> {
        self.0.get(&device_id)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&DeviceId, &DeviceState)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn into_inner(self) -> HashMap<DeviceId, DeviceState> {
        self.0
    }

    /// Fold one event into the snapshot.
    pub fn apply(&mut self, event: &Event) {
        let id = event.device_id;
        match &event.kind {
            EventKind::DeviceConnect { controller_type } => {
                self.0.insert(
                    id,
                    DeviceState {
                        controller_type: *controller_type,
                        ..DeviceState::default()
                    },
                );
                return;
            }
            EventKind::DeviceDisconnect { .. } => {
                self.0.remove(&id);
                return;
            }
            _ => {}
        }

        let state = self.0.entry(id).or_default();
        match event.kind {
            EventKind::GamepadButtonChange {
                button,
                pressed,
                value,
                ..
            } => {
                state.gamepad.insert(button, ButtonState { pressed, value });
            }
            EventKind::KeyPress { key } => {
                state.keys.insert(key);
            }
            EventKind::KeyRelease { key } => {
                state.keys.remove(&key);
            }
            EventKind::MouseButtonPress { button, position } => {
                state.mouse_buttons.insert(button);
                state.cursor = Some(position);
            }
            EventKind::MouseButtonRelease { button, position } => {
                state.mouse_buttons.remove(&button);
                state.cursor = Some(position);
            }
            EventKind::MouseMove { position } | EventKind::MouseScroll { position, .. } => {
                state.cursor = Some(position);
            }
            EventKind::MouseRelativeMove { .. } => {}
            EventKind::MouseCursorLockChange { locked } => state.cursor_locked = locked,
            EventKind::TouchBegin {
                touch_id,
                position,
                force,
            }
            | EventKind::TouchMove {
                touch_id,
                position,
                force,
            } => {
                state.touches.insert(touch_id, TouchPoint { position, force });
            }
            EventKind::TouchEnd { touch_id, .. } | EventKind::TouchCancel { touch_id, .. } => {
                state.touches.remove(&touch_id);
            }
            EventKind::DeviceConnect { .. } | EventKind::DeviceDisconnect { .. } => {}
        }
    }
}
