//! Semantic input events.
//!
//! Every device object reports through [`Event`]: a device id, a monotonic
//! capture timestamp and an [`EventKind`] payload. Events for one device are
//! queued in the order its raw samples were presented.
//!
//! ## Value conventions
//! - **Positions** are in normalized space (see [`crate::geometry`]).
//! - **Gamepad buttons** carry a `pressed` flag and an analog `value` in `[0, 1]`;
//!   digital buttons report `1.0`/`0.0`, stick halves and triggers report their
//!   magnitude. The previous pair is included so consumers can detect edges.
//! - **Touch force** is `[0, 1]` when the platform reports pressure, otherwise `1.0`.

use std::time::Instant;

use crate::device::{ControllerType, DeviceId};
use crate::gamepad::GamepadButton;
use crate::geometry::Vector2;
use crate::keyboard::Key;
use crate::mouse::MouseButton;

/// One semantic occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    DeviceConnect {
        controller_type: ControllerType,
    },
    DeviceDisconnect {
        controller_type: ControllerType,
    },

    GamepadButtonChange {
        button: GamepadButton,
        pressed: bool,
        previous_pressed: bool,
        value: f32,
        previous_value: f32,
    },

    KeyPress {
        key: Key,
    },
    KeyRelease {
        key: Key,
    },

    MouseButtonPress {
        button: MouseButton,
        position: Vector2,
    },
    MouseButtonRelease {
        button: MouseButton,
        position: Vector2,
    },
    MouseMove {
        position: Vector2,
    },
    /// Movement without an absolute position (locked cursor, raw deltas).
    MouseRelativeMove {
        difference: Vector2,
    },
    MouseScroll {
        scroll: Vector2,
        position: Vector2,
    },
    MouseCursorLockChange {
        locked: bool,
    },

    TouchBegin {
        touch_id: u64,
        position: Vector2,
        force: f32,
    },
    TouchMove {
        touch_id: u64,
        position: Vector2,
        force: f32,
    },
    TouchEnd {
        touch_id: u64,
        position: Vector2,
        force: f32,
    },
    TouchCancel {
        touch_id: u64,
        position: Vector2,
        force: f32,
    },
}

/// Flat discriminant of [`EventKind`], handy for filtering and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    DeviceConnect,
    DeviceDisconnect,
    GamepadButtonChange,
    KeyPress,
    KeyRelease,
    MouseButtonPress,
    MouseButtonRelease,
    MouseMove,
    MouseRelativeMove,
    MouseScroll,
    MouseCursorLockChange,
    TouchBegin,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventType {
    pub fn is_device(self) -> bool {
        matches!(self, EventType::DeviceConnect | EventType::DeviceDisconnect)
    }

    pub fn is_keyboard(self) -> bool {
        matches!(self, EventType::KeyPress | EventType::KeyRelease)
    }

    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            EventType::MouseButtonPress
                | EventType::MouseButtonRelease
                | EventType::MouseMove
                | EventType::MouseRelativeMove
                | EventType::MouseScroll
                | EventType::MouseCursorLockChange
        )
    }

    pub fn is_touch(self) -> bool {
        matches!(
            self,
            EventType::TouchBegin | EventType::TouchMove | EventType::TouchEnd | EventType::TouchCancel
        )
    }

    pub fn is_gamepad(self) -> bool {
        self == EventType::GamepadButtonChange
    }
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::DeviceConnect { .. } => EventType::DeviceConnect,
            EventKind::DeviceDisconnect { .. } => EventType::DeviceDisconnect,
            EventKind::GamepadButtonChange { .. } => EventType::GamepadButtonChange,
            EventKind::KeyPress { .. } => EventType::KeyPress,
            EventKind::KeyRelease { .. } => EventType::KeyRelease,
            EventKind::MouseButtonPress { .. } => EventType::MouseButtonPress,
            EventKind::MouseButtonRelease { .. } => EventType::MouseButtonRelease,
            EventKind::MouseMove { .. } => EventType::MouseMove,
            EventKind::MouseRelativeMove { .. } => EventType::MouseRelativeMove,
            EventKind::MouseScroll { .. } => EventType::MouseScroll,
            EventKind::MouseCursorLockChange { .. } => EventType::MouseCursorLockChange,
            EventKind::TouchBegin { .. } => EventType::TouchBegin,
            EventKind::TouchMove { .. } => EventType::TouchMove,
            EventKind::TouchEnd { .. } => EventType::TouchEnd,
            EventKind::TouchCancel { .. } => EventType::TouchCancel,
        }
    }
}

/// Timestamped event for one device.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub device_id: DeviceId,
    /// Capture time (monotonic). Suitable for ordering / delta timing within a run.
    pub at: Instant,
    pub kind: EventKind,
}

impl Event {
    pub fn new(device_id: DeviceId, kind: EventKind) -> Self {
        Self {
            device_id,
            at: Instant::now(),
            kind,
        }
    }

    #[inline]
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}
