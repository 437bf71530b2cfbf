//! Mouse buttons and the mouse device.
//!
//! Every handler is a stateless translation into one event. Absolute
//! positions go through the device's [`CoordinateTransform`]; relative
//! movement and scroll deltas are converted as deltas.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::device::{impl_input_device, ControllerType, DeviceCore, DeviceId};
use crate::error::Result;
use crate::event::EventKind;
use crate::geometry::{CoordinateTransform, Vector2};
use crate::metadata::DeviceMeta;
use crate::registry::{Completion, Registry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// First side button ("back").
    X1,
    /// Second side button ("forward").
    X2,
}

pub struct MouseDevice {
    core: DeviceCore,
    transform: Arc<dyn CoordinateTransform>,
}

impl MouseDevice {
    pub fn new(
        registry: Arc<Registry>,
        id: DeviceId,
        transform: Arc<dyn CoordinateTransform>,
    ) -> Result<Self> {
        Self::with_meta(registry, id, transform, DeviceMeta::named("Mouse"))
    }

    pub fn with_meta(
        registry: Arc<Registry>,
        id: DeviceId,
        transform: Arc<dyn CoordinateTransform>,
        meta: DeviceMeta,
    ) -> Result<Self> {
        let core = DeviceCore::attach(registry, id, ControllerType::Mouse, meta)?;
        Ok(Self { core, transform })
    }

    pub fn handle_button_press(&mut self, button: MouseButton, position: Vector2) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core
            .submit(EventKind::MouseButtonPress { button, position })
    }

    pub fn handle_button_release(&mut self, button: MouseButton, position: Vector2) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core
            .submit(EventKind::MouseButtonRelease { button, position })
    }

    pub fn handle_move(&mut self, position: Vector2) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core.submit(EventKind::MouseMove { position })
    }

    pub fn handle_relative_move(&mut self, delta: Vector2) -> Completion {
        let difference = self.transform.to_normalized_delta(delta);
        self.core.submit(EventKind::MouseRelativeMove { difference })
    }

    /// `delta` is in wheel units (one notch = 1.0) and is not transformed.
    pub fn handle_scroll(&mut self, delta: Vector2, position: Vector2) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core.submit(EventKind::MouseScroll {
            scroll: delta,
            position,
        })
    }

    pub fn handle_cursor_lock_change(&mut self, locked: bool) -> Completion {
        self.core
            .submit(EventKind::MouseCursorLockChange { locked })
    }
}

impl_input_device!(MouseDevice);
