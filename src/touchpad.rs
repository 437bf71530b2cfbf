//! Touch surfaces: touchpads and touchscreens.

use std::sync::Arc;

use crate::device::{impl_input_device, ControllerType, DeviceCore, DeviceId};
use crate::error::Result;
use crate::event::EventKind;
use crate::geometry::{CoordinateTransform, Vector2};
use crate::metadata::DeviceMeta;
use crate::registry::{Completion, Registry};

/// Touch device object. `touch_id` is the platform's per-contact identifier.
pub struct TouchpadDevice {
    core: DeviceCore,
    screen: bool,
    transform: Arc<dyn CoordinateTransform>,
}

impl TouchpadDevice {
    /// `screen` marks a touchscreen (positions map onto the window) rather than a touchpad.
    pub fn new(
        registry: Arc<Registry>,
        id: DeviceId,
        screen: bool,
        transform: Arc<dyn CoordinateTransform>,
    ) -> Result<Self> {
        let name = if screen { "Touchscreen" } else { "Touchpad" };
        Self::with_meta(registry, id, screen, transform, DeviceMeta::named(name))
    }

    pub fn with_meta(
        registry: Arc<Registry>,
        id: DeviceId,
        screen: bool,
        transform: Arc<dyn CoordinateTransform>,
        meta: DeviceMeta,
    ) -> Result<Self> {
        let core = DeviceCore::attach(registry, id, ControllerType::Touchpad, meta)?;
        Ok(Self {
            core,
            screen,
            transform,
        })
    }

    #[inline]
    pub fn is_screen(&self) -> bool {
        self.screen
    }

    pub fn handle_touch_begin(&mut self, touch_id: u64, position: Vector2, force: f32) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core.submit(EventKind::TouchBegin {
            touch_id,
            position,
            force,
        })
    }

    pub fn handle_touch_move(&mut self, touch_id: u64, position: Vector2, force: f32) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core.submit(EventKind::TouchMove {
            touch_id,
            position,
            force,
        })
    }

    pub fn handle_touch_end(&mut self, touch_id: u64, position: Vector2, force: f32) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core.submit(EventKind::TouchEnd {
            touch_id,
            position,
            force,
        })
    }

    pub fn handle_touch_cancel(&mut self, touch_id: u64, position: Vector2, force: f32) -> Completion {
        let position = self.transform.to_normalized(position);
        self.core.submit(EventKind::TouchCancel {
            touch_id,
            position,
            force,
        })
    }
}

impl_input_device!(TouchpadDevice);
