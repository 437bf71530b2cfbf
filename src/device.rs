//! Device identity and the lifecycle shared by every device object.
//!
//! A device object is the producer-side half of one physical device. It is
//! created with a fresh [`DeviceId`] from
//! [`Registry::next_device_id`](crate::registry::Registry::next_device_id):
//!
//! 1. **Connected**: registered, `DeviceConnect` submitted.
//! 2. **Active**: forwarding raw samples as events.
//! 3. **Disconnected**: on drop: `DeviceDisconnect` submitted, then removed
//!    from the registry. Nothing is emitted for that id afterwards.
//!
//! A device that is unplugged and plugged back in becomes a new object with a
//! new id.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::{Event, EventKind};
use crate::metadata::DeviceMeta;
use crate::registry::{Completion, DeviceRecord, Registry};

/// Opaque handle naming one live device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(u64);

impl DeviceId {
    #[inline]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerType {
    #[default]
    None,
    Keyboard,
    Mouse,
    Touchpad,
    Gamepad,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Connected,
    Active,
    Disconnected,
}

/// Common surface of the producer-side device objects.
pub trait InputDevice {
    fn id(&self) -> DeviceId;
    fn controller_type(&self) -> ControllerType;
    fn name(&self) -> &str;
    fn lifecycle(&self) -> Lifecycle;
}

/// Registration, event submission and teardown shared by all devices.
pub(crate) struct DeviceCore {
    registry: Arc<Registry>,
    id: DeviceId,
    controller_type: ControllerType,
    name: String,
    lifecycle: Lifecycle,
}

impl DeviceCore {
    /// Register `id` and announce it. Fails without side effects if `id` is taken.
    pub(crate) fn attach(
        registry: Arc<Registry>,
        id: DeviceId,
        controller_type: ControllerType,
        meta: DeviceMeta,
    ) -> Result<Self> {
        let name = meta.display_name().to_string();
        registry.register_device(DeviceRecord {
            id,
            controller_type,
            meta,
        })?;
        registry.submit_event(Event::new(id, EventKind::DeviceConnect { controller_type }));
        log::debug!("{id} connected ({controller_type:?} \"{name}\")");

        Ok(Self {
            registry,
            id,
            controller_type,
            name,
            lifecycle: Lifecycle::Connected,
        })
    }

    pub(crate) fn submit(&mut self, kind: EventKind) -> Completion {
        self.lifecycle = Lifecycle::Active;
        self.registry.submit_event(Event::new(self.id, kind))
    }

    #[inline]
    pub(crate) fn id(&self) -> DeviceId {
        self.id
    }

    #[inline]
    pub(crate) fn controller_type(&self) -> ControllerType {
        self.controller_type
    }

    #[inline]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

impl Drop for DeviceCore {
    fn drop(&mut self) {
        self.lifecycle = Lifecycle::Disconnected;
        self.registry.submit_event(Event::new(
            self.id,
            EventKind::DeviceDisconnect {
                controller_type: self.controller_type,
            },
        ));
        if let Err(e) = self.registry.unregister_device(self.id) {
            log::warn!("teardown of {}: {e}", self.id);
        }
        log::debug!("{} disconnected", self.id);
    }
}

/// Implements [`InputDevice`] for a struct holding a `core: DeviceCore` field.
macro_rules! impl_input_device {
    ($ty:ty) => {
        impl $crate::device::InputDevice for $ty {
            fn id(&self) -> $crate::device::DeviceId {
                self.core.id()
            }
            fn controller_type(&self) -> $crate::device::ControllerType {
                self.core.controller_type()
            }
            fn name(&self) -> &str {
                self.core.name()
            }
            fn lifecycle(&self) -> $crate::device::Lifecycle {
                self.core.lifecycle()
            }
        }
    };
}
pub(crate) use impl_input_device;
