//! Application-side facade.
//!
//! [`InputManager`] owns the consumer half of a [`Registry`]: it drains the
//! event queue, keeps a [`Snapshot`] current, runs the [`EventDispatcher`]
//! and resolves every completion token. It also wraps the command queue in
//! typed helpers so callers do not build [`Command`] values by hand.

use std::sync::Arc;

use crate::command::{Command, CursorImage, Motor};
use crate::device::DeviceId;
use crate::eventbus::{EventDispatcher, EventFilter, InputListener, ListenerId};
use crate::geometry::Vector2;
use crate::registry::{DeviceRecord, Registry, ResourceId};
use crate::snapshot::Snapshot;

pub struct InputManager {
    registry: Arc<Registry>,
    dispatcher: EventDispatcher,
    snapshot: Snapshot,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(Arc::new(Registry::new()))
    }
}

impl InputManager {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            dispatcher: EventDispatcher::new(),
            snapshot: Snapshot::new(),
        }
    }

    /// The shared registry, for constructing devices on the producer side.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        device: Option<DeviceId>,
    ) -> ListenerId {
        self.dispatcher.add_listener(listener, filter, device)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.dispatcher.remove_listener(id)
    }

    /// Drain pending events, update the snapshot and dispatch them.
    ///
    /// Returns the number of events processed.
    pub fn poll_events(&mut self) -> usize {
        let batch = self.registry.drain_events();
        let count = batch.len();
        for (event, _) in &batch {
            self.snapshot.apply(event);
        }
        let handled = self.dispatcher.dispatch_all(batch);
        if count > 0 {
            log::trace!("dispatched {count} event(s), {handled} handled");
        }
        count
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn devices(&self) -> Vec<DeviceRecord> {
        self.registry.devices()
    }

    // ----- commands -----

    pub fn start_device_discovery(&self) {
        self.registry.submit_command(Command::StartDeviceDiscovery);
    }

    pub fn stop_device_discovery(&self) {
        self.registry.submit_command(Command::StopDeviceDiscovery);
    }

    pub fn set_absolute_dpad_values(&self, device_id: DeviceId, enabled: bool) {
        self.registry
            .submit_command(Command::SetAbsoluteDpadValues { device_id, enabled });
    }

    pub fn set_rotation_allowed(&self, device_id: DeviceId, allowed: bool) {
        self.registry
            .submit_command(Command::SetRotationAllowed { device_id, allowed });
    }

    pub fn set_player_index(&self, device_id: DeviceId, index: i32) {
        self.registry
            .submit_command(Command::SetPlayerIndex { device_id, index });
    }

    /// `speed` is clamped to `[0, 1]`.
    pub fn set_vibration(&self, device_id: DeviceId, motor: Motor, speed: f32) {
        self.registry.submit_command(Command::SetVibration {
            device_id,
            motor,
            speed: speed.clamp(0.0, 1.0),
        });
    }

    pub fn set_mouse_position(&self, device_id: DeviceId, position: Vector2) {
        self.registry
            .submit_command(Command::SetPosition { device_id, position });
    }

    /// Allocate a resource id and ask the platform to build a cursor for it.
    ///
    /// Returns [`ResourceId::NONE`] without queuing anything when ids are exhausted.
    pub fn create_cursor(&self, image: CursorImage) -> ResourceId {
        let resource = self.registry.allocate_resource_id();
        if resource.is_none() {
            return resource;
        }
        self.registry
            .submit_command(Command::InitCursor { resource, image });
        resource
    }

    pub fn destroy_cursor(&self, resource: ResourceId) {
        if resource.is_none() {
            return;
        }
        self.registry
            .submit_command(Command::DestroyCursor { resource });
        self.registry.release_resource_id(resource);
    }

    pub fn set_cursor(&self, device_id: DeviceId, resource: ResourceId) {
        self.registry
            .submit_command(Command::SetCursor { device_id, resource });
    }

    pub fn set_cursor_visible(&self, device_id: DeviceId, visible: bool) {
        self.registry
            .submit_command(Command::SetCursorVisible { device_id, visible });
    }

    pub fn set_cursor_locked(&self, device_id: DeviceId, locked: bool) {
        self.registry
            .submit_command(Command::SetCursorLocked { device_id, locked });
    }

    pub fn show_virtual_keyboard(&self, device_id: DeviceId) {
        self.registry
            .submit_command(Command::ShowVirtualKeyboard { device_id });
    }

    pub fn hide_virtual_keyboard(&self, device_id: DeviceId) {
        self.registry
            .submit_command(Command::HideVirtualKeyboard { device_id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::SystemCursor;
    use crate::event::Event;
    use crate::keyboard::{Key, KeyboardDevice};

    #[test]
    fn poll_updates_snapshot_and_resolves() {
        let mut manager = InputManager::default();
        let registry = manager.registry().clone();
        let mut keyboard = KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
        let id = crate::device::InputDevice::id(&keyboard);

        manager.add_listener(|_: &Event| true, EventFilter::Keyboard, None);
        let mut done = keyboard.handle_key_press(Key::Space);
        assert_eq!(manager.poll_events(), 2);
        assert_eq!(done.try_outcome(), Some(true));
        assert!(manager.snapshot().get(id).unwrap().is_key_down(Key::Space));

        drop(keyboard);
        assert_eq!(manager.poll_events(), 1);
        assert!(manager.snapshot().get(id).is_none());
    }

    #[test]
    fn cursor_ids_are_recycled() {
        let manager = InputManager::default();
        let a = manager.create_cursor(CursorImage::System(SystemCursor::Hand));
        let b = manager.create_cursor(CursorImage::System(SystemCursor::Arrow));
        assert_eq!((a, b), (ResourceId(1), ResourceId(2)));
        manager.destroy_cursor(a);
        manager.destroy_cursor(ResourceId::NONE);
        assert_eq!(
            manager.create_cursor(CursorImage::System(SystemCursor::IBeam)),
            ResourceId(1)
        );

        let commands = manager.registry().drain_commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[2], Command::DestroyCursor { resource: a });
    }

    #[test]
    fn vibration_speed_is_clamped() {
        let manager = InputManager::default();
        let id = DeviceId::from_raw(9);
        manager.set_vibration(id, Motor::All, 3.0);
        assert_eq!(
            manager.registry().drain_commands(),
            vec![Command::SetVibration { device_id: id, motor: Motor::All, speed: 1.0 }]
        );
    }
}
