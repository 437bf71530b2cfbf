//! Device table, event/command queues and resource-id allocator.
//!
//! [`Registry`] is shared through an `Arc` between the producer context
//! (platform polling, device objects) and the consumer context (application
//! loop, command dispatch). Each queue has its own lock. Producers hold a lock
//! only long enough to push one entry; consumers drain by swapping the whole
//! `Vec` out under a single acquisition and process entries outside the lock.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use inputcore::{Key, KeyboardDevice, Registry};
//!
//! let registry = Arc::new(Registry::new());
//! let mut keyboard = KeyboardDevice::new(registry.clone(), registry.next_device_id())?;
//! let mut done = keyboard.handle_key_press(Key::Space);
//!
//! for (event, token) in registry.drain_events() {
//!     println!("{} {:?}", event.device_id, event.kind);
//!     token.resolve(true);
//! }
//! assert_eq!(done.try_outcome(), Some(true));
//! # Ok::<(), inputcore::InputError>(())
//! ```

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures::channel::oneshot;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::device::{ControllerType, DeviceId};
use crate::error::{InputError, Result};
use crate::event::Event;
use crate::metadata::DeviceMeta;

/// What the registry knows about a live device.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub controller_type: ControllerType,
    pub meta: DeviceMeta,
}

/// Application-visible handle for a platform resource (cursor image, ...).
///
/// `0` is reserved ([`ResourceId::NONE`]) and never handed out by the allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

impl ResourceId {
    pub const NONE: ResourceId = ResourceId(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Reuse-aware id counter. Freed ids are handed out again smallest first.
#[derive(Debug, Default)]
pub struct ResourceIds {
    last: u32,
    free: BTreeSet<u32>,
}

impl ResourceIds {
    /// Next free id.
    ///
    /// Once all `u32::MAX` ids are live this returns [`ResourceId::NONE`]
    /// until one of them is released.
    pub fn allocate(&mut self) -> ResourceId {
        if let Some(id) = self.free.pop_first() {
            return ResourceId(id);
        }
        match self.last.checked_add(1) {
            Some(next) => {
                self.last = next;
                ResourceId(next)
            }
            None => {
                log::warn!("resource ids exhausted");
                ResourceId::NONE
            }
        }
    }

    pub fn release(&mut self, id: ResourceId) {
        if id.is_none() {
            return;
        }
        self.free.insert(id.0);
    }
}

/// Consumer half of an event's completion: resolve it once the event has been handled.
///
/// Dropping the token without resolving it reports the event as ignored.
#[derive(Debug)]
pub struct CompletionToken {
    sender: oneshot::Sender<bool>,
}

impl CompletionToken {
    pub fn resolve(self, handled: bool) {
        // The producer may have dropped its half; nobody is waiting then.
        let _ = self.sender.send(handled);
    }
}

/// Producer half of an event's completion.
///
/// Can be checked without blocking ([`Completion::try_outcome`]) or awaited;
/// the output is `true` when the application consumed the event.
#[derive(Debug)]
pub struct Completion {
    receiver: oneshot::Receiver<bool>,
}

impl Completion {
    fn pair() -> (CompletionToken, Completion) {
        let (sender, receiver) = oneshot::channel();
        (CompletionToken { sender }, Completion { receiver })
    }

    /// `None` while the application has not handled the event yet.
    pub fn try_outcome(&mut self) -> Option<bool> {
        match self.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => Some(false),
        }
    }

    /// Block the calling thread until the event is resolved.
    pub fn wait(self) -> bool {
        futures::executor::block_on(self)
    }
}

impl Future for Completion {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or(false))
    }
}

/// Authoritative device table plus the two transport queues.
#[derive(Debug)]
pub struct Registry {
    next_device_id: AtomicU64,
    devices: RwLock<HashMap<DeviceId, DeviceRecord>>,
    events: Mutex<Vec<(Event, CompletionToken)>>,
    commands: Mutex<Vec<Command>>,
    resources: Mutex<ResourceIds>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_device_id: AtomicU64::new(1),
            devices: RwLock::new(HashMap::new()),
            events: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
            resources: Mutex::new(ResourceIds::default()),
        }
    }

    /// Fresh id for a device about to be constructed. Ids are never reused.
    pub fn next_device_id(&self) -> DeviceId {
        DeviceId::from_raw(self.next_device_id.fetch_add(1, Ordering::Relaxed))
    }

    // ----- device table -----

    pub fn register_device(&self, record: DeviceRecord) -> Result<()> {
        let mut devices = self.devices.write();
        if devices.contains_key(&record.id) {
            return Err(InputError::DuplicateDevice(record.id));
        }
        log::trace!("register {} as {:?}", record.id, record.controller_type);
        devices.insert(record.id, record);
        Ok(())
    }

    pub fn unregister_device(&self, id: DeviceId) -> Result<DeviceRecord> {
        self.devices
            .write()
            .remove(&id)
            .ok_or(InputError::UnknownDevice(id))
    }

    pub fn lookup_device(&self, id: DeviceId) -> Option<DeviceRecord> {
        self.devices.read().get(&id).cloned()
    }

    pub fn device_count(&self) -> usize {
        self.devices.read().len()
    }

    /// Records of all live devices, ordered by id.
    pub fn devices(&self) -> Vec<DeviceRecord> {
        let mut out: Vec<_> = self.devices.read().values().cloned().collect();
        out.sort_by_key(|r| r.id);
        out
    }

    // ----- events (producer -> application) -----

    pub fn submit_event(&self, event: Event) -> Completion {
        let (token, completion) = Completion::pair();
        self.events.lock().push((event, token));
        completion
    }

    /// Everything submitted since the last drain, in submission order.
    pub fn drain_events(&self) -> Vec<(Event, CompletionToken)> {
        std::mem::take(&mut *self.events.lock())
    }

    // ----- commands (application -> platform) -----

    pub fn submit_command(&self, command: Command) {
        self.commands.lock().push(command);
    }

    pub fn drain_commands(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock())
    }

    // ----- resource ids -----

    pub fn allocate_resource_id(&self) -> ResourceId {
        self.resources.lock().allocate()
    }

    pub fn release_resource_id(&self, id: ResourceId) {
        self.resources.lock().release(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn record(registry: &Registry) -> DeviceRecord {
        DeviceRecord {
            id: registry.next_device_id(),
            controller_type: ControllerType::Gamepad,
            meta: DeviceMeta::named("pad"),
        }
    }

    #[test]
    fn duplicate_registration_fails() {
        let registry = Registry::new();
        let rec = record(&registry);
        registry.register_device(rec.clone()).unwrap();
        assert!(matches!(
            registry.register_device(rec.clone()),
            Err(InputError::DuplicateDevice(id)) if id == rec.id
        ));
        assert_eq!(registry.device_count(), 1);
        assert_eq!(registry.lookup_device(rec.id), Some(rec.clone()));

        registry.unregister_device(rec.id).unwrap();
        assert!(registry.lookup_device(rec.id).is_none());
        assert!(registry.unregister_device(rec.id).is_err());
    }

    #[test]
    fn resource_ids_reuse_smallest_freed() {
        let registry = Registry::new();
        let a = registry.allocate_resource_id();
        let b = registry.allocate_resource_id();
        let c = registry.allocate_resource_id();
        assert_eq!((a.0, b.0, c.0), (1, 2, 3));

        registry.release_resource_id(c);
        registry.release_resource_id(a);
        registry.release_resource_id(ResourceId::NONE);
        assert_eq!(registry.allocate_resource_id(), a);
        assert_eq!(registry.allocate_resource_id(), c);
        assert_eq!(registry.allocate_resource_id(), ResourceId(4));
    }

    #[test]
    fn exhausted_resource_ids_yield_none_until_released() {
        let mut ids = ResourceIds {
            last: u32::MAX - 1,
            free: BTreeSet::new(),
        };
        assert_eq!(ids.allocate(), ResourceId(u32::MAX));
        assert_eq!(ids.allocate(), ResourceId::NONE);
        assert_eq!(ids.allocate(), ResourceId::NONE);

        ids.release(ResourceId(17));
        assert_eq!(ids.allocate(), ResourceId(17));
        assert!(ids.allocate().is_none());
    }

    #[test]
    fn drain_preserves_order_and_empties_queue() {
        let registry = Registry::new();
        let id = registry.next_device_id();
        for locked in [true, false, true] {
            registry.submit_event(Event::new(id, EventKind::MouseCursorLockChange { locked }));
        }
        let drained: Vec<_> = registry
            .drain_events()
            .into_iter()
            .map(|(e, _)| e.kind)
            .collect();
        assert_eq!(
            drained,
            vec![
                EventKind::MouseCursorLockChange { locked: true },
                EventKind::MouseCursorLockChange { locked: false },
                EventKind::MouseCursorLockChange { locked: true },
            ]
        );
        assert!(registry.drain_events().is_empty());
    }

    #[test]
    fn completion_reports_resolution() {
        let registry = Registry::new();
        let id = registry.next_device_id();
        let mut handled = registry.submit_event(Event::new(id, EventKind::MouseCursorLockChange { locked: true }));
        let mut dropped = registry.submit_event(Event::new(id, EventKind::MouseCursorLockChange { locked: false }));
        assert_eq!(handled.try_outcome(), None);

        let mut drained = registry.drain_events().into_iter();
        let (_, first) = drained.next().unwrap();
        first.resolve(true);
        drop(drained);

        assert_eq!(handled.try_outcome(), Some(true));
        assert_eq!(dropped.try_outcome(), Some(false));
    }

    #[test]
    fn completion_can_be_awaited_across_threads() {
        let registry = std::sync::Arc::new(Registry::new());
        let id = registry.next_device_id();
        let completion = registry.submit_event(Event::new(id, EventKind::MouseCursorLockChange { locked: true }));

        let consumer = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for (_, token) in registry.drain_events() {
                    token.resolve(true);
                }
            })
        };
        assert!(completion.wait());
        consumer.join().unwrap();
    }

    #[test]
    fn commands_round_trip_in_order() {
        let registry = Registry::new();
        registry.submit_command(Command::StartDeviceDiscovery);
        registry.submit_command(Command::StopDeviceDiscovery);
        assert_eq!(
            registry.drain_commands(),
            vec![Command::StartDeviceDiscovery, Command::StopDeviceDiscovery]
        );
        assert!(registry.drain_commands().is_empty());
    }
}
