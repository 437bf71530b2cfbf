use std::collections::BTreeMap;

use crate::device::DeviceId;
use crate::event::Event;
use crate::registry::CompletionToken;

/// Reacts to dispatched events.
///
/// Returning `true` marks the event as handled: dispatch stops there and the
/// producer's [`Completion`](crate::registry::Completion) resolves `true`.
pub trait InputListener: Send {
    fn on_event(&mut self, event: &Event) -> bool;
}

impl<F> InputListener for F
where
    F: FnMut(&Event) -> bool + Send,
{
    fn on_event(&mut self, event: &Event) -> bool {
        self(event)
    }
}

/// Determines which kinds of events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    Devices,
    Keyboard,
    Mouse,
    Touch,
    Gamepad,
    Custom(fn(&Event) -> bool),
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let ty = event.event_type();
        match self {
            EventFilter::All => true,
            EventFilter::Devices => ty.is_device(),
            EventFilter::Keyboard => ty.is_keyboard(),
            EventFilter::Mouse => ty.is_mouse(),
            EventFilter::Touch => ty.is_touch(),
            EventFilter::Gamepad => ty.is_gamepad(),
            EventFilter::Custom(f) => f(event),
        }
    }
}

/// Handle returned by [`EventDispatcher::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct ListenerEntry {
    listener: Box<dyn InputListener>,
    enabled: bool,
    filter: EventFilter,
    device: Option<DeviceId>,
}

/// Fans drained events out to listeners in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    listeners: BTreeMap<ListenerId, ListenerEntry>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener, optionally restricted to one device.
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        device: Option<DeviceId>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                device,
            },
        );
        id
    }

    pub fn enable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Mutes a listener without removing it.
    pub fn disable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Offers one event to every enabled, matching listener until one handles it.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        for entry in self.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }
            if entry.device.is_some_and(|id| id != event.device_id) {
                continue;
            }
            if entry.filter.matches(event) && entry.listener.on_event(event) {
                return true;
            }
        }
        false
    }

    /// Dispatches a drained batch and resolves each completion token.
    pub fn dispatch_all(&mut self, batch: Vec<(Event, CompletionToken)>) -> usize {
        let mut handled = 0;
        for (event, token) in batch {
            let was_handled = self.dispatch(&event);
            if was_handled {
                handled += 1;
            }
            token.resolve(was_handled);
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::device::ControllerType;
    use crate::event::EventKind;
    use crate::keyboard::Key;
    use crate::registry::Registry;

    fn key(id: u64) -> Event {
        Event::new(DeviceId::from_raw(id), EventKind::KeyPress { key: Key::A })
    }

    #[test]
    fn first_handler_wins() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventDispatcher::new();
        let log = seen.clone();
        bus.add_listener(
            move |_: &Event| {
                log.lock().unwrap().push("first");
                true
            },
            EventFilter::Keyboard,
            None,
        );
        let log = seen.clone();
        bus.add_listener(
            move |_: &Event| {
                log.lock().unwrap().push("second");
                true
            },
            EventFilter::All,
            None,
        );

        assert!(bus.dispatch(&key(1)));
        assert_eq!(*seen.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn filters_device_tags_and_disable() {
        let mut bus = EventDispatcher::new();
        let id = bus.add_listener(|_: &Event| true, EventFilter::All, Some(DeviceId::from_raw(2)));
        assert!(!bus.dispatch(&key(1)));
        assert!(bus.dispatch(&key(2)));

        bus.disable(id);
        assert!(!bus.dispatch(&key(2)));
        bus.enable(id);
        assert!(bus.dispatch(&key(2)));
        assert!(bus.remove_listener(id));
        assert!(bus.is_empty());

        bus.add_listener(|_: &Event| true, EventFilter::Gamepad, None);
        assert!(!bus.dispatch(&key(2)));
        let connect = Event::new(
            DeviceId::from_raw(2),
            EventKind::DeviceConnect { controller_type: ControllerType::Gamepad },
        );
        assert!(EventFilter::Devices.matches(&connect));
    }

    #[test]
    fn dispatch_all_resolves_tokens() {
        let registry = Registry::new();
        let mut handled = registry.submit_event(key(1));
        let mut ignored = registry.submit_event(key(2));

        let mut bus = EventDispatcher::new();
        bus.add_listener(|e: &Event| e.device_id.get() == 1, EventFilter::All, None);
        assert_eq!(bus.dispatch_all(registry.drain_events()), 1);

        assert_eq!(handled.try_outcome(), Some(true));
        assert_eq!(ignored.try_outcome(), Some(false));
    }
}
