use crate::event::Event;
use crate::eventbus::InputListener;

/// Listener that logs every event at `debug` level and never handles it.
///
/// Register it first with [`EventFilter::All`](crate::eventbus::EventFilter::All)
/// so it sees events before a handling listener stops dispatch.
#[derive(Debug, Default)]
pub struct EventLogger {
    target: Option<&'static str>,
}

impl EventLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log under a custom target instead of this module's path.
    pub fn with_target(target: &'static str) -> Self {
        Self {
            target: Some(target),
        }
    }
}

impl InputListener for EventLogger {
    fn on_event(&mut self, event: &Event) -> bool {
        let target = self.target.unwrap_or(module_path!());
        log::debug!(target: target, "[{}] {:?}", event.device_id, event.kind);
        false
    }
}
