use crate::event::Event;
use crate::eventbus::InputListener;

/// Wraps a listener and filters events based on a user-supplied predicate.
///
/// Events rejected by the predicate count as not handled.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&Event) -> bool + Send + Sync>,
    inner: Box<dyn InputListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&Event) -> bool + Send + Sync + 'static,
        inner: impl InputListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }
}

impl InputListener for FilteredListener {
    fn on_event(&mut self, event: &Event) -> bool {
        (self.predicate)(event) && self.inner.on_event(event)
    }
}
