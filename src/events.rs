use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::FieldError;

type Handler = dyn FnMut(Event);

/// A DOM event listener that is removed again when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<Handler>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, FieldError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<Handler>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(EventListener {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {:?}", self.event, err);
        }
    }
}
