//! Drives a [`ParticleField`] from `requestAnimationFrame`.
//!
//! The frame callback re-registers itself after every frame. Stopping cancels
//! the pending request and drops the callback, so nothing is left scheduled.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::engine::ParticleField;
use crate::error::FieldError;
use crate::surface::DrawingSurface;
use crate::utils;

type FrameCallback = Closure<dyn FnMut()>;

pub struct AnimationLoop {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &FrameCallback) -> Result<i32, FieldError> {
    Ok(utils::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

impl AnimationLoop {
    /// Marks the field as running and schedules its first frame.
    pub fn start<S: DrawingSurface + 'static>(
        field: Rc<RefCell<ParticleField<S>>>,
    ) -> Result<Self, FieldError> {
        field.borrow_mut().start();

        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let this_callback = callback.clone();
        let this_pending = pending.clone();
        let frame = Closure::wrap(Box::new(move || {
            this_pending.set(None);

            let reschedule = {
                #[cfg(feature = "frame-timing")]
                let _timer = utils::Timer::new("ParticleField::frame");
                field.borrow_mut().frame()
            };
            if !reschedule {
                // Drops this closure and breaks the Rc cycle
                let _ = this_callback.borrow_mut().take();
                return;
            }

            if let Some(next) = this_callback.borrow().as_ref() {
                match request_frame(next) {
                    Ok(id) => this_pending.set(Some(id)),
                    Err(err) => log::error!("failed to schedule particle frame: {}", err),
                }
            }
        }) as Box<dyn FnMut()>);

        let id = request_frame(&frame)?;
        pending.set(Some(id));
        *callback.borrow_mut() = Some(frame);

        Ok(AnimationLoop { callback, pending })
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            match utils::window() {
                Ok(window) => {
                    if let Err(err) = window.cancel_animation_frame(id) {
                        log::warn!("failed to cancel animation frame {}: {:?}", id, err);
                    }
                }
                Err(err) => log::warn!("{}", err),
            }
        }
        let _ = self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
