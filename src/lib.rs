extern crate nalgebra_glm as glm;

pub mod animation;
pub mod color;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod events;
pub mod guestbook;
pub mod palette;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod surface;
pub mod utils;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::animation::AnimationLoop;
use crate::effects::{MobileMenu, ScrollSpy, StatCounter, SubmitStage, Tilt, Typewriter};
use crate::events::EventListener;
use crate::guestbook::{escape_html, Guestbook, LocalStorage};
use crate::renderer::CanvasRenderer;

pub use crate::config::FieldConfig;
pub use crate::engine::{FieldState, ParticleField};
pub use crate::error::FieldError;
pub use crate::palette::{colors_for, Palette, Theme};
pub use crate::surface::{DrawCommand, DrawingSurface, RecordingSurface};

// Use `wee_alloc` as the global allocator when the feature is enabled
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    utils::init_logger(level);
}

/// Value for `<body data-theme>` when switching to `theme_id`, or `undefined`
/// for the default theme.
#[wasm_bindgen]
pub fn theme_attribute(theme_id: &str) -> Option<String> {
    Theme::from_id_or_default(theme_id)
        .body_attribute()
        .map(str::to_owned)
}

#[wasm_bindgen]
pub fn tilt_transform(x: f64, y: f64, width: f64, height: f64) -> String {
    Tilt::from_pointer(x, y, width, height).css()
}

#[wasm_bindgen]
pub fn tilt_reset() -> String {
    Tilt::RESET.to_owned()
}

/// The animated particle background bound to a canvas element.
#[wasm_bindgen]
pub struct ParticleBackground {
    field: Rc<RefCell<ParticleField<CanvasRenderer>>>,
    animation: Option<AnimationLoop>,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl ParticleBackground {
    pub fn attach(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
        Ok(Self::attach_inner(canvas_id, FieldConfig::default())?)
    }

    /// Like `attach`, with a partial `FieldConfig` object.
    pub fn attach_with_config(
        canvas_id: &str,
        config: JsValue,
    ) -> Result<ParticleBackground, JsValue> {
        let config: FieldConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|err| FieldError::Config(err.to_string()))?;
        Ok(Self::attach_inner(canvas_id, config)?)
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        let scheduled = self
            .animation
            .as_ref()
            .map_or(false, AnimationLoop::is_scheduled);
        if scheduled && self.field.borrow().is_running() {
            return Ok(());
        }
        self.animation = Some(AnimationLoop::start(self.field.clone())?);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.field.borrow_mut().stop();
        if let Some(mut animation) = self.animation.take() {
            animation.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.field.borrow().is_running()
    }

    pub fn set_theme(&mut self, theme_id: &str) {
        self.field.borrow_mut().set_theme_id(theme_id);
    }

    pub fn theme(&self) -> String {
        self.field.borrow().theme().id().to_owned()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        resize_field(&self.field, width, height);
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }
}

impl ParticleBackground {
    fn attach_inner(canvas_id: &str, config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let window = utils::window()?;
        let canvas = utils::document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| FieldError::CanvasNotFound(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::CanvasNotFound(canvas_id.to_owned()))?;

        let (width, height) = utils::viewport_size(&window)?;
        let mut renderer = CanvasRenderer::new(canvas)?;
        renderer.resize(width as u32, height as u32);
        let field = Rc::new(RefCell::new(ParticleField::with_config(
            renderer, width, height, config,
        )));

        let on_resize = {
            let field = field.clone();
            let window = window.clone();
            move |_: web_sys::Event| match utils::viewport_size(&window) {
                Ok((width, height)) => resize_field(&field, width, height),
                Err(err) => log::warn!("{}", err),
            }
        };
        let on_move = {
            let field = field.clone();
            move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    field
                        .borrow_mut()
                        .pointer_moved(event.client_x() as f64, event.client_y() as f64);
                }
            }
        };
        let on_leave = {
            let field = field.clone();
            move |_: web_sys::Event| field.borrow_mut().pointer_left()
        };

        let listeners = vec![
            EventListener::new(&window, "resize", on_resize)?,
            EventListener::new(&window, "mousemove", on_move)?,
            EventListener::new(&window, "mouseout", on_leave)?,
        ];

        Ok(ParticleBackground {
            field,
            animation: None,
            _listeners: listeners,
        })
    }
}

fn resize_field(field: &RefCell<ParticleField<CanvasRenderer>>, width: f64, height: f64) {
    let mut field = field.borrow_mut();
    field.surface_mut().resize(width as u32, height as u32);
    field.resize(width, height);
}

/// Guestbook stored in `localStorage`.
#[wasm_bindgen]
pub struct WebGuestbook {
    inner: Guestbook<LocalStorage>,
}

#[wasm_bindgen]
impl WebGuestbook {
    pub fn open() -> Result<WebGuestbook, JsValue> {
        Ok(WebGuestbook {
            inner: Guestbook::new(LocalStorage::new()?),
        })
    }

    /// Entries as a JS array of `{ id, name, text, date }`, newest first.
    pub fn entries(&self) -> Result<JsValue, JsValue> {
        let entries = self.inner.entries()?;
        serde_wasm_bindgen::to_value(&entries).map_err(|err| err.into())
    }

    /// Returns `false` when the name or message is blank.
    pub fn post(&mut self, name: &str, text: &str) -> Result<bool, JsValue> {
        let id = js_sys::Date::now() as u64;
        let date = js_sys::Date::new_0()
            .to_locale_date_string("default", &JsValue::UNDEFINED)
            .as_string()
            .unwrap_or_default();
        Ok(self.inner.post(name, text, id, &date)?.is_some())
    }

    pub fn delete(&mut self, id: f64) -> Result<bool, JsValue> {
        Ok(self.inner.delete(id as u64)?)
    }
}

#[wasm_bindgen]
pub fn escape(text: &str) -> String {
    escape_html(text)
}

/// Counter for one `.stat-number` element.
#[wasm_bindgen]
pub struct StatCounterHandle {
    inner: StatCounter,
}

#[wasm_bindgen]
impl StatCounterHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(target: f64) -> StatCounterHandle {
        StatCounterHandle {
            inner: StatCounter::new(target),
        }
    }

    pub fn step_ms() -> u32 {
        StatCounter::STEP_MS
    }

    /// Advances one step, `false` once finished.
    pub fn step(&mut self) -> bool {
        self.inner.step()
    }

    pub fn display(&self) -> String {
        self.inner.display()
    }
}

#[wasm_bindgen]
pub struct TypewriterHandle {
    inner: Typewriter,
}

#[wasm_bindgen]
impl TypewriterHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> TypewriterHandle {
        TypewriterHandle {
            inner: Typewriter::new(text),
        }
    }

    pub fn start_delay_ms() -> u32 {
        Typewriter::START_DELAY_MS
    }

    pub fn char_delay_ms() -> u32 {
        Typewriter::CHAR_DELAY_MS
    }

    /// Next visible prefix, `undefined` once the whole text is shown.
    pub fn next(&mut self) -> Option<String> {
        self.inner.next()
    }

    /// True once every character is shown and the cursor should be added.
    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    pub fn cursor_html() -> String {
        Typewriter::CURSOR_HTML.to_owned()
    }
}

#[wasm_bindgen]
pub struct ScrollSpyHandle {
    inner: ScrollSpy,
}

#[wasm_bindgen]
impl ScrollSpyHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ScrollSpyHandle {
        ScrollSpyHandle {
            inner: ScrollSpy::new(),
        }
    }

    /// Register a section, in document order, from its `offsetTop` and
    /// `clientHeight`.
    pub fn add_section(&mut self, id: &str, top: f64, height: f64) {
        self.inner.add(id, top, height);
    }

    /// Id of the section whose nav link should be active.
    pub fn active(&self, scroll_y: f64) -> Option<String> {
        self.inner.active_at(scroll_y).map(str::to_owned)
    }
}

#[wasm_bindgen]
pub fn project_visible(filter: &str, categories: &str) -> bool {
    effects::project_visible(filter, categories)
}

/// Simulated send for the contact form's submit button.
#[wasm_bindgen]
pub struct ContactFormHandle {
    stage: SubmitStage,
}

#[wasm_bindgen]
impl ContactFormHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ContactFormHandle {
        ContactFormHandle {
            stage: SubmitStage::default(),
        }
    }

    /// Starts a send. Returns `false` if one is already under way.
    pub fn submit(&mut self) -> bool {
        let next = self.stage.submit();
        let started = next != self.stage;
        self.stage = next;
        started
    }

    /// Moves to the next stage. Returns `true` when the form should be reset
    /// and thanked.
    pub fn advance(&mut self) -> bool {
        let finished = self.stage == SubmitStage::Sent;
        self.stage = self.stage.advance();
        finished
    }

    /// Milliseconds until `advance`, `undefined` while idle.
    pub fn delay_ms(&self) -> Option<u32> {
        self.stage.delay_ms()
    }

    /// Button markup, `undefined` to restore the original label.
    pub fn label(&self) -> Option<String> {
        self.stage.label().map(str::to_owned)
    }

    pub fn disabled(&self) -> bool {
        self.stage.button_disabled()
    }

    pub fn thank_you() -> String {
        SubmitStage::THANK_YOU.to_owned()
    }
}

#[wasm_bindgen]
pub struct MobileMenuHandle {
    inner: MobileMenu,
}

#[wasm_bindgen]
impl MobileMenuHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MobileMenuHandle {
        MobileMenuHandle {
            inner: MobileMenu::default(),
        }
    }

    /// Returns whether the menu is now open.
    pub fn toggle(&mut self) -> bool {
        self.inner.toggle()
    }

    pub fn close(&mut self) {
        self.inner.close();
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    pub fn icon(&self) -> String {
        self.inner.icon().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typewriter_handle_reports_when_typing_ends() {
        let mut typewriter = TypewriterHandle::new("hi");
        assert!(!typewriter.is_done());
        assert_eq!(typewriter.next().as_deref(), Some("h"));
        assert!(!typewriter.is_done());
        assert_eq!(typewriter.next().as_deref(), Some("hi"));
        assert!(typewriter.is_done());
        assert_eq!(typewriter.next(), None);
    }

    #[test]
    fn stat_counter_handle_stops_on_bad_target() {
        let mut counter = StatCounterHandle::new(f64::NAN);
        assert!(!counter.step());
        assert_eq!(counter.display(), "0");
    }

    #[test]
    fn contact_form_handle_runs_once_per_submit() {
        let mut form = ContactFormHandle::new();
        assert!(form.submit());
        assert!(!form.submit());
        assert!(form.disabled());
        assert_eq!(form.delay_ms(), Some(1500));
        assert!(!form.advance());
        assert_eq!(form.delay_ms(), Some(2000));
        assert!(form.advance());
        assert!(!form.disabled());
        assert_eq!(form.label(), None);
    }

    #[test]
    fn scroll_spy_handle_follows_scroll() {
        let mut spy = ScrollSpyHandle::new();
        spy.add_section("home", 0.0, 600.0);
        spy.add_section("contact", 2000.0, 600.0);
        assert_eq!(spy.active(100.0).as_deref(), Some("home"));
        assert_eq!(spy.active(1800.0).as_deref(), Some("contact"));
        assert!(project_visible("all", ""));
    }

    #[test]
    fn mobile_menu_handle_closes_after_link() {
        let mut menu = MobileMenuHandle::new();
        assert!(menu.toggle());
        assert_eq!(menu.icon(), "fa-times");
        menu.close();
        assert!(!menu.is_open());
    }
}
