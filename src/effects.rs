//! Small page effects: card tilt, counting stats, the typed greeting, scroll
//! spy navigation, project filtering, the contact form button and the
//! mobile menu.

const MAX_TILT_DEG: f64 = 10.0;

/// Rotation for a card hovered at `(x, y)`, relative to its top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub const RESET: &'static str = "perspective(1000px) rotateX(0) rotateY(0) scale(1)";

    pub fn from_pointer(x: f64, y: f64, width: f64, height: f64) -> Tilt {
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        if !(center_x > 0.0 && center_y > 0.0) {
            return Tilt {
                rotate_x: 0.0,
                rotate_y: 0.0,
            };
        }
        Tilt {
            rotate_x: (y - center_y) / center_y * -MAX_TILT_DEG,
            rotate_y: (x - center_x) / center_x * MAX_TILT_DEG,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) scale(1.05)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Counts a statistic up from zero to its target.
#[derive(Clone, Debug, PartialEq)]
pub struct StatCounter {
    target: f64,
    current: f64,
    increment: f64,
}

impl StatCounter {
    pub const DURATION_MS: u32 = 2000;
    pub const STEP_MS: u32 = 20;

    pub fn new(target: f64) -> Self {
        let steps = f64::from(Self::DURATION_MS / Self::STEP_MS);
        StatCounter {
            target,
            current: 0.0,
            increment: target / steps,
        }
    }

    /// Advances one step. Returns `false` once the target has been reached.
    pub fn step(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.current += self.increment;
        if self.current >= self.target || self.increment <= 0.0 {
            self.current = self.target;
        }
        true
    }

    // A target that isn't a number has nothing to count towards
    pub fn is_done(&self) -> bool {
        !self.target.is_finite() || self.current >= self.target
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    // Fractional targets show one decimal place
    pub fn display(&self) -> String {
        if !self.target.is_finite() {
            "0".to_owned()
        } else if self.target.fract() != 0.0 {
            format!("{:.1}", self.current)
        } else {
            format!("{}", self.current.floor())
        }
    }
}

/// Reveals a greeting one character at a time.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    shown: usize,
}

impl Typewriter {
    pub const START_DELAY_MS: u32 = 500;
    pub const CHAR_DELAY_MS: u32 = 100;
    /// Appended once the whole text is shown.
    pub const CURSOR_HTML: &'static str = "<span class=\"typing-cursor\">&nbsp;</span>";

    pub fn new(text: &str) -> Self {
        Typewriter {
            text: text.to_owned(),
            shown: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.text.len()
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.shown]
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let c = self.text[self.shown..].chars().next()?;
        self.shown += c.len_utf8();
        Some(self.visible().to_owned())
    }
}

/// A page section as laid out in the document.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Picks the navigation entry to highlight for the current scroll position.
#[derive(Clone, Debug, Default)]
pub struct ScrollSpy {
    sections: Vec<Section>,
}

impl ScrollSpy {
    pub fn new() -> Self {
        ScrollSpy::default()
    }

    /// Sections must be added in document order.
    pub fn add(&mut self, id: &str, top: f64, height: f64) {
        self.sections.push(Section {
            id: id.to_owned(),
            top,
            height,
        });
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The last section whose top, raised by a third of its height, has been
    /// scrolled past.
    pub fn active(sections: &[Section], scroll_y: f64) -> Option<&str> {
        sections
            .iter()
            .filter(|section| scroll_y >= section.top - section.height / 3.0)
            .last()
            .map(|section| section.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn active_at(&self, scroll_y: f64) -> Option<&str> {
        Self::active(&self.sections, scroll_y)
    }
}

/// Whether a project card tagged with `categories` shows under `filter`.
/// Categories are matched as a substring of the card's tag list.
pub fn project_visible(filter: &str, categories: &str) -> bool {
    filter == "all" || categories.contains(filter)
}

/// The contact form's submit button while a send is simulated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitStage {
    Idle,
    Sending,
    Sent,
}

impl Default for SubmitStage {
    fn default() -> Self {
        SubmitStage::Idle
    }
}

impl SubmitStage {
    pub const SENDING_MS: u32 = 1500;
    pub const SENT_MS: u32 = 2000;
    pub const THANK_YOU: &'static str =
        "Thank you for your message! I will get back to you soon.";

    /// Submitting only starts a send from `Idle`.
    pub fn submit(self) -> SubmitStage {
        match self {
            SubmitStage::Idle => SubmitStage::Sending,
            other => other,
        }
    }

    pub fn advance(self) -> SubmitStage {
        match self {
            SubmitStage::Idle => SubmitStage::Idle,
            SubmitStage::Sending => SubmitStage::Sent,
            SubmitStage::Sent => SubmitStage::Idle,
        }
    }

    /// How long this stage lasts before `advance`. `Idle` waits for a submit.
    pub fn delay_ms(self) -> Option<u32> {
        match self {
            SubmitStage::Idle => None,
            SubmitStage::Sending => Some(Self::SENDING_MS),
            SubmitStage::Sent => Some(Self::SENT_MS),
        }
    }

    /// Button markup, `None` meaning the button's own label.
    pub fn label(self) -> Option<&'static str> {
        match self {
            SubmitStage::Idle => None,
            SubmitStage::Sending => Some("<i class=\"fas fa-spinner fa-spin\"></i> Sending..."),
            SubmitStage::Sent => Some("<i class=\"fas fa-check\"></i> Message Sent!"),
        }
    }

    pub fn button_disabled(self) -> bool {
        self != SubmitStage::Idle
    }
}

/// Open state of the collapsible navigation on small screens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    // Following a nav link closes the menu
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Font Awesome class for the menu button.
    pub fn icon(&self) -> &'static str {
        if self.open {
            "fa-times"
        } else {
            "fa-bars"
        }
    }
}
