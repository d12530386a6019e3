//! Theme identifiers and the particle colours that go with them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// The closed set of site themes. `Cyberpunk` is what the page starts with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Cyberpunk,
    Hacker,
    Retro,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Cyberpunk
    }
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Cyberpunk, Theme::Hacker, Theme::Retro];

    pub fn id(self) -> &'static str {
        match self {
            Theme::Cyberpunk => "cyberpunk",
            Theme::Hacker => "hacker",
            Theme::Retro => "retro",
        }
    }

    pub fn from_id(id: &str) -> Option<Theme> {
        Theme::ALL.iter().copied().find(|theme| theme.id() == id)
    }

    /// Unknown ids resolve to the default theme.
    pub fn from_id_or_default(id: &str) -> Theme {
        Theme::from_id(id).unwrap_or_else(|| {
            log::warn!("unknown theme {:?}, using {}", id, Theme::default());
            Theme::default()
        })
    }

    /// Value for the `data-theme` attribute on `<body>`. The default theme
    /// is styled without one.
    pub fn body_attribute(self) -> Option<&'static str> {
        if self == Theme::default() {
            None
        } else {
            Some(self.id())
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Dot fill and connector line colours.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub fill: Color,
    pub line: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Cyberpunk => Palette {
                fill: Color::rgba(0, 243, 255, 0.2),
                line: Color::rgba(0, 243, 255, 0.05),
            },
            Theme::Hacker => Palette {
                fill: Color::rgba(0, 255, 0, 0.2),
                line: Color::rgba(0, 255, 0, 0.05),
            },
            Theme::Retro => Palette {
                fill: Color::rgba(255, 0, 85, 0.2),
                line: Color::rgba(255, 0, 85, 0.05),
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::for_theme(Theme::default())
    }
}

pub fn colors_for(theme_id: &str) -> Palette {
    Palette::for_theme(Theme::from_id_or_default(theme_id))
}
