// Simple color struct, rendered as a CSS rgba() string for the 2d canvas.
// Alpha is kept as a float since the palettes rely on very faint lines.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Color {
        Color { r, g, b, a }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_keeps_fractional_alpha() {
        assert_eq!(
            Color::rgba(0, 243, 255, 0.05).to_css(),
            "rgba(0, 243, 255, 0.05)"
        );
    }
}
