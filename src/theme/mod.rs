//! Theming system with automatic color degradation

mod color;

pub use color::{AnsiColor, Color};

use crate::a11y::AccessibilitySettings;
use crate::terminal::TerminalCapabilities;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const UNDERLINE: &str = "\x1b[4m";
const INVERSE: &str = "\x1b[7m";

/// Theme defining colors and text styles for the pattern components
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_fg: Color,
    pub heading_fg: Color,
    pub label_fg: Color,
    pub link_fg: Color,
    pub error_fg: Color,

    pub header_bg: Color,
    pub selected_bg: Color,
    pub now_bg: Color,

    pub border_color: Color,
    pub focus_fg: Color,

    pub accessibility: AccessibilitySettings,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create a new theme with terminal capabilities
    pub fn new(caps: TerminalCapabilities) -> Self {
        let accessibility = AccessibilitySettings::from_env();
        Self::with_accessibility(caps, accessibility)
    }

    /// Create a theme with explicit accessibility settings
    pub fn with_accessibility(
        caps: TerminalCapabilities,
        accessibility: AccessibilitySettings,
    ) -> Self {
        let high_contrast = accessibility.high_contrast;

        Theme {
            text_fg: Color::white(),
            heading_fg: Color::white(),
            label_fg: if high_contrast {
                Color::light_gray()
            } else {
                Color::dark_gray()
            },
            link_fg: Color::rgb(100, 150, 255),
            error_fg: Color::rgb(255, 100, 100),

            header_bg: Color::rgb(40, 44, 52),
            selected_bg: Color::rgb(30, 34, 40),
            now_bg: Color::rgb(45, 50, 58),

            border_color: if high_contrast {
                Color::white()
            } else {
                Color::dark_gray()
            },
            focus_fg: Color::rgb(100, 150, 255),

            accessibility,
            caps,
        }
    }

    /// Plain body text
    pub fn text_style(&self) -> String {
        self.text_fg.degrade(&self.caps)
    }

    /// Section headings
    pub fn heading_style(&self) -> String {
        format!("{}{}", BOLD, self.heading_fg.degrade(&self.caps))
    }

    /// Secondary labels (program meta, time text)
    pub fn label_style(&self) -> String {
        format!("{}{}", DIM, self.label_fg.degrade(&self.caps))
    }

    /// Underlined link text
    pub fn link_style(&self) -> String {
        format!("{}{}", UNDERLINE, self.link_fg.degrade(&self.caps))
    }

    /// Error messages
    pub fn error_style(&self) -> String {
        self.error_fg.degrade(&self.caps)
    }

    /// Column header row of the grid
    pub fn header_style(&self) -> String {
        format!(
            "{}{}{}",
            BOLD,
            self.header_bg.bg(&self.caps),
            self.text_fg.degrade(&self.caps)
        )
    }

    /// A grid cell, styled by its interaction state
    pub fn cell_style(&self, focused: bool, on_selected_row: bool, is_now: bool) -> String {
        if focused {
            // Inverse video reads on every color depth
            return format!("{}{}", BOLD, INVERSE);
        }

        let mut style = String::new();
        if is_now {
            style.push_str(&self.now_bg.bg(&self.caps));
        } else if on_selected_row {
            style.push_str(&self.selected_bg.bg(&self.caps));
        }
        style.push_str(&self.text_fg.degrade(&self.caps));
        style
    }

    /// Borders between cells and around panels
    pub fn border_style(&self) -> String {
        self.border_color.degrade(&self.caps)
    }

    /// Background content while a modal is open
    pub fn inert_style(&self) -> String {
        DIM.to_string()
    }

    /// Status lines (toast, carousel announcement)
    pub fn status_style(&self) -> String {
        format!("{}{}", INVERSE, self.text_fg.degrade(&self.caps))
    }

    /// Reset sequence
    pub fn reset(&self) -> &'static str {
        RESET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focused_cell_is_inverse() {
        let theme = Theme::with_accessibility(
            TerminalCapabilities::full(),
            AccessibilitySettings::new(),
        );

        let style = theme.cell_style(true, false, false);
        assert!(style.contains(INVERSE));
    }

    #[test]
    fn test_high_contrast_borders() {
        let mut settings = AccessibilitySettings::new();
        settings.high_contrast = true;

        let theme = Theme::with_accessibility(TerminalCapabilities::full(), settings);
        assert_eq!(theme.border_color, Color::white());
    }
}
