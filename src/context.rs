//! Rendering context - provides theme and accessibility settings to components

use crate::a11y::AccessibilitySettings;
use crate::theme::Theme;

/// Context passed down the component tree during rendering
#[derive(Clone)]
pub struct RenderContext<'a> {
    /// Current theme
    pub theme: &'a Theme,

    /// Accessibility settings
    pub accessibility: &'a AccessibilitySettings,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context from a theme
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext {
            theme,
            accessibility: &theme.accessibility,
        }
    }

    /// Create a child context with different accessibility settings
    pub fn with_accessibility(&self, accessibility: &'a AccessibilitySettings) -> Self {
        RenderContext {
            theme: self.theme,
            accessibility,
        }
    }
}

/// Hook trait for accessing theme from context
pub trait UseTheme {
    /// Get the current theme
    fn use_theme<'a>(&self, ctx: &'a RenderContext) -> &'a Theme {
        ctx.theme
    }
}

/// Hook trait for accessing accessibility settings from context
pub trait UseAccessibility {
    /// Get accessibility settings
    fn use_accessibility<'a>(&self, ctx: &'a RenderContext) -> &'a AccessibilitySettings {
        ctx.accessibility
    }

    /// Check if high contrast mode is enabled
    fn use_high_contrast(&self, ctx: &RenderContext) -> bool {
        ctx.accessibility.high_contrast
    }

    /// Check if animations should be reduced
    fn use_reduced_motion(&self, ctx: &RenderContext) -> bool {
        ctx.accessibility.prefer_reduced_motion
    }
}

/// Auto-implement all hook traits for all components
impl<T> UseTheme for T {}
impl<T> UseAccessibility for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;

    #[test]
    fn test_context_creation() {
        let theme = Theme::new(TerminalCapabilities::full());
        let ctx = RenderContext::new(&theme);

        assert_eq!(ctx.theme as *const _, &theme as *const _);
        assert_eq!(
            ctx.accessibility as *const _,
            &theme.accessibility as *const _
        );
    }

    #[test]
    fn test_hook_traits() {
        let theme = Theme::new(TerminalCapabilities::full());
        let ctx = RenderContext::new(&theme);

        struct TestComponent;

        let component = TestComponent;
        let theme_from_hook = component.use_theme(&ctx);
        assert_eq!(theme_from_hook as *const _, &theme as *const _);
        assert!(!component.use_high_contrast(&ctx) || theme.accessibility.high_contrast);
    }
}
