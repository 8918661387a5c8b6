//! Basic button - text and/or icon slots with accessible-name validation

use crate::a11y::{AccessibleNode, Role};
use crate::component::Component;
use crate::context::RenderContext;
use crate::error::PatternError;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Basic push button
///
/// Visible content is a label, an icon in a leading or trailing slot, or
/// both. Icon-only buttons must carry an explicit accessible label; see
/// [`ButtonBuilder::build`].
#[derive(Debug)]
pub struct Button {
    label: Option<String>,
    accessible_label: Option<String>,
    leading_icon: Option<String>,
    trailing_icon: Option<String>,
    disabled: bool,
    focused: bool,
    activated: bool,
}

impl Button {
    /// Start building a button
    pub fn builder() -> ButtonBuilder {
        ButtonBuilder::default()
    }

    /// The name exposed to assistive tech
    pub fn accessible_name(&self) -> &str {
        match (&self.label, &self.accessible_label) {
            (Some(label), _) => label,
            (None, Some(explicit)) => explicit,
            // Unreachable by construction; build() rejects this shape
            (None, None) => "",
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether an activation fired since the last call; clears the flag
    pub fn take_activated(&mut self) -> bool {
        std::mem::take(&mut self.activated)
    }

    fn visible_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(icon) = &self.leading_icon {
            parts.push(icon);
        }
        if let Some(label) = &self.label {
            parts.push(label);
        }
        if let Some(icon) = &self.trailing_icon {
            parts.push(icon);
        }
        format!("[ {} ]", parts.join(" "))
    }
}

impl EventHandler for Button {
    fn handle_event(&mut self, event: &Event) -> bool {
        if self.disabled || !self.focused {
            return false;
        }
        match event {
            Event::Key(Key::Enter) | Event::Key(Key::Char(' ')) => {
                self.activated = true;
                true
            }
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
    }
}

impl Component for Button {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let text = self.visible_text();
        let style = if self.disabled {
            ctx.theme.inert_style()
        } else {
            ctx.theme.cell_style(self.focused, false, false)
        };

        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled(&text, &style)?;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.visible_text().chars().count() as u16, 1)
    }

    fn accessibility(&self) -> Option<AccessibleNode> {
        Some(
            AccessibleNode::new(Role::Button { pressed: None })
                .with_name(self.accessible_name())
                .with_tab_stop(self.focused && !self.disabled),
        )
    }

    fn name(&self) -> &str {
        "Button"
    }
}

/// Builder for [`Button`]
#[derive(Debug, Default)]
pub struct ButtonBuilder {
    label: Option<String>,
    accessible_label: Option<String>,
    leading_icon: Option<String>,
    trailing_icon: Option<String>,
    disabled: bool,
}

impl ButtonBuilder {
    /// Visible text label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.label = Some(label);
        }
        self
    }

    /// Explicit accessible label for icon-only buttons
    pub fn accessible_label(mut self, label: impl Into<String>) -> Self {
        self.accessible_label = Some(label.into());
        self
    }

    /// Glyph in the leading slot
    pub fn leading_icon(mut self, icon: impl Into<String>) -> Self {
        self.leading_icon = Some(icon.into());
        self
    }

    /// Glyph in the trailing slot
    pub fn trailing_icon(mut self, icon: impl Into<String>) -> Self {
        self.trailing_icon = Some(icon.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Validate and build
    ///
    /// An icon-only button without an accessible label fails here, at
    /// construction time, rather than rendering silently unlabeled.
    pub fn build(self) -> Result<Button, PatternError> {
        let icon_only = self.label.is_none();
        if icon_only && self.accessible_label.as_deref().map_or(true, str::is_empty) {
            return Err(PatternError::MissingAccessibleName);
        }

        Ok(Button {
            label: self.label,
            accessible_label: self.accessible_label,
            leading_icon: self.leading_icon,
            trailing_icon: self.trailing_icon,
            disabled: self.disabled,
            focused: false,
            activated: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_button_builds() {
        let button = Button::builder().label("Save").build().unwrap();
        assert_eq!(button.accessible_name(), "Save");
    }

    #[test]
    fn test_icon_only_requires_accessible_label() {
        let err = Button::builder().leading_icon("⚙").build().unwrap_err();
        assert_eq!(err, PatternError::MissingAccessibleName);

        let ok = Button::builder()
            .leading_icon("⚙")
            .accessible_label("Open settings")
            .build()
            .unwrap();
        assert_eq!(ok.accessible_name(), "Open settings");
    }

    #[test]
    fn test_whitespace_label_counts_as_icon_only() {
        let err = Button::builder()
            .label("   ")
            .leading_icon("↓")
            .build()
            .unwrap_err();
        assert_eq!(err, PatternError::MissingAccessibleName);
    }

    #[test]
    fn test_disabled_button_does_not_activate() {
        let mut button = Button::builder()
            .label("Save")
            .disabled(true)
            .build()
            .unwrap();
        button.set_focused(true);

        assert!(!button.handle_event(&Event::Key(Key::Enter)));
        assert!(!button.take_activated());
    }

    #[test]
    fn test_activation_on_enter_and_space() {
        let mut button = Button::builder().label("Save").build().unwrap();
        button.set_focused(true);

        assert!(button.handle_event(&Event::Key(Key::Enter)));
        assert!(button.take_activated());
        assert!(!button.take_activated()); // cleared

        assert!(button.handle_event(&Event::Key(Key::Char(' '))));
        assert!(button.take_activated());
    }
}
