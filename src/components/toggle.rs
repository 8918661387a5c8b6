//! Toggle button - boolean pressed state with two labeling strategies

use crate::a11y::{AccessibleNode, Role};
use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// How a toggle announces its state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleLabeling {
    /// The accessible name announces the next action ("Mute" / "Unmute");
    /// no pressed flag is exposed - the name change is the state signal
    NextAction { when_off: String, when_on: String },
    /// A static name ("Bold") with the pressed flag exposed
    PressedState { label: String },
}

/// Two-state toggle button
pub struct ToggleButton {
    labeling: ToggleLabeling,
    icon: Option<String>,
    pressed: bool,
    focused: bool,
}

impl ToggleButton {
    /// Next-action labeling: the name is the action a press would take
    pub fn next_action(when_off: impl Into<String>, when_on: impl Into<String>) -> Self {
        ToggleButton {
            labeling: ToggleLabeling::NextAction {
                when_off: when_off.into(),
                when_on: when_on.into(),
            },
            icon: None,
            pressed: false,
            focused: false,
        }
    }

    /// Static label with an exposed pressed flag
    pub fn pressed_state(label: impl Into<String>) -> Self {
        ToggleButton {
            labeling: ToggleLabeling::PressedState {
                label: label.into(),
            },
            icon: None,
            pressed: false,
            focused: false,
        }
    }

    /// Decorative glyph shown next to the label
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Flip the state
    pub fn toggle(&mut self) {
        self.pressed = !self.pressed;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// The name exposed to assistive tech for the current state
    pub fn accessible_name(&self) -> &str {
        match &self.labeling {
            ToggleLabeling::NextAction { when_off, when_on } => {
                if self.pressed {
                    when_on
                } else {
                    when_off
                }
            }
            ToggleLabeling::PressedState { label } => label,
        }
    }

    fn visible_text(&self) -> String {
        let marker = match self.labeling {
            ToggleLabeling::PressedState { .. } if self.pressed => "[x] ",
            ToggleLabeling::PressedState { .. } => "[ ] ",
            ToggleLabeling::NextAction { .. } => "",
        };
        match &self.icon {
            Some(icon) => format!("{}{} {}", marker, icon, self.accessible_name()),
            None => format!("{}{}", marker, self.accessible_name()),
        }
    }
}

impl EventHandler for ToggleButton {
    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }
        match event {
            Event::Key(Key::Enter) | Event::Key(Key::Char(' ')) => {
                self.toggle();
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

impl Component for ToggleButton {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let text = self.visible_text();
        let style = ctx.theme.cell_style(self.focused, false, false);

        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled(&text, &style)?;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.visible_text().chars().count() as u16, 1)
    }

    fn accessibility(&self) -> Option<AccessibleNode> {
        let pressed = match self.labeling {
            // Name change is the signal; exposing both would double-announce
            ToggleLabeling::NextAction { .. } => None,
            ToggleLabeling::PressedState { .. } => Some(self.pressed),
        };
        Some(
            AccessibleNode::new(Role::Button { pressed })
                .with_name(self.accessible_name())
                .with_tab_stop(self.focused),
        )
    }

    fn name(&self) -> &str {
        "ToggleButton"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_action_name_swaps() {
        let mut toggle = ToggleButton::next_action("Mute", "Unmute");
        assert_eq!(toggle.accessible_name(), "Mute");

        toggle.toggle();
        assert_eq!(toggle.accessible_name(), "Unmute");

        let node = toggle.accessibility().unwrap();
        assert_eq!(node.role, Role::Button { pressed: None });
    }

    #[test]
    fn test_pressed_state_keeps_name_exposes_flag() {
        let mut toggle = ToggleButton::pressed_state("Bold");
        assert_eq!(toggle.accessible_name(), "Bold");

        toggle.toggle();
        assert_eq!(toggle.accessible_name(), "Bold");

        let node = toggle.accessibility().unwrap();
        assert_eq!(node.role, Role::Button { pressed: Some(true) });
    }

    #[test]
    fn test_space_toggles_when_focused() {
        let mut toggle = ToggleButton::pressed_state("Bold");
        toggle.set_focused(true);

        assert!(toggle.handle_event(&Event::Key(Key::Char(' '))));
        assert!(toggle.is_pressed());

        toggle.set_focused(false);
        assert!(!toggle.handle_event(&Event::Key(Key::Char(' '))));
        assert!(toggle.is_pressed());
    }
}
