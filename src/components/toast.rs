//! Toast notifier - polite status with an auto-dismiss deadline
//!
//! The deadline is the catalogue's reference for the scheduled-callback
//! cancellation contract: registered on show, explicitly cancelled when the
//! toast is dismissed or unmounted before it fires.

use std::time::{Duration, Instant};

use crate::a11y::{AccessibleNode, Role};
use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Default lifetime of a shown toast
pub const AUTO_DISMISS: Duration = Duration::from_secs(5);

/// Toast status component
pub struct Toast {
    message: String,
    duration: Duration,
    /// Scheduled auto-dismiss; `None` means nothing pending
    deadline: Option<Instant>,
    focused: bool,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            duration: AUTO_DISMISS,
            deadline: None,
            focused: false,
        }
    }

    /// Override the auto-dismiss duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.deadline.is_some()
    }

    /// Show the toast and schedule auto-dismissal
    pub fn show(&mut self) {
        self.show_at(Instant::now());
    }

    /// Show with an explicit clock, for deterministic tests
    pub fn show_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    /// Dismiss and cancel the scheduled deadline
    pub fn dismiss(&mut self) {
        self.deadline = None;
    }

    /// Advance the clock; returns true if the deadline fired and the
    /// toast auto-dismissed on this tick
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Advance with an explicit clock, for deterministic tests
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl EventHandler for Toast {
    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_visible() || !self.focused {
            return false;
        }
        match event {
            Event::Key(Key::Enter) | Event::Key(Key::Char(' ')) | Event::Key(Key::Esc) => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }
}

impl Component for Toast {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }

        let text = format!(" {} [Dismiss] ", self.message);
        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled(&text, &ctx.theme.status_style())?;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.message.chars().count() as u16 + 12, 1)
    }

    fn on_unmount(&mut self) {
        // Never leave a scheduled dismissal behind the component
        self.deadline = None;
    }

    fn accessibility(&self) -> Option<AccessibleNode> {
        if !self.is_visible() {
            return None;
        }
        Some(
            AccessibleNode::new(Role::Status)
                .with_name(self.message.clone())
                .with_child(
                    AccessibleNode::new(Role::Button { pressed: None })
                        .with_name("Dismiss")
                        .with_tab_stop(self.focused),
                ),
        )
    }

    fn name(&self) -> &str {
        "Toast"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_dismiss_after_deadline() {
        let mut toast = Toast::new("Pattern saved.");
        let start = Instant::now();

        toast.show_at(start);
        assert!(toast.is_visible());

        assert!(!toast.tick_at(start + Duration::from_secs(4)));
        assert!(toast.is_visible());

        assert!(toast.tick_at(start + Duration::from_secs(5)));
        assert!(!toast.is_visible());
    }

    #[test]
    fn test_manual_dismiss_cancels_deadline() {
        let mut toast = Toast::new("Pattern saved.");
        let start = Instant::now();

        toast.show_at(start);
        toast.dismiss();

        // The cancelled deadline must not fire later
        assert!(!toast.tick_at(start + Duration::from_secs(10)));
        assert!(!toast.is_visible());
    }

    #[test]
    fn test_unmount_cancels_deadline() {
        let mut toast = Toast::new("Pattern saved.");
        let start = Instant::now();

        toast.show_at(start);
        toast.on_unmount();

        assert!(!toast.tick_at(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_reshow_reschedules() {
        let mut toast = Toast::new("Pattern saved.").with_duration(Duration::from_secs(2));
        let start = Instant::now();

        toast.show_at(start);
        toast.show_at(start + Duration::from_secs(1));

        // First deadline superseded by the second show
        assert!(!toast.tick_at(start + Duration::from_secs(2)));
        assert!(toast.tick_at(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_dismiss_via_key_when_focused() {
        let mut toast = Toast::new("Pattern saved.");
        toast.show();
        toast.set_focused(true);

        assert!(toast.handle_event(&Event::Key(Key::Enter)));
        assert!(!toast.is_visible());
    }
}
