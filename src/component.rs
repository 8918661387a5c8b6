//! Component system - trait and lifecycle for UI elements

use crate::a11y::AccessibleNode;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Core component trait for all pattern elements
///
/// Components use a hybrid approach:
/// - Retained: component state (focus, selection, open dialogs)
/// - Immediate: rendering happens fresh each frame via render()
pub trait Component: EventHandler {
    /// Render the component to the given rectangle
    ///
    /// Called every frame. Components issue immediate-mode drawing commands
    /// to the renderer within their bounds. The context provides theme and
    /// accessibility settings.
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()>;

    /// Calculate minimum size needed for this component (optional)
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Called when component is first mounted
    fn on_mount(&mut self) {}

    /// Called before component is unmounted
    ///
    /// Components holding scoped resources (timers, inert guards) release
    /// them here; the release must also happen on drop.
    fn on_unmount(&mut self) {}

    /// The component's accessible subtree for its current state
    ///
    /// Returns `None` for purely decorative components.
    fn accessibility(&self) -> Option<AccessibleNode> {
        None
    }

    /// Get component name for debugging
    fn name(&self) -> &str {
        "Component"
    }
}

/// Helper to propagate events to children
pub fn propagate_event(children: &mut [Box<dyn Component>], event: &Event) -> bool {
    for child in children.iter_mut() {
        if child.handle_event(event) {
            return true; // Event consumed
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a11y::Role;
    use crate::event::Key;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    struct TestComponent;

    impl EventHandler for TestComponent {
        fn handle_event(&mut self, event: &Event) -> bool {
            matches!(event, Event::Key(Key::Enter))
        }
    }

    impl Component for TestComponent {
        fn render(
            &mut self,
            _renderer: &mut Renderer,
            _bounds: Rect,
            _ctx: &RenderContext,
        ) -> Result<()> {
            Ok(())
        }

        fn accessibility(&self) -> Option<AccessibleNode> {
            Some(AccessibleNode::new(Role::Button { pressed: None }).with_name("Test"))
        }

        fn name(&self) -> &str {
            "TestComponent"
        }
    }

    #[test]
    fn test_render_and_accessibility() {
        let mut comp = TestComponent;

        let mut renderer = Renderer::headless();
        let theme = Theme::new(TerminalCapabilities::full());
        let ctx = RenderContext::new(&theme);
        comp.render(&mut renderer, Rect::new(0, 0, 10, 10), &ctx)
            .unwrap();

        let node = comp.accessibility().unwrap();
        assert_eq!(node.name.as_deref(), Some("Test"));
    }

    #[test]
    fn test_propagate_event_stops_on_consume() {
        let mut children: Vec<Box<dyn Component>> =
            vec![Box::new(TestComponent), Box::new(TestComponent)];

        let consumed = propagate_event(&mut children, &Event::Key(Key::Enter));
        assert!(consumed);
    }
}
