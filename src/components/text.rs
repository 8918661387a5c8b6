//! Text component for displaying styled one-line text

use crate::component::Component;
use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Text alignment within the component bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Text component
pub struct Text {
    content: String,
    style: String,
    align: TextAlign,
}

impl Text {
    /// Create new text component
    pub fn new(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            style: String::new(),
            align: TextAlign::Start,
        }
    }

    /// Set text style (ANSI codes)
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set text alignment
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Update text content
    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Get text content
    pub fn text(&self) -> &str {
        &self.content
    }

    fn aligned_x(&self, bounds: Rect, text_len: u16) -> u16 {
        match self.align {
            TextAlign::Start => bounds.x,
            TextAlign::Center => {
                let offset = (bounds.width.saturating_sub(text_len)) / 2;
                bounds.x.saturating_add(offset)
            }
            TextAlign::End => {
                let offset = bounds.width.saturating_sub(text_len);
                bounds.x.saturating_add(offset)
            }
        }
    }
}

impl EventHandler for Text {}

impl Component for Text {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, _ctx: &RenderContext) -> Result<()> {
        if self.content.is_empty() || bounds.width == 0 {
            return Ok(());
        }

        let display: String = self
            .content
            .chars()
            .take(bounds.width as usize)
            .collect();
        let x = self.aligned_x(bounds, display.chars().count() as u16);

        renderer.move_cursor(x, bounds.y)?;
        if self.style.is_empty() {
            renderer.write_text(&display)?;
        } else {
            renderer.write_styled(&display, &self.style)?;
        }

        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.content.chars().count() as u16, 1)
    }

    fn name(&self) -> &str {
        "Text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    #[test]
    fn test_alignment_offsets() {
        let text = Text::new("hi").with_align(TextAlign::Center);
        let bounds = Rect::new(0, 0, 10, 1);
        assert_eq!(text.aligned_x(bounds, 2), 4);

        let end = Text::new("hi").with_align(TextAlign::End);
        assert_eq!(end.aligned_x(bounds, 2), 8);
    }

    #[test]
    fn test_truncates_to_bounds() {
        let mut text = Text::new("a very long line of text");
        let mut renderer = Renderer::headless();
        let theme = Theme::new(TerminalCapabilities::full());
        let ctx = RenderContext::new(&theme);

        text.render(&mut renderer, Rect::new(0, 0, 6, 1), &ctx)
            .unwrap();

        let out = String::from_utf8_lossy(renderer.headless_output().unwrap()).to_string();
        assert!(out.contains("a very"));
        assert!(!out.contains("long"));
    }
}
