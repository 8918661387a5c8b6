//! Link patterns - meaningful, self-contained link text

use crate::a11y::{AccessibleNode, Role};
use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Where a link leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Another page inside the catalogue
    Internal(String),
    /// External destination; the link text should carry a new-window hint
    External(String),
    /// In-page fragment (skip-style navigation)
    Fragment(String),
}

/// A single link entry
#[derive(Debug, Clone)]
pub struct LinkItem {
    /// Link text, meaningful out of context
    pub text: String,
    pub target: LinkTarget,
}

impl LinkItem {
    pub fn new(text: impl Into<String>, target: LinkTarget) -> Self {
        LinkItem {
            text: text.into(),
            target,
        }
    }
}

/// The link-pattern list: a handful of links whose text makes sense out of
/// context and indicates what happens next
pub struct LinkList {
    items: Vec<LinkItem>,
    focused_index: Option<usize>,
    followed: Option<LinkTarget>,
}

impl LinkList {
    pub fn new(items: Vec<LinkItem>) -> Self {
        LinkList {
            items,
            focused_index: None,
            followed: None,
        }
    }

    pub fn items(&self) -> &[LinkItem] {
        &self.items
    }

    pub fn focus_index(&mut self, index: usize) {
        if index < self.items.len() {
            self.focused_index = Some(index);
        }
    }

    /// The target followed since the last call; clears the record
    pub fn take_followed(&mut self) -> Option<LinkTarget> {
        self.followed.take()
    }
}

impl EventHandler for LinkList {
    fn handle_event(&mut self, event: &Event) -> bool {
        let Some(index) = self.focused_index else {
            return false;
        };

        match event {
            Event::Key(Key::Up) if index > 0 => {
                self.focused_index = Some(index - 1);
                true
            }
            Event::Key(Key::Down) if index + 1 < self.items.len() => {
                self.focused_index = Some(index + 1);
                true
            }
            Event::Key(Key::Enter) => {
                self.followed = Some(self.items[index].target.clone());
                true
            }
            _ => false,
        }
    }
}

impl Component for LinkList {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        for (i, item) in self.items.iter().enumerate() {
            if i as u16 >= bounds.height {
                break;
            }
            let focused = self.focused_index == Some(i);
            let style = if focused {
                ctx.theme.cell_style(true, false, false)
            } else {
                ctx.theme.link_style()
            };

            renderer.move_cursor(bounds.x, bounds.y + i as u16)?;
            renderer.write_styled(&item.text, &style)?;
        }
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let width = self
            .items
            .iter()
            .map(|i| i.text.chars().count())
            .max()
            .unwrap_or(0) as u16;
        (width, self.items.len() as u16)
    }

    fn accessibility(&self) -> Option<AccessibleNode> {
        let children = self.items.iter().enumerate().map(|(i, item)| {
            AccessibleNode::new(Role::ListItem).with_child(
                AccessibleNode::new(Role::Link)
                    .with_name(item.text.clone())
                    .with_tab_stop(self.focused_index == Some(i)),
            )
        });

        Some(
            AccessibleNode::new(Role::List)
                .with_name("Link patterns")
                .with_children(children),
        )
    }

    fn name(&self) -> &str {
        "LinkList"
    }
}

/// The catalogue's stock link-pattern page
pub fn demo_links() -> Vec<LinkItem> {
    vec![
        LinkItem::new(
            "Return to the pattern hub home page",
            LinkTarget::Internal("hub".into()),
        ),
        LinkItem::new(
            "Open WAI-ARIA Authoring Practices (new tab)",
            LinkTarget::External("https://www.w3.org/WAI/ARIA/apg/".into()),
        ),
        LinkItem::new(
            "Jump to current section details",
            LinkTarget::Fragment("current-section".into()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_focused_link() {
        let mut list = LinkList::new(demo_links());
        list.focus_index(1);

        assert!(list.handle_event(&Event::Key(Key::Enter)));
        match list.take_followed() {
            Some(LinkTarget::External(url)) => assert!(url.contains("w3.org")),
            other => panic!("expected external target, got {:?}", other),
        }
    }

    #[test]
    fn test_arrow_navigation_clamps() {
        let mut list = LinkList::new(demo_links());
        list.focus_index(0);

        assert!(!list.handle_event(&Event::Key(Key::Up)));
        assert!(list.handle_event(&Event::Key(Key::Down)));
        assert!(list.handle_event(&Event::Key(Key::Down)));
        assert!(!list.handle_event(&Event::Key(Key::Down)));
    }

    #[test]
    fn test_names_are_self_contained() {
        let list = LinkList::new(demo_links());
        let tree = list.accessibility().unwrap();

        let mut link_names = Vec::new();
        tree.walk(&mut |node| {
            if node.role == Role::Link {
                link_names.push(node.name.clone().unwrap_or_default());
            }
        });

        assert_eq!(link_names.len(), 3);
        // Each name stands alone; none is a bare "here" or "link"
        for name in link_names {
            assert!(name.split_whitespace().count() >= 4, "vague name: {name}");
        }
    }
}
