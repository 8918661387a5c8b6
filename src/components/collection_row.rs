//! Paged collection row - horizontal browsing with keyboard-safe focus
//!
//! Paging moves focus with the content: forward paging lands focus on the
//! first newly visible item, backward paging on the last, resolved through
//! the same deferred-focus contract the grid uses (the request is applied
//! after the next render pass).

use crate::a11y::{AccessibleNode, Role};
use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// One browsable item
#[derive(Debug, Clone)]
pub struct CollectionItem {
    pub id: String,
    pub title: String,
    pub meta: String,
}

impl CollectionItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, meta: impl Into<String>) -> Self {
        CollectionItem {
            id: id.into(),
            title: title.into(),
            meta: meta.into(),
        }
    }
}

/// Paged horizontal collection
pub struct CollectionRow {
    heading: String,
    items: Vec<CollectionItem>,
    page_size: usize,
    start_index: usize,
    /// Focused index among the visible items
    focused_local: Option<usize>,
    /// Deferred focus request, applied after the next render pass
    pending_focus: Option<usize>,
}

impl CollectionRow {
    pub fn new(heading: impl Into<String>, items: Vec<CollectionItem>, page_size: usize) -> Self {
        debug_assert!(page_size > 0);
        CollectionRow {
            heading: heading.into(),
            items,
            page_size,
            start_index: 0,
            focused_local: None,
            pending_focus: None,
        }
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn visible(&self) -> &[CollectionItem] {
        let end = (self.start_index + self.page_size).min(self.items.len());
        &self.items[self.start_index..end]
    }

    pub fn can_go_prev(&self) -> bool {
        self.start_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.start_index + self.page_size < self.items.len()
    }

    pub fn focused_local(&self) -> Option<usize> {
        self.focused_local
    }

    pub fn focus_local(&mut self, local: usize) {
        if local < self.visible().len() {
            self.focused_local = Some(local);
        }
    }

    /// Page forward; focus lands on the first visible item afterwards
    pub fn go_next(&mut self) {
        let last_start = self.items.len().saturating_sub(self.page_size);
        let next = (self.start_index + self.page_size).min(last_start);
        if next == self.start_index {
            return;
        }
        self.start_index = next;
        self.pending_focus = Some(0);
    }

    /// Page backward; focus lands on the last visible item afterwards
    pub fn go_prev(&mut self) {
        let prev = self.start_index.saturating_sub(self.page_size);
        if prev == self.start_index {
            return;
        }
        self.start_index = prev;
        self.pending_focus = Some(self.visible().len().saturating_sub(1));
    }

    /// Resolve the deferred focus request after a render pass
    pub fn apply_pending_focus(&mut self) {
        if let Some(local) = self.pending_focus.take() {
            let count = self.visible().len();
            if count > 0 {
                self.focused_local = Some(local.min(count - 1));
            }
        }
    }

    /// Accessible name for a visible item: self-contained, position in the
    /// description
    fn item_node(&self, local: usize, item: &CollectionItem) -> AccessibleNode {
        let global = self.start_index + local;
        AccessibleNode::new(Role::Link)
            .with_name(format!("{}, {}", item.title, item.meta))
            .with_description(format!("{} of {}", global + 1, self.items.len()))
            .with_tab_stop(self.focused_local == Some(local))
    }
}

impl EventHandler for CollectionRow {
    fn handle_event(&mut self, event: &Event) -> bool {
        let Some(local) = self.focused_local else {
            return false;
        };

        match event {
            Event::Key(Key::Left) => {
                if local > 0 {
                    self.focused_local = Some(local - 1);
                } else if self.can_go_prev() {
                    self.go_prev();
                } else {
                    return false;
                }
                true
            }
            Event::Key(Key::Right) => {
                if local + 1 < self.visible().len() {
                    self.focused_local = Some(local + 1);
                } else if self.can_go_next() {
                    self.go_next();
                } else {
                    return false;
                }
                true
            }
            _ => false,
        }
    }
}

impl Component for CollectionRow {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled(&self.heading, &ctx.theme.heading_style())?;

        let visible_count = self.visible().len().max(1) as u16;
        let item_width = bounds.width / visible_count;
        let y = bounds.y + 2;

        let focused = self.focused_local;
        let start = self.start_index;
        for (local, item) in self.visible().iter().enumerate() {
            let x = bounds.x + item_width * local as u16;
            let is_focused = focused == Some(local);
            let style = ctx.theme.cell_style(is_focused, false, false);

            renderer.move_cursor(x, y)?;
            let title: String = item.title.chars().take(item_width as usize).collect();
            renderer.write_styled(&title, &style)?;

            if bounds.height > 3 {
                renderer.move_cursor(x, y + 1)?;
                let meta: String = item.meta.chars().take(item_width as usize).collect();
                renderer.write_styled(&meta, &ctx.theme.label_style())?;
            }
        }

        if bounds.height > 5 {
            renderer.move_cursor(bounds.x, y + 3)?;
            let prev = if self.can_go_prev() { "[ ‹ Prev ]" } else { "          " };
            let next = if self.can_go_next() { "[ Next › ]" } else { "" };
            let total_pages = self.items.len().div_ceil(self.page_size);
            let page = start / self.page_size + 1;
            let line = format!("{}  page {}/{}  {}", prev, page, total_pages, next);
            renderer.write_styled(&line, &ctx.theme.label_style())?;
        }

        // Render pass done: the page's layout exists, focus may land
        self.apply_pending_focus();

        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (40, 6)
    }

    fn accessibility(&self) -> Option<AccessibleNode> {
        let mut group = AccessibleNode::new(Role::Group).with_name(self.heading.clone());

        if self.can_go_prev() {
            group = group.with_child(
                AccessibleNode::new(Role::Button { pressed: None }).with_name("Previous items"),
            );
        }

        let items = self
            .visible()
            .iter()
            .enumerate()
            .map(|(local, item)| {
                AccessibleNode::new(Role::ListItem).with_child(self.item_node(local, item))
            })
            .collect::<Vec<_>>();
        group = group.with_child(AccessibleNode::new(Role::List).with_children(items));

        if self.can_go_next() {
            group = group.with_child(
                AccessibleNode::new(Role::Button { pressed: None }).with_name("Next items"),
            );
        }

        Some(group)
    }

    fn name(&self) -> &str {
        "CollectionRow"
    }
}

/// The catalogue's stock items
pub fn demo_items() -> Vec<CollectionItem> {
    [
        ("wb-1", "Superflo Water Bottle", "$24.95"),
        ("wb-2", "HydraSip Insulated Flask", "$29.00"),
        ("wb-3", "AquaGnome Travel Mug", "$18.50"),
        ("wb-4", "Nimbus Steel Tumbler", "$22.00"),
        ("wb-5", "GlacierFlip Lid Bottle", "$27.99"),
        ("wb-6", "Sprout & Sip Kids Bottle", "$16.95"),
        ("wb-7", "Orbit Wide-Mouth Bottle", "$25.50"),
        ("wb-8", "TrailMate Bottle Sling Set", "$34.00"),
        ("wb-9", "ColdBrew Bottle Kit", "$31.25"),
        ("wb-10", "PeakFlow Filter Bottle", "$39.95"),
        ("wb-11", "Minimalist Glass Bottle", "$19.95"),
        ("wb-12", "Commuter Grip Bottle", "$21.00"),
        ("wb-13", "Summit Straw Bottle", "$26.40"),
        ("wb-14", "Metro Leakproof Flask", "$28.10"),
        ("wb-15", "RidgeRunner Sport Bottle", "$23.75"),
        ("wb-16", "EcoPress Glass Tumbler", "$20.50"),
        ("wb-17", "ArcticLock Thermal Bottle", "$33.20"),
        ("wb-18", "Voyager Daily Hydration Kit", "$36.00"),
    ]
    .into_iter()
    .map(|(id, title, meta)| CollectionItem::new(id, title, meta))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CollectionRow {
        CollectionRow::new("Customers Also Viewed", demo_items(), 6)
    }

    #[test]
    fn test_paging_clamps_to_bounds() {
        let mut row = row();
        row.go_next();
        assert_eq!(row.start_index(), 6);
        row.go_next();
        assert_eq!(row.start_index(), 12);
        row.go_next();
        assert_eq!(row.start_index(), 12); // already at the last page

        row.go_prev();
        row.go_prev();
        row.go_prev();
        assert_eq!(row.start_index(), 0);
    }

    #[test]
    fn test_focus_moves_with_forward_paging() {
        let mut row = row();
        row.focus_local(5);

        row.go_next();
        assert_eq!(row.focused_local(), Some(5)); // not yet: render pending

        row.apply_pending_focus();
        assert_eq!(row.focused_local(), Some(0));
    }

    #[test]
    fn test_focus_moves_with_backward_paging() {
        let mut row = row();
        row.go_next();
        row.apply_pending_focus();

        row.go_prev();
        row.apply_pending_focus();
        assert_eq!(row.focused_local(), Some(5));
        assert_eq!(row.start_index(), 0);
    }

    #[test]
    fn test_arrow_past_edge_pages() {
        let mut row = row();
        row.focus_local(5);

        assert!(row.handle_event(&Event::Key(Key::Right)));
        row.apply_pending_focus();
        assert_eq!(row.start_index(), 6);
        assert_eq!(row.focused_local(), Some(0));
    }

    #[test]
    fn test_edge_controls_only_when_pages_exist() {
        let row_at_start = row();
        let tree = row_at_start.accessibility().unwrap();
        assert!(tree.find(|n| n.name.as_deref() == Some("Previous items")).is_none());
        assert!(tree.find(|n| n.name.as_deref() == Some("Next items")).is_some());
    }

    #[test]
    fn test_item_descriptions_carry_position() {
        let mut row = row();
        row.go_next();
        row.apply_pending_focus();

        let tree = row.accessibility().unwrap();
        let first_visible = tree
            .find(|n| n.role == Role::Link && n.tab_stop)
            .expect("focused item");
        assert_eq!(first_visible.description.as_deref(), Some("7 of 18"));
    }
}
