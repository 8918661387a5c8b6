//! Channel guide - a keyboard-navigable grid with a modal details overlay
//!
//! The one genuinely stateful widget in the catalogue. Roving focus moves
//! across the channel/program matrix with the arrow keys; Enter or Space
//! activates the focused cell (tune on the "now" column, details dialogs
//! elsewhere); Tab and Shift-Tab leave the grid onto explicit sentinel
//! focusables, and focus re-entering the grid restores the last-focused
//! coordinate rather than resetting to the corner.

pub mod dispatch;
pub mod model;

pub use dispatch::{Activation, ActivationDispatcher};
pub use model::{CellRef, Channel, GridModel, Program, TimeColumn};

use anyhow::Result;
use tracing::debug;

use crate::a11y::{AccessibleNode, Role};
use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key, MouseEvent};
use crate::focus::{Coord, FocusCoordinator, FocusHandle};
use crate::layout::{grid_columns, Rect};
use crate::overlay::{DialogFocus, DialogPayload, InertRoot, ModalOverlayController, OverlayOutcome};
use crate::render::Renderer;

/// Width of the channel (row-header) column in cells
const CHANNEL_COL_WIDTH: u16 = 22;

/// Terminal rows per data row: program title plus meta/time line
const DATA_ROW_HEIGHT: u16 = 2;

const SENTINEL_BEFORE: &str = "Focusable element before grid";
const SENTINEL_AFTER: &str = "Focusable element after grid";

/// Where composite focus sits within the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuidePart {
    Before,
    Grid,
    After,
}

/// The channel-guide widget
///
/// Accepts a display label and otherwise owns all interaction state:
/// focus, selection, and the dialog lifecycle.
pub struct ChannelGuide {
    label: String,
    model: GridModel,
    /// The channel currently "playing"; independent from focus
    selected_row: usize,
    focus: FocusCoordinator,
    part: GuidePart,
    background: InertRoot,
    overlay: ModalOverlayController,
    sentinel_before: FocusHandle,
    sentinel_after: FocusHandle,
}

impl ChannelGuide {
    /// Build the guide over the stock demo lineup
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_model(label, model::demo_grid())
    }

    /// Build the guide over an explicit model
    pub fn with_model(label: impl Into<String>, model: GridModel) -> Self {
        let selected_row = 1.min(model.focusable_rows().saturating_sub(1));
        let mut focus = FocusCoordinator::new(
            model.focusable_rows(),
            model.focusable_cols(),
            Coord::new(selected_row, 1),
        );

        // Every cell registers its focusable slot at mount
        for row in 0..model.focusable_rows() {
            for col in 0..model.focusable_cols() {
                focus.arena_mut().register_cell(Coord::new(row, col));
            }
        }
        let sentinel_before = focus.arena_mut().register_free();
        let sentinel_after = focus.arena_mut().register_free();

        let background = InertRoot::new();
        let overlay = ModalOverlayController::new(background.clone());

        ChannelGuide {
            label: label.into(),
            model,
            selected_row,
            focus,
            part: GuidePart::Grid,
            background,
            overlay,
            sentinel_before,
            sentinel_after,
        }
    }

    /// The coordinate holding the roving tab stop
    pub fn focused_cell(&self) -> Coord {
        self.focus.current()
    }

    /// The tuned channel row
    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// The open dialog's payload, if any
    pub fn dialog(&self) -> Option<&DialogPayload> {
        self.overlay.payload()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Whether the background subtree is suppressed by an open dialog
    pub fn is_background_inert(&self) -> bool {
        self.background.is_inert()
    }

    /// Whether composite focus is inside the grid (not on a sentinel)
    pub fn grid_has_focus(&self) -> bool {
        self.part == GuidePart::Grid
    }

    fn activate(&mut self, coord: Coord) {
        // The coordinator clamps every move, so the lookup cannot fail;
        // guarded defensively rather than unwrapped
        let Ok(cell) = self.model.cell_at(coord.row, coord.col) else {
            return;
        };

        match ActivationDispatcher::dispatch(coord, cell) {
            Activation::Tune { row } => {
                // Idempotent when the row is already tuned
                if row != self.selected_row {
                    self.selected_row = row;
                    debug!(row, "tuned channel");
                }
            }
            Activation::ShowChannelDetails(payload) | Activation::ShowProgramDetails(payload) => {
                let opener = self.focus.arena().handle_at(coord);
                self.overlay.open(payload, opener);
            }
        }
    }

    fn restore_after_close(&mut self, opener: Option<FocusHandle>) {
        self.part = GuidePart::Grid;

        let attached = opener.filter(|h| self.focus.arena().is_attached(*h));
        match attached.and_then(|h| self.focus.arena().coord_of(h)) {
            // The opener cell is still mounted: focus returns there
            Some(coord) => self.focus.on_cell_focused(coord),
            // Opener gone or detached: fall back to the last-known coordinate
            None => {
                self.focus.restore_on_reentry();
            }
        }
    }

    fn enter_grid(&mut self) {
        self.part = GuidePart::Grid;
        self.focus.restore_on_reentry();
    }

    fn handle_grid_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(Key::Up) => {
                self.focus.move_by(-1, 0);
                true
            }
            Event::Key(Key::Down) => {
                self.focus.move_by(1, 0);
                true
            }
            Event::Key(Key::Left) => {
                self.focus.move_by(0, -1);
                true
            }
            Event::Key(Key::Right) => {
                self.focus.move_by(0, 1);
                true
            }
            Event::Key(Key::Home) => {
                self.focus.home();
                true
            }
            Event::Key(Key::End) => {
                self.focus.end();
                true
            }
            Event::Key(Key::Enter) | Event::Key(Key::Char(' ')) => {
                self.activate(self.focus.current());
                true
            }
            Event::Key(Key::Tab) => {
                self.part = GuidePart::After;
                true
            }
            Event::Key(Key::BackTab) => {
                self.part = GuidePart::Before;
                true
            }
            Event::Mouse(MouseEvent::Press(_, x, y)) => self.handle_press(*x, *y),
            _ => false,
        }
    }

    fn handle_sentinel_event(&mut self, event: &Event, on_before: bool) -> bool {
        match event {
            // Tab past the leading sentinel enters the grid; focus lands on
            // the remembered coordinate, not (0, 0)
            Event::Key(Key::Tab) if on_before => {
                self.enter_grid();
                true
            }
            Event::Key(Key::BackTab) if !on_before => {
                self.enter_grid();
                true
            }
            // Moving further out leaves the widget entirely
            Event::Key(Key::Tab) | Event::Key(Key::BackTab) => false,
            Event::Mouse(MouseEvent::Press(_, x, y)) => self.handle_press(*x, *y),
            _ => false,
        }
    }

    fn handle_press(&mut self, x: u16, y: u16) -> bool {
        let Some(handle) = self.focus.arena().hit_test(x, y) else {
            return false;
        };

        if let Some(coord) = self.focus.arena().coord_of(handle) {
            // Roving state updates before the activation, so the focus
            // outline lands on the pressed cell immediately
            self.part = GuidePart::Grid;
            self.focus.on_cell_focused(coord);
            self.activate(coord);
            return true;
        }

        if handle == self.sentinel_before {
            self.part = GuidePart::Before;
            return true;
        }
        if handle == self.sentinel_after {
            self.part = GuidePart::After;
            return true;
        }
        false
    }

    fn preview_lines(&self) -> (String, String, String) {
        let channel = self.model.channels().get(self.selected_row);
        let program = channel.and_then(|c| c.programs.first());

        let title = program
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "No program selected".to_string());
        let channel_line = channel
            .map(|c| format!("Channel: {}", c.name))
            .unwrap_or_else(|| "Channel unavailable".to_string());
        let meta_line = program
            .map(|p| format!("{} • {}", p.meta, p.time_text))
            .unwrap_or_default();

        (title, channel_line, meta_line)
    }

    fn render_dialog(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let Some(payload) = self.overlay.payload().cloned() else {
            return Ok(());
        };

        let width = 56.min(bounds.width.saturating_sub(4)).max(20);
        let height = 8.min(bounds.height).max(6);
        let rect = bounds.centered(width, height);
        self.overlay.place_dialog(rect);

        let border = ctx.theme.border_style();
        let focused_root = self.overlay.dialog_focus() == DialogFocus::Root;

        renderer.move_cursor(rect.x, rect.y)?;
        renderer.write_styled("┌", &border)?;
        renderer.write_repeated('─', rect.width.saturating_sub(2) as usize)?;
        renderer.write_styled("┐", &border)?;

        for dy in 1..rect.height.saturating_sub(1) {
            renderer.move_cursor(rect.x, rect.y + dy)?;
            renderer.write_styled("│", &border)?;
            renderer.write_repeated(' ', rect.width.saturating_sub(2) as usize)?;
            renderer.write_styled("│", &border)?;
        }

        renderer.move_cursor(rect.x, rect.y + rect.height.saturating_sub(1))?;
        renderer.write_styled("└", &border)?;
        renderer.write_repeated('─', rect.width.saturating_sub(2) as usize)?;
        renderer.write_styled("┘", &border)?;

        let inner = rect.inner(1);
        let title_style = if focused_root {
            ctx.theme.cell_style(true, false, false)
        } else {
            ctx.theme.heading_style()
        };
        renderer.move_cursor(inner.x, inner.y)?;
        let title: String = payload.title.chars().take(inner.width as usize).collect();
        renderer.write_styled(&title, &title_style)?;

        if inner.height > 2 {
            renderer.move_cursor(inner.x, inner.y + 2)?;
            let body: String = payload.body.chars().take(inner.width as usize).collect();
            renderer.write_styled(&body, &ctx.theme.text_style())?;
        }

        if inner.height > 3 {
            let close_focused = self.overlay.dialog_focus() == DialogFocus::CloseControl;
            let style = ctx.theme.cell_style(close_focused, false, false);
            renderer.move_cursor(inner.x, inner.y + inner.height.saturating_sub(1))?;
            renderer.write_styled("[ Close ]", &style)?;
        }

        Ok(())
    }
}

impl EventHandler for ChannelGuide {
    fn handle_event(&mut self, event: &Event) -> bool {
        // While Open the overlay owns the event stream (the background
        // root is inert); Escape, backdrop presses, and the close control
        // all come back as Closed with the opener to restore
        match self.overlay.handle_event(event) {
            OverlayOutcome::Consumed => return true,
            OverlayOutcome::Closed(opener) => {
                self.restore_after_close(opener);
                return true;
            }
            OverlayOutcome::Ignored => {}
        }

        match self.part {
            GuidePart::Grid => self.handle_grid_event(event),
            GuidePart::Before => self.handle_sentinel_event(event, true),
            GuidePart::After => self.handle_sentinel_event(event, false),
        }
    }
}

impl Component for ChannelGuide {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let inert = self.background.is_inert();
        let dim = ctx.theme.inert_style();

        // Preview panel for the tuned channel
        let (title, channel_line, meta_line) = self.preview_lines();
        let heading = if inert { dim.clone() } else { ctx.theme.label_style() };
        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled("LIVE TV (DEMO)", &heading)?;
        renderer.move_cursor(bounds.x, bounds.y + 1)?;
        renderer.write_styled(
            &title,
            &if inert { dim.clone() } else { ctx.theme.heading_style() },
        )?;
        renderer.move_cursor(bounds.x, bounds.y + 2)?;
        renderer.write_styled(
            &format!("{}   {}", channel_line, meta_line),
            &if inert { dim.clone() } else { ctx.theme.text_style() },
        )?;

        // Leading sentinel
        let sentinel_y = bounds.y + 4;
        let before_focused = !inert && self.part == GuidePart::Before;
        renderer.move_cursor(bounds.x, sentinel_y)?;
        renderer.write_styled(
            SENTINEL_BEFORE,
            &if inert {
                dim.clone()
            } else {
                ctx.theme.cell_style(before_focused, false, false)
            },
        )?;
        self.focus.arena_mut().place(
            self.sentinel_before,
            Rect::new(bounds.x, sentinel_y, SENTINEL_BEFORE.len() as u16, 1),
        );

        // Grid: header row then one two-line row per channel
        let grid_y = sentinel_y + 2;
        let columns = grid_columns(
            bounds.width,
            CHANNEL_COL_WIDTH,
            self.model.time_columns().len(),
        );

        let header_style = if inert { dim.clone() } else { ctx.theme.header_style() };
        if let Some((offset, width)) = columns.first() {
            renderer.move_cursor(bounds.x + offset, grid_y)?;
            let text: String = "Channel".chars().take(*width as usize).collect();
            renderer.write_styled(&text, &header_style)?;
        }
        for (i, column) in self.model.time_columns().iter().enumerate() {
            if let Some((offset, width)) = columns.get(i + 1) {
                renderer.move_cursor(bounds.x + offset, grid_y)?;
                let text: String = column.label.chars().take(*width as usize).collect();
                renderer.write_styled(&text, &header_style)?;
            }
        }

        let grid_focused = !inert && self.part == GuidePart::Grid;
        for row in 0..self.model.focusable_rows() {
            let row_y = grid_y + 1 + row as u16 * DATA_ROW_HEIGHT;
            let on_selected_row = row == self.selected_row;

            for col in 0..self.model.focusable_cols() {
                let Some((offset, width)) = columns.get(col).copied() else {
                    continue;
                };
                let coord = Coord::new(row, col);
                let cell_rect = Rect::new(bounds.x + offset, row_y, width, DATA_ROW_HEIGHT);

                if let Some(handle) = self.focus.arena().handle_at(coord) {
                    self.focus.arena_mut().place(handle, cell_rect);
                }

                let focused = grid_focused && self.focus.is_tab_stop(coord);
                let style = if inert {
                    dim.clone()
                } else {
                    ctx.theme
                        .cell_style(focused, on_selected_row, col == 1)
                };

                match self.model.cell_at(row, col) {
                    Ok(CellRef::ChannelHeader(channel)) => {
                        renderer.move_cursor(cell_rect.x, cell_rect.y)?;
                        let text: String =
                            channel.name.chars().take(width as usize).collect();
                        renderer.write_styled(&text, &style)?;
                    }
                    Ok(CellRef::Program { program, .. }) => {
                        renderer.move_cursor(cell_rect.x, cell_rect.y)?;
                        let text: String =
                            program.title.chars().take(width as usize).collect();
                        renderer.write_styled(&text, &style)?;

                        renderer.move_cursor(cell_rect.x, cell_rect.y + 1)?;
                        let detail = format!("{} {}", program.meta, program.time_text);
                        let detail: String = detail.chars().take(width as usize).collect();
                        renderer.write_styled(
                            &detail,
                            &if inert { dim.clone() } else { ctx.theme.label_style() },
                        )?;
                    }
                    Err(_) => {}
                }
            }
        }

        // Trailing sentinel
        let after_y = grid_y + 1 + self.model.focusable_rows() as u16 * DATA_ROW_HEIGHT + 1;
        let after_focused = !inert && self.part == GuidePart::After;
        renderer.move_cursor(bounds.x, after_y)?;
        renderer.write_styled(
            SENTINEL_AFTER,
            &if inert {
                dim
            } else {
                ctx.theme.cell_style(after_focused, false, false)
            },
        )?;
        self.focus.arena_mut().place(
            self.sentinel_after,
            Rect::new(bounds.x, after_y, SENTINEL_AFTER.len() as u16, 1),
        );

        // The dialog draws above the (dimmed) background
        self.render_dialog(renderer, bounds, ctx)?;

        // Layout exists now; resolve the deferred focus request. The
        // coordinator already holds the coordinate, so the handle needs no
        // further action here - a detached target was skipped inside.
        let _ = self.focus.take_pending_target();

        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let rows = 4 + 2 + 1 + self.model.focusable_rows() as u16 * DATA_ROW_HEIGHT + 2;
        (CHANNEL_COL_WIDTH * 3, rows)
    }

    fn on_unmount(&mut self) {
        // Tear down the overlay first so its scoped resources release even
        // while Open, then detach every focusable slot
        self.overlay.unmount();
        self.focus.arena_mut().detach_all();
    }

    fn accessibility(&self) -> Option<AccessibleNode> {
        let inert = self.background.is_inert();
        let (title, channel_line, meta_line) = self.preview_lines();

        let mut root = AccessibleNode::new(Role::Group).with_child(
            AccessibleNode::new(Role::Status)
                .with_name(format!("{} — {} {}", title, channel_line, meta_line)),
        );

        root = root.with_child(
            AccessibleNode::new(Role::Button { pressed: None })
                .with_name(SENTINEL_BEFORE)
                .with_tab_stop(!inert),
        );

        let mut grid = AccessibleNode::new(Role::Grid {
            row_count: self.model.row_count(),
            col_count: self.model.col_count(),
        })
        .with_name(self.label.clone());

        let mut header = AccessibleNode::new(Role::Row { selected: false })
            .with_child(AccessibleNode::new(Role::ColumnHeader).with_name("Channel"));
        for column in self.model.time_columns() {
            header = header
                .with_child(AccessibleNode::new(Role::ColumnHeader).with_name(column.label.clone()));
        }
        grid = grid.with_child(header);

        for row in 0..self.model.focusable_rows() {
            let mut row_node = AccessibleNode::new(Role::Row {
                selected: row == self.selected_row,
            });
            for col in 0..self.model.focusable_cols() {
                let role = if col == 0 { Role::RowHeader } else { Role::GridCell };
                let name = self
                    .model
                    .cell_accessible_name(row, col, self.selected_row)
                    .unwrap_or_default();
                row_node = row_node.with_child(
                    AccessibleNode::new(role)
                        .with_name(name)
                        .with_tab_stop(!inert && self.focus.is_tab_stop(Coord::new(row, col))),
                );
            }
            grid = grid.with_child(row_node);
        }
        root = root.with_child(grid);

        root = root.with_child(
            AccessibleNode::new(Role::Button { pressed: None })
                .with_name(SENTINEL_AFTER)
                .with_tab_stop(!inert),
        );

        if let Some(payload) = self.overlay.payload() {
            let mut dialog = AccessibleNode::new(Role::Dialog { modal: true })
                .with_name(payload.title.clone())
                .with_tab_stop(self.overlay.dialog_focus() == DialogFocus::Root)
                .with_child(
                    AccessibleNode::new(Role::Button { pressed: None })
                        .with_name("Close dialog")
                        .with_tab_stop(self.overlay.dialog_focus() == DialogFocus::CloseControl),
                );
            if !payload.body.is_empty() {
                dialog = dialog.with_description(payload.body.clone());
            }
            root = root.with_child(dialog);
        }

        Some(root)
    }

    fn name(&self) -> &str {
        "ChannelGuide"
    }
}
