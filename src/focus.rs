//! Roving focus for two-dimensional composite widgets
//!
//! A composite widget (the channel guide grid) keeps exactly one of its
//! cells reachable by sequential Tab navigation at a time; arrow keys move
//! that designation internally. The [`FocusCoordinator`] owns that state:
//! the current coordinate, the remembered last coordinate for Tab-out/
//! Tab-in restoration, and a [`FocusArena`] of opaque slot handles that
//! stand in for the focusable elements themselves.
//!
//! Moving focus is a two-step affair: the coordinate commits synchronously
//! inside the event handler, and the request to put real input focus on the
//! matching slot resolves after the next render pass, once the slot has
//! been placed. The deferral is idempotent - if the coordinate changes
//! again before it resolves, it targets the latest commit, never a stale
//! one - and a slot unmounted in the meantime is skipped silently.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::layout::Rect;

/// Grid coordinate
///
/// `row` indexes data rows (the header row is not focusable and has no
/// coordinate). `col = 0` is the row-header column; `col >= 1` are program
/// columns, with `col = 1` meaning "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

/// Opaque handle to a slot registered in a [`FocusArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    /// A grid cell at a coordinate
    Cell(Coord),
    /// A coordinate-free focusable (sentinel, external opener button)
    Free,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    kind: SlotKind,
    /// Layout rect from the last render pass; used for pointer hit-testing
    rect: Option<Rect>,
    attached: bool,
}

/// Flat mapping from coordinates to opaque focusable handles
///
/// Components register slots at mount and place them during render; an
/// unmounted slot stays allocated but detached, so stale handles held
/// elsewhere (an opener reference, a pending focus request) resolve to
/// "detached" instead of dangling.
#[derive(Debug, Default)]
pub struct FocusArena {
    slots: Vec<Slot>,
    by_coord: HashMap<Coord, FocusHandle>,
}

impl FocusArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the cell at `coord`, reattaching it if already known
    pub fn register_cell(&mut self, coord: Coord) -> FocusHandle {
        if let Some(&handle) = self.by_coord.get(&coord) {
            self.slots[handle.0].attached = true;
            return handle;
        }

        let handle = FocusHandle(self.slots.len());
        self.slots.push(Slot {
            kind: SlotKind::Cell(coord),
            rect: None,
            attached: true,
        });
        self.by_coord.insert(coord, handle);
        handle
    }

    /// Register a coordinate-free focusable
    pub fn register_free(&mut self) -> FocusHandle {
        let handle = FocusHandle(self.slots.len());
        self.slots.push(Slot {
            kind: SlotKind::Free,
            rect: None,
            attached: true,
        });
        handle
    }

    /// Record the slot's layout rect from the current render pass
    pub fn place(&mut self, handle: FocusHandle, rect: Rect) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.rect = Some(rect);
        }
    }

    /// Mark a slot unmounted; its handle stays valid but detached
    pub fn detach(&mut self, handle: FocusHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.attached = false;
            slot.rect = None;
        }
    }

    /// Detach every slot (widget unmount)
    pub fn detach_all(&mut self) {
        for slot in &mut self.slots {
            slot.attached = false;
            slot.rect = None;
        }
    }

    /// Whether the slot behind `handle` is still mounted
    pub fn is_attached(&self, handle: FocusHandle) -> bool {
        self.slots.get(handle.0).is_some_and(|s| s.attached)
    }

    /// The coordinate of a cell slot (`None` for free slots)
    pub fn coord_of(&self, handle: FocusHandle) -> Option<Coord> {
        match self.slots.get(handle.0)?.kind {
            SlotKind::Cell(coord) => Some(coord),
            SlotKind::Free => None,
        }
    }

    /// Handle of the cell registered at `coord`, if any
    pub fn handle_at(&self, coord: Coord) -> Option<FocusHandle> {
        self.by_coord.get(&coord).copied()
    }

    /// Find the attached slot whose placed rect contains the point
    pub fn hit_test(&self, x: u16, y: u16) -> Option<FocusHandle> {
        self.slots.iter().enumerate().find_map(|(i, slot)| {
            if slot.attached && slot.rect.is_some_and(|r| r.contains(x, y)) {
                Some(FocusHandle(i))
            } else {
                None
            }
        })
    }
}

/// Roving-focus state machine for a rectangular grid of cells
#[derive(Debug)]
pub struct FocusCoordinator {
    /// Focusable data rows (the header row is excluded)
    rows: usize,
    /// Total columns including the row-header column
    cols: usize,
    current: Coord,
    last: Coord,
    /// Deferred focus request, resolved after the next render pass
    pending: Option<Coord>,
    arena: FocusArena,
}

impl FocusCoordinator {
    /// Create a coordinator for a `rows` x `cols` grid, focused at `initial`
    ///
    /// Degenerate dimensions clamp to a single cell rather than underflow.
    pub fn new(rows: usize, cols: usize, initial: Coord) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let initial = Coord::new(initial.row.min(rows - 1), initial.col.min(cols - 1));
        FocusCoordinator {
            rows,
            cols,
            current: initial,
            last: initial,
            pending: None,
            arena: FocusArena::new(),
        }
    }

    pub fn arena(&self) -> &FocusArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut FocusArena {
        &mut self.arena
    }

    /// The coordinate that currently holds the roving tab stop
    pub fn current(&self) -> Coord {
        self.current
    }

    /// The coordinate remembered for Tab-out/Tab-in restoration
    pub fn last(&self) -> Coord {
        self.last
    }

    /// Move focus by a row/column delta, clamped to bounds (no wrap-around)
    ///
    /// Returns the resulting coordinate. A move that lands on the current
    /// coordinate is a no-op: nothing commits and no focus request queues.
    pub fn move_by(&mut self, delta_row: isize, delta_col: isize) -> Coord {
        let next = Coord::new(
            clamp_add(self.current.row, delta_row, self.rows - 1),
            clamp_add(self.current.col, delta_col, self.cols - 1),
        );

        if next != self.current {
            self.commit(next);
        }
        self.current
    }

    /// Jump to the first column of the current row
    pub fn home(&mut self) -> Coord {
        let next = Coord::new(self.current.row, 0);
        if next != self.current {
            self.commit(next);
        }
        self.current
    }

    /// Jump to the last column of the current row
    pub fn end(&mut self) -> Coord {
        let next = Coord::new(self.current.row, self.cols - 1);
        if next != self.current {
            self.commit(next);
        }
        self.current
    }

    /// Re-apply the remembered coordinate when focus re-enters the grid
    /// from outside, instead of defaulting to (0, 0)
    pub fn restore_on_reentry(&mut self) -> Coord {
        let last = self.last;
        debug!(row = last.row, col = last.col, "focus re-enters grid");
        self.commit(last);
        self.current
    }

    /// Sync to a focus change that did not go through `move_by` (pointer
    /// press, programmatic focus); keeps the coordinator authoritative
    pub fn on_cell_focused(&mut self, coord: Coord) {
        let coord = Coord::new(coord.row.min(self.rows - 1), coord.col.min(self.cols - 1));
        self.current = coord;
        self.last = coord;
        // Real focus is already on the cell; a queued request is stale
        self.pending = None;
    }

    /// Roving tab-stop check: true for exactly one coordinate
    pub fn is_tab_stop(&self, coord: Coord) -> bool {
        coord == self.current
    }

    /// Whether a deferred focus request is waiting on the next render pass
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolve the deferred focus request after a render pass
    ///
    /// Returns the handle real input focus should move to, or `None` when
    /// nothing is pending or the target slot was unmounted meanwhile (the
    /// skip is silent by design).
    pub fn take_pending_target(&mut self) -> Option<FocusHandle> {
        let coord = self.pending.take()?;
        match self.arena.handle_at(coord) {
            Some(handle) if self.arena.is_attached(handle) => Some(handle),
            _ => {
                trace!(
                    row = coord.row,
                    col = coord.col,
                    "deferred focus target detached, skipping"
                );
                None
            }
        }
    }

    fn commit(&mut self, next: Coord) {
        trace!(
            from_row = self.current.row,
            from_col = self.current.col,
            to_row = next.row,
            to_col = next.col,
            "focus commit"
        );
        self.current = next;
        self.last = next;
        // Latest commit wins; any earlier pending request is superseded
        self.pending = Some(next);
    }
}

fn clamp_add(base: usize, delta: isize, max: usize) -> usize {
    let value = base as isize + delta;
    value.clamp(0, max as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> FocusCoordinator {
        // 5 channels x (1 header column + 5 program columns)
        FocusCoordinator::new(5, 6, Coord::new(1, 1))
    }

    #[test]
    fn test_move_clamps_no_wrap() {
        let mut focus = coordinator();

        focus.move_by(-5, 0);
        assert_eq!(focus.current(), Coord::new(0, 1));

        focus.move_by(0, -5);
        assert_eq!(focus.current(), Coord::new(0, 0));

        // Already at the corner: further moves are no-ops
        focus.move_by(-1, -1);
        assert_eq!(focus.current(), Coord::new(0, 0));

        focus.move_by(100, 100);
        assert_eq!(focus.current(), Coord::new(4, 5));
    }

    #[test]
    fn test_home_end() {
        let mut focus = coordinator();
        focus.move_by(1, 2);
        let row = focus.current().row;

        focus.home();
        assert_eq!(focus.current(), Coord::new(row, 0));

        focus.end();
        assert_eq!(focus.current(), Coord::new(row, 5));
    }

    #[test]
    fn test_roving_invariant() {
        let mut focus = coordinator();
        focus.move_by(2, 1);

        let mut stops = 0;
        for row in 0..5 {
            for col in 0..6 {
                if focus.is_tab_stop(Coord::new(row, col)) {
                    stops += 1;
                }
            }
        }
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_restore_on_reentry() {
        let mut focus = coordinator();
        focus.move_by(2, 3);
        let before_leaving = focus.current();

        // Tabbing away does not change the remembered coordinate
        focus.restore_on_reentry();
        assert_eq!(focus.current(), before_leaving);
        assert_ne!(focus.current(), Coord::new(0, 0));
    }

    #[test]
    fn test_pending_targets_latest_commit() {
        let mut focus = coordinator();
        for row in 0..5 {
            for col in 0..6 {
                focus.arena_mut().register_cell(Coord::new(row, col));
            }
        }

        focus.move_by(1, 0);
        focus.move_by(1, 0); // second commit before the first resolved

        let handle = focus.take_pending_target().expect("attached target");
        assert_eq!(focus.arena().coord_of(handle), Some(Coord::new(3, 1)));
        // Consumed: nothing further pending
        assert!(focus.take_pending_target().is_none());
    }

    #[test]
    fn test_pending_skips_detached_target() {
        let mut focus = coordinator();
        let handle = focus.arena_mut().register_cell(Coord::new(2, 1));

        focus.move_by(1, 0); // commit (2, 1)
        focus.arena_mut().detach(handle);

        assert!(focus.take_pending_target().is_none());
    }

    #[test]
    fn test_pointer_focus_clears_pending() {
        let mut focus = coordinator();
        focus.arena_mut().register_cell(Coord::new(2, 1));

        focus.move_by(1, 0);
        focus.on_cell_focused(Coord::new(4, 2));

        assert_eq!(focus.current(), Coord::new(4, 2));
        assert_eq!(focus.last(), Coord::new(4, 2));
        assert!(!focus.has_pending());
    }

    #[test]
    fn test_arena_hit_test() {
        let mut arena = FocusArena::new();
        let a = arena.register_cell(Coord::new(0, 0));
        let b = arena.register_cell(Coord::new(0, 1));
        arena.place(a, Rect::new(0, 0, 10, 2));
        arena.place(b, Rect::new(10, 0, 10, 2));

        assert_eq!(arena.hit_test(12, 1), Some(b));
        assert_eq!(arena.hit_test(50, 10), None);

        arena.detach(b);
        assert_eq!(arena.hit_test(12, 1), None);
    }
}
