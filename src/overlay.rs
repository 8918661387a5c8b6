//! Modal overlay lifecycle - opener capture, focus entry, background inertness
//!
//! [`ModalOverlayController`] is a two-state machine, Closed and Open, with
//! the dialog payload as the only open-state data. It owns the dialog's
//! focus lifecycle independently of whichever widget asked it to open: the
//! opener is passed explicitly at `open()` time (never read from ambient
//! state), focus enters on the dialog root, and on close the captured
//! opener handle is returned for restoration and cleared.
//!
//! The background-inert marking and the Escape capture are scoped
//! resources: installed exactly on the transition into Open, and released
//! on every path out of Open - `close()`, a replacing `open()` that
//! re-enters, explicit `unmount()`, or dropping the controller while Open.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::event::{Event, Key, MouseEvent};
use crate::focus::FocusHandle;
use crate::layout::Rect;

/// Title/body pair shown by an open dialog
///
/// Created transiently when a cell or button activation requests details;
/// owned exclusively by the controller and destroyed on close. One live
/// payload at a time - a new open replaces the current payload, never
/// stacks a second dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogPayload {
    pub title: String,
    pub body: String,
}

impl DialogPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        DialogPayload {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Shared marker for a background subtree excluded from focus and pointer
/// interaction while a modal is open
///
/// Cloning shares the flag. The subtree renders normally (dimmed, not
/// hidden); event routing consults `is_inert()`.
#[derive(Debug, Clone, Default)]
pub struct InertRoot(Rc<Cell<bool>>);

impl InertRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the subtree is currently suppressed
    pub fn is_inert(&self) -> bool {
        self.0.get()
    }
}

/// Resources held only while the controller is Open; dropping releases all
#[derive(Debug)]
struct OpenScopes {
    inert: InertRoot,
    escape_captured: Rc<Cell<bool>>,
}

impl OpenScopes {
    fn install(background: &InertRoot, escape: &Rc<Cell<bool>>) -> Self {
        background.0.set(true);
        escape.set(true);
        OpenScopes {
            inert: background.clone(),
            escape_captured: escape.clone(),
        }
    }
}

impl Drop for OpenScopes {
    fn drop(&mut self) {
        self.inert.0.set(false);
        self.escape_captured.set(false);
    }
}

/// Which part of the dialog holds input focus
///
/// Focus enters on the dialog root, not on any control inside it; Tab
/// toggles between the root and the explicit close control. There is no
/// focus trap beyond background inertness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Root,
    CloseControl,
}

/// Result of routing an event through the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// Event consumed; the dialog stays open
    Consumed,
    /// A dismissal trigger fired; carries the opener handle for focus
    /// restoration (already cleared from the controller)
    Closed(Option<FocusHandle>),
    /// Not an overlay event (controller Closed, or the event passes through)
    Ignored,
}

/// Dialog open/close state machine
#[derive(Debug)]
pub struct ModalOverlayController {
    background: InertRoot,
    escape_flag: Rc<Cell<bool>>,
    payload: Option<DialogPayload>,
    opener: Option<FocusHandle>,
    dialog_focus: DialogFocus,
    /// Dialog body bounds from the last render; presses outside it while
    /// Open count as backdrop presses
    dialog_rect: Option<Rect>,
    scopes: Option<OpenScopes>,
}

impl ModalOverlayController {
    /// Create a controller over the given background root
    pub fn new(background: InertRoot) -> Self {
        ModalOverlayController {
            background,
            escape_flag: Rc::new(Cell::new(false)),
            payload: None,
            opener: None,
            dialog_focus: DialogFocus::Root,
            dialog_rect: None,
            scopes: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.scopes.is_some()
    }

    /// The live payload while Open
    pub fn payload(&self) -> Option<&DialogPayload> {
        self.payload.as_ref()
    }

    /// Which part of the dialog has focus
    pub fn dialog_focus(&self) -> DialogFocus {
        self.dialog_focus
    }

    /// Whether the Escape capture is currently installed
    pub fn escape_captured(&self) -> bool {
        self.escape_flag.get()
    }

    /// Record the dialog body bounds from the current render pass
    pub fn place_dialog(&mut self, rect: Rect) {
        if self.is_open() {
            self.dialog_rect = Some(rect);
        }
    }

    /// Open with a payload and an explicit opener handle
    ///
    /// Last-call-wins: when already Open, the new payload replaces the
    /// current one and focus entry resets to the dialog root, but the
    /// original opener reference is kept - it still names the element that
    /// held focus before any dialog was up, which is where focus must
    /// return on close.
    pub fn open(&mut self, payload: DialogPayload, opener: Option<FocusHandle>) {
        debug!(title = %payload.title, replacing = self.is_open(), "dialog open");

        if self.scopes.is_none() {
            self.scopes = Some(OpenScopes::install(&self.background, &self.escape_flag));
            self.opener = opener;
        }
        self.payload = Some(payload);
        self.dialog_focus = DialogFocus::Root;
        self.dialog_rect = None;
    }

    /// Close the dialog, releasing the Open scopes
    ///
    /// Returns the captured opener handle (cleared on the way out) so the
    /// host can restore focus there, or fall back to its own last-known
    /// coordinate when the handle is gone or detached.
    pub fn close(&mut self) -> Option<FocusHandle> {
        if self.scopes.is_none() {
            return None;
        }
        debug!("dialog close");

        self.scopes = None;
        self.payload = None;
        self.dialog_rect = None;
        self.dialog_focus = DialogFocus::Root;
        self.opener.take()
    }

    /// Forced teardown (widget unmount while Open); no focus restoration
    pub fn unmount(&mut self) {
        self.scopes = None;
        self.payload = None;
        self.dialog_rect = None;
        self.opener = None;
    }

    /// Route an event through the dialog while Open
    ///
    /// Dismissal triggers: Escape, a pointer press on the backdrop outside
    /// the dialog body, and activating the close control. Tab/BackTab
    /// toggle focus between the dialog root and the close control. All
    /// other events are consumed while Open (the background is inert).
    pub fn handle_event(&mut self, event: &Event) -> OverlayOutcome {
        if !self.is_open() {
            return OverlayOutcome::Ignored;
        }

        match event {
            Event::Key(Key::Esc) => OverlayOutcome::Closed(self.close()),
            Event::Key(Key::Tab) | Event::Key(Key::BackTab) => {
                self.dialog_focus = match self.dialog_focus {
                    DialogFocus::Root => DialogFocus::CloseControl,
                    DialogFocus::CloseControl => DialogFocus::Root,
                };
                OverlayOutcome::Consumed
            }
            Event::Key(Key::Enter) | Event::Key(Key::Char(' '))
                if self.dialog_focus == DialogFocus::CloseControl =>
            {
                OverlayOutcome::Closed(self.close())
            }
            Event::Mouse(MouseEvent::Press(_, x, y)) => {
                match self.dialog_rect {
                    // Press inside the dialog body: keep open
                    Some(rect) if rect.contains(*x, *y) => OverlayOutcome::Consumed,
                    // Backdrop press; also taken when the dialog has not
                    // been placed yet this frame
                    _ => OverlayOutcome::Closed(self.close()),
                }
            }
            // Resize concerns the host layout, not the dialog
            Event::Resize(..) => OverlayOutcome::Ignored,
            _ => OverlayOutcome::Consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;

    fn payload() -> DialogPayload {
        DialogPayload::new("Program details", "News 24 — World Report.")
    }

    #[test]
    fn test_open_close_scopes() {
        let background = InertRoot::new();
        let mut overlay = ModalOverlayController::new(background.clone());

        assert!(!background.is_inert());
        assert!(!overlay.escape_captured());

        overlay.open(payload(), None);
        assert!(overlay.is_open());
        assert!(background.is_inert());
        assert!(overlay.escape_captured());

        overlay.close();
        assert!(!overlay.is_open());
        assert!(!background.is_inert());
        assert!(!overlay.escape_captured());
        assert!(overlay.payload().is_none());
    }

    #[test]
    fn test_escape_closes_and_returns_opener() {
        let background = InertRoot::new();
        let mut overlay = ModalOverlayController::new(background.clone());

        let mut arena = crate::focus::FocusArena::new();
        let opener = arena.register_free();

        overlay.open(payload(), Some(opener));
        let outcome = overlay.handle_event(&Event::Key(Key::Esc));

        assert_eq!(outcome, OverlayOutcome::Closed(Some(opener)));
        assert!(!background.is_inert());
    }

    #[test]
    fn test_backdrop_press_closes_inside_press_does_not() {
        let background = InertRoot::new();
        let mut overlay = ModalOverlayController::new(background);

        overlay.open(payload(), None);
        overlay.place_dialog(Rect::new(20, 5, 40, 10));

        let inside = Event::Mouse(MouseEvent::Press(MouseButton::Left, 30, 8));
        assert_eq!(overlay.handle_event(&inside), OverlayOutcome::Consumed);
        assert!(overlay.is_open());

        let outside = Event::Mouse(MouseEvent::Press(MouseButton::Left, 2, 2));
        assert_eq!(
            overlay.handle_event(&outside),
            OverlayOutcome::Closed(None)
        );
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_close_control_focus_and_activate() {
        let background = InertRoot::new();
        let mut overlay = ModalOverlayController::new(background);

        overlay.open(payload(), None);
        assert_eq!(overlay.dialog_focus(), DialogFocus::Root);

        // Enter on the root is not a dismissal
        assert_eq!(
            overlay.handle_event(&Event::Key(Key::Enter)),
            OverlayOutcome::Consumed
        );

        overlay.handle_event(&Event::Key(Key::Tab));
        assert_eq!(overlay.dialog_focus(), DialogFocus::CloseControl);

        let outcome = overlay.handle_event(&Event::Key(Key::Enter));
        assert_eq!(outcome, OverlayOutcome::Closed(None));
    }

    #[test]
    fn test_last_call_wins_replaces_payload_keeps_opener() {
        let background = InertRoot::new();
        let mut overlay = ModalOverlayController::new(background.clone());

        let mut arena = crate::focus::FocusArena::new();
        let opener = arena.register_free();

        overlay.open(DialogPayload::new("First", "one"), Some(opener));
        overlay.handle_event(&Event::Key(Key::Tab)); // move focus off the root
        overlay.open(DialogPayload::new("Second", "two"), None);

        assert_eq!(overlay.payload().unwrap().title, "Second");
        assert_eq!(overlay.dialog_focus(), DialogFocus::Root);
        assert!(background.is_inert());

        // The original opener survives replacement
        assert_eq!(overlay.close(), Some(opener));
    }

    #[test]
    fn test_drop_while_open_releases_inert() {
        let background = InertRoot::new();
        {
            let mut overlay = ModalOverlayController::new(background.clone());
            overlay.open(payload(), None);
            assert!(background.is_inert());
        }
        assert!(!background.is_inert());
    }

    #[test]
    fn test_unmount_while_open_releases_everything() {
        let background = InertRoot::new();
        let mut overlay = ModalOverlayController::new(background.clone());

        overlay.open(payload(), None);
        overlay.unmount();

        assert!(!overlay.is_open());
        assert!(!background.is_inert());
        assert!(!overlay.escape_captured());
        assert!(overlay.payload().is_none());
    }
}
