//! Event system - keyboard, mouse, and terminal events

use anyhow::Result;
use std::time::Duration;

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    BackTab,
    Backspace,
    Enter,
    Tab,
    Esc,
    Null,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16), // button, col, row
    Release(u16, u16),            // col, row
    ScrollUp(u16, u16),           // col, row
    ScrollDown(u16, u16),         // col, row
}

impl MouseEvent {
    /// Position of the event in terminal cells (col, row)
    pub fn position(&self) -> (u16, u16) {
        match *self {
            MouseEvent::Press(_, col, row)
            | MouseEvent::Release(col, row)
            | MouseEvent::ScrollUp(col, row)
            | MouseEvent::ScrollDown(col, row) => (col, row),
        }
    }
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event
    Key(Key),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    /// Terminal window gained focus
    FocusGained,
    /// Terminal window lost focus
    FocusLost,
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when component gains focus
    fn on_focus(&mut self) {}

    /// Called when component loses focus
    fn on_blur(&mut self) {}
}

/// Event polling and conversion from crossterm events
///
/// Raw mode and mouse capture are scoped to the poller: enabled on
/// construction, released on drop.
pub struct EventPoller {
    _enabled: bool,
}

impl EventPoller {
    /// Create a new event poller
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        // Try to enable mouse and focus reporting, but don't fail if not available
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::EnableMouseCapture,
            crossterm::event::EnableFocusChange,
        );

        Ok(EventPoller { _enabled: true })
    }

    /// Poll for next event with timeout
    pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
        if crossterm::event::poll(timeout)? {
            let event = crossterm::event::read()?;
            Ok(convert_crossterm_event(event))
        } else {
            Ok(None)
        }
    }

    /// Block and wait for the next event
    pub fn read(&self) -> Result<Event> {
        loop {
            let event = crossterm::event::read()?;
            if let Some(converted) = convert_crossterm_event(event) {
                return Ok(converted);
            }
        }
    }
}

impl Drop for EventPoller {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::DisableMouseCapture,
            crossterm::event::DisableFocusChange,
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Convert crossterm event to our Event type
fn convert_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
    use crossterm::event::{Event as CEvent, KeyEvent, MouseEventKind};

    match event {
        CEvent::Key(KeyEvent {
            code, modifiers, ..
        }) => Some(Event::Key(convert_key(code, modifiers))),
        CEvent::Mouse(me) => {
            let (col, row) = (me.column, me.row);
            let mouse_event = match me.kind {
                MouseEventKind::Down(btn) => {
                    let button = match btn {
                        crossterm::event::MouseButton::Left => MouseButton::Left,
                        crossterm::event::MouseButton::Right => MouseButton::Right,
                        crossterm::event::MouseButton::Middle => MouseButton::Middle,
                    };
                    MouseEvent::Press(button, col, row)
                }
                MouseEventKind::Up(_) => MouseEvent::Release(col, row),
                MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                // Drag and hover movement carry no pattern semantics
                _ => return None,
            };
            Some(Event::Mouse(mouse_event))
        }
        CEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        CEvent::FocusGained => Some(Event::FocusGained),
        CEvent::FocusLost => Some(Event::FocusLost),
        CEvent::Paste(_) => None,
    }
}

/// Convert crossterm key code to our Key type
fn convert_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> Key {
    use crossterm::event::{KeyCode, KeyModifiers};

    if mods.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = code {
            return Key::Ctrl(c);
        }
    }

    // Shift+Tab arrives as BackTab, not as a modifier on Tab
    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_variants() {
        let k = Key::Char(' ');
        assert_eq!(k, Key::Char(' '));

        let k2 = Key::Ctrl('c');
        assert_eq!(k2, Key::Ctrl('c'));
    }

    #[test]
    fn test_mouse_position() {
        let press = MouseEvent::Press(MouseButton::Left, 12, 4);
        assert_eq!(press.position(), (12, 4));

        let release = MouseEvent::Release(3, 9);
        assert_eq!(release.position(), (3, 9));
    }

    #[test]
    fn test_event_types() {
        let e = Event::Key(Key::Enter);
        match e {
            Event::Key(Key::Enter) => {}
            other => panic!("expected Key(Enter), got {:?}", other),
        }
    }
}
