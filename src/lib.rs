//! patlab - a terminal catalogue of accessible UI interaction patterns
//!
//! A small TUI component library hosting isolated pattern demos (buttons,
//! links, toasts, carousels, a paged collection row) around one genuinely
//! stateful widget: a keyboard-navigable channel-guide grid with a modal
//! details overlay. Roving focus, opener capture and restoration, and
//! background inertness follow the interaction contracts of the matching
//! ARIA patterns; each widget reports its contract as an accessible tree
//! the tests assert against.

pub mod a11y;
pub mod component;
pub mod components;
pub mod context;
pub mod error;
pub mod event;
pub mod focus;
pub mod layout;
pub mod overlay;
pub mod render;
pub mod terminal;
pub mod theme;

// Re-export commonly used types
pub use a11y::{AccessibilitySettings, AccessibleNode, Role};
pub use component::Component;
pub use components::{
    Button, ButtonBuilder, Carousel, ChannelGuide, CollectionItem, CollectionRow, GridModel,
    LinkItem, LinkList, LinkTarget, Slide, Text, TextAlign, Toast, ToggleButton, ToggleLabeling,
};
pub use context::{RenderContext, UseAccessibility, UseTheme};
pub use error::PatternError;
pub use event::{Event, EventHandler, EventPoller, Key};
pub use focus::{Coord, FocusArena, FocusCoordinator, FocusHandle};
pub use layout::Rect;
pub use overlay::{DialogFocus, DialogPayload, InertRoot, ModalOverlayController, OverlayOutcome};
pub use render::Renderer;
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{Color, Theme};
