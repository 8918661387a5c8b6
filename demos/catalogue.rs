//! patlab catalogue - browse the pattern demos in a terminal
//!
//! Up/Down and Enter pick a pattern from the hub; Esc returns to the hub
//! (an open dialog takes the Escape first); q quits.

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use patlab::{
    components::carousel::demo_slides,
    components::collection_row::demo_items,
    components::link::demo_links,
    Button, Carousel, ChannelGuide, CollectionRow, Component, DialogFocus, DialogPayload, Event,
    EventHandler, EventPoller, InertRoot, Key, LinkList, ModalOverlayController, OverlayOutcome,
    Rect, RenderContext, Renderer, Theme, Toast, ToggleButton,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Hub,
    Guide,
    Buttons,
    Dialog,
    Carousel,
    CollectionRow,
    Links,
    Toast,
}

const HUB_ENTRIES: &[(Page, &str, &str)] = &[
    (
        Page::Guide,
        "Grid (Interactive)",
        "Channel guide keyboard navigation and cell interactions.",
    ),
    (
        Page::Buttons,
        "Button / Toggle",
        "Labeling, icon slots, and pressed-state announcement.",
    ),
    (
        Page::Dialog,
        "Dialog / Modal",
        "Focus management, inert background, and keyboard close behavior.",
    ),
    (
        Page::Carousel,
        "Carousel",
        "Previous/next slide controls and announcements.",
    ),
    (
        Page::CollectionRow,
        "Collection Row",
        "Paged horizontal collection with keyboard-safe focus behavior.",
    ),
    (Page::Links, "Link", "Accessible text link patterns."),
    (Page::Toast, "Toast", "Polite status updates and dismiss controls."),
];

struct Catalogue {
    page: Page,
    hub_index: usize,

    guide: ChannelGuide,

    save_button: Button,
    mute_toggle: ToggleButton,
    bold_toggle: ToggleButton,
    button_focus: usize,

    dialog_overlay: ModalOverlayController,
    dialog_opener: Button,

    carousel: Carousel,
    collection: CollectionRow,
    links: LinkList,

    toast: Toast,
    toast_button: Button,
}

impl Catalogue {
    fn new() -> Result<Self> {
        let background = InertRoot::new();
        let mut links = LinkList::new(demo_links());
        links.focus_index(0);

        let mut collection = CollectionRow::new("Customers Also Viewed", demo_items(), 6);
        collection.focus_local(0);

        let mut carousel = Carousel::new(demo_slides());
        carousel.set_focused(true);

        let mut mute_toggle = ToggleButton::next_action("Mute", "Unmute").with_icon("♪");
        mute_toggle.set_focused(false);

        Ok(Catalogue {
            page: Page::Hub,
            hub_index: 0,
            guide: ChannelGuide::new("Channel guide"),
            save_button: Button::builder().label("Save").build()?,
            mute_toggle,
            bold_toggle: ToggleButton::pressed_state("Bold").with_icon("B"),
            button_focus: 0,
            dialog_overlay: ModalOverlayController::new(background),
            dialog_opener: Button::builder().label("Open dialog").build()?,
            carousel,
            collection,
            links,
            toast: Toast::new("Pattern saved. This toast auto-dismisses after 5 seconds."),
            toast_button: Button::builder().label("Show toast").build()?,
        })
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        match self.page {
            Page::Hub => self.handle_hub(event),
            Page::Guide => {
                if self.guide.handle_event(event) {
                    return true;
                }
                self.handle_back(event)
            }
            Page::Buttons => self.handle_buttons(event),
            Page::Dialog => self.handle_dialog(event),
            Page::Carousel => {
                if self.carousel.handle_event(event) {
                    return true;
                }
                self.handle_back(event)
            }
            Page::CollectionRow => {
                if self.collection.handle_event(event) {
                    return true;
                }
                self.handle_back(event)
            }
            Page::Links => {
                if self.links.handle_event(event) {
                    let _ = self.links.take_followed();
                    return true;
                }
                self.handle_back(event)
            }
            Page::Toast => self.handle_toast(event),
        }
    }

    fn handle_hub(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(Key::Up) if self.hub_index > 0 => {
                self.hub_index -= 1;
                true
            }
            Event::Key(Key::Down) if self.hub_index + 1 < HUB_ENTRIES.len() => {
                self.hub_index += 1;
                true
            }
            Event::Key(Key::Enter) => {
                self.page = HUB_ENTRIES[self.hub_index].0;
                true
            }
            _ => false,
        }
    }

    fn handle_back(&mut self, event: &Event) -> bool {
        if matches!(event, Event::Key(Key::Esc)) {
            self.page = Page::Hub;
            return true;
        }
        false
    }

    fn handle_buttons(&mut self, event: &Event) -> bool {
        self.save_button.set_focused(self.button_focus == 0);
        self.mute_toggle.set_focused(self.button_focus == 1);
        self.bold_toggle.set_focused(self.button_focus == 2);

        match event {
            Event::Key(Key::Tab) => {
                self.button_focus = (self.button_focus + 1) % 3;
                true
            }
            _ => {
                if self.save_button.handle_event(event) {
                    let _ = self.save_button.take_activated();
                    return true;
                }
                if self.mute_toggle.handle_event(event) || self.bold_toggle.handle_event(event) {
                    return true;
                }
                self.handle_back(event)
            }
        }
    }

    fn handle_dialog(&mut self, event: &Event) -> bool {
        match self.dialog_overlay.handle_event(event) {
            OverlayOutcome::Consumed => return true,
            OverlayOutcome::Closed(_) => {
                // Single opener on this page: focus falls back to it
                self.dialog_opener.set_focused(true);
                return true;
            }
            OverlayOutcome::Ignored => {}
        }

        self.dialog_opener.set_focused(true);
        if self.dialog_opener.handle_event(event) {
            if self.dialog_opener.take_activated() {
                self.dialog_overlay.open(
                    DialogPayload::new(
                        "Dialog Pattern",
                        "Focus enters on open, closes on Escape, and restores to the opener on close.",
                    ),
                    None,
                );
            }
            return true;
        }
        self.handle_back(event)
    }

    fn handle_toast(&mut self, event: &Event) -> bool {
        self.toast.set_focused(self.toast.is_visible());
        if self.toast.handle_event(event) {
            return true;
        }

        self.toast_button.set_focused(true);
        if self.toast_button.handle_event(event) {
            if self.toast_button.take_activated() {
                self.toast.show();
            }
            return true;
        }
        self.handle_back(event)
    }

    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        renderer.clear()?;

        match self.page {
            Page::Hub => {
                renderer.move_cursor(bounds.x + 2, bounds.y + 1)?;
                renderer.write_styled("A11y Pattern Lab", &ctx.theme.heading_style())?;
                for (i, (_, name, description)) in HUB_ENTRIES.iter().enumerate() {
                    let y = bounds.y + 3 + i as u16 * 2;
                    let style = ctx.theme.cell_style(i == self.hub_index, false, false);
                    renderer.move_cursor(bounds.x + 2, y)?;
                    renderer.write_styled(name, &style)?;
                    renderer.move_cursor(bounds.x + 4, y + 1)?;
                    renderer.write_styled(description, &ctx.theme.label_style())?;
                }
            }
            Page::Guide => {
                self.guide
                    .render(renderer, bounds.inner(1), ctx)?;
            }
            Page::Buttons => {
                self.save_button
                    .render(renderer, Rect::new(bounds.x + 2, bounds.y + 2, 20, 1), ctx)?;
                self.mute_toggle
                    .render(renderer, Rect::new(bounds.x + 2, bounds.y + 4, 24, 1), ctx)?;
                self.bold_toggle
                    .render(renderer, Rect::new(bounds.x + 2, bounds.y + 6, 24, 1), ctx)?;
            }
            Page::Dialog => {
                self.dialog_opener
                    .render(renderer, Rect::new(bounds.x + 2, bounds.y + 2, 20, 1), ctx)?;
                if let Some(payload) = self.dialog_overlay.payload().cloned() {
                    let rect = bounds.centered(56.min(bounds.width), 7);
                    self.dialog_overlay.place_dialog(rect);
                    let on_root = self.dialog_overlay.dialog_focus() == DialogFocus::Root;
                    renderer.move_cursor(rect.x, rect.y)?;
                    renderer.write_styled(
                        &payload.title,
                        &ctx.theme.cell_style(on_root, false, false),
                    )?;
                    renderer.move_cursor(rect.x, rect.y + 2)?;
                    renderer.write_styled(&payload.body, &ctx.theme.text_style())?;
                    renderer.move_cursor(rect.x, rect.y + 4)?;
                    renderer
                        .write_styled("[ Close ]", &ctx.theme.cell_style(!on_root, false, false))?;
                }
            }
            Page::Carousel => {
                self.carousel
                    .render(renderer, bounds.inner(2), ctx)?;
            }
            Page::CollectionRow => {
                self.collection
                    .render(renderer, bounds.inner(2), ctx)?;
            }
            Page::Links => {
                self.links.render(renderer, bounds.inner(2), ctx)?;
            }
            Page::Toast => {
                self.toast_button
                    .render(renderer, Rect::new(bounds.x + 2, bounds.y + 2, 20, 1), ctx)?;
                self.toast.render(
                    renderer,
                    Rect::new(bounds.x + 2, bounds.bottom().saturating_sub(2), bounds.width, 1),
                    ctx,
                )?;
            }
        }

        if self.page != Page::Hub {
            renderer.move_cursor(bounds.x + 2, bounds.bottom().saturating_sub(1))?;
            renderer.write_styled("Esc: back to hub", &ctx.theme.label_style())?;
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut renderer = Renderer::new()?;
    let caps = renderer.context().capabilities;
    let theme = Theme::new(caps);
    renderer.enter_alt_screen()?;
    renderer.hide_cursor()?;

    let events = EventPoller::new()?;
    let mut catalogue = Catalogue::new()?;

    loop {
        let (cols, rows) = renderer.context().char_dimensions();
        let bounds = Rect::fullscreen(cols, rows);

        let ctx = RenderContext::new(&theme);
        renderer.begin_frame()?;
        catalogue.render(&mut renderer, bounds, &ctx)?;
        renderer.end_frame()?;

        if let Some(event) = events.poll(Duration::from_millis(16))? {
            match event {
                Event::Key(Key::Char('q')) | Event::Key(Key::Ctrl('c'))
                    if catalogue.page == Page::Hub =>
                {
                    break;
                }
                Event::Resize(_, _) => {
                    renderer.refresh_geometry()?;
                    renderer.clear()?;
                }
                other => {
                    catalogue.handle_event(&other);
                }
            }
        }

        // Drive the toast's auto-dismiss deadline
        catalogue.toast.tick();
    }

    renderer.exit_alt_screen()?;
    renderer.show_cursor()?;

    Ok(())
}
