//! End-to-end interaction scenarios for the channel guide, driven through
//! the public widget API and observed through the accessible tree.

use patlab::{
    Component, Coord, Event, EventHandler, Key, Rect, RenderContext, Renderer, Role, Theme,
};
use patlab::event::{MouseButton, MouseEvent};
use patlab::terminal::TerminalCapabilities;
use patlab::ChannelGuide;

fn guide() -> ChannelGuide {
    ChannelGuide::new("Channel guide")
}

fn press(guide: &mut ChannelGuide, key: Key) {
    guide.handle_event(&Event::Key(key));
}

fn render_once(guide: &mut ChannelGuide) {
    let mut renderer = Renderer::headless();
    let theme = Theme::with_accessibility(
        TerminalCapabilities::full(),
        patlab::AccessibilitySettings::new(),
    );
    let ctx = RenderContext::new(&theme);
    guide
        .render(&mut renderer, Rect::new(0, 0, 120, 40), &ctx)
        .expect("headless render");
}

fn cell_tab_stops(guide: &ChannelGuide) -> usize {
    let tree = guide.accessibility().expect("accessible tree");
    let mut count = 0;
    tree.walk(&mut |node| {
        if matches!(node.role, Role::GridCell | Role::RowHeader) && node.tab_stop {
            count += 1;
        }
    });
    count
}

#[test]
fn arrow_walks_never_leave_bounds() {
    let mut guide = guide();
    let keys = [Key::Up, Key::Down, Key::Left, Key::Right];

    // Deterministic pseudo-random walk
    let mut state: u64 = 0x2545F4914F6CDD1D;
    for _ in 0..500 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let key = keys[(state >> 33) as usize % keys.len()];
        press(&mut guide, key);

        let coord = guide.focused_cell();
        assert!(coord.row < 5, "row {} escaped the data rows", coord.row);
        assert!(coord.col < 6, "col {} escaped the columns", coord.col);
        assert_eq!(cell_tab_stops(&guide), 1);
    }
}

#[test]
fn home_and_end_jump_within_the_row() {
    let mut guide = guide();

    press(&mut guide, Key::Down);
    press(&mut guide, Key::Right);
    let row = guide.focused_cell().row;

    press(&mut guide, Key::Home);
    assert_eq!(guide.focused_cell(), Coord::new(row, 0));

    press(&mut guide, Key::End);
    assert_eq!(guide.focused_cell(), Coord::new(row, 5));
}

#[test]
fn tab_out_and_back_in_restores_last_coordinate() {
    let mut guide = guide();

    press(&mut guide, Key::Down);
    press(&mut guide, Key::Down);
    press(&mut guide, Key::Right);
    let parked = guide.focused_cell();

    press(&mut guide, Key::Tab);
    assert!(!guide.grid_has_focus());

    press(&mut guide, Key::BackTab);
    assert!(guide.grid_has_focus());
    assert_eq!(guide.focused_cell(), parked);
    assert_ne!(guide.focused_cell(), Coord::new(0, 0));
}

#[test]
fn tune_scenario_five_by_five() {
    let mut guide = guide();
    assert_eq!(guide.focused_cell(), Coord::new(1, 1));
    assert_eq!(guide.selected_row(), 1);

    press(&mut guide, Key::Down);
    press(&mut guide, Key::Down);
    assert_eq!(guide.focused_cell(), Coord::new(3, 1));
    assert_eq!(guide.selected_row(), 1); // selection unchanged by focus

    press(&mut guide, Key::Enter);
    assert_eq!(guide.selected_row(), 3);
    assert!(!guide.is_dialog_open());

    // Re-activating the tuned row is a no-op on selection
    press(&mut guide, Key::Enter);
    assert_eq!(guide.selected_row(), 3);
}

#[test]
fn channel_details_scenario_with_escape() {
    let mut guide = guide();

    press(&mut guide, Key::Up);
    press(&mut guide, Key::Home);
    assert_eq!(guide.focused_cell(), Coord::new(0, 0));

    press(&mut guide, Key::Enter);
    assert!(guide.is_dialog_open());
    assert_eq!(guide.dialog().unwrap().title, "Channel details: News 24");

    press(&mut guide, Key::Esc);
    assert!(!guide.is_dialog_open());
    assert_eq!(guide.focused_cell(), Coord::new(0, 0));
}

#[test]
fn backdrop_press_scenario_restores_focus_and_inertness() {
    let mut guide = guide();

    press(&mut guide, Key::Down);
    press(&mut guide, Key::Right);
    press(&mut guide, Key::Right);
    assert_eq!(guide.focused_cell(), Coord::new(2, 3));

    press(&mut guide, Key::Enter);
    assert!(guide.is_dialog_open());
    assert!(guide.is_background_inert());
    assert_eq!(guide.dialog().unwrap().title, "Program details");

    // A render pass places the dialog, so the press below is a backdrop
    // press, not a press inside the dialog body
    render_once(&mut guide);

    guide.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 1, 1)));
    assert!(!guide.is_dialog_open());
    assert!(!guide.is_background_inert());
    assert_eq!(guide.focused_cell(), Coord::new(2, 3));
}

#[test]
fn dialog_survives_press_inside_its_body() {
    let mut guide = guide();

    press(&mut guide, Key::Home);
    press(&mut guide, Key::Enter);
    render_once(&mut guide);

    // Bounds are 120x40, the dialog is centered: its middle is inside
    guide.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 60, 19)));
    assert!(guide.is_dialog_open());
}

#[test]
fn open_dialog_removes_background_tab_stops() {
    let mut guide = guide();
    assert_eq!(cell_tab_stops(&guide), 1);

    press(&mut guide, Key::Home);
    press(&mut guide, Key::Enter);
    assert_eq!(cell_tab_stops(&guide), 0);

    let tree = guide.accessibility().unwrap();
    let dialog = tree
        .find(|n| matches!(n.role, Role::Dialog { modal: true }))
        .expect("dialog node");
    assert!(dialog.tab_stop);

    press(&mut guide, Key::Esc);
    assert_eq!(cell_tab_stops(&guide), 1);
}

#[test]
fn accessible_names_are_self_contained() {
    let guide = guide();
    let tree = guide.accessibility().unwrap();

    let now_cell = tree
        .find(|n| {
            n.role == Role::GridCell
                && n.name
                    .as_deref()
                    .is_some_and(|name| name.starts_with("Now: Steel Harbor"))
        })
        .expect("now cell for Action Max");
    assert_eq!(
        now_cell.name.as_deref(),
        Some("Now: Steel Harbor. PG-13 · Action. 48m remaining")
    );

    let tuned_header = tree
        .find(|n| n.role == Role::RowHeader && n.name.as_deref().unwrap_or("").ends_with("currently playing"))
        .expect("tuned row header");
    assert_eq!(
        tuned_header.name.as_deref(),
        Some("Action Max, currently playing")
    );
}
