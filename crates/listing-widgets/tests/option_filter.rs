use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use listing_testing::{
    assert_handles_any_area, assert_handles_rapid_input, Fixtures, InputSequence, TestTerminal,
    WidgetHarness,
};
use listing_widgets::{FilterOption, FilterPhase, OptionFilter, OptionFilterState};
use ratatui::layout::Rect;

type Calls = Rc<RefCell<Vec<(String, String)>>>;

fn status_filter() -> (OptionFilter, Calls) {
    let options: Vec<FilterOption> =
        serde_json::from_str(&Fixtures::status_options_json()).expect("fixture parses");
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let filter = OptionFilter::new("status", "Status", "Select status")
        .options(options)
        .on_apply(move |attribute, id| {
            sink.borrow_mut().push((attribute.to_string(), id.to_string()));
        });
    (filter, calls)
}

fn anchor_area() -> Rect {
    Rect::new(2, 1, 30, 1)
}

fn draw(terminal: &mut TestTerminal, filter: &OptionFilter, state: &mut OptionFilterState) {
    terminal.draw(|frame| frame.render_stateful_widget(filter, anchor_area(), state));
}

fn handle(filter: &OptionFilter) -> impl FnMut(&Event, &mut OptionFilterState) -> bool + '_ {
    move |event: &Event, state: &mut OptionFilterState| match event {
        Event::Key(key) => filter.handle_key(*key, state),
        Event::Mouse(mouse) => filter.handle_mouse(*mouse, state),
        _ => false,
    }
}

#[test]
fn closed_anchor_is_inactive() {
    let (filter, _) = status_filter();
    let mut state = OptionFilterState::new();
    let mut terminal = TestTerminal::new(40, 14);

    draw(&mut terminal, &filter, &mut state);

    assert_eq!(state.selected_id(), "all");
    assert!(!state.indicators().active);
    assert!(!state.indicators().opened);
    assert_eq!(terminal.line(1), "  Status \u{203a}");
    terminal.assert_not_contains("Select status");
}

#[test]
fn open_dropdown_lists_all_first() {
    let (filter, _) = status_filter();
    let mut state = OptionFilterState::new();
    let mut terminal = TestTerminal::new(40, 14);

    draw(&mut terminal, &filter, &mut state);
    filter.toggle(&mut state);
    draw(&mut terminal, &filter, &mut state);

    assert!(matches!(state.phase(), FilterPhase::Open { anchor } if anchor.y == 1));
    terminal.assert_contains("Status \u{25be}");
    terminal.assert_contains("Select status");
    terminal.assert_contains("[Cancel]");
    terminal.assert_contains("[Apply]");

    let all = terminal.find_line("All").expect("All listed");
    let active = terminal.find_line("Active").expect("Active listed");
    let pending = terminal.find_line("Pending review").expect("Pending listed");
    assert!(all < active && active < pending);
    assert!(all > 1, "dropdown sits below the anchor");
}

#[test]
fn click_option_then_apply() {
    let (filter, calls) = status_filter();
    let mut terminal = TestTerminal::new(40, 14);
    let mut state = OptionFilterState::new();

    draw(&mut terminal, &filter, &mut state);
    let (ax, ay) = terminal.find("Status").expect("anchor drawn");
    assert!(filter.handle_mouse(click(ax, ay), &mut state));
    assert!(state.is_open());

    draw(&mut terminal, &filter, &mut state);
    let (ix, iy) = terminal.find("Inactive").expect("option drawn");
    assert!(filter.handle_mouse(click(ix, iy), &mut state));
    assert_eq!(state.selected_id(), "inactive");
    assert!(state.indicators().active);
    assert!(calls.borrow().is_empty(), "selection alone does not notify");

    draw(&mut terminal, &filter, &mut state);
    terminal.assert_contains("\u{2713}");
    let (px, py) = terminal.find("[Apply]").expect("apply drawn");
    assert!(filter.handle_mouse(click(px + 1, py), &mut state));

    assert!(!state.is_open());
    assert_eq!(state.applied_id(), "inactive");
    assert_eq!(
        *calls.borrow(),
        vec![("status".to_string(), "inactive".to_string())]
    );

    // Reopening starts from the applied option
    filter.open(&mut state);
    assert_eq!(state.selected_id(), "inactive");
}

#[test]
fn cancel_button_reverts_selection() {
    let (filter, calls) = status_filter();
    let mut terminal = TestTerminal::new(40, 14);
    let mut state = OptionFilterState::new();

    filter.open(&mut state);
    draw(&mut terminal, &filter, &mut state);
    filter.select("pending", &mut state);

    let (cx, cy) = terminal.find("[Cancel]").expect("cancel drawn");
    assert!(filter.handle_mouse(click(cx, cy), &mut state));

    assert!(!state.is_open());
    assert_eq!(state.selected_id(), "all");
    assert_eq!(state.applied_id(), "all");
    assert!(calls.borrow().is_empty());
}

#[test]
fn click_outside_cancels_without_consuming() {
    let (filter, calls) = status_filter();
    let mut terminal = TestTerminal::new(40, 14);
    let mut state = OptionFilterState::new();

    filter.open(&mut state);
    draw(&mut terminal, &filter, &mut state);
    filter.select("active", &mut state);

    assert!(!filter.handle_mouse(click(39, 13), &mut state));
    assert!(!state.is_open());
    assert_eq!(state.selected_id(), "all");
    assert!(calls.borrow().is_empty());

    // A stale dropdown region no longer swallows clicks
    let (ix, iy) = terminal.find("Inactive").expect("last frame still shows option");
    assert!(!filter.handle_mouse(click(ix, iy), &mut state));
    assert!(!state.is_open());
}

#[test]
fn keyboard_wraps_at_both_ends() {
    let (filter, _) = status_filter();
    let mut harness = WidgetHarness::new(OptionFilterState::new(), 40, 14);

    let mut seq = InputSequence::new();
    seq.enter().up();
    harness.send(&seq, handle(&filter));
    assert_eq!(harness.state().focused_id(), "pending");

    let mut seq = InputSequence::new();
    seq.down();
    harness.send(&seq, handle(&filter));
    assert_eq!(harness.state().focused_id(), "all");

    let mut seq = InputSequence::new();
    seq.key(KeyCode::End).space().char('a');
    let consumed = harness.send(&seq, handle(&filter));
    assert_eq!(consumed, 3);
    assert_eq!(harness.state().applied_id(), "pending");
}

#[test]
fn restored_choice_is_active_and_reopens_there() {
    let (filter, calls) = status_filter();
    let mut state = OptionFilterState::with_applied("pending");
    assert!(state.indicators().active);

    let mut seq = InputSequence::new();
    seq.down().up().enter().esc();
    for key in seq.key_events() {
        filter.handle_key(key, &mut state);
    }

    // Down opens on "pending", Up moves to "inactive", Enter picks it, Esc reverts
    assert_eq!(state.selected_id(), "pending");
    assert_eq!(state.applied_id(), "pending");
    assert!(calls.borrow().is_empty());
}

#[test]
fn rapid_navigation_stays_in_list() {
    let (filter, _) = status_filter();
    let mut state = OptionFilterState::new();
    filter.open(&mut state);

    let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
    assert_handles_rapid_input(|key| filter.handle_key(key, &mut state), down, 101);

    // 101 steps through four entries
    assert_eq!(state.focused_id(), "active");
}

#[test]
fn hover_moves_focus() {
    let (filter, _) = status_filter();
    let mut terminal = TestTerminal::new(40, 14);
    let mut state = OptionFilterState::new();

    filter.open(&mut state);
    draw(&mut terminal, &filter, &mut state);
    let (x, y) = terminal.find("Active").expect("option drawn");

    let mut seq = InputSequence::new();
    seq.hover(x, y);
    let event = seq.mouse_events()[0];
    assert!(filter.handle_mouse(event, &mut state));
    assert_eq!(state.focused_id(), "active");
    assert_eq!(state.selected_id(), "all");
}

#[test]
fn dropdown_flips_above_when_no_room_below() {
    let (filter, _) = status_filter();
    let mut terminal = TestTerminal::new(40, 14);
    let mut state = OptionFilterState::new();
    let anchor = Rect::new(0, 12, 20, 1);

    filter.open(&mut state);
    terminal.draw(|frame| frame.render_stateful_widget(&filter, anchor, &mut state));

    let header = terminal.find_line("Select status").expect("dialog drawn");
    assert!(header < 12);
}

#[test]
fn renders_in_any_area() {
    let (filter, _) = status_filter();
    let mut state = OptionFilterState::new();
    filter.open(&mut state);
    assert_handles_any_area(|frame, area| frame.render_stateful_widget(&filter, area, &mut state));
}

fn click(x: u16, y: u16) -> crossterm::event::MouseEvent {
    let mut seq = InputSequence::new();
    seq.click(x, y);
    seq.mouse_events()[0]
}
