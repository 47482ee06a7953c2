//! Integration tests for the manager loop: windows, modal loops, focus,
//! timers, idle messages, redraw, tooltips and jobs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use jinete::draw::{DrawOp, RecordingSurface};
use jinete::input::{ScriptHandle, ScriptedInput};
use jinete::prelude::*;

/// Route logs to the test harness; filter with `RUST_LOG=jinete=trace`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup() -> Ui {
    init_tracing();
    let mut ui = Ui::new(UiConfig::new().with_screen_size(320, 200));
    ui.new_manager().unwrap();
    ui
}

fn scripted(config: UiConfig) -> (Ui, ScriptHandle) {
    init_tracing();
    let input = ScriptedInput::new();
    let script = input.handle();
    let mut ui = Ui::new(config).with_input(input);
    ui.new_manager().unwrap();
    (ui, script)
}

/// A window with two buttons side by side.
fn dialog(ui: &mut Ui) -> (WidgetId, WidgetId, WidgetId) {
    let window = ui.new_window("Confirm").unwrap();
    let row = ui.new_hbox().unwrap();
    let ok = ui.new_button("OK").unwrap();
    let cancel = ui.new_button("Cancel").unwrap();
    ui.add_child(window, row).unwrap();
    ui.add_child(row, ok).unwrap();
    ui.add_child(row, cancel).unwrap();
    (window, ok, cancel)
}

fn record_messages(ui: &mut Ui, widget: WidgetId) -> Rc<RefCell<Vec<MessageKind>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&log);
    ui.add_hook_fn(widget, move |_, _, msg| {
        seen.borrow_mut().push(msg.kind().clone());
        Ok(false)
    })
    .unwrap();
    log
}

// =========================================================================
// Timers and idle
// =========================================================================

#[test]
fn test_timer_fires_are_coalesced() {
    let clock = ManualClock::new();
    let mut ui = setup().with_clock(clock.clone());
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let log = record_messages(&mut ui, widget);

    let timer = ui.add_timer(widget, 10).unwrap();
    ui.start_timer(timer).unwrap();
    clock.advance(50);
    ui.pump();

    let fires: Vec<u32> = log
        .borrow()
        .iter()
        .filter_map(|kind| match kind {
            MessageKind::Timer { timer: t, count } if *t == timer => Some(*count),
            _ => None,
        })
        .collect();
    assert_eq!(fires, vec![5]);
    assert_eq!(ui.stats().timer_fires, 1);

    // Nothing is owed afterwards.
    ui.pump();
    assert_eq!(ui.stats().timer_fires, 1);
}

#[test]
fn test_stopped_timer_does_not_fire() {
    let clock = ManualClock::new();
    let mut ui = setup().with_clock(clock.clone());
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let timer = ui.add_timer(widget, 10).unwrap();
    ui.start_timer(timer).unwrap();
    ui.stop_timer(timer).unwrap();
    assert!(!ui.is_timer_running(timer));

    clock.advance(100);
    ui.pump();
    assert_eq!(ui.stats().timer_fires, 0);
}

#[test]
fn test_idle_hooks_receive_idle_messages() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let idles = Rc::new(Cell::new(0));
    let seen = Rc::clone(&idles);
    let hook = FnHook::new(move |_: &mut Ui, _: WidgetId, msg: &mut Message| {
        if msg.message_type() == MessageType::Idle {
            seen.set(seen.get() + 1);
        }
        Ok(false)
    })
    .with_idle(true);
    ui.add_hook(widget, HookTag::Any, hook).unwrap();

    ui.pump();
    ui.pump();
    assert_eq!(idles.get(), 2);
}

#[test]
fn test_idle_messages_can_be_disabled() {
    let mut ui = Ui::new(UiConfig::new().with_idle_messages(false));
    ui.new_manager().unwrap();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let idles = Rc::new(Cell::new(0));
    let seen = Rc::clone(&idles);
    let hook = FnHook::new(move |_: &mut Ui, _: WidgetId, msg: &mut Message| {
        if msg.message_type() == MessageType::Idle {
            seen.set(seen.get() + 1);
        }
        Ok(false)
    })
    .with_idle(true);
    ui.add_hook(widget, HookTag::Any, hook).unwrap();

    ui.pump();
    assert_eq!(idles.get(), 0);
}

// =========================================================================
// Window stack
// =========================================================================

#[test]
fn test_window_stack_order() {
    let mut ui = setup();
    let desktop = ui.new_desktop_window().unwrap();
    let first = ui.new_window("First").unwrap();
    let second = ui.new_window("Second").unwrap();
    let palette = ui
        .new_window_with("Palette", WindowOptions::new().with_ontop(true))
        .unwrap();

    ui.open_window(desktop).unwrap();
    ui.open_window(first).unwrap();
    ui.open_window(palette).unwrap();
    ui.open_window(second).unwrap();
    assert_eq!(ui.windows(), vec![palette, second, first, desktop]);

    ui.raise_window(first).unwrap();
    assert_eq!(ui.windows(), vec![palette, first, second, desktop]);

    ui.raise_window(desktop).unwrap();
    assert_eq!(ui.windows().last(), Some(&desktop));

    ui.pump();
    assert_eq!(ui.input_windows(), &[palette, first, second, desktop]);
}

#[test]
fn test_closing_desktop_closes_windows_above() {
    let mut ui = setup();
    let desktop = ui.new_desktop_window().unwrap();
    let window = ui.new_window("Editor").unwrap();
    ui.open_window(desktop).unwrap();
    ui.open_window(window).unwrap();
    ui.pump();

    ui.close_window(desktop, None).unwrap();
    assert!(ui.windows().is_empty());
    assert!(!ui.is_window_open(window));
}

#[test]
fn test_window_errors() {
    let mut ui = setup();
    let window = ui.new_window("Once").unwrap();
    let plain = ui.new_widget(WidgetKind::Widget).unwrap();

    assert_eq!(ui.close_window(window, None), Err(UiError::NotOpen));
    assert_eq!(ui.open_window(plain), Err(UiError::NotAWindow));
    ui.open_window(window).unwrap();
    assert_eq!(ui.open_window(window), Err(UiError::AlreadyOpen));
}

#[test]
fn test_new_windows_are_hidden_until_pumped() {
    let mut ui = setup();
    let window = ui.new_window("Later").unwrap();
    ui.open_window(window).unwrap();
    assert!(ui.is_window_open(window));
    assert!(!ui.is_visible(window));

    ui.pump();
    assert!(ui.is_visible(window));
    assert_eq!(ui.focus(), Some(window));
}

#[test]
fn test_autoremap_centers_window() {
    let mut ui = setup();
    let window = ui.new_window("Centered").unwrap();
    ui.open_window(window).unwrap();

    let rect = ui.rect(window).unwrap();
    let size = ui.request_size(window);
    assert_eq!(rect.width(), size.width);
    assert_eq!(rect.height(), size.height);
    assert_eq!(rect.x1, (320 - size.width) / 2);
    assert_eq!(rect.y1, (200 - size.height) / 2);
}

// =========================================================================
// Modal loops and focus
// =========================================================================

#[test]
fn test_enter_on_focused_button_ends_modal_loop() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let (window, ok, _) = dialog(&mut ui);

    script.type_key(KeyCode::Enter, None);
    script.queue_frame();

    let reason = ui.open_window_fg(window).unwrap();
    assert_eq!(reason, CloseReason::Closed { killer: Some(ok) });
    assert_eq!(ui.window_killer(window), Some(ok));
    assert!(!ui.is_window_open(window));
}

#[test]
fn test_tab_moves_focus_before_enter() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let (window, ok, cancel) = dialog(&mut ui);
    ui.open_window(window).unwrap();
    ui.pump();
    assert_eq!(ui.focus(), Some(ok));

    script.type_key(KeyCode::Tab, None);
    ui.pump();
    assert_eq!(ui.focus(), Some(cancel));

    script.type_key(KeyCode::Enter, None);
    script.queue_frame();
    let reason = ui.run_until_closed(window).unwrap();
    assert_eq!(reason, CloseReason::Closed { killer: Some(cancel) });
}

#[test]
fn test_focus_leave_is_delivered_before_focus_enter() {
    let mut ui = setup();
    let (window, ok, cancel) = dialog(&mut ui);
    ui.open_window(window).unwrap();
    ui.pump();
    assert_eq!(ui.focus(), Some(ok));

    let log = Rc::new(RefCell::new(Vec::new()));
    for widget in [ok, cancel] {
        let seen = Rc::clone(&log);
        ui.add_hook_fn(widget, move |_, widget, msg| {
            if matches!(msg.message_type(), MessageType::FocusEnter | MessageType::FocusLeave) {
                seen.borrow_mut().push((widget, msg.message_type()));
            }
            Ok(false)
        })
        .unwrap();
    }

    ui.set_focus(Some(cancel));
    ui.pump();
    assert_eq!(
        *log.borrow(),
        vec![(ok, MessageType::FocusLeave), (cancel, MessageType::FocusEnter)]
    );
    assert!(!ui.flags(ok).contains(WidgetFlags::HAS_FOCUS));
    assert!(ui.flags(cancel).contains(WidgetFlags::HAS_FOCUS));
}

#[test]
fn test_arrow_keys_move_focus_between_buttons() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let (window, ok, cancel) = dialog(&mut ui);
    ui.open_window(window).unwrap();
    ui.pump();
    assert_eq!(ui.focus(), Some(ok));

    script.type_key(KeyCode::Right, None);
    ui.pump();
    assert_eq!(ui.focus(), Some(cancel));

    // Nothing further right; focus stays.
    script.type_key(KeyCode::Right, None);
    ui.pump();
    assert_eq!(ui.focus(), Some(cancel));

    script.type_key(KeyCode::Left, None);
    ui.pump();
    assert_eq!(ui.focus(), Some(ok));
}

#[test]
fn test_modal_loop_blocks_windows_below() {
    let mut ui = setup();
    let below = ui.new_window("Below").unwrap();
    let modal = ui.new_window("Modal").unwrap();
    ui.open_window(below).unwrap();
    ui.pump();

    let during = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&during);
    let hook = FnHook::new(move |ui: &mut Ui, widget: WidgetId, msg: &mut Message| {
        if msg.message_type() == MessageType::Idle && ui.is_window_open(widget) {
            *seen.borrow_mut() = ui.input_windows().to_vec();
            ui.close_window(widget, None)?;
        }
        Ok(false)
    })
    .with_idle(true);
    ui.add_hook(modal, HookTag::Any, hook).unwrap();

    let reason = ui.open_window_fg(modal).unwrap();
    assert_eq!(reason, CloseReason::Closed { killer: None });
    assert_eq!(*during.borrow(), vec![modal]);
    assert_eq!(ui.input_windows(), &[below]);
}

#[test]
fn test_quit_ends_modal_loop() {
    let mut ui = setup();
    let window = ui.new_window("Busy").unwrap();
    ui.open_window(window).unwrap();
    ui.quit();

    assert_eq!(ui.run_until_closed(window), Ok(CloseReason::Quit));
    assert!(!ui.is_window_open(window));
}

#[test]
fn test_poll_window_reports_destroyed() {
    let mut ui = setup();
    let window = ui.new_window("Gone").unwrap();
    ui.open_window(window).unwrap();
    assert_eq!(ui.poll_window(window), ModalPoll::StillOpen);

    ui.free(window).unwrap();
    assert_eq!(
        ui.poll_window(window),
        ModalPoll::Closed(CloseReason::Destroyed)
    );
}

#[test]
fn test_window_freed_inside_nested_modal_loop_ends_that_loop() {
    let mut ui = setup();
    let outer = ui.new_window("Outer").unwrap();
    ui.open_window(outer).unwrap();
    ui.pump();

    let inner = ui.new_window("Inner").unwrap();
    let hook = FnHook::new(|ui: &mut Ui, widget: WidgetId, msg: &mut Message| {
        if msg.message_type() == MessageType::Idle && ui.is_window_open(widget) {
            ui.free(widget)?;
        }
        Ok(false)
    })
    .with_idle(true);
    ui.add_hook(inner, HookTag::Any, hook).unwrap();

    // The outer window stays busy for the whole nested loop.
    let reason = Rc::new(RefCell::new(None));
    let seen = Rc::clone(&reason);
    ui.add_hook_fn(outer, move |ui, _, msg| {
        if let MessageKind::Signal { signal: Signal::Custom(7), .. } = msg.kind() {
            *seen.borrow_mut() = Some(ui.open_window_fg(inner)?);
            return Ok(true);
        }
        Ok(false)
    })
    .unwrap();

    assert!(ui.emit_signal(outer, Signal::Custom(7)));
    assert_eq!(*reason.borrow(), Some(CloseReason::Destroyed));
    assert!(!ui.is_alive(inner));
    assert!(ui.is_alive(outer));
    assert!(ui.is_window_open(outer));
}

#[test]
fn test_run_returns_when_last_window_closes() {
    let mut ui = Ui::new(UiConfig::new().with_idle_sleep(std::time::Duration::ZERO));
    assert_eq!(ui.run(), Err(UiError::InvalidWidget));

    ui.new_manager().unwrap();
    let window = ui.new_window("Short-lived").unwrap();
    let hook = FnHook::new(|ui: &mut Ui, widget: WidgetId, msg: &mut Message| {
        if msg.message_type() == MessageType::Idle && ui.is_window_open(widget) {
            ui.close_window(widget, None)?;
        }
        Ok(false)
    })
    .with_idle(true);
    ui.add_hook(window, HookTag::Any, hook).unwrap();
    ui.open_window(window).unwrap();

    ui.run().unwrap();
    assert!(ui.windows().is_empty());
}

// =========================================================================
// Mouse
// =========================================================================

#[test]
fn test_double_click() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let window = ui.new_window("Clicks").unwrap();
    ui.set_rect(window, Rect::new(0, 0, 200, 100));
    ui.open_window(window).unwrap();
    ui.pump();

    let presses = Rc::new(Cell::new(0));
    let doubles = Rc::new(Cell::new(0));
    let (p, d) = (Rc::clone(&presses), Rc::clone(&doubles));
    ui.add_hook_fn(window, move |_, _, msg| {
        match msg.message_type() {
            MessageType::ButtonPressed => p.set(p.get() + 1),
            MessageType::DoubleClick => d.set(d.get() + 1),
            _ => {}
        }
        Ok(false)
    })
    .unwrap();

    script.move_mouse(100, 60);
    ui.pump();
    script.press(MouseButtons::LEFT);
    script.queue_frame();
    script.release(MouseButtons::LEFT);
    script.queue_frame();
    script.press(MouseButtons::LEFT);
    script.queue_frame();
    for _ in 0..3 {
        ui.pump();
    }

    assert_eq!(presses.get(), 1);
    assert_eq!(doubles.get(), 1);
}

#[test]
fn test_click_on_button_closes_window() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let window = ui.new_window("Clicks").unwrap();
    let button = ui.new_button("Done").unwrap();
    ui.add_child(window, button).unwrap();
    ui.set_rect(window, Rect::new(0, 0, 200, 100));
    ui.set_rect(button, Rect::new(20, 40, 80, 60));
    ui.open_window(window).unwrap();
    ui.pump();

    script.move_mouse(30, 50);
    script.press(MouseButtons::LEFT);
    ui.pump();
    assert!(ui.is_selected(button));
    assert!(ui.has_capture(button));

    script.release(MouseButtons::LEFT);
    ui.pump();
    assert!(!ui.is_window_open(window));
    assert_eq!(ui.window_killer(window), Some(button));
    assert_eq!(ui.capture(), None);
}

#[test]
fn test_release_outside_button_does_not_activate() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let window = ui.new_window("Clicks").unwrap();
    let button = ui.new_button("Done").unwrap();
    ui.add_child(window, button).unwrap();
    ui.set_rect(window, Rect::new(0, 0, 200, 100));
    ui.set_rect(button, Rect::new(20, 40, 80, 60));
    ui.open_window(window).unwrap();
    ui.pump();

    script.move_mouse(30, 50);
    script.press(MouseButtons::LEFT);
    ui.pump();
    script.move_mouse(150, 50);
    ui.pump();
    assert!(!ui.is_selected(button));

    script.release(MouseButtons::LEFT);
    ui.pump();
    assert!(ui.is_window_open(window));
}

#[test]
fn test_drag_window_by_title_bar() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let window = ui.new_window("Drag me").unwrap();
    ui.set_rect(window, Rect::new(20, 20, 120, 80));
    ui.open_window(window).unwrap();
    ui.pump();

    script.move_mouse(50, 28);
    script.press(MouseButtons::LEFT);
    ui.pump();
    assert!(ui.has_capture(window));

    script.move_mouse(70, 38);
    ui.pump();
    assert_eq!(ui.rect(window), Some(Rect::new(40, 30, 140, 90)));

    script.release(MouseButtons::LEFT);
    ui.pump();
    assert_eq!(ui.capture(), None);
}

#[test]
fn test_wheel_reaches_widget_under_mouse() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let window = ui.new_window("Scroll").unwrap();
    ui.set_rect(window, Rect::new(0, 0, 200, 100));
    ui.open_window(window).unwrap();
    ui.pump();

    let log = record_messages(&mut ui, window);
    script.move_mouse(100, 50);
    ui.pump();
    script.scroll(3);
    ui.pump();

    let wheels: Vec<i32> = log
        .borrow()
        .iter()
        .filter_map(|kind| match kind {
            MessageKind::Wheel(mouse) => Some(mouse.wheel),
            _ => None,
        })
        .collect();
    assert_eq!(wheels, vec![3]);
}

// =========================================================================
// Keyboard
// =========================================================================

#[test]
fn test_key_repeat_counts_and_key_pressed_once() {
    let (mut ui, script) = scripted(UiConfig::new().with_screen_size(320, 200));
    let window = ui.new_window("Keys").unwrap();
    let field = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.set_focus_rest(field, true).unwrap();
    ui.add_child(window, field).unwrap();
    ui.open_window(window).unwrap();
    ui.pump();
    assert_eq!(ui.focus(), Some(field));

    let log = record_messages(&mut ui, field);
    script.key_down(KeyCode::Character('x'), Some('x'));
    ui.pump();
    script.key_down(KeyCode::Character('x'), Some('x'));
    ui.pump();
    script.key_up(KeyCode::Character('x'));
    ui.pump();

    let log = log.borrow();
    let repeats: Vec<u32> = log
        .iter()
        .filter_map(|kind| match kind {
            MessageKind::Char(key) => Some(key.repeat),
            _ => None,
        })
        .collect();
    let pressed = log
        .iter()
        .filter(|kind| matches!(kind, MessageKind::KeyPressed(_)))
        .count();
    let released = log
        .iter()
        .filter(|kind| matches!(kind, MessageKind::KeyReleased(_)))
        .count();
    assert_eq!(repeats, vec![0, 1]);
    assert_eq!(pressed, 1);
    assert_eq!(released, 1);
}

// =========================================================================
// Redraw
// =========================================================================

#[test]
fn test_first_pump_paints_everything() {
    let surface = RecordingSurface::new(Size::new(320, 200));
    let mut ui = Ui::new(UiConfig::new().with_screen_size(320, 200)).with_surface(surface.clone());
    ui.new_manager().unwrap();
    let window = ui.new_window("Hello").unwrap();
    ui.set_rect(window, Rect::new(10, 10, 110, 60));
    ui.open_window(window).unwrap();

    ui.pump();
    assert!(surface.texts().contains(&"Hello".to_owned()));
    assert!(ui.stats().draws > 0);
    assert!(!ui.needs_redraw());

    surface.clear();
    ui.pump();
    assert!(surface.ops().is_empty());
}

#[test]
fn test_drawable_region_excludes_windows_above() {
    let mut ui = setup();
    let lower = ui.new_window("Lower").unwrap();
    let upper = ui.new_window("Upper").unwrap();
    ui.set_rect(lower, Rect::new(0, 0, 100, 100));
    ui.set_rect(upper, Rect::new(50, 50, 150, 150));
    ui.open_window(lower).unwrap();
    ui.open_window(upper).unwrap();
    ui.pump();

    let expected =
        Region::from_rect(Rect::new(0, 0, 100, 100)).subtract_rect(Rect::new(50, 50, 150, 150));
    assert_eq!(ui.drawable_region(lower), expected);
}

#[test]
fn test_closing_window_repaints_what_was_under_it() {
    let mut ui = setup();
    let lower = ui.new_window("Lower").unwrap();
    let upper = ui.new_window("Upper").unwrap();
    ui.set_rect(lower, Rect::new(0, 0, 100, 100));
    ui.set_rect(upper, Rect::new(50, 50, 150, 150));
    ui.open_window(lower).unwrap();
    ui.open_window(upper).unwrap();
    ui.pump();
    assert!(!ui.needs_redraw());

    ui.close_window(upper, None).unwrap();
    let node = ui.node(lower).unwrap();
    assert!(node.flags().contains(WidgetFlags::DIRTY));
    assert_eq!(
        node.update_region(),
        &Region::from_rect(Rect::new(50, 50, 100, 100))
    );
    assert!(ui.needs_redraw());

    ui.pump();
    assert!(!ui.needs_redraw());
}

#[test]
fn test_hidden_widget_is_never_invalidated() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.set_rect(widget, Rect::new(0, 0, 10, 10));
    ui.hide(widget).unwrap();

    ui.invalidate(widget);
    assert!(!ui.flags(widget).contains(WidgetFlags::DIRTY));
    assert!(ui.node(widget).unwrap().update_region().is_empty());
}

#[test]
fn test_hiding_dirty_widget_drops_its_pending_repaint() {
    let mut ui = setup();
    let window = ui.new_window("Panel").unwrap();
    let child = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.add_child(window, child).unwrap();
    ui.set_rect(window, Rect::new(0, 0, 100, 80));
    ui.set_rect(child, Rect::new(10, 20, 40, 30));
    ui.open_window(window).unwrap();
    ui.pump();
    assert!(!ui.needs_redraw());

    ui.invalidate(child);
    assert!(ui.flags(child).contains(WidgetFlags::DIRTY));
    ui.hide(child).unwrap();
    assert!(!ui.flags(child).contains(WidgetFlags::DIRTY));
    assert!(ui.node(child).unwrap().update_region().is_empty());

    // The parent repaints the uncovered area, then nothing is left.
    ui.pump();
    assert!(!ui.needs_redraw());
}

#[test]
fn test_scroll_blits_and_exposes() {
    let surface = RecordingSurface::new(Size::new(320, 200));
    let mut ui = Ui::new(UiConfig::new().with_screen_size(320, 200)).with_surface(surface.clone());
    ui.new_manager().unwrap();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.set_rect(widget, Rect::new(0, 0, 100, 100));
    ui.invalidate_rect(widget, Rect::new(0, 20, 10, 30));

    ui.scroll(widget, 0, 10, Rect::new(0, 0, 100, 100));

    assert_eq!(
        surface.ops(),
        vec![DrawOp::Blit {
            region: Region::from_rect(Rect::new(0, 0, 100, 90)),
            dx: 0,
            dy: 10,
        }]
    );
    let expected = Region::from_rect(Rect::new(0, 0, 100, 10)).union_rect(Rect::new(0, 30, 10, 40));
    assert_eq!(ui.node(widget).unwrap().update_region(), &expected);
}

// =========================================================================
// Tooltips and jobs
// =========================================================================

#[test]
fn test_tooltip_shows_after_delay_and_hides_on_leave() {
    let clock = ManualClock::new();
    let (ui, script) = scripted(
        UiConfig::new()
            .with_screen_size(320, 200)
            .with_tooltip_delay_ticks(5),
    );
    let mut ui = ui.with_clock(clock.clone());
    let window = ui.new_window("Tools").unwrap();
    let button = ui.new_button("Save").unwrap();
    ui.add_child(window, button).unwrap();
    ui.set_rect(window, Rect::new(50, 50, 250, 150));
    ui.set_rect(button, Rect::new(60, 90, 120, 110));
    ui.set_tooltip(button, "Save file").unwrap();
    ui.open_window(window).unwrap();
    ui.pump();

    script.move_mouse(70, 95);
    ui.pump();
    assert_eq!(ui.windows(), vec![window]);

    clock.advance(5);
    ui.pump();
    let tip = ui.top_window().unwrap();
    assert_ne!(tip, window);
    assert_eq!(ui.text(tip).as_deref(), Some("Save file"));
    assert_eq!(ui.rect(tip).map(|r| r.origin()), Some(Point::new(70, 111)));

    ui.pump();
    assert!(ui.is_visible(tip));
    assert_eq!(ui.focus(), Some(button));

    script.move_mouse(10, 10);
    ui.pump();
    assert!(!ui.is_window_open(tip));
    assert_eq!(ui.windows(), vec![window]);
}

#[test]
fn test_job_reports_progress_then_finishes() {
    let clock = ManualClock::new();
    let mut ui = Ui::new(UiConfig::new().with_job_poll_ticks(10)).with_clock(clock.clone());
    ui.new_manager().unwrap();
    let owner = ui.new_widget(WidgetKind::Widget).unwrap();
    let signals = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&signals);
    ui.add_hook_fn(owner, move |_, _, msg| {
        if let MessageKind::Signal { signal, .. } = msg.kind() {
            seen.borrow_mut().push(*signal);
        }
        Ok(false)
    })
    .unwrap();

    let job = Job::spawn(&mut ui, owner, |reporter| {
        reporter.update(0.5, "halfway");
    })
    .unwrap();
    assert!(ui.has_job(owner));
    assert!(job.join());

    clock.advance(10);
    ui.pump();
    assert_eq!(*signals.borrow(), vec![Signal::JobProgress, Signal::JobFinished]);
    assert!(!ui.has_job(owner));
}

#[test]
fn test_job_cancel_is_cooperative() {
    let mut ui = setup();
    let owner = ui.new_widget(WidgetKind::Widget).unwrap();
    let job = Job::spawn(&mut ui, owner, |reporter| {
        while !reporter.is_cancel_requested() {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
    })
    .unwrap();

    job.cancel();
    assert!(job.join());
}

#[test]
fn test_two_jobs_on_one_owner_finish_independently() {
    let clock = ManualClock::new();
    let mut ui = Ui::new(UiConfig::new().with_job_poll_ticks(10)).with_clock(clock.clone());
    ui.new_manager().unwrap();
    let owner = ui.new_widget(WidgetKind::Widget).unwrap();
    let finished = Rc::new(Cell::new(0));
    let seen = Rc::clone(&finished);
    ui.add_hook_fn(owner, move |_, _, msg| {
        if let MessageKind::Signal { signal: Signal::JobFinished, .. } = msg.kind() {
            seen.set(seen.get() + 1);
        }
        Ok(false)
    })
    .unwrap();

    let (release, gate) = std::sync::mpsc::channel::<()>();
    let fast = Job::spawn(&mut ui, owner, |_| {}).unwrap();
    let slow = Job::spawn(&mut ui, owner, move |_| {
        let _ = gate.recv();
    })
    .unwrap();

    assert!(fast.join());
    clock.advance(10);
    ui.pump();
    assert_eq!(finished.get(), 1);
    assert!(ui.has_job(owner));

    release.send(()).unwrap();
    assert!(slow.join());
    clock.advance(10);
    ui.pump();
    assert_eq!(finished.get(), 2);
    assert!(!ui.has_job(owner));

    // Both poll timers are gone.
    let fires = ui.stats().timer_fires;
    clock.advance(100);
    ui.pump();
    assert_eq!(ui.stats().timer_fires, fires);
}

#[test]
fn test_job_done_before_first_poll_is_reported() {
    let clock = ManualClock::new();
    let mut ui = Ui::new(UiConfig::new().with_job_poll_ticks(10)).with_clock(clock.clone());
    ui.new_manager().unwrap();
    let owner = ui.new_widget(WidgetKind::Widget).unwrap();
    let signals = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&signals);
    ui.add_hook_fn(owner, move |_, _, msg| {
        if let MessageKind::Signal { signal, .. } = msg.kind() {
            seen.borrow_mut().push(*signal);
        }
        Ok(false)
    })
    .unwrap();

    let job = Job::spawn(&mut ui, owner, |_| {}).unwrap();
    assert!(job.join());
    assert!(ui.has_job(owner));

    clock.advance(10);
    ui.pump();
    // Finishing forces progress to 1.0, which is reported first.
    assert_eq!(*signals.borrow(), vec![Signal::JobProgress, Signal::JobFinished]);
    assert!(!ui.has_job(owner));
    assert_eq!(ui.node(owner).unwrap().hook_count(), 1);
}

#[test]
fn test_job_spawn_on_freed_owner_fails_cleanly() {
    let mut ui = setup();
    let owner = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.free(owner).unwrap();

    let result = Job::spawn(&mut ui, owner, |_| {});
    assert_eq!(result.err(), Some(UiError::InvalidWidget));
}
