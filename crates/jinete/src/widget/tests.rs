//! Tests for the widget system.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use jinete_core::{Size, UiError};

use super::*;
use crate::message::{Message, MessageKind, Signal};
use crate::{Ui, UiConfig};

fn setup() -> Ui {
    Ui::new(UiConfig::new())
}

/// A hook counting the messages of one type, consuming them or not.
fn counter(
    ui: &mut Ui,
    widget: WidgetId,
    msg_type: crate::message::MessageType,
    consume: bool,
) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    ui.add_hook_fn(widget, move |_, _, msg| {
        if msg.message_type() == msg_type {
            seen.set(seen.get() + 1);
            return Ok(consume);
        }
        Ok(false)
    })
    .unwrap();
    count
}

#[test]
fn test_widget_creation() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();

    assert!(ui.is_alive(widget));
    assert!(ui.is_visible(widget));
    assert!(ui.is_enabled(widget));
    assert!(!ui.has_focus(widget));
    assert_eq!(ui.parent(widget), None);
    assert_eq!(ui.kind(widget), Some(WidgetKind::Widget));
    assert_eq!(ui.node(widget).unwrap().hook_count(), 0);
}

#[test]
fn test_stale_id_never_aliases() {
    let mut ui = setup();
    let old = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.free(old).unwrap();
    let new = ui.new_widget(WidgetKind::Widget).unwrap();

    assert_ne!(old, new);
    assert!(!ui.is_alive(old));
    assert!(ui.is_alive(new));
    assert_eq!(ui.node(old).err(), Some(UiError::InvalidWidget));
    assert_eq!(ui.free(old), Err(UiError::InvalidWidget));
}

#[test]
fn test_raw_id_round_trip() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Button).unwrap();
    assert_eq!(WidgetId::from_raw(widget.as_raw()), widget);
}

#[test]
fn test_widget_limit() {
    let mut ui = Ui::new(UiConfig::new().with_widget_limit(2));
    ui.new_widget(WidgetKind::Widget).unwrap();
    ui.new_widget(WidgetKind::Widget).unwrap();
    assert_eq!(
        ui.new_widget(WidgetKind::Widget),
        Err(UiError::OutOfMemory { limit: 2 })
    );
}

#[test]
fn test_hierarchy() {
    let mut ui = setup();
    let parent = ui.new_widget(WidgetKind::Box).unwrap();
    let a = ui.new_widget(WidgetKind::Widget).unwrap();
    let b = ui.new_widget(WidgetKind::Widget).unwrap();
    let c = ui.new_widget(WidgetKind::Widget).unwrap();

    ui.add_child(parent, a).unwrap();
    ui.add_child(parent, b).unwrap();
    ui.insert_child(parent, c, 0).unwrap();
    assert_eq!(ui.children(parent), vec![c, a, b]);

    ui.remove_child(parent, c).unwrap();
    assert_eq!(ui.parent(c), None);
    assert!(ui.is_alive(c));

    ui.replace_child(a, c).unwrap();
    assert_eq!(ui.children(parent), vec![c, b]);
    assert_eq!(ui.remove_child(parent, a), Err(UiError::InvalidWidget));
}

#[test]
fn test_circular_parentage() {
    let mut ui = setup();
    let parent = ui.new_widget(WidgetKind::Box).unwrap();
    let child = ui.new_widget(WidgetKind::Box).unwrap();
    ui.add_child(parent, child).unwrap();

    assert_eq!(ui.add_child(child, parent), Err(UiError::CircularParentage));
    assert_eq!(ui.add_child(parent, parent), Err(UiError::CircularParentage));
}

#[test]
fn test_find_by_name() {
    let mut ui = setup();
    let parent = ui.new_widget(WidgetKind::Box).unwrap();
    let child = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.add_child(parent, child).unwrap();
    ui.set_name(child, "target").unwrap();

    assert_eq!(ui.find_by_name(parent, "target"), Some(child));
    assert_eq!(ui.find_by_name(parent, "missing"), None);
}

#[test]
fn test_first_responder_wins_for_size_requests() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let first = counter(&mut ui, widget, crate::message::MessageType::ReqSize, true);
    let second = counter(&mut ui, widget, crate::message::MessageType::ReqSize, true);

    ui.request_size(widget);
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 0);
}

#[test]
fn test_other_messages_reach_every_hook() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let first = counter(&mut ui, widget, crate::message::MessageType::MouseEnter, true);
    let second = counter(&mut ui, widget, crate::message::MessageType::MouseEnter, true);

    let mut msg = Message::to(MessageKind::MouseEnter, widget);
    assert!(ui.send_message(widget, &mut msg));
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 1);
}

#[test]
fn test_failing_hook_is_skipped() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.add_hook_fn(widget, |_, _, _| Err(HookError::Failed("boom".into())))
        .unwrap();
    let after = counter(&mut ui, widget, crate::message::MessageType::User, true);

    let mut msg = Message::to(
        MessageKind::User {
            id: 7,
            payload: None,
        },
        widget,
    );
    assert!(ui.send_message(widget, &mut msg));
    assert_eq!(after.get(), 1);
    assert_eq!(ui.stats().hook_failures, 1);
}

#[test]
fn test_kind_tagged_hook_only_runs_on_its_kind() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    ui.add_hook(
        widget,
        HookTag::Kind(WidgetKind::Button),
        FnHook::new(move |_, _, _| {
            seen.set(seen.get() + 1);
            Ok(true)
        }),
    )
    .unwrap();

    let mut msg = Message::to(MessageKind::MouseEnter, widget);
    ui.send_message(widget, &mut msg);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_remove_hooks_by_tag() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.add_hook(widget, HookTag::Named("extra"), FnHook::new(|_, _, _| Ok(false)))
        .unwrap();
    ui.add_hook(widget, HookTag::Named("extra"), FnHook::new(|_, _, _| Ok(false)))
        .unwrap();
    ui.add_hook_fn(widget, |_, _, _| Ok(false)).unwrap();

    assert!(ui.node(widget).unwrap().has_hook(HookTag::Named("extra")));
    assert_eq!(ui.remove_hooks(widget, HookTag::Named("extra")), Ok(2));
    assert_eq!(ui.node(widget).unwrap().hook_count(), 1);
}

#[test]
fn test_remove_hook_by_id_leaves_same_tag_alone() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let first = ui.reserve_hook_id();
    let second = ui.reserve_hook_id();
    assert_ne!(first, second);
    ui.insert_hook(widget, first, HookTag::Named("extra"), FnHook::new(|_, _, _| Ok(false)))
        .unwrap();
    ui.insert_hook(widget, second, HookTag::Named("extra"), FnHook::new(|_, _, _| Ok(false)))
        .unwrap();

    assert_eq!(ui.remove_hook(widget, first), Ok(true));
    assert_eq!(ui.remove_hook(widget, first), Ok(false));
    assert!(ui.node(widget).unwrap().has_hook(HookTag::Named("extra")));
    assert_eq!(ui.node(widget).unwrap().hook_count(), 1);
}

#[test]
fn test_hook_removing_itself_is_not_called_again() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let id = ui.reserve_hook_id();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let hook = FnHook::new(move |ui: &mut Ui, widget: WidgetId, _: &mut Message| {
        seen.set(seen.get() + 1);
        ui.remove_hook(widget, id)?;
        Ok(false)
    });
    ui.insert_hook(widget, id, HookTag::Any, hook).unwrap();

    for _ in 0..2 {
        let mut msg = ui.new_message(MessageKind::Idle);
        msg.add_dest(widget);
        ui.send_message(widget, &mut msg);
    }
    assert_eq!(calls.get(), 1);
    assert_eq!(ui.node(widget).unwrap().hook_count(), 0);
}

#[test]
fn test_with_hook_downcasts() {
    let mut ui = setup();
    let vbox = ui.new_vbox().unwrap();
    let plain = ui.new_widget(WidgetKind::Widget).unwrap();

    assert!(ui.set_homogeneous(vbox, true));
    assert_eq!(
        ui.with_hook::<crate::layout::BoxHook, _>(vbox, |hook| hook.homogeneous),
        Some(true)
    );
    assert!(!ui.set_homogeneous(plain, true));
}

#[test]
fn test_destroy_children_first() {
    let mut ui = setup();
    let parent = ui.new_widget(WidgetKind::Box).unwrap();
    let a = ui.new_widget(WidgetKind::Box).unwrap();
    let b = ui.new_widget(WidgetKind::Widget).unwrap();
    let c = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.add_child(parent, a).unwrap();
    ui.add_child(parent, b).unwrap();
    ui.add_child(a, c).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    for widget in [parent, a, b, c] {
        let log = Rc::clone(&log);
        ui.add_hook_fn(widget, move |_, w, msg| {
            if matches!(msg.kind(), MessageKind::Destroy) {
                log.borrow_mut().push(w);
            }
            Ok(false)
        })
        .unwrap();
    }

    ui.free(parent).unwrap();
    assert_eq!(*log.borrow(), vec![c, a, b, parent]);
    for widget in [parent, a, b, c] {
        assert!(!ui.is_alive(widget));
    }
}

#[test]
fn test_free_from_own_hook_is_deferred() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let alive_inside = Rc::new(Cell::new(false));
    let seen = Rc::clone(&alive_inside);
    ui.add_hook_fn(widget, move |ui, w, msg| {
        if matches!(msg.kind(), MessageKind::User { .. }) {
            ui.free(w)?;
            seen.set(ui.is_alive(w));
            return Ok(true);
        }
        Ok(false)
    })
    .unwrap();

    let mut msg = Message::to(
        MessageKind::User {
            id: 1,
            payload: None,
        },
        widget,
    );
    ui.send_message(widget, &mut msg);
    assert!(alive_inside.get());
    assert!(!ui.is_alive(widget));
}

#[test]
fn test_free_removes_timers() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let timer = ui.add_timer(widget, 10).unwrap();
    ui.start_timer(timer).unwrap();

    ui.free(widget).unwrap();
    assert!(!ui.is_timer_running(timer));
    assert_eq!(ui.start_timer(timer), Err(UiError::InvalidTimer));
}

#[test]
fn test_muted_signals() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    let signals = counter(&mut ui, widget, crate::message::MessageType::Signal, true);

    assert!(ui.emit_signal(widget, Signal::Custom(1)));
    ui.signal_off(widget).unwrap();
    ui.signal_off(widget).unwrap();
    assert!(!ui.emit_signal(widget, Signal::Custom(1)));
    ui.signal_on(widget).unwrap();
    assert!(!ui.signals_enabled(widget));
    ui.signal_on(widget).unwrap();
    assert!(ui.emit_signal(widget, Signal::Custom(1)));
    assert_eq!(signals.get(), 2);
}

#[test]
fn test_unhandled_signal_reaches_window() {
    let mut ui = setup();
    let window = ui.new_window("Signals").unwrap();
    let inner = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.add_child(window, inner).unwrap();

    let from = Rc::new(Cell::new(None));
    let seen = Rc::clone(&from);
    ui.add_hook_fn(window, move |_, _, msg| {
        if let Some((Signal::Custom(3), source)) = msg.signal() {
            seen.set(Some(source));
            return Ok(true);
        }
        Ok(false)
    })
    .unwrap();

    assert!(ui.emit_signal(inner, Signal::Custom(3)));
    assert_eq!(from.get(), Some(inner));
}

#[test]
fn test_hide_releases_focus() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.set_focus_rest(widget, true).unwrap();
    ui.set_focus(Some(widget));
    assert_eq!(ui.focus(), Some(widget));
    assert!(ui.has_focus(widget));

    ui.hide(widget).unwrap();
    assert_eq!(ui.focus(), None);
    assert!(!ui.has_focus(widget));
    assert!(!ui.is_visible(widget));
}

#[test]
fn test_focus_refused_without_focus_rest() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.set_focus(Some(widget));
    assert_eq!(ui.focus(), None);

    ui.set_focus_rest(widget, true).unwrap();
    ui.disable(widget).unwrap();
    ui.set_focus(Some(widget));
    assert_eq!(ui.focus(), None);
}

#[test]
fn test_request_size_respects_minimum() {
    let mut ui = setup();
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.set_text(widget, "abc").unwrap();
    assert_eq!(ui.request_size(widget), Size::new(24, 8));

    ui.set_min_size(widget, Size::new(40, 4)).unwrap();
    assert_eq!(ui.request_size(widget), Size::new(40, 8));
}

#[test]
fn test_flags() {
    let mut flags = WidgetFlags::HIDDEN | WidgetFlags::DIRTY;
    assert!(flags.contains(WidgetFlags::HIDDEN));
    assert!(flags.intersects(WidgetFlags::DIRTY | WidgetFlags::SELECTED));
    flags.remove(WidgetFlags::HIDDEN);
    flags.set(WidgetFlags::EXPANSIVE, true);
    assert_eq!(format!("{flags:?}"), "[expansive|dirty]");
    assert_eq!(WidgetFlags::empty().bits(), 0);
}
