//! Built-in behavior of manager widgets.

use jinete_core::Size;

use super::Ui;
use crate::input::KeyCode;
use crate::message::{Message, MessageKind};
use crate::widget::{Hook, HookResult, WidgetId};

/// Paints the desktop, moves focus on Tab and arrow keys, and keeps windows
/// in place relative to a sub-manager that moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManagerHook;

impl Hook for ManagerHook {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        let shift = msg.modifiers().shift;
        match msg.kind_mut() {
            MessageKind::Draw { rect, .. } => {
                let color = ui.theme().desktop;
                ui.surface().fill_rect(*rect, color);
                Ok(true)
            }
            MessageKind::Char(key) => {
                let key = key.key;
                match key {
                    KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                        Ok(ui.move_focus(key, shift))
                    }
                    _ => Ok(false),
                }
            }
            MessageKind::ReqSize { width, height } => {
                let borders = ui.node(widget)?.borders();
                let mut size = Size::ZERO;
                for window in ui.children(widget) {
                    size = size.max(ui.request_size(window));
                }
                *width = size.width + borders.horizontal();
                *height = size.height + borders.vertical();
                Ok(true)
            }
            MessageKind::SetPos { rect } => {
                let rect = *rect;
                let old = ui.node(widget)?.rect();
                ui.store_rect(widget, rect);
                let (dx, dy) = (rect.x1 - old.x1, rect.y1 - old.y1);
                if dx != 0 || dy != 0 {
                    for window in ui.children(widget) {
                        if let Some(window_rect) = ui.rect(window) {
                            ui.set_rect(window, window_rect.translate(dx, dy));
                        }
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
