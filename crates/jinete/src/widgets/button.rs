//! Push buttons.

use jinete_core::{Borders, Point, Result};

use crate::Ui;
use crate::input::{KeyCode, MouseButtons};
use crate::logging::targets;
use crate::message::{Message, MessageKind, Signal};
use crate::widget::{Align, Hook, HookResult, HookTag, WidgetId, WidgetKind};

/// Built-in behavior of push buttons.
///
/// Pressing selects the button and captures the mouse; releasing over the
/// button activates it. Enter or Space activate a focused button.
///
/// Activation emits [`Signal::ButtonSelect`]. If nobody handles the signal,
/// the button closes its window and is reported as the window's killer,
/// which is how dialog buttons end a modal loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct ButtonHook;

impl ButtonHook {
    fn activate(ui: &mut Ui, widget: WidgetId) -> HookResult {
        tracing::trace!(target: targets::WIDGET, ?widget, "button activated");
        if ui.emit_signal(widget, Signal::ButtonSelect) {
            return Ok(true);
        }
        if let Some(window) = ui.window_of(widget)
            && ui.is_window_open(window)
        {
            ui.close_window(window, Some(widget))?;
        }
        Ok(true)
    }
}

impl Hook for ButtonHook {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        match msg.kind_mut() {
            MessageKind::Draw { rect, .. } => {
                let clip = *rect;
                let theme = ui.theme().clone();
                let font = ui.font();
                let node = ui.node(widget)?;
                let area = node.rect();
                let text = node.text().unwrap_or_default().to_owned();
                let face = if ui.is_selected(widget) {
                    theme.selected
                } else if ui.has_mouse(widget) {
                    theme.hot
                } else {
                    theme.face
                };
                let fg = if ui.is_enabled(widget) {
                    theme.text
                } else {
                    theme.disabled_text
                };
                let size = font.text_size(&text);
                let origin = Point::new(
                    area.x1 + (area.width() - size.width) / 2,
                    area.y1 + (area.height() - size.height) / 2,
                );
                let focused = ui.has_focus(widget);

                let surface = ui.surface();
                surface.fill_rect(clip, face);
                surface.draw_rect(area, theme.border);
                if focused {
                    surface.draw_rect(area.inset(2), theme.border);
                }
                surface.draw_text(&font, &text, origin, fg, None);
                Ok(true)
            }
            MessageKind::ButtonPressed(mouse) => {
                if !mouse.buttons.contains(MouseButtons::LEFT) || !ui.is_enabled(widget) {
                    return Ok(false);
                }
                ui.select(widget)?;
                ui.capture_mouse(widget)?;
                Ok(true)
            }
            MessageKind::Motion(mouse) => {
                if !ui.has_capture(widget) {
                    return Ok(false);
                }
                let inside = ui.rect(widget).is_some_and(|r| r.contains(mouse.pos()));
                if inside {
                    ui.select(widget)?;
                } else {
                    ui.deselect(widget)?;
                }
                Ok(true)
            }
            MessageKind::ButtonReleased(mouse) => {
                if !ui.has_capture(widget) {
                    return Ok(false);
                }
                let pos = mouse.pos();
                ui.release_mouse();
                let was_selected = ui.is_selected(widget);
                ui.deselect(widget)?;
                let inside = ui.rect(widget).is_some_and(|r| r.contains(pos));
                if was_selected && inside {
                    return Self::activate(ui, widget);
                }
                Ok(true)
            }
            MessageKind::Char(key) => {
                let activates = matches!(key.key, KeyCode::Enter | KeyCode::Space);
                if !activates || !ui.has_focus(widget) || !ui.is_enabled(widget) {
                    return Ok(false);
                }
                Self::activate(ui, widget)
            }
            _ => Ok(false),
        }
    }
}

impl Ui {
    /// Create a push button.
    pub fn new_button(&mut self, text: &str) -> Result<WidgetId> {
        let button = self.new_widget(WidgetKind::Button)?;
        let border = self.theme().button_border;
        let node = self.tree.node_mut(button)?;
        node.text = Some(text.to_owned());
        node.borders = Borders::uniform(border);
        node.align = Align::CENTER;
        self.set_focus_rest(button, true)?;
        self.add_hook(button, HookTag::Kind(WidgetKind::Button), ButtonHook)?;
        Ok(button)
    }
}
