//! Tooltips, composable onto any widget.
//!
//! ```
//! use jinete::prelude::*;
//!
//! let mut ui = Ui::new(UiConfig::new());
//! let button = ui.new_button("Save").unwrap();
//! ui.set_tooltip(button, "Write the file to disk").unwrap();
//! assert!(ui.node(button).unwrap().has_hook(HookTag::Named(TooltipHook::TAG)));
//! ```

use jinete_core::{Borders, Point, Result, TimerId};

use crate::Ui;
use crate::logging::targets;
use crate::manager::WindowOptions;
use crate::message::{Message, MessageKind};
use crate::widget::{Hook, HookResult, HookTag, WidgetFlags, WidgetId, WidgetKind};

/// Distance between the cursor and the tooltip window.
const CURSOR_OFFSET: i32 = 16;

/// Opens a small background window with a text after the mouse rests on
/// the widget for the configured delay. Leaving or clicking closes it.
///
/// The hook only observes; the widget's own hooks still see every message.
#[derive(Debug)]
pub struct TooltipHook {
    text: String,
    timer: Option<TimerId>,
    window: Option<WidgetId>,
}

impl TooltipHook {
    /// Tag used to attach and remove the hook.
    pub const TAG: &'static str = "tooltip";

    /// Create a tooltip with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timer: None,
            window: None,
        }
    }

    /// The tooltip text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The tooltip window, once created.
    pub fn window(&self) -> Option<WidgetId> {
        self.window
    }

    fn show(&mut self, ui: &mut Ui) -> Result<()> {
        let window = match self.window.filter(|&w| ui.is_alive(w)) {
            Some(window) => window,
            None => {
                let window = ui.new_tooltip_window(&self.text)?;
                self.window = Some(window);
                window
            }
        };
        if ui.is_window_open(window) {
            return Ok(());
        }
        ui.remap_window(window)?;
        let pos = ui.mouse_pos();
        ui.move_window(window, pos.x, pos.y + CURSOR_OFFSET)?;
        ui.open_window_bg(window)?;
        tracing::trace!(target: targets::WIDGET, ?window, "tooltip shown");
        Ok(())
    }

    fn hide(&mut self, ui: &mut Ui) -> Result<()> {
        if let Some(timer) = self.timer {
            ui.stop_timer(timer)?;
        }
        if let Some(window) = self.window
            && ui.is_window_open(window)
        {
            ui.close_window(window, None)?;
        }
        Ok(())
    }
}

impl Hook for TooltipHook {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        match msg.kind() {
            MessageKind::MouseEnter => {
                let timer = match self.timer {
                    Some(timer) => timer,
                    None => {
                        let delay = ui.config().tooltip_delay_ticks();
                        let timer = ui.add_timer(widget, delay)?;
                        self.timer = Some(timer);
                        timer
                    }
                };
                ui.start_timer(timer)?;
                Ok(false)
            }
            MessageKind::Timer { timer, .. } if Some(*timer) == self.timer => {
                ui.stop_timer(*timer)?;
                self.show(ui)?;
                Ok(true)
            }
            MessageKind::MouseLeave | MessageKind::ButtonPressed(_) => {
                self.hide(ui)?;
                Ok(false)
            }
            MessageKind::Destroy => {
                if let Some(timer) = self.timer.take()
                    && let Err(err) = ui.remove_timer(timer)
                {
                    tracing::trace!(target: targets::WIDGET, ?timer, error = %err, "tooltip timer already gone");
                }
                if let Some(window) = self.window.take()
                    && ui.is_alive(window)
                {
                    ui.free(window)?;
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}

/// Paints a tooltip window.
#[derive(Debug, Default, Clone, Copy)]
struct TooltipWindowHook;

impl Hook for TooltipWindowHook {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        let MessageKind::Draw { rect, .. } = msg.kind() else {
            return Ok(false);
        };
        let clip = *rect;
        let theme = ui.theme().clone();
        let font = ui.font();
        let node = ui.node(widget)?;
        let area = node.rect();
        let inner = node.child_rect();
        let text = node.text().unwrap_or_default().to_owned();

        let surface = ui.surface();
        surface.fill_rect(clip, theme.tooltip_face);
        surface.draw_rect(area, theme.border);
        surface.draw_text(&font, &text, Point::new(inner.x1, inner.y1), theme.text, None);
        Ok(true)
    }
}

impl Ui {
    /// Attach a tooltip to a widget, replacing any previous one.
    pub fn set_tooltip(&mut self, widget: WidgetId, text: &str) -> Result<()> {
        self.remove_hooks(widget, HookTag::Named(TooltipHook::TAG))?;
        self.add_hook(widget, HookTag::Named(TooltipHook::TAG), TooltipHook::new(text))
    }

    /// Create the untitled, on-top window used by tooltips.
    pub fn new_tooltip_window(&mut self, text: &str) -> Result<WidgetId> {
        let options = WindowOptions::new()
            .with_ontop(true)
            .with_wantfocus(false)
            .with_moveable(false);
        let window = self.new_widget(WidgetKind::Window)?;
        self.make_window(window, options)?;
        let border = self.theme().tooltip_border;
        let node = self.tree.node_mut(window)?;
        node.text = Some(text.to_owned());
        node.borders = Borders::uniform(border);
        node.flags.remove(WidgetFlags::FOCUS_REST);
        self.add_hook(window, HookTag::Kind(WidgetKind::Window), TooltipWindowHook)?;
        Ok(window)
    }
}
