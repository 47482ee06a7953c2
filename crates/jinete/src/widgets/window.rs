//! Top-level windows.

use jinete_core::{Borders, Point, Rect, Result, Size};

use crate::Ui;
use crate::draw::FontMetrics;
use crate::manager::WindowOptions;
use crate::message::{Message, MessageKind};
use crate::widget::{Hook, HookResult, HookTag, WidgetId, WidgetKind};

/// Height of the title bar for a font.
fn title_height(font: &FontMetrics) -> i32 {
    font.line_height + 4
}

/// Built-in behavior of windows: measuring the title, painting the frame
/// and dragging by the title bar.
#[derive(Debug, Default)]
pub struct WindowHook {
    /// Cursor offset from the window origin while dragging.
    drag: Option<Point>,
}

impl WindowHook {
    /// Create the hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the window is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn title_bar(ui: &Ui, widget: WidgetId) -> Option<Rect> {
        let options = ui.window_options(widget)?;
        if options.desktop {
            return None;
        }
        let rect = ui.rect(widget)?;
        let border = ui.theme().window_border;
        let font = ui.font();
        Some(Rect::new(
            rect.x1 + border,
            rect.y1 + border,
            rect.x2 - border,
            rect.y1 + border + title_height(&font),
        ))
    }
}

impl Hook for WindowHook {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        match msg.kind_mut() {
            MessageKind::ReqSize { width, height } => {
                let node = ui.node(widget)?;
                let borders = node.borders();
                let title = node.text().map(|t| ui.font().text_size(t)).unwrap_or_default();
                let mut content = Size::new(title.width, 0);
                for child in ui.children(widget) {
                    content = content.max(ui.request_size(child));
                }
                *width = content.width + borders.horizontal();
                *height = content.height + borders.vertical();
                Ok(true)
            }
            MessageKind::Draw { rect, .. } => {
                let clip = *rect;
                let theme = ui.theme().clone();
                let font = ui.font();
                let node = ui.node(widget)?;
                let area = node.rect();
                let title = node.text().map(str::to_owned);
                let desktop = ui.window_options(widget).is_some_and(|o| o.desktop);

                let surface = ui.surface();
                if desktop {
                    surface.fill_rect(clip, theme.desktop);
                    return Ok(true);
                }
                surface.fill_rect(clip, theme.face);
                surface.draw_rect(area, theme.border);
                if let Some(bar) = Self::title_bar(ui, widget) {
                    let surface = ui.surface();
                    surface.fill_rect(bar, theme.title_bar);
                    if let Some(title) = title {
                        let origin = Point::new(bar.x1 + 2, bar.y1 + 2);
                        surface.draw_text(&font, &title, origin, theme.title_text, None);
                    }
                }
                Ok(true)
            }
            MessageKind::ButtonPressed(mouse) => {
                let pos = mouse.pos();
                let moveable = ui.window_options(widget).is_some_and(|o| o.moveable);
                let on_title = Self::title_bar(ui, widget).is_some_and(|bar| bar.contains(pos));
                if !moveable || !on_title || ui.capture().is_some() {
                    return Ok(false);
                }
                let origin = ui.node(widget)?.rect().origin();
                self.drag = Some(Point::new(pos.x - origin.x, pos.y - origin.y));
                ui.hard_capture_mouse(widget)?;
                Ok(true)
            }
            MessageKind::Motion(mouse) => {
                let Some(offset) = self.drag else {
                    return Ok(false);
                };
                let pos = mouse.pos();
                ui.move_window(widget, pos.x - offset.x, pos.y - offset.y)?;
                Ok(true)
            }
            MessageKind::ButtonReleased(_) => {
                if self.drag.take().is_none() {
                    return Ok(false);
                }
                if ui.has_capture(widget) {
                    ui.release_mouse();
                }
                Ok(true)
            }
            MessageKind::Close => {
                self.drag = None;
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}

impl Ui {
    /// Create a regular window with a title bar.
    ///
    /// The window is hidden until opened.
    pub fn new_window(&mut self, title: &str) -> Result<WidgetId> {
        self.new_window_with(title, WindowOptions::new())
    }

    /// Create a desktop window covering the screen.
    pub fn new_desktop_window(&mut self) -> Result<WidgetId> {
        let window = self.new_window_with("", WindowOptions::new().with_desktop(true))?;
        let size = self.config().screen_size();
        self.set_rect(window, Rect::from_origin_size(0, 0, size.width, size.height));
        Ok(window)
    }

    /// Create a window with explicit options.
    pub fn new_window_with(&mut self, title: &str, options: WindowOptions) -> Result<WidgetId> {
        let window = self.new_widget(WidgetKind::Window)?;
        let borders = if options.desktop {
            Borders::ZERO
        } else {
            let border = self.theme().window_border;
            let font = self.font();
            Borders::new(border, border + title_height(&font), border, border)
        };
        self.make_window(window, options)?;
        let node = self.tree.node_mut(window)?;
        node.text = Some(title.to_owned());
        node.borders = borders;
        self.add_hook(window, HookTag::Kind(WidgetKind::Window), WindowHook::new())?;
        Ok(window)
    }
}
