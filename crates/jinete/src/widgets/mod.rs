//! Built-in widgets.
//!
//! Each widget is a [`WidgetKind`](crate::widget::WidgetKind) plus one
//! kind-tagged hook carrying its behavior. Constructors live on
//! [`Ui`](crate::Ui): [`Ui::new_window`](crate::Ui::new_window),
//! [`Ui::new_button`](crate::Ui::new_button),
//! [`Ui::new_vbox`](crate::Ui::new_vbox) and friends.
//!
//! Tooltips are not a widget: [`TooltipHook`] composes onto any widget next
//! to its own hooks.

mod button;
mod tooltip;
mod window;

pub use button::ButtonHook;
pub use tooltip::TooltipHook;
pub use window::WindowHook;
