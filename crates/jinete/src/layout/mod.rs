//! Layout: the size-request / set-position protocol.
//!
//! Layout is pull-based and runs in two passes:
//!
//! 1. **Request size**: [`Ui::request_size`](crate::Ui::request_size) sends
//!    [`MessageKind::ReqSize`](crate::message::MessageKind::ReqSize) to a
//!    widget, which asks its visible children and answers with its natural
//!    size, ignoring the space actually available.
//! 2. **Set position**: [`Ui::set_rect`](crate::Ui::set_rect) sends
//!    [`MessageKind::SetPos`](crate::message::MessageKind::SetPos) with the
//!    final rect; the widget stores it and places its children inside.
//!
//! Only the first hook that answers either message is consulted, so a
//! widget never computes its layout twice.
//!
//! # Built-in Layouts
//!
//! - [`BoxHook`]: horizontal and vertical boxes with expansive children
//!   and an optional homogeneous mode
//! - [`GridHook`]: cells in a fixed number of columns, with row and column
//!   spans, expanding strips and an optional same-width-columns mode
//!
//! # Example
//!
//! ```
//! use jinete::prelude::*;
//!
//! let mut ui = Ui::new(UiConfig::new());
//! let vbox = ui.new_vbox().unwrap();
//! ui.set_child_spacing(vbox, 2).unwrap();
//!
//! let a = ui.new_widget(WidgetKind::Widget).unwrap();
//! let b = ui.new_widget(WidgetKind::Widget).unwrap();
//! ui.set_min_size(a, Size::new(10, 10)).unwrap();
//! ui.set_min_size(b, Size::new(20, 5)).unwrap();
//! ui.add_child(vbox, a).unwrap();
//! ui.add_child(vbox, b).unwrap();
//!
//! assert_eq!(ui.request_size(vbox), Size::new(20, 17));
//! ui.set_rect(vbox, Rect::new(0, 0, 20, 17));
//! assert_eq!(ui.rect(b), Some(Rect::new(0, 12, 20, 17)));
//! ```

mod box_layout;
mod grid_layout;

pub use box_layout::{BoxHook, BoxItem, Orientation, box_arrange, box_request};
pub use grid_layout::{CellOptions, GridCell, GridHook, GridItem, grid_arrange, grid_request};
