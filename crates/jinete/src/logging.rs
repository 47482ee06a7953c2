//! Logging and debugging utilities.
//!
//! Target and span names live in [`jinete_core::logging`] and are
//! re-exported here. This module adds a widget tree formatter for
//! inspecting a hierarchy at runtime.
//!
//! # Widget Tree Debugging
//!
//! ```
//! use jinete::prelude::*;
//! use jinete::logging::{TreeFormatOptions, TreeStyle, WidgetTreeDebug};
//!
//! let mut ui = Ui::new(UiConfig::new());
//! let vbox = ui.new_vbox().unwrap();
//! let button = ui.new_button("OK").unwrap();
//! ui.set_name(button, "ok").unwrap();
//! ui.add_child(vbox, button).unwrap();
//!
//! let debug = WidgetTreeDebug::with_options(TreeFormatOptions {
//!     style: TreeStyle::Ascii,
//!     ..TreeFormatOptions::minimal()
//! });
//! let text = debug.format_subtree(ui.tree(), vbox);
//! assert!(text.contains("ok"));
//! ```

use std::fmt::Write;

pub use jinete_core::logging::{span_names, targets};

use crate::widget::{WidgetId, WidgetTree};

/// Style options for widget tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for widget tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show widget ids.
    pub show_ids: bool,
    /// Whether to show widget kinds.
    pub show_kinds: bool,
    /// Whether to show state flags.
    pub show_flags: bool,
    /// Whether to show rects.
    pub show_rects: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_kinds: true,
            show_flags: false,
            show_rects: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Everything, flags included.
    pub fn detailed() -> Self {
        Self {
            show_flags: true,
            ..Default::default()
        }
    }

    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_kinds: false,
            show_flags: false,
            show_rects: false,
            ..Default::default()
        }
    }
}

/// Renders a widget subtree as text.
#[derive(Debug, Clone, Default)]
pub struct WidgetTreeDebug {
    options: TreeFormatOptions,
}

impl WidgetTreeDebug {
    /// A formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`, one widget per line.
    ///
    /// Unknown ids produce an empty string.
    pub fn format_subtree(&self, tree: &WidgetTree, root: WidgetId) -> String {
        let mut output = String::new();
        self.format_into(tree, root, 0, true, &mut output);
        output
    }

    fn format_into(
        &self,
        tree: &WidgetTree,
        id: WidgetId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(node) = tree.get(id) else {
            return;
        };

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(node.name().unwrap_or("(unnamed)"));
        // Writing to a String cannot fail.
        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_kinds {
            let _ = write!(output, " ({})", node.kind());
        }
        if self.options.show_rects {
            let r = node.rect();
            let _ = write!(output, " {},{} {}x{}", r.x1, r.y1, r.width(), r.height());
        }
        if self.options.show_flags {
            let _ = write!(output, " {:?}", node.flags());
        }
        output.push('\n');

        let children = node.children();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(tree, child, depth + 1, i + 1 == children.len(), output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }
        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "- ", "- "),
        };
        let mut prefix = String::new();
        for _ in 0..depth - 1 {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix
    }
}
