//! Grid layout: children in cells of a fixed number of columns.
//!
//! Cells are filled left to right, top to bottom; a cell may span several
//! columns and rows. Each row and column ("strip") counts the cells over it
//! that want extra space. Leftover space goes to the strips with the
//! highest count, the last of them taking the division remainder.

use jinete_core::{Borders, Rect, Result, Size, UiError};

use super::box_layout::{Orientation, total_spacing};
use crate::Ui;
use crate::logging::targets;
use crate::message::{Message, MessageKind};
use crate::widget::{HAlign, Hook, HookResult, HookTag, VAlign, WidgetFlags, WidgetId, WidgetKind};

/// How a child is placed in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOptions {
    /// Columns covered by the cell.
    pub col_span: usize,
    /// Rows covered by the cell.
    pub row_span: usize,
    /// The columns under the cell want leftover width.
    pub expand_h: bool,
    /// The rows under the cell want leftover height.
    pub expand_v: bool,
    /// Horizontal placement inside the cell; `None` fills it.
    pub halign: Option<HAlign>,
    /// Vertical placement inside the cell; `None` fills it.
    pub valign: Option<VAlign>,
}

impl Default for CellOptions {
    fn default() -> Self {
        Self {
            col_span: 1,
            row_span: 1,
            expand_h: false,
            expand_v: false,
            halign: None,
            valign: None,
        }
    }
}

impl CellOptions {
    /// A 1x1 cell that fills its area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cover `cols` columns and `rows` rows (at least one of each).
    pub fn with_span(mut self, cols: usize, rows: usize) -> Self {
        self.col_span = cols.max(1);
        self.row_span = rows.max(1);
        self
    }

    /// Ask for leftover width and/or height.
    pub fn with_expand(mut self, horizontal: bool, vertical: bool) -> Self {
        self.expand_h = horizontal;
        self.expand_v = vertical;
        self
    }

    /// Keep the child at its requested size, aligned inside the cell.
    pub fn with_align(mut self, halign: Option<HAlign>, valign: Option<VAlign>) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }
}

/// A placed cell: its top-left column and row plus its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Leftmost column.
    pub col: usize,
    /// Top row.
    pub row: usize,
    /// Spans, expansion and alignment.
    pub options: CellOptions,
}

impl GridCell {
    fn start(&self, axis: Orientation) -> usize {
        match axis {
            Orientation::Horizontal => self.col,
            Orientation::Vertical => self.row,
        }
    }

    fn span(&self, axis: Orientation) -> usize {
        match axis {
            Orientation::Horizontal => self.options.col_span,
            Orientation::Vertical => self.options.row_span,
        }
    }

    fn expands(&self, axis: Orientation) -> bool {
        match axis {
            Orientation::Horizontal => self.options.expand_h,
            Orientation::Vertical => self.options.expand_v,
        }
    }

    fn overlaps(&self, other: &GridCell) -> bool {
        self.col < other.col + other.options.col_span
            && other.col < self.col + self.options.col_span
            && self.row < other.row + other.options.row_span
            && other.row < self.row + self.options.row_span
    }
}

/// A visible cell as seen by the grid arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridItem {
    /// Where the child sits.
    pub cell: GridCell,
    /// The child's requested size.
    pub size: Size,
}

/// One row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Strip {
    size: i32,
    /// Cells over the strip that want leftover space.
    expand_count: usize,
}

/// Split `amount` in `parts` equal shares, the last one taking the remainder.
fn shares(amount: i32, parts: usize) -> impl Iterator<Item = i32> {
    let count = i32::try_from(parts).unwrap_or(i32::MAX).max(1);
    let each = amount / count;
    (0..parts).map(move |i| {
        if i + 1 == parts {
            amount - each * (count - 1)
        } else {
            each
        }
    })
}

/// Length of a run of strips; empty strips take no spacing.
fn strips_length(strips: &[Strip], spacing: i32) -> i32 {
    let used = strips.iter().filter(|s| s.size > 0).count();
    strips.iter().map(|s| s.size).sum::<i32>() + total_spacing(spacing, used)
}

fn span_length(strips: &[Strip], start: usize, span: usize, spacing: i32) -> i32 {
    let end = (start + span).min(strips.len());
    strips
        .get(start..end)
        .map_or(0, |covered| strips_length(covered, spacing))
}

/// Natural strip sizes along one axis.
///
/// Cells are handled by increasing span; a cell only grows its strips by
/// what they lack, preferring the strips most wanted by expanding cells.
fn natural_strips(
    axis: Orientation,
    count: usize,
    spacing: i32,
    items: &[GridItem],
) -> Vec<Strip> {
    let mut strips = vec![Strip::default(); count];
    for item in items.iter().filter(|item| item.cell.expands(axis)) {
        let start = item.cell.start(axis);
        for strip in strips.iter_mut().skip(start).take(item.cell.span(axis)) {
            strip.expand_count += 1;
        }
    }

    let widest = items.iter().map(|item| item.cell.span(axis)).max().unwrap_or(0);
    for span in 1..=widest {
        for item in items.iter().filter(|item| item.cell.span(axis) == span) {
            let start = item.cell.start(axis);
            let end = (start + span).min(count);
            let Some(covered) = strips.get_mut(start..end) else {
                continue;
            };
            let have: i32 = covered.iter().map(|s| s.size).sum();
            let need = axis.main(item.size) - total_spacing(spacing, span) - have;
            if need <= 0 {
                continue;
            }
            let most = covered.iter().map(|s| s.expand_count).max().unwrap_or(0);
            let takers = covered.iter().filter(|s| s.expand_count == most).count();
            for (strip, extra) in covered
                .iter_mut()
                .filter(|s| s.expand_count == most)
                .zip(shares(need, takers))
            {
                strip.size += extra;
            }
        }
    }
    strips
}

fn row_count(items: &[GridItem]) -> usize {
    items
        .iter()
        .map(|item| item.cell.row + item.cell.options.row_span)
        .max()
        .unwrap_or(0)
}

fn natural_grid(
    columns: usize,
    same_width_columns: bool,
    spacing: i32,
    items: &[GridItem],
) -> (Vec<Strip>, Vec<Strip>) {
    let mut cols = natural_strips(Orientation::Horizontal, columns, spacing, items);
    let rows = natural_strips(Orientation::Vertical, row_count(items), spacing, items);
    if same_width_columns {
        let widest = cols.iter().map(|s| s.size).max().unwrap_or(0);
        for strip in &mut cols {
            strip.size = widest;
        }
    }
    (cols, rows)
}

fn wants_more(strip: &Strip, most: usize, all: bool) -> bool {
    all || strip.expand_count == most
}

/// Give the slack of `available` to the strips that want it.
///
/// With `all` set every strip takes a share.
fn distribute(strips: &mut [Strip], available: i32, spacing: i32, all: bool) {
    let most = strips.iter().map(|s| s.expand_count).max().unwrap_or(0);
    let takers = strips.iter().filter(|s| wants_more(s, most, all)).count();
    if takers == 0 {
        return;
    }
    let mut extra = available - strips_length(strips, spacing);
    // A growing empty strip adds one more gap.
    let opened = strips
        .iter()
        .filter(|s| s.size == 0 && wants_more(s, most, all))
        .count();
    extra -= spacing.saturating_mul(i32::try_from(opened).unwrap_or(i32::MAX));
    if extra <= 0 {
        return;
    }
    for (strip, share) in strips
        .iter_mut()
        .filter(|s| wants_more(s, most, all))
        .zip(shares(extra, takers))
    {
        strip.size += share;
    }
}

/// Start of each strip, from `origin`.
fn strip_positions(strips: &[Strip], origin: i32, spacing: i32) -> Vec<i32> {
    let mut cursor = origin;
    strips
        .iter()
        .map(|strip| {
            let position = cursor;
            if strip.size > 0 {
                cursor += strip.size + spacing;
            }
            position
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Start,
    Center,
    End,
}

impl From<HAlign> for Placement {
    fn from(align: HAlign) -> Self {
        match align {
            HAlign::Left => Self::Start,
            HAlign::Center => Self::Center,
            HAlign::Right => Self::End,
        }
    }
}

impl From<VAlign> for Placement {
    fn from(align: VAlign) -> Self {
        match align {
            VAlign::Top => Self::Start,
            VAlign::Middle => Self::Center,
            VAlign::Bottom => Self::End,
        }
    }
}

/// Position and length of a child of length `wanted` in a cell.
fn fit(position: i32, length: i32, wanted: i32, placement: Option<Placement>) -> (i32, i32) {
    match placement {
        None => (position, length),
        Some(Placement::Start) => (position, wanted),
        Some(Placement::Center) => (position + length / 2 - wanted / 2, wanted),
        Some(Placement::End) => (position + length - wanted, wanted),
    }
}

/// Natural size of a grid holding the given visible cells.
///
/// Strips with no visible cell take no room and no spacing. Borders are
/// added on both axes.
pub fn grid_request(
    columns: usize,
    same_width_columns: bool,
    spacing: i32,
    borders: Borders,
    items: &[GridItem],
) -> Size {
    let (cols, rows) = natural_grid(columns, same_width_columns, spacing, items);
    Size::new(
        strips_length(&cols, spacing) + borders.horizontal(),
        strips_length(&rows, spacing) + borders.vertical(),
    )
    .clamped()
}

/// Child rects of a grid whose content area is `inner`, in `items` order.
///
/// When nothing asks to expand on an axis every strip of that axis
/// shares the slack. With same-width columns every column always does.
pub fn grid_arrange(
    columns: usize,
    same_width_columns: bool,
    spacing: i32,
    inner: Rect,
    items: &[GridItem],
) -> Vec<Rect> {
    let (mut cols, mut rows) = natural_grid(columns, same_width_columns, spacing, items);
    distribute(&mut cols, inner.width(), spacing, same_width_columns);
    distribute(&mut rows, inner.height(), spacing, false);
    let xs = strip_positions(&cols, inner.x1, spacing);
    let ys = strip_positions(&rows, inner.y1, spacing);

    items
        .iter()
        .map(|item| {
            let cell = &item.cell;
            let options = &cell.options;
            let x = xs.get(cell.col).copied().unwrap_or(inner.x1);
            let y = ys.get(cell.row).copied().unwrap_or(inner.y1);
            let width = span_length(&cols, cell.col, options.col_span, spacing);
            let height = span_length(&rows, cell.row, options.row_span, spacing);
            let (x, width) = fit(x, width, item.size.width, options.halign.map(Placement::from));
            let (y, height) =
                fit(y, height, item.size.height, options.valign.map(Placement::from));
            Rect::from_origin_size(x, y, width.max(0), height.max(0))
        })
        .collect()
}

/// Built-in behavior of grid widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridHook {
    columns: usize,
    /// Give every column the width of the widest one.
    pub same_width_columns: bool,
    cells: Vec<(WidgetId, GridCell)>,
}

impl GridHook {
    /// A grid with `columns` columns (at least one).
    pub fn new(columns: usize, same_width_columns: bool) -> Self {
        Self {
            columns: columns.max(1),
            same_width_columns,
            cells: Vec::new(),
        }
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows in use.
    pub fn rows(&self) -> usize {
        self.cells
            .iter()
            .map(|(_, cell)| cell.row + cell.options.row_span)
            .max()
            .unwrap_or(0)
    }

    /// The cell holding `child`.
    pub fn cell_of(&self, child: WidgetId) -> Option<GridCell> {
        self.cells
            .iter()
            .find(|(c, _)| *c == child)
            .map(|&(_, cell)| cell)
    }

    fn is_free(&self, cell: &GridCell) -> bool {
        cell.col + cell.options.col_span <= self.columns
            && !self.cells.iter().any(|(_, other)| other.overlaps(cell))
    }

    /// Put `child` in the first free cell that fits its spans, adding a
    /// row when none does. Column spans are clipped to the grid width.
    pub fn place(&mut self, child: WidgetId, options: CellOptions) -> GridCell {
        self.cells.retain(|(c, _)| *c != child);
        let options = CellOptions {
            col_span: options.col_span.clamp(1, self.columns),
            row_span: options.row_span.max(1),
            ..options
        };
        let columns = self.columns;
        let rows = self.rows();
        let cell = (0..=rows)
            .flat_map(move |row| (0..columns).map(move |col| GridCell { col, row, options }))
            .find(|cell| self.is_free(cell))
            .unwrap_or(GridCell {
                col: 0,
                row: rows,
                options,
            });
        self.cells.push((child, cell));
        cell
    }

    /// Forget children that left the grid and give a 1x1 cell to those
    /// added with a plain [`Ui::add_child`].
    fn sync(&mut self, children: &[WidgetId]) {
        self.cells.retain(|(c, _)| children.contains(c));
        for &child in children {
            if self.cell_of(child).is_none() {
                self.place(child, CellOptions::default());
            }
        }
    }

    fn visible_items(&mut self, ui: &mut Ui, widget: WidgetId) -> (Vec<WidgetId>, Vec<GridItem>) {
        self.sync(&ui.children(widget));
        let visible: Vec<(WidgetId, GridCell)> = self
            .cells
            .iter()
            .copied()
            .filter(|&(child, _)| !ui.flags(child).contains(WidgetFlags::HIDDEN))
            .collect();
        visible
            .into_iter()
            .map(|(child, cell)| {
                let size = ui.request_size(child);
                (child, GridItem { cell, size })
            })
            .unzip()
    }
}

impl Hook for GridHook {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        match msg.kind_mut() {
            MessageKind::ReqSize { width, height } => {
                let node = ui.node(widget)?;
                let (borders, spacing) = (node.borders(), node.child_spacing());
                let (_, items) = self.visible_items(ui, widget);
                let size =
                    grid_request(self.columns, self.same_width_columns, spacing, borders, &items);
                *width = size.width;
                *height = size.height;
                Ok(true)
            }
            MessageKind::SetPos { rect } => {
                let rect = *rect;
                ui.store_rect(widget, rect);
                let node = ui.node(widget)?;
                let (inner, spacing) = (node.child_rect(), node.child_spacing());
                let (children, items) = self.visible_items(ui, widget);
                let rects =
                    grid_arrange(self.columns, self.same_width_columns, spacing, inner, &items);
                tracing::trace!(
                    target: targets::LAYOUT,
                    ?widget,
                    ?rect,
                    columns = self.columns,
                    rows = self.rows(),
                    "grid arranged"
                );
                for (child, child_rect) in children.into_iter().zip(rects) {
                    ui.set_rect(child, child_rect);
                }
                Ok(true)
            }
            MessageKind::Draw { rect, .. } => {
                let rect = *rect;
                let color = ui.theme().face;
                ui.surface().fill_rect(rect, color);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Ui {
    /// Create a grid container with `columns` columns.
    pub fn new_grid(&mut self, columns: usize, same_width_columns: bool) -> Result<WidgetId> {
        let widget = self.new_widget(WidgetKind::Grid)?;
        self.add_hook(
            widget,
            HookTag::Kind(WidgetKind::Grid),
            GridHook::new(columns, same_width_columns),
        )?;
        Ok(widget)
    }

    /// Add `child` to a grid in the first free cell fitting `options`.
    ///
    /// Children added with [`add_child`](Self::add_child) get a 1x1 cell.
    pub fn add_to_grid(
        &mut self,
        grid: WidgetId,
        child: WidgetId,
        options: CellOptions,
    ) -> Result<GridCell> {
        if self.with_hook::<GridHook, _>(grid, |_| ()).is_none() {
            return Err(UiError::NotAGrid);
        }
        let earlier = self.children(grid);
        self.add_child(grid, child)?;
        self.with_hook::<GridHook, _>(grid, |hook| {
            hook.sync(&earlier);
            hook.place(child, options)
        })
        .ok_or(UiError::NotAGrid)
    }

    /// The cell of `child` in `grid`.
    pub fn grid_cell(&self, grid: WidgetId, child: WidgetId) -> Option<GridCell> {
        self.with_hook::<GridHook, _>(grid, |hook| hook.cell_of(child))
            .flatten()
    }
}
