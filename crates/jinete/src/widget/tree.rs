//! The widget arena and tree queries.

use jinete_core::{Point, Result, UiError};
use slotmap::SlotMap;

use super::{WidgetFlags, WidgetId, WidgetKind, WidgetNode};
use crate::logging::targets;

/// Arena of every live widget.
///
/// Parent/child links are stored as ids. Removing a node never removes its
/// children; the [`Ui`](crate::Ui) destroys subtrees bottom-up.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    limit: Option<usize>,
}

impl WidgetTree {
    /// Create an empty tree, optionally capped at `limit` live widgets.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            limit,
        }
    }

    /// Insert a new detached widget.
    pub fn insert(&mut self, kind: WidgetKind) -> Result<WidgetId> {
        if let Some(limit) = self.limit
            && self.nodes.len() >= limit
        {
            tracing::warn!(target: targets::WIDGET, limit, "widget limit reached");
            return Err(UiError::OutOfMemory { limit });
        }
        let id = self.nodes.insert(WidgetNode::new(kind));
        tracing::trace!(target: targets::WIDGET, ?id, %kind, "widget created");
        Ok(id)
    }

    /// Remove a node, detaching it from its parent.
    ///
    /// Children keep a dangling parent link; callers remove them first.
    pub fn remove(&mut self, id: WidgetId) -> Option<WidgetNode> {
        let parent = self.nodes.get(id)?.parent;
        if let Some(parent) = parent
            && let Some(data) = self.nodes.get_mut(parent)
        {
            data.children.retain(|&c| c != id);
        }
        let node = self.nodes.remove(id);
        tracing::trace!(target: targets::WIDGET, ?id, "widget removed");
        node
    }

    /// Whether the widget exists.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The configured capacity.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Borrow a node.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    /// Borrow a node mutably.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(id)
    }

    /// Borrow a node or fail with [`UiError::InvalidWidget`].
    pub fn node(&self, id: WidgetId) -> Result<&WidgetNode> {
        self.nodes.get(id).ok_or(UiError::InvalidWidget)
    }

    /// Mutable variant of [`node`](Self::node).
    pub fn node_mut(&mut self, id: WidgetId) -> Result<&mut WidgetNode> {
        self.nodes.get_mut(id).ok_or(UiError::InvalidWidget)
    }

    /// Iterate over all live ids.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.nodes.keys()
    }

    /// Move `id` under `new_parent` (or detach it with `None`).
    ///
    /// With `index`, the child is inserted at that position (clamped);
    /// otherwise it is appended.
    pub fn set_parent(
        &mut self,
        id: WidgetId,
        new_parent: Option<WidgetId>,
        index: Option<usize>,
    ) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(UiError::InvalidWidget);
        }
        if let Some(parent_id) = new_parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(UiError::InvalidWidget);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(UiError::CircularParentage);
            }
        }

        let old_parent = self.nodes.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent
            && let Some(parent_data) = self.nodes.get_mut(old_parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent
            && let Some(parent_data) = self.nodes.get_mut(parent_id)
        {
            match index {
                Some(i) => {
                    let i = i.min(parent_data.children.len());
                    parent_data.children.insert(i, id);
                }
                None => parent_data.children.push(id),
            }
        }
        Ok(())
    }

    /// Whether `ancestor` is `id` itself or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// The parent of a widget.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|d| d.parent)
    }

    /// Children of a widget, empty for unknown ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    /// Ancestors from the immediate parent to the root.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(current_id) = current {
            result.push(current_id);
            current = self.parent(current_id);
        }
        result
    }

    /// The widget followed by its ancestors up to the root.
    pub fn chain(&self, id: WidgetId) -> Vec<WidgetId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut result = vec![id];
        result.extend(self.ancestors(id));
        result
    }

    /// The nearest window containing `id` (possibly `id` itself).
    pub fn window_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.chain(id)
            .into_iter()
            .find(|&w| self.nodes.get(w).is_some_and(|n| n.window.is_some()))
    }

    /// The nearest manager containing `id` (possibly `id` itself).
    pub fn manager_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.chain(id)
            .into_iter()
            .find(|&w| self.nodes.get(w).is_some_and(|n| n.kind == WidgetKind::Manager))
    }

    /// Pre-order traversal (node, then children).
    pub fn preorder(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        self.preorder_recursive(id, &mut result);
        result
    }

    fn preorder_recursive(&self, id: WidgetId, result: &mut Vec<WidgetId>) {
        let Some(data) = self.nodes.get(id) else {
            return;
        };
        result.push(id);
        for &child in &data.children {
            self.preorder_recursive(child, result);
        }
    }

    /// Post-order traversal (children, then node).
    pub fn postorder(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        self.postorder_recursive(id, &mut result);
        result
    }

    fn postorder_recursive(&self, id: WidgetId, result: &mut Vec<WidgetId>) {
        let Some(data) = self.nodes.get(id) else {
            return;
        };
        for &child in &data.children {
            self.postorder_recursive(child, result);
        }
        result.push(id);
    }

    /// Whether the widget and all its ancestors are shown.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.contains(id) && !self.chain_has(id, WidgetFlags::HIDDEN)
    }

    /// Whether the widget and all its ancestors are enabled.
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.contains(id) && !self.chain_has(id, WidgetFlags::DISABLED)
    }

    fn chain_has(&self, id: WidgetId, flag: WidgetFlags) -> bool {
        self.chain(id)
            .into_iter()
            .any(|w| self.nodes.get(w).is_some_and(|n| n.flags.contains(flag)))
    }

    /// The deepest shown widget under `point`, starting at `id`.
    ///
    /// Later children are on top of earlier ones.
    pub fn pick(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        if node.flags.contains(WidgetFlags::HIDDEN) || !node.rect.contains(point) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.pick(child, point))
            .or(Some(id))
    }

    /// Find a descendant (or `id` itself) by name.
    pub fn find_by_name(&self, id: WidgetId, name: &str) -> Option<WidgetId> {
        self.preorder(id)
            .into_iter()
            .find(|&w| self.nodes.get(w).and_then(|n| n.name.as_deref()) == Some(name))
    }

    /// The widget after `id` in a pre-order walk of `root`, wrapping around.
    pub fn next_in_preorder(&self, root: WidgetId, id: WidgetId) -> Option<WidgetId> {
        let order = self.preorder(root);
        let index = order.iter().position(|&w| w == id)?;
        order.get((index + 1) % order.len()).copied()
    }

    /// The widget before `id` in a pre-order walk of `root`, wrapping around.
    pub fn prev_in_preorder(&self, root: WidgetId, id: WidgetId) -> Option<WidgetId> {
        let order = self.preorder(root);
        let index = order.iter().position(|&w| w == id)?;
        order.get((index + order.len() - 1) % order.len()).copied()
    }

    /// Render the subtree of `id` as an indented listing.
    pub fn dump(&self, id: WidgetId) -> String {
        crate::logging::WidgetTreeDebug::new().format_subtree(self, id)
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new(None)
    }
}
