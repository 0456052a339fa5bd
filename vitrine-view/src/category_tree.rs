//! Category tree view-model.
//!
//! Holds the forest, which nodes are open, and which row currently shows its
//! action menu. Mutations are never performed here: actions are reported to
//! callbacks supplied by the embedding screen.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use vitrine_types::{CategoryForest, CategoryId, CategoryNode};

/// Callback invoked with the node an action targets.
pub type ActionCallback = Arc<dyn Fn(&CategoryNode) + Send + Sync>;

/// The per-row actions a screen may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryActionKind {
    Edit,
    Delete,
    View,
    AddChild,
}

impl CategoryActionKind {
    /// Render order of the action controls.
    pub const ALL: [CategoryActionKind; 4] = [
        CategoryActionKind::View,
        CategoryActionKind::Edit,
        CategoryActionKind::AddChild,
        CategoryActionKind::Delete,
    ];
}

/// Optional action callbacks. A missing callback hides its control.
#[derive(Clone, Default)]
pub struct CategoryActions {
    edit: Option<ActionCallback>,
    delete: Option<ActionCallback>,
    view: Option<ActionCallback>,
    add_child: Option<ActionCallback>,
}

impl CategoryActions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_edit(mut self, f: impl Fn(&CategoryNode) + Send + Sync + 'static) -> Self {
        self.edit = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_delete(mut self, f: impl Fn(&CategoryNode) + Send + Sync + 'static) -> Self {
        self.delete = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_view(mut self, f: impl Fn(&CategoryNode) + Send + Sync + 'static) -> Self {
        self.view = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_add_child(mut self, f: impl Fn(&CategoryNode) + Send + Sync + 'static) -> Self {
        self.add_child = Some(Arc::new(f));
        self
    }

    fn callback(&self, kind: CategoryActionKind) -> Option<&ActionCallback> {
        match kind {
            CategoryActionKind::Edit => self.edit.as_ref(),
            CategoryActionKind::Delete => self.delete.as_ref(),
            CategoryActionKind::View => self.view.as_ref(),
            CategoryActionKind::AddChild => self.add_child.as_ref(),
        }
    }

    /// Whether `kind` is offered on `node`.
    ///
    /// Subcategories can only be added under root categories.
    pub fn offers(&self, kind: CategoryActionKind, node: &CategoryNode) -> bool {
        if self.callback(kind).is_none() {
            return false;
        }
        kind != CategoryActionKind::AddChild || node.is_root()
    }
}

impl fmt::Debug for CategoryActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryActions")
            .field("edit", &self.edit.is_some())
            .field("delete", &self.delete.is_some())
            .field("view", &self.view.is_some())
            .field("add_child", &self.add_child.is_some())
            .finish()
    }
}

/// Expand/collapse affordance of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expander {
    /// No children: no affordance, whatever the stored state.
    Leaf,
    Collapsed,
    Expanded,
}

/// One rendered line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub depth: usize,
    pub expander: Expander,
    pub actions: Vec<CategoryActionKind>,
    /// The row's action menu is showing (pointer is over it).
    pub menu_open: bool,
}

/// View-model for the category tree.
#[derive(Debug, Default)]
pub struct CategoryTreeView {
    forest: CategoryForest,
    expanded: HashSet<CategoryId>,
    hovered: Option<CategoryId>,
    actions: CategoryActions,
}

impl CategoryTreeView {
    /// Creates a view with every node collapsed.
    pub fn new(forest: CategoryForest, actions: CategoryActions) -> Self {
        Self {
            forest,
            expanded: HashSet::new(),
            hovered: None,
            actions,
        }
    }

    pub fn forest(&self) -> &CategoryForest {
        &self.forest
    }

    pub fn actions(&self) -> &CategoryActions {
        &self.actions
    }

    pub fn set_actions(&mut self, actions: CategoryActions) {
        self.actions = actions;
    }

    /// Swaps in a freshly fetched forest. Open nodes that still exist stay
    /// open; state for vanished nodes is dropped.
    pub fn replace_forest(&mut self, forest: CategoryForest) {
        let known = forest.ids();
        self.expanded.retain(|id| known.contains(id));
        if self.hovered.as_ref().is_some_and(|id| !known.contains(id)) {
            self.hovered = None;
        }
        self.forest = forest;
    }

    /// Flips one node between open and closed. Returns the new state.
    pub fn toggle_expand(&mut self, id: &CategoryId) -> bool {
        let open = if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        };
        debug!(category = %id, open, "category toggled");
        open
    }

    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expanded.contains(id)
    }

    /// Opens every node that has children.
    pub fn expand_all(&mut self) {
        let parents: Vec<CategoryId> = self
            .forest
            .walk()
            .filter(|(_, node)| node.has_children())
            .map(|(_, node)| node.id.clone())
            .collect();
        self.expanded.extend(parents);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// The affordance shown for `node`.
    pub fn expander(&self, node: &CategoryNode) -> Expander {
        if !node.has_children() {
            Expander::Leaf
        } else if self.is_expanded(&node.id) {
            Expander::Expanded
        } else {
            Expander::Collapsed
        }
    }

    /// Actions offered on `node`, in render order.
    pub fn available_actions(&self, node: &CategoryNode) -> Vec<CategoryActionKind> {
        CategoryActionKind::ALL
            .into_iter()
            .filter(|kind| self.actions.offers(*kind, node))
            .collect()
    }

    /// Invokes the callback for `kind` if that action is offered on `node`.
    /// Returns whether a callback ran.
    pub fn dispatch_action(&self, kind: CategoryActionKind, node: &CategoryNode) -> bool {
        if !self.actions.offers(kind, node) {
            return false;
        }
        match self.actions.callback(kind) {
            Some(callback) => {
                debug!(category = %node.id, ?kind, "category action");
                callback(node);
                true
            }
            None => false,
        }
    }

    /// Dispatches by id. Returns false if the node is unknown or the action
    /// is not offered.
    pub fn dispatch_action_by_id(&self, kind: CategoryActionKind, id: &CategoryId) -> bool {
        self.forest
            .find(id)
            .is_some_and(|node| self.dispatch_action(kind, node))
    }

    /// Marks `id` as the row under the pointer.
    pub fn hover(&mut self, id: &CategoryId) {
        self.hovered = Some(id.clone());
    }

    /// Clears the hover mark if it is on `id`.
    pub fn unhover(&mut self, id: &CategoryId) {
        if self.hovered.as_ref() == Some(id) {
            self.hovered = None;
        }
    }

    pub fn hovered(&self) -> Option<&CategoryId> {
        self.hovered.as_ref()
    }

    /// Rows to render: every root, plus the children of open nodes, in
    /// pre-order.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for root in self.forest.roots() {
            self.push_rows(root, 0, &mut rows);
        }
        rows
    }

    fn push_rows(&self, node: &CategoryNode, depth: usize, rows: &mut Vec<TreeRow>) {
        let expander = self.expander(node);
        rows.push(TreeRow {
            id: node.id.clone(),
            name: node.name.clone(),
            description: node.description.clone(),
            depth,
            expander,
            actions: self.available_actions(node),
            menu_open: self.hovered.as_ref() == Some(&node.id),
        });
        if expander == Expander::Expanded {
            for child in &node.children {
                self.push_rows(child, depth + 1, rows);
            }
        }
    }
}
