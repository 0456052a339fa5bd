//! Category nodes and forest assembly.
//!
//! The backend may return categories either nested (children inline) or as
//! a flat list linked through `parentId`. [`build_forest`] accepts both and
//! produces the same [`CategoryForest`]. Child order is always the order in
//! which the payload listed the children; nothing is sorted by name.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// A category and its ordered subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(alias = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    /// Display order, as delivered by the backend.
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Creates a root node with no description and no children.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the parent reference.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<CategoryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Appends a child, stamping it with this node's id as its parent.
    #[must_use]
    pub fn with_child(mut self, mut child: CategoryNode) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// A node without a parent reference is a root.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Finds a node by id in this subtree (including this node).
    pub fn find(&self, id: &CategoryId) -> Option<&CategoryNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, this node included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::subtree_len).sum::<usize>()
    }
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the parent, making this draft a subcategory.
    #[must_use]
    pub fn under(mut self, parent_id: impl Into<CategoryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the required fields. The name is the only one.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::Validation("category name is required".to_string()));
        }
        Ok(())
    }
}

/// An ordered set of root categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryForest {
    roots: Vec<CategoryNode>,
}

impl CategoryForest {
    /// Wraps already-assembled roots without any re-linking.
    pub fn from_roots(roots: Vec<CategoryNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<CategoryNode> {
        self.roots
    }

    /// Total number of nodes across all trees.
    pub fn len(&self) -> usize {
        self.roots.iter().map(CategoryNode::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find(&self, id: &CategoryId) -> Option<&CategoryNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.find(id).is_some()
    }

    /// Pre-order traversal yielding `(depth, node)`; roots have depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }

    /// All node ids, in pre-order.
    pub fn ids(&self) -> HashSet<CategoryId> {
        self.walk().map(|(_, node)| node.id.clone()).collect()
    }
}

/// Pre-order iterator over a [`CategoryForest`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a CategoryNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a CategoryNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Assembles a forest from a category payload.
///
/// If any node carries inline children the payload is treated as nested and
/// its top-level entries are the roots; top-level entries that also appear
/// inside another entry's subtree are dropped as duplicates. Nesting decides
/// parentage: each inline child gets its parent's id as `parent_id`.
///
/// Otherwise the payload is flat and linked through `parentId`:
/// - children keep payload order within each parent
/// - a node whose parent is missing from the payload becomes a root
/// - nodes only reachable through a parent cycle are dropped
/// - a repeated id keeps its first occurrence
pub fn build_forest(nodes: Vec<CategoryNode>) -> CategoryForest {
    if nodes.iter().any(CategoryNode::has_children) {
        return nested_forest(nodes);
    }
    flat_forest(nodes)
}

fn nested_forest(nodes: Vec<CategoryNode>) -> CategoryForest {
    let mut nested_ids = HashSet::new();
    for node in &nodes {
        collect_descendant_ids(node, &mut nested_ids);
    }
    let roots = nodes
        .into_iter()
        .filter(|node| !nested_ids.contains(&node.id))
        .map(|mut node| {
            link_children(&mut node);
            node
        })
        .collect();
    CategoryForest { roots }
}

/// Points every inline child at the node it is nested under, whatever
/// `parentId` the payload gave it.
fn link_children(node: &mut CategoryNode) {
    for child in &mut node.children {
        child.parent_id = Some(node.id.clone());
        link_children(child);
    }
}

fn collect_descendant_ids(node: &CategoryNode, out: &mut HashSet<CategoryId>) {
    for child in &node.children {
        out.insert(child.id.clone());
        collect_descendant_ids(child, out);
    }
}

fn flat_forest(nodes: Vec<CategoryNode>) -> CategoryForest {
    let mut slots: Vec<Option<CategoryNode>> = Vec::with_capacity(nodes.len());
    let mut seen = HashSet::new();
    for node in nodes {
        if seen.insert(node.id.clone()) {
            slots.push(Some(node));
        } else {
            warn!(id = %node.id, "duplicate category id in payload, keeping first");
        }
    }

    let mut roots = Vec::new();
    let mut children_of: HashMap<CategoryId, Vec<usize>> = HashMap::new();
    for (idx, node) in slots.iter().flatten().enumerate() {
        match &node.parent_id {
            Some(parent) if seen.contains(parent) => {
                children_of.entry(parent.clone()).or_default().push(idx);
            }
            Some(parent) => {
                warn!(id = %node.id, parent = %parent, "category parent not in payload, promoting to root");
                roots.push(idx);
            }
            None => roots.push(idx),
        }
    }

    let total = slots.len();
    let assembled: Vec<CategoryNode> = roots
        .into_iter()
        .filter_map(|idx| attach(idx, &mut slots, &children_of))
        .collect();

    let forest = CategoryForest { roots: assembled };
    let placed = forest.len();
    if placed < total {
        warn!(dropped = total - placed, "categories unreachable from any root (parent cycle)");
    }
    forest
}

fn attach(
    idx: usize,
    slots: &mut [Option<CategoryNode>],
    children_of: &HashMap<CategoryId, Vec<usize>>,
) -> Option<CategoryNode> {
    let mut node = slots.get_mut(idx)?.take()?;
    if let Some(child_idxs) = children_of.get(&node.id) {
        node.children = child_idxs
            .iter()
            .filter_map(|&child| attach(child, slots, children_of))
            .collect();
    }
    Some(node)
}
