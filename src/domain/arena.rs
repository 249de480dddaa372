use generational_arena::{Arena, Index};
use std::fmt;
use termtree::Tree;
use tracing::instrument;

use crate::domain::identity::NodeId;

/// Data payload for a structural outline entry.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Content-addressed id, unique within one parse
    pub id: NodeId,
    /// Leading whitespace count of the source line
    pub indent: usize,
    /// Label cleaned with the default sanitize policy
    pub content: String,
    /// Source line as written (right-trimmed)
    pub raw_line: String,
    /// 1-based source line number
    pub line_number: usize,
}

impl NodeData {
    fn root() -> Self {
        Self {
            id: NodeId::root(),
            indent: 0,
            content: String::new(),
            raw_line: String::new(),
            line_number: 0,
        }
    }

    /// Document title: the source line without its outline indentation.
    pub fn title(&self) -> &str {
        self.raw_line.trim()
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Node in the arena-based outline tree.
#[derive(Debug)]
pub struct OutlineNode {
    pub data: NodeData,
    /// Annotation lines attached to this node, as read (right-trimmed)
    pub body_lines: Vec<String>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in source order
    pub children: Vec<Index>,
}

impl OutlineNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Arena-based outline tree.
///
/// Always holds a synthetic root node (id `root`, no content) whose children
/// are the top-level entries of the outline.
#[derive(Debug)]
pub struct Outline {
    arena: Arena<OutlineNode>,
    root: Index,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

impl Outline {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(OutlineNode {
            data: NodeData::root(),
            body_lines: Vec::new(),
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Append a new node as the last child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Index) -> Index {
        let node = OutlineNode {
            data,
            body_lines: Vec::new(),
            parent: Some(parent),
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub(crate) fn push_body_line(&mut self, idx: Index, line: String) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.body_lines.push(line);
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&OutlineNode> {
        self.arena.get(idx)
    }

    /// Children of `idx` in source order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = (Index, &OutlineNode)> + '_ {
        self.arena
            .get(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&child| self.arena.get(child).map(|node| (child, node)))
    }

    /// Number of structural nodes (the root is not counted).
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nesting depth of the structural nodes; 0 for an empty outline.
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root) - 1
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Pre-order iteration over the structural nodes, in source order.
    pub fn iter(&self) -> OutlineIterator<'_> {
        OutlineIterator::new(self)
    }

    /// Render the outline for display, labelled by `root_label`.
    pub fn to_tree(&self, root_label: &str) -> Tree<String> {
        let mut tree = Tree::new(root_label.to_string());
        for (idx, _) in self.children(self.root) {
            tree.push(self.subtree(idx));
        }
        tree
    }

    fn subtree(&self, idx: Index) -> Tree<String> {
        let label = self
            .get_node(idx)
            .map(|node| node.data.to_string())
            .unwrap_or_default();
        let mut tree = Tree::new(label);
        for (child, _) in self.children(idx) {
            tree.push(self.subtree(child));
        }
        tree
    }
}

pub struct OutlineIterator<'a> {
    outline: &'a Outline,
    stack: Vec<Index>,
}

impl<'a> OutlineIterator<'a> {
    fn new(outline: &'a Outline) -> Self {
        let stack = outline
            .get_node(outline.root)
            .map(|root| root.children.iter().rev().copied().collect())
            .unwrap_or_default();
        Self { outline, stack }
    }
}

impl<'a> Iterator for OutlineIterator<'a> {
    type Item = (Index, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.outline.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
