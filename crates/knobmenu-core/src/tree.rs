#![forbid(unsafe_code)]

//! Arena-backed menu tree.
//!
//! The [`Tree`] owns every [`Item`]. Structure is kept beside each item as
//! [`NodeId`] links: a non-owning `parent`, the head of the submenu
//! (`first_child`), and `prev`/`next` within one sibling level.
//!
//! # Invariants
//!
//! 1. A level is a finite doubly linked list: following `next` terminates and
//!    `prev` is the exact inverse of `next`.
//! 2. Every item of a level has the same `parent` (the item whose
//!    `first_child` is the level head). Detached chains have no parent.
//! 3. The root has neither parent nor siblings.
//! 4. No link may close a cycle; attach operations reject such calls.
//!
//! # Example
//!
//! ```
//! use knobmenu_core::{Item, MenuNode, Tree};
//!
//! let tree: Tree = Tree::from_node(
//!     MenuNode::new(Item::new(0, "root"))
//!         .child(MenuNode::new(Item::new(1, "Frequency")))
//!         .child(
//!             MenuNode::new(Item::new(2, "Units"))
//!                 .child(MenuNode::new(Item::new(21, "Hz")))
//!                 .child(MenuNode::new(Item::new(22, "RPM"))),
//!         ),
//! );
//!
//! let units = tree.find(tree.root(), 2, true).unwrap();
//! let captions: Vec<_> = tree
//!     .children(units)
//!     .map(|node| tree[node].caption())
//!     .collect();
//! assert_eq!(captions, ["Hz", "RPM"]);
//! ```

use std::ops::Index;

use crate::error::{MenuError, Result};
use crate::item::{Item, NodeId, RadioGroup};

#[derive(Debug, Clone)]
struct Node<D> {
    item: Item<D>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

impl<D> Node<D> {
    fn detached(item: Item<D>) -> Self {
        Self {
            item,
            parent: None,
            first_child: None,
            prev: None,
            next: None,
        }
    }
}

/// Owning container of all items of one menu.
#[derive(Debug, Clone)]
pub struct Tree<D = ()> {
    nodes: Vec<Node<D>>,
}

impl<D> Default for Tree<D> {
    fn default() -> Self {
        Self::new(Item::new(0, "root"))
    }
}

impl<D> Tree<D> {
    /// Create a tree holding only `root`.
    #[must_use]
    pub fn new(root: Item<D>) -> Self {
        Self {
            nodes: vec![Node::detached(root)],
        }
    }

    /// Build a whole tree from a declarative [`MenuNode`].
    #[must_use]
    pub fn from_node(root: MenuNode<D>) -> Self {
        let MenuNode { item, children } = root;
        let mut tree = Self::new(item);
        let root_id = tree.root();
        tree.append_nodes(root_id, children);
        tree
    }

    fn append_nodes(&mut self, parent: NodeId, children: Vec<MenuNode<D>>) {
        let mut last: Option<NodeId> = None;
        for MenuNode { item, children } in children {
            let id = self.insert(item);
            {
                let node = &mut self.nodes[id.index()];
                node.parent = Some(parent);
                node.prev = last;
            }
            match last {
                Some(prev) => self.nodes[prev.index()].next = Some(id),
                None => self.nodes[parent.index()].first_child = Some(id),
            }
            self.append_nodes(id, children);
            last = Some(id);
        }
    }

    /// The root item. Always present.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Number of items, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` was produced by this tree.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Add a detached item and return its handle.
    ///
    /// A tree holds at most `NodeId::MAX_INDEX + 1` items.
    pub fn insert(&mut self, item: Item<D>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::detached(item));
        id
    }

    /// Item behind `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Item<D>> {
        self.nodes.get(node.index()).map(|n| &n.item)
    }

    /// Mutable item behind `node`. Only tag and payload are writable here;
    /// the checked flag belongs to the controller.
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Item<D>> {
        self.nodes.get_mut(node.index()).map(|n| &mut n.item)
    }

    pub(crate) fn item_mut_unchecked(&mut self, node: NodeId) -> &mut Item<D> {
        &mut self.nodes[node.index()].item
    }

    /// Parent of `node` (absent for the root and for detached chains).
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.parent)
    }

    /// Head of the submenu of `node`.
    #[must_use]
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.first_child)
    }

    /// Whether `node` opens a submenu.
    #[must_use]
    pub fn has_submenu(&self, node: NodeId) -> bool {
        self.first_child(node).is_some()
    }

    /// Previous sibling of `node`.
    #[must_use]
    pub fn prev(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.prev)
    }

    /// Next sibling of `node`.
    #[must_use]
    pub fn next(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.next)
    }

    /// Make `child` (a detached chain head) the submenu of `parent`.
    ///
    /// Every item of the chain starting at `child` gets `parent` as parent.
    ///
    /// # Errors
    ///
    /// [`MenuError::InvalidArgument`] when `parent` already has a submenu,
    /// when `child` is already linked, or when the link would close a cycle.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.check_node(parent)?;
        self.check_detached_head(child)?;
        if self.nodes[parent.index()].first_child.is_some() {
            return Err(MenuError::InvalidArgument("parent already has a submenu"));
        }
        if self.would_cycle(parent, child) {
            return Err(MenuError::InvalidArgument("link would create a cycle"));
        }

        self.nodes[parent.index()].first_child = Some(child);
        self.set_chain_parent(child, Some(parent));
        Ok(child)
    }

    /// Link the detached chain starting at `next` right after `item`.
    ///
    /// If `item` already had a successor, the chain is spliced in front of
    /// it. Spliced items share `item`'s parent.
    ///
    /// # Errors
    ///
    /// [`MenuError::InvalidArgument`] when `item` is the root, when `next`
    /// is already linked, or when the link would close a cycle.
    pub fn attach_sibling(&mut self, item: NodeId, next: NodeId) -> Result<NodeId> {
        self.check_node(item)?;
        if item == self.root() {
            return Err(MenuError::InvalidArgument("the root has no siblings"));
        }
        self.check_detached_head(next)?;
        if self.would_cycle(item, next) {
            return Err(MenuError::InvalidArgument("link would create a cycle"));
        }

        let parent = self.nodes[item.index()].parent;
        let old_next = self.nodes[item.index()].next;
        let tail = self.last_of_level(next);

        self.nodes[item.index()].next = Some(next);
        self.nodes[next.index()].prev = Some(item);
        if let Some(old_next) = old_next {
            self.nodes[tail.index()].next = Some(old_next);
            self.nodes[old_next.index()].prev = Some(tail);
        }
        self.set_chain_parent(next, parent);
        Ok(next)
    }

    /// Insert `item` and place it last in `parent`'s submenu.
    pub fn append_child(&mut self, parent: NodeId, item: Item<D>) -> Result<NodeId> {
        self.check_node(parent)?;
        let id = self.insert(item);
        match self.nodes[parent.index()].first_child {
            Some(head) => {
                let tail = self.last_of_level(head);
                self.attach_sibling(tail, id)
            }
            None => self.attach_child(parent, id),
        }
    }

    /// First item of `node`'s level; `node` itself when it has no `prev`.
    #[must_use]
    pub fn first_of_level(&self, node: NodeId) -> NodeId {
        let mut top = node;
        while let Some(prev) = self.prev(top) {
            top = prev;
        }
        top
    }

    /// Last item of `node`'s level.
    #[must_use]
    pub fn last_of_level(&self, node: NodeId) -> NodeId {
        let mut bottom = node;
        while let Some(next) = self.next(bottom) {
            bottom = next;
        }
        bottom
    }

    /// Zero-based position of `node` within its level.
    #[must_use]
    pub fn index_in_level(&self, node: NodeId) -> usize {
        let mut index = 0;
        let mut cursor = node;
        while let Some(prev) = self.prev(cursor) {
            cursor = prev;
            index += 1;
        }
        index
    }

    /// Number of parents above `node`. The root has depth 0.
    #[must_use]
    pub fn depth(&self, node: NodeId) -> usize {
        self.ancestors(node).count()
    }

    /// Iterate siblings forward starting at `node` itself.
    #[must_use]
    pub fn siblings_from(&self, node: NodeId) -> Siblings<'_, D> {
        Siblings {
            tree: self,
            cursor: self.contains(node).then_some(node),
        }
    }

    /// Iterate the whole level `node` belongs to, from its first item.
    #[must_use]
    pub fn level(&self, node: NodeId) -> Siblings<'_, D> {
        self.siblings_from(self.first_of_level(node))
    }

    /// Iterate the submenu of `node`.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Siblings<'_, D> {
        Siblings {
            tree: self,
            cursor: self.first_child(node),
        }
    }

    /// Iterate the parents of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// Depth-first search for a user id.
    ///
    /// Tests every item of the level starting at `start`; when `recursive`,
    /// an item's submenu is searched before moving on to its next sibling.
    /// Returns the first match in that order. Ids are not required to be
    /// unique, so callers relying on uniqueness must enforce it themselves.
    #[must_use]
    pub fn find(&self, start: NodeId, id: i32, recursive: bool) -> Option<NodeId> {
        for node in self.siblings_from(start) {
            if self.nodes[node.index()].item.id() == id {
                return Some(node);
            }
            if recursive
                && let Some(head) = self.first_child(node)
                && let Some(found) = self.find(head, id, true)
            {
                return Some(found);
            }
        }
        None
    }

    /// The checked member of `group` on `node`'s level, if any.
    #[must_use]
    pub fn checked_radio(&self, node: NodeId, group: RadioGroup) -> Option<NodeId> {
        self.level(node).find(|&n| {
            let item = &self.nodes[n.index()].item;
            item.radio_group() == Some(group) && item.is_checked()
        })
    }

    pub(crate) fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(MenuError::InvalidArgument("node does not belong to this tree"))
        }
    }

    fn check_detached_head(&self, node: NodeId) -> Result<()> {
        self.check_node(node)?;
        let n = &self.nodes[node.index()];
        if node == self.root() || n.parent.is_some() || n.prev.is_some() {
            return Err(MenuError::InvalidArgument("item is already linked"));
        }
        Ok(())
    }

    /// Linking the chain headed by `head` next to or below `anchor` closes a
    /// cycle exactly when `anchor` or one of its ancestors lives in that chain.
    fn would_cycle(&self, anchor: NodeId, head: NodeId) -> bool {
        std::iter::once(anchor)
            .chain(self.ancestors(anchor))
            .any(|n| self.first_of_level(n) == head)
    }

    fn set_chain_parent(&mut self, head: NodeId, parent: Option<NodeId>) {
        let mut cursor = Some(head);
        while let Some(node) = cursor {
            let n = &mut self.nodes[node.index()];
            n.parent = parent;
            cursor = n.next;
        }
    }
}

impl<D> Index<NodeId> for Tree<D> {
    type Output = Item<D>;

    /// # Panics
    ///
    /// Panics if `node` does not belong to this tree.
    fn index(&self, node: NodeId) -> &Item<D> {
        &self.nodes[node.index()].item
    }
}

/// Forward iterator over one sibling level.
#[derive(Debug, Clone)]
pub struct Siblings<'a, D> {
    tree: &'a Tree<D>,
    cursor: Option<NodeId>,
}

impl<D> Iterator for Siblings<'_, D> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor?;
        self.cursor = self.tree.next(current);
        Some(current)
    }
}

/// Declarative description of a subtree, consumed by [`Tree::from_node`].
#[derive(Debug, Clone)]
pub struct MenuNode<D = ()> {
    item: Item<D>,
    children: Vec<MenuNode<D>>,
}

impl<D> MenuNode<D> {
    /// Create a node without a submenu.
    #[must_use]
    pub fn new(item: Item<D>) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }

    /// Append one submenu entry.
    #[must_use]
    pub fn child(mut self, node: MenuNode<D>) -> Self {
        self.children.push(node);
        self
    }

    /// Replace the submenu entries.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<MenuNode<D>>) -> Self {
        self.children = nodes;
        self
    }

    /// The item of this node.
    #[must_use]
    pub fn item(&self) -> &Item<D> {
        &self.item
    }

    /// Submenu entries.
    #[must_use]
    pub fn children(&self) -> &[MenuNode<D>] {
        &self.children
    }
}

impl<D> From<Item<D>> for MenuNode<D> {
    fn from(item: Item<D>) -> Self {
        Self::new(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: i32) -> MenuNode {
        MenuNode::new(Item::new(id, format!("item {id}")))
    }

    /// root -> [A(1), B(2) -> [C(9)], D(9)]
    fn search_tree() -> Tree {
        Tree::from_node(
            MenuNode::new(Item::new(0, "root"))
                .child(leaf(1))
                .child(leaf(2).child(leaf(9)))
                .child(leaf(9)),
        )
    }

    fn ids(tree: &Tree, nodes: impl Iterator<Item = NodeId>) -> Vec<i32> {
        nodes.map(|n| tree[n].id()).collect()
    }

    /// Checks links are mutually consistent for every item.
    fn assert_well_formed(tree: &Tree) {
        for index in 0..tree.len() {
            let node = NodeId::new(index);
            if let Some(next) = tree.next(node) {
                assert_eq!(tree.prev(next), Some(node));
                assert_eq!(tree.parent(next), tree.parent(node));
            }
            if let Some(head) = tree.first_child(node) {
                assert_eq!(tree.prev(head), None);
                for child in tree.children(node) {
                    assert_eq!(tree.parent(child), Some(node));
                }
            }
        }
    }

    #[test]
    fn default_tree_has_root_only() {
        let tree: Tree = Tree::default();
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree[tree.root()].caption(), "root");
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn from_node_links_levels() {
        let tree = search_tree();
        assert_well_formed(&tree);
        let root = tree.root();
        assert_eq!(ids(&tree, tree.children(root)), [1, 2, 9]);
        let b = tree.find(root, 2, true).unwrap();
        assert_eq!(ids(&tree, tree.children(b)), [9]);
        assert_eq!(tree.depth(b), 1);
    }

    #[test]
    fn attach_child_sets_parent_on_whole_chain() {
        let mut tree: Tree = Tree::default();
        let a = tree.insert(Item::new(1, "a"));
        let b = tree.insert(Item::new(2, "b"));
        tree.attach_sibling(a, b).unwrap();
        tree.attach_child(tree.root(), a).unwrap();

        assert_eq!(tree.parent(a), Some(tree.root()));
        assert_eq!(tree.parent(b), Some(tree.root()));
        assert_well_formed(&tree);
    }

    #[test]
    fn second_attach_child_is_rejected() {
        let mut tree: Tree = Tree::default();
        let a = tree.insert(Item::new(1, "a"));
        let b = tree.insert(Item::new(2, "b"));
        tree.attach_child(tree.root(), a).unwrap();
        assert_eq!(
            tree.attach_child(tree.root(), b),
            Err(MenuError::InvalidArgument("parent already has a submenu"))
        );
        assert_eq!(tree.first_child(tree.root()), Some(a));
    }

    #[test]
    fn relinking_is_rejected() {
        let mut tree: Tree = Tree::default();
        let a = tree.insert(Item::new(1, "a"));
        let b = tree.insert(Item::new(2, "b"));
        let c = tree.insert(Item::new(3, "c"));
        tree.attach_child(tree.root(), a).unwrap();
        tree.attach_sibling(a, b).unwrap();

        assert!(tree.attach_sibling(c, b).is_err(), "b already has a prev");
        assert!(tree.attach_child(c, a).is_err(), "a already has a parent");
        assert!(tree.attach_child(c, tree.root()).is_err());
        assert!(tree.attach_sibling(tree.root(), c).is_err());
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree: Tree = Tree::default();
        let a = tree.insert(Item::new(1, "a"));
        let b = tree.insert(Item::new(2, "b"));
        tree.attach_sibling(a, b).unwrap();

        // b lives in the chain headed by a.
        assert!(tree.attach_child(b, a).is_err());
        assert!(tree.attach_sibling(b, a).is_err());

        let c = tree.insert(Item::new(3, "c"));
        tree.attach_child(b, c).unwrap();
        // c's ancestor b is in a's chain.
        assert!(tree.attach_child(c, a).is_err());
        assert_well_formed(&tree);
    }

    #[test]
    fn attach_sibling_splices_chain() {
        let mut tree: Tree = Tree::default();
        let root = tree.root();
        let a = tree.append_child(root, Item::new(1, "a")).unwrap();
        tree.append_child(root, Item::new(4, "d")).unwrap();

        let b = tree.insert(Item::new(2, "b"));
        let c = tree.insert(Item::new(3, "c"));
        tree.attach_sibling(b, c).unwrap();
        tree.attach_sibling(a, b).unwrap();

        assert_eq!(ids(&tree, tree.children(root)), [1, 2, 3, 4]);
        assert_eq!(tree.parent(c), Some(root));
        assert_well_formed(&tree);
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut tree: Tree = Tree::default();
        let bogus = NodeId::new(99);
        assert!(tree.attach_child(bogus, tree.root()).is_err());
        assert!(tree.append_child(bogus, Item::new(1, "x")).is_err());
        assert!(tree.get(bogus).is_none());
        assert_eq!(tree.next(bogus), None);
        assert_eq!(tree.siblings_from(bogus).count(), 0);
    }

    #[test]
    fn first_of_level_and_index() {
        let tree = search_tree();
        let d = tree.last_of_level(tree.first_child(tree.root()).unwrap());
        assert_eq!(tree[d].id(), 9);
        assert_eq!(tree.index_in_level(d), 2);
        assert_eq!(tree[tree.first_of_level(d)].id(), 1);
        assert_eq!(tree.first_of_level(tree.root()), tree.root());
        assert_eq!(ids(&tree, tree.level(d)), [1, 2, 9]);
    }

    #[test]
    fn find_recurses_before_advancing() {
        let tree = search_tree();
        let top = tree.first_child(tree.root()).unwrap();
        let b = tree.next(top).unwrap();
        let c = tree.first_child(b).unwrap();
        let d = tree.next(b).unwrap();

        assert_eq!(tree.find(top, 9, true), Some(c));
        assert_eq!(tree.find(top, 9, false), Some(d));
        assert_eq!(tree.find(top, 42, true), None);
        // A search rooted at the root tests the root itself first.
        assert_eq!(tree.find(tree.root(), 0, true), Some(tree.root()));
    }

    #[test]
    fn find_non_recursive_stays_on_level() {
        let tree = Tree::from_node(
            MenuNode::new(Item::new(0, "root")).child(leaf(1).child(leaf(5))),
        );
        let top = tree.first_child(tree.root()).unwrap();
        assert_eq!(tree.find(top, 5, false), None);
        assert!(tree.find(top, 5, true).is_some());
    }

    #[test]
    fn checked_radio_is_level_scoped() {
        let g = RadioGroup::new(3).unwrap();
        let tree: Tree = Tree::from_node(
            MenuNode::new(Item::new(0, "root"))
                .child(MenuNode::new(Item::radio(1, "a", g, false)))
                .child(MenuNode::new(Item::radio(2, "b", g, true)))
                .child(
                    MenuNode::new(Item::new(3, "sub"))
                        .child(MenuNode::new(Item::radio(4, "c", g, true))),
                ),
        );
        let a = tree.find(tree.root(), 1, true).unwrap();
        let b = tree.find(tree.root(), 2, true).unwrap();
        let c = tree.find(tree.root(), 4, true).unwrap();
        assert_eq!(tree.checked_radio(a, g), Some(b));
        assert_eq!(tree.checked_radio(c, g), Some(c));
    }
}
