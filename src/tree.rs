//! Parent-linked binary tree whose nodes live in a `TypedArena`.
//!
//! Every node owns its children through the arena and keeps a non-owning handle to its parent.
//! The primitives below are the only places where links are written, and each of them keeps the
//! two directions of a link consistent: a child slot never points at a node whose parent handle
//! points elsewhere.

use crate::arena::{Handle, TypedArena};
use std::mem;
use std::vec::Vec;

/// The side of its parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
struct Node<T> {
    item: T,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<T> Node<T> {
    fn slot_mut(&mut self, side: Side) -> &mut Option<Handle> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Clone)]
pub struct BinaryTree<T> {
    nodes: TypedArena<Node<T>>,
    root: Option<Handle>,
}

impl<T> BinaryTree<T> {
    pub fn new() -> Self {
        BinaryTree {
            nodes: TypedArena::new(),
            root: None,
        }
    }

    /// Returns the number of allocated nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn item(&self, node: Handle) -> &T {
        &self.nodes[node].item
    }

    pub fn item_mut(&mut self, node: Handle) -> &mut T {
        &mut self.nodes[node].item
    }

    pub fn parent(&self, node: Handle) -> Option<Handle> {
        self.nodes[node].parent
    }

    pub fn left(&self, node: Handle) -> Option<Handle> {
        self.nodes[node].left
    }

    pub fn right(&self, node: Handle) -> Option<Handle> {
        self.nodes[node].right
    }

    pub fn child(&self, node: Handle, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left(node),
            Side::Right => self.right(node),
        }
    }

    /// Returns the side of its parent `node` occupies, or `None` if `node` has no parent.
    pub fn side_of(&self, node: Handle) -> Option<Side> {
        self.parent(node).map(|parent| {
            if self.nodes[parent].left == Some(node) {
                Side::Left
            } else {
                Side::Right
            }
        })
    }

    /// Allocates a detached node holding `item`.
    pub fn allocate(&mut self, item: T) -> Handle {
        self.nodes.allocate(Node {
            item,
            parent: None,
            left: None,
            right: None,
        })
    }

    /// Releases a node and returns its item. The node must already be detached and childless.
    pub fn free(&mut self, node: Handle) -> T {
        debug_assert!(self.root != Some(node), "Error: freeing the root.");
        debug_assert!(self.nodes[node].parent.is_none(), "Error: freeing an attached node.");
        debug_assert!(
            self.nodes[node].left.is_none() && self.nodes[node].right.is_none(),
            "Error: freeing a node with children.",
        );
        self.nodes.free(node).item
    }

    /// Unlinks `node` from its parent, or from the root slot, keeping its subtrees.
    pub fn detach(&mut self, node: Handle) {
        match self.nodes[node].parent.take() {
            Some(parent) => {
                let parent_node = &mut self.nodes[parent];
                if parent_node.left == Some(node) {
                    parent_node.left = None;
                } else if parent_node.right == Some(node) {
                    parent_node.right = None;
                }
            },
            None => {
                if self.root == Some(node) {
                    self.root = None;
                }
            },
        }
    }

    /// Makes `new_root` the root of the tree and returns the previous root, which is left
    /// floating. `new_root` is detached from its current position first.
    pub fn replace_root(&mut self, new_root: Option<Handle>) -> Option<Handle> {
        if let Some(node) = new_root {
            self.detach(node);
        }
        mem::replace(&mut self.root, new_root)
    }

    /// Stores `child` in the `side` slot of `parent` and returns the node it displaced, which is
    /// left floating. `child` is detached from its current position first.
    pub fn set_child(
        &mut self,
        parent: Handle,
        side: Side,
        child: Option<Handle>,
    ) -> Option<Handle> {
        if let Some(child) = child {
            self.detach(child);
            self.nodes[child].parent = Some(parent);
        }
        let displaced = mem::replace(self.nodes[parent].slot_mut(side), child);
        if let Some(displaced) = displaced {
            self.nodes[displaced].parent = None;
        }
        displaced
    }

    /// Puts `replacement` into the position `node` occupies (its parent's slot, or the root) and
    /// leaves `node` detached. The subtrees of `node` stay attached to it unless `replacement`
    /// was one of them.
    pub fn replace_in_parent(&mut self, node: Handle, replacement: Option<Handle>) {
        if let Some(replacement) = replacement {
            self.detach(replacement);
        }
        match (self.parent(node), self.side_of(node)) {
            (Some(parent), Some(side)) => {
                self.set_child(parent, side, replacement);
            },
            _ => {
                if self.root == Some(node) {
                    self.replace_root(replacement);
                }
            },
        }
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the number of levels in the tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = self.left(node) {
                stack.push((left, depth + 1));
            }
            if let Some(right) = self.right(node) {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Returns an iterator over the items reachable from the root using in-order traversal.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            tree: self,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for BinaryTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let current = self.root;
        IntoIter {
            tree: self,
            current,
            stack: Vec::new(),
        }
    }
}

/// An in-order iterator over the items of a `BinaryTree<T>`.
pub struct Iter<'a, T: 'a> {
    tree: &'a BinaryTree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = self.tree.left(node);
        }
        self.stack.pop().map(|node| {
            self.current = self.tree.right(node);
            self.tree.item(node)
        })
    }
}

/// An owning in-order iterator over the items of a `BinaryTree<T>`.
pub struct IntoIter<T> {
    tree: BinaryTree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = self.tree.left(node);
        }
        self.stack.pop().map(|node| {
            self.current = self.tree.right(node);
            self.tree.nodes.free(node).item
        })
    }
}
