use crate::arena::Handle;
use crate::entry::Entry;
use crate::tree::{BinaryTree, Side};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// The outcome of walking the tree towards a key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Search {
    /// The node holding the key.
    Found(Handle),
    /// The key is absent. Holds the node a new entry with that key would hang from, or `None` if
    /// the tree is empty.
    Vacant(Option<Handle>),
}

pub fn find<E, Q>(tree: &BinaryTree<E>, key: &Q) -> Search
where
    E: Entry,
    E::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = match tree.root() {
        Some(root) => root,
        None => return Search::Vacant(None),
    };
    loop {
        let next = match key.cmp(tree.item(curr).key().borrow()) {
            Ordering::Less => tree.left(curr),
            Ordering::Greater => tree.right(curr),
            Ordering::Equal => return Search::Found(curr),
        };
        match next {
            Some(next) => curr = next,
            None => return Search::Vacant(Some(curr)),
        }
    }
}

pub fn get<'a, E, Q>(tree: &'a BinaryTree<E>, key: &Q) -> Option<&'a E>
where
    E: Entry,
    E::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    match find(tree, key) {
        Search::Found(node) => Some(tree.item(node)),
        Search::Vacant(_) => None,
    }
}

pub fn get_mut<'a, E, Q>(tree: &'a mut BinaryTree<E>, key: &Q) -> Option<&'a mut E>
where
    E: Entry,
    E::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    match find(tree, key) {
        Search::Found(node) => Some(tree.item_mut(node)),
        Search::Vacant(_) => None,
    }
}

/// Attaches `entry` as a new leaf and returns its node. If the key is already present the tree
/// is left unchanged and the entry is handed back.
pub fn attach<E>(tree: &mut BinaryTree<E>, entry: E) -> Result<Handle, E>
where
    E: Entry,
{
    match find(tree, entry.key()) {
        Search::Found(_) => Err(entry),
        Search::Vacant(None) => {
            let node = tree.allocate(entry);
            tree.replace_root(Some(node));
            Ok(node)
        },
        Search::Vacant(Some(parent)) => {
            let side = if entry.key() < tree.item(parent).key() {
                Side::Left
            } else {
                Side::Right
            };
            let node = tree.allocate(entry);
            tree.set_child(parent, side, Some(node));
            Ok(node)
        },
    }
}

/// Unlinks `node` from the tree while keeping the binary search tree order. On return `node` has
/// no parent and no children; every other node keeps its identity.
pub fn extract<E>(tree: &mut BinaryTree<E>, node: Handle) {
    match (tree.left(node), tree.right(node)) {
        (None, None) => tree.replace_in_parent(node, None),
        (Some(child), None) | (None, Some(child)) => tree.replace_in_parent(node, Some(child)),
        (Some(left), Some(right)) => {
            if tree.left(right).is_none() {
                // the right child takes the vacated slot and adopts the left subtree
                tree.replace_in_parent(node, Some(right));
                tree.set_child(right, Side::Left, Some(left));
            } else {
                let successor = leftmost(tree, right);
                // the successor has no left child, so splicing out its right subtree suffices
                let successor_right = tree.right(successor);
                tree.replace_in_parent(successor, successor_right);
                tree.set_child(successor, Side::Left, Some(left));
                tree.set_child(successor, Side::Right, Some(right));
                tree.replace_in_parent(node, Some(successor));
            }
        },
    }
    trace!("extracted node {:?}", node);
}

/// Returns the leftmost node of the subtree rooted at `node`.
pub fn leftmost<E>(tree: &BinaryTree<E>, node: Handle) -> Handle {
    let mut curr = node;
    while let Some(left) = tree.left(curr) {
        curr = left;
    }
    curr
}

pub fn rightmost<E>(tree: &BinaryTree<E>, node: Handle) -> Handle {
    let mut curr = node;
    while let Some(right) = tree.right(curr) {
        curr = right;
    }
    curr
}

pub fn min<E>(tree: &BinaryTree<E>) -> Option<&E> {
    tree.root().map(|root| tree.item(leftmost(tree, root)))
}

pub fn max<E>(tree: &BinaryTree<E>) -> Option<&E> {
    tree.root().map(|root| tree.item(rightmost(tree, root)))
}

/// Returns the entry with the smallest key greater than or equal to `key`.
pub fn ceil<'a, E, Q>(tree: &'a BinaryTree<E>, key: &Q) -> Option<&'a E>
where
    E: Entry,
    E::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = tree.root();
    let mut best = None;
    while let Some(node) = curr {
        match key.cmp(tree.item(node).key().borrow()) {
            Ordering::Greater => curr = tree.right(node),
            Ordering::Less => {
                best = Some(node);
                curr = tree.left(node);
            },
            Ordering::Equal => return Some(tree.item(node)),
        }
    }
    best.map(|node| tree.item(node))
}

/// Returns the entry with the largest key less than or equal to `key`.
pub fn floor<'a, E, Q>(tree: &'a BinaryTree<E>, key: &Q) -> Option<&'a E>
where
    E: Entry,
    E::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = tree.root();
    let mut best = None;
    while let Some(node) = curr {
        match key.cmp(tree.item(node).key().borrow()) {
            Ordering::Less => curr = tree.left(node),
            Ordering::Greater => {
                best = Some(node);
                curr = tree.right(node);
            },
            Ordering::Equal => return Some(tree.item(node)),
        }
    }
    best.map(|node| tree.item(node))
}
