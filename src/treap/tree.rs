use crate::arena::Handle;
use crate::bst::tree as bst;
use crate::tree::{BinaryTree, Side};
use crate::treap::entry::PriorityEntry;
use log::trace;

pub type Tree<K, V> = BinaryTree<PriorityEntry<K, V>>;

// Priorities are compared together with the node handle so that two equal priorities still have
// a strict order.
fn rank<K, V>(tree: &Tree<K, V>, node: Handle) -> (u32, Handle) {
    (tree.item(node).priority, node)
}

/// Checks the min-heap order around `node`: its rank is not smaller than its parent's and not
/// larger than either child's. Absent neighbours impose no constraint.
pub fn is_heap_ok<K, V>(tree: &Tree<K, V>, node: Handle) -> bool {
    let node_rank = rank(tree, node);
    let parent_ok = tree
        .parent(node)
        .map_or(true, |parent| node_rank >= rank(tree, parent));
    let left_ok = tree
        .left(node)
        .map_or(true, |left| node_rank <= rank(tree, left));
    let right_ok = tree
        .right(node)
        .map_or(true, |right| node_rank <= rank(tree, right));
    parent_ok && left_ok && right_ok
}

// Exchanges `node` with its parent. `side` is the side of the parent `node` currently hangs from;
// the subtree of `node` on the opposite side is donated to the parent.
fn rotate_over_parent<K, V>(tree: &mut Tree<K, V>, node: Handle, side: Side) {
    let parent = match tree.parent(node) {
        Some(parent) => parent,
        None => return,
    };
    trace!("rotating {:?} over {:?}", node, parent);
    let donated = tree.child(node, side.opposite());
    tree.replace_in_parent(parent, Some(node));
    tree.set_child(parent, side, donated);
    tree.set_child(node, side.opposite(), Some(parent));
}

/// Rotates a right child over its parent: the node takes the parent's position, the parent
/// becomes its left child and its former left subtree becomes the parent's right subtree.
/// Returns `false` and does nothing if `node` is not a right child.
pub fn rotate_left_over_parent<K, V>(tree: &mut Tree<K, V>, node: Handle) -> bool {
    if tree.side_of(node) != Some(Side::Right) {
        return false;
    }
    rotate_over_parent(tree, node, Side::Right);
    true
}

/// Mirror image of `rotate_left_over_parent`. Returns `false` and does nothing if `node` is not a
/// left child.
pub fn rotate_right_over_parent<K, V>(tree: &mut Tree<K, V>, node: Handle) -> bool {
    if tree.side_of(node) != Some(Side::Left) {
        return false;
    }
    rotate_over_parent(tree, node, Side::Left);
    true
}

/// Inserts `entry` as a binary search tree leaf and rotates it upwards until its parent has a
/// smaller rank or it becomes the root. The entry is handed back if its key is already present.
pub fn insert<K, V>(
    tree: &mut Tree<K, V>,
    entry: PriorityEntry<K, V>,
) -> Result<Handle, PriorityEntry<K, V>>
where
    K: Ord,
{
    let node = bst::attach(tree, entry)?;
    while !is_heap_ok(tree, node) {
        let rotated = match tree.side_of(node) {
            Some(Side::Left) => rotate_right_over_parent(tree, node),
            Some(Side::Right) => rotate_left_over_parent(tree, node),
            None => false,
        };
        if !rotated {
            break;
        }
    }
    Ok(node)
}

/// Unlinks `node` by rotating its lower ranked child over it until it is a leaf, then detaching
/// it. Both the key order and the heap order hold after every step.
pub fn remove<K, V>(tree: &mut Tree<K, V>, node: Handle)
where
    K: Ord,
{
    loop {
        let child = match (tree.left(node), tree.right(node)) {
            (None, None) => break,
            (Some(child), None) | (None, Some(child)) => child,
            (Some(left), Some(right)) => {
                if rank(tree, left) < rank(tree, right) {
                    left
                } else {
                    right
                }
            },
        };
        match tree.side_of(child) {
            Some(Side::Left) => rotate_right_over_parent(tree, child),
            _ => rotate_left_over_parent(tree, child),
        };
    }
    bst::extract(tree, node);
}
