//! Slot allocator that owns every node of a tree.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A stable reference to an object allocated in a `TypedArena<T>`.
///
/// A handle stays valid until the object it refers to is freed, regardless of how many other
/// objects are allocated or freed in the meantime. Handles are totally ordered so they can be
/// used to break ties between otherwise equal objects.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Handle(usize);

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Objects are stored in a single `Vec` and freed blocks are threaded into a free list that is
/// reused by later allocations, so a handle is never moved while its object is alive. Cloning
/// the arena clones every live object and preserves every handle.
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<Handle>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    pub fn new() -> Self {
        TypedArena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates an object and returns its handle. Vacant blocks are reused before the arena
    /// grows.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle(self.blocks.len() - 1)
            },
            Some(handle) => {
                let vacant_block = mem::replace(&mut self.blocks[handle.0], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next) => {
                        self.head = next;
                        handle
                    },
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
            },
        }
    }

    /// Deallocates an object and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` refers to an invalid or vacant block.
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[handle.0], Block::Vacant(self.head));
        match old_block {
            Block::Vacant(next) => {
                self.blocks[handle.0] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.blocks.get(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every object. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
