//! Fibonacci heap priority queue.
//!
//! The heap is a collection of heap-ordered trees whose roots form a circular
//! doubly linked list. Every node lives in an arena and links to its parent,
//! first child, and left/right siblings by slot index, so cutting and
//! splicing are plain index reassignments and no reference cycles exist.
//!
//! Amortized costs: `insert`, `decrease_key`, and `find_min` are O(1);
//! `extract_min` and `delete` are O(log n). `union` splices the root lists in
//! O(1) after relocating the smaller arena into the larger one.
//!
//! Handles identify an element of the heap that issued them. A handle goes
//! stale once its element leaves the heap; [`FibonacciHeap::contains`]
//! reports whether a handle is still live and every handle-taking operation
//! rejects stale handles with [`HeapError::StaleHandle`].
//!
//! Each heap draws its id from one process-wide atomic counter. That counter
//! is the only state shared between instances and is only ever incremented;
//! it exists so ids stay distinct when heaps created on different threads are
//! later merged, which a per-thread counter could not guarantee.
//!
//! # Consolidation order
//!
//! After a minimum is removed, the remaining roots are visited in root-list
//! order starting right of the removed node. When two roots share a degree the
//! one with the larger key becomes a child of the other; on equal keys the
//! root visited earlier stays on top. The new minimum is the first root with
//! the smallest key in degree order.

use std::cmp::Ordering;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::error::HeapError;

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct HeapId(u64);

impl HeapId {
    fn fresh() -> Self {
        Self(NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// Reference to an element stored in a [`FibonacciHeap`].
///
/// Handles are cheap to copy. They stay valid until their element is
/// extracted or deleted, including after the issuing heap is merged into
/// another heap with [`FibonacciHeap::union`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HeapHandle {
    heap: HeapId,
    slot: usize,
    generation: u32,
}

/// Arena region of an absorbed heap: handles issued by `heap` resolve to
/// `slot + offset`.
#[derive(Clone, Copy, Debug)]
struct Origin {
    heap: HeapId,
    offset: usize,
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
    degree: usize,
    marked: bool,
    // Orders below every key; set only while the node is being deleted.
    sentinel: bool,
}

impl<K: Ord, V> Node<K, V> {
    fn cmp_key(&self, other: &Self) -> Ordering {
        match (self.sentinel, other.sentinel) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.key.cmp(&other.key),
        }
    }

    fn precedes(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Less
    }
}

impl<K, V> Node<K, V> {
    fn relocate(&mut self, base: usize) {
        self.parent = self.parent.map(|index| index + base);
        self.child = self.child.map(|index| index + base);
        self.left += base;
        self.right += base;
    }
}

#[derive(Debug)]
struct Slot<K, V> {
    generation: u32,
    node: Option<Node<K, V>>,
}

/// Min-priority queue backed by a Fibonacci heap.
///
/// # Examples
/// ```
/// use fibforest_core::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let a = heap.insert(10, "a");
/// heap.insert(5, "b");
/// heap.decrease_key(&a, 1)?;
/// assert_eq!(heap.find_min(), Some((&1, &"a")));
/// assert_eq!(heap.extract_min(), Some((1, "a")));
/// assert!(!heap.contains(&a));
/// # Ok::<(), fibforest_core::HeapError>(())
/// ```
#[derive(Debug)]
pub struct FibonacciHeap<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    min: Option<usize>,
    len: usize,
    id: HeapId,
    origins: Vec<Origin>,
}

impl<K: Ord, V> Default for FibonacciHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let id = HeapId::fresh();
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            min: None,
            len: 0,
            id,
            origins: vec![Origin { heap: id, offset: 0 }],
        }
    }

    /// Returns the number of elements in the heap.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.len }

    /// Returns `true` when the heap holds no elements.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Inserts `value` with priority `key` and returns its handle.
    pub fn insert(&mut self, key: K, value: V) -> HeapHandle {
        let (slot, generation) = self.allocate(Node {
            key,
            value,
            parent: None,
            child: None,
            left: 0,
            right: 0,
            degree: 0,
            marked: false,
            sentinel: false,
        });
        self.add_root(slot);
        self.len += 1;
        HeapHandle {
            heap: self.id,
            slot,
            generation,
        }
    }

    /// Returns the minimum key and its value without removing them.
    #[must_use]
    pub fn find_min(&self) -> Option<(&K, &V)> {
        self.min.map(|index| {
            let node = self.node(index);
            (&node.key, &node.value)
        })
    }

    /// Removes and returns the element with the smallest key.
    ///
    /// Returns `None` when the heap is empty.
    pub fn extract_min(&mut self) -> Option<(K, V)> {
        self.pop_min().map(|node| (node.key, node.value))
    }

    /// Lowers the key of the element behind `handle` to `key`.
    ///
    /// Passing the current key is accepted and leaves the heap unchanged.
    ///
    /// # Errors
    /// Returns [`HeapError::StaleHandle`] when `handle` is not contained in
    /// this heap and [`HeapError::KeyIncrease`] when `key` is greater than the
    /// current key. Neither error mutates the heap.
    pub fn decrease_key(&mut self, handle: &HeapHandle, key: K) -> Result<(), HeapError> {
        let index = self.resolve(handle).ok_or(HeapError::StaleHandle)?;
        if key > self.node(index).key {
            return Err(HeapError::KeyIncrease);
        }
        self.node_mut(index).key = key;
        self.restore_order(index);
        Ok(())
    }

    /// Removes the element behind `handle` and returns its key and value.
    ///
    /// The element is first moved below every other key using an internal
    /// sentinel, then extracted, so the key type needs no "negative
    /// infinity" value of its own.
    ///
    /// # Errors
    /// Returns [`HeapError::StaleHandle`] when the heap is non-empty and
    /// `handle` is not contained in it. An empty heap yields `Ok(None)`.
    pub fn delete(&mut self, handle: &HeapHandle) -> Result<Option<(K, V)>, HeapError> {
        if self.is_empty() {
            return Ok(None);
        }
        let index = self.resolve(handle).ok_or(HeapError::StaleHandle)?;
        self.node_mut(index).sentinel = true;
        self.restore_order(index);
        Ok(self.pop_min().map(|node| (node.key, node.value)))
    }

    /// Moves every element of `other` into this heap.
    ///
    /// Handles issued by either heap keep working on the merged heap.
    pub fn union(&mut self, mut other: Self) {
        if other.slots.len() > self.slots.len() {
            mem::swap(self, &mut other);
        }

        let base = self.slots.len();
        for slot in &mut other.slots {
            if let Some(node) = slot.node.as_mut() {
                node.relocate(base);
            }
        }
        self.slots.append(&mut other.slots);
        self.free.extend(other.free.iter().map(|index| index + base));
        self.origins
            .extend(other.origins.iter().map(|origin| Origin {
                heap: origin.heap,
                offset: origin.offset + base,
            }));

        if let Some(other_min) = other.min.map(|index| index + base) {
            match self.min {
                None => self.min = Some(other_min),
                Some(min) => {
                    self.splice_rings(min, other_min);
                    if self.node(other_min).precedes(self.node(min)) {
                        self.min = Some(other_min);
                    }
                }
            }
        }
        self.len += other.len;
    }

    /// Returns `true` when `handle` refers to an element of this heap.
    #[must_use]
    pub fn contains(&self, handle: &HeapHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Returns the current key of the element behind `handle`.
    #[must_use]
    pub fn key(&self, handle: &HeapHandle) -> Option<&K> {
        self.resolve(handle).map(|index| &self.node(index).key)
    }

    /// Returns the value of the element behind `handle`.
    #[must_use]
    pub fn value(&self, handle: &HeapHandle) -> Option<&V> {
        self.resolve(handle).map(|index| &self.node(index).value)
    }

    fn resolve(&self, handle: &HeapHandle) -> Option<usize> {
        let origin = self
            .origins
            .iter()
            .find(|origin| origin.heap == handle.heap)?;
        let index = origin.offset.checked_add(handle.slot)?;
        let slot = self.slots.get(index)?;
        (slot.generation == handle.generation && slot.node.is_some()).then_some(index)
    }

    fn allocate(&mut self, node: Node<K, V>) -> (usize, u32) {
        if let Some(index) = self.free.pop() {
            let slot = self.slot_mut(index);
            slot.node = Some(node);
            return (index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        (self.slots.len() - 1, 0)
    }

    fn release(&mut self, index: usize) -> Node<K, V> {
        let slot = self.slot_mut(index);
        let Some(node) = slot.node.take() else {
            panic!("released heap slot {index} was already vacant");
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        node
    }

    fn pop_min(&mut self) -> Option<Node<K, V>> {
        let min = self.min?;
        self.promote_children(min);

        let next = self.node(min).right;
        self.unlink(min);
        self.len -= 1;
        if next == min {
            self.min = None;
        } else {
            self.min = Some(next);
            self.consolidate(next);
        }
        Some(self.release(min))
    }

    /// Moves all children of `index` into the root list, clearing their
    /// parent links and marks.
    fn promote_children(&mut self, index: usize) {
        let Some(first) = self.node(index).child else {
            return;
        };
        for child in self.ring(first) {
            let node = self.node_mut(child);
            node.parent = None;
            node.marked = false;
            self.splice_left_of(index, child);
        }
        let node = self.node_mut(index);
        node.child = None;
        node.degree = 0;
    }

    fn consolidate(&mut self, start: usize) {
        let roots = self.ring(start);
        let mut by_degree: Vec<Option<usize>> = vec![None; degree_bound(self.len) + 1];

        for root in roots {
            let mut tree = root;
            let mut degree = self.node(tree).degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(earlier) = by_degree[degree].take() else {
                    break;
                };
                let (parent, child) = if self.node(tree).precedes(self.node(earlier)) {
                    (tree, earlier)
                } else {
                    (earlier, tree)
                };
                self.link(child, parent);
                tree = parent;
                degree += 1;
            }
            by_degree[degree] = Some(tree);
        }

        // Root links are rebuilt from the degree table.
        self.min = None;
        for root in by_degree.into_iter().flatten() {
            self.add_root(root);
        }
    }

    /// Makes root `child` the last child of root `parent`.
    fn link(&mut self, child: usize, parent: usize) {
        let node = self.node_mut(child);
        node.parent = Some(parent);
        node.marked = false;
        match self.node(parent).child {
            Some(first) => self.splice_left_of(first, child),
            None => {
                let node = self.node_mut(child);
                node.left = child;
                node.right = child;
                self.node_mut(parent).child = Some(child);
            }
        }
        self.node_mut(parent).degree += 1;
    }

    fn restore_order(&mut self, index: usize) {
        if let Some(parent) = self.node(index).parent {
            if self.node(index).precedes(self.node(parent)) {
                self.cut(index);
                self.cascading_cut(parent);
            }
        }
        if let Some(min) = self.min {
            if self.node(index).precedes(self.node(min)) {
                self.min = Some(index);
            }
        }
    }

    /// Detaches `index` from its parent and makes it an unmarked root.
    fn cut(&mut self, index: usize) {
        let Some(parent) = self.node(index).parent else {
            return;
        };
        let right = self.node(index).right;
        if self.node(parent).child == Some(index) {
            self.node_mut(parent).child = (right != index).then_some(right);
        }
        self.unlink(index);
        self.node_mut(parent).degree -= 1;

        let node = self.node_mut(index);
        node.parent = None;
        node.marked = false;
        self.add_root(index);
    }

    fn cascading_cut(&mut self, mut index: usize) {
        while let Some(parent) = self.node(index).parent {
            if !self.node(index).marked {
                self.node_mut(index).marked = true;
                return;
            }
            self.cut(index);
            index = parent;
        }
    }

    fn add_root(&mut self, index: usize) {
        match self.min {
            None => {
                let node = self.node_mut(index);
                node.left = index;
                node.right = index;
                self.min = Some(index);
            }
            Some(min) => {
                self.splice_left_of(min, index);
                if self.node(index).precedes(self.node(min)) {
                    self.min = Some(index);
                }
            }
        }
    }

    fn splice_left_of(&mut self, anchor: usize, index: usize) {
        let left = self.node(anchor).left;
        let node = self.node_mut(index);
        node.left = left;
        node.right = anchor;
        self.node_mut(left).right = index;
        self.node_mut(anchor).left = index;
    }

    fn splice_rings(&mut self, first: usize, second: usize) {
        let first_left = self.node(first).left;
        let second_left = self.node(second).left;
        self.node_mut(first_left).right = second;
        self.node_mut(second).left = first_left;
        self.node_mut(second_left).right = first;
        self.node_mut(first).left = second_left;
    }

    fn unlink(&mut self, index: usize) {
        let (left, right) = {
            let node = self.node(index);
            (node.left, node.right)
        };
        self.node_mut(left).right = right;
        self.node_mut(right).left = left;
        let node = self.node_mut(index);
        node.left = index;
        node.right = index;
    }

    /// Collects the circular sibling list containing `start`, beginning at it.
    fn ring(&self, start: usize) -> Vec<usize> {
        let mut members = vec![start];
        let mut current = self.node(start).right;
        while current != start {
            members.push(current);
            current = self.node(current).right;
        }
        members
    }
}

impl<K, V> FibonacciHeap<K, V> {
    fn slot_mut(&mut self, index: usize) -> &mut Slot<K, V> {
        match self.slots.get_mut(index) {
            Some(slot) => slot,
            None => panic!("heap link points past the arena at slot {index}"),
        }
    }

    fn node(&self, index: usize) -> &Node<K, V> {
        match self.slots.get(index).and_then(|slot| slot.node.as_ref()) {
            Some(node) => node,
            None => panic!("heap link points at vacant slot {index}"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<K, V> {
        match self.slot_mut(index).node.as_mut() {
            Some(node) => node,
            None => panic!("heap link points at vacant slot {index}"),
        }
    }
}

/// Upper bound on any node degree in a heap of `len` elements.
///
/// `D(n) <= floor(log_phi(n)) <= floor(log_1.5(n))`.
fn degree_bound(len: usize) -> usize {
    if len < 2 {
        return 1;
    }
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the bound only needs to be approximately logarithmic; the table grows on demand"
    )]
    let bound = ((len as f64).ln() / 1.5_f64.ln()).floor() as usize;
    bound
}

#[cfg(test)]
mod invariants;
