//! Unbalanced binary search tree of analysis records.
//!
//! ## Architecture
//!
//! ```text
//!   nodes (Vec<Node>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ NodeId │ Node { record, left, right }                 │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ 0      │ { key: 52, left: Some(1), right: Some(2) }   │
//!   │ 1      │ { key: -52, left: None, right: Some(3) }     │
//!   │ 2      │ { key: 2520, left: None, right: None }       │
//!   │ 3      │ { key: 0, left: None, right: None }          │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!                 root ─► [52]
//!                        /    \
//!                    [-52]   [2520]
//!                        \
//!                        [0]
//! ```
//!
//! Nodes live in a contiguous arena and link to their children by [`NodeId`].
//! Entries are never removed individually, so ids stay valid until
//! [`TreeStore::clear`].
//!
//! ## Core Operations
//! - `upsert`: descend from the root (less-than left, greater-or-equal right);
//!   overwrite on equal key, otherwise attach a new leaf.
//! - `lookup`: descend from the root; copy out on equal key, return the absent
//!   record on reaching an empty subtree.
//! - `clear`: release every node.
//!
//! ## Performance Trade-offs
//! - No rebalancing: tree shape is fixed by insertion order. Keys arriving in
//!   sorted order degenerate into a chain and O(n) operations.
//! - Traversal is iterative, so chains of any length are safe.
//! - Use [`BTreeStore`](crate::store::btree::BTreeStore) for guaranteed
//!   O(log n) behavior.
//!
//! ## Example Usage
//! ```rust
//! use intmemo::record::{AnalysisRecord, Tristate};
//! use intmemo::store::traits::RecordStore;
//! use intmemo::store::tree::TreeStore;
//!
//! let mut store = TreeStore::new();
//! let mut record = AnalysisRecord::new(52);
//! record.evenness = Tristate::True;
//! store.upsert(record);
//!
//! assert_eq!(store.lookup(52).evenness, Tristate::True);
//! assert!(store.lookup(51).is_absent());
//! ```
//!
//! `check_invariants()` verifies ordering and reachability.

use rustc_hash::FxHashSet;

use crate::error::InvariantError;
use crate::record::AnalysisRecord;
use crate::store::counters::StoreCounters;
use crate::store::traits::{RecordStore, StoreMetrics, Upsert};

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

#[derive(Debug)]
struct Node {
    record: AnalysisRecord,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Arena-backed unbalanced binary search tree keyed by `AnalysisRecord::key`.
#[derive(Debug, Default)]
pub struct TreeStore {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    height: usize,
    counters: StoreCounters,
}

impl TreeStore {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with arena space reserved for `capacity` nodes.
    ///
    /// Reservation is a hint only; the tree grows past it without limit.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the root node id, if any.
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the record stored at `id`, if present.
    pub fn get(&self, id: NodeId) -> Option<&AnalysisRecord> {
        self.nodes.get(id.0).map(|node| &node.record)
    }

    /// Returns the children of `id` as `(left, right)`.
    pub fn children(&self, id: NodeId) -> Option<(Option<NodeId>, Option<NodeId>)> {
        self.nodes.get(id.0).map(|node| (node.left, node.right))
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    ///
    /// Equals `len()` when keys were inserted in sorted order.
    pub fn depth(&self) -> usize {
        self.height
    }

    /// Reserved arena capacity.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns an in-order iterator over stored records (ascending keys).
    pub fn iter(&self) -> TreeIter<'_> {
        let mut iter = TreeIter {
            store: self,
            stack: Vec::with_capacity(self.height),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Finds the node holding `key`.
    fn find(&self, key: i32) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if node.record.key == key {
                return Some(id);
            }
            current = if key < node.record.key {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    fn alloc(&mut self, record: AnalysisRecord) -> NodeId {
        self.nodes.push(Node {
            record,
            left: None,
            right: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Panics on a broken invariant (debug builds only).
    fn debug_validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.check_invariants() {
                panic!("tree invariant violated: {}", err);
            }
        }
    }

    /// Validates ordering, reachability and uniqueness of every node.
    ///
    /// Left subtrees hold strictly smaller keys and right subtrees strictly
    /// larger ones (equal keys are overwritten, never re-inserted).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.root.is_none() {
            if !self.nodes.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty tree still owns {} nodes",
                    self.nodes.len()
                )));
            }
            if self.height != 0 {
                return Err(InvariantError::new(format!(
                    "empty tree reports depth {}",
                    self.height
                )));
            }
            return Ok(());
        }

        let mut seen_ids = vec![false; self.nodes.len()];
        let mut reachable = 0;
        let mut seen_keys = FxHashSet::default();
        let mut max_depth = 0;
        // (node, exclusive lower bound, exclusive upper bound, depth)
        let mut stack: Vec<(NodeId, Option<i32>, Option<i32>, usize)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, None, None, 1));
        }

        while let Some((id, low, high, depth)) = stack.pop() {
            let node = self
                .nodes
                .get(id.0)
                .ok_or_else(|| InvariantError::new(format!("dangling node id {:?}", id)))?;
            if std::mem::replace(&mut seen_ids[id.0], true) {
                return Err(InvariantError::new(format!(
                    "node {:?} reachable more than once",
                    id
                )));
            }
            reachable += 1;

            let key = node.record.key;
            if !seen_keys.insert(key) {
                return Err(InvariantError::new(format!("key {} stored twice", key)));
            }
            if low.is_some_and(|low| key <= low) || high.is_some_and(|high| key >= high) {
                return Err(InvariantError::new(format!(
                    "key {} out of order (bounds {:?}..{:?})",
                    key, low, high
                )));
            }

            max_depth = max_depth.max(depth);
            if let Some(left) = node.left {
                stack.push((left, low, Some(key), depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(key), high, depth + 1));
            }
        }

        if reachable != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "{} nodes allocated but {} reachable from root",
                self.nodes.len(),
                reachable
            )));
        }
        if max_depth != self.height {
            return Err(InvariantError::new(format!(
                "tracked depth {} but measured {}",
                self.height, max_depth
            )));
        }
        Ok(())
    }
}

impl RecordStore for TreeStore {
    fn upsert(&mut self, record: AnalysisRecord) -> Upsert {
        let mut parent: Option<(NodeId, Side)> = None;
        let mut current = self.root;
        let mut depth = 1;

        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            if node.record.key == record.key {
                node.record = record;
                self.counters.inc_update();
                return Upsert::Updated;
            }
            if record.key < node.record.key {
                parent = Some((id, Side::Left));
                current = node.left;
            } else {
                parent = Some((id, Side::Right));
                current = node.right;
            }
            depth += 1;
        }

        let id = self.alloc(record);
        match parent {
            None => self.root = Some(id),
            Some((parent, Side::Left)) => self.nodes[parent.0].left = Some(id),
            Some((parent, Side::Right)) => self.nodes[parent.0].right = Some(id),
        }
        self.height = self.height.max(depth);
        self.counters.inc_insert();

        tracing::trace!(key = record.key, depth, "attached tree node");
        self.debug_validate_invariants();
        Upsert::Inserted
    }

    fn lookup(&self, key: i32) -> AnalysisRecord {
        match self.find(key) {
            Some(id) => {
                self.counters.inc_hit();
                self.nodes[id.0].record
            },
            None => {
                self.counters.inc_miss();
                AnalysisRecord::absent()
            },
        }
    }

    fn contains(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.height = 0;
        self.counters.inc_clear();
        self.debug_validate_invariants();
    }

    fn metrics(&self) -> StoreMetrics {
        self.counters.snapshot()
    }
}

impl<'a> IntoIterator for &'a TreeStore {
    type Item = &'a AnalysisRecord;
    type IntoIter = TreeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`TreeStore`].
#[derive(Debug)]
pub struct TreeIter<'a> {
    store: &'a TreeStore,
    stack: Vec<NodeId>,
}

impl TreeIter<'_> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.store.nodes[id.0].left;
        }
    }
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = &'a AnalysisRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let store = self.store;
        let node = &store.nodes[id.0];
        self.push_left_spine(node.right);
        Some(&node.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Tristate;

    fn record(key: i32, evenness: Tristate, divisibility: Tristate) -> AnalysisRecord {
        AnalysisRecord {
            key,
            evenness,
            divisibility,
        }
    }

    // ==============================================
    // Basic Operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_tree_is_empty() {
            let tree = TreeStore::new();
            assert!(tree.is_empty());
            assert_eq!(tree.len(), 0);
            assert_eq!(tree.depth(), 0);
            assert!(tree.root_id().is_none());
            assert!(tree.check_invariants().is_ok());
        }

        #[test]
        fn with_capacity_reserves_arena() {
            let tree = TreeStore::with_capacity(64);
            assert!(tree.capacity() >= 64);
            assert!(tree.is_empty());
        }

        #[test]
        fn upsert_then_lookup() {
            let mut tree = TreeStore::new();
            let r = record(52, Tristate::True, Tristate::Unevaluated);
            assert!(tree.upsert(r).is_insert());
            assert!(!tree.upsert(r).is_insert());

            assert_eq!(tree.lookup(52), r);
            assert!(tree.contains(52));
            assert_eq!(tree.len(), 1);
        }

        #[test]
        fn lookup_miss_returns_absent_record() {
            let mut tree = TreeStore::new();
            tree.upsert(record(1, Tristate::False, Tristate::False));

            let missing = tree.lookup(2);
            assert!(missing.is_absent());
            assert_eq!(missing.evenness, Tristate::Unevaluated);
            assert_eq!(missing.divisibility, Tristate::Unevaluated);
        }

        #[test]
        fn lookup_on_empty_tree() {
            let tree = TreeStore::new();
            assert_eq!(tree.lookup(0), AnalysisRecord::absent());
        }

        #[test]
        fn lookup_returns_a_copy() {
            let mut tree = TreeStore::new();
            tree.upsert(record(7, Tristate::False, Tristate::Unevaluated));

            let mut copy = tree.lookup(7);
            copy.divisibility = Tristate::True;

            assert_ne!(copy, tree.lookup(7));
            assert_eq!(tree.lookup(7).divisibility, Tristate::Unevaluated);
        }
    }

    // ==============================================
    // Upsert Semantics
    // ==============================================

    mod upsert_semantics {
        use super::*;

        #[test]
        fn existing_key_is_fully_replaced() {
            let mut tree = TreeStore::new();
            tree.upsert(record(52, Tristate::True, Tristate::Unevaluated));
            let outcome = tree.upsert(record(52, Tristate::Unevaluated, Tristate::False));

            assert_eq!(outcome, Upsert::Updated);
            assert_eq!(tree.len(), 1);
            // Full replace: the caller is responsible for merging.
            assert_eq!(
                tree.lookup(52),
                record(52, Tristate::Unevaluated, Tristate::False)
            );
        }

        #[test]
        fn update_does_not_change_shape() {
            let mut tree = TreeStore::new();
            for key in [50, 25, 75] {
                tree.upsert(AnalysisRecord::new(key));
            }
            let root = tree.root_id();
            let depth = tree.depth();

            tree.upsert(record(25, Tristate::False, Tristate::False));

            assert_eq!(tree.root_id(), root);
            assert_eq!(tree.depth(), depth);
            assert_eq!(tree.len(), 3);
        }

        #[test]
        fn smaller_keys_go_left_larger_go_right() {
            let mut tree = TreeStore::new();
            for key in [50, 25, 75] {
                tree.upsert(AnalysisRecord::new(key));
            }

            let root = tree.root_id().unwrap();
            assert_eq!(tree.get(root).unwrap().key, 50);

            let (left, right) = tree.children(root).unwrap();
            assert_eq!(tree.get(left.unwrap()).unwrap().key, 25);
            assert_eq!(tree.get(right.unwrap()).unwrap().key, 75);
            assert_eq!(tree.depth(), 2);
        }

        #[test]
        fn extreme_keys_are_ordered() {
            let mut tree = TreeStore::new();
            for key in [0, i32::MAX, i32::MIN + 1, -1, 1] {
                tree.upsert(AnalysisRecord::new(key));
            }

            let keys: Vec<i32> = tree.iter().map(|r| r.key).collect();
            assert_eq!(keys, vec![i32::MIN + 1, -1, 0, 1, i32::MAX]);
            assert!(tree.check_invariants().is_ok());
        }
    }

    // ==============================================
    // Shape (no rebalancing)
    // ==============================================

    mod shape {
        use super::*;

        #[test]
        fn sorted_insertion_degenerates_into_chain() {
            let mut tree = TreeStore::new();
            for key in 0..100 {
                tree.upsert(AnalysisRecord::new(key));
            }
            assert_eq!(tree.depth(), 100);
            assert!(tree.lookup(99).key == 99);
            assert!(tree.check_invariants().is_ok());
        }

        #[test]
        fn long_chain_does_not_overflow_stack() {
            let mut tree = TreeStore::new();
            for key in (0..5_000).rev() {
                tree.upsert(AnalysisRecord::new(key));
            }
            assert_eq!(tree.depth(), 5_000);
            assert_eq!(tree.lookup(4_999).key, 4_999);
            assert_eq!(tree.iter().count(), 5_000);
            tree.clear();
            assert!(tree.is_empty());
        }

        #[test]
        fn balanced_insertion_stays_shallow() {
            let mut tree = TreeStore::new();
            for key in [8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7, 9, 11, 13, 15] {
                tree.upsert(AnalysisRecord::new(key));
            }
            assert_eq!(tree.depth(), 4);
        }
    }

    // ==============================================
    // Clear
    // ==============================================

    mod clear {
        use super::*;

        #[test]
        fn clear_releases_everything() {
            let mut tree = TreeStore::new();
            for key in [3, 1, 2] {
                tree.upsert(AnalysisRecord::new(key));
            }
            tree.clear();

            assert!(tree.is_empty());
            assert_eq!(tree.depth(), 0);
            assert!(tree.lookup(3).is_absent());
            assert!(tree.check_invariants().is_ok());
        }

        #[test]
        fn clear_on_empty_tree_is_noop() {
            let mut tree = TreeStore::new();
            tree.clear();
            tree.clear();
            assert!(tree.is_empty());
        }

        #[test]
        fn tree_is_reusable_after_clear() {
            let mut tree = TreeStore::new();
            tree.upsert(AnalysisRecord::new(5));
            tree.clear();
            assert_eq!(tree.upsert(AnalysisRecord::new(5)), Upsert::Inserted);
            assert_eq!(tree.len(), 1);
        }
    }

    // ==============================================
    // Invariant Checks
    // ==============================================

    mod invariants {
        use super::*;

        fn three_node_tree() -> TreeStore {
            let mut tree = TreeStore::new();
            for key in [50, 25, 75] {
                tree.upsert(AnalysisRecord::new(key));
            }
            tree
        }

        fn violation(tree: &TreeStore) -> String {
            tree.check_invariants().unwrap_err().message().to_string()
        }

        #[test]
        fn detects_dangling_child() {
            let mut tree = three_node_tree();
            tree.nodes[1].left = Some(NodeId(99));
            assert!(violation(&tree).contains("dangling"));
        }

        #[test]
        fn detects_duplicated_child_link() {
            let mut tree = three_node_tree();
            tree.nodes[1].left = Some(NodeId(1));
            assert!(violation(&tree).contains("more than once"));
        }

        #[test]
        fn detects_out_of_order_key() {
            let mut tree = three_node_tree();
            tree.nodes[1].record.key = 60;
            assert!(violation(&tree).contains("out of order"));
        }

        #[test]
        fn detects_unreachable_node() {
            let mut tree = three_node_tree();
            tree.alloc(AnalysisRecord::new(10));
            assert!(violation(&tree).contains("reachable from root"));
        }

        #[test]
        fn detects_depth_mismatch() {
            let mut tree = three_node_tree();
            tree.height = 5;
            assert!(violation(&tree).contains("tracked depth"));
        }

        #[test]
        fn detects_nodes_without_root() {
            let mut tree = three_node_tree();
            tree.root = None;
            assert!(violation(&tree).contains("empty tree"));
        }

        #[cfg(debug_assertions)]
        #[test]
        #[should_panic(expected = "tree invariant violated")]
        fn corrupted_tree_panics_on_next_insert() {
            let mut tree = three_node_tree();
            tree.nodes[2].record.key = 10;
            tree.upsert(AnalysisRecord::new(100));
        }
    }

    // ==============================================
    // Metrics
    // ==============================================

    #[test]
    fn metrics_count_operations() {
        let mut tree = TreeStore::new();
        tree.upsert(AnalysisRecord::new(1));
        tree.upsert(AnalysisRecord::new(1));
        tree.lookup(1);
        tree.lookup(2);
        tree.clear();

        let metrics = tree.metrics();
        assert_eq!(metrics.inserts, 1);
        assert_eq!(metrics.updates, 1);
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.clears, 1);
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeMap;

        proptest! {
            /// Property: the tree agrees with a reference map after any upsert sequence
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_map(
                ops in prop::collection::vec((-64i32..64, any::<bool>(), any::<bool>()), 0..200)
            ) {
                let mut tree = TreeStore::new();
                let mut reference = BTreeMap::new();

                for (key, even, div) in ops {
                    let r = record(key, Tristate::from(even), Tristate::from(div));
                    let expected = if reference.insert(key, r).is_some() {
                        Upsert::Updated
                    } else {
                        Upsert::Inserted
                    };
                    prop_assert_eq!(tree.upsert(r), expected);
                }

                prop_assert_eq!(tree.len(), reference.len());
                prop_assert!(tree.check_invariants().is_ok());
                for key in -64..64 {
                    match reference.get(&key) {
                        Some(r) => prop_assert_eq!(tree.lookup(key), *r),
                        None => prop_assert!(tree.lookup(key).is_absent()),
                    }
                }
            }

            /// Property: in-order iteration yields strictly ascending keys
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_iter_is_sorted(keys in prop::collection::vec(any::<i32>(), 0..100)) {
                let mut tree = TreeStore::new();
                for key in keys {
                    tree.upsert(AnalysisRecord::new(key));
                }

                let collected: Vec<i32> = tree.iter().map(|r| r.key).collect();
                prop_assert_eq!(collected.len(), tree.len());
                prop_assert!(collected.windows(2).all(|w| w[0] < w[1]));
            }

            /// Property: depth never exceeds the number of nodes
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_depth_bounded_by_len(keys in prop::collection::vec(-1000i32..1000, 0..100)) {
                let mut tree = TreeStore::new();
                for key in keys {
                    tree.upsert(AnalysisRecord::new(key));
                }
                prop_assert!(tree.depth() <= tree.len());
                prop_assert_eq!(tree.depth() == 0, tree.is_empty());
            }
        }
    }
}
