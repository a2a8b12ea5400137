//! Disjoint-set (union-find) structure keyed by caller identifiers.
//!
//! Keys are mapped onto dense slots on [`DisjointSet::make_set`]. Unions are by
//! size with the lower slot winning ties, and [`DisjointSet::find`] compresses
//! every path it walks, so all operations are amortised near-constant time.

use std::{collections::HashMap, fmt, hash::Hash, sync::Arc};

use crate::error::ForestError;

/// Partition of registered keys into disjoint sets.
///
/// # Examples
/// ```
/// use maxforest_core::DisjointSet;
///
/// let mut sets = DisjointSet::new();
/// for node in ["a", "b", "c"] {
///     sets.make_set(node);
/// }
/// assert!(sets.union(&"a", &"b")?);
/// assert!(!sets.union(&"b", &"a")?);
/// assert!(sets.same_set(&"a", &"b")?);
/// assert!(!sets.same_set(&"a", &"c")?);
/// assert_eq!(sets.components(), 2);
/// # Ok::<(), maxforest_core::ForestError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet<K> {
    slots: HashMap<K, usize>,
    keys: Vec<K>,
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl<K> Default for DisjointSet<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            keys: Vec::new(),
            parent: Vec::new(),
            size: Vec::new(),
            components: 0,
        }
    }
}

impl<K> DisjointSet<K>
where
    K: Clone + Eq + Hash + fmt::Display,
{
    /// Creates an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty structure with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            size: Vec::with_capacity(capacity),
            components: 0,
        }
    }

    /// Registers `key` as a singleton set.
    ///
    /// Returns `false` without changing anything when the key is already
    /// registered.
    pub fn make_set(&mut self, key: K) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        let slot = self.keys.len();
        self.slots.insert(key.clone(), slot);
        self.keys.push(key);
        self.parent.push(slot);
        self.size.push(1);
        self.components = self.components.saturating_add(1);
        true
    }

    /// Returns the representative key of the set containing `key`.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownNode`] when `key` was never registered.
    pub fn find(&mut self, key: &K) -> Result<K, ForestError> {
        let slot = self.slot_of(key)?;
        let root = self.find_slot(slot);
        Ok(self.keys[root].clone())
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `true` when a merge happened and `false` when both keys were
    /// already in the same set.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownNode`] when either key was never
    /// registered.
    pub fn union(&mut self, left: &K, right: &K) -> Result<bool, ForestError> {
        let left_root = self.root_of(left)?;
        let right_root = self.root_of(right)?;
        if left_root == right_root {
            return Ok(false);
        }

        let (parent, child) = choose_parent_child(
            left_root,
            right_root,
            self.size[left_root],
            self.size[right_root],
        );
        self.parent[child] = parent;
        self.size[parent] = self.size[parent].saturating_add(self.size[child]);
        self.components = self.components.saturating_sub(1);
        Ok(true)
    }

    /// Returns `true` when both keys belong to the same set.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownNode`] when either key was never
    /// registered.
    pub fn same_set(&mut self, left: &K, right: &K) -> Result<bool, ForestError> {
        Ok(self.root_of(left)? == self.root_of(right)?)
    }

    /// Returns the number of members in the set containing `key`.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownNode`] when `key` was never registered.
    pub fn set_size(&mut self, key: &K) -> Result<usize, ForestError> {
        let root = self.root_of(key)?;
        Ok(self.size[root])
    }

    /// Returns the number of disjoint sets.
    #[must_use]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` when no key has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn root_of(&mut self, key: &K) -> Result<usize, ForestError> {
        let slot = self.slot_of(key)?;
        Ok(self.find_slot(slot))
    }

    fn slot_of(&self, key: &K) -> Result<usize, ForestError> {
        self.slots
            .get(key)
            .copied()
            .ok_or_else(|| ForestError::UnknownNode {
                node: Arc::from(key.to_string()),
            })
    }

    fn find_slot(&mut self, mut slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[slot] != root {
            let next = self.parent[slot];
            self.parent[slot] = root;
            slot = next;
        }

        root
    }
}

/// Picks which root absorbs the other: the larger set wins, and the lower
/// slot wins a size tie.
fn choose_parent_child(
    left_root: usize,
    right_root: usize,
    left_size: usize,
    right_size: usize,
) -> (usize, usize) {
    if left_size > right_size {
        return (left_root, right_root);
    }
    if right_size > left_size {
        return (right_root, left_root);
    }

    if left_root <= right_root {
        (left_root, right_root)
    } else {
        (right_root, left_root)
    }
}
