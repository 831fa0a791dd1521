// Copyright (c) 2024-present, Andrew Werner
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::{cmp::Ordering, fmt};

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use tracing::trace;

use crate::{
    arena::{Arena, NodeId, HEAD},
    comparator::{Comparator, OrdComparator},
    cursor::{Cursor, Iter},
};

/// Upper bound on the number of levels any node, including the sentinel,
/// is linked into.
pub const MAX_LEVEL: usize = 32;

// Per level, the last node whose key is strictly less than the search key.
// Levels the search never visited keep the sentinel.
type Splices = [NodeId; MAX_LEVEL];

/// An ordered map backed by a skip list.
///
/// Keys are ordered by the comparator `C` supplied at construction. Lookups,
/// inserts and removals take O(log n) expected time; iteration walks the
/// bottom level in ascending order.
///
/// Each inserted node is promoted one level at a time for as long as a fair
/// coin drawn from `R` comes up heads, so the level layout is reproducible
/// given a seed (see [`SkipList::with_seed`]).
///
/// The list performs no synchronization. Mutation requires `&mut self`, and
/// a [`Cursor`] borrows the list, so a cursor can never observe a concurrent
/// structural change.
///
/// ```rust
/// use ordered_skiplist::{SkipList, StringComparator};
///
/// let mut list = SkipList::new(StringComparator);
/// list.insert("test-key-2", 2);
/// list.insert("test-key-1", 1);
/// assert_eq!(list.get(&"test-key-2"), Some(&2));
/// assert_eq!(list.len(), 2);
///
/// let mut cursor = list.cursor();
/// while cursor.advance() {
///     println!("{:?} = {:?}", cursor.key(), cursor.value());
/// }
/// ```
pub struct SkipList<K, V, C = OrdComparator, R = StdRng> {
    arena: Arena<K, V>,
    // Topmost level the sentinel links from. 0 when empty.
    height: usize,
    len: usize,
    comparator: C,
    rng: R,
}

impl<K, V, C> SkipList<K, V, C, StdRng> {
    /// Constructs an empty list ordered by `comparator`, drawing level
    /// promotions from an OS-seeded generator.
    pub fn new(comparator: C) -> Self {
        Self::with_rng(comparator, StdRng::from_os_rng())
    }

    /// Constructs an empty list whose level promotions are fully determined
    /// by `seed`.
    pub fn with_seed(comparator: C, seed: u64) -> Self {
        Self::with_rng(comparator, StdRng::seed_from_u64(seed))
    }
}

impl<K, V, C, R> SkipList<K, V, C, R> {
    /// Constructs an empty list that flips its promotion coins with `rng`.
    pub fn with_rng(comparator: C, rng: R) -> Self {
        Self {
            arena: Arena::default(),
            height: 0,
            len: 0,
            comparator,
            rng,
        }
    }

    /// The number of distinct keys in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The list holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the topmost occupied level. 0 for an empty list.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The comparator ordering this list.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Removes every entry. The comparator and generator are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.height = 0;
        self.len = 0;
    }

    /// A cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.arena, self.len)
    }

    /// Iterates over all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.cursor(), self.len)
    }
}

impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Comparator<K>,
{
    /// Returns the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).and_then(|id| self.arena.node(id).value())
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;
        self.arena.node_mut(id).value_mut()
    }

    /// The list holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut prev = HEAD;
        let mut target = None;
        for level in (0..=self.height).rev() {
            while let Some(next) = self.arena.node(prev).next(level) {
                match self.compare_node(next, key) {
                    Ordering::Less => prev = next,
                    Ordering::Equal => {
                        let after = self.arena.node(next).next(level);
                        self.arena.node_mut(prev).set_next(level, after);
                        target = Some(next);
                        break;
                    }
                    Ordering::Greater => break,
                }
            }
        }
        let target = target?;

        let previous_height = self.height;
        while self.height > 0 && self.arena.node(HEAD).next(self.height).is_none() {
            self.height -= 1;
        }
        if self.height < previous_height {
            trace!(from = previous_height, to = self.height, "skiplist height lowered");
        }

        self.len -= 1;
        self.arena.free(target).map(|(_, value)| value)
    }

    /// Removes `key`, reporting whether it was present.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    // Top-down search that stops at the first node equal to `key`, on
    // whichever level it is met.
    fn find(&self, key: &K) -> Option<NodeId> {
        let mut prev = HEAD;
        for level in (0..=self.height).rev() {
            while let Some(next) = self.arena.node(prev).next(level) {
                match self.compare_node(next, key) {
                    Ordering::Less => prev = next,
                    Ordering::Equal => return Some(next),
                    Ordering::Greater => break,
                }
            }
        }
        None
    }

    // Records the predecessor of `key` on every occupied level, and returns
    // the level-0 successor when it holds `key`.
    #[allow(clippy::indexing_slicing)]
    fn seek(&self, key: &K) -> (Splices, Option<NodeId>) {
        let mut splices = [HEAD; MAX_LEVEL];
        let mut prev = HEAD;
        for level in (0..=self.height).rev() {
            while let Some(next) = self.arena.node(prev).next(level) {
                if self.compare_node(next, key) != Ordering::Less {
                    break;
                }
                prev = next;
            }
            splices[level] = prev;
        }
        let found = self
            .arena
            .node(prev)
            .next(0)
            .filter(|&next| self.compare_node(next, key) == Ordering::Equal);
        (splices, found)
    }

    fn compare_node(&self, id: NodeId, key: &K) -> Ordering {
        // Only the sentinel lacks a key, and it is never a forward target.
        self.arena
            .node(id)
            .key()
            .map_or(Ordering::Less, |k| self.comparator.compare(k, key))
    }
}

impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Comparator<K>,
    R: RngCore,
{
    /// Inserts `value` under `key`.
    ///
    /// An existing key keeps its node and links; only the value is replaced,
    /// and the previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (splices, found) = self.seek(&key);
        if let Some(id) = found {
            return self
                .arena
                .node_mut(id)
                .value_mut()
                .map(|slot| std::mem::replace(slot, value));
        }

        let levels = self.random_levels();
        let node = self.arena.alloc(key, value, levels);
        let previous_height = self.height;
        for (level, &prev) in splices.iter().enumerate().take(levels) {
            let next = self.arena.node(prev).next(level);
            self.arena.node_mut(node).set_next(level, next);
            self.arena.node_mut(prev).set_next(level, Some(node));
        }
        self.height = self.height.max(levels - 1);
        if self.height > previous_height {
            trace!(from = previous_height, to = self.height, "skiplist height raised");
        }

        self.len += 1;
        None
    }

    /// Alias for [`SkipList::insert`] that discards the previous value.
    pub fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    // One level, plus one more per consecutive head.
    fn random_levels(&mut self) -> usize {
        let mut levels = 1;
        while levels < MAX_LEVEL && self.rng.random::<bool>() {
            levels += 1;
        }
        levels
    }
}

impl<K, V, C> Default for SkipList<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<K, V, C, R> Extend<(K, V)> for SkipList<K, V, C, R>
where
    C: Comparator<K>,
    R: RngCore,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for SkipList<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<'a, K, V, C, R> IntoIterator for &'a SkipList<K, V, C, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V, C, R> fmt::Debug for SkipList<K, V, C, R> {
    // One line per occupied level, top level first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SkipList(len: {}, height: {})", self.len, self.height)?;
        for level in (0..=self.height).rev() {
            write!(f, "{level}:")?;
            let mut curr = self.arena.node(HEAD).next(level);
            while let Some(id) = curr {
                let node = self.arena.node(id);
                if let Some(key) = node.key() {
                    write!(f, " {key:?}")?;
                }
                curr = node.next(level);
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Comparator<K>,
{
    /// Asserts every structural invariant: each level is strictly ordered and
    /// acyclic, each level is a subset of the one below it, `height` is the
    /// top non-empty level, and `len` matches level 0.
    pub(crate) fn check_integrity(&self) {
        use std::collections::HashSet;

        let mut below: Option<HashSet<NodeId>> = None;
        for level in 0..MAX_LEVEL {
            let mut members = HashSet::new();
            let mut prev: Option<NodeId> = None;
            let mut curr = self.arena.node(HEAD).next(level);
            while let Some(id) = curr {
                assert!(members.insert(id), "cycle at level {level}");
                let node = self.arena.node(id);
                assert!(node.levels() > level, "level {level} links a short node");
                assert!(node.levels() <= MAX_LEVEL, "node exceeds max level");
                if let Some(prev) = prev {
                    let key = node.key().expect("linked node has a key");
                    assert_eq!(
                        self.compare_node(prev, key),
                        Ordering::Less,
                        "level {level} out of order"
                    );
                }
                prev = Some(id);
                curr = node.next(level);
            }
            if level == 0 {
                assert_eq!(members.len(), self.len, "len");
            }
            if level > self.height {
                assert!(members.is_empty(), "level {level} above height is occupied");
            } else if level > 0 {
                assert!(!members.is_empty(), "level {level} below height is empty");
            }
            if let Some(below) = &below {
                assert!(members.is_subset(below), "level {level} not a subset");
            }
            below = Some(members);
        }
    }

    /// Number of levels each entry is linked into, in key order.
    pub(crate) fn level_layout(&self) -> Vec<usize> {
        let mut layout = Vec::with_capacity(self.len);
        let mut curr = self.arena.node(HEAD).next(0);
        while let Some(id) = curr {
            let node = self.arena.node(id);
            layout.push(node.levels());
            curr = node.next(0);
        }
        layout
    }

    pub(crate) fn free_slots(&self) -> usize {
        self.arena.free_slots()
    }
}
