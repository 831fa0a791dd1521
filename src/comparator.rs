// Copyright (c) 2024-present, Andrew Werner
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// The order must be consistent: irreflexive, transitive and antisymmetric.
/// A [`SkipList`](crate::SkipList) never validates its comparator; an
/// inconsistent one leaves iteration order unspecified.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator, so a closure works as well
/// as one of the presets:
///
/// ```rust
/// use ordered_skiplist::SkipList;
///
/// // Descending order.
/// let mut list: SkipList<u32, &str, _> = SkipList::new(|a: &u32, b: &u32| b.cmp(a));
/// list.insert(1, "one");
/// list.insert(2, "two");
/// assert_eq!(list.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [2, 1]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdComparator;

impl<K: Ord + ?Sized> Comparator<K> for OrdComparator {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Lexicographic order over byte sequences.
#[derive(Clone, Copy, Debug, Default)]
pub struct BytewiseComparator;

impl<K: AsRef<[u8]> + ?Sized> Comparator<K> for BytewiseComparator {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.as_ref().cmp(b.as_ref())
    }
}

/// Lexicographic order over strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringComparator;

impl<K: AsRef<str> + ?Sized> Comparator<K> for StringComparator {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.as_ref().cmp(b.as_ref())
    }
}

/// Signed 32-bit integer order.
#[derive(Clone, Copy, Debug, Default)]
pub struct I32Comparator;

impl Comparator<i32> for I32Comparator {
    #[inline]
    fn compare(&self, a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }
}

/// Signed 64-bit integer order.
#[derive(Clone, Copy, Debug, Default)]
pub struct I64Comparator;

impl Comparator<i64> for I64Comparator {
    #[inline]
    fn compare(&self, a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }
}
