// Copyright (c) 2024-present, Andrew Werner
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! This crate is a single-threaded ordered map built on a skip list.
//!
//! It supports:
//!     * Lookup, insert, in-place update and removal in O(log n) expected time
//!     * Forward iteration in ascending key order
//!
//! Keys are ordered by a caller-supplied [`Comparator`]. Presets exist for
//! byte sequences, strings and signed integers, and any
//! `Fn(&K, &K) -> Ordering` closure works too.
//!
//! Nodes live in an index-addressed arena, and the coin flips that decide
//! how many levels a node joins come from an injectable generator, so level
//! layouts are reproducible from a seed.
//!
//! Enable the `serde` feature to serialize a list as an ordered map.

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::needless_lifetimes)]

mod arena;
mod comparator;
mod cursor;
#[cfg(feature = "serde")]
mod serde_impl;
mod skiplist;

pub use comparator::{
    BytewiseComparator, Comparator, I32Comparator, I64Comparator, OrdComparator,
    StringComparator,
};
pub use cursor::{Cursor, CursorState, Iter};
pub use skiplist::{SkipList, MAX_LEVEL};
