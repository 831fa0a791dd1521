// Copyright (c) 2024-present, Andrew Werner
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::iter::FusedIterator;

use crate::arena::{Arena, Node, NodeId, HEAD};

/// Where a [`Cursor`] currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Not yet advanced, or advanced over an empty list.
    BeforeStart,
    /// On an entry; [`Cursor::key`] and [`Cursor::value`] return it.
    Positioned,
    /// Past the last entry. Terminal.
    Exhausted,
}

#[derive(Clone, Copy)]
enum Position {
    BeforeStart,
    At(NodeId),
    Exhausted,
}

/// A one-shot forward cursor over the bottom level of a
/// [`SkipList`](crate::SkipList).
///
/// The cursor starts before the first entry and holds no snapshot: it reads
/// the list's links as it goes. It borrows the list, so the list cannot be
/// mutated while the cursor is alive. To scan again, request a new cursor.
pub struct Cursor<'a, K, V> {
    arena: &'a Arena<K, V>,
    empty: bool,
    position: Position,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(arena: &'a Arena<K, V>, len: usize) -> Self {
        Self {
            arena,
            empty: len == 0,
            position: Position::BeforeStart,
        }
    }

    /// Moves to the next entry in ascending key order.
    ///
    /// Returns `false` once the entries run out, and on every call after
    /// that. On an empty list the cursor stays [`CursorState::BeforeStart`].
    pub fn advance(&mut self) -> bool {
        if self.empty {
            return false;
        }
        let next = match self.position {
            Position::BeforeStart => self.arena.node(HEAD).next(0),
            Position::At(id) => self.arena.node(id).next(0),
            Position::Exhausted => return false,
        };
        self.position = next.map_or(Position::Exhausted, Position::At);
        matches!(self.position, Position::At(_))
    }

    /// Key of the current entry.
    pub fn key(&self) -> Option<&'a K> {
        self.current().and_then(Node::key)
    }

    /// Value of the current entry.
    pub fn value(&self) -> Option<&'a V> {
        self.current().and_then(Node::value)
    }

    /// Key and value of the current entry.
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.current().and_then(Node::entry)
    }

    /// The cursor's current state.
    pub fn state(&self) -> CursorState {
        match self.position {
            Position::BeforeStart => CursorState::BeforeStart,
            Position::At(_) => CursorState::Positioned,
            Position::Exhausted => CursorState::Exhausted,
        }
    }

    fn current(&self) -> Option<&'a Node<K, V>> {
        match self.position {
            Position::At(id) => Some(self.arena.node(id)),
            Position::BeforeStart | Position::Exhausted => None,
        }
    }
}

/// Iterator over the entries of a [`SkipList`](crate::SkipList) in
/// ascending key order. Created by [`SkipList::iter`](crate::SkipList::iter).
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(cursor: Cursor<'a, K, V>, len: usize) -> Self {
        Self {
            cursor,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.advance() {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.cursor.entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
