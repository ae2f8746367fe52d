// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::VecDeque;

/// An iterator adapter with a fixed-size lookahead window.
///
/// The window is kept full, so `peek` only needs a shared reference.
pub struct PeekableIter<'a, T> {
    upstream: &'a mut dyn Iterator<Item = T>,
    buffer: VecDeque<T>,
    window_size: usize,
}

impl<'a, T> PeekableIter<'a, T> {
    pub fn new(upstream: &'a mut dyn Iterator<Item = T>, window_size: usize) -> Self {
        let mut buffer = VecDeque::with_capacity(window_size);
        for _ in 0..window_size {
            match upstream.next() {
                Some(item) => buffer.push_back(item),
                None => break,
            }
        }

        Self {
            upstream,
            buffer,
            window_size,
        }
    }

    /// Look at the item `offset` positions ahead without consuming anything.
    ///
    /// `offset` must be less than the window size.
    pub fn peek(&self, offset: usize) -> Option<&T> {
        debug_assert!(offset < self.window_size, "peek offset out of window");
        self.buffer.get(offset)
    }
}

impl<T> Iterator for PeekableIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.pop_front()?;
        if let Some(next) = self.upstream.next() {
            self.buffer.push_back(next);
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PeekableIter;

    #[test]
    fn test_peek_and_next() {
        let mut chars = "abc".chars();
        let mut iter = PeekableIter::new(&mut chars, 2);

        assert_eq!(iter.peek(0), Some(&'a'));
        assert_eq!(iter.peek(1), Some(&'b'));

        assert_eq!(iter.next(), Some('a'));
        assert_eq!(iter.peek(0), Some(&'b'));
        assert_eq!(iter.peek(1), Some(&'c'));

        assert_eq!(iter.next(), Some('b'));
        assert_eq!(iter.peek(1), None);

        assert_eq!(iter.next(), Some('c'));
        assert_eq!(iter.peek(0), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_window_larger_than_upstream() {
        let mut chars = "x".chars();
        let mut iter = PeekableIter::new(&mut chars, 3);

        assert_eq!(iter.peek(0), Some(&'x'));
        assert_eq!(iter.peek(2), None);
        assert_eq!(iter.next(), Some('x'));
        assert_eq!(iter.next(), None);
    }
}
