// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// A position or a range within the pattern text.
///
/// All fields count characters (Unicode scalar values), not bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub index: usize,  // The character index in the pattern
    pub line: usize,   // The line number (0-based index)
    pub column: usize, // The column number (0-based index)
    pub length: usize, // The length of the range; 0 for a single position
}

impl Location {
    /// Create a new `Location` representing a single position.
    pub fn new_position(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
            length: 0,
        }
    }

    /// Create a new `Location` representing a range of text.
    pub fn new_range(index: usize, line: usize, column: usize, length: usize) -> Self {
        Self {
            index,
            line,
            column,
            length,
        }
    }

    /// Create a range `Location` from a starting position and a length.
    pub fn from_position_and_length(position: &Location, length: usize) -> Self {
        Self::new_range(position.index, position.line, position.column, length)
    }

    /// Create a range `Location` from two positions: start and end (inclusive).
    pub fn from_position_pair_with_end_included(
        position_start: &Location,
        position_end_included: &Location,
    ) -> Self {
        Self::new_range(
            position_start.index,
            position_start.line,
            position_start.column,
            position_end_included.index - position_start.index + 1,
        )
    }

    /// Combine two ranges into a single range `Location`.
    pub fn from_range_pair(range_start: &Location, range_end: &Location) -> Self {
        Self::new_range(
            range_start.index,
            range_start.line,
            range_start.column,
            range_end.index - range_start.index + range_end.length,
        )
    }

    /// The position just after the end of this range.
    pub fn position_after(&self) -> Self {
        let width = self.length.max(1);
        Self::new_position(self.index + width, self.line, self.column + width)
    }

    /// Extract the text covered by this location from the pattern.
    ///
    /// A zero-length location yields the single character at its index,
    /// or an empty string at the end of the pattern.
    pub fn fragment(&self, pattern: &str) -> String {
        let length = self.length.max(1);
        pattern.chars().skip(self.index).take(length).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Location;

    #[test]
    fn test_location_fragment() {
        let pattern = "ab[z-a]c";

        assert_eq!(
            Location::new_range(2, 0, 2, 5).fragment(pattern),
            "[z-a]".to_owned()
        );
        assert_eq!(Location::new_position(7, 0, 7).fragment(pattern), "c");
        assert_eq!(Location::new_position(8, 0, 8).fragment(pattern), "");

        // multi-byte chars are counted as single chars
        assert_eq!(Location::new_range(1, 0, 1, 2).fragment("a文😊b"), "文😊");
    }

    #[test]
    fn test_location_combine() {
        let start = Location::new_range(3, 0, 3, 1);
        let end = Location::new_range(5, 0, 5, 2);

        assert_eq!(
            Location::from_range_pair(&start, &end),
            Location::new_range(3, 0, 3, 4)
        );

        assert_eq!(
            Location::from_position_pair_with_end_included(
                &Location::new_position(1, 0, 1),
                &Location::new_position(4, 0, 4)
            ),
            Location::new_range(1, 0, 1, 4)
        );

        assert_eq!(
            start.position_after(),
            Location::new_position(4, 0, 4)
        );
    }
}
