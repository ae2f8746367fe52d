// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Modifiers (the `flags` argument of fn:matches, fn:replace etc.):
//
// - i        case-insensitive, with Unicode case folding
// - m        multi-line, `^` and `$` match at line boundaries
// - s        dot-all, `.` also matches `\n` and `\r`
// - q        literal, the pattern is matched verbatim (extended syntax only)
// - x        strip whitespace outside of char classes while lexing
//
// A modifier may be repeated, e.g. "ii" is the same as "i".

use crate::error::RegexError;

/// The modifier flags of a single compile call.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Flags {
    pub case_insensitive: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub literal: bool,
    pub strip_whitespace: bool,

    /// The richer dialect of XQuery 3.0 and later: non-capturing
    /// groups and literal mode are only accepted when this is set.
    pub extended: bool,
}

impl Flags {
    pub fn new(extended: bool) -> Self {
        Self {
            extended,
            ..Self::default()
        }
    }
}

pub fn parse_modifiers(modifiers: &str, extended: bool) -> Result<Flags, RegexError> {
    let mut flags = Flags::new(extended);

    for c in modifiers.chars() {
        match c {
            'i' => flags.case_insensitive = true,
            'm' => flags.multiline = true,
            's' => flags.dot_all = true,
            'x' => flags.strip_whitespace = true,
            'q' if extended => flags.literal = true,
            'q' => {
                return Err(RegexError::Modifier(
                    c,
                    "Modifier 'q' requires the extended syntax.".to_owned(),
                ));
            }
            _ => {
                return Err(RegexError::Modifier(
                    c,
                    format!("Unrecognized modifier '{}'.", c),
                ));
            }
        }
    }

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::RegexError;

    use super::{parse_modifiers, Flags};

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(parse_modifiers("", false).unwrap(), Flags::default());

        assert_eq!(
            parse_modifiers("imsx", false).unwrap(),
            Flags {
                case_insensitive: true,
                multiline: true,
                dot_all: true,
                literal: false,
                strip_whitespace: true,
                extended: false,
            }
        );

        // repeated modifiers
        assert_eq!(
            parse_modifiers("ii", true).unwrap(),
            Flags {
                case_insensitive: true,
                extended: true,
                ..Flags::default()
            }
        );

        // literal mode
        assert!(parse_modifiers("q", true).unwrap().literal);
    }

    #[test]
    fn test_parse_modifiers_error() {
        // err: unknown modifier
        assert!(matches!(
            parse_modifiers("ik", true),
            Err(RegexError::Modifier('k', _))
        ));

        // err: upper case is not a modifier
        assert!(matches!(
            parse_modifiers("I", false),
            Err(RegexError::Modifier('I', _))
        ));

        // err: literal mode needs the extended syntax
        assert!(matches!(
            parse_modifiers("q", false),
            Err(RegexError::Modifier('q', _))
        ));
    }
}
