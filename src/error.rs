// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::{self, Display};

use crate::location::Location;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    Modifier,
    Lex,
    Grammar,
    QuantifierRange,
    CharRange,
    UnknownEscape,
    InvalidBackReference,
    Host,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Modifier => "invalid modifier",
            ErrorKind::Lex => "invalid token",
            ErrorKind::Grammar => "syntax error",
            ErrorKind::QuantifierRange => "invalid quantifier",
            ErrorKind::CharRange => "invalid character range",
            ErrorKind::UnknownEscape => "unknown escape",
            ErrorKind::InvalidBackReference => "invalid back-reference",
            ErrorKind::Host => "host engine error",
        };
        f.write_str(name)
    }
}

/// A failed compile. Every variant aborts the whole compile call.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RegexError {
    /// An unrecognized modifier char, or `q` without the extended syntax.
    Modifier(char, String),

    /// A malformed escape, an unterminated char class or quantifier,
    /// or a char that cannot start any token.
    Lex(String, Location),

    /// A token where the grammar permits none of the expected alternatives.
    Grammar(String, Location),

    /// `{m,n}` with `m > n`.
    QuantifierRange(String, Location),

    /// `x-y` with `x > y`.
    CharRange(String, Location),

    /// `\p{...}` with a name missing from the escape table.
    UnknownEscape(String, Location),

    /// A back-reference to a group that is not closed at that point.
    InvalidBackReference(String, Location),

    /// The host engine refused the translated pattern.
    Host(String),
}

impl RegexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegexError::Modifier(..) => ErrorKind::Modifier,
            RegexError::Lex(..) => ErrorKind::Lex,
            RegexError::Grammar(..) => ErrorKind::Grammar,
            RegexError::QuantifierRange(..) => ErrorKind::QuantifierRange,
            RegexError::CharRange(..) => ErrorKind::CharRange,
            RegexError::UnknownEscape(..) => ErrorKind::UnknownEscape,
            RegexError::InvalidBackReference(..) => ErrorKind::InvalidBackReference,
            RegexError::Host(..) => ErrorKind::Host,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RegexError::Modifier(_, message)
            | RegexError::Lex(message, _)
            | RegexError::Grammar(message, _)
            | RegexError::QuantifierRange(message, _)
            | RegexError::CharRange(message, _)
            | RegexError::UnknownEscape(message, _)
            | RegexError::InvalidBackReference(message, _)
            | RegexError::Host(message) => message,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            RegexError::Lex(_, location)
            | RegexError::Grammar(_, location)
            | RegexError::QuantifierRange(_, location)
            | RegexError::CharRange(_, location)
            | RegexError::UnknownEscape(_, location)
            | RegexError::InvalidBackReference(_, location) => Some(*location),
            RegexError::Modifier(..) | RegexError::Host(..) => None,
        }
    }

    /// The offending substring of `pattern`, or the offending modifier char.
    pub fn fragment(&self, pattern: &str) -> Option<String> {
        match self {
            RegexError::Modifier(c, _) => Some(c.to_string()),
            RegexError::Host(_) => None,
            _ => self.location().map(|location| location.fragment(pattern)),
        }
    }
}

impl Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())?;
        if let Some(location) = self.location() {
            write!(f, " at char {}", location.index)?;
        }
        Ok(())
    }
}

impl std::error::Error for RegexError {}

impl From<fancy_regex::Error> for RegexError {
    fn from(value: fancy_regex::Error) -> Self {
        RegexError::Host(value.to_string())
    }
}
