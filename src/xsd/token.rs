// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use crate::location::Location;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    Char(char),  // any normal char except ASCII digits
    Digit(char), // 0-9

    SingleEscape(char), // `\n`, `\t`, `\|` etc., holds the resolved char
    MultiEscape(char),  // `\d`, `\S`, `\i` etc., holds the escape letter
    CategoryEscape {
        // `\p{Lu}`, `\P{IsBasicLatin}`
        name: String,
        negated: bool,
    },
    BackReference(u32), // `\` followed by the first digit

    Wildcard,  // .
    LineStart, // ^
    LineEnd,   // $

    GroupOpen,            // (
    NonCapturingGroupOpen, // (?:
    GroupClose,           // )
    Alternation,          // |

    Optional,   // ?
    ZeroOrMore, // *
    OneOrMore,  // +

    QuantifierOpen,  // {
    Number(u32),     // the bound inside `{...}`
    Comma,           // the `,` inside `{...}`
    QuantifierClose, // }

    ClassOpen,  // [
    ClassClose, // ]
    Negation,   // the `^` directly after `[`
    Subtract,   // the `-` directly before a nested `[`
}

impl Token {
    /// The char for tokens that stand for one literal char inside a class.
    pub fn as_class_char(&self) -> Option<char> {
        match self {
            Token::Char(c) | Token::Digit(c) | Token::SingleEscape(c) => Some(*c),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Char(c) | Token::Digit(c) => write!(f, "'{}'", c.escape_debug()),
            Token::SingleEscape(c) => write!(f, "escaped char '{}'", c.escape_debug()),
            Token::MultiEscape(c) => write!(f, "escape \"\\{}\"", c),
            Token::CategoryEscape { name, negated } => {
                write!(f, "escape \"\\{}{{{}}}\"", if *negated { 'P' } else { 'p' }, name)
            }
            Token::BackReference(n) => write!(f, "back-reference \"\\{}\"", n),
            Token::Wildcard => f.write_str("\".\""),
            Token::LineStart => f.write_str("\"^\""),
            Token::LineEnd => f.write_str("\"$\""),
            Token::GroupOpen => f.write_str("\"(\""),
            Token::NonCapturingGroupOpen => f.write_str("\"(?:\""),
            Token::GroupClose => f.write_str("\")\""),
            Token::Alternation => f.write_str("\"|\""),
            Token::Optional => f.write_str("\"?\""),
            Token::ZeroOrMore => f.write_str("\"*\""),
            Token::OneOrMore => f.write_str("\"+\""),
            Token::QuantifierOpen => f.write_str("\"{\""),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Comma => f.write_str("\",\""),
            Token::QuantifierClose => f.write_str("\"}\""),
            Token::ClassOpen => f.write_str("\"[\""),
            Token::ClassClose => f.write_str("\"]\""),
            Token::Negation => f.write_str("negation \"^\""),
            Token::Subtract => f.write_str("subtraction \"-[\""),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TokenWithRange {
    pub token: Token,
    pub range: Location,
}

impl TokenWithRange {
    pub fn new(token: Token, range: Location) -> Self {
        Self { token, range }
    }

    pub fn from_position_and_length(token: Token, position: &Location, length: usize) -> Self {
        Self {
            token,
            range: Location::from_position_and_length(position, length),
        }
    }
}
