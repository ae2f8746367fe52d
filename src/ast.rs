// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::escape::RangeSet;

/// A node of the syntax tree. Built by the parser, consumed by the emitter.
#[derive(Debug, PartialEq, Clone)]
pub enum RegExp {
    /// Two or more branches separated by `|`.
    Disjunction(Vec<RegExp>),

    /// Zero, two or more consecutive pieces.
    /// An empty branch matches the empty string.
    Branch(Vec<RegExp>),

    /// An atom followed by a quantifier.
    Piece(Box<RegExp>, Quantifier),

    Group(Box<RegExp>, GroupKind),

    /// A back-reference to a capturing group, by index (starting at 1).
    BackRef(u32),

    Literal(char),

    Wildcard {
        dot_all: bool,
    },

    LineBorder {
        is_start: bool,
        multiline: bool,
    },

    CharClass(CharClass),

    /// A multi char or category escape outside of a char class.
    Escape(Escape),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GroupKind {
    Capturing,
    NonCapturing,
}

/// `min..=max` repetitions; `max` is `None` when unbounded.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Quantifier {
    pub min: u32,
    pub max: Option<u32>,
    pub lazy: bool,
}

impl Quantifier {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self {
            min,
            max,
            lazy: false,
        }
    }
}

/// `[group]` or `[group-[subtraction]]`.
#[derive(Debug, PartialEq, Clone)]
pub struct CharClass {
    pub group: CharGroup,
    pub subtraction: Option<Box<CharClass>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct CharGroup {
    pub negative: bool,
    pub members: Vec<CharGroupMember>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum CharGroupMember {
    Char(char),
    CharRange(CharRange),

    /// A multi char or category escape, already expanded to its chars.
    Escape(Escape),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CharRange {
    pub start: char,
    pub end_included: char,
}

/// The identity of a multi char or category escape.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum EscapeClass {
    /// `\s`, `\S`, `\i`, `\I`, `\c`, `\C`, `\d`, `\D`, `\w`, `\W`
    Multi(char),

    /// `\p{name}` or `\P{name}`
    Category { name: String, negated: bool },
}

/// An escape together with the chars it stands for.
#[derive(Debug, PartialEq, Clone)]
pub struct Escape {
    pub class: EscapeClass,
    pub chars: RangeSet,
}
