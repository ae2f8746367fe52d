// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// A compact, readable notation of the syntax tree, e.g.
//
// `(?:ab|c)+\d` prints as `one_or_more((('a', 'b') || 'c')), \d`

use std::fmt::Display;

use crate::ast::{
    CharClass, CharGroup, CharGroupMember, CharRange, Escape, EscapeClass, GroupKind, Quantifier,
    RegExp,
};

impl Display for EscapeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscapeClass::Multi(c) => write!(f, "\\{}", c),
            EscapeClass::Category { name, negated } => {
                if *negated {
                    write!(f, "\\P{{{}}}", name)
                } else {
                    write!(f, "\\p{{{}}}", name)
                }
            }
        }
    }
}

impl Display for Escape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class)
    }
}

impl Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}'..'{}'",
            self.start.escape_debug(),
            self.end_included.escape_debug()
        )
    }
}

impl Display for CharGroupMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharGroupMember::Char(c) => write!(f, "'{}'", c.escape_debug()),
            CharGroupMember::CharRange(r) => write!(f, "{}", r),
            CharGroupMember::Escape(e) => write!(f, "{}", e),
        }
    }
}

impl Display for CharGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: Vec<String> = self.members.iter().map(|e| e.to_string()).collect();
        if self.negative {
            write!(f, "![{}]", s.join(", "))
        } else {
            write!(f, "[{}]", s.join(", "))
        }
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subtraction {
            Some(subtraction) => write!(f, "({} - {})", self.group, subtraction),
            None => write!(f, "{}", self.group),
        }
    }
}

fn quantifier_call(
    f: &mut std::fmt::Formatter<'_>,
    atom: &RegExp,
    quantifier: &Quantifier,
) -> std::fmt::Result {
    let suffix = if quantifier.lazy { "_lazy" } else { "" };

    match (quantifier.min, quantifier.max) {
        (0, Some(1)) => write!(f, "optional{}({})", suffix, atom),
        (0, None) => write!(f, "zero_or_more{}({})", suffix, atom),
        (1, None) => write!(f, "one_or_more{}({})", suffix, atom),
        (m, None) => write!(f, "at_least{}({}, {})", suffix, atom, m),
        (m, Some(n)) if m == n => write!(f, "repeat{}({}, {})", suffix, atom, m),
        (m, Some(n)) => write!(f, "repeat_range{}({}, {}, {})", suffix, atom, m, n),
    }
}

impl Display for RegExp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegExp::Disjunction(branches) => {
                let s: Vec<String> = branches
                    .iter()
                    .map(|e| match e {
                        RegExp::Branch(pieces) if pieces.len() > 1 => format!("({})", e),
                        _ => e.to_string(),
                    })
                    .collect();
                f.write_str(&s.join(" || "))
            }
            RegExp::Branch(pieces) => {
                if pieces.is_empty() {
                    f.write_str("empty")
                } else {
                    let s: Vec<String> = pieces.iter().map(|e| e.to_string()).collect();
                    f.write_str(&s.join(", "))
                }
            }
            RegExp::Piece(atom, quantifier) => quantifier_call(f, atom, quantifier),
            RegExp::Group(body, GroupKind::Capturing) => write!(f, "index({})", body),
            RegExp::Group(body, GroupKind::NonCapturing) => write!(f, "({})", body),
            RegExp::BackRef(index) => write!(f, "^{}", index),
            RegExp::Literal(c) => write!(f, "'{}'", c.escape_debug()),
            RegExp::Wildcard { dot_all: false } => f.write_str("char_any"),
            RegExp::Wildcard { dot_all: true } => f.write_str("char_any_or_newline"),
            RegExp::LineBorder {
                is_start,
                multiline,
            } => {
                let name = match (is_start, multiline) {
                    (true, false) => "start",
                    (false, false) => "end",
                    (true, true) => "line_start",
                    (false, true) => "line_end",
                };
                f.write_str(name)
            }
            RegExp::CharClass(c) => write!(f, "{}", c),
            RegExp::Escape(e) => write!(f, "{}", e),
        }
    }
}
