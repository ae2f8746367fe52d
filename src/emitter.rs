// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Renders the syntax tree in the pattern syntax of the host engine
// (`fancy-regex`, which hands plain sub-expressions to `regex-syntax`).
//
// Constructs whose meaning differs between the two dialects are emitted
// with explicit, self-contained forms so the result does not depend on
// the flags the host is built with:
//
// - `.`                  -> `[^\n\r]`, or `(?s:.)` with dot-all
// - `^`, `$`             -> `(?-m:^)`, `(?-m:$)`, or `(?m:^)`, `(?m:$)`
// - `[a-[b]]`            -> `[[a]&&[^[b]]]`
// - `\N`                 -> `(?:\N)`, so a following digit stays a literal
// - `\d`, `\p{Lu}` ...   -> a class of the expanded code point ranges
//
// With the `i` flag, literal chars and ranges are expanded with their
// case variants (`a` -> `[Aa]`), while the chars of escapes are kept
// as they are, so `\p{Lu}` and `[\p{Lu}]` never match 'a'.

use crate::{
    ast::{CharClass, CharGroup, CharGroupMember, Escape, GroupKind, Quantifier, RegExp},
    escape::RangeSet,
    modifier::Flags,
};

// regex-syntax accepts a negated full range as the empty class.
const EMPTY_CLASS: &str = r"[^\x{0}-\x{10FFFF}]";
const FULL_CLASS_CONTENT: &str = r"\x{0}-\x{10FFFF}";

/// Render a syntax tree as a host pattern.
pub fn emit(regexp: &RegExp, flags: &Flags) -> String {
    let mut emitter = Emitter::new(flags);
    emitter.emit_reg_exp(regexp);
    emitter.output
}

pub struct Emitter<'a> {
    flags: &'a Flags,
    output: String,
}

impl<'a> Emitter<'a> {
    fn new(flags: &'a Flags) -> Self {
        Self {
            flags,
            output: String::new(),
        }
    }

    fn emit_reg_exp(&mut self, regexp: &RegExp) {
        match regexp {
            RegExp::Disjunction(branches) => {
                for (index, branch) in branches.iter().enumerate() {
                    if index > 0 {
                        self.output.push('|');
                    }
                    self.emit_reg_exp(branch);
                }
            }
            RegExp::Branch(pieces) => {
                for piece in pieces {
                    self.emit_reg_exp(piece);
                }
            }
            RegExp::Piece(atom, quantifier) => {
                self.emit_reg_exp(atom);
                self.emit_quantifier(quantifier);
            }
            RegExp::Group(body, kind) => {
                match kind {
                    GroupKind::Capturing => self.output.push('('),
                    GroupKind::NonCapturing => self.output.push_str("(?:"),
                }
                self.emit_reg_exp(body);
                self.output.push(')');
            }
            RegExp::BackRef(index) => {
                // the captured text is compared case-insensitively under `i`
                let flag = if self.flags.case_insensitive { "i" } else { "" };
                self.output.push_str(&format!("(?{}:\\{})", flag, index));
            }
            RegExp::Literal(c) => self.emit_literal(*c),
            RegExp::Wildcard { dot_all } => {
                if *dot_all {
                    self.output.push_str("(?s:.)");
                } else {
                    self.output.push_str(r"[^\n\r]");
                }
            }
            RegExp::LineBorder {
                is_start,
                multiline,
            } => {
                let anchor = if *is_start { '^' } else { '$' };
                let flag = if *multiline { "m" } else { "-m" };
                self.output.push_str(&format!("(?{}:{})", flag, anchor));
            }
            RegExp::CharClass(class) => {
                let text = self.render_char_class(class);
                self.output.push_str(&text);
            }
            RegExp::Escape(escape) => self.emit_escape(escape),
        }
    }

    fn emit_quantifier(&mut self, quantifier: &Quantifier) {
        let text = match (quantifier.min, quantifier.max) {
            (0, Some(1)) => "?".to_owned(),
            (0, None) => "*".to_owned(),
            (1, None) => "+".to_owned(),
            (m, None) => format!("{{{},}}", m),
            (m, Some(n)) if m == n => format!("{{{}}}", m),
            (m, Some(n)) => format!("{{{},{}}}", m, n),
        };
        self.output.push_str(&text);

        if quantifier.lazy {
            self.output.push('?');
        }
    }

    fn emit_literal(&mut self, c: char) {
        let variants = self.case_variants(c, c);
        if variants.ranges() != [(c, c)].as_slice() {
            self.output.push_str(&render_range_set(&variants));
            return;
        }

        match c {
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^'
            | '$' => {
                self.output.push('\\');
                self.output.push(c);
            }
            _ if c.is_control() || (c.is_whitespace() && c != ' ') => {
                self.output.push_str(&hex_escape(c));
            }
            _ => self.output.push(c),
        }
    }

    fn emit_escape(&mut self, escape: &Escape) {
        let class = render_range_set(&escape.chars);
        self.output.push_str(&class);
    }

    // `start..=end`, plus the case variants when matching case-insensitively.
    fn case_variants(&self, start: char, end: char) -> RangeSet {
        let set = RangeSet::from_ranges([(start, end)]);
        if self.flags.case_insensitive {
            set.case_folded()
        } else {
            set
        }
    }

    fn render_char_class(&self, class: &CharClass) -> String {
        let group = self.render_char_group(&class.group);
        match &class.subtraction {
            Some(subtraction) => {
                // the innermost subtraction is resolved first
                format!("[{}&&[^{}]]", group, self.render_char_class(subtraction))
            }
            None => group,
        }
    }

    fn render_char_group(&self, group: &CharGroup) -> String {
        let mut content = String::new();

        for member in &group.members {
            let chars = match member {
                CharGroupMember::Char(c) => self.case_variants(*c, *c),
                CharGroupMember::CharRange(range) => {
                    self.case_variants(range.start, range.end_included)
                }
                CharGroupMember::Escape(escape) => escape.chars.clone(),
            };
            push_range_set(&mut content, &chars);
        }

        wrap_class_content(&content, group.negative)
    }
}

fn render_range_set(set: &RangeSet) -> String {
    let mut content = String::new();
    push_range_set(&mut content, set);
    wrap_class_content(&content, false)
}

fn wrap_class_content(content: &str, negative: bool) -> String {
    match (content.is_empty(), negative) {
        (true, false) => EMPTY_CLASS.to_owned(),
        (true, true) => format!("[{}]", FULL_CLASS_CONTENT),
        (false, false) => format!("[{}]", content),
        (false, true) => format!("[^{}]", content),
    }
}

fn push_range_set(content: &mut String, set: &RangeSet) {
    for (start, end) in set.ranges() {
        push_class_char(content, *start);
        if start != end {
            content.push('-');
            push_class_char(content, *end);
        }
    }
}

// Inside a class only ASCII letters and digits are written as is,
// everything else as a hex escape.
fn push_class_char(content: &mut String, c: char) {
    if c.is_ascii_alphanumeric() {
        content.push(c);
    } else {
        content.push_str(&hex_escape(c));
    }
}

fn hex_escape(c: char) -> String {
    format!("\\x{{{:X}}}", c as u32)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{modifier::Flags, xsd::parser::parse_from_str};

    use super::emit;

    fn emit_with(pattern: &str, flags: &Flags) -> String {
        let regexp = parse_from_str(pattern, flags).unwrap();
        emit(&regexp, flags)
    }

    fn emit_str(pattern: &str) -> String {
        emit_with(pattern, &Flags::new(true))
    }

    #[test]
    fn test_emit_literal() {
        assert_eq!(emit_str("abc"), "abc");
        assert_eq!(emit_str(r"a\.b\|c"), r"a\.b\|c");
        assert_eq!(emit_str(r"\n\t"), r"\x{A}\x{9}");
        assert_eq!(emit_str("a b-c#"), "a b-c#");
        assert_eq!(emit_str("é中"), "é中");
        assert_eq!(emit_str(""), "");
    }

    #[test]
    fn test_emit_structure() {
        assert_eq!(emit_str("ab|cd"), "ab|cd");
        assert_eq!(emit_str("a|"), "a|");
        assert_eq!(emit_str("(a|b)c"), "(a|b)c");
        assert_eq!(emit_str("(?:ab)+"), "(?:ab)+");
        assert_eq!(emit_str("()"), "()");
    }

    #[test]
    fn test_emit_quantifier() {
        assert_eq!(emit_str("a?b*c+"), "a?b*c+");
        assert_eq!(emit_str("a{2,4}"), "a{2,4}");
        assert_eq!(emit_str("a{3}"), "a{3}");
        assert_eq!(emit_str("a{3,}"), "a{3,}");
        assert_eq!(emit_str("a{1,}"), "a+");
        assert_eq!(emit_str("a*?b{2,3}?"), "a*?b{2,3}?");
    }

    #[test]
    fn test_emit_back_reference() {
        assert_eq!(emit_str(r"(a)\1"), r"(a)(?:\1)");
        assert_eq!(emit_str(r"(a)\10"), r"(a)(?:\1)0");
    }

    #[test]
    fn test_emit_wildcard_and_anchors() {
        assert_eq!(emit_str("^.$"), r"(?-m:^)[^\n\r](?-m:$)");

        let flags = Flags {
            dot_all: true,
            multiline: true,
            ..Flags::new(true)
        };
        assert_eq!(emit_with("^.$", &flags), "(?m:^)(?s:.)(?m:$)");
    }

    #[test]
    fn test_emit_char_class() {
        assert_eq!(emit_str("[a-z0]"), "[a-z0]");
        assert_eq!(emit_str("[^a-]"), r"[^a\x{2D}]");
        assert_eq!(emit_str(r"[\]\\]"), r"[\x{5D}\x{5C}]");
        assert_eq!(emit_str(r"[\s]"), r"[\x{9}-\x{A}\x{D}\x{20}]");
    }

    #[test]
    fn test_emit_char_class_subtraction() {
        assert_eq!(emit_str("[a-z-[aeiou]]"), "[[a-z]&&[^[aeiou]]]");
        assert_eq!(emit_str("[a-z-[b-y-[c]]]"), "[[a-z]&&[^[[b-y]&&[^[c]]]]]");
        assert_eq!(emit_str("[^a-[b]]"), "[[^a]&&[^[b]]]");
    }

    #[test]
    fn test_emit_escape() {
        assert_eq!(emit_str(r"\s"), r"[\x{9}-\x{A}\x{D}\x{20}]");
        assert_eq!(emit_str(r"\p{IsBasicLatin}"), r"[\x{0}-\x{7F}]");

        // empty blocks
        assert_eq!(emit_str(r"\p{IsHighSurrogates}"), r"[^\x{0}-\x{10FFFF}]");
        assert_eq!(emit_str(r"[\p{IsHighSurrogates}]"), r"[^\x{0}-\x{10FFFF}]");
    }

    #[test]
    fn test_emit_case_insensitive() {
        let flags = Flags {
            case_insensitive: true,
            ..Flags::new(true)
        };

        // literal chars and ranges get their case variants
        assert_eq!(emit_with("a[b-c]1.", &flags), r"[Aa][B-Cb-c]1[^\n\r]");
        assert_eq!(emit_with("[^a]", &flags), "[^Aa]");
        assert_eq!(emit_with("k", &flags), r"[Kk\x{212A}]");

        // escapes are not folded, in or out of a class
        assert_eq!(emit_with(r"\p{IsBasicLatin}", &flags), r"[\x{0}-\x{7F}]");
        assert_eq!(
            emit_with(r"[\p{IsBasicLatin}x]", &flags),
            r"[\x{0}-\x{7F}Xx]"
        );

        // back-references compare case-insensitively
        assert_eq!(emit_with(r"(a)\1", &flags), r"([Aa])(?i:\1)");
    }
}
