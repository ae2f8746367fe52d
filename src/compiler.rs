// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    ast::RegExp,
    emitter::emit,
    error::RegexError,
    modifier::{parse_modifiers, Flags},
    xsd::parse_from_str,
};

/// A translated pattern together with the flags the host engine
/// applies when building it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CompiledPattern {
    /// The host pattern, or the raw input text in literal mode.
    pub pattern: String,
    pub flags: Flags,
}

impl CompiledPattern {
    pub fn is_literal(&self) -> bool {
        self.flags.literal
    }
}

/// Translate a pattern into host syntax.
///
/// `modifiers` is the flag string (`i`, `m`, `s`, `x` and `q`),
/// `extended` selects the newer dialect with non-capturing groups
/// and literal mode.
///
/// In literal mode (`q`) the pattern is returned as is, without
/// being lexed or validated.
pub fn compile(
    pattern: &str,
    modifiers: &str,
    extended: bool,
) -> Result<CompiledPattern, RegexError> {
    let flags = parse_modifiers(modifiers, extended)?;

    if flags.literal {
        return Ok(CompiledPattern {
            pattern: pattern.to_owned(),
            flags,
        });
    }

    let regexp = parse_from_str(pattern, &flags)?;

    Ok(CompiledPattern {
        pattern: emit(&regexp, &flags),
        flags,
    })
}

/// Parse a pattern into its syntax tree, running every check `compile`
/// runs. Literal mode yields a branch of the literal chars.
pub fn parse(pattern: &str, modifiers: &str, extended: bool) -> Result<RegExp, RegexError> {
    let flags = parse_modifiers(modifiers, extended)?;

    if flags.literal {
        let mut chars: Vec<RegExp> = pattern.chars().map(RegExp::Literal).collect();
        return Ok(if chars.len() == 1 {
            chars.remove(0)
        } else {
            RegExp::Branch(chars)
        });
    }

    parse_from_str(pattern, &flags)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::RegExp,
        error::ErrorKind,
        modifier::Flags,
    };

    use super::{compile, parse, CompiledPattern};

    #[test]
    fn test_compile() {
        assert_eq!(
            compile("ab|cd", "", false).unwrap(),
            CompiledPattern {
                pattern: "ab|cd".to_owned(),
                flags: Flags::new(false),
            }
        );

        let compiled = compile("[0-9-[5]]+", "", false).unwrap();
        assert_eq!(compiled.pattern, "[[0-9]&&[^[5]]]+");

        // the case variants are spelled out, the flag is kept for the host
        let compiled = compile("[b-d-[c]]+", "i", false).unwrap();
        assert_eq!(compiled.pattern, "[[B-Db-d]&&[^[Cc]]]+");
        assert!(compiled.flags.case_insensitive);
        assert!(!compiled.is_literal());
    }

    #[test]
    fn test_compile_strip_whitespace() {
        assert_eq!(
            compile("a b # comment\n c{1, 2}", "x", true).unwrap().pattern,
            "abc{1,2}"
        );

        // whitespace inside a class is kept
        assert_eq!(compile("[a b]", "x", true).unwrap().pattern, r"[a\x{20}b]");
    }

    #[test]
    fn test_compile_literal() {
        let compiled = compile("a{4,2}(", "q", true).unwrap();
        assert_eq!(compiled.pattern, "a{4,2}(");
        assert!(compiled.is_literal());

        // `q` is rejected by the legacy dialect
        assert_eq!(compile("a", "q", false).unwrap_err().kind(), ErrorKind::Modifier);
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(compile("a", "k", true).unwrap_err().kind(), ErrorKind::Modifier);
        assert_eq!(compile("a{4,2}", "", true).unwrap_err().kind(), ErrorKind::QuantifierRange);
        assert_eq!(compile("[z-a]", "", true).unwrap_err().kind(), ErrorKind::CharRange);
        assert_eq!(compile(r"\1(a)", "", true).unwrap_err().kind(), ErrorKind::InvalidBackReference);
        assert_eq!(compile(r"\p{Xx}", "", true).unwrap_err().kind(), ErrorKind::UnknownEscape);
        assert_eq!(compile("[a", "", true).unwrap_err().kind(), ErrorKind::Lex);
        assert_eq!(compile("a**", "", true).unwrap_err().kind(), ErrorKind::Grammar);
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("a{2,4}", "", false).unwrap().to_string(), "repeat_range('a', 2, 4)");
        assert_eq!(
            parse("a.", "q", true).unwrap(),
            RegExp::Branch(vec![RegExp::Literal('a'), RegExp::Literal('.')])
        );
    }
}
