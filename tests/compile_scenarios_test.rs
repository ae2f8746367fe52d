// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use pretty_assertions::assert_eq;
use regex_xsd::{ast::RegExp, compile, parse, ErrorKind, HostRegex};

// matches the whole input only
fn full(pattern: &str, modifiers: &str) -> HostRegex {
    HostRegex::new(&format!("^(?:{})$", pattern), modifiers, true).unwrap()
}

#[test]
fn test_alternation() {
    assert!(matches!(parse("ab|cd", "", false).unwrap(), RegExp::Disjunction(b) if b.len() == 2));

    let regex = HostRegex::new("^ab|cd$", "", false).unwrap();
    assert!(regex.is_match("ab").unwrap());
    assert!(regex.is_match("cd").unwrap());
    assert!(!regex.is_match("ac").unwrap());
}

#[test]
fn test_bounded_quantifier() {
    let regex = full("a{2,4}", "");
    assert!(!regex.is_match("a").unwrap());
    assert!(regex.is_match("aa").unwrap());
    assert!(regex.is_match("aaaa").unwrap());
    assert!(!regex.is_match("aaaaa").unwrap());

    let err = compile("a{4,2}", "", false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::QuantifierRange);
    assert_eq!(err.fragment("a{4,2}").unwrap(), "{4,2}");
}

#[test]
fn test_back_reference() {
    let regex = full(r"(a|b)\1", "");
    assert!(regex.is_match("aa").unwrap());
    assert!(regex.is_match("bb").unwrap());
    assert!(!regex.is_match("ab").unwrap());

    assert_eq!(
        compile(r"\1(a)", "", false).unwrap_err().kind(),
        ErrorKind::InvalidBackReference
    );
    assert_eq!(
        compile(r"(a\1)", "", false).unwrap_err().kind(),
        ErrorKind::InvalidBackReference
    );
}

#[test]
fn test_back_reference_followed_by_digit() {
    // a single group, so `\12` is `\1` followed by '2'
    let regex = full(r"(a)\12", "");
    assert!(regex.is_match("aa2").unwrap());
    assert!(!regex.is_match("a").unwrap());
}

#[test]
fn test_group_order() {
    let regex = HostRegex::new("((a)(b))(c)", "", false).unwrap();
    let captures = regex.captures("abc").unwrap().unwrap();

    let texts: Vec<&str> = (1..captures.len())
        .map(|index| captures.get(index).map_or("", |m| m.as_str()))
        .collect();
    assert_eq!(texts, vec!["ab", "a", "b", "c"]);
}

#[test]
fn test_class_subtraction() {
    let regex = full("[a-z-[aeiou]]", "");
    assert!(regex.is_match("b").unwrap());
    assert!(regex.is_match("z").unwrap());
    assert!(!regex.is_match("a").unwrap());
    assert!(!regex.is_match("u").unwrap());
    assert!(!regex.is_match("B").unwrap());
}

#[test]
fn test_class_subtraction_nested() {
    // a..z without b..y, but with c put back
    let regex = full("[a-z-[b-y-[c]]]", "");
    for (input, expected) in [("a", true), ("z", true), ("c", true), ("b", false), ("m", false)] {
        assert_eq!(regex.is_match(input).unwrap(), expected, "input: {}", input);
    }

    // the negation applies to the left group only
    let regex = full("[^a-[b]]", "");
    assert!(!regex.is_match("a").unwrap());
    assert!(!regex.is_match("b").unwrap());
    assert!(regex.is_match("c").unwrap());
}

#[test]
fn test_wildcard_dot_all() {
    let regex = full(".", "");
    assert!(regex.is_match("a").unwrap());
    assert!(!regex.is_match("\n").unwrap());
    assert!(!regex.is_match("\r").unwrap());

    let regex = full(".", "s");
    assert!(regex.is_match("\n").unwrap());
    assert!(regex.is_match("\r").unwrap());
}

#[test]
fn test_anchors_multiline() {
    let regex = HostRegex::new("^b$", "", false).unwrap();
    assert!(!regex.is_match("a\nb\nc").unwrap());

    let regex = HostRegex::new("^b$", "m", false).unwrap();
    assert!(regex.is_match("a\nb\nc").unwrap());
}

#[test]
fn test_case_insensitive() {
    let regex = full("[a-c]x", "i");
    assert!(regex.is_match("BX").unwrap());

    // category escapes are not affected
    let regex = full(r"\p{Lu}", "i");
    assert!(regex.is_match("A").unwrap());
    assert!(!regex.is_match("a").unwrap());

    let regex = full(r"\P{Ll}", "i");
    assert!(regex.is_match("A").unwrap());
    assert!(!regex.is_match("a").unwrap());

    // nor inside a class
    let regex = full(r"[\p{Lu}]", "i");
    assert!(regex.is_match("A").unwrap());
    assert!(!regex.is_match("a").unwrap());

    let regex = full(r"[\p{Lu}x]+", "i");
    assert!(regex.is_match("AXx").unwrap());
    assert!(!regex.is_match("Ab").unwrap());

    let regex = full("ABC", "i");
    assert!(regex.is_match("abc").unwrap());

    let regex = full("[^a]", "i");
    assert!(regex.is_match("b").unwrap());
    assert!(!regex.is_match("A").unwrap());

    let regex = full(r"(a)\1", "i");
    assert!(regex.is_match("aA").unwrap());
}

#[test]
fn test_empty_class() {
    let regex = full(r"a\p{IsHighSurrogates}?", "");
    assert!(regex.is_match("a").unwrap());

    let regex = full(r"[\p{IsHighSurrogates}]", "");
    assert!(!regex.is_match("a").unwrap());

    let regex = full(r"[^\p{IsHighSurrogates}]", "");
    assert!(regex.is_match("a").unwrap());
}

#[test]
fn test_multi_char_escapes() {
    let regex = full(r"\d+\s\w", "");
    assert!(regex.is_match("42 x").unwrap());
    assert!(regex.is_match("٤٢\tx").unwrap());
    assert!(!regex.is_match("42 .").unwrap());

    let regex = full(r"\i\c*", "");
    assert!(regex.is_match("_name-1").unwrap());
    assert!(regex.is_match("ns:elem").unwrap());
    assert!(!regex.is_match("1abc").unwrap());

    let regex = full(r"[\p{IsGreek}]+", "");
    assert!(regex.is_match("αβγ").unwrap());
    assert!(!regex.is_match("abc").unwrap());
}

#[test]
fn test_strip_whitespace() {
    let regex = full("a b c  # letters\n [ ]", "x");
    assert!(regex.is_match("abc ").unwrap());
    assert!(!regex.is_match("a b c ").unwrap());
}

#[test]
fn test_literal_mode() {
    let compiled = compile("a{4,2}[", "q", true).unwrap();
    assert_eq!(compiled.pattern, "a{4,2}[");

    let regex = HostRegex::new("a{4,2}[", "q", true).unwrap();
    assert!(regex.is_match("xa{4,2}[x").unwrap());
    assert!(!regex.is_match("aaaa").unwrap());
}

#[test]
fn test_legacy_dialect() {
    assert_eq!(compile("(?:a)", "", false).unwrap_err().kind(), ErrorKind::Lex);
    assert_eq!(compile("a", "q", false).unwrap_err().kind(), ErrorKind::Modifier);
    assert!(compile("(?:a)", "", true).is_ok());
}

#[test]
fn test_error_display() {
    let err = compile("ab[z-a]", "", true).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid character range: Illegal range, lower > upper bound: 'z'-'a'. at char 3"
    );
}
