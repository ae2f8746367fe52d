// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use regex_xsd::{compile, ErrorKind, HostRegex};

fn class_char_strategy() -> BoxedStrategy<char> {
    prop_oneof![
        proptest::char::range('0', '9'),
        proptest::char::range('A', 'Z'),
        proptest::char::range('a', 'z'),
        proptest::char::range('\u{391}', '\u{3C9}'),
    ]
    .boxed()
}

fn pattern_fragment_strategy() -> BoxedStrategy<&'static str> {
    prop_oneof![
        Just("a"),
        Just("b"),
        Just("1"),
        Just("."),
        Just("^"),
        Just("$"),
        Just("|"),
        Just("("),
        Just(")"),
        Just("(?:"),
        Just("["),
        Just("]"),
        Just("[^"),
        Just("-"),
        Just("-["),
        Just("*"),
        Just("+"),
        Just("?"),
        Just("{2}"),
        Just("{1,3}"),
        Just("{3,1}"),
        Just("{"),
        Just("}"),
        Just(","),
        Just(r"\d"),
        Just(r"\1"),
        Just(r"\p{L}"),
        Just(r"\p{IsBasicLatin}"),
        Just(r"\P{Nd}"),
        Just(r"\p{Foo}"),
        Just(r"\q"),
        Just("\\"),
        Just(" "),
        Just("#"),
    ]
    .boxed()
}

fn assert_compile_never_panics(pattern: &str, modifiers: &str) -> TestCaseResult {
    let outcome = std::panic::catch_unwind(|| compile(pattern, modifiers, true));
    prop_assert!(outcome.is_ok(), "compile panicked for pattern: {pattern:?}");

    match outcome {
        Ok(Ok(compiled)) => {
            // every accepted pattern must also be accepted by the host
            let host_pattern = compiled.pattern.clone();
            let built = HostRegex::from_compiled(compiled);
            prop_assert!(
                built.is_ok(),
                "host rejected {host_pattern:?} compiled from {pattern:?}: {:?}",
                built.err()
            );
        }
        Ok(Err(err)) => {
            if let Some(location) = err.location() {
                prop_assert!(
                    location.index <= pattern.chars().count(),
                    "location {location:?} is out of pattern {pattern:?}"
                );
            }
        }
        Err(_) => {}
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn quantifier_bounds_are_ordered(min in 0u32..64, max in 0u32..64) {
        let result = compile(&format!("a{{{min},{max}}}"), "", false);
        if min <= max {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::QuantifierRange);
        }
    }

    #[test]
    fn quantifier_bounds_match_counts(min in 0u32..8, extra in 0u32..8, count in 0usize..20) {
        let max = min + extra;
        let regex = HostRegex::new(&format!("^a{{{min},{max}}}$"), "", false).unwrap();
        let input = "a".repeat(count);
        let expected = (min as usize..=max as usize).contains(&count);
        prop_assert_eq!(regex.is_match(&input).unwrap(), expected);
    }

    #[test]
    fn char_ranges_are_ordered(
        start in class_char_strategy(),
        end in class_char_strategy(),
        candidate in class_char_strategy(),
    ) {
        let pattern = format!("^[{start}-{end}]$");
        match HostRegex::new(&pattern, "", false) {
            Ok(regex) => {
                prop_assert!(start <= end);
                let expected = start <= candidate && candidate <= end;
                prop_assert_eq!(regex.is_match(&candidate.to_string()).unwrap(), expected);
            }
            Err(err) => {
                prop_assert!(start > end);
                prop_assert_eq!(err.kind(), ErrorKind::CharRange);
            }
        }
    }

    #[test]
    fn literal_mode_passes_text_through(text in ".{0,24}") {
        let compiled = compile(&text, "q", true).unwrap();
        prop_assert_eq!(&compiled.pattern, &text);

        let regex = HostRegex::from_compiled(compiled).unwrap();
        prop_assert!(regex.is_match(&text).unwrap());
    }

    #[test]
    fn generated_patterns_do_not_panic(
        fragments in vec(pattern_fragment_strategy(), 0..16),
        modifiers in prop_oneof![Just(""), Just("i"), Just("x"), Just("ms")],
    ) {
        let pattern = fragments.concat();
        assert_compile_never_panics(&pattern, modifiers)?;
    }
}
