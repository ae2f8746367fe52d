// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    compiler::{compile, CompiledPattern},
    error::RegexError,
};

/// A compiled pattern built into a `fancy_regex::Regex`.
#[derive(Debug, Clone)]
pub struct HostRegex {
    backend: fancy_regex::Regex,
    compiled: CompiledPattern,
}

/// One match, with byte offsets into the haystack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    start: usize,
    end: usize,
    text: String,
}

impl Match {
    fn from_backend(matched: fancy_regex::Match<'_>) -> Self {
        Self {
            start: matched.start(),
            end: matched.end(),
            text: matched.as_str().to_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

/// The groups of one match, index 0 being the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<Option<Match>>,
}

impl Captures {
    fn from_backend(captures: &fancy_regex::Captures<'_>) -> Self {
        let groups = (0..captures.len())
            .map(|index| captures.get(index).map(Match::from_backend))
            .collect();
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Match> {
        self.groups.get(index).and_then(Option::as_ref)
    }
}

impl HostRegex {
    /// Compile a pattern with the given modifiers and build it.
    pub fn new(pattern: &str, modifiers: &str, extended: bool) -> Result<Self, RegexError> {
        let compiled = compile(pattern, modifiers, extended)?;
        Self::from_compiled(compiled)
    }

    /// Build an already translated pattern, applying its flags.
    pub fn from_compiled(compiled: CompiledPattern) -> Result<Self, RegexError> {
        let pattern = if compiled.flags.literal {
            fancy_regex::escape(&compiled.pattern).into_owned()
        } else {
            compiled.pattern.clone()
        };

        let mut builder = fancy_regex::RegexBuilder::new(&pattern);
        // outside literal mode the case variants are part of the pattern
        builder.case_insensitive(compiled.flags.literal && compiled.flags.case_insensitive);
        builder.multi_line(compiled.flags.multiline);
        builder.dot_matches_new_line(compiled.flags.dot_all);
        let backend = builder.build()?;

        Ok(Self { backend, compiled })
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }

    pub fn is_match(&self, input: &str) -> Result<bool, RegexError> {
        Ok(self.backend.is_match(input)?)
    }

    pub fn find(&self, input: &str) -> Result<Option<Match>, RegexError> {
        let matched = self.backend.find(input)?;
        Ok(matched.map(Match::from_backend))
    }

    pub fn captures(&self, input: &str) -> Result<Option<Captures>, RegexError> {
        let captures = self.backend.captures(input)?;
        Ok(captures.as_ref().map(Captures::from_backend))
    }
}
