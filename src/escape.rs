// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! The built-in table of multi char escapes (`\d`, `\i` ...) and
//! category escapes (`\p{Lu}`, `\p{IsBasicLatin}` ...).
//!
//! Every entry is a set of code point ranges, built once on first use
//! and read-only afterwards.

use std::{collections::HashMap, sync::LazyLock};

use regex_syntax::{
    hir::{self, HirKind},
    ParserBuilder,
};

use crate::ast::EscapeClass;

const MAX_CODEPOINT: u32 = 0x10FFFF;
const SURROGATE_START: u32 = 0xD800;
const SURROGATE_END: u32 = 0xDFFF;

/// A normalized set of chars: ranges are sorted, non-overlapping and
/// non-adjacent.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RangeSet {
    ranges: Vec<(char, char)>,
}

impl RangeSet {
    pub fn from_ranges(ranges: impl IntoIterator<Item = (char, char)>) -> Self {
        let mut items: Vec<(u32, u32)> = ranges
            .into_iter()
            .map(|(start, end)| (start as u32, end as u32))
            .filter(|(start, end)| start <= end)
            .collect();
        items.sort_unstable();

        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(items.len());
        for (start, end) in items {
            match merged.last_mut() {
                Some(last) if start <= last.1.saturating_add(1) => {
                    last.1 = last.1.max(end);
                }
                _ => merged.push((start, end)),
            }
        }

        let mut set = RangeSet::default();
        for (start, end) in merged {
            set.push_u32_range(start, end);
        }
        set
    }

    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|(start, end)| {
                if *end < c {
                    std::cmp::Ordering::Less
                } else if *start > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn union(&self, other: &RangeSet) -> RangeSet {
        RangeSet::from_ranges(self.ranges.iter().chain(other.ranges.iter()).copied())
    }

    /// All chars (surrogates excluded) not in this set.
    pub fn complement(&self) -> RangeSet {
        let mut set = RangeSet::default();
        let mut next_start: u32 = 0;

        for (start, end) in &self.ranges {
            let start = *start as u32;
            if start > next_start {
                set.push_u32_range(next_start, start - 1);
            }
            next_start = *end as u32 + 1;
        }

        if next_start <= MAX_CODEPOINT {
            set.push_u32_range(next_start, MAX_CODEPOINT);
        }

        set
    }

    /// This set together with the simple case variants of its chars,
    /// e.g. `a-c` gives `A-C` and `a-c`, and `k` also gives the Kelvin sign.
    pub fn case_folded(&self) -> RangeSet {
        let mut class = hir::ClassUnicode::new(
            self.ranges
                .iter()
                .map(|(start, end)| hir::ClassUnicodeRange::new(*start, *end)),
        );

        // fails only when regex-syntax is built without `unicode-case`
        if class.try_case_fold_simple().is_err() {
            return self.clone();
        }

        RangeSet::from_ranges(class.iter().map(|range| (range.start(), range.end())))
    }

    // Appends a range known to follow the existing ones, skipping the
    // surrogate gap which has no `char` representation.
    fn push_u32_range(&mut self, start: u32, end: u32) {
        if end < SURROGATE_START || start > SURROGATE_END {
            self.push_scalar_range(start, end);
        } else {
            if start < SURROGATE_START {
                self.push_scalar_range(start, SURROGATE_START - 1);
            }
            if end > SURROGATE_END {
                self.push_scalar_range(SURROGATE_END + 1, end);
            }
        }
    }

    fn push_scalar_range(&mut self, start: u32, end: u32) {
        if let (Some(start), Some(end)) = (char::from_u32(start), char::from_u32(end)) {
            self.ranges.push((start, end));
        }
    }
}

// The general categories accepted by `\p{...}`.
const CATEGORY_NAMES: [&str; 36] = [
    "L", "Lu", "Ll", "Lt", "Lm", "Lo", //
    "M", "Mn", "Mc", "Me", //
    "N", "Nd", "Nl", "No", //
    "P", "Pc", "Pd", "Ps", "Pe", "Pi", "Pf", "Po", //
    "Z", "Zs", "Zl", "Zp", //
    "S", "Sm", "Sc", "Sk", "So", //
    "C", "Cc", "Cf", "Co", "Cn",
];

// The block names accepted by `\p{Is...}`, as listed by XML Schema.
// The surrogate blocks have no chars representable in a Rust string.
const BLOCKS: &[(&str, &[(u32, u32)])] = &[
    ("BasicLatin", &[(0x0000, 0x007F)]),
    ("Latin-1Supplement", &[(0x0080, 0x00FF)]),
    ("LatinExtended-A", &[(0x0100, 0x017F)]),
    ("LatinExtended-B", &[(0x0180, 0x024F)]),
    ("IPAExtensions", &[(0x0250, 0x02AF)]),
    ("SpacingModifierLetters", &[(0x02B0, 0x02FF)]),
    ("CombiningDiacriticalMarks", &[(0x0300, 0x036F)]),
    ("Greek", &[(0x0370, 0x03FF)]),
    ("Cyrillic", &[(0x0400, 0x04FF)]),
    ("Armenian", &[(0x0530, 0x058F)]),
    ("Hebrew", &[(0x0590, 0x05FF)]),
    ("Arabic", &[(0x0600, 0x06FF)]),
    ("Syriac", &[(0x0700, 0x074F)]),
    ("Thaana", &[(0x0780, 0x07BF)]),
    ("Devanagari", &[(0x0900, 0x097F)]),
    ("Bengali", &[(0x0980, 0x09FF)]),
    ("Gurmukhi", &[(0x0A00, 0x0A7F)]),
    ("Gujarati", &[(0x0A80, 0x0AFF)]),
    ("Oriya", &[(0x0B00, 0x0B7F)]),
    ("Tamil", &[(0x0B80, 0x0BFF)]),
    ("Telugu", &[(0x0C00, 0x0C7F)]),
    ("Kannada", &[(0x0C80, 0x0CFF)]),
    ("Malayalam", &[(0x0D00, 0x0D7F)]),
    ("Sinhala", &[(0x0D80, 0x0DFF)]),
    ("Thai", &[(0x0E00, 0x0E7F)]),
    ("Lao", &[(0x0E80, 0x0EFF)]),
    ("Tibetan", &[(0x0F00, 0x0FFF)]),
    ("Myanmar", &[(0x1000, 0x109F)]),
    ("Georgian", &[(0x10A0, 0x10FF)]),
    ("HangulJamo", &[(0x1100, 0x11FF)]),
    ("Ethiopic", &[(0x1200, 0x137F)]),
    ("Cherokee", &[(0x13A0, 0x13FF)]),
    ("UnifiedCanadianAboriginalSyllabics", &[(0x1400, 0x167F)]),
    ("Ogham", &[(0x1680, 0x169F)]),
    ("Runic", &[(0x16A0, 0x16FF)]),
    ("Khmer", &[(0x1780, 0x17FF)]),
    ("Mongolian", &[(0x1800, 0x18AF)]),
    ("LatinExtendedAdditional", &[(0x1E00, 0x1EFF)]),
    ("GreekExtended", &[(0x1F00, 0x1FFF)]),
    ("GeneralPunctuation", &[(0x2000, 0x206F)]),
    ("SuperscriptsandSubscripts", &[(0x2070, 0x209F)]),
    ("CurrencySymbols", &[(0x20A0, 0x20CF)]),
    ("CombiningMarksforSymbols", &[(0x20D0, 0x20FF)]),
    ("LetterlikeSymbols", &[(0x2100, 0x214F)]),
    ("NumberForms", &[(0x2150, 0x218F)]),
    ("Arrows", &[(0x2190, 0x21FF)]),
    ("MathematicalOperators", &[(0x2200, 0x22FF)]),
    ("MiscellaneousTechnical", &[(0x2300, 0x23FF)]),
    ("ControlPictures", &[(0x2400, 0x243F)]),
    ("OpticalCharacterRecognition", &[(0x2440, 0x245F)]),
    ("EnclosedAlphanumerics", &[(0x2460, 0x24FF)]),
    ("BoxDrawing", &[(0x2500, 0x257F)]),
    ("BlockElements", &[(0x2580, 0x259F)]),
    ("GeometricShapes", &[(0x25A0, 0x25FF)]),
    ("MiscellaneousSymbols", &[(0x2600, 0x26FF)]),
    ("Dingbats", &[(0x2700, 0x27BF)]),
    ("BraillePatterns", &[(0x2800, 0x28FF)]),
    ("CJKRadicalsSupplement", &[(0x2E80, 0x2EFF)]),
    ("KangxiRadicals", &[(0x2F00, 0x2FDF)]),
    ("IdeographicDescriptionCharacters", &[(0x2FF0, 0x2FFF)]),
    ("CJKSymbolsandPunctuation", &[(0x3000, 0x303F)]),
    ("Hiragana", &[(0x3040, 0x309F)]),
    ("Katakana", &[(0x30A0, 0x30FF)]),
    ("Bopomofo", &[(0x3100, 0x312F)]),
    ("HangulCompatibilityJamo", &[(0x3130, 0x318F)]),
    ("Kanbun", &[(0x3190, 0x319F)]),
    ("BopomofoExtended", &[(0x31A0, 0x31BF)]),
    ("EnclosedCJKLettersandMonths", &[(0x3200, 0x32FF)]),
    ("CJKCompatibility", &[(0x3300, 0x33FF)]),
    ("CJKUnifiedIdeographsExtensionA", &[(0x3400, 0x4DB5)]),
    ("CJKUnifiedIdeographs", &[(0x4E00, 0x9FFF)]),
    ("YiSyllables", &[(0xA000, 0xA48F)]),
    ("YiRadicals", &[(0xA490, 0xA4CF)]),
    ("HangulSyllables", &[(0xAC00, 0xD7A3)]),
    ("HighSurrogates", &[]),
    ("HighPrivateUseSurrogates", &[]),
    ("LowSurrogates", &[]),
    (
        "PrivateUse",
        &[(0xE000, 0xF8FF), (0xF0000, 0xFFFFD), (0x100000, 0x10FFFD)],
    ),
    ("CJKCompatibilityIdeographs", &[(0xF900, 0xFAFF)]),
    ("AlphabeticPresentationForms", &[(0xFB00, 0xFB4F)]),
    ("ArabicPresentationForms-A", &[(0xFB50, 0xFDFF)]),
    ("CombiningHalfMarks", &[(0xFE20, 0xFE2F)]),
    ("CJKCompatibilityForms", &[(0xFE30, 0xFE4F)]),
    ("SmallFormVariants", &[(0xFE50, 0xFE6F)]),
    ("ArabicPresentationForms-B", &[(0xFE70, 0xFEFE)]),
    ("Specials", &[(0xFEFF, 0xFEFF), (0xFFF0, 0xFFFD)]),
    ("HalfwidthandFullwidthForms", &[(0xFF00, 0xFFEF)]),
    ("OldItalic", &[(0x10300, 0x1032F)]),
    ("Gothic", &[(0x10330, 0x1034F)]),
    ("Deseret", &[(0x10400, 0x1044F)]),
    ("ByzantineMusicalSymbols", &[(0x1D000, 0x1D0FF)]),
    ("MusicalSymbols", &[(0x1D100, 0x1D1FF)]),
    ("MathematicalAlphanumericSymbols", &[(0x1D400, 0x1D7FF)]),
    ("CJKUnifiedIdeographsExtensionB", &[(0x20000, 0x2A6D6)]),
    ("CJKCompatibilityIdeographsSupplement", &[(0x2F800, 0x2FA1F)]),
    ("Tags", &[(0xE0000, 0xE007F)]),
];

// XML 1.0 (fifth edition) NameStartChar.
const NAME_START_CHARS: &[(u32, u32)] = &[
    (0x3A, 0x3A),
    (0x41, 0x5A),
    (0x5F, 0x5F),
    (0x61, 0x7A),
    (0xC0, 0xD6),
    (0xD8, 0xF6),
    (0xF8, 0x2FF),
    (0x370, 0x37D),
    (0x37F, 0x1FFF),
    (0x200C, 0x200D),
    (0x2070, 0x218F),
    (0x2C00, 0x2FEF),
    (0x3001, 0xD7FF),
    (0xF900, 0xFDCF),
    (0xFDF0, 0xFFFD),
    (0x10000, 0xEFFFF),
];

// NameChar in addition to NameStartChar.
const NAME_CHARS_EXTRA: &[(u32, u32)] = &[
    (0x2D, 0x2E),
    (0x30, 0x39),
    (0xB7, 0xB7),
    (0x300, 0x36F),
    (0x203F, 0x2040),
];

static CATEGORY_TABLE: LazyLock<HashMap<String, RangeSet>> = LazyLock::new(build_category_table);

static MULTI_ESCAPE_TABLE: LazyLock<HashMap<char, RangeSet>> =
    LazyLock::new(build_multi_escape_table);

fn build_category_table() -> HashMap<String, RangeSet> {
    let mut table = HashMap::new();

    for name in CATEGORY_NAMES {
        if let Some(set) = resolve_unicode_category(name) {
            table.insert(name.to_owned(), set);
        }
    }

    for (name, ranges) in BLOCKS {
        table.insert(format!("Is{}", name), set_from_u32_ranges(ranges));
    }

    table
}

fn build_multi_escape_table() -> HashMap<char, RangeSet> {
    let mut table = HashMap::new();

    table.insert(
        's',
        RangeSet::from_ranges([(' ', ' '), ('\t', '\t'), ('\n', '\n'), ('\r', '\r')]),
    );

    let name_start = set_from_u32_ranges(NAME_START_CHARS);
    let name_chars = name_start.union(&set_from_u32_ranges(NAME_CHARS_EXTRA));
    table.insert('i', name_start);
    table.insert('c', name_chars);

    if let Some(digits) = CATEGORY_TABLE.get("Nd") {
        table.insert('d', digits.clone());
    }

    // \w is everything except punctuation, separators and others
    let mut not_word = RangeSet::default();
    for name in ["P", "Z", "C"] {
        if let Some(set) = CATEGORY_TABLE.get(name) {
            not_word = not_word.union(set);
        }
    }
    table.insert('w', not_word.complement());

    table
}

fn set_from_u32_ranges(ranges: &[(u32, u32)]) -> RangeSet {
    RangeSet::from_ranges(ranges.iter().filter_map(|(start, end)| {
        match (char::from_u32(*start), char::from_u32(*end)) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }))
}

fn resolve_unicode_category(name: &str) -> Option<RangeSet> {
    let mut parser = ParserBuilder::new().build();
    let hir = parser.parse(&format!(r"\p{{{}}}", name)).ok()?;

    match hir.kind() {
        HirKind::Class(hir::Class::Unicode(class)) => Some(RangeSet::from_ranges(
            class.iter().map(|range| (range.start(), range.end())),
        )),
        _ => None,
    }
}

/// Look up the chars matched by an escape.
///
/// Returns `None` when the category or block name is not in the table.
pub fn lookup(escape: &EscapeClass) -> Option<RangeSet> {
    match escape {
        EscapeClass::Multi(letter) => {
            let set = MULTI_ESCAPE_TABLE.get(&letter.to_ascii_lowercase())?;
            if letter.is_ascii_uppercase() {
                Some(set.complement())
            } else {
                Some(set.clone())
            }
        }
        EscapeClass::Category { name, negated } => {
            let set = CATEGORY_TABLE.get(name.as_str())?;
            if *negated {
                Some(set.complement())
            } else {
                Some(set.clone())
            }
        }
    }
}
