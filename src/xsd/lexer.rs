// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Syntax Summary (XML Schema regular expressions, with the XQuery additions):
//
// Meta characters and their meanings:
//
// - [ ]      Character class
// - [^ ]     Negated character class
// - [a-[b]]  Character class subtraction
// - {m}      Exact repetition (m times)
// - {m,n}    Repetition range (m to n times)
// - {m,}     At least m repetitions
// - (xyz)    Capturing group
// - (?:xyz)  Non-capturing group (extended syntax only)
// - *        Zero or more repetitions
// - +        One or more repetitions
// - ?        Optional, or lazy when following another quantifier
// - |        Alternation
// - ^        Start-of-string (or line) assertion
// - $        End-of-string (or line) assertion
// - .        Any character except \n and \r (unless dot-all)
// - \        Escape
//
// Single char escapes:
//
// - \n \r \t
// - \\ \| \. \- \^ \? \* \+ \{ \} \( \) \[ \] \$
//
// Multi char escapes:
//
// - \s \S    whitespace: [#x20\t\n\r]
// - \i \I    XML name start chars
// - \c \C    XML name chars
// - \d \D    \p{Nd}
// - \w \W    [#x0000-#x10FFFF]-[\p{P}\p{Z}\p{C}]
//
// Category escapes:
//
// - \p{Lu}, \P{Lu}                  Unicode general categories
// - \p{IsBasicLatin}, \P{IsGreek}   Unicode blocks
//
// Back-references:
//
// - \1 .. \99...   only outside of char classes
//
// Inside a char class `[` must be escaped, except for the subtraction `-[`.

use crate::{
    charwithposition::{CharWithPosition, CharsWithPositionIter},
    error::RegexError,
    location::Location,
    modifier::Flags,
    peekableiter::PeekableIter,
};

use super::token::{Token, TokenWithRange};

pub const LEXER_PEEK_CHAR_MAX_COUNT: usize = 3;

/// Tokenize the whole pattern at once, mainly for inspection and tests.
///
/// The parser pulls tokens from `Lexer` one at a time instead.
pub fn lex_from_str(s: &str, flags: &Flags) -> Result<Vec<TokenWithRange>, RegexError> {
    let mut chars = s.chars();
    let mut char_position_iter = CharsWithPositionIter::new(&mut chars);
    let mut peekable_char_position_iter =
        PeekableIter::new(&mut char_position_iter, LEXER_PEEK_CHAR_MAX_COUNT);
    let lexer = Lexer::new(&mut peekable_char_position_iter, flags);
    lexer.collect()
}

/// A pull-based lexer.
///
/// The meaning of a char depends on where it is (e.g. `^` and `-` inside
/// a class, digits inside `{...}`), so the lexer tracks the class nesting
/// and whether it is inside a bounded quantifier.
pub struct Lexer<'a> {
    upstream: &'a mut PeekableIter<'a, CharWithPosition>,
    last_position: Location, // last position consumed
    consumed_any: bool,

    extended: bool,
    strip_whitespace: bool,

    class_depth: usize,
    class_start: bool,      // directly after `[`
    subtract_pending: bool, // directly after the `-` of `-[`
    in_quantifier: bool,

    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(upstream: &'a mut PeekableIter<'a, CharWithPosition>, flags: &Flags) -> Self {
        Self {
            upstream,
            last_position: Location::new_position(0, 0, 0),
            consumed_any: false,
            extended: flags.extended,
            strip_whitespace: flags.strip_whitespace,
            class_depth: 0,
            class_start: false,
            subtract_pending: false,
            in_quantifier: false,
            finished: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        match self.upstream.next() {
            Some(CharWithPosition {
                character,
                position,
            }) => {
                self.last_position = position;
                self.consumed_any = true;
                Some(character)
            }
            None => None,
        }
    }

    fn peek_char(&self, offset: usize) -> Option<&char> {
        match self.upstream.peek(offset) {
            Some(CharWithPosition { character, .. }) => Some(character),
            None => None,
        }
    }

    fn peek_char_and_equals(&self, offset: usize, expected_char: char) -> bool {
        matches!(
            self.upstream.peek(offset),
            Some(CharWithPosition { character, .. }) if character == &expected_char)
    }

    /// The position of the next char, or the end of the pattern.
    fn current_position(&self) -> Location {
        match self.upstream.peek(0) {
            Some(CharWithPosition { position, .. }) => *position,
            None if self.consumed_any => self.last_position.position_after(),
            None => Location::new_position(0, 0, 0),
        }
    }

    /// The range from `start` to the last consumed char, inclusive.
    fn range_from(&self, start: &Location) -> Location {
        Location::from_position_pair_with_end_included(start, &self.last_position)
    }

    fn single_char_token(&mut self, token: Token) -> TokenWithRange {
        self.next_char();
        TokenWithRange::from_position_and_length(token, &self.last_position, 1)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<TokenWithRange, RegexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lex_token() {
            Ok(Some(twr)) => Some(Ok(twr)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl Lexer<'_> {
    fn lex_token(&mut self) -> Result<Option<TokenWithRange>, RegexError> {
        if self.strip_whitespace && self.class_depth == 0 {
            self.skip_whitespace_and_comments();
        }

        if self.peek_char(0).is_none() {
            if self.class_depth > 0 {
                return Err(RegexError::Lex(
                    "Incomplete char class, expect \"]\".".to_owned(),
                    self.current_position(),
                ));
            }

            if self.in_quantifier {
                return Err(RegexError::Lex(
                    "Incomplete quantifier, expect \"}\".".to_owned(),
                    self.current_position(),
                ));
            }

            return Ok(None);
        }

        let twr = if self.in_quantifier {
            self.lex_quantifier()?
        } else if self.class_depth > 0 {
            self.lex_class()?
        } else {
            self.lex_main()?
        };

        Ok(Some(twr))
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(current_char) = self.peek_char(0) {
            match current_char {
                ' ' | '\t' | '\r' | '\n' => {
                    self.next_char();
                }
                '#' => {
                    // comment, to the end of line
                    while let Some(c) = self.next_char() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_main(&mut self) -> Result<TokenWithRange, RegexError> {
        let start = self.current_position();

        let current_char = match self.peek_char(0) {
            Some(c) => *c,
            None => unreachable!("checked by lex_token"),
        };

        let twr = match current_char {
            '[' => {
                self.class_depth = 1;
                self.class_start = true;
                self.single_char_token(Token::ClassOpen)
            }
            ']' => {
                return Err(RegexError::Lex(
                    "Unexpected \"]\" outside of a char class, use \"\\]\" for the literal char."
                        .to_owned(),
                    Location::from_position_and_length(&start, 1),
                ));
            }
            '{' => {
                self.in_quantifier = true;
                self.single_char_token(Token::QuantifierOpen)
            }
            '}' => {
                return Err(RegexError::Lex(
                    "Unexpected \"}\", use \"\\}\" for the literal char.".to_owned(),
                    Location::from_position_and_length(&start, 1),
                ));
            }
            '(' if self.peek_char_and_equals(1, '?') => {
                if self.extended && self.peek_char_and_equals(2, ':') {
                    self.next_char(); // consume '('
                    self.next_char(); // consume '?'
                    self.next_char(); // consume ':'
                    TokenWithRange::new(Token::NonCapturingGroupOpen, self.range_from(&start))
                } else if self.extended {
                    return Err(RegexError::Lex(
                        "Unsupported group, only \"(?:\" is allowed.".to_owned(),
                        Location::from_position_and_length(&start, 2),
                    ));
                } else {
                    return Err(RegexError::Lex(
                        "Non-capturing groups require the extended syntax.".to_owned(),
                        Location::from_position_and_length(&start, 2),
                    ));
                }
            }
            '(' => self.single_char_token(Token::GroupOpen),
            ')' => self.single_char_token(Token::GroupClose),
            '|' => self.single_char_token(Token::Alternation),
            '?' => self.single_char_token(Token::Optional),
            '*' => self.single_char_token(Token::ZeroOrMore),
            '+' => self.single_char_token(Token::OneOrMore),
            '.' => self.single_char_token(Token::Wildcard),
            '^' => self.single_char_token(Token::LineStart),
            '$' => self.single_char_token(Token::LineEnd),
            '\\' => self.lex_escaping(false)?,
            '0'..='9' => self.single_char_token(Token::Digit(current_char)),
            _ => self.single_char_token(Token::Char(current_char)),
        };

        Ok(twr)
    }

    fn lex_class(&mut self) -> Result<TokenWithRange, RegexError> {
        // [^...-[...]]
        //  ^   ^^
        //  |   ||__ nested class, counted by `class_depth`
        //  |   |___ subtraction
        //  |_______ negation, only directly after `[`

        let start = self.current_position();

        let current_char = match self.peek_char(0) {
            Some(c) => *c,
            None => unreachable!("checked by lex_token"),
        };

        let class_start = self.class_start;
        let subtract_pending = self.subtract_pending;
        self.class_start = false;
        self.subtract_pending = false;

        let twr = match current_char {
            '^' if class_start => self.single_char_token(Token::Negation),
            '[' if subtract_pending => {
                self.class_depth += 1;
                self.class_start = true;
                self.single_char_token(Token::ClassOpen)
            }
            '[' => {
                return Err(RegexError::Lex(
                    "Unexpected \"[\" in char class, use \"\\[\" for the literal char, or \"-[\" for subtraction.".to_owned(),
                    Location::from_position_and_length(&start, 1),
                ));
            }
            ']' => {
                self.class_depth -= 1;
                self.single_char_token(Token::ClassClose)
            }
            '-' if self.peek_char_and_equals(1, '[') => {
                self.subtract_pending = true;
                self.single_char_token(Token::Subtract)
            }
            '\\' => self.lex_escaping(true)?,
            '0'..='9' => self.single_char_token(Token::Digit(current_char)),
            _ => self.single_char_token(Token::Char(current_char)),
        };

        Ok(twr)
    }

    fn lex_quantifier(&mut self) -> Result<TokenWithRange, RegexError> {
        // {m,n}
        //  ^^^^__ to here
        //  |_____ current char

        let start = self.current_position();

        let current_char = match self.peek_char(0) {
            Some(c) => *c,
            None => unreachable!("checked by lex_token"),
        };

        let twr = match current_char {
            '0'..='9' => {
                let number = self.lex_number()?;
                TokenWithRange::new(Token::Number(number), self.range_from(&start))
            }
            ',' => self.single_char_token(Token::Comma),
            '}' => {
                self.in_quantifier = false;
                self.single_char_token(Token::QuantifierClose)
            }
            _ => {
                return Err(RegexError::Lex(
                    format!(
                        "Invalid char '{}' in quantifier, expect a number, \",\" or \"}}\".",
                        current_char.escape_debug()
                    ),
                    Location::from_position_and_length(&start, 1),
                ));
            }
        };

        Ok(twr)
    }

    fn lex_number(&mut self) -> Result<u32, RegexError> {
        // 123456N  //
        // ^     ^__// to here
        // |________// current char, validated

        let start = self.current_position();
        let mut num_string = String::new();

        while let Some(current_char) = self.peek_char(0) {
            if current_char.is_ascii_digit() {
                num_string.push(*current_char);
                self.next_char(); // consume digit
            } else {
                break;
            }
        }

        num_string.parse::<u32>().map_err(|_| {
            RegexError::Lex(
                format!("Quantifier bound \"{}\" is too large.", num_string),
                self.range_from(&start),
            )
        })
    }

    fn lex_escaping(&mut self, in_class: bool) -> Result<TokenWithRange, RegexError> {
        // \xxxx?  //
        // ^    ^__// to here
        // |_______// current char, validated

        let start = self.current_position();

        self.next_char(); // consume '\'

        let escape_char = match self.next_char() {
            Some(c) => c,
            None => {
                return Err(RegexError::Lex(
                    "Incomplete escape sequence.".to_owned(),
                    Location::from_position_and_length(&start, 1),
                ));
            }
        };

        let token = match escape_char {
            'n' => Token::SingleEscape('\n'),
            'r' => Token::SingleEscape('\r'),
            't' => Token::SingleEscape('\t'),
            '\\' | '|' | '.' | '-' | '^' | '?' | '*' | '+' | '{' | '}' | '(' | ')' | '[' | ']'
            | '$' => Token::SingleEscape(escape_char),
            's' | 'S' | 'i' | 'I' | 'c' | 'C' | 'd' | 'D' | 'w' | 'W' => {
                Token::MultiEscape(escape_char)
            }
            'p' | 'P' => {
                let name = self.lex_category_name(&start)?;
                Token::CategoryEscape {
                    name,
                    negated: escape_char == 'P',
                }
            }
            '1'..='9' if !in_class => Token::BackReference(escape_char as u32 - '0' as u32),
            '0'..='9' if in_class => {
                return Err(RegexError::Lex(
                    "Back-references are not allowed in a char class.".to_owned(),
                    self.range_from(&start),
                ));
            }
            '0' => {
                return Err(RegexError::Lex(
                    "Cannot back-reference group 0.".to_owned(),
                    self.range_from(&start),
                ));
            }
            _ => {
                return Err(RegexError::Lex(
                    format!("Unknown escape sequence \"\\{}\".", escape_char),
                    self.range_from(&start),
                ));
            }
        };

        Ok(TokenWithRange::new(token, self.range_from(&start)))
    }

    fn lex_category_name(&mut self, start: &Location) -> Result<String, RegexError> {
        // \p{name}?  //
        //   ^     ^__// to here
        //   |________// current char

        if !self.peek_char_and_equals(0, '{') {
            return Err(RegexError::Lex(
                "Missing the brace \"{\" for category escape.".to_owned(),
                self.range_from(start),
            ));
        }

        self.next_char(); // consume '{'

        let mut name = String::new();

        loop {
            match self.next_char() {
                Some('}') => break,
                Some(c) if c.is_ascii_alphanumeric() || c == '-' => name.push(c),
                Some(c) => {
                    return Err(RegexError::Lex(
                        format!("Invalid char '{}' in category escape.", c.escape_debug()),
                        self.range_from(start),
                    ));
                }
                None => {
                    return Err(RegexError::Lex(
                        "Incomplete category escape, expect \"}\".".to_owned(),
                        self.range_from(start),
                    ));
                }
            }
        }

        if name.is_empty() {
            return Err(RegexError::Lex(
                "Empty category escape name.".to_owned(),
                self.range_from(start),
            ));
        }

        Ok(name)
    }
}
