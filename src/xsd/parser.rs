// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Grammar:
//
// regExp        ::= branch ( "|" branch )*
// branch        ::= piece*
// piece         ::= atom quantifier?
// quantifier    ::= ( "?" | "*" | "+" | "{" quantity "}" ) "?"?
// quantity      ::= number ( "," number? )?
// atom          ::= char | wildcard | "^" | "$" | charClass
//                 | "(" regExp ")" | "(?:" regExp ")" | backReference
// charClass     ::= singleEscape | multiEscape | categoryEscape | charClassExpr
// charClassExpr ::= "[" "^"? posCharGroup ( "-" charClassExpr )? "]"
// posCharGroup  ::= ( charRange | multiEscape | categoryEscape )+
// charRange     ::= classChar ( "-" classChar )?

pub const PARSER_PEEK_TOKEN_MAX_COUNT: usize = 3;

use crate::{
    ast::{
        CharClass, CharGroup, CharGroupMember, CharRange, Escape, EscapeClass, GroupKind,
        Quantifier, RegExp,
    },
    charwithposition::CharsWithPositionIter,
    error::RegexError,
    escape,
    location::Location,
    modifier::Flags,
    peekableiter::PeekableIter,
};

use super::{
    lexer::{Lexer, LEXER_PEEK_CHAR_MAX_COUNT},
    token::{Token, TokenWithRange},
};

/// The set of capturing groups whose `)` has been seen, by index.
#[derive(Debug, Default)]
struct ClosedGroups {
    words: Vec<u64>,
}

impl ClosedGroups {
    fn insert(&mut self, index: u32) {
        let (word, bit) = (index as usize / 64, index % 64);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << bit;
    }

    fn contains(&self, index: u32) -> bool {
        let (word, bit) = (index as usize / 64, index % 64);
        self.words
            .get(word)
            .is_some_and(|value| value & (1 << bit) != 0)
    }
}

/// Bookkeeping of the capturing groups of one parse.
///
/// Groups are numbered by the position of their `(`, starting at 1.
#[derive(Debug, Default)]
pub struct ParserState {
    group_count: u32,
    closed: ClosedGroups,
}

impl ParserState {
    fn open_group(&mut self) -> u32 {
        self.group_count += 1;
        self.group_count
    }

    fn close_group(&mut self, index: u32) {
        self.closed.insert(index);
    }

    pub fn group_count(&self) -> u32 {
        self.group_count
    }

    pub fn is_closed(&self, index: u32) -> bool {
        self.closed.contains(index)
    }
}

pub struct Parser<'a> {
    upstream: &'a mut PeekableIter<'a, Result<TokenWithRange, RegexError>>,
    last_range: Location,
    flags: Flags,
    state: ParserState,
}

impl<'a> Parser<'a> {
    fn new(
        upstream: &'a mut PeekableIter<'a, Result<TokenWithRange, RegexError>>,
        flags: Flags,
    ) -> Self {
        Self {
            upstream,
            last_range: Location::new_range(0, 0, 0, 0),
            flags,
            state: ParserState::default(),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, RegexError> {
        match self.upstream.next() {
            Some(Ok(TokenWithRange { token, range })) => {
                self.last_range = range;
                Ok(Some(token))
            }
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    fn peek_token(&self, offset: usize) -> Result<Option<&Token>, RegexError> {
        match self.upstream.peek(offset) {
            Some(Ok(TokenWithRange { token, .. })) => Ok(Some(token)),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(None),
        }
    }

    // the range of the next token, or the position after the
    // last consumed token when the input is exhausted.
    fn peek_range(&self) -> Location {
        match self.upstream.peek(0) {
            Some(Ok(TokenWithRange { range, .. })) => *range,
            _ => self.end_position(),
        }
    }

    fn end_position(&self) -> Location {
        if self.last_range.length == 0 && self.last_range.index == 0 {
            // nothing has been consumed yet
            self.last_range
        } else {
            self.last_range.position_after()
        }
    }

    fn consume_token(
        &mut self,
        expected_token: &Token,
        token_description: &str,
    ) -> Result<(), RegexError> {
        let range = self.peek_range();
        match self.next_token()? {
            Some(token) => {
                if &token == expected_token {
                    Ok(())
                } else {
                    Err(RegexError::Grammar(
                        format!("Unexpected {}, expect {}.", token, token_description),
                        range,
                    ))
                }
            }
            None => Err(RegexError::Grammar(
                format!("Unexpected end of pattern, expect {}.", token_description),
                range,
            )),
        }
    }

    fn unexpected(&self, expected_description: &str) -> RegexError {
        let range = self.peek_range();
        match self.upstream.peek(0) {
            Some(Ok(TokenWithRange { token, .. })) => RegexError::Grammar(
                format!("Unexpected {}, expect {}.", token, expected_description),
                range,
            ),
            _ => RegexError::Grammar(
                format!("Unexpected end of pattern, expect {}.", expected_description),
                range,
            ),
        }
    }
}

fn is_atom_start(token: &Token) -> bool {
    matches!(
        token,
        Token::Char(_)
            | Token::Digit(_)
            | Token::SingleEscape(_)
            | Token::MultiEscape(_)
            | Token::CategoryEscape { .. }
            | Token::BackReference(_)
            | Token::Wildcard
            | Token::LineStart
            | Token::LineEnd
            | Token::ClassOpen
            | Token::GroupOpen
            | Token::NonCapturingGroupOpen
    )
}

fn is_quantifier_start(token: &Token) -> bool {
    matches!(
        token,
        Token::Optional | Token::ZeroOrMore | Token::OneOrMore | Token::QuantifierOpen
    )
}

fn escape_class_of(token: &Token) -> Option<EscapeClass> {
    match token {
        Token::MultiEscape(letter) => Some(EscapeClass::Multi(*letter)),
        Token::CategoryEscape { name, negated } => Some(EscapeClass::Category {
            name: name.to_owned(),
            negated: *negated,
        }),
        _ => None,
    }
}

impl Parser<'_> {
    pub fn parse_program(&mut self) -> Result<RegExp, RegexError> {
        let regexp = self.parse_reg_exp()?;

        // the top level `regExp` stops at the first token that
        // can not continue a branch, which must be the end of input.
        if self.peek_token(0)?.is_some() {
            return Err(self.unexpected("a char, a char class, a group or \"|\""));
        }

        Ok(regexp)
    }

    fn parse_reg_exp(&mut self) -> Result<RegExp, RegexError> {
        // branch ( "|" branch )*
        // ^
        // | current

        let mut branches = vec![self.parse_branch()?];

        while let Some(Token::Alternation) = self.peek_token(0)? {
            self.next_token()?; // consume "|"
            branches.push(self.parse_branch()?);
        }

        if branches.len() == 1 {
            Ok(branches.remove(0))
        } else {
            Ok(RegExp::Disjunction(branches))
        }
    }

    fn parse_branch(&mut self) -> Result<RegExp, RegexError> {
        let mut pieces = vec![];

        while let Some(token) = self.peek_token(0)? {
            if !is_atom_start(token) {
                break;
            }
            pieces.push(self.parse_piece()?);
        }

        if pieces.len() == 1 {
            Ok(pieces.remove(0))
        } else {
            Ok(RegExp::Branch(pieces))
        }
    }

    fn parse_piece(&mut self) -> Result<RegExp, RegexError> {
        // atom quantifier?
        // ^
        // | current

        let atom = self.parse_atom()?;

        match self.peek_token(0)? {
            Some(token) if is_quantifier_start(token) => {
                let quantifier = self.parse_quantifier()?;
                Ok(RegExp::Piece(Box::new(atom), quantifier))
            }
            _ => Ok(atom),
        }
    }

    fn parse_quantifier(&mut self) -> Result<Quantifier, RegexError> {
        // ( "?" | "*" | "+" | "{" quantity "}" ) "?"?
        // ^
        // | current

        let mut quantifier = match self.next_token()? {
            Some(Token::Optional) => Quantifier::new(0, Some(1)),
            Some(Token::ZeroOrMore) => Quantifier::new(0, None),
            Some(Token::OneOrMore) => Quantifier::new(1, None),
            Some(Token::QuantifierOpen) => {
                let range_start = self.last_range;
                let quantifier = self.parse_quantity(&range_start)?;
                self.consume_token(&Token::QuantifierClose, "closing brace \"}\"")?;
                quantifier
            }
            _ => unreachable!(),
        };

        if let Some(Token::Optional) = self.peek_token(0)? {
            self.next_token()?; // consume "?"
            quantifier.lazy = true;
        }

        Ok(quantifier)
    }

    fn parse_quantity(&mut self, range_start: &Location) -> Result<Quantifier, RegexError> {
        // "{" number ( "," number? )? "}"
        //     ^
        //     | current

        let min = match self.peek_token(0)? {
            Some(Token::Number(n)) => *n,
            _ => return Err(self.unexpected("a number")),
        };
        self.next_token()?;

        if let Some(Token::Comma) = self.peek_token(0)? {
            self.next_token()?; // consume ","
        } else {
            return Ok(Quantifier::new(min, Some(min)));
        }

        let max = match self.peek_token(0)? {
            Some(Token::Number(n)) => *n,
            _ => return Ok(Quantifier::new(min, None)),
        };
        self.next_token()?;

        if min > max {
            // include the closing brace when it is there
            let range_end = match self.peek_token(0)? {
                Some(Token::QuantifierClose) => self.peek_range(),
                _ => self.last_range,
            };
            return Err(RegexError::QuantifierRange(
                format!(
                    "Illegal quantifier, lower > upper bound: {{{},{}}}.",
                    min, max
                ),
                Location::from_range_pair(range_start, &range_end),
            ));
        }

        Ok(Quantifier::new(min, Some(max)))
    }

    fn parse_atom(&mut self) -> Result<RegExp, RegexError> {
        let range = self.peek_range();
        let token = match self.next_token()? {
            Some(token) => token,
            None => {
                return Err(RegexError::Grammar(
                    "Unexpected end of pattern, expect a char, a char class or a group."
                        .to_owned(),
                    range,
                ))
            }
        };

        let atom = match token {
            Token::Char(c) | Token::Digit(c) | Token::SingleEscape(c) => RegExp::Literal(c),
            Token::Wildcard => RegExp::Wildcard {
                dot_all: self.flags.dot_all,
            },
            Token::LineStart => RegExp::LineBorder {
                is_start: true,
                multiline: self.flags.multiline,
            },
            Token::LineEnd => RegExp::LineBorder {
                is_start: false,
                multiline: self.flags.multiline,
            },
            Token::MultiEscape(letter) => {
                RegExp::Escape(self.resolve_escape(EscapeClass::Multi(letter), &range)?)
            }
            Token::CategoryEscape { name, negated } => RegExp::Escape(
                self.resolve_escape(EscapeClass::Category { name, negated }, &range)?,
            ),
            Token::ClassOpen => RegExp::CharClass(self.continue_parse_char_class_expr()?),
            Token::GroupOpen => {
                // the index is taken when the "(" is seen, so
                // an outer group gets a lower index than its inner groups.
                let index = self.state.open_group();
                let body = self.parse_reg_exp()?;
                self.consume_token(&Token::GroupClose, "closing parenthesis \")\"")?;
                self.state.close_group(index);
                RegExp::Group(Box::new(body), GroupKind::Capturing)
            }
            Token::NonCapturingGroupOpen => {
                let body = self.parse_reg_exp()?;
                self.consume_token(&Token::GroupClose, "closing parenthesis \")\"")?;
                RegExp::Group(Box::new(body), GroupKind::NonCapturing)
            }
            Token::BackReference(first_digit) => {
                self.continue_parse_back_reference(first_digit, &range)?
            }
            _ => {
                return Err(RegexError::Grammar(
                    format!(
                        "Unexpected {}, expect a char, a char class or a group.",
                        token
                    ),
                    range,
                ))
            }
        };

        Ok(atom)
    }

    fn continue_parse_back_reference(
        &mut self,
        first_digit: u32,
        range_start: &Location,
    ) -> Result<RegExp, RegexError> {
        // "\" digit digit*
        //           ^
        //           | current

        // the following digits are taken one by one as long as
        // the index still refers to an opened group, e.g. with
        // two groups `\10` is `\1` followed by the char '0'.
        let mut index = first_digit;
        while let Some(Token::Digit(c)) = self.peek_token(0)? {
            let extended = c
                .to_digit(10)
                .and_then(|d| index.checked_mul(10)?.checked_add(d));
            match extended {
                Some(value) if value <= self.state.group_count() => {
                    index = value;
                    self.next_token()?;
                }
                _ => break,
            }
        }

        if !self.state.is_closed(index) {
            return Err(RegexError::InvalidBackReference(
                format!("Illegal back-reference: \\{}.", index),
                Location::from_range_pair(range_start, &self.last_range),
            ));
        }

        Ok(RegExp::BackRef(index))
    }

    fn resolve_escape(&self, class: EscapeClass, range: &Location) -> Result<Escape, RegexError> {
        match escape::lookup(&class) {
            Some(chars) => Ok(Escape { class, chars }),
            None => Err(RegexError::UnknownEscape(
                format!("Unknown escape: {}.", class),
                *range,
            )),
        }
    }

    fn continue_parse_char_class_expr(&mut self) -> Result<CharClass, RegexError> {
        // "[" "^"? posCharGroup ( "-" charClassExpr )? "]"
        //     ^
        //     | current

        let negative = if let Some(Token::Negation) = self.peek_token(0)? {
            self.next_token()?; // consume "^"
            true
        } else {
            false
        };

        let members = self.parse_pos_char_group()?;

        let subtraction = if let Some(Token::Subtract) = self.peek_token(0)? {
            self.next_token()?; // consume "-"
            self.consume_token(&Token::ClassOpen, "opening bracket \"[\"")?;
            Some(Box::new(self.continue_parse_char_class_expr()?))
        } else {
            None
        };

        self.consume_token(&Token::ClassClose, "closing bracket \"]\"")?;

        Ok(CharClass {
            group: CharGroup { negative, members },
            subtraction,
        })
    }

    fn parse_pos_char_group(&mut self) -> Result<Vec<CharGroupMember>, RegexError> {
        let mut members = vec![];

        loop {
            let token = match self.peek_token(0)? {
                Some(token) => token,
                None => break,
            };

            if token.as_class_char().is_some() {
                members.push(self.parse_char_range()?);
            } else if let Some(class) = escape_class_of(token) {
                let range = self.peek_range();
                self.next_token()?;
                members.push(CharGroupMember::Escape(self.resolve_escape(class, &range)?));
            } else {
                break;
            }
        }

        if members.is_empty() {
            return Err(self.unexpected("a char, a char range or an escape"));
        }

        Ok(members)
    }

    fn parse_char_range(&mut self) -> Result<CharGroupMember, RegexError> {
        // classChar ( "-" classChar )?
        // ^
        // | current

        // `-` followed by `]` (or by a subtraction) is a literal dash,
        // e.g. `[a-]` matches 'a' and '-'. XML Schema Part 2, appendix F:
        // "The - character is a valid character range only at the
        // beginning or end of a positive character group".
        let is_range = matches!(self.peek_token(1)?, Some(Token::Char('-')))
            && !matches!(
                self.peek_token(2)?,
                None | Some(Token::ClassClose) | Some(Token::Subtract)
            );

        let range_start = self.peek_range();
        let start = self.next_class_char()?;

        if !is_range {
            return Ok(CharGroupMember::Char(start));
        }

        self.next_token()?; // consume "-"
        let end_included = self.next_class_char()?;

        if start > end_included {
            return Err(RegexError::CharRange(
                format!(
                    "Illegal range, lower > upper bound: '{}'-'{}'.",
                    start.escape_debug(),
                    end_included.escape_debug()
                ),
                Location::from_range_pair(&range_start, &self.last_range),
            ));
        }

        Ok(CharGroupMember::CharRange(CharRange {
            start,
            end_included,
        }))
    }

    fn next_class_char(&mut self) -> Result<char, RegexError> {
        match self.peek_token(0)?.and_then(Token::as_class_char) {
            Some(c) => {
                self.next_token()?;
                Ok(c)
            }
            None => Err(self.unexpected("a char or an escaped char")),
        }
    }
}

pub fn parse_from_str(s: &str, flags: &Flags) -> Result<RegExp, RegexError> {
    let mut chars = s.chars();
    let mut char_position_iter = CharsWithPositionIter::new(&mut chars);
    let mut peekable_char_position_iter =
        PeekableIter::new(&mut char_position_iter, LEXER_PEEK_CHAR_MAX_COUNT);
    let mut lexer = Lexer::new(&mut peekable_char_position_iter, flags);
    let mut peekable_token_iter = PeekableIter::new(&mut lexer, PARSER_PEEK_TOKEN_MAX_COUNT);
    let mut parser = Parser::new(&mut peekable_token_iter, *flags);
    parser.parse_program()
}
