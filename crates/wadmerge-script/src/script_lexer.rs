//! Tokenizer for WadMerge scripts.
//!
//! The lexer is driven by the line parser: it hands out one token at a time
//! from a cursor, and the caller says which kind of token it expects next
//! (a keyword, a symbol, a trailer, ...). Newlines are never skipped
//! implicitly; [`Lexer::end_line`] consumes them.

use wadmerge_types::{Keyword, Position, Symbol};
use winnow::ascii::Caseless;
use winnow::combinator::alt;
use winnow::token::{literal, none_of, take_till, take_while};
use winnow::{ModalResult, Parser};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("line {}, col {}: unterminated string literal", .at.line, .at.col)]
    UnterminatedString { at: Position },
}

/// Characters skipped between tokens. Newlines are not among them.
pub fn is_extra(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'..='\u{1F}'
            | '\u{2000}'..='\u{2006}'
            | '\u{2008}'..='\u{200A}'
            | '\u{85}'
            | '\u{1680}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

pub fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Separators allowed directly after `ECHO`.
fn is_echo_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{0B}' | '\u{1C}'..='\u{1F}')
}

fn is_token_char(c: char) -> bool {
    !is_extra(c) && !is_newline(c)
}

/// Whether `c` may follow a keyword without gluing onto it.
fn ends_word(c: char) -> bool {
    !is_token_char(c) || c == '"'
}

fn extras<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(0.., is_extra).parse_next(input)
}

fn newline<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    alt(("\r\n", "\n", "\r")).parse_next(input)
}

fn rest_of_line<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_till(0.., ['\r', '\n']).parse_next(input)
}

fn caseless<'s>(input: &mut &'s str, word: &'static str) -> ModalResult<&'s str> {
    literal(Caseless(word)).parse_next(input)
}

fn bare<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| is_token_char(c) && c != '"').parse_next(input)
}

fn trailer<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., is_token_char).parse_next(input)
}

fn quote(input: &mut &str) -> ModalResult<char> {
    '"'.parse_next(input)
}

fn line_char(input: &mut &str) -> ModalResult<char> {
    none_of(['\r', '\n']).parse_next(input)
}

/// `"..."` with backslash escapes. The escaped character is kept as is.
fn quoted(input: &mut &str) -> ModalResult<String> {
    quote(input)?;
    let mut text = String::new();
    loop {
        match line_char(input)? {
            '"' => return Ok(text),
            '\\' => text.push(line_char(input)?),
            c => text.push(c),
        }
    }
}

pub struct Lexer<'s> {
    src: &'s str,
    rest: &'s str,
    line: usize,
    line_start: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            rest: src,
            line: 1,
            line_start: 0,
        }
    }

    fn offset(&self) -> usize {
        self.src.len() - self.rest.len()
    }

    /// Position of the cursor.
    pub fn position(&self) -> Position {
        let offset = self.offset();
        Position {
            line: self.line,
            col: self.src[self.line_start..offset].chars().count() + 1,
            offset,
        }
    }

    /// Position of the first character of the current line.
    pub fn line_position(&self) -> Position {
        Position {
            line: self.line,
            col: 1,
            offset: self.line_start,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    pub fn skip_extras(&mut self) {
        // Zero or more; cannot fail.
        let _ = extras(&mut self.rest);
    }

    /// Skips extras and reports whether only a newline or end of input
    /// remains on this line.
    pub fn at_line_end(&mut self) -> bool {
        self.skip_extras();
        self.peek().is_none_or(is_newline)
    }

    /// Consumes trailing extras and one line break. Returns `false`, without
    /// consuming the break, if anything else is left on the line.
    pub fn end_line(&mut self) -> bool {
        if !self.at_line_end() {
            return false;
        }
        if newline(&mut self.rest).is_ok() {
            self.line += 1;
            self.line_start = self.offset();
        }
        true
    }

    /// Matches `kw` in any letter case, as a whole word.
    pub fn eat_keyword(&mut self, kw: Keyword) -> bool {
        let mut probe = self.rest;
        if caseless(&mut probe, kw.spelling()).is_err() {
            return false;
        }
        if !probe.chars().next().is_none_or(ends_word) {
            return false;
        }
        self.rest = probe;
        true
    }

    /// Matches `ECHO` together with the one separator that must follow it
    /// unless the line ends right there.
    pub fn eat_echo(&mut self) -> bool {
        let mut probe = self.rest;
        if caseless(&mut probe, Keyword::Echo.spelling()).is_err() {
            return false;
        }
        match probe.chars().next() {
            None => {}
            Some(c) if is_newline(c) => {}
            Some(c) if is_echo_separator(c) => probe = &probe[c.len_utf8()..],
            Some(_) => return false,
        }
        self.rest = probe;
        true
    }

    /// Matches the line-opening command keyword `kw`.
    pub fn eat_command(&mut self, kw: Keyword) -> bool {
        match kw {
            Keyword::Echo => self.eat_echo(),
            _ => self.eat_keyword(kw),
        }
    }

    /// Text after a leading `#`, up to the end of the line.
    pub fn comment(&mut self) -> Option<&'s str> {
        let text = self.rest.strip_prefix('#')?;
        self.rest = text;
        Some(self.line_text())
    }

    /// Everything from the cursor to the end of the line, verbatim.
    pub fn line_text(&mut self) -> &'s str {
        rest_of_line(&mut self.rest).unwrap_or_default()
    }

    /// Echo text: leading extras dropped, the rest kept verbatim.
    pub fn echo_text(&mut self) -> &'s str {
        self.skip_extras();
        self.line_text()
    }

    /// A bare or quoted symbol, `None` at the end of the line.
    pub fn symbol(&mut self) -> Result<Option<Symbol>, LexError> {
        self.skip_extras();
        if self.peek() == Some('"') {
            return self.string_literal().map(|s| Some(Symbol::StringLiteral(s)));
        }
        Ok(bare(&mut self.rest)
            .ok()
            .map(|s| Symbol::Bare(s.to_owned())))
    }

    fn string_literal(&mut self) -> Result<String, LexError> {
        let at = self.position();
        let mut probe = self.rest;
        let text = quoted(&mut probe).map_err(|_| LexError::UnterminatedString { at })?;
        self.rest = probe;
        Ok(text)
    }

    /// The next opaque run of non-whitespace, `None` at the end of the line.
    pub fn trailer(&mut self) -> Option<&'s str> {
        self.skip_extras();
        trailer(&mut self.rest).ok()
    }
}
