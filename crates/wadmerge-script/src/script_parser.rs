//! Line parser for WadMerge scripts.
//!
//! A script is flat: one command per physical line, no blocks, no
//! continuations. Each line is classified by its first token:
//!
//! ```text
//! line    = '#' text
//!         | CLEAR  symbol trailer*
//!         | CREATE symbol [IWAD] trailer*
//!         | ECHO   [sep text]
//!         | END    trailer*
//!         | (blank)
//! symbol  = '"' (char | '\' char)* '"' | bare
//! ```
//!
//! Trailers after `CLEAR` are accepted and dropped.

use std::time::Instant;

use log::{debug, trace, warn};
use wadmerge_types::{Document, Keyword, Line, Located, Position, Symbol, Trailer};

use crate::options::ParseOptions;
use crate::script_lexer::{LexError, Lexer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {}, col {}: {kind}", .pos.line, .pos.col)]
pub struct ParseError {
    pub pos: Position,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unrecognized line")]
    UnrecognizedLine,
    #[error("missing symbol for {}", .0.name())]
    MissingSymbol(Keyword),
    #[error("parse time limit exceeded")]
    TimedOut,
}

impl ParseError {
    fn new(kind: ParseErrorKind, pos: Position) -> Self {
        Self { pos, kind }
    }

    pub fn line(&self) -> usize {
        self.pos.line
    }

    pub fn col(&self) -> usize {
        self.pos.col
    }

    pub fn offset(&self) -> usize {
        self.pos.offset
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::UnterminatedString { at } => {
                Self::new(ParseErrorKind::UnterminatedString, at)
            }
        }
    }
}

/// Parse a WadMerge script with default options.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse a WadMerge script.
///
/// The first malformed line fails the whole parse; there are no partial
/// results.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let doc = ScriptParser::new(source, options).document()?;
    debug!("parsed {} script lines", doc.len());
    Ok(doc)
}

struct ScriptParser<'s, 'o> {
    lexer: Lexer<'s>,
    options: &'o ParseOptions,
}

impl<'s, 'o> ScriptParser<'s, 'o> {
    fn new(source: &'s str, options: &'o ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(source),
            options,
        }
    }

    fn document(mut self) -> Result<Document, ParseError> {
        let deadline = self.options.deadline(Instant::now());
        let mut lines = Vec::new();

        while !self.lexer.at_eof() {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                let pos = self.lexer.line_position();
                warn!("script parse abandoned at line {}: time limit", pos.line);
                return Err(ParseError::new(ParseErrorKind::TimedOut, pos));
            }
            if let Some(line) = self.line()? {
                trace!("line {}: {:?}", line.pos.line, line.value);
                if self.options.keep_comments || !matches!(line.value, Line::Comment { .. }) {
                    lines.push(line);
                }
            }
        }

        Ok(Document::new(lines))
    }

    /// One physical line, including its line break.
    fn line(&mut self) -> Result<Option<Located<Line>>, ParseError> {
        let line_pos = self.lexer.line_position();
        self.lexer.skip_extras();
        let pos = self.lexer.position();

        let line = if let Some(text) = self.lexer.comment() {
            Some(Line::Comment {
                text: text.to_owned(),
            })
        } else if let Some(kw) = Keyword::COMMANDS
            .into_iter()
            .find(|&kw| self.lexer.eat_command(kw))
        {
            Some(self.command(kw, line_pos)?)
        } else if self.lexer.at_line_end() {
            None
        } else {
            return Err(ParseError::new(ParseErrorKind::UnrecognizedLine, line_pos));
        };

        if !self.lexer.end_line() {
            return Err(ParseError::new(ParseErrorKind::UnrecognizedLine, line_pos));
        }
        Ok(line.map(|value| Located::new(value, pos)))
    }

    fn command(&mut self, kw: Keyword, line_pos: Position) -> Result<Line, ParseError> {
        match kw {
            Keyword::Clear => {
                let symbol = self.symbol(kw, line_pos)?;
                let dropped = self.trailers();
                if !dropped.is_empty() {
                    debug!(
                        "line {}: ignoring {} token(s) after CLEAR {symbol}",
                        line_pos.line,
                        dropped.len()
                    );
                }
                Ok(Line::Clear { symbol })
            }
            Keyword::Create => {
                let symbol = self.symbol(kw, line_pos)?;
                self.lexer.skip_extras();
                let is_iwad = self.lexer.eat_keyword(Keyword::Iwad);
                Ok(Line::Create {
                    symbol,
                    is_iwad,
                    trailers: self.trailers(),
                })
            }
            Keyword::Echo => Ok(Line::Echo {
                text: self.lexer.echo_text().to_owned(),
            }),
            Keyword::End => Ok(Line::End {
                trailers: self.trailers(),
            }),
            Keyword::Iwad => Err(ParseError::new(ParseErrorKind::UnrecognizedLine, line_pos)),
        }
    }

    fn symbol(&mut self, kw: Keyword, line_pos: Position) -> Result<Symbol, ParseError> {
        self.lexer
            .symbol()?
            .ok_or_else(|| ParseError::new(ParseErrorKind::MissingSymbol(kw), line_pos))
    }

    fn trailers(&mut self) -> Vec<Trailer> {
        std::iter::from_fn(|| self.lexer.trailer())
            .map(Trailer::from)
            .collect()
    }
}
