use std::fmt;

use serde::Serialize;

use crate::keyword::Keyword;
use crate::located::Located;

/// Parsed WadMerge script: its lines in source order.
///
/// Blank lines leave no record. Comment lines are kept unless the parser
/// was told to drop them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    lines: Vec<Located<Line>>,
}

impl Document {
    pub fn new(lines: Vec<Located<Line>>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Located<Line>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines the build engine acts on, skipping comments.
    pub fn commands(&self) -> impl Iterator<Item = &Located<Line>> {
        self.lines.iter().filter(|l| l.value.keyword().is_some())
    }

    pub fn into_lines(self) -> Vec<Located<Line>> {
        self.lines
    }
}

impl IntoIterator for Document {
    type Item = Located<Line>;
    type IntoIter = std::vec::IntoIter<Located<Line>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Located<Line>;
    type IntoIter = std::slice::Iter<'a, Located<Line>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// One non-blank script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Line {
    /// `CLEAR symbol`
    Clear { symbol: Symbol },
    /// `CREATE symbol [IWAD] trailer*`
    Create {
        symbol: Symbol,
        is_iwad: bool,
        trailers: Vec<Trailer>,
    },
    /// `ECHO text`; the text runs to the end of the line, verbatim.
    Echo { text: String },
    /// `END trailer*`
    End { trailers: Vec<Trailer> },
    /// `# text`; `text` is everything after the marker.
    Comment { text: String },
}

impl Line {
    /// The command keyword opening this line, `None` for comments.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Self::Clear { .. } => Some(Keyword::Clear),
            Self::Create { .. } => Some(Keyword::Create),
            Self::Echo { .. } => Some(Keyword::Echo),
            Self::End { .. } => Some(Keyword::End),
            Self::Comment { .. } => None,
        }
    }

    /// Target named by `CLEAR` or `CREATE`.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Clear { symbol } | Self::Create { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    pub fn trailers(&self) -> &[Trailer] {
        match self {
            Self::Create { trailers, .. } | Self::End { trailers } => trailers,
            _ => &[],
        }
    }
}

/// Name of a build target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Symbol {
    /// Quoted form, escapes already resolved.
    StringLiteral(String),
    /// Unquoted run of characters; never holds whitespace or `"`.
    Bare(String),
}

impl Symbol {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StringLiteral(s) | Self::Bare(s) => s,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Argument handed to the build engine uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Trailer(pub String);

impl Trailer {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Trailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Trailer {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
