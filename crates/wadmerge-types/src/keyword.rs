use std::fmt;

use serde::Serialize;
use strum::{EnumCount, EnumIter};

/// Reserved words of a WadMerge script.
///
/// Scripts may spell them in any mix of letter cases; the canonical
/// spelling is upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount)]
pub enum Keyword {
    Clear,
    Create,
    Iwad,
    Echo,
    End,
}

impl Keyword {
    /// Keywords that may open a line, in the order they are tried.
    pub const COMMANDS: [Keyword; 4] = [
        Keyword::Clear,
        Keyword::Create,
        Keyword::Echo,
        Keyword::End,
    ];

    /// Canonical upper-case spelling.
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Create => "CREATE",
            Self::Iwad => "IWAD",
            Self::Echo => "ECHO",
            Self::End => "END",
        }
    }

    /// Lower-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Create => "create",
            Self::Iwad => "iwad",
            Self::Echo => "echo",
            Self::End => "end",
        }
    }

    /// Whether `word` spells this keyword, ignoring ASCII case.
    pub fn matches(self, word: &str) -> bool {
        word.eq_ignore_ascii_case(self.spelling())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}
