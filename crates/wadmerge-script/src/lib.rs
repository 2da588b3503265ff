//! Lexer and line parser for WadMerge scripts.
//!
//! Turns script text into a [`Document`](wadmerge_types::Document) for the
//! archive builder to execute. Nothing here interprets trailers or touches
//! the file system.

pub mod options;
pub mod script_lexer;
pub mod script_parser;

pub use options::{OptionsError, ParseOptions};
pub use script_parser::{ParseError, ParseErrorKind, parse, parse_with};
