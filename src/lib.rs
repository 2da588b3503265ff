//! WadMerge script front end.
//!
//! ```
//! let doc = wadmerge::parse("CREATE out.wad IWAD\nEND\n").unwrap();
//! assert_eq!(doc.len(), 2);
//! ```

pub use wadmerge_script::{OptionsError, ParseError, ParseErrorKind, ParseOptions, parse, parse_with};
pub use wadmerge_types::{Document, Keyword, Line, Located, Position, Symbol, Trailer};
