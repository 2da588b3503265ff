pub mod keyword;
pub mod located;
pub mod script;

pub use keyword::Keyword;
pub use located::{Located, Position};
pub use script::{Document, Line, Symbol, Trailer};
