//! Tabular input: in-memory table abstraction and delimited-file parsing.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
