//! Markup handling for published rate tables.

mod table;
mod tokenizer;

pub use table::{TableExtractor, extract_table_rows, normalize_cell_text};
pub use tokenizer::{Token, Tokenizer, decode_entities};
