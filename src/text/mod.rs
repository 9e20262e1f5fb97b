//! Text-record ingestion: schema tables, tokenizer, identifier parser and
//! the record decoder.

pub mod decoder;
pub mod identifiers;
pub mod schema;
pub mod tokenizer;

pub use decoder::decode_record;
pub use identifiers::{parse_designator, parse_identifiers, Designator};
pub use schema::{Field, FieldLayout, TextSchema, TextSchemaId};
pub use tokenizer::tokenize;
