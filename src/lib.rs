//! Deep-sky object catalog core: text ingestion, binary codec and
//! classification.
//!
//! Builds an in-memory table of deep-sky entries from line-oriented text
//! catalogs (two historical schemas) or from a fixed-layout binary catalog,
//! then derives the quantities a renderer ranks and labels objects with:
//! selection priority, field of view on approach, printable type and
//! display color. Rendering itself, name translation and coordinate
//! transforms live in collaborating components; this crate only produces
//! the data they consume.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`nebula`] | [`Nebula`] object, [`NebulaData`] builder, derived quantities |
//! | [`types`] | [`NebulaType`] closed taxonomy, wire codes, type-code tables |
//! | [`text`] | schema tables, tokenizer, identifier parser, record decoder |
//! | [`binary`] | baseline/extended binary catalog codec |
//! | [`catalog`] | batch loaders, published lookup table, name translation |
//! | [`config`] | display configuration and the painter boundary |
//! | [`error`] | [`CatalogError`] taxonomy |
//!
//! # Quick Start
//!
//! ```ignore
//! use nebula_catalog::{load_text, MalformedPolicy, NebulaCatalog};
//! use nebula_catalog::text::TextSchemaId;
//!
//! let schema = TextSchemaId::Extended.schema();
//! let (objects, report) = load_text(reader, schema, MalformedPolicy::Skip)?;
//! let catalog = NebulaCatalog::publish(objects);
//!
//! let m31 = catalog.find_by_name("M 31").unwrap();
//! println!("{}: {}", m31.english_name(), m31.type_label());
//! ```
//!
//! # Binary Format
//!
//! A binary catalog file is a 32-byte header (magic, format version, shape
//! selector, record count) followed by fixed-width little-endian records —
//! 160 bytes in the baseline shape, 192 in the extended shape, which adds
//! constellation, Hubble type, redshift and distances. See [`binary`].

pub mod binary;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod nebula;
pub mod text;
pub mod types;

pub use catalog::{
    load_text, translate_names, MalformedPolicy, NameTranslator, NebulaCatalog, TextLoadReport,
};
pub use config::{DisplayConfig, DisplayQuantities, HintPainter, Rgb};
pub use error::{CatalogError, Result};
pub use nebula::{Nebula, NebulaData};
pub use text::identifiers::Designator;
pub use types::{ColorCategory, NebulaType};
