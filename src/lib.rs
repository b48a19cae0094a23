//! Longan - a Rust library for building Word documents programmatically
//!
//! This library provides a document object model for rich-text documents
//! (paragraphs, tables, images) and serializes it into WordprocessingML,
//! the XML vocabulary inside modern Word (.docx) packages. The heart of
//! the crate is the property formatting subsystem: per-element alias
//! tables, value-kind coercion, unit conversion, and structural
//! validation, producing schema-conformant markup from friendly property
//! names.
//!
//! # Features
//!
//! - **Chainable builders**: Paragraphs, runs, tables and images build up
//!   an in-memory tree without intermediate variables
//! - **Property formatting**: Friendly names (`align`, `border`,
//!   `indent`) resolve to canonical schema names with validated,
//!   unit-converted values
//! - **Structural validation**: Table builder calls are checked against
//!   the cursor mode at the call site
//! - **Markup tree output**: Serialization produces an inspectable tree,
//!   rendered to text on demand
//!
//! # Example - Paragraphs
//!
//! ```
//! use longan::{Document, Paragraph, Run};
//!
//! let mut doc = Document::new();
//! doc.add(
//!     Paragraph::new()
//!         .prop("align", "center")
//!         .prop("spacing", 1.5)
//!         .text("The quick brown fox ")
//!         .run(Run::new("jumps").prop("bold", true).prop("color", "C00000")),
//! );
//!
//! let xml = longan::writer::to_xml_string(&doc)?;
//! assert!(xml.contains("<w:jc w:val=\"center\"/>"));
//! # Ok::<(), longan::Error>(())
//! ```
//!
//! # Example - Tables
//!
//! ```
//! use longan::{Document, Table};
//!
//! let table = Table::create()
//!     .prop("border", 1)?
//!     .grid()
//!     .col(2.0)?
//!     .col(4.0)?
//!     .row()
//!     .cell_text("name")
//!     .cell_text("value")
//!     .row()
//!     .cell_text("answer")
//!     .cell_text("42");
//!
//! let mut doc = Document::new();
//! doc.add(table);
//! let markup = longan::writer::serialize(&doc)?;
//! # let _ = markup;
//! # Ok::<(), longan::Error>(())
//! ```

/// Shared infrastructure: errors, unit conversion, and the markup tree.
pub mod common;

/// The in-memory document model and its builders.
pub mod document;

/// Property formatting: registries, coercers, and element formatters.
pub mod formatter;

/// The serialization driver.
pub mod writer;

// Re-export commonly used types for convenience
pub use common::error::{Error, Result};
pub use common::xml::XmlNode;
pub use document::{Document, Element, Image, Paragraph, Properties, Run, Table, Value};
pub use formatter::{ElementKind, ValueKind};
