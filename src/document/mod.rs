//! The in-memory document model.
//!
//! A [`Document`] owns an ordered body of block elements (paragraphs and
//! tables), each carrying a property bag describing its formatting intent.
//! The tree is built incrementally through the element builders and is
//! never mutated by serialization.
//!
//! # Example
//!
//! ```
//! use longan::{Document, Paragraph, Table};
//!
//! let mut doc = Document::new();
//! doc.add(Paragraph::with_text("Hello").prop("align", "center"));
//! doc.add(
//!     Table::create()
//!         .row()
//!         .cell_text("one")
//!         .row()
//!         .cell_text("two"),
//! );
//! let markup = longan::writer::serialize(&doc)?;
//! # let _ = markup;
//! # Ok::<(), longan::Error>(())
//! ```

pub mod element;
pub mod image;
pub mod paragraph;
pub mod properties;
pub mod table;

pub use element::Element;
pub use image::{Image, ImageMetadata};
pub use paragraph::{Inline, Paragraph, Run};
pub use properties::{Properties, Value};
pub use table::{Cell, Row, Table};

/// A document: an ordered body of elements.
#[derive(Debug, Clone, Default)]
pub struct Document {
    body: Vec<Element>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to the body.
    pub fn add(&mut self, element: impl Into<Element>) -> &mut Self {
        self.body.push(element.into());
        self
    }

    /// The body elements, in order.
    pub fn body(&self) -> &[Element] {
        &self.body
    }

    /// Number of body elements.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
