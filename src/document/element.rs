//! The unified element node type.

use crate::document::image::Image;
use crate::document::paragraph::{Paragraph, Run};
use crate::document::table::Table;

/// A node in the document tree.
///
/// Bodies and table cells hold ordered sequences of elements. Runs and
/// images are inline content; when one appears at block position the
/// serialization driver wraps it in an implicit paragraph.
#[derive(Debug, Clone)]
pub enum Element {
    Paragraph(Paragraph),
    Table(Table),
    Run(Run),
    Image(Image),
}

impl From<Paragraph> for Element {
    fn from(p: Paragraph) -> Self {
        Element::Paragraph(p)
    }
}

impl From<Table> for Element {
    fn from(t: Table) -> Self {
        Element::Table(t)
    }
}

impl From<Run> for Element {
    fn from(r: Run) -> Self {
        Element::Run(r)
    }
}

impl From<Image> for Element {
    fn from(i: Image) -> Self {
        Element::Image(i)
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Element::Paragraph(Paragraph::with_text(text))
    }
}
