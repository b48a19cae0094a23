//! Serialization of documents into WordprocessingML markup.

mod doc;

pub use doc::serialize;

use crate::common::error::Result;
use crate::document::Document;

/// Serialize a document and render the markup tree to XML text.
pub fn to_xml_string(document: &Document) -> Result<String> {
    Ok(serialize(document)?.to_xml_string())
}
