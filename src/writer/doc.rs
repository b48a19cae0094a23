//! Serialization driver: walks the document tree and assembles the
//! `w:document` markup tree.
//!
//! The driver never mutates the input tree and aborts on the first
//! invalid property; a failed pass yields no output document. Inline
//! images get a document-order relationship placeholder (`{{IMAGE_n}}`)
//! that the packaging layer replaces once relationship ids are assigned.

use crate::common::error::{Error, Result};
use crate::common::unit::{inches_to_emu, inches_to_twips, px_to_emu};
use crate::common::xml::XmlNode;
use crate::document::image::Image;
use crate::document::paragraph::{Inline, Paragraph, Run};
use crate::document::table::Table;
use crate::document::{Document, Element};
use crate::formatter::{self, ElementKind};

const WORDPROCESSINGML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const WP_DRAWING_NS: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const DRAWINGML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const PICTURE_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Serialize a document into its `w:document` markup tree.
///
/// # Examples
///
/// ```
/// use longan::{Document, Paragraph};
///
/// let mut doc = Document::new();
/// doc.add(Paragraph::with_text("Hello").prop("align", "center"));
/// let markup = longan::writer::serialize(&doc)?;
/// assert_eq!(markup.name(), "w:document");
/// # Ok::<(), longan::Error>(())
/// ```
pub fn serialize(document: &Document) -> Result<XmlNode> {
    let mut root = XmlNode::new("w:document")
        .with_attr("xmlns:w", WORDPROCESSINGML_NS)
        .with_attr("xmlns:r", RELATIONSHIPS_NS)
        .with_attr("xmlns:wp", WP_DRAWING_NS)
        .with_attr("xmlns:a", DRAWINGML_NS);
    let mut body = XmlNode::new("w:body");
    let mut images = 0usize;
    for element in document.body() {
        body.append(write_block(element, &mut images)?);
    }
    root.append(body);
    Ok(root)
}

/// Write a block-level element. Loose runs and images are wrapped in an
/// implicit paragraph, since the body and cells only take blocks.
fn write_block(element: &Element, images: &mut usize) -> Result<XmlNode> {
    match element {
        Element::Paragraph(p) => write_paragraph(p, images),
        Element::Table(t) => write_table(t, images),
        Element::Run(r) => {
            let mut p = XmlNode::new("w:p");
            p.append(write_run(r)?);
            Ok(p)
        },
        Element::Image(i) => {
            let mut p = XmlNode::new("w:p");
            p.append(write_image_run(i, images)?);
            Ok(p)
        },
    }
}

fn write_paragraph(paragraph: &Paragraph, images: &mut usize) -> Result<XmlNode> {
    let mut node = XmlNode::new("w:p");
    formatter::format_properties(ElementKind::Paragraph, paragraph.properties(), &mut node)?;
    for inline in paragraph.inlines() {
        match inline {
            Inline::Run(run) => node.append(write_run(run)?),
            Inline::Image(image) => node.append(write_image_run(image, images)?),
        }
    }
    Ok(node)
}

fn write_run(run: &Run) -> Result<XmlNode> {
    let mut node = XmlNode::new("w:r");
    formatter::format_properties(ElementKind::Run, run.properties(), &mut node)?;
    let mut text = XmlNode::new("w:t");
    let content = run.text();
    if content.starts_with(|c: char| c.is_whitespace())
        || content.ends_with(|c: char| c.is_whitespace())
    {
        text.set_attr("xml:space", "preserve");
    }
    text.append_text(content);
    node.append(text);
    Ok(node)
}

fn write_table(table: &Table, images: &mut usize) -> Result<XmlNode> {
    let mut node = XmlNode::new("w:tbl");
    formatter::format_properties(ElementKind::Table, table.properties(), &mut node)?;

    if !table.grid_cols().is_empty() {
        let mut grid = XmlNode::new("w:tblGrid");
        for width in table.grid_cols() {
            grid.append(
                XmlNode::new("w:gridCol").with_attr("w:w", formatter::num(inches_to_twips(*width)?)),
            );
        }
        node.append(grid);
    }

    for row in table.rows() {
        let mut tr = XmlNode::new("w:tr");
        formatter::format_properties(ElementKind::TableRow, row.properties(), &mut tr)?;
        for cell in row.cells() {
            let mut tc = XmlNode::new("w:tc");
            formatter::format_properties(ElementKind::TableCell, cell.properties(), &mut tc)?;
            let mut blocks = 0usize;
            for element in cell.elements() {
                tc.append(write_block(element, images)?);
                blocks += 1;
            }
            // The schema requires at least one block in a cell
            if blocks == 0 {
                tc.append(XmlNode::new("w:p"));
            }
            tr.append(tc);
        }
        node.append(tr);
    }
    Ok(node)
}

fn write_image_run(image: &Image, images: &mut usize) -> Result<XmlNode> {
    let index = *images;
    *images += 1;
    let mut run = XmlNode::new("w:r");
    run.append(write_drawing(image, index)?);
    Ok(run)
}

fn write_drawing(image: &Image, index: usize) -> Result<XmlNode> {
    let cx = extent(image, "width", |i| i.width())?;
    let cy = extent(image, "height", |i| i.height())?;
    let (cx, cy) = (formatter::num(cx), formatter::num(cy));
    let rel_id = format!("{{{{IMAGE_{}}}}}", index);
    let name = format!("Picture {}", index + 1);
    let descr = image
        .properties()
        .get("alt")
        .and_then(|v| v.scalar_string())
        .unwrap_or_default();

    let mut inline = XmlNode::new("wp:inline")
        .with_attr("distT", "0")
        .with_attr("distB", "0")
        .with_attr("distL", "0")
        .with_attr("distR", "0");
    inline.append(
        XmlNode::new("wp:extent")
            .with_attr("cx", cx.clone())
            .with_attr("cy", cy.clone()),
    );
    inline.append(
        XmlNode::new("wp:effectExtent")
            .with_attr("l", "0")
            .with_attr("t", "0")
            .with_attr("r", "0")
            .with_attr("b", "0"),
    );
    inline.append(
        XmlNode::new("wp:docPr")
            .with_attr("id", formatter::num(index as i64 + 1))
            .with_attr("name", name.clone())
            .with_attr("descr", descr.clone()),
    );
    let mut frame_pr = XmlNode::new("wp:cNvGraphicFramePr");
    frame_pr.append(XmlNode::new("a:graphicFrameLocks").with_attr("noChangeAspect", "1"));
    inline.append(frame_pr);

    let mut pic = XmlNode::new("pic:pic").with_attr("xmlns:pic", PICTURE_NS);
    let mut nv_pic_pr = XmlNode::new("pic:nvPicPr");
    nv_pic_pr.append(
        XmlNode::new("pic:cNvPr")
            .with_attr("id", "0")
            .with_attr("name", name)
            .with_attr("descr", descr),
    );
    nv_pic_pr.append(XmlNode::new("pic:cNvPicPr"));
    pic.append(nv_pic_pr);

    let mut blip_fill = XmlNode::new("pic:blipFill");
    blip_fill.append(XmlNode::new("a:blip").with_attr("r:embed", rel_id));
    let mut stretch = XmlNode::new("a:stretch");
    stretch.append(XmlNode::new("a:fillRect"));
    blip_fill.append(stretch);
    pic.append(blip_fill);

    let mut sp_pr = XmlNode::new("pic:spPr");
    let mut xfrm = XmlNode::new("a:xfrm");
    xfrm.append(XmlNode::new("a:off").with_attr("x", "0").with_attr("y", "0"));
    xfrm.append(XmlNode::new("a:ext").with_attr("cx", cx).with_attr("cy", cy));
    sp_pr.append(xfrm);
    let mut geom = XmlNode::new("a:prstGeom").with_attr("prst", "rect");
    geom.append(XmlNode::new("a:avLst"));
    sp_pr.append(geom);
    pic.append(sp_pr);

    let mut graphic_data = XmlNode::new("a:graphicData").with_attr("uri", PICTURE_NS);
    graphic_data.append(pic);
    let mut graphic = XmlNode::new("a:graphic");
    graphic.append(graphic_data);
    inline.append(graphic);

    let mut drawing = XmlNode::new("w:drawing");
    drawing.append(inline);
    Ok(drawing)
}

/// Drawing extent in EMUs: an explicit property (inches) wins, otherwise
/// the probed pixel dimension at 96 DPI.
fn extent(image: &Image, property: &str, probed: fn(&Image) -> Result<u32>) -> Result<i64> {
    match image.properties().get(property) {
        Some(value) => {
            let inches = value.as_f64().ok_or_else(|| Error::InvalidPropertyValue {
                element: "image",
                property: property.to_string(),
                message: format!("expects a size in inches, got {:?}", value),
            })?;
            inches_to_emu(inches)
        },
        None => Ok(px_to_emu(probed(image)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::properties::Properties;

    #[test]
    fn test_serialize_minimal_document() {
        let mut doc = Document::new();
        doc.add(Paragraph::with_text("Hello"));
        let markup = serialize(&doc).unwrap();
        assert_eq!(markup.name(), "w:document");
        assert!(markup.attr("xmlns:w").unwrap().contains("wordprocessingml"));
        let body = markup.child("w:body").unwrap();
        let p = body.child("w:p").unwrap();
        let t = p.child("w:r").unwrap().child("w:t").unwrap();
        assert_eq!(t.text(), "Hello");
        assert_eq!(t.attr("xml:space"), None);
    }

    #[test]
    fn test_run_whitespace_preserved() {
        let mut doc = Document::new();
        doc.add(Paragraph::new().text("trailing "));
        let markup = serialize(&doc).unwrap();
        let t = markup
            .child("w:body")
            .unwrap()
            .child("w:p")
            .unwrap()
            .child("w:r")
            .unwrap()
            .child("w:t")
            .unwrap();
        assert_eq!(t.attr("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_paragraph_properties_come_first() {
        let mut doc = Document::new();
        doc.add(Paragraph::with_text("x").prop("align", "center"));
        let markup = serialize(&doc).unwrap();
        let p = markup.child("w:body").unwrap().child("w:p").unwrap();
        let children: Vec<_> = p.children().map(|c| c.name().to_string()).collect();
        assert_eq!(children, vec!["w:pPr", "w:r"]);
    }

    #[test]
    fn test_loose_run_wrapped_in_paragraph() {
        let mut doc = Document::new();
        doc.add(Run::new("bare").prop("bold", true));
        let markup = serialize(&doc).unwrap();
        let p = markup.child("w:body").unwrap().child("w:p").unwrap();
        let r = p.child("w:r").unwrap();
        assert_eq!(r.child("w:rPr").unwrap().child("w:b").unwrap().attr("w:val"), Some("on"));
    }

    #[test]
    fn test_table_structure_order() {
        let table = Table::create()
            .prop("layout", "fixed")
            .unwrap()
            .cols([1.0, 2.0])
            .row()
            .cell_text("a")
            .cell_text("b");
        let mut doc = Document::new();
        doc.add(table);
        let markup = serialize(&doc).unwrap();
        let tbl = markup.child("w:body").unwrap().child("w:tbl").unwrap();

        // tblPr, then tblGrid, then rows
        let children: Vec<_> = tbl.children().map(|c| c.name().to_string()).collect();
        assert_eq!(children, vec!["w:tblPr", "w:tblGrid", "w:tr"]);

        let grid = tbl.child("w:tblGrid").unwrap();
        let widths: Vec<_> = grid.children().map(|c| c.attr("w:w").unwrap().to_string()).collect();
        assert_eq!(widths, vec!["1440", "2880"]);

        let tr = tbl.child("w:tr").unwrap();
        assert_eq!(tr.child_count(), 2);
    }

    #[test]
    fn test_empty_cell_gets_empty_paragraph() {
        let table = Table::create().row().cell();
        let mut doc = Document::new();
        doc.add(table);
        let markup = serialize(&doc).unwrap();
        let tc = markup
            .child("w:body")
            .unwrap()
            .child("w:tbl")
            .unwrap()
            .child("w:tr")
            .unwrap()
            .child("w:tc")
            .unwrap();
        assert!(tc.child("w:p").is_some());
    }

    #[test]
    fn test_nested_table_serializes_inside_cell() {
        let table = Table::create()
            .table()
            .cell_text("inner")
            .end();
        let mut doc = Document::new();
        doc.add(table);
        let markup = serialize(&doc).unwrap();
        let outer_tc = markup
            .child("w:body")
            .unwrap()
            .child("w:tbl")
            .unwrap()
            .child("w:tr")
            .unwrap()
            .child("w:tc")
            .unwrap();
        let inner = outer_tc.child("w:tbl").unwrap();
        let inner_t = inner
            .child("w:tr")
            .unwrap()
            .child("w:tc")
            .unwrap()
            .child("w:p")
            .unwrap()
            .child("w:r")
            .unwrap()
            .child("w:t")
            .unwrap();
        assert_eq!(inner_t.text(), "inner");
    }

    #[test]
    fn test_invalid_property_aborts_pass() {
        let mut doc = Document::new();
        doc.add(Paragraph::with_text("fine"));
        doc.add(Paragraph::with_text("bad").prop("align", "left-ish"));
        let err = serialize(&doc).unwrap_err();
        assert!(matches!(err, Error::InvalidPropertyValue { .. }));
    }

    #[test]
    fn test_image_with_explicit_size_needs_no_probe() {
        let image = Image::new("/no/such/file.png")
            .prop("width", 2.0)
            .prop("height", 1.0)
            .prop("alt", "a red square");
        let mut doc = Document::new();
        doc.add(Paragraph::new().image(image));
        let markup = serialize(&doc).unwrap();
        let drawing = markup
            .child("w:body")
            .unwrap()
            .child("w:p")
            .unwrap()
            .child("w:r")
            .unwrap()
            .child("w:drawing")
            .unwrap();
        let inline = drawing.child("wp:inline").unwrap();
        let ext = inline.child("wp:extent").unwrap();
        assert_eq!(ext.attr("cx"), Some("1828800"));
        assert_eq!(ext.attr("cy"), Some("914400"));
        assert_eq!(
            inline.child("wp:docPr").unwrap().attr("descr"),
            Some("a red square")
        );
        // Relationship id is a placeholder for the packaging layer
        let blip = inline
            .child("a:graphic")
            .unwrap()
            .child("a:graphicData")
            .unwrap()
            .child("pic:pic")
            .unwrap()
            .child("pic:blipFill")
            .unwrap()
            .child("a:blip")
            .unwrap();
        assert_eq!(blip.attr("r:embed"), Some("{{IMAGE_0}}"));
    }

    #[test]
    fn test_image_without_size_propagates_metadata_error() {
        let mut doc = Document::new();
        doc.add(Paragraph::new().image(Image::new("/no/such/file.png")));
        let err = serialize(&doc).unwrap_err();
        assert!(matches!(err, Error::MetadataUnavailable(_)));
    }

    #[test]
    fn test_unknown_properties_omitted_everywhere() {
        let table = Table::create()
            .prop("notAThing", 1)
            .unwrap()
            .row()
            .cell_text("x");
        let mut doc = Document::new();
        doc.add(Paragraph::with_text("y").prop("alsoNot", "z"));
        doc.add(table);
        let markup = serialize(&doc).unwrap();
        let body = markup.child("w:body").unwrap();
        // Neither element got a property container
        assert!(body.child("w:p").unwrap().child("w:pPr").is_none());
        assert!(body.child("w:tbl").unwrap().child("w:tblPr").is_none());
    }

    #[test]
    fn test_serialize_does_not_mutate_input() {
        let mut doc = Document::new();
        doc.add(
            Paragraph::with_text("x")
                .prop("align", "center")
                .prop("indent", Properties::new().with("left", 0.5)),
        );
        let first = serialize(&doc).unwrap();
        let second = serialize(&doc).unwrap();
        assert_eq!(first, second);
    }
}
