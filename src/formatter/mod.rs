//! Element property formatters.
//!
//! The formatter walks an element's property bag in insertion order and
//! emits the element's property container node (`w:pPr`, `w:rPr`,
//! `w:tblPr`, `w:trPr` or `w:tcPr`). Each entry goes through alias
//! resolution, a kind lookup in the registry, and the kind's coercer.
//! Unrecognized property names are skipped silently so documents carrying
//! forward-compatible properties still serialize; a recognized property
//! with an invalid value fails the whole pass.

mod coerce;
mod composite;
mod registry;

pub use registry::{ElementKind, ValueKind, lookup_kind, resolve_alias};

use crate::common::error::{Error, Result};
use crate::common::unit::points_to_half_points;
use crate::common::xml::XmlNode;
use crate::document::properties::{Properties, Value};

/// Format an element's property bag, appending the property container
/// node to `parent`. Nothing is appended when no property produced
/// output.
pub fn format_properties(
    kind: ElementKind,
    properties: &Properties,
    parent: &mut XmlNode,
) -> Result<()> {
    if let Some(container) = format_into(kind, properties)? {
        parent.append(container);
    }
    Ok(())
}

/// Format a property bag into the kind's container node. Returns `None`
/// when every entry was skipped (empty bag or only unrecognized names).
pub(crate) fn format_into(kind: ElementKind, properties: &Properties) -> Result<Option<XmlNode>> {
    let mut container: Option<XmlNode> = None;
    for (name, value) in properties.iter() {
        let canonical = resolve_alias(kind, name);
        // Unknown properties are skipped, not rejected
        let Some(value_kind) = lookup_kind(kind, canonical) else {
            continue;
        };
        let node = dispatch(kind, canonical, value_kind, value)?;
        container
            .get_or_insert_with(|| XmlNode::new(kind.container_tag()))
            .append(node);
    }
    Ok(container)
}

fn dispatch(kind: ElementKind, name: &str, value_kind: ValueKind, value: &Value) -> Result<XmlNode> {
    match value_kind {
        ValueKind::Bool => Ok(simple(name, coerce::on_off(value))),
        ValueKind::Decimal => Ok(simple(name, num(coerce::decimal(kind, name, value)?))),
        ValueKind::Simple => {
            let text = value.scalar_string().ok_or_else(|| {
                invalid(kind, name, format!("expects a scalar value, got {}", show(value)))
            })?;
            Ok(simple(name, text))
        },
        ValueKind::Align => Ok(simple(name, coerce::align(kind, name, value)?)),
        ValueKind::TextVAlign => Ok(simple(name, coerce::text_valign(kind, name, value)?)),
        ValueKind::CellVAlign => Ok(simple(name, coerce::cell_valign(kind, name, value)?)),
        ValueKind::Direction => Ok(simple(name, coerce::direction(kind, name, value)?)),
        ValueKind::TextWrap => Ok(simple(name, coerce::text_wrap(kind, name, value)?)),
        ValueKind::Underline => Ok(simple(name, coerce::underline(kind, name, value)?)),
        ValueKind::Merge => Ok(simple(name, coerce::merge(kind, name, value)?)),
        ValueKind::Color => Ok(simple(name, coerce::color(kind, name, value)?)),
        ValueKind::HalfPoints => {
            let points = value.as_f64().ok_or_else(|| {
                invalid(kind, name, format!("expects a point size, got {}", show(value)))
            })?;
            Ok(simple(name, num(points_to_half_points(points)?)))
        },
        ValueKind::TableLayout => {
            // tblLayout carries its value in the type attribute, not val
            let layout = coerce::table_layout(kind, name, value)?;
            Ok(XmlNode::new(qname(name)).with_attr("w:type", layout))
        },
        ValueKind::Border => composite::border(kind, name, value),
        ValueKind::Indent => composite::indent(kind, name, value),
        ValueKind::Spacing => composite::spacing(kind, name, value),
        ValueKind::Tabs => composite::tabs(kind, name, value),
        ValueKind::Shading => composite::shading(kind, name, value),
        ValueKind::CellMargin => composite::cell_margin(kind, name, value),
        ValueKind::TableMeasure => composite::table_measure(kind, name, value),
        ValueKind::Numbering => composite::numbering(kind, name, value),
        ValueKind::RowHeight => composite::row_height(kind, name, value),
        ValueKind::Fonts => composite::fonts(kind, name, value),
        ValueKind::RunProperties => composite::run_properties(kind, name, value),
    }
}

/// Qualify a canonical name with the wordprocessingml prefix.
pub(crate) fn qname(name: &str) -> String {
    format!("w:{}", name)
}

/// A single-attribute property node: `<w:{name} w:val="{value}"/>`.
fn simple(name: &str, value: impl Into<String>) -> XmlNode {
    XmlNode::new(qname(name)).with_attr("w:val", value)
}

/// Render an integer for attribute output.
pub(crate) fn num(n: i64) -> String {
    itoa::Buffer::new().format(n).to_string()
}

/// Describe a received value for an error message.
pub(crate) fn show(value: &Value) -> String {
    match value.scalar_string() {
        Some(s) => format!("\"{}\"", s),
        None => match value {
            Value::Map(_) => "a mapping".to_string(),
            Value::List(_) => "a list".to_string(),
            _ => format!("{:?}", value),
        },
    }
}

/// Build an [`Error::InvalidPropertyValue`] for the given element kind
/// and property.
pub(crate) fn invalid(kind: ElementKind, property: &str, message: impl Into<String>) -> Error {
    Error::InvalidPropertyValue {
        element: kind.as_str(),
        property: property.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(kind: ElementKind, properties: &Properties) -> Option<XmlNode> {
        format_into(kind, properties).unwrap()
    }

    #[test]
    fn test_empty_bag_emits_nothing() {
        assert!(format(ElementKind::Paragraph, &Properties::new()).is_none());
    }

    #[test]
    fn test_unknown_properties_skipped_silently() {
        let props = Properties::new().with("flux", "capacitor");
        assert!(format(ElementKind::Paragraph, &props).is_none());

        // A known property next to an unknown one still formats
        let props = Properties::new().with("flux", 1).with("keepNext", true);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        assert_eq!(ppr.child_count(), 1);
        assert_eq!(ppr.child("w:keepNext").unwrap().attr("w:val"), Some("on"));
    }

    #[test]
    fn test_alias_resolution() {
        let props = Properties::new().with("align", "center");
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        assert_eq!(ppr.child("w:jc").unwrap().attr("w:val"), Some("center"));
    }

    #[test]
    fn test_justify_and_both_identical() {
        let a = format(
            ElementKind::Paragraph,
            &Properties::new().with("align", "justify"),
        )
        .unwrap();
        let b = format(
            ElementKind::Paragraph,
            &Properties::new().with("align", "both"),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_align_fails_fast() {
        let props = Properties::new()
            .with("align", "left-ish")
            .with("keepNext", true);
        let err = format_into(ElementKind::Paragraph, &props).unwrap_err();
        match err {
            Error::InvalidPropertyValue {
                element, property, message,
            } => {
                assert_eq!(element, "paragraph");
                assert_eq!(property, "jc");
                assert!(message.contains("must be one of"));
            },
            other => panic!("expected InvalidPropertyValue, got {:?}", other),
        }
    }

    #[test]
    fn test_insertion_order_drives_child_order() {
        let props = Properties::new()
            .with("keepNext", true)
            .with("align", "center")
            .with("outline", 1);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let names: Vec<_> = ppr.children().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["w:keepNext", "w:jc", "w:outlineLvl"]);
    }

    #[test]
    fn test_scalar_border_covers_every_side() {
        let props = Properties::new().with("border", 1.5);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let bdr = ppr.child("w:pBdr").unwrap();
        let sides: Vec<_> = bdr.children().map(|c| c.name().to_string()).collect();
        assert_eq!(
            sides,
            vec!["w:top", "w:right", "w:bottom", "w:left", "w:between", "w:bar"]
        );
        for side in bdr.children() {
            assert_eq!(side.attr("w:sz"), Some("12")); // 1.5pt -> eighths
            assert_eq!(side.attr("w:val"), Some("single"));
        }
    }

    #[test]
    fn test_table_border_side_set() {
        let props = Properties::new().with("border", 1);
        let tblpr = format(ElementKind::Table, &props).unwrap();
        let bdr = tblpr.child("w:tblBorders").unwrap();
        let sides: Vec<_> = bdr.children().map(|c| c.name().to_string()).collect();
        assert_eq!(
            sides,
            vec!["w:top", "w:right", "w:bottom", "w:left", "w:insideH", "w:insideV"]
        );
    }

    #[test]
    fn test_border_mapping_preserves_caller_order_and_drops_unknown_sides() {
        let sides = Properties::new()
            .with("bottom", 2)
            .with("top", Properties::new().with("val", "double").with("sz", 1)
                .with("shadow", true).with("frame", "1").with("bogus", "x"))
            .with("middle", 3);
        let props = Properties::new().with("border", sides);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let bdr = ppr.child("w:pBdr").unwrap();
        let names: Vec<_> = bdr.children().map(|c| c.name().to_string()).collect();
        // Caller order for recognized sides; "middle" dropped
        assert_eq!(names, vec!["w:bottom", "w:top"]);

        let top = bdr.child("w:top").unwrap();
        assert_eq!(top.attr("w:val"), Some("double"));
        assert_eq!(top.attr("w:sz"), Some("8"));
        assert_eq!(top.attr("w:shadow"), Some("on"));
        assert_eq!(top.attr("w:frame"), Some("1"));
        assert_eq!(top.attr("w:bogus"), None);
    }

    #[test]
    fn test_border_val_defaults_to_single() {
        let sides = Properties::new().with("top", Properties::new().with("sz", 1));
        let props = Properties::new().with("border", sides);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let top = ppr.child("w:pBdr").unwrap().child("w:top").unwrap();
        assert_eq!(top.attr("w:val"), Some("single"));
    }

    #[test]
    fn test_indent_scalar_and_mapping() {
        let props = Properties::new().with("indent", 0.5);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let ind = ppr.child("w:ind").unwrap();
        assert_eq!(ind.attr("w:left"), Some("720"));
        assert_eq!(ind.attr("w:right"), Some("720"));

        let props = Properties::new().with(
            "indent",
            Properties::new().with("firstLine", 0.25).with("left", -1.0),
        );
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let ind = ppr.child("w:ind").unwrap();
        assert_eq!(ind.attr("w:firstLine"), Some("360"));
        assert_eq!(ind.attr("w:left"), Some("-1440"));
    }

    #[test]
    fn test_table_layout_auto_and_autofit_identical() {
        let a = format(
            ElementKind::Table,
            &Properties::new().with("layout", "auto"),
        )
        .unwrap();
        let b = format(
            ElementKind::Table,
            &Properties::new().with("layout", "autofit"),
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.child("w:tblLayout").unwrap().attr("w:type"),
            Some("autofit")
        );

        let err = format_into(
            ElementKind::Table,
            &Properties::new().with("layout", "bogus"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPropertyValue { .. }));
    }

    #[test]
    fn test_spacing() {
        let props = Properties::new().with(
            "spacing",
            Properties::new().with("before", 12.0).with("after", 6.0),
        );
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let spacing = ppr.child("w:spacing").unwrap();
        assert_eq!(spacing.attr("w:before"), Some("240"));
        assert_eq!(spacing.attr("w:after"), Some("120"));

        // Bare scalar is a line multiplier
        let props = Properties::new().with("spacing", 1.5);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let spacing = ppr.child("w:spacing").unwrap();
        assert_eq!(spacing.attr("w:line"), Some("360"));
        assert_eq!(spacing.attr("w:lineRule"), Some("auto"));
    }

    #[test]
    fn test_tabs() {
        let stops: Vec<Value> = vec![
            Value::from(0.5),
            Value::from(Properties::new().with("pos", 1.0).with("val", "right")),
        ];
        let props = Properties::new().with("tabs", stops);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let tabs = ppr.child("w:tabs").unwrap();
        let stops: Vec<_> = tabs.children().collect();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].attr("w:val"), Some("left"));
        assert_eq!(stops[0].attr("w:pos"), Some("720"));
        assert_eq!(stops[1].attr("w:val"), Some("right"));
        assert_eq!(stops[1].attr("w:pos"), Some("1440"));
    }

    #[test]
    fn test_shading_from_bgcolor_alias() {
        let props = Properties::new().with("bgColor", "CCCCCC");
        let tblpr = format(ElementKind::Table, &props).unwrap();
        let shd = tblpr.child("w:shd").unwrap();
        assert_eq!(shd.attr("w:val"), Some("clear"));
        assert_eq!(shd.attr("w:color"), Some("auto"));
        assert_eq!(shd.attr("w:fill"), Some("CCCCCC"));
    }

    #[test]
    fn test_run_properties_nested_in_paragraph() {
        let props = Properties::new().with(
            "rPr",
            Properties::new().with("bold", true).with("size", 12),
        );
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let rpr = ppr.child("w:rPr").unwrap();
        assert_eq!(rpr.child("w:b").unwrap().attr("w:val"), Some("on"));
        assert_eq!(rpr.child("w:sz").unwrap().attr("w:val"), Some("24"));
    }

    #[test]
    fn test_numbering() {
        let props = Properties::new().with("numPr", 3);
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let num_pr = ppr.child("w:numPr").unwrap();
        assert_eq!(num_pr.child("w:ilvl").unwrap().attr("w:val"), Some("0"));
        assert_eq!(num_pr.child("w:numId").unwrap().attr("w:val"), Some("3"));

        let props = Properties::new().with(
            "numPr",
            Properties::new().with("id", 5).with("level", 2),
        );
        let ppr = format(ElementKind::Paragraph, &props).unwrap();
        let num_pr = ppr.child("w:numPr").unwrap();
        assert_eq!(num_pr.child("w:ilvl").unwrap().attr("w:val"), Some("2"));
        assert_eq!(num_pr.child("w:numId").unwrap().attr("w:val"), Some("5"));
    }

    #[test]
    fn test_table_measure() {
        let props = Properties::new().with("width", 6.5);
        let tblpr = format(ElementKind::Table, &props).unwrap();
        let w = tblpr.child("w:tblW").unwrap();
        assert_eq!(w.attr("w:w"), Some("9360"));
        assert_eq!(w.attr("w:type"), Some("dxa"));

        let props = Properties::new().with(
            "width",
            Properties::new().with("w", 5000).with("type", "pct"),
        );
        let tblpr = format(ElementKind::Table, &props).unwrap();
        let w = tblpr.child("w:tblW").unwrap();
        assert_eq!(w.attr("w:w"), Some("5000"));
        assert_eq!(w.attr("w:type"), Some("pct"));
    }

    #[test]
    fn test_cell_margin_scalar() {
        let props = Properties::new().with("margin", 0.1);
        let tblpr = format(ElementKind::Table, &props).unwrap();
        let mar = tblpr.child("w:tblCellMar").unwrap();
        assert_eq!(mar.child_count(), 4);
        for side in mar.children() {
            assert_eq!(side.attr("w:w"), Some("144"));
            assert_eq!(side.attr("w:type"), Some("dxa"));
        }
    }

    #[test]
    fn test_row_and_cell_formatting() {
        let props = Properties::new()
            .with("skipBefore", 2)
            .with("cantSplit", true);
        let trpr = format(ElementKind::TableRow, &props).unwrap();
        assert_eq!(
            trpr.child("w:gridBefore").unwrap().attr("w:val"),
            Some("2")
        );
        assert_eq!(
            trpr.child("w:cantSplit").unwrap().attr("w:val"),
            Some("on")
        );

        let props = Properties::new()
            .with("span", 3)
            .with("valign", "center")
            .with("vMerge", true);
        let tcpr = format(ElementKind::TableCell, &props).unwrap();
        assert_eq!(tcpr.child("w:gridSpan").unwrap().attr("w:val"), Some("3"));
        assert_eq!(tcpr.child("w:vAlign").unwrap().attr("w:val"), Some("center"));
        assert_eq!(
            tcpr.child("w:vMerge").unwrap().attr("w:val"),
            Some("continue")
        );
    }

    #[test]
    fn test_run_formatting() {
        let props = Properties::new()
            .with("bold", true)
            .with("underline", true)
            .with("size", 10.5)
            .with("color", "#ff0000")
            .with("font", "Consolas");
        let rpr = format(ElementKind::Run, &props).unwrap();
        assert_eq!(rpr.child("w:b").unwrap().attr("w:val"), Some("on"));
        assert_eq!(rpr.child("w:u").unwrap().attr("w:val"), Some("single"));
        assert_eq!(rpr.child("w:sz").unwrap().attr("w:val"), Some("21"));
        assert_eq!(rpr.child("w:color").unwrap().attr("w:val"), Some("FF0000"));
        let fonts = rpr.child("w:rFonts").unwrap();
        assert_eq!(fonts.attr("w:ascii"), Some("Consolas"));
        assert_eq!(fonts.attr("w:cs"), Some("Consolas"));
    }
}
