//! Composite value coercers: properties that expand into multiple
//! attributes or child markup nodes.

use crate::common::error::Result;
use crate::common::unit::{inches_to_twips, points_to_eighths, points_to_twentieths};
use crate::common::xml::XmlNode;
use crate::document::properties::Value;
use crate::formatter::registry::ElementKind;
use crate::formatter::{coerce, format_into, invalid, num, qname, show};

/// Border sides for paragraph and run borders.
static PARAGRAPH_SIDES: &[&str] = &["top", "right", "bottom", "left", "between", "bar"];
/// Border sides for table and cell borders.
static TABLE_SIDES: &[&str] = &["top", "right", "bottom", "left", "insideH", "insideV"];
/// Attributes the schema defines on a border side.
static BORDER_ATTRS: &[&str] = &[
    "val",
    "color",
    "themeColor",
    "themeTint",
    "themeShade",
    "sz",
    "space",
    "shadow",
    "frame",
];

/// Format a border group (`pBdr`, `tblBorders`, `tcBorders`, `bdr`).
///
/// A bare scalar is a size in points applied uniformly to every side the
/// element kind defines. A mapping selects sides explicitly, in the
/// caller's order; unrecognized side names are dropped.
pub(crate) fn border(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let sides = match kind {
        ElementKind::Table | ElementKind::TableCell => TABLE_SIDES,
        _ => PARAGRAPH_SIDES,
    };
    let mut prop = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            for (side, spec) in map.iter() {
                if !sides.contains(&side) {
                    continue;
                }
                prop.append(border_side(kind, name, side, spec)?);
            }
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a size or a side mapping"));
        },
        scalar => {
            for side in sides {
                prop.append(border_side(kind, name, side, scalar)?);
            }
        },
    }
    Ok(prop)
}

fn border_side(kind: ElementKind, name: &str, side: &str, spec: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(side));
    match spec {
        Value::Map(attrs) => {
            let mut has_val = false;
            for (attr, v) in attrs.iter() {
                if !BORDER_ATTRS.contains(&attr) {
                    continue;
                }
                match attr {
                    "sz" => {
                        let points = v.as_f64().ok_or_else(|| {
                            invalid(
                                kind,
                                name,
                                format!("border size must be numeric, got {}", show(v)),
                            )
                        })?;
                        node.set_attr("w:sz", num(points_to_eighths(points)?));
                    },
                    "shadow" => node.set_attr("w:shadow", coerce::on_off(v)),
                    _ => {
                        if attr == "val" {
                            has_val = true;
                        }
                        let text = v.scalar_string().ok_or_else(|| {
                            invalid(
                                kind,
                                name,
                                format!("border \"{}\" must be a scalar, got {}", attr, show(v)),
                            )
                        })?;
                        node.set_attr(qname(attr), text);
                    },
                }
            }
            // The schema requires the val attribute to be present
            if !has_val {
                node.set_attr("w:val", "single");
            }
        },
        Value::List(_) => {
            return Err(invalid(
                kind,
                name,
                format!("border side \"{}\" expects a size or attribute mapping", side),
            ));
        },
        scalar => {
            let points = scalar.as_f64().ok_or_else(|| {
                invalid(
                    kind,
                    name,
                    format!("border size must be numeric, got {}", show(scalar)),
                )
            })?;
            node.set_attr("w:sz", num(points_to_eighths(points)?));
            node.set_attr("w:val", "single");
        },
    }
    Ok(node)
}

/// Format an indentation attribute set (`ind`). Distances are in inches.
/// A bare scalar applies to both `left` and `right`; a mapping passes
/// every key through as an attribute.
pub(crate) fn indent(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            for (k, v) in map.iter() {
                let inches = v.as_f64().ok_or_else(|| {
                    invalid(
                        kind,
                        name,
                        format!("indent \"{}\" must be numeric, got {}", k, show(v)),
                    )
                })?;
                node.set_attr(qname(k), num(inches_to_twips(inches)?));
            }
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a distance or a side mapping"));
        },
        scalar => {
            let inches = scalar.as_f64().ok_or_else(|| {
                invalid(
                    kind,
                    name,
                    format!("indent must be numeric, got {}", show(scalar)),
                )
            })?;
            let twips = num(inches_to_twips(inches)?);
            node.set_attr("w:left", twips.clone());
            node.set_attr("w:right", twips);
        },
    }
    Ok(node)
}

static LINE_RULE_VALID: &[&str] = &["auto", "exact", "atLeast"];

/// Format a paragraph spacing attribute set (`spacing`). `before`/`after`
/// are points; `line` is a line-height multiplier under the `auto` rule,
/// otherwise points.
pub(crate) fn spacing(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            let rule = match map.get("lineRule") {
                Some(v) => coerce::enumerated(kind, name, v, LINE_RULE_VALID, &[])?,
                None => "auto".to_string(),
            };
            for (k, v) in map.iter() {
                match k {
                    "before" | "after" => {
                        let points = v.as_f64().ok_or_else(|| {
                            invalid(
                                kind,
                                name,
                                format!("spacing \"{}\" must be numeric, got {}", k, show(v)),
                            )
                        })?;
                        node.set_attr(qname(k), num(points_to_twentieths(points)?));
                    },
                    "line" => {
                        node.set_attr("w:line", num(line_value(kind, name, v, &rule)?));
                    },
                    "lineRule" => node.set_attr("w:lineRule", rule.clone()),
                    _ => {}, // unrecognized keys are dropped
                }
            }
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a multiplier or a mapping"));
        },
        scalar => {
            node.set_attr("w:line", num(line_value(kind, name, scalar, "auto")?));
            node.set_attr("w:lineRule", "auto");
        },
    }
    Ok(node)
}

fn line_value(kind: ElementKind, name: &str, value: &Value, rule: &str) -> Result<i64> {
    let n = value.as_f64().ok_or_else(|| {
        invalid(
            kind,
            name,
            format!("line spacing must be numeric, got {}", show(value)),
        )
    })?;
    if rule == "auto" {
        // Multiplier: 240 twentieths per single line
        if !n.is_finite() {
            return Err(invalid(kind, name, "line spacing must be finite"));
        }
        Ok((n * 240.0).round() as i64)
    } else {
        Ok(points_to_twentieths(n)?)
    }
}

static TAB_VALID: &[&str] = &["left", "center", "right", "decimal", "bar", "clear", "num"];

/// Format a tab stop list (`tabs`). Each stop is a position in inches or
/// a mapping with `pos`, optional `val` (default `left`) and `leader`.
pub(crate) fn tabs(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let Value::List(stops) = value else {
        return Err(invalid(kind, name, "expects a list of tab stops"));
    };
    let mut node = XmlNode::new(qname(name));
    for stop in stops {
        let mut tab = XmlNode::new("w:tab");
        match stop {
            Value::Map(attrs) => {
                let val = match attrs.get("val") {
                    Some(v) => coerce::enumerated(kind, name, v, TAB_VALID, &[])?,
                    None => "left".to_string(),
                };
                let pos = attrs
                    .get("pos")
                    .and_then(|v| v.as_f64())
                    .ok_or_else(|| invalid(kind, name, "tab stop requires a numeric pos"))?;
                tab.set_attr("w:val", val);
                tab.set_attr("w:pos", num(inches_to_twips(pos)?));
                if let Some(leader) = attrs.get("leader") {
                    let leader = leader.scalar_string().ok_or_else(|| {
                        invalid(kind, name, "tab leader must be a scalar")
                    })?;
                    tab.set_attr("w:leader", leader);
                }
            },
            scalar => {
                let pos = scalar.as_f64().ok_or_else(|| {
                    invalid(
                        kind,
                        name,
                        format!("tab stop must be numeric, got {}", show(scalar)),
                    )
                })?;
                tab.set_attr("w:val", "left");
                tab.set_attr("w:pos", num(inches_to_twips(pos)?));
            },
        }
        node.append(tab);
    }
    Ok(node)
}

/// Format a shading node (`shd`). A bare scalar is a fill color; a
/// mapping may set `val`, `color` and `fill` explicitly.
pub(crate) fn shading(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            let pattern = map
                .get("val")
                .and_then(|v| v.scalar_string())
                .unwrap_or_else(|| "clear".to_string());
            let color = map
                .get("color")
                .and_then(|v| v.scalar_string())
                .unwrap_or_else(|| "auto".to_string());
            node.set_attr("w:val", pattern);
            node.set_attr("w:color", color);
            if let Some(fill) = map.get("fill") {
                let fill = coerce::color(kind, name, fill)?;
                node.set_attr("w:fill", fill);
            }
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a fill color or a mapping"));
        },
        scalar => {
            let fill = coerce::color(kind, name, scalar)?;
            node.set_attr("w:val", "clear");
            node.set_attr("w:color", "auto");
            node.set_attr("w:fill", fill);
        },
    }
    Ok(node)
}

static MARGIN_SIDES: &[&str] = &["top", "right", "bottom", "left", "start", "end"];

/// Format a per-side cell margin group (`tblCellMar`, `tcMar`). Distances
/// are in inches. A bare scalar applies to top/right/bottom/left.
pub(crate) fn cell_margin(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            for (side, v) in map.iter() {
                if !MARGIN_SIDES.contains(&side) {
                    continue;
                }
                node.append(margin_side(kind, name, side, v)?);
            }
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a distance or a side mapping"));
        },
        scalar => {
            for side in &MARGIN_SIDES[..4] {
                node.append(margin_side(kind, name, side, scalar)?);
            }
        },
    }
    Ok(node)
}

fn margin_side(kind: ElementKind, name: &str, side: &str, value: &Value) -> Result<XmlNode> {
    let inches = value.as_f64().ok_or_else(|| {
        invalid(
            kind,
            name,
            format!("margin \"{}\" must be numeric, got {}", side, show(value)),
        )
    })?;
    let mut node = XmlNode::new(qname(side));
    node.set_attr("w:w", num(inches_to_twips(inches)?));
    node.set_attr("w:type", "dxa");
    Ok(node)
}

static MEASURE_TYPE_VALID: &[&str] = &["auto", "dxa", "nil", "pct"];

/// Format a width/indent measure (`tblW`, `tcW`, `tblInd`,
/// `tblCellSpacing`). A bare scalar is a width in inches emitted as
/// `dxa`; a mapping gives the raw `w` value with an explicit `type`.
pub(crate) fn table_measure(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            let w = map
                .get("w")
                .and_then(|v| v.scalar_string())
                .ok_or_else(|| invalid(kind, name, "measure mapping requires a scalar w"))?;
            let ty = match map.get("type") {
                Some(v) => coerce::enumerated(kind, name, v, MEASURE_TYPE_VALID, &[])?,
                None => "dxa".to_string(),
            };
            node.set_attr("w:w", w);
            node.set_attr("w:type", ty);
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a width or a mapping"));
        },
        scalar => {
            let inches = scalar.as_f64().ok_or_else(|| {
                invalid(
                    kind,
                    name,
                    format!("measure must be numeric, got {}", show(scalar)),
                )
            })?;
            node.set_attr("w:w", num(inches_to_twips(inches)?));
            node.set_attr("w:type", "dxa");
        },
    }
    Ok(node)
}

/// Format a numbering reference (`numPr`). A bare integer is a numbering
/// definition id at level 0; a mapping may set `id`/`numId` and
/// `level`/`ilvl`.
pub(crate) fn numbering(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let (id, level) = match value {
        Value::Map(map) => {
            let id = map
                .get("id")
                .or_else(|| map.get("numId"))
                .and_then(|v| v.as_i64())
                .ok_or_else(|| invalid(kind, name, "numbering requires an integer id"))?;
            let level = match map.get("level").or_else(|| map.get("ilvl")) {
                Some(v) => coerce::decimal(kind, name, v)?,
                None => 0,
            };
            (id, level)
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a numbering id or a mapping"));
        },
        scalar => (coerce::decimal(kind, name, scalar)?, 0),
    };
    let mut node = XmlNode::new(qname(name));
    node.append(XmlNode::new("w:ilvl").with_attr("w:val", num(level)));
    node.append(XmlNode::new("w:numId").with_attr("w:val", num(id)));
    Ok(node)
}

static HRULE_VALID: &[&str] = &["auto", "atLeast", "exact"];

/// Format a row height (`trHeight`). A bare scalar is a height in inches
/// under the `atLeast` rule; a mapping may set `val` and `hRule`.
pub(crate) fn row_height(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            let inches = map
                .get("val")
                .and_then(|v| v.as_f64())
                .ok_or_else(|| invalid(kind, name, "row height requires a numeric val"))?;
            let rule = match map.get("hRule") {
                Some(v) => coerce::enumerated(kind, name, v, HRULE_VALID, &[])?,
                None => "atLeast".to_string(),
            };
            node.set_attr("w:val", num(inches_to_twips(inches)?));
            node.set_attr("w:hRule", rule);
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a height or a mapping"));
        },
        scalar => {
            let inches = scalar.as_f64().ok_or_else(|| {
                invalid(
                    kind,
                    name,
                    format!("row height must be numeric, got {}", show(scalar)),
                )
            })?;
            node.set_attr("w:val", num(inches_to_twips(inches)?));
            node.set_attr("w:hRule", "atLeast");
        },
    }
    Ok(node)
}

static FONT_KEYS: &[&str] = &["ascii", "hAnsi", "eastAsia", "cs", "hint"];

/// Format a font face set (`rFonts`). A bare string applies the same face
/// to every script slot; a mapping selects slots explicitly.
pub(crate) fn fonts(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let mut node = XmlNode::new(qname(name));
    match value {
        Value::Map(map) => {
            for (k, v) in map.iter() {
                if !FONT_KEYS.contains(&k) {
                    continue;
                }
                let face = v.scalar_string().ok_or_else(|| {
                    invalid(kind, name, format!("font \"{}\" must be a scalar", k))
                })?;
                node.set_attr(qname(k), face);
            }
        },
        Value::List(_) => {
            return Err(invalid(kind, name, "expects a font name or a mapping"));
        },
        scalar => {
            let face = scalar.scalar_string().ok_or_else(|| {
                invalid(kind, name, format!("expects a font name, got {}", show(scalar)))
            })?;
            for slot in &FONT_KEYS[..4] {
                node.set_attr(qname(slot), face.clone());
            }
        },
    }
    Ok(node)
}

/// Format a nested run property bag (`rPr` declared on a paragraph).
pub(crate) fn run_properties(kind: ElementKind, name: &str, value: &Value) -> Result<XmlNode> {
    let Value::Map(bag) = value else {
        return Err(invalid(kind, name, "expects a mapping of run properties"));
    };
    Ok(format_into(ElementKind::Run, bag)?
        .unwrap_or_else(|| XmlNode::new(ElementKind::Run.container_tag())))
}
