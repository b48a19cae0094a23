//! Property name registry: alias tables and value-kind maps per element
//! kind.
//!
//! Both tables are compile-time perfect hash maps. Alias resolution is a
//! single hop (friendly name → canonical schema name, never alias →
//! alias), and the effective kind map for an element is the shared base
//! map overlaid with the kind-specific entries, kind-specific winning on
//! collision.

use phf::{Map, phf_map};

/// The element kinds that carry formattable property bags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Paragraph,
    Run,
    Table,
    TableRow,
    TableCell,
}

impl ElementKind {
    /// Human-readable name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Run => "run",
            Self::Table => "table",
            Self::TableRow => "table row",
            Self::TableCell => "table cell",
        }
    }

    /// Qualified tag of the property container node for this kind.
    pub(crate) fn container_tag(&self) -> &'static str {
        match self {
            Self::Paragraph => "w:pPr",
            Self::Run => "w:rPr",
            Self::Table => "w:tblPr",
            Self::TableRow => "w:trPr",
            Self::TableCell => "w:tcPr",
        }
    }
}

/// Tag selecting which coercion/validation routine applies to a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Truthy/falsy → `w:val="on|off"`
    Bool,
    /// Integer → `w:val`
    Decimal,
    /// Scalar pass-through → `w:val`
    Simple,
    /// Paragraph/table justification (`jc`)
    Align,
    /// Multi-side border group (`pBdr`, `tblBorders`, `tcBorders`, `bdr`)
    Border,
    /// Indentation attribute set (`ind`), distances in inches
    Indent,
    /// Paragraph spacing attribute set (`spacing`)
    Spacing,
    /// Tab stop list (`tabs`)
    Tabs,
    /// Shading/background (`shd`)
    Shading,
    /// Nested run property bag (`rPr` on a paragraph)
    RunProperties,
    /// Numbering reference (`numPr`)
    Numbering,
    /// Paragraph vertical text alignment (`textAlignment`)
    TextVAlign,
    /// Cell vertical alignment (`vAlign`)
    CellVAlign,
    /// Text flow direction (`textDirection`)
    Direction,
    /// Textbox tight wrap (`textboxTightWrap`)
    TextWrap,
    /// Table layout algorithm (`tblLayout`)
    TableLayout,
    /// Width/indent measure with a `type` attribute (`tblW`, `tcW`,
    /// `tblInd`, `tblCellSpacing`)
    TableMeasure,
    /// Per-side cell margin group (`tblCellMar`, `tcMar`)
    CellMargin,
    /// Hex RGB or `auto` (`color`)
    Color,
    /// Underline pattern (`u`)
    Underline,
    /// Font face set (`rFonts`)
    Fonts,
    /// Font size in points → half-points (`sz`, `szCs`, `kern`)
    HalfPoints,
    /// Row height (`trHeight`)
    RowHeight,
    /// Horizontal/vertical cell merge (`hMerge`, `vMerge`)
    Merge,
}

/// Entries shared by every element kind; kind-specific maps override on
/// collision.
static SHARED_MAP: Map<&'static str, ValueKind> = phf_map! {
    "shd" => ValueKind::Shading,
};

static PARAGRAPH_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "align" => "jc",
    "justify" => "jc",
    "border" => "pBdr",
    "indent" => "ind",
    "outline" => "outlineLvl",
    "style" => "pStyle",
};

static PARAGRAPH_MAP: Map<&'static str, ValueKind> = phf_map! {
    "adjustRightInd" => ValueKind::Bool,
    "autoSpaceDE" => ValueKind::Bool,
    "autoSpaceDN" => ValueKind::Bool,
    "bidi" => ValueKind::Bool,
    "contextualSpacing" => ValueKind::Bool,
    "ind" => ValueKind::Indent,
    "jc" => ValueKind::Align,
    "keepLines" => ValueKind::Bool,
    "keepNext" => ValueKind::Bool,
    "kinsoku" => ValueKind::Bool,
    "mirrorIndents" => ValueKind::Bool,
    "numPr" => ValueKind::Numbering,
    "outlineLvl" => ValueKind::Decimal,
    "overflowPunct" => ValueKind::Bool,
    "pageBreakBefore" => ValueKind::Bool,
    "pBdr" => ValueKind::Border,
    "pStyle" => ValueKind::Simple,
    "rPr" => ValueKind::RunProperties,
    "shd" => ValueKind::Shading,
    "snapToGrid" => ValueKind::Bool,
    "spacing" => ValueKind::Spacing,
    "suppressAutoHyphens" => ValueKind::Bool,
    "suppressLineNumbers" => ValueKind::Bool,
    "suppressOverlap" => ValueKind::Bool,
    "tabs" => ValueKind::Tabs,
    "textAlignment" => ValueKind::TextVAlign,
    "textboxTightWrap" => ValueKind::TextWrap,
    "textDirection" => ValueKind::Direction,
    "topLinePunct" => ValueKind::Bool,
    "widowControl" => ValueKind::Bool,
    "wordWrap" => ValueKind::Bool,
};

static RUN_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "bold" => "b",
    "italic" => "i",
    "underline" => "u",
    "size" => "sz",
    "font" => "rFonts",
    "style" => "rStyle",
    "background" => "highlight",
    "border" => "bdr",
};

static RUN_MAP: Map<&'static str, ValueKind> = phf_map! {
    "b" => ValueKind::Bool,
    "bdr" => ValueKind::Border,
    "caps" => ValueKind::Bool,
    "color" => ValueKind::Color,
    "dstrike" => ValueKind::Bool,
    "highlight" => ValueKind::Simple,
    "i" => ValueKind::Bool,
    "kern" => ValueKind::HalfPoints,
    "noProof" => ValueKind::Bool,
    "rFonts" => ValueKind::Fonts,
    "rStyle" => ValueKind::Simple,
    "smallCaps" => ValueKind::Bool,
    "spacing" => ValueKind::Decimal,
    "strike" => ValueKind::Bool,
    "sz" => ValueKind::HalfPoints,
    "szCs" => ValueKind::HalfPoints,
    "u" => ValueKind::Underline,
    "vanish" => ValueKind::Bool,
    "vertAlign" => ValueKind::Simple,
};

static TABLE_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "align" => "jc",
    "justify" => "jc",
    "width" => "tblW",
    "border" => "tblBorders",
    "bgColor" => "shd",
    "shading" => "shd",
    "indent" => "tblInd",
    "margin" => "tblCellMar",
    "spacing" => "tblCellSpacing",
    "layout" => "tblLayout",
};

static TABLE_MAP: Map<&'static str, ValueKind> = phf_map! {
    "bidiVisual" => ValueKind::Simple,
    "jc" => ValueKind::Align,
    "shd" => ValueKind::Shading,
    "tblBorders" => ValueKind::Border,
    "tblCellMar" => ValueKind::CellMargin,
    "tblCellSpacing" => ValueKind::TableMeasure,
    "tblInd" => ValueKind::TableMeasure,
    "tblLayout" => ValueKind::TableLayout,
    "tblLook" => ValueKind::Simple,
    "tblOverlap" => ValueKind::Simple,
    "tblStyle" => ValueKind::Simple,
    "tblStyleColBandSize" => ValueKind::Simple,
    "tblStyleRowBandSize" => ValueKind::Simple,
    "tblW" => ValueKind::TableMeasure,
};

static ROW_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "align" => "jc",
    "justify" => "jc",
    "header" => "tblHeader",
    "height" => "trHeight",
    "skipBefore" => "gridBefore",
    "skipAfter" => "gridAfter",
};

static ROW_MAP: Map<&'static str, ValueKind> = phf_map! {
    "cantSplit" => ValueKind::Bool,
    "gridAfter" => ValueKind::Decimal,
    "gridBefore" => ValueKind::Decimal,
    "hidden" => ValueKind::Bool,
    "jc" => ValueKind::Align,
    "tblHeader" => ValueKind::Bool,
    "trHeight" => ValueKind::RowHeight,
};

static CELL_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "width" => "tcW",
    "border" => "tcBorders",
    "bgColor" => "shd",
    "shading" => "shd",
    "margin" => "tcMar",
    "span" => "gridSpan",
    "valign" => "vAlign",
    "fit" => "tcFitText",
};

static CELL_MAP: Map<&'static str, ValueKind> = phf_map! {
    "gridSpan" => ValueKind::Decimal,
    "hMerge" => ValueKind::Merge,
    "noWrap" => ValueKind::Bool,
    "tcBorders" => ValueKind::Border,
    "tcFitText" => ValueKind::Bool,
    "tcMar" => ValueKind::CellMargin,
    "tcW" => ValueKind::TableMeasure,
    "textDirection" => ValueKind::Direction,
    "vAlign" => ValueKind::CellVAlign,
    "vMerge" => ValueKind::Merge,
};

fn aliases(kind: ElementKind) -> &'static Map<&'static str, &'static str> {
    match kind {
        ElementKind::Paragraph => &PARAGRAPH_ALIASES,
        ElementKind::Run => &RUN_ALIASES,
        ElementKind::Table => &TABLE_ALIASES,
        ElementKind::TableRow => &ROW_ALIASES,
        ElementKind::TableCell => &CELL_ALIASES,
    }
}

fn kind_map(kind: ElementKind) -> &'static Map<&'static str, ValueKind> {
    match kind {
        ElementKind::Paragraph => &PARAGRAPH_MAP,
        ElementKind::Run => &RUN_MAP,
        ElementKind::Table => &TABLE_MAP,
        ElementKind::TableRow => &ROW_MAP,
        ElementKind::TableCell => &CELL_MAP,
    }
}

/// Resolve a property name to its canonical schema name. Names without an
/// alias entry pass through unchanged; resolution is a single hop.
pub fn resolve_alias<'a>(kind: ElementKind, name: &'a str) -> &'a str {
    aliases(kind).get(name).copied().unwrap_or(name)
}

/// Look up the value kind of a canonical property name for an element
/// kind. `None` means the property is unrecognized and the formatter will
/// skip it silently.
pub fn lookup_kind(kind: ElementKind, canonical: &str) -> Option<ValueKind> {
    kind_map(kind)
        .get(canonical)
        .or_else(|| SHARED_MAP.get(canonical))
        .copied()
}
