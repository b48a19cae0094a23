//! Table elements with a chainable, cursor-based builder.
//!
//! A [`Table`] is built through a cursor that is always in one of four
//! modes: table-level, grid definition, row, or cell. Mode gates which
//! calls are valid: `col()` only works after `grid()`, `prop()` targets
//! whatever the cursor points at, and grids carry no properties. The
//! cursor holds indices into the row/cell storage rather than references,
//! so the backing vectors can grow freely.
//!
//! # Examples
//!
//! ```
//! use longan::Table;
//!
//! let table = Table::create()
//!     .grid()
//!     .col(1.5)?
//!     .col(3.0)?
//!     .row()
//!     .cell_text("name")
//!     .cell_text("value")
//!     .row()
//!     .cell_text("answer")
//!     .cell_text("42");
//! assert_eq!(table.row_count(), 2);
//! # Ok::<(), longan::Error>(())
//! ```

use crate::common::error::{Error, Result};
use crate::document::element::Element;
use crate::document::paragraph::Paragraph;
use crate::document::properties::{Properties, Value};

/// The builder cursor's current structural context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorMode {
    Table,
    Grid,
    Row,
    Cell,
}

/// A table row: properties plus an ordered sequence of cells.
#[derive(Debug, Clone, Default)]
pub struct Row {
    properties: Properties,
    cells: Vec<Cell>,
}

impl Row {
    /// The row's properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The cells in this row, in order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A table cell: properties plus an ordered sequence of child elements.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    properties: Properties,
    elements: Vec<Element>,
}

impl Cell {
    /// The cell's properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The cell's child elements, in order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// A table element.
///
/// Built through chainable calls that consume and return the table. Calls
/// that are only valid in certain cursor modes return `Result` and raise
/// [`Error::Structural`] immediately when misused.
#[derive(Debug, Clone)]
pub struct Table {
    properties: Properties,
    grid: Vec<f64>,
    rows: Vec<Row>,
    row_idx: Option<usize>,
    mode: CursorMode,
    /// Suspended parent while building a nested table; re-installed by
    /// `end()`.
    parent: Option<Box<Table>>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create an empty table in table-level cursor mode.
    pub fn new() -> Self {
        Self {
            properties: Properties::new(),
            grid: Vec::new(),
            rows: Vec::new(),
            row_idx: None,
            mode: CursorMode::Table,
            parent: None,
        }
    }

    /// Shortcut constructor so a chain can start without a `let`.
    pub fn create() -> Self {
        Self::new()
    }

    /// Create a table with the given table-level properties.
    pub fn with_properties(properties: Properties) -> Self {
        Self {
            properties,
            ..Self::new()
        }
    }

    /// Enter grid-definition mode. Subsequent [`col`](Self::col) calls
    /// append column widths.
    pub fn grid(mut self) -> Self {
        self.mode = CursorMode::Grid;
        self
    }

    /// Enter grid-definition mode and define all columns at once, widths
    /// in inches.
    pub fn cols(mut self, widths: impl IntoIterator<Item = f64>) -> Self {
        self.mode = CursorMode::Grid;
        self.grid.extend(widths);
        self
    }

    /// Define a grid column, width in inches. Only valid in grid mode.
    pub fn col(mut self, width: f64) -> Result<Self> {
        if self.mode != CursorMode::Grid {
            return Err(Error::Structural(
                "not in grid context; call grid() first".to_string(),
            ));
        }
        self.grid.push(width);
        Ok(self)
    }

    /// Start a new row and make it the cursor target.
    pub fn row(mut self) -> Self {
        self.mode = CursorMode::Row;
        self.rows.push(Row::default());
        self.row_idx = Some(self.rows.len() - 1);
        self
    }

    /// Append a new cell to the current row and make it the element-append
    /// target. Opening a cell with no active row starts a new row first.
    pub fn cell(mut self) -> Self {
        if self.row_idx.is_none() {
            self = self.row();
        }
        self.mode = CursorMode::Cell;
        let idx = self.row_idx.unwrap();
        self.rows[idx].cells.push(Cell::default());
        self
    }

    /// Append a new cell containing a single paragraph of text.
    pub fn cell_text(self, text: impl Into<String>) -> Self {
        let mut table = self.cell();
        table
            .current_cell_mut()
            .unwrap()
            .elements
            .push(Element::Paragraph(Paragraph::with_text(text)));
        table
    }

    /// Append an element to the current cell.
    pub fn add(mut self, element: impl Into<Element>) -> Result<Self> {
        let Some(cell) = self.current_cell_mut() else {
            return Err(Error::Structural(
                "no cells are defined; call cell() first".to_string(),
            ));
        };
        cell.elements.push(element.into());
        Ok(self)
    }

    /// Append a paragraph of plain text to the current cell.
    pub fn text(self, text: impl Into<String>) -> Result<Self> {
        self.add(Element::Paragraph(Paragraph::with_text(text)))
    }

    /// Set a property on whatever the cursor targets: the table, the
    /// active row, or the active cell. Grids carry no properties.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        match self.mode {
            CursorMode::Table => self.properties.set(name, value),
            CursorMode::Row => {
                let idx = self.row_idx.unwrap();
                self.rows[idx].properties.set(name, value);
            },
            CursorMode::Cell => {
                self.current_cell_mut().unwrap().properties.set(name, value);
            },
            CursorMode::Grid => {
                return Err(Error::Structural(
                    "table grids do not have properties".to_string(),
                ));
            },
        }
        Ok(self)
    }

    /// Mark the active row as starting after `count` skipped grid columns.
    /// A count of zero is a no-op.
    pub fn skip_before(mut self, count: u32) -> Result<Self> {
        if count > 0 {
            let Some(idx) = self.row_idx else {
                return Err(Error::Structural(
                    "no rows are defined; call row() first".to_string(),
                ));
            };
            self.rows[idx].properties.set("skipBefore", count);
        }
        Ok(self)
    }

    /// Mark the active row as ending before `count` skipped grid columns.
    /// A count of zero is a no-op.
    pub fn skip_after(mut self, count: u32) -> Result<Self> {
        if count > 0 {
            let Some(idx) = self.row_idx else {
                return Err(Error::Structural(
                    "no rows are defined; call row() first".to_string(),
                ));
            };
            self.rows[idx].properties.set("skipAfter", count);
        }
        Ok(self)
    }

    /// Start a nested table in a fresh cell of this table.
    ///
    /// The returned table is the nested one; this table is suspended
    /// inside it until [`end`](Self::end) closes the nesting level.
    pub fn table(self) -> Table {
        let host = self.cell();
        Table {
            parent: Some(Box::new(host)),
            ..Table::new()
        }
    }

    /// End the current nesting level, returning the immediate parent with
    /// this table installed in its open cell. At the outermost level this
    /// returns the table unchanged.
    pub fn end(mut self) -> Table {
        match self.parent.take() {
            Some(mut parent) => {
                parent
                    .current_cell_mut()
                    .unwrap()
                    .elements
                    .push(Element::Table(self));
                *parent
            },
            None => self,
        }
    }

    /// End every open nesting level, returning the outermost table.
    pub fn end_all(mut self) -> Table {
        while self.parent.is_some() {
            self = self.end();
        }
        self
    }

    /// The table-level properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The grid column widths, in inches, in definition order.
    pub fn grid_cols(&self) -> &[f64] {
        &self.grid
    }

    /// The rows, in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn current_cell_mut(&mut self) -> Option<&mut Cell> {
        let idx = self.row_idx?;
        self.rows[idx].cells.last_mut()
    }
}
