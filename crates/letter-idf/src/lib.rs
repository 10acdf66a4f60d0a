//! Intermediate block format.
//!
//! This crate defines the in-memory representation of a letter's typeset
//! content after composition but before it is handed to a document sink:
//! paragraphs with a font and an alignment, spacer lines, and weighted
//! tables with column-spanning cells.

/// Horizontal alignment of a paragraph within the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Font selection for a run of text. The letter uses a single base face,
/// so point size is the only axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
}

impl FontSpec {
    pub const fn new(size: f32) -> Self {
        Self { size }
    }
}

/// One unit of layout content submitted to a document sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// One blank body line.
    Spacer,
    Table(Table),
}

impl Block {
    /// Returns a string identifier for the block type, used in sink
    /// diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Spacer => "spacer",
            Block::Table(_) => "table",
        }
    }

    pub fn paragraph(text: impl Into<String>, font: FontSpec, align: Alignment) -> Self {
        Block::Paragraph(Paragraph { text: text.into(), font, align })
    }
}

/// A single-font, single-alignment run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub font: FontSpec,
    pub align: Alignment,
}

/// A ruled table. Column widths are relative weights applied over
/// `width_percent` of the usable page width.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub column_weights: Vec<u32>,
    pub width_percent: f32,
    pub padding: f32,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// A full-width table with the given column weights and a small
    /// default cell padding.
    pub fn new(column_weights: Vec<u32>) -> Self {
        Self { column_weights, width_percent: 100.0, padding: 2.0, rows: Vec::new() }
    }

    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn column_count(&self) -> usize {
        self.column_weights.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(mut self, cell: TableCell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Sum of the column spans of all cells in this row.
    pub fn span_total(&self) -> usize {
        self.cells.iter().map(|c| c.col_span).sum()
    }
}

/// One table cell. `col_span` merges the cell across adjacent columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub font: FontSpec,
    pub col_span: usize,
}

impl TableCell {
    pub fn new(text: impl Into<String>, font: FontSpec) -> Self {
        Self { text: text.into(), font, col_span: 1 }
    }

    pub fn spanning(text: impl Into<String>, font: FontSpec, col_span: usize) -> Self {
        Self { text: text.into(), font, col_span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_span_total_counts_merged_cells() {
        let font = FontSpec::new(10.0);
        let row = TableRow::new()
            .cell(TableCell::new("a", font))
            .cell(TableCell::spanning("b", font, 3));
        assert_eq!(row.span_total(), 4);
    }

    #[test]
    fn table_builder_accumulates_rows() {
        let font = FontSpec::new(10.0);
        let table = Table::new(vec![20, 80])
            .row(TableRow::new().cell(TableCell::new("k", font)).cell(TableCell::new("v", font)));
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows.len(), 1);
        assert!((table.width_percent - 100.0).abs() < f32::EPSILON);
    }
}
