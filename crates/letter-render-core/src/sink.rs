use crate::error::RenderError;
use refletter_idf::{Block, Table};

/// A paginating write target for composed letter content.
///
/// Lifecycle: `begin` once, `add_block` zero or more times in document
/// order, `finish` once. A sink dropped without `finish` must not leave a
/// readable partial artifact behind.
pub trait DocumentSink {
    fn begin(&mut self) -> Result<(), RenderError>;

    fn add_block(&mut self, block: &Block) -> Result<(), RenderError>;

    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Checks a table's geometry before it reaches a backend.
///
/// Every row's column spans must add up to exactly the declared column
/// count, weights must be present and non-zero.
pub fn validate_table(table: &Table) -> Result<(), RenderError> {
    if table.column_weights.is_empty() {
        return Err(RenderError::Malformed("table has no columns".into()));
    }
    if table.column_weights.iter().any(|w| *w == 0) {
        return Err(RenderError::Malformed("table has a zero-weight column".into()));
    }
    let columns = table.column_count();
    for (i, row) in table.rows.iter().enumerate() {
        let total = row.span_total();
        if total != columns {
            return Err(RenderError::Malformed(format!(
                "row {i} spans {total} columns, table declares {columns}"
            )));
        }
        if row.cells.iter().any(|c| c.col_span == 0) {
            return Err(RenderError::Malformed(format!("row {i} has a zero-span cell")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use refletter_idf::{FontSpec, TableCell, TableRow};

    const FONT: FontSpec = FontSpec::new(10.0);

    #[test]
    fn accepts_merged_cells_that_fill_the_row() {
        let table = Table::new(vec![20, 60, 10, 10]).row(
            TableRow::new()
                .cell(TableCell::new("k", FONT))
                .cell(TableCell::spanning("v", FONT, 3)),
        );
        assert!(validate_table(&table).is_ok());
    }

    #[test]
    fn rejects_underfull_rows() {
        let table = Table::new(vec![20, 80]).row(TableRow::new().cell(TableCell::new("k", FONT)));
        let err = validate_table(&table).unwrap_err();
        assert!(matches!(err, RenderError::Malformed(_)));
    }

    #[test]
    fn rejects_zero_weight_columns() {
        let table = Table::new(vec![20, 0]);
        assert!(matches!(validate_table(&table), Err(RenderError::Malformed(_))));
    }
}
