use crate::config::PageConfig;
use crate::text::{encode_utf16_be, text_width, wrap_text};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use refletter_idf::{Alignment, Block, FontSpec, Paragraph, Table};
use refletter_render_core::{DocumentSink, RenderError, validate_table};
use std::io::Write;
use std::mem;

/// Line advance as a multiple of the font size.
const LINE_SPACING: f32 = 1.4;
/// Stroke width of table rules.
const RULE_WIDTH: f32 = 0.5;
/// Internal resource name of the letter face.
const FONT_NAME: &str = "F1";

/// A paginating sink writing an A4 letter PDF through `W`.
///
/// Content is accumulated as page content streams; the PDF object graph is
/// assembled and written in [`DocumentSink::finish`]. Dropping the sink
/// without finishing writes nothing through `W`.
pub struct LetterSink<W: Write> {
    writer: Option<W>,
    config: PageConfig,
    /// Content operations of completed pages.
    pages: Vec<Vec<Operation>>,
    /// Content operations of the page under construction.
    ops: Vec<Operation>,
    cursor_y: f32,
    started: bool,
    finished: bool,
}

impl<W: Write> LetterSink<W> {
    pub fn new(writer: W, config: PageConfig) -> Self {
        let top = config.height - config.margin_top;
        Self {
            writer: Some(writer),
            config,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor_y: top,
            started: false,
            finished: false,
        }
    }

    /// Recovers the writer, e.g. to read back an in-memory buffer.
    pub fn into_inner(self) -> Option<W> {
        self.writer
    }

    fn page_top(&self) -> f32 {
        self.config.height - self.config.margin_top
    }

    fn break_page(&mut self) {
        self.pages.push(mem::take(&mut self.ops));
        self.cursor_y = self.page_top();
    }

    /// Starts a new page when `needed` vertical space does not fit. A
    /// fragment taller than a whole page is rendered from a fresh page
    /// rather than looping.
    fn ensure_room(&mut self, needed: f32) {
        let at_top = (self.cursor_y - self.page_top()).abs() < f32::EPSILON;
        if self.cursor_y - needed < self.config.margin_bottom && !at_top {
            self.break_page();
        }
    }

    fn draw_text(&mut self, text: &str, font: FontSpec, x: f32, baseline: f32) {
        if text.is_empty() {
            return;
        }
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new("Tf", vec![FONT_NAME.into(), font.size.into()]));
        self.ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_utf16_be(text), StringFormat::Hexadecimal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn line_x(&self, line: &str, font: FontSpec, align: Alignment) -> f32 {
        let width = text_width(line, font.size);
        match align {
            Alignment::Left => self.config.margin_left,
            Alignment::Center => {
                self.config.margin_left + (self.config.usable_width() - width) / 2.0
            }
            Alignment::Right => self.config.width - self.config.margin_right - width,
        }
    }

    fn add_paragraph(&mut self, para: &Paragraph) {
        let leading = para.font.size * LINE_SPACING;
        let lines = wrap_text(&para.text, para.font.size, self.config.usable_width());
        for line in lines {
            self.ensure_room(leading);
            let x = self.line_x(&line, para.font, para.align);
            let baseline = self.cursor_y - para.font.size;
            self.draw_text(&line, para.font, x, baseline);
            self.cursor_y -= leading;
        }
    }

    fn add_table(&mut self, table: &Table) -> Result<(), RenderError> {
        validate_table(table)?;

        let total_width = self.config.usable_width() * table.width_percent / 100.0;
        let weight_sum: u32 = table.column_weights.iter().sum();
        let column_widths: Vec<f32> = table
            .column_weights
            .iter()
            .map(|w| total_width * *w as f32 / weight_sum as f32)
            .collect();
        let x0 = self.config.margin_left;
        let padding = table.padding;

        for row in &table.rows {
            // Wrap every cell first so the row height is known up front.
            let mut column = 0usize;
            let mut laid_out = Vec::with_capacity(row.cells.len());
            let mut row_height: f32 = 0.0;
            for cell in &row.cells {
                let x: f32 = x0 + column_widths[..column].iter().sum::<f32>();
                let width: f32 = column_widths[column..column + cell.col_span].iter().sum();
                let lines = wrap_text(&cell.text, cell.font.size, width - 2.0 * padding);
                let leading = cell.font.size * LINE_SPACING;
                row_height = row_height.max(lines.len() as f32 * leading + 2.0 * padding);
                laid_out.push((x, width, cell.font, leading, lines));
                column += cell.col_span;
            }

            self.ensure_room(row_height);
            let y_top = self.cursor_y;
            let y_bottom = y_top - row_height;

            self.ops.push(Operation::new("w", vec![RULE_WIDTH.into()]));
            for (x, width, font, leading, lines) in laid_out {
                self.ops.push(Operation::new(
                    "re",
                    vec![x.into(), y_bottom.into(), width.into(), row_height.into()],
                ));
                self.ops.push(Operation::new("S", vec![]));

                let mut baseline = y_top - padding - font.size;
                for line in lines {
                    self.draw_text(&line, font, x + padding, baseline);
                    baseline -= leading;
                }
            }
            self.cursor_y = y_bottom;
        }
        Ok(())
    }

    /// Assembles the PDF object graph for the accumulated pages and writes
    /// it through the writer.
    fn write_document(&mut self) -> Result<(), RenderError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("writer already taken".into()))?;

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        // Non-embedded CID face; viewers substitute from the Adobe-Japan1
        // collection. Latin maps to the half-width range.
        let descendant_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType0",
            "BaseFont" => "HeiseiMin-W3",
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Japan1"),
                "Supplement" => 2,
            },
            "DW" => 1000,
            "W" => vec![231.into(), 632.into(), 500.into()],
        });
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "HeiseiMin-W3",
            "Encoding" => "UniJIS-UCS2-HW-H",
            "DescendantFonts" => vec![Object::Reference(descendant_id)],
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_NAME => font_id },
        });

        let page_ops = mem::take(&mut self.pages);
        let mut page_ids = Vec::with_capacity(page_ops.len());
        for operations in page_ops {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.0.into(),
                    0.0.into(),
                    self.config.width.into(),
                    self.config.height.into(),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(Object::Reference(page_id));
        }

        let page_count = page_ids.len();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count as i64,
        };
        doc.objects.insert(pages_id, pages_dict.into());

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc.save_to(writer)?;
        writer.flush()?;
        log::debug!("letter written, {page_count} page(s)");
        Ok(())
    }
}

impl<W: Write> DocumentSink for LetterSink<W> {
    fn begin(&mut self) -> Result<(), RenderError> {
        if self.started {
            return Err(RenderError::Other("document already started".into()));
        }
        self.started = true;
        Ok(())
    }

    fn add_block(&mut self, block: &Block) -> Result<(), RenderError> {
        if !self.started {
            return Err(RenderError::Other("document not started".into()));
        }
        if self.finished {
            return Err(RenderError::Other("document already finished".into()));
        }
        match block {
            Block::Paragraph(para) => self.add_paragraph(para),
            Block::Spacer => {
                let height = self.config.spacer_height;
                self.ensure_room(height);
                self.cursor_y -= height;
            }
            Block::Table(table) => self.add_table(table)?,
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if !self.started {
            return Err(RenderError::Other("document not started".into()));
        }
        if self.finished {
            return Err(RenderError::Other("document already finished".into()));
        }
        self.finished = true;
        // The page under construction always ships, so an opened document
        // yields at least one page.
        self.pages.push(mem::take(&mut self.ops));
        self.write_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refletter_idf::{TableCell, TableRow};
    use std::io::Cursor;

    const BODY: FontSpec = FontSpec::new(10.0);

    fn finished_bytes(blocks: &[Block]) -> Vec<u8> {
        let mut sink = LetterSink::new(Cursor::new(Vec::new()), PageConfig::a4());
        sink.begin().unwrap();
        for block in blocks {
            sink.add_block(block).unwrap();
        }
        sink.finish().unwrap();
        sink.into_inner().unwrap().into_inner()
    }

    #[test]
    fn lifecycle_misuse_is_rejected() {
        let mut sink = LetterSink::new(Cursor::new(Vec::new()), PageConfig::a4());
        let block = Block::paragraph("x", BODY, Alignment::Left);
        assert!(matches!(sink.add_block(&block), Err(RenderError::Other(_))));
        sink.begin().unwrap();
        assert!(matches!(sink.begin(), Err(RenderError::Other(_))));
        sink.finish().unwrap();
        assert!(matches!(sink.add_block(&block), Err(RenderError::Other(_))));
        assert!(matches!(sink.finish(), Err(RenderError::Other(_))));
    }

    #[test]
    fn produces_a_loadable_single_page_pdf() {
        let bytes = finished_bytes(&[
            Block::paragraph("紹介状", FontSpec::new(14.0), Alignment::Center),
            Block::Spacer,
            Block::paragraph("本文", BODY, Alignment::Left),
        ]);
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn long_content_breaks_onto_further_pages() {
        let blocks: Vec<Block> = (0..80)
            .map(|i| Block::paragraph(format!("段落{i}"), BODY, Alignment::Left))
            .collect();
        let bytes = finished_bytes(&blocks);
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 2);
    }

    #[test]
    fn bad_table_geometry_is_a_malformed_error() {
        let mut sink = LetterSink::new(Cursor::new(Vec::new()), PageConfig::a4());
        sink.begin().unwrap();
        let table = Table::new(vec![20, 80]).row(TableRow::new().cell(TableCell::new("k", BODY)));
        let err = sink.add_block(&Block::Table(table)).unwrap_err();
        assert!(matches!(err, RenderError::Malformed(_)));
    }

    #[test]
    fn tables_render_with_merged_cells() {
        let table = Table::new(vec![20, 60, 10, 10])
            .row(
                TableRow::new()
                    .cell(TableCell::new("氏名", BODY))
                    .cell(TableCell::new("田中太郎", BODY))
                    .cell(TableCell::new("性別", BODY))
                    .cell(TableCell::new("男", BODY)),
            )
            .row(
                TableRow::new()
                    .cell(TableCell::new("生年月日", BODY))
                    .cell(TableCell::spanning("1980年1月1日 (44 歳)", BODY, 3)),
            );
        let bytes = finished_bytes(&[Block::Table(table)]);
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        // Six cells drawn: six stroked rectangles.
        let ops = Content::decode(&content).unwrap().operations;
        let rects = ops.iter().filter(|op| op.operator == "re").count();
        assert_eq!(rects, 6);
    }
}
