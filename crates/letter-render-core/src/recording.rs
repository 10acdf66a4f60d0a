use crate::error::RenderError;
use crate::sink::{DocumentSink, validate_table};
use refletter_idf::Block;

/// A sink that captures blocks instead of rendering them.
///
/// Used by tests to assert on the exact block sequence a composer emits.
/// It enforces the same lifecycle and geometry rules as the real backends
/// so misuse shows up in tests too.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub blocks: Vec<Block>,
    open: bool,
    finished: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The texts of all recorded paragraphs, in order.
    pub fn paragraph_texts(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The recorded tables, in order.
    pub fn tables(&self) -> Vec<&refletter_idf::Table> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

impl DocumentSink for RecordingSink {
    fn begin(&mut self) -> Result<(), RenderError> {
        if self.open {
            return Err(RenderError::Other("document already started".into()));
        }
        self.open = true;
        Ok(())
    }

    fn add_block(&mut self, block: &Block) -> Result<(), RenderError> {
        if !self.open {
            return Err(RenderError::Other("document not started".into()));
        }
        if let Block::Table(table) = block {
            validate_table(table)?;
        }
        self.blocks.push(block.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if !self.open {
            return Err(RenderError::Other("document not started".into()));
        }
        if self.finished {
            return Err(RenderError::Other("document already finished".into()));
        }
        self.finished = true;
        Ok(())
    }
}
