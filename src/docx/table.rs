//! Table structures for Word documents.
//!
//! `<w:tbl>`, `<w:tr>` and `<w:tc>` are each kept as raw XML fragments and
//! split into their children on demand. Nested tables stay inside the cell
//! paragraphs of their containing cell and are not descended into.
use crate::common::error::Result;
use crate::common::xml::capture_children;
use crate::docx::paragraph::Paragraph;

/// A table in a Word document (`<w:tbl>`).
#[derive(Debug, Clone)]
pub struct Table {
    xml: Vec<u8>,
}

impl Table {
    /// Create a Table from the XML of a `<w:tbl>` element.
    pub fn new(xml: Vec<u8>) -> Self {
        Self { xml }
    }

    /// The rows of this table, in document order.
    pub fn rows(&self) -> Result<Vec<Row>> {
        Ok(capture_children(&self.xml, b"tbl", &[b"tr"])?
            .into_iter()
            .map(|c| Row::new(c.xml))
            .collect())
    }
}

/// A table row (`<w:tr>`).
#[derive(Debug, Clone)]
pub struct Row {
    xml: Vec<u8>,
}

impl Row {
    pub fn new(xml: Vec<u8>) -> Self {
        Self { xml }
    }

    /// The cells of this row, in document order.
    pub fn cells(&self) -> Result<Vec<Cell>> {
        Ok(capture_children(&self.xml, b"tr", &[b"tc"])?
            .into_iter()
            .map(|c| Cell::new(c.xml))
            .collect())
    }
}

/// A table cell (`<w:tc>`).
#[derive(Debug, Clone)]
pub struct Cell {
    xml: Vec<u8>,
}

impl Cell {
    pub fn new(xml: Vec<u8>) -> Self {
        Self { xml }
    }

    /// The paragraphs directly inside this cell.
    pub fn paragraphs(&self) -> Result<Vec<Paragraph>> {
        Ok(capture_children(&self.xml, b"tc", &[b"p"])?
            .into_iter()
            .map(|c| Paragraph::new(c.xml))
            .collect())
    }
}
