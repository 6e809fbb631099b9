//! Document body model: an ordered sequence of block-level elements.
use crate::common::error::Result;
use crate::common::xml::capture_children;
use crate::docx::paragraph::Paragraph;
use crate::docx::table::Table;

/// A block-level element in the document body.
#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// The parsed main document part: the body's block sequence in document
/// order. Section properties and other non-block children are skipped.
#[derive(Debug, Clone)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Parse the XML of a main document part (`word/document.xml`).
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let blocks = capture_children(xml, b"body", &[b"p", b"tbl"])?
            .into_iter()
            .map(|c| match c.which {
                0 => Block::Paragraph(Paragraph::new(c.xml)),
                _ => Block::Table(Table::new(c.xml)),
            })
            .collect();
        Ok(Self { blocks })
    }

    /// The body's blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_blocks() {
        let xml = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p><w:r><w:t>first</w:t></w:r></w:p>
                <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
                <w:p><w:r><w:t>last</w:t></w:r></w:p>
                <w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>
            </w:body>
        </w:document>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.blocks().len(), 3);
        match &doc.blocks()[0] {
            Block::Paragraph(p) => assert_eq!(p.text().unwrap(), "first"),
            Block::Table(_) => panic!("expected paragraph"),
        }
        assert!(matches!(doc.blocks()[1], Block::Table(_)));
        match &doc.blocks()[2] {
            Block::Paragraph(p) => assert_eq!(p.text().unwrap(), "last"),
            Block::Table(_) => panic!("expected paragraph"),
        }
    }
}
