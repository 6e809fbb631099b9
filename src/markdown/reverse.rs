//! Reverse conversion: Markdown text to document packages.
use std::path::Path;

use tempfile::NamedTempFile;

use crate::common::error::{Error, Result};
use crate::docx::numbering::{BULLET_NUM_ID, patch_numbering};
use crate::docx::writer::{MutableDocument, MutableParagraph, MutableRun};
use crate::markdown::config::DocxOptions;
use crate::markdown::parser::{Line, classify};

/// Font sizes in points for heading levels 1 through 6.
const HEADING_PT: [u32; 6] = [22, 18, 16, 14, 12, 12];
const BODY_PT: u32 = 12;
const TEXT_COLOR: &str = "000000";

/// Builds document packages from markup text.
pub struct MarkdownToDocx {
    options: DocxOptions,
}

impl MarkdownToDocx {
    pub fn new(options: DocxOptions) -> Self {
        Self { options }
    }

    /// Build a document from markup text. One paragraph per non-blank
    /// line.
    pub fn convert_str(&self, markup: &str) -> Result<MutableDocument> {
        let mut doc = MutableDocument::new(&self.options.east_asian_font);
        for raw in markup.lines() {
            match classify(raw) {
                Line::Heading { level, text } => doc.push(self.heading(level, &text)),
                Line::ListItem(text) => doc.push(self.list_item(&text)),
                Line::Text(text) => doc.push(self.body(&text)),
                Line::Blank => {},
            }
        }
        Ok(doc)
    }

    /// Convert a markup file into a `.docx` package at `output`.
    ///
    /// The package is assembled and numbering-patched in a temporary file
    /// and moved into place only when complete.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<()> {
        if !input.exists() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }
        let markup = std::fs::read_to_string(input)?;
        let doc = self.convert_str(&markup)?;

        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(parent)?;
        doc.save(temp.path())?;
        patch_numbering(temp.path())?;
        temp.persist(output).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    fn run(&self, text: &str) -> MutableRun {
        MutableRun::new(text)
            .italic(false)
            .font(self.options.east_asian_font.clone())
            .color(TEXT_COLOR)
    }

    fn heading(&self, level: u8, text: &str) -> MutableParagraph {
        let idx = usize::from(level) - 1;
        let before = if level <= 3 { 6 } else { 0 };
        MutableParagraph::new()
            .style(format!("Heading{level}"))
            .spacing_pt(before, 0)
            .run(self.run(text).bold(true).size_pt(HEADING_PT[idx]))
    }

    fn body(&self, text: &str) -> MutableParagraph {
        MutableParagraph::new()
            .style("Normal")
            .spacing_pt(0, 0)
            .run(self.run(text).size_pt(BODY_PT))
    }

    fn list_item(&self, text: &str) -> MutableParagraph {
        // The style already carries the bullet numbering, but it is
        // repeated on the paragraph so the bullet survives style
        // re-mapping by editors.
        MutableParagraph::new()
            .style("ListBullet")
            .numbering(0, BULLET_NUM_ID)
            .run(self.run(text).size_pt(BODY_PT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::package::Package;
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::io::Read;

    fn converter() -> MarkdownToDocx {
        MarkdownToDocx::new(DocxOptions::default())
    }

    #[test]
    fn test_blank_lines_produce_no_paragraphs() {
        let doc = converter()
            .convert_str("# Title\n\nBody text\n\n- item one\n- item two\n")
            .unwrap();
        assert_eq!(doc.len(), 4);
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<w:pStyle w:val=\"Heading1\"/>"));
        assert_eq!(xml.matches("<w:pStyle w:val=\"ListBullet\"/>").count(), 2);
        assert_eq!(
            xml.matches(&format!(
                "<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{BULLET_NUM_ID}\"/></w:numPr>"
            ))
            .count(),
            2
        );
    }

    #[test]
    fn test_heading_formatting() {
        let doc = converter().convert_str("### Section\n").unwrap();
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<w:spacing w:before=\"120\" w:after=\"0\"/>"));
        assert!(xml.contains("<w:sz w:val=\"32\"/>"));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:i w:val=\"0\"/>"));
        assert!(xml.contains("w:eastAsia=\"宋体\""));
        assert!(xml.contains("<w:color w:val=\"000000\"/>"));
    }

    #[test]
    fn test_body_spacing_zeroed() {
        let doc = converter().convert_str("#### Deep\nplain\n").unwrap();
        let xml = doc.to_xml().unwrap();
        assert_eq!(
            xml.matches("<w:spacing w:before=\"0\" w:after=\"0\"/>").count(),
            2
        );
    }

    #[test]
    fn test_convert_file_patches_numbering() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.md");
        std::fs::write(&input, "# Title\n\n- a\n- b\n").unwrap();
        let output = dir.path().join("out.docx");

        converter().convert_file(&input, &output).unwrap();

        let pkg = Package::open(&output).unwrap();
        assert_eq!(pkg.document().unwrap().blocks().len(), 3);

        // The saved numbering part is the full patched definition.
        let file = std::fs::File::open(&output).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut content = String::new();
        archive
            .by_name("word/numbering.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        let mut reader = Reader::from_reader(content.as_bytes());
        let (mut abstracts, mut nums) = (0, 0);
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"abstractNum" => abstracts += 1,
                    b"num" => nums += 1,
                    _ => {},
                },
                Event::Eof => break,
                _ => {},
            }
        }
        assert_eq!(abstracts, 2);
        assert_eq!(nums, 10);
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = converter()
            .convert_file(Path::new("/no/such.md"), &dir.path().join("out.docx"))
            .unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }
}
