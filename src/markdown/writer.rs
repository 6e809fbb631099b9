//! Forward conversion: document packages to Markdown text.
use std::path::Path;

use crate::common::error::Result;
use crate::docx::document::Block;
use crate::docx::package::Package;
use crate::docx::paragraph::Paragraph;
use crate::docx::styles::Styles;
use crate::docx::table::Table;
use crate::markdown::assets::AssetExtractor;
use crate::markdown::config::MarkdownOptions;
use crate::markdown::heading::HeadingResolver;
use crate::markdown::token::{Token, Tokens, render_inline, visible_text};

/// Renders a parsed package as Markdown, writing image assets alongside
/// the output file.
pub struct MarkdownWriter {
    resolver: HeadingResolver,
}

impl MarkdownWriter {
    pub fn new(options: &MarkdownOptions) -> Self {
        Self {
            resolver: HeadingResolver::new(options.heuristic_headings),
        }
    }

    /// Convert a package to Markdown text.
    ///
    /// `output_path` determines where image assets land; the text itself
    /// is returned, not written.
    pub fn convert(&self, pkg: &Package, output_path: &Path) -> Result<String> {
        let document = pkg.document()?;
        let styles = pkg.styles()?;
        let mut assets = AssetExtractor::new(pkg, output_path);

        // Each unit is a complete block with no trailing newline; units
        // are joined by one blank line.
        let mut units: Vec<String> = Vec::new();
        let mut last_is_table = false;
        for block in document.blocks() {
            match block {
                Block::Paragraph(p) => {
                    if let Some(unit) = self.paragraph_unit(p, &styles, &mut assets)? {
                        units.push(unit);
                        last_is_table = false;
                    }
                },
                Block::Table(t) => {
                    if let Some(unit) = table_unit(t, &mut assets)? {
                        units.push(unit);
                        last_is_table = true;
                    }
                },
            }
        }

        if units.is_empty() {
            return Ok(String::new());
        }
        let mut out = units.join("\n\n");
        out.push('\n');
        if last_is_table {
            out.push('\n');
        }
        Ok(out)
    }

    fn paragraph_unit(
        &self,
        paragraph: &Paragraph,
        styles: &Styles,
        assets: &mut AssetExtractor<'_>,
    ) -> Result<Option<String>> {
        let tokens = collect_tokens(paragraph, assets)?;
        if tokens.is_empty() {
            return Ok(None);
        }

        if let Some(level) = self.resolver.resolve(paragraph, styles)? {
            let text = visible_text(&tokens);
            let text = text.trim();
            if !text.is_empty() {
                let mut unit = format!("{} {}", "#".repeat(usize::from(level)), text);
                // Images inside a heading go on their own lines below it.
                for token in &tokens {
                    if let Token::Image { path, label } = token {
                        unit.push_str(&format!("\n![{label}]({path})"));
                    }
                }
                return Ok(Some(unit));
            }
        }

        let line = render_inline(&tokens);
        // A run that holds only whitespace renders an effectively empty
        // paragraph; image markers always render visible characters.
        if line.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Flatten a paragraph's runs into tokens, resolving image references.
/// Unresolvable images are dropped.
fn collect_tokens(
    paragraph: &Paragraph,
    assets: &mut AssetExtractor<'_>,
) -> Result<Tokens> {
    let mut tokens = Tokens::new();
    for run in paragraph.runs()? {
        let text = run.text()?;
        if !text.is_empty() {
            tokens.push(Token::Text(text));
        }
        for r_id in run.image_refs()? {
            let (path, label) = assets.resolve(&r_id)?;
            if !path.is_empty() {
                tokens.push(Token::Image { path, label });
            }
        }
    }
    Ok(tokens)
}

/// Render a table as pipe rows with one separator after the first row.
/// Zero-row tables produce nothing.
fn table_unit(table: &Table, assets: &mut AssetExtractor<'_>) -> Result<Option<String>> {
    let rows = table.rows()?;
    if rows.is_empty() {
        return Ok(None);
    }

    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        let cells = row.cells()?;
        let mut rendered = Vec::with_capacity(cells.len());
        for cell in &cells {
            rendered.push(cell_text(cell, assets)?);
        }
        lines.push(format!("| {} |", rendered.join(" | ")));
        if i == 0 {
            let separator: Vec<&str> = std::iter::repeat_n("---", cells.len()).collect();
            lines.push(format!("| {} |", separator.join(" | ")));
        }
    }
    Ok(Some(lines.join("\n")))
}

/// A cell's content on one line: paragraph tokens rendered individually,
/// non-empty paragraphs joined with a `<br>` marker, pipes escaped.
fn cell_text(cell: &crate::docx::table::Cell, assets: &mut AssetExtractor<'_>) -> Result<String> {
    let mut parts: Vec<String> = Vec::new();
    for paragraph in cell.paragraphs()? {
        let tokens = collect_tokens(&paragraph, assets)?;
        let line = render_inline(&tokens);
        if !line.is_empty() {
            parts.push(line);
        }
    }
    Ok(parts.join("<br>").replace('|', "\\|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::config::MarkdownOptions;

    fn para(xml: &str) -> Paragraph {
        Paragraph::new(xml.as_bytes().to_vec())
    }

    fn writer() -> MarkdownWriter {
        MarkdownWriter::new(&MarkdownOptions::new())
    }

    fn dummy_pkg() -> Package {
        // A package is only needed by the asset extractor; none of these
        // tests resolve images.
        use std::io::{Cursor, Write};
        use zip::ZipWriter;
        use zip::write::SimpleFileOptions;
        let mut zw = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zw.start_file("[Content_Types].xml", options).unwrap();
        write!(
            zw,
            r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#
        )
        .unwrap();
        zw.start_file("_rels/.rels", options).unwrap();
        write!(
            zw,
            r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#
        )
        .unwrap();
        zw.start_file("word/document.xml", options).unwrap();
        write!(
            zw,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body/></w:document>"#
        )
        .unwrap();
        Package::from_reader(zw.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_heading_and_body_units() {
        let pkg = dummy_pkg();
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("doc.md");
        let mut assets = AssetExtractor::new(&pkg, &out);
        let w = writer();
        let styles = Styles::empty();

        let heading = para(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t> Setup </w:t></w:r></w:p>"#,
        );
        let unit = w.paragraph_unit(&heading, &styles, &mut assets).unwrap();
        assert_eq!(unit.as_deref(), Some("## Setup"));

        let body = para(r#"<w:p><w:r><w:t>plain text</w:t></w:r></w:p>"#);
        let unit = w.paragraph_unit(&body, &styles, &mut assets).unwrap();
        assert_eq!(unit.as_deref(), Some("plain text"));

        let empty = para(r#"<w:p/>"#);
        assert!(w.paragraph_unit(&empty, &styles, &mut assets).unwrap().is_none());
        assert!(!assets.wrote_assets());
    }

    #[test]
    fn test_whitespace_only_paragraph_dropped() {
        let pkg = dummy_pkg();
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("doc.md");
        let mut assets = AssetExtractor::new(&pkg, &out);
        let w = writer();
        let styles = Styles::empty();

        let blank = para(
            r#"<w:p><w:r><w:t xml:space="preserve"> </w:t></w:r></w:p>"#,
        );
        assert!(w.paragraph_unit(&blank, &styles, &mut assets).unwrap().is_none());

        let split = para(
            r#"<w:p><w:r><w:t xml:space="preserve">  </w:t></w:r><w:r><w:t xml:space="preserve"> </w:t></w:r></w:p>"#,
        );
        assert!(w.paragraph_unit(&split, &styles, &mut assets).unwrap().is_none());
    }

    #[test]
    fn test_blank_paragraph_between_bodies() {
        let pkg = dummy_pkg();
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("doc.md");
        let mut assets = AssetExtractor::new(&pkg, &out);
        let w = writer();
        let styles = Styles::empty();

        let mut units = Vec::new();
        for xml in [
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t xml:space="preserve"> </w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        ] {
            if let Some(unit) = w.paragraph_unit(&para(xml), &styles, &mut assets).unwrap() {
                units.push(unit);
            }
        }
        assert_eq!(units.join("\n\n") + "\n", "before\n\nafter\n");
    }

    #[test]
    fn test_table_shape() {
        let pkg = dummy_pkg();
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("doc.md");
        let mut assets = AssetExtractor::new(&pkg, &out);

        let table = Table::new(
            br#"<w:tbl>
                <w:tr><w:tc><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Qty</w:t></w:r></w:p></w:tc></w:tr>
                <w:tr><w:tc><w:p><w:r><w:t>a|b</w:t></w:r></w:p><w:p><w:r><w:t>second</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>3</w:t></w:r></w:p></w:tc></w:tr>
            </w:tbl>"#
                .to_vec(),
        );
        let unit = table_unit(&table, &mut assets).unwrap().unwrap();
        let lines: Vec<&str> = unit.lines().collect();
        // 2 data rows plus 1 separator, each with 3 pipes.
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.matches('|').count() - line.matches("\\|").count(), 3);
        }
        assert_eq!(lines[1], "| --- | --- |");
        assert_eq!(lines[2], "| a\\|b<br>second | 3 |");
    }

    #[test]
    fn test_image_dedup_across_relationship_ids() {
        use std::io::{Cursor, Write};
        use zip::ZipWriter;
        use zip::write::SimpleFileOptions;

        let mut zw = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zw.start_file("[Content_Types].xml", options).unwrap();
        write!(
            zw,
            r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#
        )
        .unwrap();
        zw.start_file("_rels/.rels", options).unwrap();
        write!(
            zw,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#
        )
        .unwrap();
        zw.start_file("word/_rels/document.xml.rels", options).unwrap();
        write!(
            zw,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId10" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/><Relationship Id="rId11" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/></Relationships>"#
        )
        .unwrap();
        zw.start_file("word/document.xml", options).unwrap();
        write!(
            zw,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:drawing><a:blip r:embed="rId10"/></w:drawing></w:r></w:p><w:p><w:r><w:drawing><a:blip r:embed="rId11"/></w:drawing></w:r></w:p></w:body></w:document>"#
        )
        .unwrap();
        zw.start_file("word/media/image1.png", options).unwrap();
        zw.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        let pkg = Package::from_reader(zw.finish().unwrap()).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("doc.md");
        let text = writer().convert(&pkg, &out).unwrap();

        let asset_dir = dir.path().join("doc_images");
        let files: Vec<_> = std::fs::read_dir(&asset_dir).unwrap().collect();
        assert_eq!(files.len(), 1);
        assert_eq!(
            text.matches("![image_001](doc_images/image_001.png)").count(),
            2
        );
    }

    #[test]
    fn test_heading_with_image_gets_standalone_link() {
        use std::io::{Cursor, Write};
        use zip::ZipWriter;
        use zip::write::SimpleFileOptions;

        let mut zw = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zw.start_file("[Content_Types].xml", options).unwrap();
        write!(
            zw,
            r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#
        )
        .unwrap();
        zw.start_file("_rels/.rels", options).unwrap();
        write!(
            zw,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#
        )
        .unwrap();
        zw.start_file("word/_rels/document.xml.rels", options).unwrap();
        write!(
            zw,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/></Relationships>"#
        )
        .unwrap();
        zw.start_file("word/document.xml", options).unwrap();
        write!(
            zw,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Overview</w:t></w:r><w:r><w:drawing><a:blip r:embed="rId5"/></w:drawing></w:r></w:p></w:body></w:document>"#
        )
        .unwrap();
        zw.start_file("word/media/image1.png", options).unwrap();
        zw.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        let pkg = Package::from_reader(zw.finish().unwrap()).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("doc.md");
        let text = writer().convert(&pkg, &out).unwrap();

        // The image link sits on its own line directly under the heading.
        assert_eq!(text, "## Overview\n![image_001](doc_images/image_001.png)\n");
        assert!(dir.path().join("doc_images/image_001.png").exists());
    }

    #[test]
    fn test_empty_table_produces_nothing() {
        let pkg = dummy_pkg();
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("doc.md");
        let mut assets = AssetExtractor::new(&pkg, &out);
        let table = Table::new(b"<w:tbl><w:tblPr/></w:tbl>".to_vec());
        assert!(table_unit(&table, &mut assets).unwrap().is_none());
    }
}
