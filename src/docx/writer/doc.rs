//! Document assembly and package writing.
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::common::error::{Error, Result};
use crate::docx::numbering::placeholder_numbering_xml;
use crate::docx::writer::paragraph::MutableParagraph;
use crate::docx::writer::styles::generate_styles_xml;
use crate::opc::constants::{content_type, namespace, rel_type};

/// A document being built for writing.
pub struct MutableDocument {
    paragraphs: Vec<MutableParagraph>,
    east_asian_font: String,
}

impl MutableDocument {
    pub fn new(east_asian_font: impl Into<String>) -> Self {
        Self {
            paragraphs: Vec::new(),
            east_asian_font: east_asian_font.into(),
        }
    }

    pub fn push(&mut self, paragraph: MutableParagraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// The main document part's XML.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096 + self.paragraphs.len() * 256);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        write!(
            xml,
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\"><w:body>",
            namespace::WML_MAIN,
            namespace::OFFICE_RELATIONSHIPS
        )
        .map_err(|e| Error::Xml(e.to_string()))?;
        for paragraph in &self.paragraphs {
            paragraph.to_xml(&mut xml)?;
        }
        xml.push_str("<w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/></w:sectPr>");
        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }

    /// Write the document as a complete `.docx` package.
    ///
    /// The numbering part written here is a placeholder; callers that need
    /// the full definitions patch it afterwards.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = ZipWriter::new(std::io::BufWriter::new(file));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        writer.start_file("[Content_Types].xml", options)?;
        writer.write_all(content_types_xml().as_bytes())?;

        writer.start_file("_rels/.rels", options)?;
        writer.write_all(package_rels_xml().as_bytes())?;

        writer.start_file("word/_rels/document.xml.rels", options)?;
        writer.write_all(document_rels_xml().as_bytes())?;

        writer.start_file("word/document.xml", options)?;
        writer.write_all(self.to_xml()?.as_bytes())?;

        writer.start_file("word/styles.xml", options)?;
        writer.write_all(generate_styles_xml(&self.east_asian_font)?.as_bytes())?;

        writer.start_file("word/numbering.xml", options)?;
        writer.write_all(placeholder_numbering_xml().as_bytes())?;

        writer.finish()?.flush()?;
        Ok(())
    }
}

fn content_types_xml() -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
            "<Types xmlns=\"{ns}\">",
            "<Default Extension=\"rels\" ContentType=\"{rels}\"/>",
            "<Default Extension=\"xml\" ContentType=\"{xml}\"/>",
            "<Override PartName=\"/word/document.xml\" ContentType=\"{doc}\"/>",
            "<Override PartName=\"/word/styles.xml\" ContentType=\"{styles}\"/>",
            "<Override PartName=\"/word/numbering.xml\" ContentType=\"{numbering}\"/>",
            "</Types>"
        ),
        ns = namespace::CONTENT_TYPES,
        rels = content_type::OPC_RELATIONSHIPS,
        xml = content_type::XML,
        doc = content_type::WML_DOCUMENT_MAIN,
        styles = content_type::WML_STYLES,
        numbering = content_type::WML_NUMBERING,
    )
}

fn package_rels_xml() -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
            "<Relationships xmlns=\"{ns}\">",
            "<Relationship Id=\"rId1\" Type=\"{reltype}\" Target=\"word/document.xml\"/>",
            "</Relationships>"
        ),
        ns = namespace::PACKAGE_RELATIONSHIPS,
        reltype = rel_type::OFFICE_DOCUMENT,
    )
}

fn document_rels_xml() -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
            "<Relationships xmlns=\"{ns}\">",
            "<Relationship Id=\"rId1\" Type=\"{styles}\" Target=\"styles.xml\"/>",
            "<Relationship Id=\"rId2\" Type=\"{numbering}\" Target=\"numbering.xml\"/>",
            "</Relationships>"
        ),
        ns = namespace::PACKAGE_RELATIONSHIPS,
        styles = rel_type::STYLES,
        numbering = rel_type::NUMBERING,
    )
}
