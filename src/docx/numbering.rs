//! Numbering definitions for generated documents.
//!
//! Saving writes a placeholder `word/numbering.xml`; [`patch_numbering`]
//! then rewrites the archive with the full definitions. The full part
//! carries two abstract families: a nine-level cascading decimal outline
//! for headings and a single-level bullet for lists, plus the concrete
//! instances that styles reference.
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::common::error::{Error, Result};
use crate::opc::constants::namespace;

/// Concrete numbering id used by bullet list paragraphs.
pub const BULLET_NUM_ID: u32 = 1;

/// Concrete numbering id pre-registered for a heading level (1-based).
pub fn heading_num_id(level: u8) -> u32 {
    u32::from(level) + 1
}

/// Font sizes in half-points for the nine outline levels.
const OUTLINE_SIZES: [u32; 9] = [44, 36, 32, 28, 24, 24, 24, 24, 24];

/// Placeholder numbering part written at save time.
pub(crate) fn placeholder_numbering_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:numbering xmlns:w=\"{}\"/>",
        namespace::WML_MAIN
    )
}

/// The full numbering part.
pub fn numbering_xml() -> String {
    let mut xml = String::with_capacity(8192);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml.push_str(&format!("<w:numbering xmlns:w=\"{}\">", namespace::WML_MAIN));

    // Abstract 0: cascading decimal outline, %1. through %1.%2.[...]%9.
    xml.push_str("<w:abstractNum w:abstractNumId=\"0\">");
    xml.push_str("<w:multiLevelType w:val=\"multilevel\"/>");
    let mut lvl_text = String::new();
    for level in 0..9u32 {
        lvl_text.push_str(&format!("%{}.", level + 1));
        let size = OUTLINE_SIZES[level as usize];
        xml.push_str(&format!(
            concat!(
                "<w:lvl w:ilvl=\"{ilvl}\">",
                "<w:start w:val=\"1\"/>",
                "<w:numFmt w:val=\"decimal\"/>",
                "<w:lvlText w:val=\"{text}\"/>",
                "<w:lvlJc w:val=\"left\"/>",
                "<w:pPr><w:ind w:left=\"0\" w:hanging=\"0\"/></w:pPr>",
                "<w:rPr><w:rFonts w:eastAsia=\"宋体\"/><w:b/>",
                "<w:sz w:val=\"{size}\"/><w:color w:val=\"000000\"/></w:rPr>",
                // One space between the number and the heading text, no
                // tab stop.
                "<w:suff w:val=\"space\"/>",
                "</w:lvl>"
            ),
            ilvl = level,
            text = lvl_text,
            size = size,
        ));
    }
    xml.push_str("</w:abstractNum>");

    // Abstract 1: single-level bullet.
    xml.push_str("<w:abstractNum w:abstractNumId=\"1\">");
    xml.push_str("<w:multiLevelType w:val=\"singleLevel\"/>");
    xml.push_str(concat!(
        "<w:lvl w:ilvl=\"0\">",
        "<w:start w:val=\"1\"/>",
        "<w:numFmt w:val=\"bullet\"/>",
        "<w:lvlText w:val=\"\u{2022}\"/>",
        "<w:lvlJc w:val=\"left\"/>",
        "<w:pPr><w:ind w:left=\"720\" w:hanging=\"360\"/></w:pPr>",
        "<w:rPr><w:rFonts w:ascii=\"Symbol\" w:hAnsi=\"Symbol\" w:hint=\"default\"/></w:rPr>",
        "</w:lvl>"
    ));
    xml.push_str("</w:abstractNum>");

    // numId 1 is the bullet instance, 2 through 10 share the outline.
    xml.push_str(&format!(
        "<w:num w:numId=\"{}\"><w:abstractNumId w:val=\"1\"/></w:num>",
        BULLET_NUM_ID
    ));
    for num_id in 2..=10u32 {
        xml.push_str(&format!(
            "<w:num w:numId=\"{}\"><w:abstractNumId w:val=\"0\"/></w:num>",
            num_id
        ));
    }
    xml.push_str("</w:numbering>");
    xml
}

/// Replace the placeholder numbering part of a saved `.docx` with the full
/// definitions.
///
/// The archive is rewritten next to the original and swapped in with a
/// rename, so the file on disk is always a complete package.
pub fn patch_numbering(path: &Path) -> Result<()> {
    let file = std::fs::File::open(path)?;
    let mut archive = ZipArchive::new(std::io::BufReader::new(file))?;
    if archive.by_name("word/numbering.xml").is_err() {
        return Err(Error::NumberingPatch(format!(
            "{} has no word/numbering.xml part",
            path.display()
        )));
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(parent)?;
    let mut writer = ZipWriter::new(temp);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        writer.start_file(&name, options)?;
        if name == "word/numbering.xml" {
            writer.write_all(numbering_xml().as_bytes())?;
        } else {
            let mut blob = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut blob)?;
            writer.write_all(&blob)?;
        }
    }
    let temp = writer.finish()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
