//! Style part generation for produced documents.
//!
//! The generated style table carries Normal, Heading1 through Heading9 and
//! ListBullet. Every heading style is pre-wired to its outline numbering
//! instance so multi-level heading numbers work without touching the
//! paragraphs that use them.
use std::fmt::Write as FmtWrite;

use crate::common::error::{Error, Result};
use crate::common::xml::escape_xml;
use crate::docx::numbering::{BULLET_NUM_ID, heading_num_id};
use crate::opc::constants::namespace;

/// Font sizes in half-points for Heading1 through Heading9.
const HEADING_SIZES: [u32; 9] = [44, 36, 32, 28, 24, 24, 24, 24, 24];

/// Generate the `word/styles.xml` part.
pub fn generate_styles_xml(east_asian_font: &str) -> Result<String> {
    let font = escape_xml(east_asian_font);
    let mut xml = String::with_capacity(8192);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    write!(xml, "<w:styles xmlns:w=\"{}\">", namespace::WML_MAIN)
        .map_err(|e| Error::Xml(e.to_string()))?;

    write!(
        xml,
        concat!(
            "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">",
            "<w:name w:val=\"Normal\"/>",
            "<w:rPr><w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:eastAsia=\"{font}\"/>",
            "<w:sz w:val=\"24\"/><w:szCs w:val=\"24\"/></w:rPr>",
            "</w:style>"
        ),
        font = font
    )
    .map_err(|e| Error::Xml(e.to_string()))?;

    for level in 1..=9u8 {
        let size = HEADING_SIZES[usize::from(level) - 1];
        write!(
            xml,
            concat!(
                "<w:style w:type=\"paragraph\" w:styleId=\"Heading{level}\">",
                "<w:name w:val=\"heading {level}\"/>",
                "<w:basedOn w:val=\"Normal\"/>",
                "<w:pPr>",
                "<w:outlineLvl w:val=\"{outline}\"/>",
                "<w:numPr><w:ilvl w:val=\"{outline}\"/><w:numId w:val=\"{num_id}\"/></w:numPr>",
                "</w:pPr>",
                "<w:rPr><w:b/><w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/></w:rPr>",
                "</w:style>"
            ),
            level = level,
            outline = level - 1,
            num_id = heading_num_id(level),
            size = size,
        )
        .map_err(|e| Error::Xml(e.to_string()))?;
    }

    write!(
        xml,
        concat!(
            "<w:style w:type=\"paragraph\" w:styleId=\"ListBullet\">",
            "<w:name w:val=\"List Bullet\"/>",
            "<w:basedOn w:val=\"Normal\"/>",
            "<w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{num_id}\"/></w:numPr></w:pPr>",
            "</w:style>"
        ),
        num_id = BULLET_NUM_ID
    )
    .map_err(|e| Error::Xml(e.to_string()))?;

    xml.push_str("</w:styles>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_styles() {
        let xml = generate_styles_xml("宋体").unwrap();
        assert_eq!(xml.matches("w:type=\"paragraph\"").count(), 11);
        // Heading3 sits at outline level 2 and references numId 4.
        assert!(xml.contains(
            "<w:style w:type=\"paragraph\" w:styleId=\"Heading3\"><w:name w:val=\"heading 3\"/>"
        ));
        assert!(xml.contains(
            "<w:outlineLvl w:val=\"2\"/><w:numPr><w:ilvl w:val=\"2\"/><w:numId w:val=\"4\"/></w:numPr>"
        ));
        assert!(xml.contains("w:styleId=\"ListBullet\""));
        assert!(xml.contains("<w:numId w:val=\"1\"/></w:numPr></w:pPr></w:style></w:styles>"));
        assert!(xml.contains("w:eastAsia=\"宋体\""));
    }
}
