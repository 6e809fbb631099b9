//! Style definitions from `word/styles.xml`.
//!
//! Only the fields the converter consults are kept: the style's id, its
//! display name, and any outline level declared on its paragraph
//! properties. The table is parsed eagerly since it is consulted for every
//! paragraph.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// A single style definition.
#[derive(Debug, Clone, Default)]
pub struct Style {
    style_id: String,
    name: Option<String>,
    outline_level: Option<u8>,
}

impl Style {
    /// The style's id, referenced by `<w:pStyle w:val="..."/>`.
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// The style's display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The outline level declared on the style's paragraph properties.
    pub fn outline_level(&self) -> Option<u8> {
        self.outline_level
    }
}

/// The style table of a document.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    styles: Vec<Style>,
}

impl Styles {
    /// An empty style table, for documents without a styles part.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a `word/styles.xml` part.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut styles = Vec::new();
        let mut current: Option<Style> = None;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"style" => {
                    let mut style = Style::default();
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"styleId" {
                            let value = attr
                                .decode_and_unescape_value(reader.decoder())
                                .map_err(|e| Error::Xml(e.to_string()))?;
                            style.style_id = value.to_string();
                        }
                    }
                    current = Some(style);
                },
                Ok(Event::End(e)) if e.local_name().as_ref() == b"style" => {
                    if let Some(style) = current.take() {
                        styles.push(style);
                    }
                },
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if let Some(style) = current.as_mut() {
                        match e.local_name().as_ref() {
                            b"name" => {
                                if let Some(value) = val_attr(&reader, &e)? {
                                    style.name = Some(value);
                                }
                            },
                            b"outlineLvl" => {
                                if let Some(value) = val_attr(&reader, &e)? {
                                    style.outline_level = value.parse().ok();
                                }
                            },
                            _ => {},
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
        }
        Ok(Self { styles })
    }

    /// Look up a style by its id.
    pub fn get_by_id(&self, style_id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.style_id == style_id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

fn val_attr(
    reader: &Reader<&[u8]>,
    e: &quick_xml::events::BytesStart,
) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"val" {
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(|e| Error::Xml(e.to_string()))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
        <w:style w:type="paragraph" w:styleId="Normal">
            <w:name w:val="Normal"/>
        </w:style>
        <w:style w:type="paragraph" w:styleId="Heading2">
            <w:name w:val="heading 2"/>
            <w:pPr><w:outlineLvl w:val="1"/></w:pPr>
        </w:style>
    </w:styles>"#;

    #[test]
    fn test_parse_styles() {
        let styles = Styles::parse(STYLES.as_bytes()).unwrap();
        assert_eq!(styles.len(), 2);
        let heading = styles.get_by_id("Heading2").unwrap();
        assert_eq!(heading.name(), Some("heading 2"));
        assert_eq!(heading.outline_level(), Some(1));
        assert_eq!(styles.get_by_id("Normal").unwrap().outline_level(), None);
        assert!(styles.get_by_id("Missing").is_none());
    }
}
