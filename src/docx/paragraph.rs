//! Paragraph and Run structures for Word documents.
//!
//! Both types wrap the raw XML of their element and parse it on demand with
//! streaming readers, so a document walk only pays for the properties it
//! actually asks about.
use crate::common::error::{Error, Result};
use crate::common::xml::capture_descendants;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// A paragraph in a Word document (`<w:p>`).
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// The raw XML bytes for this paragraph
    xml: Vec<u8>,
}

impl Paragraph {
    /// Create a Paragraph from the XML of a `<w:p>` element.
    pub fn new(xml: Vec<u8>) -> Self {
        Self { xml }
    }

    /// Concatenated text of all runs in the paragraph.
    pub fn text(&self) -> Result<String> {
        extract_text(&self.xml)
    }

    /// The paragraph's style id (`<w:pStyle w:val="..."/>`), if set.
    pub fn style_id(&self) -> Result<Option<String>> {
        first_val_attr(&self.xml, b"pStyle")
    }

    /// The explicit outline level on the paragraph's own properties.
    ///
    /// The raw 0-based value is returned; mapping to heading levels and
    /// range-checking is the resolver's business.
    pub fn outline_level(&self) -> Result<Option<u8>> {
        Ok(first_val_attr(&self.xml, b"outlineLvl")?.and_then(|v| v.parse().ok()))
    }

    /// The runs of this paragraph, in document order.
    ///
    /// Runs nested below wrappers such as `w:hyperlink` are included; the
    /// paragraph is modeled as one flat run sequence.
    pub fn runs(&self) -> Result<SmallVec<[Run; 8]>> {
        Ok(capture_descendants(&self.xml, b"r")?
            .into_iter()
            .map(Run::new)
            .collect())
    }
}

/// A run within a paragraph (`<w:r>`): a span of text and/or embedded
/// image references.
#[derive(Debug, Clone)]
pub struct Run {
    /// The raw XML bytes for this run
    xml: Vec<u8>,
}

impl Run {
    /// Create a Run from the XML of a `<w:r>` element.
    pub fn new(xml: Vec<u8>) -> Self {
        Self { xml }
    }

    /// The text content of this run.
    pub fn text(&self) -> Result<String> {
        extract_text(&self.xml)
    }

    /// The run's bold flag, if declared in its properties.
    pub fn bold(&self) -> Result<Option<bool>> {
        let mut reader = Reader::from_reader(&self.xml[..]);
        let mut in_rpr = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"rPr" => in_rpr = true,
                Ok(Event::End(e)) if e.local_name().as_ref() == b"rPr" => return Ok(None),
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if in_rpr && e.local_name().as_ref() == b"b" =>
                {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"val" {
                            let value = attr
                                .decode_and_unescape_value(reader.decoder())
                                .map_err(|e| Error::Xml(e.to_string()))?;
                            return Ok(Some(value != "0" && value != "false"));
                        }
                    }
                    // <w:b/> with no attribute means on.
                    return Ok(Some(true));
                },
                Ok(Event::Eof) => return Ok(None),
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
        }
    }

    /// The run's explicit font size in points, if declared.
    ///
    /// `w:sz` stores half-points.
    pub fn size_pt(&self) -> Result<Option<f32>> {
        let mut reader = Reader::from_reader(&self.xml[..]);
        let mut in_rpr = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"rPr" => in_rpr = true,
                Ok(Event::End(e)) if e.local_name().as_ref() == b"rPr" => return Ok(None),
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if in_rpr && e.local_name().as_ref() == b"sz" =>
                {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"val" {
                            let value = attr
                                .decode_and_unescape_value(reader.decoder())
                                .map_err(|e| Error::Xml(e.to_string()))?;
                            return Ok(value.parse::<f32>().ok().map(|half| half / 2.0));
                        }
                    }
                    return Ok(None);
                },
                Ok(Event::Eof) => return Ok(None),
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
        }
    }

    /// Relationship ids of images embedded in this run, in order.
    ///
    /// Images live in `<w:drawing>` elements whose `<a:blip r:embed="..."/>`
    /// points at the media part.
    pub fn image_refs(&self) -> Result<SmallVec<[String; 1]>> {
        let mut reader = Reader::from_reader(&self.xml[..]);
        let mut refs = SmallVec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if e.local_name().as_ref() == b"blip" =>
                {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"embed" {
                            let value = attr
                                .decode_and_unescape_value(reader.decoder())
                                .map_err(|e| Error::Xml(e.to_string()))?;
                            refs.push(value.to_string());
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
        }
        Ok(refs)
    }
}

/// Read the `w:val` attribute of the first element with the given local
/// name in a fragment.
fn first_val_attr(xml: &[u8], name: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == name => {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"val" {
                        let value = attr
                            .decode_and_unescape_value(reader.decoder())
                            .map_err(|e| Error::Xml(e.to_string()))?;
                        return Ok(Some(value.to_string()));
                    }
                }
                return Ok(None);
            },
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {},
        }
    }
}

/// Concatenate the contents of every `<w:t>` element in a fragment.
fn extract_text(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    let mut result = String::with_capacity(xml.len() / 4);
    let mut in_text = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => in_text = false,
            Ok(Event::Text(e)) if in_text => {
                let text = e.xml_content().map_err(|e| Error::Xml(e.to_string()))?;
                result.push_str(&text);
            },
            // Entity and character references are delivered as separate
            // events since quick-xml 0.38.
            Ok(Event::GeneralRef(e)) if in_text => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    result.push_str(&resolved);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {},
        }
    }
    Ok(result)
}

/// Resolve a predefined XML entity or a numeric character reference.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}
