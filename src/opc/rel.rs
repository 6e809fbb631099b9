//! Relationship tables for OPC packages.
//!
//! Every part may carry a `.rels` sibling mapping local relationship ids
//! (`rId1`, `rId2`, ...) to other parts or external URLs. Relationship ids
//! are aliases: several ids may point at the same physical part, which is why
//! consumers that deduplicate must key on the resolved part name, never on
//! the id.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    r_id: String,
    /// Relationship type URI
    reltype: String,
    /// Target reference: part-relative path, or URL for external targets
    target_ref: String,
    /// Whether the target is external to the package
    is_external: bool,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type URI.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the raw target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// The relationship table of one source part (or of the package itself).
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Relationships keyed by rId
    rels: HashMap<String, Relationship>,
    /// Directory of the source part, used to resolve relative targets
    base_dir: String,
}

impl Relationships {
    /// Create an empty relationship table for a part in `base_dir`.
    pub fn empty(base_dir: &str) -> Self {
        Self {
            rels: HashMap::new(),
            base_dir: base_dir.to_string(),
        }
    }

    /// Parse a `.rels` document.
    ///
    /// `base_dir` is the directory of the *source* part, e.g. `/word` for
    /// `/word/document.xml`, or `/` for the package itself.
    pub fn parse(xml: &[u8], base_dir: &str) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = HashMap::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target = None;
                    let mut is_external = false;

                    for attr in e.attributes().flatten() {
                        let value = attr
                            .decode_and_unescape_value(reader.decoder())
                            .map_err(|e| Error::Xml(e.to_string()))?;
                        match attr.key.local_name().as_ref() {
                            b"Id" => r_id = Some(value.to_string()),
                            b"Type" => reltype = Some(value.to_string()),
                            b"Target" => target = Some(value.to_string()),
                            b"TargetMode" => is_external = value == "External",
                            _ => {},
                        }
                    }

                    if let (Some(r_id), Some(reltype), Some(target_ref)) = (r_id, reltype, target)
                    {
                        rels.insert(
                            r_id.clone(),
                            Relationship {
                                r_id,
                                reltype,
                                target_ref,
                                is_external,
                            },
                        );
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(Self {
            rels,
            base_dir: base_dir.to_string(),
        })
    }

    /// Look up a relationship by id.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Find the first relationship of the given type.
    pub fn get_by_type(&self, reltype: &str) -> Option<&Relationship> {
        self.rels.values().find(|r| r.reltype == reltype)
    }

    /// Number of relationships in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Resolve an internal relationship's target to an absolute part name.
    ///
    /// Returns `None` for external relationships.
    pub fn resolve_target(&self, rel: &Relationship) -> Option<String> {
        if rel.is_external {
            return None;
        }
        Some(resolve_part_name(&self.base_dir, &rel.target_ref))
    }
}

/// Join a base directory and a (possibly relative) target into an absolute,
/// normalized part name such as `/word/media/image1.png`.
fn resolve_part_name(base_dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };

    for seg in target.split('/') {
        match seg {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            s => segments.push(s),
        }
    }

    let mut name = String::with_capacity(target.len() + base_dir.len() + 1);
    for seg in segments {
        name.push('/');
        name.push_str(seg);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_and_resolve() {
        let rels = Relationships::parse(RELS, "/word").unwrap();
        assert_eq!(rels.len(), 3);

        let image = rels.get("rId4").unwrap();
        assert!(!image.is_external());
        assert_eq!(
            rels.resolve_target(image).as_deref(),
            Some("/word/media/image1.png")
        );

        let link = rels.get("rId5").unwrap();
        assert!(link.is_external());
        assert_eq!(rels.resolve_target(link), None);
    }

    #[test]
    fn test_resolve_parent_and_absolute_targets() {
        assert_eq!(resolve_part_name("/word", "../docProps/core.xml"), "/docProps/core.xml");
        assert_eq!(resolve_part_name("/word", "/word/media/image1.png"), "/word/media/image1.png");
        assert_eq!(resolve_part_name("/", "word/document.xml"), "/word/document.xml");
    }

    #[test]
    fn test_get_by_type() {
        let rels = Relationships::parse(RELS, "/word").unwrap();
        let styles = rels
            .get_by_type("http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles")
            .unwrap();
        assert_eq!(styles.r_id(), "rId1");
    }
}
