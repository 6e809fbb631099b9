//! Zip-backed reader for OPC packages.
//!
//! The whole package is read into memory up front: document packages are
//! small, and holding the parts as byte buffers keeps the rest of the crate
//! free of archive lifetimes.
use crate::common::error::{Error, Result};
use crate::opc::constants::rel_type;
use crate::opc::part::Part;
use crate::opc::rel::Relationships;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// An OPC package: named parts plus relationship tables.
#[derive(Debug)]
pub struct OpcPackage {
    /// Parts keyed by absolute part name, in stable order
    parts: BTreeMap<String, Part>,
    /// Package-level relationships (`_rels/.rels`)
    pkg_rels: Relationships,
}

impl OpcPackage {
    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a package from any `Read + Seek` source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;

        let mut entries: HashMap<String, Vec<u8>> = HashMap::with_capacity(zip.len());
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            entries.insert(name, data);
        }

        let content_types = match entries.get("[Content_Types].xml") {
            Some(xml) => ContentTypes::parse(xml)?,
            None => {
                return Err(Error::InvalidFormat(
                    "package has no [Content_Types].xml".to_string(),
                ));
            },
        };

        let pkg_rels = match entries.get("_rels/.rels") {
            Some(xml) => Relationships::parse(xml, "/")?,
            None => Relationships::empty("/"),
        };

        // Resolve each part's relationship table before taking ownership of
        // the blobs.
        let part_entries: Vec<String> = entries
            .keys()
            .filter(|name| *name != "[Content_Types].xml" && !is_rels_entry(name))
            .cloned()
            .collect();

        let mut parts = BTreeMap::new();
        for entry_name in part_entries {
            let (dir, file) = split_entry(&entry_name);
            let rels_entry = if dir.is_empty() {
                format!("_rels/{}.rels", file)
            } else {
                format!("{}/_rels/{}.rels", dir, file)
            };
            let base_dir = format!("/{}", dir);
            let rels = match entries.get(&rels_entry) {
                Some(xml) => Relationships::parse(xml, &base_dir)?,
                None => Relationships::empty(&base_dir),
            };

            let part_name = format!("/{}", entry_name);
            let content_type = content_types.lookup(&part_name);
            let blob = entries
                .remove(&entry_name)
                .expect("entry collected from this map");
            parts.insert(
                part_name.clone(),
                Part::new(part_name, content_type, blob, rels),
            );
        }

        Ok(Self { parts, pkg_rels })
    }

    /// Look up a part by its absolute name (e.g. `/word/document.xml`).
    #[inline]
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.get(name)
    }

    /// Iterate over all parts in name order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    /// Get the package-level relationship table.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.pkg_rels
    }

    /// Get the main document part, located through the package-level
    /// officeDocument relationship (with the conventional name as fallback).
    pub fn main_document_part(&self) -> Result<&Part> {
        if let Some(rel) = self.pkg_rels.get_by_type(rel_type::OFFICE_DOCUMENT)
            && let Some(name) = self.pkg_rels.resolve_target(rel)
            && let Some(part) = self.parts.get(&name)
        {
            return Ok(part);
        }
        self.parts
            .get("/word/document.xml")
            .ok_or_else(|| Error::PartNotFound("main document part".to_string()))
    }
}

/// `.rels` entries live under a `_rels/` directory next to their source part.
fn is_rels_entry(name: &str) -> bool {
    name.ends_with(".rels") && (name.starts_with("_rels/") || name.contains("/_rels/"))
}

/// Split a zip entry name into (directory, file name).
fn split_entry(name: &str) -> (&str, &str) {
    match name.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", name),
    }
}

/// Parsed `[Content_Types].xml`: extension defaults plus per-part overrides.
#[derive(Debug, Default)]
struct ContentTypes {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    fn parse(xml: &[u8]) -> Result<Self> {
        use quick_xml::Reader;
        use quick_xml::events::Event;

        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut defaults = HashMap::new();
        let mut overrides = HashMap::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let local = e.local_name();
                    let is_default = local.as_ref() == b"Default";
                    let is_override = local.as_ref() == b"Override";
                    if !is_default && !is_override {
                        continue;
                    }

                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes().flatten() {
                        let value = attr
                            .decode_and_unescape_value(reader.decoder())
                            .map_err(|e| Error::Xml(e.to_string()))?;
                        match attr.key.local_name().as_ref() {
                            b"Extension" | b"PartName" => key = Some(value.to_string()),
                            b"ContentType" => content_type = Some(value.to_string()),
                            _ => {},
                        }
                    }
                    if let (Some(key), Some(ct)) = (key, content_type) {
                        if is_default {
                            defaults.insert(key.to_ascii_lowercase(), ct);
                        } else {
                            overrides.insert(key, ct);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(Self {
            defaults,
            overrides,
        })
    }

    /// Content type of a part: override first, then extension default.
    fn lookup(&self, part_name: &str) -> String {
        if let Some(ct) = self.overrides.get(part_name) {
            return ct.clone();
        }
        if let Some((_, ext)) = part_name.rsplit_once('.')
            && let Some(ct) = self.defaults.get(&ext.to_ascii_lowercase())
        {
            return ct.clone();
        }
        String::new()
    }
}
