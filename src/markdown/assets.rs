//! Image asset extraction.
//!
//! Embedded images are written into a sibling directory named after the
//! output file's stem with an `_images` suffix. The cache keys on the
//! part's name, never on the relationship id, so a part referenced through
//! several relationship ids still produces one file on disk.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::common::error::Result;
use crate::docx::package::Package;
use crate::opc::constants::rel_type;

/// Writes image parts to disk and hands out their Markdown-relative paths
/// and labels.
pub struct AssetExtractor<'a> {
    pkg: &'a Package,
    /// Absolute path of the asset directory.
    dir: PathBuf,
    /// Directory name used in emitted relative paths.
    dir_name: String,
    created: bool,
    /// Part name to `(relative path, label)`.
    cache: HashMap<String, (String, String)>,
    next_index: u32,
}

impl<'a> AssetExtractor<'a> {
    /// Create an extractor for a conversion writing to `output_path`.
    ///
    /// No directory is created until the first image is resolved.
    pub fn new(pkg: &'a Package, output_path: &Path) -> Self {
        let stem = output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let dir_name = format!("{stem}_images");
        let dir = output_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&dir_name);
        Self {
            pkg,
            dir,
            dir_name,
            created: false,
            cache: HashMap::new(),
            next_index: 1,
        }
    }

    /// Resolve a relationship id to a written asset.
    ///
    /// Returns `(relative path, label)`, or a pair of empty strings when
    /// the relationship is external, missing, not an image, or has no
    /// content. The caller drops the image token in that case.
    pub fn resolve(&mut self, r_id: &str) -> Result<(String, String)> {
        let rels = self.pkg.document_rels()?;
        let Some(rel) = rels.get(r_id) else {
            return Ok((String::new(), String::new()));
        };
        if rel.reltype() != rel_type::IMAGE {
            return Ok((String::new(), String::new()));
        }
        let Some(part_name) = rels.resolve_target(rel) else {
            return Ok((String::new(), String::new()));
        };
        if let Some(cached) = self.cache.get(&part_name) {
            return Ok(cached.clone());
        }
        let Some(part) = self.pkg.part(&part_name) else {
            return Ok((String::new(), String::new()));
        };
        if part.blob().is_empty() {
            return Ok((String::new(), String::new()));
        }

        if !self.created {
            std::fs::create_dir_all(&self.dir)?;
            self.created = true;
        }

        let ext = part
            .extension()
            .map(str::to_ascii_lowercase)
            .or_else(|| extension_for_content_type(part.content_type()).map(str::to_string))
            .unwrap_or_else(|| "bin".to_string());
        let label = format!("image_{:03}", self.next_index);
        self.next_index += 1;
        let file_name = format!("{label}.{ext}");
        std::fs::write(self.dir.join(&file_name), part.blob())?;

        let entry = (format!("{}/{}", self.dir_name, file_name), label);
        self.cache.insert(part_name, entry.clone());
        Ok(entry)
    }

    /// Whether any asset has been written.
    pub fn wrote_assets(&self) -> bool {
        self.created
    }
}

fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/bmp" => Some("bmp"),
        "image/tiff" => Some("tiff"),
        "image/x-emf" => Some("emf"),
        "image/x-wmf" => Some("wmf"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type("image/png"), Some("png"));
        assert_eq!(extension_for_content_type("application/pdf"), None);
    }
}
