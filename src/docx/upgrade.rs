//! Input preparation: legacy `.doc` upgrade and macro-enabled recovery.
//!
//! Legacy binary `.doc` files are converted to `.docx` with an external
//! tool before parsing. Macro-enabled packages are rewritten once with the
//! VBA project removed and the main part's content type downgraded, then
//! reopened.
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::common::error::{Error, Result};
use crate::docx::package::Package;
use crate::opc::constants::content_type;

/// A converted input file. The temporary directory is kept alive for as
/// long as the converted file is in use.
#[derive(Debug)]
pub struct Upgraded {
    #[allow(dead_code)]
    dir: TempDir,
    path: PathBuf,
}

impl Upgraded {
    /// Path of the converted `.docx` file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open an input file as a `.docx` package, converting it first when
/// needed.
///
/// `.doc` inputs are upgraded with an external converter. A package whose
/// main part is macro-enabled is stripped and reopened once; a second
/// rejection is reported as-is.
pub fn open_prepared(path: &Path) -> Result<(Package, Option<Upgraded>)> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let is_doc = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("doc"));
    if is_doc {
        let upgraded = upgrade_doc(path)?;
        let pkg = Package::open(upgraded.path())?;
        return Ok((pkg, Some(upgraded)));
    }
    match Package::open(path) {
        Ok(pkg) => Ok((pkg, None)),
        Err(Error::InvalidContentType { got, .. })
            if got == content_type::WML_DOCUMENT_MACRO_ENABLED =>
        {
            let stripped = strip_macros(path)?;
            let pkg = Package::open(stripped.path())?;
            Ok((pkg, Some(stripped)))
        },
        Err(e) => Err(e),
    }
}

/// Convert a legacy `.doc` file to `.docx` with an external tool.
///
/// On macOS `textutil` is tried first, then LibreOffice's `soffice` from
/// the common install locations.
pub fn upgrade_doc(path: &Path) -> Result<Upgraded> {
    let dir = TempDir::new()?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("converted");
    let output = dir.path().join(format!("{stem}.docx"));

    #[cfg(target_os = "macos")]
    {
        let status = Command::new("textutil")
            .arg("-convert")
            .arg("docx")
            .arg(path)
            .arg("-output")
            .arg(&output)
            .status();
        if let Ok(status) = status
            && status.success()
            && output.exists()
        {
            return Ok(Upgraded { dir, path: output });
        }
    }

    for candidate in soffice_candidates() {
        let status = Command::new(candidate)
            .arg("--headless")
            .arg("--convert-to")
            .arg("docx")
            .arg("--outdir")
            .arg(dir.path())
            .arg(path)
            .status();
        if let Ok(status) = status
            && status.success()
            && output.exists()
        {
            return Ok(Upgraded { dir, path: output });
        }
    }

    Err(Error::UpgradeToolUnavailable)
}

fn soffice_candidates() -> &'static [&'static str] {
    &[
        "soffice",
        "/usr/bin/soffice",
        "/usr/local/bin/soffice",
        "/opt/homebrew/bin/soffice",
        "/Applications/LibreOffice.app/Contents/MacOS/soffice",
    ]
}

/// Rewrite a macro-enabled package with the VBA project removed.
///
/// Entries under the VBA project are dropped and the main part's declared
/// content type is replaced in `[Content_Types].xml`. Everything else is
/// copied through unchanged.
pub fn strip_macros(path: &Path) -> Result<Upgraded> {
    let dir = TempDir::new()?;
    let output = dir.path().join("stripped.docx");

    let file = std::fs::File::open(path)?;
    let mut archive = ZipArchive::new(std::io::BufReader::new(file))?;
    let out_file = std::fs::File::create(&output)?;
    let mut writer = ZipWriter::new(out_file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if name.starts_with("word/vbaProject") || name == "word/vbaData.xml" {
            continue;
        }
        let mut blob = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut blob)?;
        if name == "[Content_Types].xml" {
            let text = String::from_utf8_lossy(&blob).replace(
                content_type::WML_DOCUMENT_MACRO_ENABLED,
                content_type::WML_DOCUMENT_MAIN,
            );
            blob = text.into_bytes();
        }
        writer.start_file(name, options)?;
        writer.write_all(&blob)?;
    }
    writer.finish()?;

    Ok(Upgraded { dir, path: output })
}
