//! Mutable paragraph and run types for document generation.
use std::fmt::Write as FmtWrite;

use crate::common::error::{Error, Result};
use crate::common::xml::escape_xml;

/// A mutable run: a span of text with character formatting.
#[derive(Debug, Default)]
pub struct MutableRun {
    pub(crate) text: String,
    pub(crate) bold: bool,
    /// When `Some(false)` an explicit `<w:i w:val="0"/>` is written so the
    /// run never inherits italics from a style.
    pub(crate) italic: Option<bool>,
    /// Font size in half-points.
    pub(crate) size: Option<u32>,
    pub(crate) font: Option<String>,
    pub(crate) color: Option<String>,
}

impl MutableRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Set the font size in points.
    pub fn size_pt(mut self, points: u32) -> Self {
        self.size = Some(points * 2);
        self
    }

    /// Set the font for the ascii, high-ANSI and East Asian ranges.
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the text color as a six-digit hex value.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");

        let has_props = self.bold
            || self.italic.is_some()
            || self.size.is_some()
            || self.font.is_some()
            || self.color.is_some();
        if has_props {
            xml.push_str("<w:rPr>");
            if let Some(ref font) = self.font {
                let name = escape_xml(font);
                write!(
                    xml,
                    "<w:rFonts w:ascii=\"{name}\" w:hAnsi=\"{name}\" w:eastAsia=\"{name}\"/>"
                )
                .map_err(|e| Error::Xml(e.to_string()))?;
            }
            if self.bold {
                xml.push_str("<w:b/>");
            }
            match self.italic {
                Some(true) => xml.push_str("<w:i/>"),
                Some(false) => xml.push_str("<w:i w:val=\"0\"/>"),
                None => {},
            }
            if let Some(ref color) = self.color {
                write!(xml, "<w:color w:val=\"{}\"/>", escape_xml(color))
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }
            if let Some(size) = self.size {
                write!(xml, "<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>")
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }
            xml.push_str("</w:rPr>");
        }

        write!(
            xml,
            "<w:t xml:space=\"preserve\">{}</w:t>",
            escape_xml(&self.text)
        )
        .map_err(|e| Error::Xml(e.to_string()))?;
        xml.push_str("</w:r>");
        Ok(())
    }
}

/// A mutable paragraph in a generated document.
#[derive(Debug, Default)]
pub struct MutableParagraph {
    pub(crate) style: Option<String>,
    pub(crate) runs: Vec<MutableRun>,
    /// Applied numbering as `(ilvl, numId)`.
    pub(crate) numbering: Option<(u8, u32)>,
    /// Spacing before/after in twentieths of a point.
    pub(crate) spacing: Option<(u32, u32)>,
}

impl MutableParagraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style_id: impl Into<String>) -> Self {
        self.style = Some(style_id.into());
        self
    }

    pub fn run(mut self, run: MutableRun) -> Self {
        self.runs.push(run);
        self
    }

    /// Apply a numbering instance.
    pub fn numbering(mut self, ilvl: u8, num_id: u32) -> Self {
        self.numbering = Some((ilvl, num_id));
        self
    }

    /// Set spacing before and after the paragraph, in points.
    pub fn spacing_pt(mut self, before: u32, after: u32) -> Self {
        self.spacing = Some((before * 20, after * 20));
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");

        let has_props = self.style.is_some() || self.numbering.is_some() || self.spacing.is_some();
        if has_props {
            xml.push_str("<w:pPr>");
            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml(style))
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }
            if let Some((ilvl, num_id)) = self.numbering {
                write!(
                    xml,
                    "<w:numPr><w:ilvl w:val=\"{ilvl}\"/><w:numId w:val=\"{num_id}\"/></w:numPr>"
                )
                .map_err(|e| Error::Xml(e.to_string()))?;
            }
            if let Some((before, after)) = self.spacing {
                write!(
                    xml,
                    "<w:spacing w:before=\"{before}\" w:after=\"{after}\"/>"
                )
                .map_err(|e| Error::Xml(e.to_string()))?;
            }
            xml.push_str("</w:pPr>");
        }

        for run in &self.runs {
            run.to_xml(xml)?;
        }
        xml.push_str("</w:p>");
        Ok(())
    }
}
