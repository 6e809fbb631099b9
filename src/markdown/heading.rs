//! Heading classification.
//!
//! A paragraph is classified as a heading of level 1 through 6, or as body
//! text. Resolution is deterministic and never mutates the document.
use crate::common::error::Result;
use crate::docx::paragraph::Paragraph;
use crate::docx::styles::Styles;

/// Keywords scanned for in style names and ids. `标题` is the localized
/// name Word uses for heading styles in Chinese documents.
const NAME_KEYWORDS: [&str; 2] = ["heading", "标题"];

/// Resolves paragraphs to heading levels.
///
/// The font-size heuristic can misread bold large body text as a heading,
/// so it only runs when enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingResolver {
    heuristic: bool,
}

impl HeadingResolver {
    pub fn new(heuristic: bool) -> Self {
        Self { heuristic }
    }

    /// Classify a paragraph. Returns the 1-based heading level, or `None`
    /// for body text.
    ///
    /// Resolution order: the paragraph's own outline level, then a heading
    /// keyword plus digit in the style's name or id, then the style's
    /// declared outline level, then (opt-in) the bold-plus-size heuristic.
    pub fn resolve(&self, paragraph: &Paragraph, styles: &Styles) -> Result<Option<u8>> {
        if let Some(level) = paragraph.outline_level()?
            && let Some(mapped) = map_outline(level)
        {
            return Ok(Some(mapped));
        }

        let style_id = paragraph.style_id()?;
        if let Some(ref id) = style_id {
            let style = styles.get_by_id(id);
            let name = style.and_then(|s| s.name());
            if let Some(level) = name.and_then(match_heading_name) {
                return Ok(Some(level));
            }
            if let Some(level) = match_heading_name(id) {
                return Ok(Some(level));
            }
            if let Some(level) = style.and_then(|s| s.outline_level()).and_then(map_outline) {
                return Ok(Some(level));
            }
        }

        if self.heuristic {
            let runs = paragraph.runs()?;
            if let Some(first) = runs.first()
                && first.bold()? == Some(true)
                && let Some(size) = first.size_pt()?
            {
                return Ok(size_to_level(size));
            }
        }

        Ok(None)
    }
}

/// Map a 0-based outline level to a heading level; values past 5 are
/// treated as absent.
fn map_outline(level: u8) -> Option<u8> {
    (level <= 5).then_some(level + 1)
}

/// Scan a style name or id for a heading keyword followed by a digit 1-6,
/// with or without a separating space. The first digit found wins.
fn match_heading_name(name: &str) -> Option<u8> {
    let lower = name.to_lowercase();
    for keyword in NAME_KEYWORDS {
        let mut search = lower.as_str();
        let mut offset = 0;
        while let Some(at) = search.find(keyword) {
            let rest = &lower[offset + at + keyword.len()..];
            let rest = rest.trim_start_matches(' ');
            if let Some(digit) = rest.chars().next().and_then(|c| c.to_digit(10))
                && (1..=6).contains(&digit)
            {
                return Some(digit as u8);
            }
            offset += at + keyword.len();
            search = &lower[offset..];
        }
    }
    None
}

fn size_to_level(size_pt: f32) -> Option<u8> {
    if size_pt >= 18.0 {
        Some(1)
    } else if size_pt >= 16.0 {
        Some(2)
    } else if size_pt >= 14.0 {
        Some(3)
    } else if size_pt >= 12.0 {
        Some(4)
    } else if size_pt >= 10.0 {
        Some(5)
    } else if size_pt >= 8.0 {
        Some(6)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(xml: &str) -> Paragraph {
        Paragraph::new(xml.as_bytes().to_vec())
    }

    fn styles_with_heading1() -> Styles {
        Styles::parse(
            br#"<w:styles><w:style w:type="paragraph" w:styleId="H1"><w:name w:val="Heading 1"/></w:style></w:styles>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_outline_level_beats_style_name() {
        let p = para(
            r#"<w:p><w:pPr><w:pStyle w:val="H1"/><w:outlineLvl w:val="2"/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        );
        let resolver = HeadingResolver::default();
        let styles = styles_with_heading1();
        assert_eq!(resolver.resolve(&p, &styles).unwrap(), Some(3));
        // Resolution is stateless; a second pass gives the same answer.
        assert_eq!(resolver.resolve(&p, &styles).unwrap(), Some(3));
    }

    #[test]
    fn test_style_name_match() {
        let p = para(r#"<w:p><w:pPr><w:pStyle w:val="H1"/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#);
        let resolver = HeadingResolver::default();
        assert_eq!(resolver.resolve(&p, &styles_with_heading1()).unwrap(), Some(1));
    }

    #[test]
    fn test_style_id_fallback_match() {
        let p = para(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading4"/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        );
        let resolver = HeadingResolver::default();
        assert_eq!(resolver.resolve(&p, &Styles::empty()).unwrap(), Some(4));
    }

    #[test]
    fn test_style_outline_level() {
        let styles = Styles::parse(
            br#"<w:styles><w:style w:type="paragraph" w:styleId="Chapter"><w:name w:val="Chapter Opening"/><w:pPr><w:outlineLvl w:val="1"/></w:pPr></w:style></w:styles>"#,
        )
        .unwrap();
        let p = para(
            r#"<w:p><w:pPr><w:pStyle w:val="Chapter"/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        );
        let resolver = HeadingResolver::default();
        assert_eq!(resolver.resolve(&p, &styles).unwrap(), Some(2));
    }

    #[test]
    fn test_localized_keyword() {
        assert_eq!(match_heading_name("标题 2"), Some(2));
        assert_eq!(match_heading_name("标题3"), Some(3));
        assert_eq!(match_heading_name("heading 7"), None);
        assert_eq!(match_heading_name("Subtle Emphasis"), None);
    }

    #[test]
    fn test_out_of_range_outline_is_body() {
        let p = para(
            r#"<w:p><w:pPr><w:outlineLvl w:val="9"/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        );
        let resolver = HeadingResolver::default();
        assert_eq!(resolver.resolve(&p, &Styles::empty()).unwrap(), None);
    }

    #[test]
    fn test_heuristic_opt_in() {
        let p = para(
            r#"<w:p><w:r><w:rPr><w:b/><w:sz w:val="32"/></w:rPr><w:t>Big</w:t></w:r></w:p>"#,
        );
        let off = HeadingResolver::new(false);
        assert_eq!(off.resolve(&p, &Styles::empty()).unwrap(), None);
        let on = HeadingResolver::new(true);
        assert_eq!(on.resolve(&p, &Styles::empty()).unwrap(), Some(2));
    }

    #[test]
    fn test_size_thresholds() {
        assert_eq!(size_to_level(18.0), Some(1));
        assert_eq!(size_to_level(12.0), Some(4));
        assert_eq!(size_to_level(9.0), Some(6));
        assert_eq!(size_to_level(7.5), None);
    }
}
