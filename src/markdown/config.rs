//! Conversion options.

/// Options for converting documents to Markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Recognize headings by bold text plus font size when neither an
    /// outline level nor a heading style is present. Off by default.
    pub heuristic_headings: bool,
}

impl MarkdownOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic_headings(mut self, enabled: bool) -> Self {
        self.heuristic_headings = enabled;
        self
    }
}

/// Options for converting Markdown to documents.
#[derive(Debug, Clone)]
pub struct DocxOptions {
    /// Font applied to generated text, including the East Asian range.
    pub east_asian_font: String,
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            east_asian_font: "宋体".to_string(),
        }
    }
}

impl DocxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_east_asian_font(mut self, font: impl Into<String>) -> Self {
        self.east_asian_font = font.into();
        self
    }
}
