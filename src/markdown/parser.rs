//! Line-oriented markup classification.
//!
//! The grammar is deliberately small: headings, bullet list items, blank
//! lines, and everything else as plain text. A malformed line is never an
//! error; it degrades to plain text.

/// One classified line of markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Heading { level: u8, text: String },
    ListItem(String),
    Text(String),
    Blank,
}

/// Classify a single physical line. Trailing whitespace is stripped first.
pub fn classify(raw: &str) -> Line {
    let line = raw.trim_end();
    if line.is_empty() {
        return Line::Blank;
    }

    let hashes = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if rest.starts_with(char::is_whitespace) {
            let text = rest.trim_start();
            if !text.is_empty() {
                return Line::Heading {
                    level: hashes as u8,
                    text: text.to_string(),
                };
            }
        }
    }

    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('*'))
        && rest.starts_with(char::is_whitespace)
    {
        let text = rest.trim_start();
        if !text.is_empty() {
            return Line::ListItem(text.to_string());
        }
    }

    Line::Text(line.to_string())
}
