//! Inline content tokens.
//!
//! A paragraph flattens into a token stream of text spans and image
//! references; rendering joins them back into a single Markdown line.
use smallvec::SmallVec;

/// A piece of inline paragraph content.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    Image {
        /// Path written into the link target, relative to the output file.
        path: String,
        /// Alt text label.
        label: String,
    },
}

/// Render a token stream as one Markdown line.
///
/// Adjacent tokens are separated by a single space when both sides end and
/// start with non-whitespace, so text never fuses with an image link.
pub fn render_inline(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let piece = match token {
            Token::Text(text) => text.clone(),
            Token::Image { path, label } => format!("![{label}]({path})"),
        };
        if piece.is_empty() {
            continue;
        }
        if !out.is_empty()
            && !out.ends_with(char::is_whitespace)
            && !piece.starts_with(char::is_whitespace)
        {
            out.push(' ');
        }
        out.push_str(&piece);
    }
    out
}

/// The visible text of a token stream, ignoring images.
pub fn visible_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if let Token::Text(text) = token {
            out.push_str(text);
        }
    }
    out
}

/// Token buffer sized for typical paragraphs.
pub type Tokens = SmallVec<[Token; 8]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_spacing() {
        let tokens = [
            Token::Text("see".to_string()),
            Token::Image {
                path: "doc_images/image_001.png".to_string(),
                label: "image_001".to_string(),
            },
            Token::Text("here".to_string()),
        ];
        assert_eq!(
            render_inline(&tokens),
            "see ![image_001](doc_images/image_001.png) here"
        );
    }

    #[test]
    fn test_render_keeps_existing_whitespace() {
        let tokens = [
            Token::Text("a ".to_string()),
            Token::Text("b".to_string()),
        ];
        assert_eq!(render_inline(&tokens), "a b");
    }

    #[test]
    fn test_empty_tokens_skipped() {
        let tokens = [
            Token::Text(String::new()),
            Token::Text("x".to_string()),
            Token::Text(String::new()),
        ];
        assert_eq!(render_inline(&tokens), "x");
        assert_eq!(visible_text(&tokens), "x");
    }
}
