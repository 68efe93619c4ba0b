mod font;
mod sanitize;
mod wrap;

pub use font::Font;
pub use sanitize::{is_legal_char, sanitize, REPLACEMENT_CHAR};
pub use wrap::{wrap_paragraphs, ParagraphWrapper, WrappedLines, DEFAULT_WRAP_WIDTH};

/// Escapes text for use inside a literal string `( ... )`.
///
/// Backslash and both parentheses get a backslash prefix; a line feed
/// becomes the two characters `\n`.
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
