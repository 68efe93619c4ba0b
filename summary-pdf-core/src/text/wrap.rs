//! Fixed-width paragraph reflow.
//!
//! Lines are counted in characters. Every emitted line is a slice of the
//! input, so wrapping never allocates.

/// Column width used when none is configured.
pub const DEFAULT_WRAP_WIDTH: usize = 90;

/// Reflows text into lines of at most `width` characters.
///
/// The wrapper itself holds no iteration state: every call to
/// [`ParagraphWrapper::lines`] starts a fresh pass over the text.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphWrapper<'a> {
    text: &'a str,
    width: usize,
}

impl<'a> ParagraphWrapper<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            width: DEFAULT_WRAP_WIDTH,
        }
    }

    /// Sets the column width. Zero is treated as one.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> WrappedLines<'a> {
        WrappedLines {
            input: InputLines { rest: self.text },
            pending: None,
            width: self.width,
            emitted: false,
        }
    }
}

/// Wraps `text` at `width` columns and collects the lines.
pub fn wrap_paragraphs(text: &str, width: usize) -> Vec<&str> {
    ParagraphWrapper::new(text).with_width(width).lines().collect()
}

/// Iterator over wrapped lines, see [`ParagraphWrapper::lines`].
#[derive(Debug, Clone)]
pub struct WrappedLines<'a> {
    input: InputLines<'a>,
    pending: Option<&'a str>,
    width: usize,
    emitted: bool,
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if let Some(rest) = self.pending.take() {
            let (line, remainder) = split_at_width(rest, self.width);
            if !remainder.is_empty() {
                self.pending = Some(remainder);
            }
            self.emitted = true;
            return Some(line);
        }

        match self.input.next() {
            Some(raw) => {
                let paragraph = raw.trim_end();
                self.emitted = true;
                if paragraph.is_empty() {
                    return Some("");
                }
                let (line, remainder) = split_at_width(paragraph, self.width);
                if !remainder.is_empty() {
                    self.pending = Some(remainder);
                }
                Some(line)
            }
            // Empty input still yields one (blank) line.
            None if !self.emitted => {
                self.emitted = true;
                Some("")
            }
            None => None,
        }
    }
}

impl std::iter::FusedIterator for WrappedLines<'_> {}

/// Splits on `\n`, `\r\n` and lone `\r`. A trailing break does not start an
/// extra empty line.
#[derive(Debug, Clone)]
struct InputLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for InputLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(['\n', '\r']) {
            Some(pos) => {
                let line = &self.rest[..pos];
                let skip = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + skip..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Cuts one line of at most `width` chars off `text`, returning it and the
/// continuation. `text` must have no trailing whitespace.
fn split_at_width(text: &str, width: usize) -> (&str, &str) {
    let Some((boundary, ch)) = text.char_indices().nth(width) else {
        return (text, "");
    };

    // A whitespace char sitting right on the boundary is still a valid break.
    let window = &text[..boundary + ch.len_utf8()];
    if let Some(pos) = window.rfind(char::is_whitespace) {
        let line = text[..pos].trim_end();
        if !line.is_empty() {
            return (line, text[pos..].trim_start());
        }
        // Only indentation before the break point.
        let unindented = text.trim_start();
        if unindented.len() < text.len() {
            return split_at_width(unindented, width);
        }
    }

    (&text[..boundary], text[boundary..].trim_start())
}
