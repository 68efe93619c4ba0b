//! Page content streams built from wrapped lines.
//!
//! Every page is a single text object:
//!
//! ```text
//! BT
//! /F1 12 Tf
//! 1 0 0 1 50 760 Tm (first line) Tj
//! 1 0 0 1 50 746 Tm (second line) Tj
//! ET
//! ```

use crate::config::{LayoutConfig, OverflowPolicy};
use crate::text::escape_literal;
use std::fmt::Write;
use tracing::trace;

/// Resource name the page's font dictionary binds the font to.
pub const FONT_RESOURCE: &str = "F1";

/// One positioned row of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    pub text: &'a str,
    pub y: i32,
    /// Zero-based page the line lands on.
    pub page: usize,
}

/// The finished content stream of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    data: Vec<u8>,
    line_count: usize,
}

impl PageContent {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }
}

/// Vertical position on the current page.
#[derive(Debug, Clone)]
struct PageCursor {
    y: i32,
    page: usize,
    top: i32,
    bottom: i32,
    line_height: i32,
    overflow: OverflowPolicy,
    wrapped: bool,
}

impl PageCursor {
    fn new(config: &LayoutConfig) -> Self {
        Self {
            y: config.top,
            page: 0,
            top: config.top,
            bottom: config.bottom,
            line_height: config.line_height.max(1),
            overflow: config.overflow,
            wrapped: false,
        }
    }

    /// Returns `(page, y)` for the next line and moves the cursor down.
    fn place(&mut self) -> (usize, i32) {
        // A page only starts once a line actually needs it.
        if self.wrapped && self.overflow == OverflowPolicy::NewPage {
            self.page += 1;
        }
        self.wrapped = false;

        let slot = (self.page, self.y);
        self.y -= self.line_height;
        if self.y < self.bottom {
            self.y = self.top;
            self.wrapped = true;
        }
        slot
    }
}

pub struct ContentStreamBuilder<'c> {
    config: &'c LayoutConfig,
}

impl<'c> ContentStreamBuilder<'c> {
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self { config }
    }

    /// Assigns a page and baseline to every line.
    ///
    /// An empty input is laid out as one blank line so that every page has at
    /// least one positioning command.
    pub fn layout<'a, I>(&self, lines: I) -> Vec<ContentLine<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cursor = PageCursor::new(self.config);
        let mut placed: Vec<ContentLine<'a>> = lines
            .into_iter()
            .map(|text| {
                let (page, y) = cursor.place();
                ContentLine { text, y, page }
            })
            .collect();

        if placed.is_empty() {
            let (page, y) = cursor.place();
            placed.push(ContentLine { text: "", y, page });
        }
        placed
    }

    /// Builds one content stream per page.
    pub fn build<'a, I>(&self, lines: I) -> Vec<PageContent>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let placed = self.layout(lines);
        let page_count = placed.last().map_or(1, |line| line.page + 1);

        let mut pages = Vec::with_capacity(page_count);
        let mut start = 0;
        for page in 0..page_count {
            let end = start + placed[start..].iter().take_while(|l| l.page == page).count();
            pages.push(self.page_content(&placed[start..end]));
            start = end;
        }

        trace!(pages = pages.len(), lines = placed.len(), "built content streams");
        pages
    }

    fn page_content(&self, lines: &[ContentLine<'_>]) -> PageContent {
        let mut ops = String::new();
        ops.push_str("BT\n");
        writeln!(&mut ops, "/{} {} Tf", FONT_RESOURCE, self.config.font_size).unwrap();
        for line in lines {
            writeln!(
                &mut ops,
                "1 0 0 1 {} {} Tm ({}) Tj",
                self.config.left_margin,
                line.y,
                escape_literal(line.text)
            )
            .unwrap();
        }
        ops.push_str("ET\n");

        PageContent {
            data: ops.into_bytes(),
            line_count: lines.len(),
        }
    }
}
