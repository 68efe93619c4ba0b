use crate::text::{Font, DEFAULT_WRAP_WIDTH};

/// What happens when the next line would fall below the bottom margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Jump back to the top of the same page. Later lines overdraw earlier
    /// ones, but the output is always the single-page five-object document.
    #[default]
    Overwrite,
    /// Continue on a fresh page object with its own content stream.
    NewPage,
}

/// Page geometry and text layout, in points (1/72 inch) unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Maximum characters per wrapped line
    pub wrap_width: usize,
    /// Media box width
    pub page_width: i32,
    /// Media box height
    pub page_height: i32,
    /// Horizontal position of every line
    pub left_margin: i32,
    /// Baseline of the first line on a page
    pub top: i32,
    /// Lowest baseline allowed on a page
    pub bottom: i32,
    /// Distance between consecutive baselines
    pub line_height: i32,
    /// Font size passed to `Tf`
    pub font_size: i32,
    pub font: Font,
    pub overflow: OverflowPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            page_width: 612, // US Letter
            page_height: 792,
            left_margin: 50,
            top: 760,
            bottom: 60,
            line_height: 14,
            font_size: 12,
            font: Font::Helvetica,
            overflow: OverflowPolicy::Overwrite,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero is treated as one column.
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width.max(1);
        self
    }

    pub fn with_page_size(mut self, width: i32, height: i32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn with_left_margin(mut self, left: i32) -> Self {
        self.left_margin = left;
        self
    }

    /// Sets the first and lowest baselines of a page.
    pub fn with_vertical_bounds(mut self, top: i32, bottom: i32) -> Self {
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// Non-positive heights are treated as one point so the cursor always
    /// moves down.
    pub fn with_line_height(mut self, line_height: i32) -> Self {
        self.line_height = line_height.max(1);
        self
    }

    pub fn with_font(mut self, font: Font, size: i32) -> Self {
        self.font = font;
        self.font_size = size;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Number of lines that fit between `top` and `bottom`, at least one.
    pub fn lines_per_page(&self) -> usize {
        let span = self.top - self.bottom;
        if span < 0 {
            return 1;
        }
        (span / self.line_height.max(1)) as usize + 1
    }
}
