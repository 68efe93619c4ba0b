use crate::config::LayoutConfig;
use crate::content::{ContentStreamBuilder, PageContent};
use crate::error::{PdfError, Result};
use crate::package::Artifact;
use crate::text::{sanitize, ParagraphWrapper};
use crate::writer::PdfWriter;
use std::io::Write;
use tracing::debug;

/// Summary text used when the caller has nothing to export.
pub const PLACEHOLDER_SUMMARY: &str = "No summary available.";

pub const DEFAULT_HEADING: &str = "Summary";
pub const REFERENCES_HEADING: &str = "References:";

/// Input of one export: the summary, its citations and an optional focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ExportRequest {
    pub summary_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub citations: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub focus_aspect: Option<String>,
}

impl ExportRequest {
    pub fn new(summary_text: impl Into<String>) -> Self {
        Self {
            summary_text: summary_text.into(),
            ..Self::default()
        }
    }

    /// Picks the summary, or the fallback text when the summary is blank.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::MissingExportSource`] when both are blank or absent.
    pub fn from_sources(summary: Option<&str>, fallback: Option<&str>) -> Result<Self> {
        [summary, fallback]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .map(Self::new)
            .ok_or(PdfError::MissingExportSource)
    }

    /// Like [`ExportRequest::from_sources`], substituting
    /// [`PLACEHOLDER_SUMMARY`] when there is no source.
    pub fn or_placeholder(summary: Option<&str>, fallback: Option<&str>) -> Self {
        Self::from_sources(summary, fallback).unwrap_or_else(|_| Self::new(PLACEHOLDER_SUMMARY))
    }

    pub fn with_citations<I, S>(mut self, citations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.citations = citations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus_aspect = Some(focus.into());
        self
    }

    /// The focus label, if it has any visible content.
    pub fn focus(&self) -> Option<&str> {
        self.focus_aspect
            .as_deref()
            .map(str::trim)
            .filter(|focus| !focus.is_empty())
    }

    /// Citations with blank entries removed, in their original order.
    pub fn citations(&self) -> impl Iterator<Item = &str> {
        self.citations
            .iter()
            .map(|citation| citation.trim())
            .filter(|citation| !citation.is_empty())
    }

    /// First line of the document.
    pub fn heading(&self) -> String {
        match self.focus() {
            Some(focus) => format!("{DEFAULT_HEADING} - Focus: {focus}"),
            None => DEFAULT_HEADING.to_string(),
        }
    }
}

/// A summary export ready to be laid out and written.
///
/// # Example
///
/// ```rust
/// use summary_pdf::{ExportRequest, SummaryDocument};
///
/// let request = ExportRequest::new("Result A. Result B.")
///     .with_citations(["Paper One", "Paper Two"])
///     .with_focus("methods");
///
/// let bytes = SummaryDocument::new(request).to_bytes()?;
/// assert!(bytes.starts_with(b"%PDF-1.4\n"));
/// # Ok::<(), summary_pdf::PdfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SummaryDocument {
    request: ExportRequest,
    config: LayoutConfig,
}

impl SummaryDocument {
    pub fn new(request: ExportRequest) -> Self {
        Self::with_config(request, LayoutConfig::default())
    }

    pub fn with_config(request: ExportRequest, config: LayoutConfig) -> Self {
        Self { request, config }
    }

    pub fn request(&self) -> &ExportRequest {
        &self.request
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Sanitized lines in reading order: heading, blank line, wrapped
    /// summary body, then a blank line, `References:` and wrapped numbered
    /// citations when there are any. The heading always stays one line.
    pub fn lines(&self) -> Vec<String> {
        let width = self.config.wrap_width;
        let mut lines = Vec::new();

        lines.push(sanitize(&self.request.heading()).into_owned());
        lines.push(String::new());
        push_wrapped(&mut lines, &self.request.summary_text, width);

        let mut citations = self.request.citations().peekable();
        if citations.peek().is_some() {
            lines.push(String::new());
            lines.push(REFERENCES_HEADING.to_string());
            for (index, citation) in citations.enumerate() {
                push_wrapped(&mut lines, &format!("{}. {}", index + 1, citation), width);
            }
        }
        lines
    }

    /// Content streams, one per page.
    pub fn pages(&self) -> Vec<PageContent> {
        let lines = self.lines();
        ContentStreamBuilder::new(&self.config).build(lines.iter().map(String::as_str))
    }

    /// Writes the complete PDF to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let pages = self.pages();
        debug!(
            pages = pages.len(),
            lines = pages.iter().map(PageContent::line_count).sum::<usize>(),
            citations = self.request.citations().count(),
            "composing summary document"
        );
        PdfWriter::new_with_writer(writer).write_document(&pages, &self.config)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }

    /// Wraps the PDF bytes for delivery under `filename`.
    pub fn to_artifact(&self, filename: &str) -> Result<Artifact> {
        Ok(Artifact::new(self.to_bytes()?, filename))
    }

    /// Saves the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let pages = self.pages();
        PdfWriter::new(path)?.write_document(&pages, &self.config)
    }
}

/// Builds the PDF bytes for `request` in one call.
pub fn export_summary(request: &ExportRequest, config: &LayoutConfig) -> Result<Vec<u8>> {
    SummaryDocument::with_config(request.clone(), config.clone()).to_bytes()
}

fn push_wrapped(lines: &mut Vec<String>, text: &str, width: usize) {
    let clean = sanitize(text);
    lines.extend(
        ParagraphWrapper::new(&clean)
            .with_width(width)
            .lines()
            .map(str::to_string),
    );
}
