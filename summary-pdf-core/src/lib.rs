//! # summary-pdf
//!
//! Exports a generated summary and its citation list as a minimal, valid PDF
//! file without any PDF library.
//!
//! The pipeline is:
//!
//! 1. [`text::sanitize`] restricts the text to printable ASCII plus tab, LF
//!    and CR.
//! 2. [`text::ParagraphWrapper`] reflows it into fixed-width lines.
//! 3. [`content::ContentStreamBuilder`] positions the lines and emits the page
//!    content streams.
//! 4. [`writer::PdfWriter`] serializes catalog, page tree, page, font and
//!    content objects, recording the byte offset of each one for the
//!    cross-reference table and trailer.
//! 5. [`package::Packager`] stages the bytes and delivers them as a file.
//!
//! ## Quick Start
//!
//! ```rust
//! use summary_pdf::{ExportRequest, LayoutConfig, SummaryDocument};
//!
//! # fn main() -> summary_pdf::Result<()> {
//! let request = ExportRequest::new("Result A. Result B.")
//!     .with_citations(["Paper One", "Paper Two"])
//!     .with_focus("methods");
//!
//! let document = SummaryDocument::with_config(request, LayoutConfig::default());
//! let bytes = document.to_bytes()?;
//!
//! assert!(bytes.starts_with(b"%PDF-1.4\n"));
//! assert!(bytes.ends_with(b"%%EOF"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod objects;
pub mod package;
pub mod text;
pub mod writer;
pub mod xref;

pub use config::{LayoutConfig, OverflowPolicy};
pub use content::{ContentLine, ContentStreamBuilder, PageContent};
pub use document::{export_summary, ExportRequest, SummaryDocument, PLACEHOLDER_SUMMARY};
pub use error::{PdfError, Result};
pub use package::{suggested_filename, Artifact, ExportHandle, Packager};
pub use text::{sanitize, wrap_paragraphs, Font, ParagraphWrapper};
pub use writer::PdfWriter;
pub use xref::CrossReferenceTable;

/// Current version of summary-pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
