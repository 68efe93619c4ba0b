//! Packaging finished documents for delivery.
//!
//! An [`Artifact`] is the typed result of an export. A [`Packager`] stages it
//! as a temporary file next to its destination and then delivers it with an
//! atomic rename. The staged file is owned by an [`ExportHandle`] and is
//! removed whenever the handle is dropped without being delivered.

use crate::error::{PdfError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Stem used when nothing usable is left after sanitizing a name.
pub const FALLBACK_STEM: &str = "summary";

/// Directory the original summary exports were written to.
pub const DEFAULT_OUTPUT_DIR: &str = "storage/summary_pdfs";

const MAX_FOCUS_LEN: usize = 40;

/// Keeps only `[A-Za-z0-9_-]`.
pub fn sanitize_filename_stem(stem: &str) -> String {
    stem.chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'))
        .collect()
}

/// `summary_{session}_{type}[_{focus}].pdf`, skipping components that are
/// empty once sanitized.
///
/// Spaces in the focus become underscores and it is cut to 40 characters.
pub fn suggested_filename(session_id: &str, summary_type: &str, focus: Option<&str>) -> String {
    let focus = focus
        .map(|focus| {
            focus
                .trim()
                .replace(' ', "_")
                .chars()
                .take(MAX_FOCUS_LEN)
                .collect::<String>()
        })
        .unwrap_or_default();

    let mut stem = FALLBACK_STEM.to_string();
    for part in [session_id, summary_type, focus.as_str()] {
        let part = sanitize_filename_stem(part);
        if !part.is_empty() {
            stem.push('_');
            stem.push_str(&part);
        }
    }
    format!("{stem}.pdf")
}

/// Turns a caller-supplied name into a safe `.pdf` filename.
pub fn normalize_filename(name: &str) -> String {
    let trimmed = name.trim();
    let stem = match trimmed.len().checked_sub(4) {
        Some(split) if trimmed.is_char_boundary(split)
            && trimmed[split..].eq_ignore_ascii_case(".pdf") =>
        {
            &trimmed[..split]
        }
        _ => trimmed,
    };

    let stem = sanitize_filename_stem(stem);
    if stem.is_empty() {
        format!("{FALLBACK_STEM}.pdf")
    } else {
        format!("{stem}.pdf")
    }
}

/// A finished export: the bytes plus how to present them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
    filename: String,
    media_type: &'static str,
}

impl Artifact {
    /// The filename is normalized with [`normalize_filename`].
    pub fn new(bytes: Vec<u8>, filename: &str) -> Self {
        Self {
            bytes,
            filename: normalize_filename(filename),
            media_type: PDF_MEDIA_TYPE,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A staged artifact waiting to be delivered.
///
/// Dropping the handle deletes the staged file.
#[derive(Debug)]
pub struct ExportHandle {
    file: NamedTempFile,
    filename: String,
}

impl ExportHandle {
    fn stage(dir: &Path, artifact: &Artifact) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(".summary-")
            .suffix(".pdf.part")
            .tempfile_in(dir)?;
        // On error `file` is dropped here and the partial file goes with it.
        file.write_all(artifact.bytes())?;
        file.flush()?;

        Ok(Self {
            file,
            filename: artifact.filename().to_string(),
        })
    }

    /// Location of the staged bytes.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Name the artifact will be delivered under.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    fn persist(self, dir: &Path) -> Result<PathBuf> {
        let destination = dir.join(&self.filename);
        // A failed rename hands the temp file back inside the error, which
        // removes it when dropped.
        self.file
            .persist(&destination)
            .map_err(|err| PdfError::Io(err.error))?;
        Ok(destination)
    }
}

/// Owns at most one staged artifact at a time.
///
/// # Example
///
/// ```rust
/// use summary_pdf::{Artifact, Packager};
///
/// let dir = tempfile::tempdir()?;
/// let mut packager = Packager::new(dir.path());
/// let path = packager.export(&Artifact::new(b"%PDF-1.4\n".to_vec(), "demo"))?;
/// assert!(path.ends_with("demo.pdf"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Packager {
    output_dir: PathBuf,
    current: Option<ExportHandle>,
}

impl Packager {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            current: None,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Stages `artifact`, releasing any previously staged one first.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory or the staging file cannot be
    /// created or written. Nothing stays staged in that case.
    pub fn stage(&mut self, artifact: &Artifact) -> Result<&ExportHandle> {
        self.release();
        std::fs::create_dir_all(&self.output_dir)?;

        let handle = ExportHandle::stage(&self.output_dir, artifact)?;
        debug!(
            filename = handle.filename(),
            bytes = artifact.len(),
            "staged artifact"
        );
        Ok(&*self.current.insert(handle))
    }

    pub fn staged(&self) -> Option<&ExportHandle> {
        self.current.as_ref()
    }

    /// Moves the staged artifact to its final path in the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Packaging`] when nothing is staged, or an I/O error
    /// if the rename fails; the staged file is released either way.
    pub fn deliver(&mut self) -> Result<PathBuf> {
        let handle = self
            .current
            .take()
            .ok_or_else(|| PdfError::Packaging("no artifact is staged".to_string()))?;

        match handle.persist(&self.output_dir) {
            Ok(path) => {
                debug!(path = %path.display(), "delivered artifact");
                Ok(path)
            }
            Err(err) => {
                warn!(error = %err, "failed to deliver artifact");
                Err(err)
            }
        }
    }

    /// Stages and delivers `artifact` in one step.
    pub fn export(&mut self, artifact: &Artifact) -> Result<PathBuf> {
        self.stage(artifact)?;
        self.deliver()
    }

    /// Drops the staged artifact, if any. Returns whether one was released.
    pub fn release(&mut self) -> bool {
        match self.current.take() {
            Some(handle) => {
                debug!(filename = handle.filename(), "released staged artifact");
                true
            }
            None => false,
        }
    }
}
