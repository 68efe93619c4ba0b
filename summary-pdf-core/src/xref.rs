use crate::error::{PdfError, Result};
use crate::objects::ObjectId;

/// Head of the free list, always the first entry of the table.
pub const FREE_ENTRY: &[u8; 20] = b"0000000000 65535 f \n";

/// Byte offsets of the indirect objects written so far.
///
/// Objects must be recorded in id order starting at 1, which keeps the table
/// a single contiguous subsection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReferenceTable {
    offsets: Vec<u64>,
}

impl CrossReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records where object `id` starts.
    pub fn record(&mut self, id: ObjectId, offset: u64) -> Result<()> {
        let expected = self.offsets.len() as u32 + 1;
        if id.number() != expected || id.generation() != 0 {
            return Err(PdfError::InvalidStructure(format!(
                "object {} {} recorded where {} 0 was expected",
                id.number(),
                id.generation(),
                expected
            )));
        }
        if let Some(&last) = self.offsets.last() {
            if offset <= last {
                return Err(PdfError::InvalidStructure(format!(
                    "object {} at offset {} does not follow offset {}",
                    id.number(),
                    offset,
                    last
                )));
            }
        }

        self.offsets.push(offset);
        Ok(())
    }

    pub fn offset(&self, id: ObjectId) -> Option<u64> {
        let index = (id.number() as usize).checked_sub(1)?;
        self.offsets.get(index).copied()
    }

    /// Number of in-use objects.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Value of the trailer's `/Size`: objects plus the free entry.
    pub fn size(&self) -> usize {
        self.offsets.len() + 1
    }

    /// Serializes the `xref` section. Every entry is exactly 20 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + 20 * self.size());
        out.extend_from_slice(format!("xref\n0 {}\n", self.size()).as_bytes());
        out.extend_from_slice(FREE_ENTRY);
        for offset in &self.offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out
    }
}
