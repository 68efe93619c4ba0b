use crate::config::LayoutConfig;
use crate::content::{PageContent, FONT_RESOURCE};
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::xref::CrossReferenceTable;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub const PDF_HEADER: &[u8] = b"%PDF-1.4\n";
pub const EOF_MARKER: &[u8] = b"%%EOF";

/// Object ids of the document graph.
///
/// The first page always takes ids 3 (page), 4 (font) and 5 (contents), so
/// a one-page document is exactly catalog, page tree, page, font, content.
/// Further pages append (page, contents) pairs: 6/7, 8/9, ...
#[derive(Debug, Clone, Copy)]
pub struct ObjectLayout {
    page_count: usize,
}

impl ObjectLayout {
    pub const CATALOG: ObjectId = ObjectId::new(1, 0);
    pub const PAGES: ObjectId = ObjectId::new(2, 0);
    pub const FONT: ObjectId = ObjectId::new(4, 0);

    pub fn new(page_count: usize) -> Self {
        Self {
            page_count: page_count.max(1),
        }
    }

    /// Ids of the page object and its content stream.
    pub fn page(&self, index: usize) -> (ObjectId, ObjectId) {
        if index == 0 {
            return (ObjectId::new(3, 0), ObjectId::new(5, 0));
        }
        let page = 6 + 2 * (index as u32 - 1);
        (ObjectId::new(page, 0), ObjectId::new(page + 1, 0))
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn object_count(&self) -> usize {
        3 + 2 * self.page_count
    }
}

pub struct PdfWriter<W: Write> {
    writer: W,
    xref: CrossReferenceTable,
    current_position: u64,
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            xref: CrossReferenceTable::new(),
            current_position: 0,
        }
    }

    /// Writes a complete document with one page per content stream.
    pub fn write_document(&mut self, pages: &[PageContent], config: &LayoutConfig) -> Result<()> {
        if pages.is_empty() {
            return Err(PdfError::InvalidStructure(
                "a document needs at least one page".to_string(),
            ));
        }
        let layout = ObjectLayout::new(pages.len());

        self.write_header()?;
        self.write_catalog()?;
        self.write_page_tree(&layout)?;

        for (index, page) in pages.iter().enumerate() {
            let (page_id, content_id) = layout.page(index);
            self.write_page(page_id, content_id, config)?;
            if index == 0 {
                self.write_font(config)?;
            }
            self.write_page_content(content_id, page)?;
        }

        if self.xref.len() != layout.object_count() {
            return Err(PdfError::InvalidStructure(format!(
                "wrote {} objects, expected {}",
                self.xref.len(),
                layout.object_count()
            )));
        }

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(xref_position)?;
        self.writer.flush()?;

        debug!(
            objects = self.xref.len(),
            pages = pages.len(),
            bytes = self.current_position,
            "wrote document"
        );
        Ok(())
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.current_position
    }

    pub fn xref(&self) -> &CrossReferenceTable {
        &self.xref
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(PDF_HEADER)
    }

    fn write_catalog(&mut self) -> Result<()> {
        let mut catalog = Dictionary::typed("Catalog");
        catalog.set("Pages", ObjectLayout::PAGES);

        self.write_object(ObjectLayout::CATALOG, &Object::Dictionary(catalog))
    }

    fn write_page_tree(&mut self, layout: &ObjectLayout) -> Result<()> {
        let kids: Vec<Object> = (0..layout.page_count())
            .map(|index| Object::Reference(layout.page(index).0))
            .collect();

        let mut pages = Dictionary::typed("Pages");
        pages.set("Count", layout.page_count());
        pages.set("Kids", kids);

        self.write_object(ObjectLayout::PAGES, &Object::Dictionary(pages))
    }

    fn write_page(
        &mut self,
        page_id: ObjectId,
        content_id: ObjectId,
        config: &LayoutConfig,
    ) -> Result<()> {
        let mut fonts = Dictionary::new();
        fonts.set(FONT_RESOURCE, ObjectLayout::FONT);
        let mut resources = Dictionary::new();
        resources.set("Font", fonts);

        let mut page = Dictionary::typed("Page");
        page.set("Parent", ObjectLayout::PAGES);
        page.set(
            "MediaBox",
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::from(config.page_width),
                Object::from(config.page_height),
            ],
        );
        page.set("Resources", resources);
        page.set("Contents", content_id);

        self.write_object(page_id, &Object::Dictionary(page))
    }

    fn write_font(&mut self, config: &LayoutConfig) -> Result<()> {
        let mut font = Dictionary::typed("Font");
        font.set("Subtype", Object::name("Type1"));
        font.set("BaseFont", Object::name(config.font.pdf_name()));

        self.write_object(ObjectLayout::FONT, &Object::Dictionary(font))
    }

    fn write_page_content(&mut self, content_id: ObjectId, page: &PageContent) -> Result<()> {
        let stream = Stream::new(page.data().to_vec());
        self.write_object(content_id, &Object::Stream(stream))
    }

    fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        self.xref.record(id, self.current_position)?;

        let header = format!("{} {} obj ", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(object)?;
        self.write_bytes(b" endobj\n")
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => {
                self.write_bytes(b"<<")?;
                for (key, value) in dict.entries() {
                    self.write_bytes(b" /")?;
                    self.write_bytes(key.as_bytes())?;
                    self.write_bytes(b" ")?;
                    self.write_object_value(value)?;
                }
                self.write_bytes(b" >>")?;
            }
            Object::Stream(stream) => {
                // The payload between the markers is exactly `/Length` bytes.
                self.write_object_value(&Object::Dictionary(stream.dictionary().clone()))?;
                self.write_bytes(b" stream\n")?;
                self.write_bytes(stream.data())?;
                self.write_bytes(b"endstream")?;
            }
            Object::Reference(id) => {
                let ref_str = format!("{} {} R", id.number(), id.generation());
                self.write_bytes(ref_str.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        let table = self.xref.to_bytes();
        self.write_bytes(&table)
    }

    fn write_trailer(&mut self, xref_position: u64) -> Result<()> {
        let mut trailer = Dictionary::new();
        trailer.set("Size", self.xref.size());
        trailer.set("Root", ObjectLayout::CATALOG);

        self.write_bytes(b"trailer\n")?;
        self.write_object_value(&Object::Dictionary(trailer))?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n")?;
        self.write_bytes(EOF_MARKER)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}
