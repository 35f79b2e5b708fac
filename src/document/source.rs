// src/document/source.rs
use std::path::Path;

use lopdf::content::Content;
use lopdf::ObjectId;

use crate::document::text_layout::{assemble_lines, text_runs};
use crate::utils::error::SourceError;

/// Anything that can hand out the text of a document page by page.
///
/// Pages that carry no text yield an empty string rather than being skipped,
/// so callers decide how to join them.
pub trait PageTextSource {
    fn page_texts(&self) -> Box<dyn Iterator<Item = Result<String, SourceError>> + '_>;
}

/// A statement PDF loaded into memory with `lopdf`.
///
/// The file handle is released as soon as `open` returns; only the decoded
/// object graph is kept.
pub struct PdfDocument {
    document: lopdf::Document,
}

impl PdfDocument {
    /// Loads and decodes the document at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        tracing::debug!("Opening document: {}", path.display());

        let bytes = std::fs::read(path)?; // Propagates io::Error as SourceError::Io
        let document = lopdf::Document::load_mem(&bytes)?;

        tracing::debug!(
            "Loaded {} ({} bytes, {} pages)",
            path.display(),
            bytes.len(),
            document.get_pages().len()
        );
        Ok(Self { document })
    }

    /// Decodes one page's content stream and rebuilds its lines from the
    /// positions of the shown strings.
    fn page_text(&self, page: u32, id: ObjectId) -> Result<String, SourceError> {
        let page_error = |e: lopdf::Error| SourceError::PageText { page, message: e.to_string() };
        let data = self.document.get_page_content(id).map_err(page_error)?;
        let content = Content::decode(&data).map_err(page_error)?;
        Ok(assemble_lines(text_runs(&content.operations)))
    }
}

impl PageTextSource for PdfDocument {
    fn page_texts(&self) -> Box<dyn Iterator<Item = Result<String, SourceError>> + '_> {
        // get_pages is keyed by page number, so iteration is in reading order
        let pages: Vec<(u32, ObjectId)> = self.document.get_pages().into_iter().collect();
        Box::new(pages.into_iter().map(move |(page, id)| self.page_text(page, id)))
    }
}

/// Joins every non-empty page with a trailing newline.
pub fn collect_text<S: PageTextSource + ?Sized>(source: &S) -> Result<String, SourceError> {
    let mut all_text = String::new();
    for page in source.page_texts() {
        let text = page?;
        if !text.is_empty() {
            all_text.push_str(&text);
            all_text.push('\n');
        }
    }
    Ok(all_text)
}

/// In-memory pages, used to drive the engine without a real PDF.
#[cfg(test)]
pub struct StaticPages(pub Vec<String>);

#[cfg(test)]
impl PageTextSource for StaticPages {
    fn page_texts(&self) -> Box<dyn Iterator<Item = Result<String, SourceError>> + '_> {
        Box::new(self.0.iter().cloned().map(Ok))
    }
}

/// Writes a one-page PDF whose content stream is `operations`, drawn in
/// Courier at the usual letter-size media box.
#[cfg(test)]
pub fn write_test_pdf(path: &Path, operations: Vec<lopdf::content::Operation>) {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
