//! Reading back exported itineraries

use std::path::Path;
use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};

fn referenced_dictionary<'a>(doc: &'a Document, object: &Object, what: &str) -> Result<&'a Dictionary> {
    let id = match object {
        Object::Reference(id) => *id,
        _ => return Err(Error::General(format!("{} is not a reference", what))),
    };
    match doc.get_object(id)? {
        Object::Dictionary(dict) => Ok(dict),
        _ => Err(Error::General(format!("{} is not a dictionary", what))),
    }
}

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let root = doc.trailer.get(b"Root")
        .map_err(|_| Error::General("No Root in trailer".to_string()))?;
    let catalog = referenced_dictionary(doc, root, "Root")?;

    let pages_ref = catalog.get(b"Pages")
        .map_err(|_| Error::General("No Pages in catalog".to_string()))?;
    let pages = referenced_dictionary(doc, pages_ref, "Pages")?;

    match pages.get(b"Count") {
        Ok(Object::Integer(n)) if *n >= 0 => Ok(*n as usize),
        Ok(_) => Err(Error::General("Count is not an integer".to_string())),
        Err(_) => Err(Error::General("No Count in Pages".to_string())),
    }
}

/// Decode an Info text string: UTF-16BE after a BOM, otherwise UTF-8
fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    let bytes = info.get(key).ok()?.as_str().ok()?;
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok()
        }
        None => String::from_utf8(bytes.to_vec()).ok(),
    }
}

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Trip title
    pub title: Option<String>,
    /// Company that issued the itinerary
    pub author: Option<String>,
    pub creator: Option<String>,
}

fn load(path: &Path) -> Result<(Document, usize)> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }
    Ok((doc, page_count))
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    let (doc, page_count) = load(path)?;

    let info = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|info| referenced_dictionary(&doc, info, "Info").ok());

    Ok(PdfMetadata {
        page_count,
        title: info.and_then(|dict| info_string(dict, b"Title")),
        author: info.and_then(|dict| info_string(dict, b"Author")),
        creator: info.and_then(|dict| info_string(dict, b"Creator")),
    })
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    let (_, page_count) = load(path)?;
    Ok(page_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::writer::text_string;

    #[test]
    fn test_count_pages_nonexistent_file() {
        let result = count_pages(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }

    #[test]
    fn test_extract_metadata_nonexistent_file() {
        let result = extract_metadata(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }

    #[test]
    fn test_info_string() {
        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal("Singapore Itinerary"));
        info.set("Count", Object::Integer(3));
        assert_eq!(info_string(&info, b"Title").as_deref(), Some("Singapore Itinerary"));
        assert_eq!(info_string(&info, b"Count"), None);
        assert_eq!(info_string(&info, b"Author"), None);
    }

    #[test]
    fn test_info_string_reads_utf16() {
        let mut info = Dictionary::new();
        info.set("Title", text_string("Caf\u{e9} Tour"));
        assert_eq!(info_string(&info, b"Title").as_deref(), Some("Caf\u{e9} Tour"));
    }
}
