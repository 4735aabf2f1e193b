//! Paged PDF assembly with lopdf
//!
//! Layout works in millimeters from the top-left corner; PDF user space is in
//! points from the bottom-left. Every coordinate goes through [`PageSpace`]
//! on its way into a content stream.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use crate::error::{Error, Result};
use crate::layout::{Length, PageGeometry};
use crate::pack::Page;
use crate::raster::{Color, DrawOp, Raster, Weight};
use super::footer::{footer_ops, FooterIdentity};

/// Document information dictionary values
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub creator: String,
}

/// Escape a string for a PDF literal using WinAnsiEncoding
///
/// Characters outside the encoding that have a common stand-in are replaced;
/// anything else becomes `?`.
pub fn escape_pdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\r' | '\n' | '\t' => out.push(' '),
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            '\u{20ac}' => out.push_str("\\200"),
            '\u{2026}' => out.push_str("\\205"),
            '\u{2018}' => out.push_str("\\221"),
            '\u{2019}' => out.push_str("\\222"),
            '\u{201c}' => out.push_str("\\223"),
            '\u{201d}' => out.push_str("\\224"),
            '\u{2022}' => out.push_str("\\225"),
            '\u{2013}' => out.push_str("\\226"),
            '\u{2014}' => out.push_str("\\227"),
            '\u{20b9}' => out.push_str("Rs."),
            // Combining marks have no WinAnsi form; the base letter is kept
            '\u{300}'..='\u{36f}' => {}
            _ => out.push('?'),
        }
    }
    out
}

/// Info dictionary text: ASCII as a literal, anything else as UTF-16BE with a BOM
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Millimeter-to-point mapping for one page
#[derive(Debug, Clone, Copy)]
struct PageSpace {
    height: f64,
}

impl PageSpace {
    fn x(&self, mm: f64) -> f64 {
        Length::from_mm(mm).pt()
    }

    fn y(&self, mm: f64) -> f64 {
        Length::from_mm(self.height - mm).pt()
    }

    fn len(&self, mm: f64) -> f64 {
        Length::from_mm(mm).pt()
    }
}

fn color_components(color: Color) -> String {
    let Color(r, g, b) = color;
    format!(
        "{:.3} {:.3} {:.3}",
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0
    )
}

/// Append one operation, shifted by `(dx, dy)` millimeters
fn push_op(content: &mut String, space: PageSpace, op: &DrawOp, dx: f64, dy: f64) {
    match op {
        DrawOp::Text { x, baseline, size_pt, weight, color, text } => {
            let font = match weight {
                Weight::Regular => "F1",
                Weight::Bold => "F2",
            };
            content.push_str("BT\n");
            content.push_str(&format!("/{} {:.2} Tf\n", font, size_pt));
            content.push_str(&format!("{} rg\n", color_components(*color)));
            content.push_str(&format!(
                "1 0 0 1 {:.2} {:.2} Tm\n",
                space.x(x + dx),
                space.y(baseline + dy)
            ));
            content.push_str(&format!("({}) Tj\n", escape_pdf_string(text)));
            content.push_str("ET\n");
        }
        DrawOp::Rule { x1, x2, y, thickness, color } => {
            content.push_str(&format!("{} RG\n", color_components(*color)));
            content.push_str(&format!("{:.2} w\n", space.len(*thickness)));
            content.push_str(&format!(
                "{:.2} {:.2} m {:.2} {:.2} l S\n",
                space.x(x1 + dx),
                space.y(y + dy),
                space.x(x2 + dx),
                space.y(y + dy)
            ));
        }
        DrawOp::Rect { x, y, width, height, color } => {
            content.push_str(&format!("{} rg\n", color_components(*color)));
            content.push_str(&format!(
                "{:.2} {:.2} {:.2} {:.2} re f\n",
                space.x(x + dx),
                space.y(y + dy + height),
                space.len(*width),
                space.len(*height)
            ));
        }
    }
}

/// Content stream for one page: its blocks in order, then the footer
fn page_content(
    page: &Page,
    rasters: &[Raster],
    geometry: &PageGeometry,
    identity: &FooterIdentity,
) -> Result<String> {
    let space = PageSpace { height: geometry.page.height.mm() };
    let left = geometry.margins.left.mm();
    let mut content = String::new();

    for placement in &page.placements {
        let raster = rasters.get(placement.block).ok_or_else(|| {
            Error::General(format!("No raster for block {}", placement.block))
        })?;
        if raster.ops.is_empty() {
            continue;
        }
        content.push_str("q\n");
        if placement.clipped {
            content.push_str(&format!(
                "{:.2} {:.2} {:.2} {:.2} re W n\n",
                space.x(0.0),
                space.y(placement.y + placement.height),
                space.len(geometry.page.width.mm()),
                space.len(placement.height)
            ));
        }
        for op in &raster.ops {
            push_op(&mut content, space, op, left, placement.y);
        }
        content.push_str("Q\n");
    }

    content.push_str("q\n");
    for op in footer_ops(identity, geometry, page.number) {
        push_op(&mut content, space, &op, 0.0, 0.0);
    }
    content.push_str("Q\n");
    Ok(content)
}

/// Standard Type1 font with WinAnsiEncoding
fn use_standard_font(doc: &mut Document, base_font: &str) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    doc.add_object(Object::Dictionary(font))
}

/// Build the document: one PDF page per packed page, each with its footer
pub fn build_document(
    pages: &[Page],
    rasters: &[Raster],
    geometry: &PageGeometry,
    identity: &FooterIdentity,
    info: &DocumentInfo,
) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = use_standard_font(&mut doc, "Helvetica");
    let bold = use_standard_font(&mut doc, "Helvetica-Bold");

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(regular));
    fonts.set("F2", Object::Reference(bold));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    let resources_id = doc.add_object(Object::Dictionary(resources));

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(geometry.page.width.pt() as f32),
        Object::Real(geometry.page.height.pt() as f32),
    ];

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, rasters, geometry, identity)?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set("MediaBox", Object::Array(media_box.clone()));
        page_dict.set("Resources", Object::Reference(resources_id));
        page_dict.set("Contents", Object::Reference(content_id));
        kids.push(Object::Reference(doc.add_object(Object::Dictionary(page_dict))));
    }

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(kids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages_object));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut info_dict = Dictionary::new();
    info_dict.set("Title", text_string(&info.title));
    info_dict.set("Author", text_string(&info.author));
    info_dict.set("Creator", text_string(&info.creator));
    let info_id = doc.add_object(Object::Dictionary(info_dict));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();
    Ok(doc)
}

/// Serialize a document to bytes
pub fn document_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
