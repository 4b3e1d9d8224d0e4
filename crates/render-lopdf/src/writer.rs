use crate::encoding::{text_string, win_ansi_string};
use crate::error::BackendError;
use crate::layout::LaidOutPage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::Write;

/// Builds a PDF from `pages` and saves it to `out`.
///
/// `should_stop` is polled before each page; when it returns `true` the write
/// is abandoned with [`BackendError::Cancelled`] and nothing is written.
pub(crate) fn write_document<W: Write>(
    pages: &[&LaidOutPage],
    page_size: (f32, f32),
    title: Option<&str>,
    should_stop: impl Fn() -> bool,
    out: &mut W,
) -> Result<(), BackendError> {
    let (page_width, page_height) = page_size;
    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        if should_stop() {
            return Err(BackendError::Cancelled);
        }

        let mut content = Content { operations: vec![] };
        for line in &page.lines {
            let baseline = page_height - line.y - line.font_size;
            content.operations.push(Operation::new("BT", vec![]));
            content
                .operations
                .push(Operation::new("Tf", vec!["F1".into(), line.font_size.into()]));
            content
                .operations
                .push(Operation::new("Td", vec![line.x.into(), baseline.into()]));
            content
                .operations
                .push(Operation::new("Tj", vec![win_ansi_string(&line.text)]));
            content.operations.push(Operation::new("ET", vec![]));
        }

        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    document.trailer.set("Root", catalog_id);
    if let Some(title) = title {
        let info_id = document.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => Object::string_literal("folio"),
        });
        document.trailer.set("Info", info_id);
    }

    document.save_to(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacedLine;
    use std::cell::Cell;

    fn page(text: &str) -> LaidOutPage {
        LaidOutPage {
            lines: vec![PlacedLine {
                text: text.into(),
                x: 36.0,
                y: 36.0,
                font_size: 11.0,
            }],
        }
    }

    #[test]
    fn writes_a_loadable_pdf_with_every_page() {
        let (first, second) = (page("first"), page("second"));
        let mut out = Vec::new();
        write_document(&[&first, &second], (595.0, 842.0), Some("Doc"), || false, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("%PDF-1.7"));
        assert!(text.trim_end().ends_with("%%EOF"));

        let doc = Document::load_mem(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(doc.extract_text(&[2]).unwrap().contains("second"));
    }

    #[test]
    fn non_ascii_text_survives_a_reload() {
        let receipt = page("Café total £5 – “paid”");
        let mut out = Vec::new();
        write_document(&[&receipt], (595.0, 842.0), Some("Reçu"), || false, &mut out).unwrap();

        let doc = Document::load_mem(&out).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Café total £5"), "extracted {text:?}");

        let info = doc.trailer.get(b"Info").and_then(Object::as_reference).unwrap();
        let title = doc.get_dictionary(info).unwrap().get(b"Title").unwrap().as_str().unwrap();
        let units: Vec<u16> = title[2..]
            .chunks(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        assert_eq!(String::from_utf16(&units).unwrap(), "Reçu");
    }

    #[test]
    fn stops_between_pages_when_asked() {
        let (first, second) = (page("first"), page("second"));
        let polls = Cell::new(0);
        let mut out = Vec::new();
        let result = write_document(
            &[&first, &second],
            (595.0, 842.0),
            None,
            || {
                polls.set(polls.get() + 1);
                polls.get() > 1
            },
            &mut out,
        );

        assert!(matches!(result, Err(BackendError::Cancelled)));
        assert!(out.is_empty());
    }
}
