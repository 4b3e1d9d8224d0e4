use folio_render_lopdf::{Block, TextDocument, TextSurface};
use folio_traits::{
    ContentSurface, LayoutCallback, LayoutCompletion, OutputResource, WriteCallback, WriteCompletion,
};
use folio_types::{MediaSize, PageCount, PageFormat, PageRange};
use lopdf::Document;
use tempfile::tempdir;
use tokio::sync::oneshot;

fn three_page_document() -> TextDocument {
    TextDocument::new(
        Some("Report".into()),
        vec![
            Block::Paragraph("alpha".into()),
            Block::PageBreak,
            Block::Paragraph("beta".into()),
            Block::PageBreak,
            Block::Paragraph("gamma".into()),
        ],
    )
}

async fn layout(backend: &dyn folio_traits::RenderingBackend, format: PageFormat) -> LayoutCompletion {
    let (tx, rx) = oneshot::channel();
    backend.layout(&format, LayoutCallback::new(move |c| {
        let _ = tx.send(c);
    }));
    rx.await.unwrap()
}

async fn write(
    backend: &dyn folio_traits::RenderingBackend,
    pages: &[PageRange],
    sink: OutputResource,
) -> WriteCompletion {
    let (tx, rx) = oneshot::channel();
    backend.write(pages, sink, WriteCallback::new(move |c| {
        let _ = tx.send(c);
    }));
    rx.await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn layout_reports_page_count_and_change() {
    let surface = TextSurface::on_current_runtime(three_page_document()).unwrap();
    let backend = surface.create_backend("report.pdf");

    let LayoutCompletion::Finished(first) = layout(backend.as_ref(), PageFormat::fixed()).await else {
        panic!("layout failed");
    };
    assert_eq!(first.document_name, "report.pdf");
    assert_eq!(first.page_count, PageCount::Known(3));
    assert!(first.changed);

    let LayoutCompletion::Finished(second) = layout(backend.as_ref(), PageFormat::fixed()).await else {
        panic!("layout failed");
    };
    assert!(!second.changed, "identical layout should not be marked as changed");

    let letter = PageFormat {
        media_size: MediaSize::NaLetter,
        ..PageFormat::fixed()
    };
    let LayoutCompletion::Finished(third) = layout(backend.as_ref(), letter).await else {
        panic!("layout failed");
    };
    assert!(third.changed);
}

#[tokio::test(flavor = "multi_thread")]
async fn write_produces_the_selected_pages() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let surface = TextSurface::on_current_runtime(three_page_document()).unwrap();
    let backend = surface.create_backend("report.pdf");
    layout(backend.as_ref(), PageFormat::fixed()).await;

    let sink = OutputResource::acquire(&path).unwrap();
    let pages = [PageRange::single(0), PageRange::single(2)];
    let completion = write(backend.as_ref(), &pages, sink).await;
    assert_eq!(completion, WriteCompletion::Finished(vec![PageRange::single(0), PageRange::single(2)]));

    let doc = Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
    assert!(doc.extract_text(&[2]).unwrap().contains("gamma"));
}

#[tokio::test(flavor = "multi_thread")]
async fn non_ascii_receipt_text_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("receipt.pdf");
    let document = TextDocument::new(None, vec![Block::Paragraph("Café total £5".into())]);
    let surface = TextSurface::on_current_runtime(document).unwrap();
    let backend = surface.create_backend("receipt.pdf");
    layout(backend.as_ref(), PageFormat::fixed()).await;

    let sink = OutputResource::acquire(&path).unwrap();
    let completion = write(backend.as_ref(), &[PageRange::ALL_PAGES], sink).await;
    assert!(matches!(completion, WriteCompletion::Finished(_)));

    let text = Document::load(&path).unwrap().extract_text(&[1]).unwrap();
    assert!(text.contains("Café total £5"), "extracted {text:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn write_without_layout_fails() {
    let dir = tempdir().unwrap();
    let surface = TextSurface::on_current_runtime(three_page_document()).unwrap();
    let backend = surface.create_backend("report.pdf");

    let sink = OutputResource::acquire(dir.path().join("report.pdf")).unwrap();
    let completion = write(backend.as_ref(), &[PageRange::ALL_PAGES], sink).await;
    assert!(matches!(completion, WriteCompletion::Failed(msg) if msg.contains("before the document was laid out")));
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_surface_reports_cancellation() {
    let dir = tempdir().unwrap();
    let surface = TextSurface::on_current_runtime(three_page_document()).unwrap();
    let backend = surface.create_backend("report.pdf");
    layout(backend.as_ref(), PageFormat::fixed()).await;

    surface.cancel_handle().cancel();
    let sink = OutputResource::acquire(dir.path().join("report.pdf")).unwrap();
    let completion = write(backend.as_ref(), &[PageRange::ALL_PAGES], sink).await;
    assert_eq!(completion, WriteCompletion::Cancelled);
}

#[tokio::test(flavor = "multi_thread")]
async fn layout_failure_carries_a_diagnostic() {
    let surface = TextSurface::on_current_runtime(three_page_document()).unwrap();
    let backend = surface.create_backend("report.pdf");
    let tiny = PageFormat {
        media_size: MediaSize::Custom {
            width_mils: 500,
            height_mils: 500,
        },
        ..PageFormat::fixed()
    };

    let completion = layout(backend.as_ref(), tiny).await;
    assert!(matches!(completion, LayoutCompletion::Failed(msg) if msg.contains("no room for content")));
}

#[test]
fn dispose_is_visible_through_clones() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let surface = TextSurface::new(TextDocument::default(), runtime.handle().clone());
    let mut owned = surface.clone();

    owned.dispose();
    assert!(surface.is_disposed());
}
