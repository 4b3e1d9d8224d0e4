use crate::document::TextDocument;
use crate::error::BackendError;
use crate::layout::{LaidOutPage, paginate};
use crate::writer::write_document;
use folio_traits::{LayoutCallback, OutputResource, RenderingBackend, WriteCallback};
use folio_types::{LayoutResult, PageCount, PageFormat, PageRange};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;

/// Lets the host cancel an in-flight write. Cancellation is sticky.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct Pagination {
    format: PageFormat,
    pages: Vec<LaidOutPage>,
}

/// Lays out and writes a [`TextDocument`] on a tokio runtime's blocking pool.
#[derive(Debug)]
pub struct LopdfBackend {
    document_name: String,
    document: Arc<TextDocument>,
    runtime: Handle,
    cancel: CancelHandle,
    last_layout: Arc<Mutex<Option<Pagination>>>,
}

impl LopdfBackend {
    pub fn new(
        document_name: impl Into<String>,
        document: Arc<TextDocument>,
        runtime: Handle,
        cancel: CancelHandle,
    ) -> Self {
        Self {
            document_name: document_name.into(),
            document,
            runtime,
            cancel,
            last_layout: Arc::new(Mutex::new(None)),
        }
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }
}

/// Collapses sorted page indices into contiguous ranges.
fn to_ranges(indices: &[usize]) -> Vec<PageRange> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &index in indices {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == index => *end = index,
            _ => runs.push((index, index)),
        }
    }
    runs.into_iter()
        .filter_map(|(start, end)| PageRange::new(start, end))
        .collect()
}

impl RenderingBackend for LopdfBackend {
    fn layout(&self, format: &PageFormat, callback: LayoutCallback) {
        let format = *format;
        let document = Arc::clone(&self.document);
        let last_layout = Arc::clone(&self.last_layout);
        let name = self.document_name.clone();

        self.runtime.spawn_blocking(move || {
            debug!("[LOPDF] Laying out '{}' on {:?}.", name, format.media_size);
            let pages = match paginate(&document, &format) {
                Ok(pages) => pages,
                Err(e) => {
                    warn!("[LOPDF] Layout of '{}' failed: {}", name, e);
                    callback.failed(e.to_string());
                    return;
                }
            };

            let page_count = pages.len();
            let changed = {
                let mut guard = last_layout.lock().unwrap_or_else(|p| p.into_inner());
                let changed = guard
                    .as_ref()
                    .is_none_or(|prev| prev.format != format || prev.pages != pages);
                *guard = Some(Pagination { format, pages });
                changed
            };

            info!("[LOPDF] Laid out '{}' into {} page(s).", name, page_count);
            callback.finished(LayoutResult::new(name, PageCount::Known(page_count), changed));
        });
    }

    fn write(&self, pages: &[PageRange], mut sink: OutputResource, callback: WriteCallback) {
        let requested = pages.to_vec();
        let document = Arc::clone(&self.document);
        let last_layout = Arc::clone(&self.last_layout);
        let cancel = self.cancel.clone();
        let name = self.document_name.clone();

        self.runtime.spawn_blocking(move || {
            let result = (|| -> Result<Vec<PageRange>, BackendError> {
                let guard = last_layout.lock().unwrap_or_else(|p| p.into_inner());
                let pagination = guard.as_ref().ok_or(BackendError::NotLaidOut)?;
                let selected = PageRange::select(&requested, pagination.pages.len());
                let to_write: Vec<&LaidOutPage> =
                    selected.iter().map(|&i| &pagination.pages[i]).collect();

                debug!(
                    "[LOPDF] Writing {} of {} page(s) of '{}' to '{}'.",
                    to_write.len(),
                    pagination.pages.len(),
                    name,
                    sink.path().display()
                );
                write_document(
                    &to_write,
                    pagination.format.media_size.dimensions_pt(),
                    document.title.as_deref(),
                    || cancel.is_cancelled(),
                    &mut sink,
                )?;
                Ok(to_ranges(&selected))
            })();
            drop(sink);

            match result {
                Ok(written) => callback.finished(written),
                Err(BackendError::Cancelled) => {
                    info!("[LOPDF] Write of '{}' cancelled.", name);
                    callback.cancelled()
                }
                Err(e) => {
                    warn!("[LOPDF] Write of '{}' failed: {}", name, e);
                    callback.failed(e.to_string())
                }
            }
        });
    }

    fn name(&self) -> &'static str {
        "LopdfBackend"
    }
}
