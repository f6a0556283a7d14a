use std::fs::File;
use std::io::Read;
use std::os::unix::io::{FromRawFd, RawFd};

use lopdf::Document;

use crate::error::SignError;
use crate::geometry::ViewportBounds;
use crate::state::{AppState, Screen};

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    pub source_uri: Option<String>,
    pub page_count: Option<u32>,
    pub current_page: u32,
    /// Latest viewport reported by the renderer's layout pass.
    pub bounds: Option<ViewportBounds>,
}

impl DocumentState {
    pub const fn new() -> Self {
        Self {
            source_uri: None,
            page_count: None,
            current_page: 0,
            bounds: None,
        }
    }

    /// Clears everything tied to the open document; `bounds` is kept.
    pub fn reset_session(&mut self) {
        self.source_uri = None;
        self.page_count = None;
        self.current_page = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.page_count.is_some()
    }
}

/// Where the picked PDF bytes come from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Fd(i32),
    Path(String),
}

pub fn read_source(source: &DocumentSource) -> Result<Vec<u8>, SignError> {
    match source {
        DocumentSource::Fd(fd) => read_fd(*fd as RawFd),
        DocumentSource::Path(path) => {
            std::fs::read(path).map_err(|e| SignError::DocumentLoad(format!("pdf_read_failed:{e}")))
        }
    }
}

fn read_fd(fd: RawFd) -> Result<Vec<u8>, SignError> {
    if fd < 0 {
        return Err(SignError::DocumentLoad("invalid_fd".into()));
    }
    // Kotlin hands over ownership of the descriptor; dropping the File closes it.
    let mut file = unsafe { File::from_raw_fd(fd) };
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|e| SignError::DocumentLoad(format!("pdf_read_failed:{e}")))?;
    Ok(buffer)
}

/// Parse the bytes and return the page count.
pub fn inspect_document(bytes: &[u8]) -> Result<u32, SignError> {
    if bytes.is_empty() {
        return Err(SignError::DocumentLoad("empty_stream".into()));
    }
    let doc = Document::load_mem(bytes)
        .map_err(|e| SignError::DocumentLoad(format!("pdf_parse_failed:{e}")))?;
    let pages = doc.get_pages().len() as u32;
    if pages == 0 {
        return Err(SignError::DocumentLoad("no_pages".into()));
    }
    Ok(pages)
}

/// Open a picked document. State is only touched once the bytes parse.
pub fn handle_document_open(
    state: &mut AppState,
    source: DocumentSource,
    uri: Option<&str>,
) -> Result<u32, SignError> {
    let bytes = read_source(&source)?;
    let page_count = inspect_document(&bytes)?;

    state.begin_document_session();
    state.document.source_uri = uri.map(|u| u.to_string()).or_else(|| match &source {
        DocumentSource::Path(path) => Some(path.clone()),
        DocumentSource::Fd(_) => None,
    });
    state.document.page_count = Some(page_count);
    state.document.current_page = 0;
    state.push_screen(Screen::Document);
    log::info!(target: "PDFView", "opened document with {page_count} pages");
    // The viewer may already be laid out from the previous document.
    place_overlay_if_ready(state);
    Ok(page_count)
}

/// Hidden -> PositionedDefault as soon as a document is loaded and the
/// viewport has a usable size.
fn place_overlay_if_ready(state: &mut AppState) {
    let Some(bounds) = state.document.bounds else {
        return;
    };
    if !state.document.is_loaded() {
        return;
    }
    if bounds.is_degenerate() {
        log::debug!(target: "PDFView", "layout pass reported empty viewport {bounds:?}");
        return;
    }
    if state.overlay.place_default(&bounds) {
        log::debug!(target: "PDFView", "overlay placed at default position");
    }
}

/// Layout-change notification from the renderer.
pub fn handle_layout_changed(state: &mut AppState, bounds: ViewportBounds) {
    state.document.bounds = Some(bounds);
    place_overlay_if_ready(state);
}

/// Page-change notification; bounds are re-read by the renderer at the same time.
pub fn handle_page_changed(
    state: &mut AppState,
    page: u32,
    bounds: Option<ViewportBounds>,
) -> Result<(), SignError> {
    let page_count = state.document.page_count.ok_or(SignError::NoDocument)?;
    if page >= page_count {
        return Err(SignError::InvalidCommand(format!(
            "page_out_of_range:{page}/{page_count}"
        )));
    }
    state.document.current_page = page;
    if let Some(bounds) = bounds {
        handle_layout_changed(state, bounds);
    }
    Ok(())
}
