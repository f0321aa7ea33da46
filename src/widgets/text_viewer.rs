//! Text viewer state (rendering-agnostic)
//!
//! Documents are word-wrapped to the page width and split into pages of the
//! page height. Pages are shown side by side, so `page_index` always points
//! at the left page of a pair and stays even.

use crate::core::panel::PageControl;
use crate::recent_files::RecentFilesStore;
use anyhow::{anyhow, ensure, Context, Result};
use pdfium_render::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthChar;

/// Page area used until the frontend reports a real one
const DEFAULT_PAGE_ROWS: usize = 30;
const DEFAULT_PAGE_COLS: usize = 60;

pub struct TextDocument {
    pub path: PathBuf,
    pub text: String,
}

impl TextDocument {
    pub fn read(path: &Path) -> Result<Self> {
        let text = if is_pdf(path) {
            pdf_text(path)?
        } else {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read document: {}", path.display()))?
        };
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Text of every PDF page, pages separated by a blank line. Needs the pdfium
/// shared library installed system-wide.
fn pdf_text(path: &Path) -> Result<String> {
    ensure!(path.is_file(), "Failed to read PDF document: {}", path.display());

    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| anyhow!("PDF support unavailable (pdfium library not found): {}", e))?;
    let pdfium = Pdfium::new(bindings);

    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| anyhow!("Failed to open PDF {}: {}", path.display(), e))?;

    let mut pages = Vec::new();
    for (index, page) in document.pages().iter().enumerate() {
        let text = page
            .text()
            .map_err(|e| anyhow!("Failed to extract text of PDF page {}: {}", index + 1, e))?;
        pages.push(text.all());
    }
    debug!("Extracted {} PDF pages from {:?}", pages.len(), path);

    Ok(pages.join("\n\n"))
}

/// One page of wrapped lines
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Char offset in the source text of the first line
    pub start: usize,
    pub lines: Vec<String>,
}

pub struct TextViewerState {
    /// Sidebar entries, in the order they were added
    pub documents: Vec<PathBuf>,
    pub selected: usize,
    pub loaded: Option<TextDocument>,
    pub pages: Vec<Page>,
    pub page_index: usize,
    /// (rows, cols) of a single page
    geometry: (usize, usize),
    store: Box<dyn RecentFilesStore>,
}

impl TextViewerState {
    pub fn new(store: Box<dyn RecentFilesStore>) -> Self {
        let documents = store.load().unwrap_or_else(|e| {
            warn!("Failed to load document list: {:#}", e);
            Vec::new()
        });

        Self {
            documents,
            selected: 0,
            loaded: None,
            pages: Vec::new(),
            page_index: 0,
            geometry: (DEFAULT_PAGE_ROWS, DEFAULT_PAGE_COLS),
            store,
        }
    }

    /// Open a document: select it if listed, otherwise read and list it
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if let Some(idx) = self.documents.iter().position(|p| p == path) {
            self.selected = idx;
            return self.load_selected();
        }

        let doc = TextDocument::read(path)?;
        self.documents.push(path.to_path_buf());
        self.selected = self.documents.len() - 1;
        self.show(doc);
        self.persist();
        Ok(())
    }

    /// Reload the highlighted sidebar entry
    pub fn load_selected(&mut self) -> Result<()> {
        let path = self
            .documents
            .get(self.selected)
            .cloned()
            .context("No document selected")?;
        let doc = TextDocument::read(&path)?;
        self.show(doc);
        Ok(())
    }

    fn show(&mut self, doc: TextDocument) {
        info!("Loaded document {:?} ({} bytes)", doc.path, doc.text.len());
        self.loaded = Some(doc);
        self.page_index = 0;
        self.repaginate();
    }

    /// Drop the highlighted entry; clears the pages if it was the open one
    pub fn remove_selected(&mut self) -> bool {
        if self.selected >= self.documents.len() {
            return false;
        }

        let removed = self.documents.remove(self.selected);
        if self.loaded.as_ref().map(|d| d.path == removed).unwrap_or(false) {
            self.loaded = None;
            self.pages.clear();
            self.page_index = 0;
        }
        self.selected = self.selected.min(self.documents.len().saturating_sub(1));
        self.persist();
        debug!("Removed {:?} from document list", removed);
        true
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.documents.len() {
            self.selected += 1;
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.documents) {
            warn!("Failed to save document list: {:#}", e);
        }
    }

    /// Page area changed: repaginate, staying on the pair that held the
    /// first character on screen
    pub fn set_page_geometry(&mut self, rows: usize, cols: usize) -> bool {
        if rows == 0 || cols == 0 || self.geometry == (rows, cols) {
            return false;
        }
        self.geometry = (rows, cols);

        let anchor = self.pages.get(self.page_index).map(|p| p.start).unwrap_or(0);
        self.repaginate();

        let page = self
            .pages
            .iter()
            .rposition(|p| p.start <= anchor)
            .unwrap_or(0);
        self.page_index = page - page % 2;
        true
    }

    fn repaginate(&mut self) {
        self.pages = match &self.loaded {
            Some(doc) => paginate(&doc.text, self.geometry.0, self.geometry.1),
            None => Vec::new(),
        };
        if self.page_index >= self.pages.len() {
            self.page_index = 0;
        }
    }

    /// Left and right page of the visible pair
    pub fn visible_pair(&self) -> (Option<&Page>, Option<&Page>) {
        (
            self.pages.get(self.page_index),
            self.pages.get(self.page_index + 1),
        )
    }

    pub fn page_label(&self) -> String {
        if self.pages.is_empty() {
            return String::new();
        }
        let last = (self.page_index + 2).min(self.pages.len());
        format!(
            "Pages {}-{} of {}",
            self.page_index + 1,
            last,
            self.pages.len()
        )
    }
}

impl PageControl for TextViewerState {
    fn advance_page(&mut self) -> bool {
        if self.page_index + 2 < self.pages.len() {
            self.page_index += 2;
            true
        } else {
            false
        }
    }

    fn retreat_page(&mut self) -> bool {
        if self.page_index >= 2 {
            self.page_index -= 2;
            true
        } else {
            false
        }
    }
}

/// Word-wrap `text` to `width` terminal columns. Each line carries the char
/// offset of its first character.
pub fn wrap_lines(text: &str, width: usize) -> Vec<(usize, String)> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut offset = 0;

    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        let mut visible = chars.len();
        if visible > 0 && chars[visible - 1] == '\r' {
            visible -= 1;
        }

        if visible == 0 {
            out.push((offset, String::new()));
        }

        let mut start = 0;
        while start < visible {
            // Widest run that fits; a single over-wide char still takes a line
            let mut end = start;
            let mut cols = 0;
            while end < visible {
                let w = chars[end].width().unwrap_or(0);
                if cols + w > width && end > start {
                    break;
                }
                cols += w;
                end += 1;
            }
            let (line_end, next) = if end == visible {
                (end, end)
            } else if chars[end] == ' ' {
                (end, end + 1)
            } else {
                match (start + 1..end).rev().find(|&i| chars[i] == ' ') {
                    Some(space) => (space, space + 1),
                    None => (end, end),
                }
            };
            out.push((offset + start, chars[start..line_end].iter().collect()));
            start = next;
        }

        offset += chars.len() + 1;
    }

    out
}

/// Split wrapped text into pages of `rows` lines
pub fn paginate(text: &str, rows: usize, cols: usize) -> Vec<Page> {
    wrap_lines(text, cols)
        .chunks(rows.max(1))
        .map(|chunk| Page {
            start: chunk[0].0,
            lines: chunk.iter().map(|(_, line)| line.clone()).collect(),
        })
        .collect()
}
