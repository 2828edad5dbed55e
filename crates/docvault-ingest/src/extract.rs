//! Source document extraction.
//!
//! Reads a file from the source folder and produces a [`DocumentRecord`]:
//! normalized text plus the metadata the version store needs (size,
//! modification time, page count, content fingerprint). PDF is the primary
//! format; plain text and markdown pass through unchanged. A failure on one
//! file never aborts the rest of the corpus.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use docvault_core::{DocumentId, Error, Result};
use docvault_index::DocumentRecord;

use crate::fingerprint::fingerprint;

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    PlainText,
    Markdown,
    Unsupported,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" => Self::PlainText,
            "md" | "mdx" => Self::Markdown,
            _ => Self::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

fn file_type_of(path: &Path) -> FileType {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    FileType::from_extension(ext)
}

/// List supported source files in a folder, sorted by file name.
///
/// The stable enumeration order keeps chunk-to-vector alignment
/// reproducible across rebuilds of an identical corpus.
pub fn list_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && file_type_of(&path).is_supported() {
            files.push(path);
        }
    }
    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(files)
}

/// Current source-folder state: file name → modification time.
pub fn source_listing(dir: &Path) -> Result<BTreeMap<String, DateTime<Utc>>> {
    let mut listing = BTreeMap::new();
    for path in list_source_files(dir)? {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        let meta = std::fs::metadata(&path)?;
        listing.insert(name, DateTime::<Utc>::from(meta.modified()?));
    }
    Ok(listing)
}

/// Extract one source file into a [`DocumentRecord`].
pub fn extract_document(path: &Path) -> Result<DocumentRecord> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Extract(format!("unusable file name: {}", path.display())))?
        .to_string();

    let meta = std::fs::metadata(path)?;
    let modified_at = DateTime::<Utc>::from(meta.modified()?);
    let created_at = meta
        .created()
        .map(DateTime::<Utc>::from)
        .unwrap_or(modified_at);

    let (raw_text, page_count) = match file_type_of(path) {
        FileType::Pdf => extract_pdf(path)?,
        FileType::PlainText | FileType::Markdown => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| Error::Extract(format!("{}: {}", name, e)))?;
            (text, 1)
        }
        FileType::Unsupported => {
            return Err(Error::Extract(format!("unsupported file type: {}", name)));
        }
    };

    let full_text = normalize_text(&raw_text);
    if full_text.is_empty() {
        return Err(Error::Extract(format!("no extractable text in {}", name)));
    }

    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(&name)
        .to_string();

    Ok(DocumentRecord {
        fingerprint: fingerprint(&full_text),
        id: DocumentId::File(name),
        title,
        full_text,
        page_count,
        byte_size: meta.len(),
        modified_at,
        created_at,
    })
}

/// Extract every supported file in the folder, in file-name order.
///
/// Per-file failures are logged and skipped; an empty folder yields zero
/// records and the caller decides the fallback policy.
pub fn extract_corpus(dir: &Path) -> Result<Vec<DocumentRecord>> {
    let mut records = Vec::new();
    for path in list_source_files(dir)? {
        match extract_document(&path) {
            Ok(record) => {
                debug!(
                    "Extracted {}: {} chars, {} page(s)",
                    record.id.name(),
                    record.full_text.len(),
                    record.page_count
                );
                records.push(record);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
            }
        }
    }
    Ok(records)
}

fn extract_pdf(path: &Path) -> Result<(String, usize)> {
    let bytes = std::fs::read(path)?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| Error::Extract(format!("{}: {}", path.display(), e)))?;

    // Page count is informational; a count failure does not reject the file.
    let page_count = match lopdf::Document::load_mem(&bytes) {
        Ok(doc) => doc.get_pages().len(),
        Err(e) => {
            debug!("Page count unavailable for {}: {}", path.display(), e);
            0
        }
    };

    Ok((text, page_count))
}

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\x0B\x0C]+").unwrap());
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize extracted text: collapse whitespace runs within lines, trim
/// line edges, and cap blank-line runs at one paragraph break.
pub fn normalize_text(raw: &str) -> String {
    let collapsed = SPACE_RUNS.replace_all(raw, " ");
    let trimmed_lines = collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_RUNS.replace_all(&trimmed_lines, "\n\n").trim().to_string()
}
