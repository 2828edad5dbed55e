//! Overlapping text chunker.
//!
//! Splits normalized document text into passages of a fixed target length
//! with a fixed overlap between neighbors, so context survives chunk
//! boundaries. Cuts prefer natural boundaries (paragraph, newline,
//! sentence, word) and only fall back to a hard character cut when a
//! window contains none of them.

/// Target chunk length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Overlap between neighboring chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Boundary preference order for cut points.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Fixed-size overlapping chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    /// Create a chunker. The overlap is clamped below the target size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        let chunk_overlap = chunk_overlap.min(chunk_size.saturating_sub(1));
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split text into ordered overlapping passages.
    ///
    /// Empty (or whitespace-only) input yields no chunks; any other input
    /// yields at least one. The same input always yields the same sequence.
    pub fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let len = text.len();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < len {
            let mut hard_end = if start + self.chunk_size >= len {
                len
            } else {
                snap_back(text, start + self.chunk_size)
            };
            if hard_end <= start {
                // A single multi-byte char wider than the window; take it whole.
                hard_end = snap_forward(text, start + 1);
            }

            let end = if hard_end >= len {
                len
            } else {
                self.cut_point(text, start, hard_end)
            };

            let piece = text[start..end].trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }

            if end >= len {
                break;
            }

            let next = snap_forward(text, end.saturating_sub(self.chunk_overlap));
            start = if next > start { next } else { end };
        }

        if chunks.is_empty() {
            chunks.push(text.to_string());
        }
        chunks
    }

    /// Pick a cut inside `[start, hard_end)`, preferring the latest natural
    /// boundary that still leaves the chunk at least half full.
    fn cut_point(&self, text: &str, start: usize, hard_end: usize) -> usize {
        let window = &text[start..hard_end];
        let floor = self.chunk_size / 2;
        for sep in SEPARATORS {
            if let Some(pos) = window.rfind(sep) {
                let cut = pos + sep.len();
                if cut >= floor {
                    return start + cut;
                }
            }
        }
        hard_end
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

/// Snap a byte index back to the nearest valid UTF-8 char boundary.
fn snap_back(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Snap a byte index forward to the nearest valid UTF-8 char boundary.
fn snap_forward(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
