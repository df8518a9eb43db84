//! Reassembly of complete lines from arbitrary output fragments.

/// Longest line held back while waiting for its newline.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Buffers bytes until whole lines are available.
///
/// Child output arrives in fragments that need not be line-aligned. A line
/// is only handed out once its terminating newline has been seen, or at end
/// of stream via [`LineBuffer::finish`]. A line growing past the length
/// limit is handed out in pieces of at most that length.
#[derive(Debug)]
pub struct LineBuffer {
    pending: Vec<u8>,
    max_len: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer that splits lines longer than `max_len` bytes.
    #[must_use]
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            pending: Vec::new(),
            max_len: max_len.max(1),
        }
    }

    /// Add a fragment and return every line it completes, in order.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn push(&mut self, fragment: &[u8]) -> Vec<String> {
        // Held-back bytes never contain a newline, so only the new fragment is scanned.
        let Some(last_newline) = fragment.iter().rposition(|&b| b == b'\n') else {
            self.pending.extend_from_slice(fragment);
            return self.drain_oversized(Vec::new());
        };

        self.pending.extend_from_slice(&fragment[..last_newline]);
        let complete = std::mem::take(&mut self.pending);
        self.pending.extend_from_slice(&fragment[last_newline + 1..]);

        let mut lines = Vec::new();
        for line in complete.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            for piece in line.chunks(self.max_len) {
                lines.push(decode_line(piece));
            }
            if line.is_empty() {
                lines.push(String::new());
            }
        }
        self.drain_oversized(lines)
    }

    fn drain_oversized(&mut self, mut lines: Vec<String>) -> Vec<String> {
        while self.pending.len() > self.max_len {
            let rest = self.pending.split_off(self.max_len);
            let piece = std::mem::replace(&mut self.pending, rest);
            lines.push(decode_line(&piece));
        }
        lines
    }

    /// Bytes held back waiting for a newline.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Take the trailing partial line at end of stream, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
