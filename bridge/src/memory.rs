//! Guest linear memory reads.
//!
//! [`decode_span`] is the Memory Decoder used by every import that receives
//! guest text. It never fails, degrading to a clamped or lossy string
//! instead, because a bad span must not trap the guest.

use std::borrow::Cow;

use masm_hostapi::Span;

/// How faithfully a span was decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// In bounds and valid UTF-8.
    Exact(String),
    /// In bounds; invalid sequences became U+FFFD.
    Lossy(String),
    /// The span ran past the end of memory; only the in-bounds prefix
    /// (possibly empty) was decoded.
    Clamped(String),
}

impl Decoded {
    pub fn is_exact(&self) -> bool {
        matches!(self, Decoded::Exact(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Decoded::Exact(s) | Decoded::Lossy(s) | Decoded::Clamped(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Decoded::Exact(s) | Decoded::Lossy(s) | Decoded::Clamped(s) => s,
        }
    }
}

/// Decode a span of guest memory as UTF-8, best effort.
pub fn decode_span(mem: &[u8], span: Span) -> Decoded {
    let start = (span.ptr as usize).min(mem.len());
    let end = span.end().min(mem.len() as u64) as usize;
    let clamped = span.end() > mem.len() as u64;
    let text = String::from_utf8_lossy(&mem[start..end]);
    match (clamped, text) {
        (true, text) => Decoded::Clamped(text.into_owned()),
        (false, Cow::Borrowed(s)) => Decoded::Exact(s.to_string()),
        (false, Cow::Owned(s)) => Decoded::Lossy(s),
    }
}
