//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233 for resumable bundle and
//! audio downloads. Multi-range and malformed headers are ignored and the
//! full body is served instead.

/// A byte range resolved against a concrete file size (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes this range selects.
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of resolving a Range header against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve the whole file (no header, or a form we ignore)
    Full,
    /// Serve a 206 with this range
    Partial(ByteRange),
    /// Range cannot be satisfied; respond 416
    NotSatisfiable,
}

/// Resolve a Range header value against the file size.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn resolve_range(header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    // Single range only
    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if file_size == 0 {
        return RangeOutcome::NotSatisfiable;
    }

    // Suffix form: "-500" selects the final 500 bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 {
            return RangeOutcome::NotSatisfiable;
        }
        return RangeOutcome::Partial(ByteRange {
            start: file_size.saturating_sub(suffix),
            end: file_size - 1,
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::NotSatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        end.min(file_size - 1)
    };

    if start > end {
        return RangeOutcome::NotSatisfiable;
    }

    RangeOutcome::Partial(ByteRange { start, end })
}
