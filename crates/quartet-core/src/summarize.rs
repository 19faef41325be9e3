//! Response summarization
//!
//! Prior agent output is compressed into bounded digests before inclusion in
//! later prompts, so context never grows without bound across the four
//! sequential calls.

/// Marker appended when a hard character cut is unavoidable
const TRUNCATION_MARKER: char = '…';

/// Headroom kept below `max_len` when accumulating whole sentences
const SENTENCE_MARGIN: usize = 10;

/// Compress `message` to at most `max_len` characters (plus a one-character
/// marker when a hard cut was needed).
///
/// Messages already within the bound are returned unchanged. Otherwise
/// sentence-like units are accumulated greedily while the running total
/// stays under `max_len` minus a small margin. If not even the first
/// sentence fits, the text is hard-cut with an ellipsis marker.
///
/// The output is non-empty whenever the input is non-empty.
#[must_use]
pub fn summarize(message: &str, max_len: usize) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= max_len {
        return trimmed.to_string();
    }

    let budget = max_len.saturating_sub(SENTENCE_MARGIN);
    let mut out = String::new();
    let mut used = 0;

    for sentence in trimmed.split_inclusive(['.', '!', '?']) {
        let len = sentence.chars().count();
        if used + len > budget {
            break;
        }
        out.push_str(sentence);
        used += len;
    }

    let out = out.trim();
    if out.is_empty() {
        // One run-on sentence longer than the budget: hard cut
        let mut cut: String = trimmed.chars().take(budget).collect();
        cut.truncate(cut.trim_end().len());
        cut.push(TRUNCATION_MARKER);
        cut
    } else {
        out.to_string()
    }
}
