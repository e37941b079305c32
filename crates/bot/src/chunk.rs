//! Log formatting — fenced chunks under the chat transport's message limit.

use std::borrow::Cow;

/// Discord rejects messages over 2000 characters.
pub const MESSAGE_CEILING: usize = 2000;
/// Margin kept below the ceiling so the closing fence always fits.
const CHUNK_MARGIN: usize = 10;

const FENCE_OPEN: &str = "```\n";
const FENCE_CLOSE: &str = "```";

/// Split log lines into fenced code blocks, each below the message ceiling.
/// A chunk boundary falls only between whole lines; a single line longer
/// than a chunk can hold is clipped, never split across chunks.
pub fn format_log_chunks(lines: &[String]) -> Vec<String> {
    if lines.is_empty() {
        return vec!["No logs available.".to_string()];
    }

    let limit = MESSAGE_CEILING - CHUNK_MARGIN;
    let max_line = limit - FENCE_OPEN.len() - FENCE_CLOSE.len() - 1;

    let mut chunks = Vec::new();
    let mut current = String::from(FENCE_OPEN);

    for line in lines {
        let line = clip_line(line, max_line);
        if current.len() + line.len() + 1 + FENCE_CLOSE.len() > limit && current != FENCE_OPEN {
            current.push_str(FENCE_CLOSE);
            chunks.push(current);
            current = String::from(FENCE_OPEN);
        }
        current.push_str(&line);
        current.push('\n');
    }

    if current != FENCE_OPEN {
        current.push_str(FENCE_CLOSE);
        chunks.push(current);
    }

    chunks
}

/// Clip an overlong line to `max` bytes on a char boundary, marking the cut.
fn clip_line(line: &str, max: usize) -> Cow<'_, str> {
    if line.len() <= max {
        return Cow::Borrowed(line);
    }
    let mut end = max - 3;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}...", &line[..end]))
}
