//! Head-anchored truncation

/// Maximum lines a tool returns directly.
pub const MAX_OUTPUT_LINES: usize = 2000;

/// Maximum bytes a tool returns directly.
pub const MAX_OUTPUT_BYTES: usize = 50 * 1024; // 50KB

/// Size accounting for a truncated result; present iff truncation occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationMeta {
    pub output_lines: usize,
    pub total_lines: usize,
    pub output_bytes: usize,
    pub total_bytes: usize,
}

/// Result of a truncation pass
#[derive(Debug, Clone)]
pub struct TruncationResult {
    pub content: String,
    pub truncated: bool,
    pub meta: Option<TruncationMeta>,
}

/// Keep content from the start up to whichever budget is hit first.
///
/// If the very first line alone exceeds the byte budget, the result is the
/// byte-clamped prefix of that line (on a UTF-8 boundary), never an empty
/// string. Reported totals always reflect the true size of the input.
pub fn truncate_head(content: &str, max_lines: usize, max_bytes: usize) -> TruncationResult {
    let total_bytes = content.len();
    let lines: Vec<&str> = content.split('\n').collect();
    let total_lines = lines.len();

    // No truncation needed
    if total_lines <= max_lines && total_bytes <= max_bytes {
        return TruncationResult {
            content: content.to_string(),
            truncated: false,
            meta: None,
        };
    }

    // First line alone blows the byte budget: keep its clamped prefix.
    let first_line = lines.first().copied().unwrap_or("");
    if first_line.len() > max_bytes {
        let clamped = clamp_to_boundary(first_line, max_bytes);
        return TruncationResult {
            content: clamped.to_string(),
            truncated: true,
            meta: Some(TruncationMeta {
                output_lines: usize::from(!clamped.is_empty()),
                total_lines,
                output_bytes: clamped.len(),
                total_bytes,
            }),
        };
    }

    let mut output = String::new();
    let mut line_count = 0;
    let mut byte_count: usize = 0;

    for (i, line) in lines.iter().enumerate() {
        if i >= max_lines {
            break;
        }

        let line_bytes = line.len() + usize::from(i > 0); // +1 for newline

        if byte_count + line_bytes > max_bytes {
            break;
        }

        if i > 0 {
            output.push('\n');
        }
        output.push_str(line);
        line_count += 1;
        byte_count += line_bytes;
    }

    let output_bytes = output.len();

    TruncationResult {
        content: output,
        truncated: true,
        meta: Some(TruncationMeta {
            output_lines: line_count,
            total_lines,
            output_bytes,
            total_bytes,
        }),
    }
}

/// Clamp a string to a byte limit on a UTF-8 character boundary.
fn clamp_to_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
