//! Output bounding and overflow persistence
//!
//! Every tool result passes through the same fixed line/byte budget so
//! downstream consumption sees a predictable size envelope. When truncation
//! occurs the full content is persisted to a temporary artifact first, and a
//! human-readable notice naming the artifact is appended to the bounded
//! text.

mod overflow;
mod truncate;

pub use overflow::{format_size, overflow_dir, persist_overflow, persist_overflow_in};
pub use truncate::{truncate_head, TruncationMeta, TruncationResult, MAX_OUTPUT_BYTES, MAX_OUTPUT_LINES};

use anyhow::Result;

/// Bound a tool's textual output against the system-wide budget.
///
/// Unchanged content passes through untouched. Truncated content gets the
/// overflow artifact written first; only a successful write earns the
/// appended notice, a failed write propagates.
pub async fn bound_tool_output(tool: &str, content: &str) -> Result<String> {
    let result = truncate_head(content, MAX_OUTPUT_LINES, MAX_OUTPUT_BYTES);
    let Some(meta) = &result.meta else {
        return Ok(result.content);
    };

    let path = persist_overflow(tool, content).await?;
    let notice = format!(
        "\n\n[Output truncated: kept {} of {} lines ({} of {}). Full output: {}]",
        meta.output_lines,
        meta.total_lines,
        format_size(meta.output_bytes),
        format_size(meta.total_bytes),
        path.display()
    );

    Ok(result.content + &notice)
}
