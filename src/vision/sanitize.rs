//! Response text sanitation.
//!
//! Vision models decorate their answers with reasoning blocks, code fences,
//! and surrounding prose. Each transform here is independently testable and
//! the chain is ordered; supporting a new wrapper vocabulary means adding a
//! tag to `REASONING_TAGS`, nothing else.

/// Wrapper tags whose whole block, content included, is discarded.
pub const REASONING_TAGS: &[&str] = &["think", "thinking", "reasoning", "thought", "reflection"];

/// Apply the full sanitation chain.
pub fn sanitize(text: &str) -> String {
    let stripped = strip_reasoning_blocks(text);
    strip_code_fences(&stripped)
}

/// Remove every well-formed `<tag>...</tag>` block for the known reasoning
/// vocabularies. An unclosed opener is left in place; brace extraction
/// decides later whether a payload remains.
pub fn strip_reasoning_blocks(text: &str) -> String {
    let mut result = text.to_string();
    for tag in REASONING_TAGS {
        let open = format!("<{}>", tag);
        let close = format!("</{}>", tag);
        loop {
            let Some(start) = result.find(&open) else {
                break;
            };
            let Some(close_rel) = result[start + open.len()..].find(&close) else {
                break;
            };
            let end = start + open.len() + close_rel + close.len();
            result.replace_range(start..end, "");
        }
    }
    result
}

/// Drop code-fence delimiters, keeping the fenced content.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}
