use std::fs;
use std::path::Path;

/// Right-justifies an integer in a fixed-width field, matching the
/// fixed-column card layout FLUKA readers expect.
pub fn format_fixed_i64(value: i64, width: usize) -> String {
    format!("{value:>width$}")
}

/// Writes rendered deck text exactly as built. Output line framing must
/// mirror the source deck byte-for-byte, so no newline normalization is
/// applied.
pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}
