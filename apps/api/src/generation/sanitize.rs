//! Text Sanitizer — strips markdown artifacts from LLM output before display or export.
//!
//! Steps per pass, in order:
//! 1. emphasis markers (`**`, `__`, then any lone `*` or `_`)
//! 2. leading heading markers (`#`, `##`, ...) on every line
//! 3. every literal `--`
//! 4. surrounding whitespace of the whole text
//!
//! A later step can expose something an earlier one removes (`--# Title`,
//! ` # Title` after trimming), so passes repeat until the text is stable.
//! Each pass only deletes characters, which bounds the loop.

use once_cell::sync::Lazy;
use regex::Regex;

static DOUBLE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*|__").unwrap());
static SINGLE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*_]").unwrap());
// Horizontal whitespace only: a bare `#` line must not swallow the line break after it.
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+[ \t]*").unwrap());

/// Returns `raw` with markdown emphasis, headings and `--` separators removed.
pub fn sanitize(raw: &str) -> String {
    let mut current = sanitize_pass(raw);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(text: &str) -> String {
    let text = DOUBLE_EMPHASIS.replace_all(text, "");
    let text = SINGLE_EMPHASIS.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = text.replace("--", "");
    text.trim().to_string()
}
