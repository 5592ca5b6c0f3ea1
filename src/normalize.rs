//! Text normalization applied to extracted text before any AI call.
//!
//! Two passes, in this order:
//! 1. Collapse every maximal whitespace run into a single ASCII space.
//! 2. Drop every character that is not ASCII alphanumeric, whitespace,
//!    or one of `. , ? !`.
//!
//! Intentionally lossy: non-ASCII letters are dropped. The order of the
//! passes makes the whole thing idempotent.

pub fn normalize(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace_run {
                collapsed.push(' ');
                in_whitespace_run = true;
            }
        } else {
            collapsed.push(c);
            in_whitespace_run = false;
        }
    }

    collapsed
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '.' | ',' | '?' | '!')
        })
        .collect()
}
