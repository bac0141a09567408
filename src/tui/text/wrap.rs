//! Text wrapping for display.

/// Split text into lines of max width (columns). Uses textwrap for correct UTF-8 handling.
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    textwrap::wrap(s, width)
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}

/// Split a message into display lines respecting message newlines, then wrap to `width`.
pub(crate) fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in msg.split('\n') {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            out.extend(wrap_text(line, width));
        }
    }
    out
}

/// Character ranges `[start, end)` cutting a line of `len` chars into pieces of at most `width`.
/// Code is hard-wrapped so indentation and spacing survive; an empty line yields one empty range.
pub(crate) fn char_chunks(len: usize, width: usize) -> Vec<(usize, usize)> {
    if len == 0 || width == 0 {
        return vec![(0, len)];
    }
    (0..len)
        .step_by(width)
        .map(|start| (start, (start + width).min(len)))
        .collect()
}
