use super::{char_chunks, wrap_message};

#[test]
fn wrap_message_preserves_newlines() {
    let lines = wrap_message("line1\nline2", 100);
    assert_eq!(lines, ["line1", "line2"]);
}

#[test]
fn wrap_message_wraps_long_line() {
    let lines = wrap_message("hello world test", 8);
    assert_eq!(lines, ["hello", "world", "test"]);
}

#[test]
fn wrap_message_empty_lines() {
    let lines = wrap_message("a\n\nb", 100);
    assert_eq!(lines, ["a", "", "b"]);
}

#[test]
fn wrap_message_keeps_leading_indent() {
    let lines = wrap_message("  - item", 100);
    assert_eq!(lines, ["  - item"]);
}

#[test]
fn char_chunks_splits_evenly() {
    assert_eq!(char_chunks(10, 4), [(0, 4), (4, 8), (8, 10)]);
    assert_eq!(char_chunks(4, 4), [(0, 4)]);
}

#[test]
fn char_chunks_empty_line() {
    assert_eq!(char_chunks(0, 4), [(0, 0)]);
}
