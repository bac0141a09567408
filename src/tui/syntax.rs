//! Syntax highlighting for code blocks using syntect.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::constants::Palette;

/// Convert syntect Color to ratatui Color. Alpha 0 => None (colourless).
fn translate_colour(c: syntect::highlighting::Color) -> Option<Color> {
    let syntect::highlighting::Color { r, g, b, a } = c;
    if a > 0 {
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

/// Convert syntect FontStyle to ratatui Modifier. Supports BOLD, ITALIC, UNDERLINE and combinations.
fn translate_font_style(f: FontStyle) -> Modifier {
    let mut m = Modifier::empty();
    if f.contains(FontStyle::BOLD) {
        m.insert(Modifier::BOLD);
    }
    if f.contains(FontStyle::ITALIC) {
        m.insert(Modifier::ITALIC);
    }
    if f.contains(FontStyle::UNDERLINE) {
        m.insert(Modifier::UNDERLINED);
    }
    m
}

/// Foreground and font style only: the terminal background stays the block's background.
fn translate_style(s: syntect::highlighting::Style, fallback: Color) -> Style {
    let fg = translate_colour(s.foreground).unwrap_or(fallback);
    Style::default()
        .fg(fg)
        .add_modifier(translate_font_style(s.font_style))
}

static SYNTAX_SET: std::sync::OnceLock<SyntaxSet> = std::sync::OnceLock::new();
static THEME_SET: std::sync::OnceLock<ThemeSet> = std::sync::OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn theme(name: &str) -> Option<&'static Theme> {
    let ts = theme_set();
    ts.themes.get(name).or_else(|| ts.themes.values().next())
}

/// Map a fence language tag (e.g. "rust", "python") to a syntect file extension.
fn lang_to_extension(lang: &str) -> Option<&'static str> {
    let ext = match lang.trim().to_lowercase().as_str() {
        "rs" | "rust" => "rs",
        "py" | "python" => "py",
        "js" | "javascript" | "jsx" => "js",
        // No TypeScript grammar ships with syntect; JavaScript colours it well enough.
        "ts" | "typescript" | "tsx" => "js",
        "go" | "golang" => "go",
        "rb" | "ruby" => "rb",
        "sh" | "bash" | "zsh" | "shell" => "sh",
        "sql" => "sql",
        "json" => "json",
        "yaml" | "yml" => "yml",
        "md" | "markdown" => "md",
        "html" => "html",
        "css" => "css",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "java" => "java",
        _ => return None,
    };
    Some(ext)
}

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    syntax_set().find_syntax_by_extension(lang_to_extension(lang)?)
}

fn plain_lines(code: &str, palette: &Palette) -> Vec<Vec<Span<'static>>> {
    code.split('\n')
        .map(|line| {
            vec![Span::styled(
                line.to_string(),
                Style::default().fg(palette.accent_secondary),
            )]
        })
        .collect()
}

/// Highlight a code block line by line. Unknown languages, and any highlighting error,
/// fall back to a single plain span per line. Always returns one entry per `\n`-separated line.
pub(crate) fn highlight_block(
    lang: &str,
    code: &str,
    palette: &Palette,
) -> Vec<Vec<Span<'static>>> {
    let (Some(syntax), Some(theme)) = (find_syntax(lang), theme(palette.code_theme)) else {
        return plain_lines(code, palette);
    };

    let ps = syntax_set();
    let mut h = HighlightLines::new(syntax, theme);
    let mut out = Vec::new();
    for line in code.split('\n') {
        let with_ending = format!("{}\n", line);
        let regions = match h.highlight_line(&with_ending, ps) {
            Ok(regions) => regions,
            Err(e) => {
                log::debug!("highlighting {} failed: {}", lang, e);
                return plain_lines(code, palette);
            }
        };
        let spans = regions
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim_end_matches('\n');
                (!text.is_empty()).then(|| {
                    Span::styled(
                        text.to_string(),
                        translate_style(style, palette.accent_secondary),
                    )
                })
            })
            .collect();
        out.push(spans);
    }
    out
}

/// Slice spans to cover only the character range [range_start, range_end).
/// Used when wrapping code lines: each wrap chunk gets the spans for its character slice.
pub(crate) fn slice_spans_by_range(
    spans: &[Span<'static>],
    range_start: usize,
    range_end: usize,
) -> Vec<Span<'static>> {
    let mut result = Vec::new();
    let mut pos = 0;
    for span in spans {
        let s = span.content.as_ref();
        let len = s.chars().count();
        let span_end = pos + len;
        if span_end <= range_start || pos >= range_end {
            pos = span_end;
            continue;
        }
        let take_start = range_start.saturating_sub(pos);
        let take_end = (range_end - pos).min(len);
        if take_start < take_end {
            let sliced: String = s
                .chars()
                .skip(take_start)
                .take(take_end - take_start)
                .collect();
            result.push(Span::styled(sliced, span.style));
        }
        pos = span_end;
    }
    result
}
