//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor positioning,
//! highlighted text, width-aware padding and word wrapping. All widths are
//! counted in characters, not bytes.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::StarBar;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, with an ellipsis when cut.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let kept: String = text.chars().take(width - 1).collect();
    format!("{kept}…")
}

/// Fits `text` into exactly `width` characters, padding with spaces.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    let padding = width.saturating_sub(char_len(&fitted));
    format!("{fitted}{}", " ".repeat(padding))
}

/// Greedy word wrap into lines of at most `width` characters.
///
/// Words longer than a line are cut.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word = fit(word, width);
        let needed = if line.is_empty() { char_len(&word) } else { char_len(&line) + 1 + char_len(&word) };

        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Star string for a rating widget, e.g. `★★★★★★★☆☆☆ 7`.
///
/// Returns the filled and empty parts separately so they can be colored.
#[must_use]
pub fn star_parts(stars: &StarBar) -> (String, String, String) {
    let shown = stars.value.or(stars.baseline).unwrap_or(0).min(stars.max);
    let filled = "★".repeat(usize::from(shown));
    let empty = "☆".repeat(usize::from(stars.max - shown));
    let label = if shown == 0 { String::new() } else { format!(" {shown}") };
    (filled, empty, label)
}

/// Renders text with highlighted character ranges for query matches.
///
/// # Parameters
///
/// * `text` - The text to render
/// * `ranges` - Character ranges `(start, end)` to highlight, end exclusive
/// * `theme` - Active color theme for highlight colors
/// * `is_selected` - Selected rows skip match highlighting so the selection
///   background stays intact
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
