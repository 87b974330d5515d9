//! Navigation bar: logo, search box and result count on one line.

use crate::ui::helpers::{char_len, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NavInfo;

const LOGO: &str = " 🍿 popcorn ";
const LOGO_WIDTH: usize = 12;

/// Renders the navigation bar at `row` and returns the next row.
///
/// ```text
///  🍿 popcorn   [ Search movies... ]          Found 10 results
/// ```
pub fn render_nav(row: usize, nav: &NavInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{LOGO}");
    print!("{}", Theme::reset());

    let count_width = char_len(&nav.result_count) + 1;
    let box_width = cols.saturating_sub(LOGO_WIDTH + count_width + 4).min(48);
    let inner_width = box_width.saturating_sub(4);

    let (text, text_color) = if nav.query.is_empty() && !nav.is_typing {
        ("Search movies...".to_string(), &theme.colors.text_dim)
    } else {
        let cursor = if nav.is_typing { "█" } else { "" };
        // keep the end of a long query visible
        let visible: String = {
            let total = char_len(&nav.query);
            let keep = inner_width.saturating_sub(1);
            nav.query.chars().skip(total.saturating_sub(keep)).collect()
        };
        (format!("{visible}{cursor}"), &theme.colors.text_normal)
    };
    let text = fit(&text, inner_width);

    print!("  ");
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("[ ");
    print!("{}", Theme::fg(text_color));
    print!("{text}");
    print!("{}", " ".repeat(inner_width.saturating_sub(char_len(&text))));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!(" ]");
    print!("{}", Theme::reset());

    let used = LOGO_WIDTH + 2 + box_width;
    let gap = cols.saturating_sub(used + count_width);
    print!("{}", " ".repeat(gap));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{} ", fit(&nav.result_count, cols.saturating_sub(used)));
    print!("{}", Theme::reset());

    row + 1
}
