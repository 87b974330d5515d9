//! Search results panel.

use super::{render_panel_title, render_status, Region};
use crate::ui::helpers::{self, char_len, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListStatus, ResultRow, ResultsPanel};

const YEAR_WIDTH: usize = 9;

/// Renders the results panel into `region`.
pub fn render_results(region: Region, panel: &ResultsPanel, theme: &Theme) {
    let title = format!("Results ({})", panel.total);
    render_panel_title(region, &title, panel.collapsed, panel.is_focused, theme);

    if panel.collapsed || region.height < 2 {
        return;
    }

    let body = region.below(1);
    match &panel.status {
        ListStatus::Ready => {
            for (offset, item) in panel.rows.iter().take(body.height).enumerate() {
                render_row(body.row + offset, body, item, theme);
            }
        }
        status => render_status(body, status, theme),
    }
}

/// One row: marker, highlighted title, year.
///
/// `▶` marks the open title, `✓` a title already on the watchlist.
fn render_row(row: usize, region: Region, item: &ResultRow, theme: &Theme) {
    position_cursor(row, region.col);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let marker = if item.is_open {
        "▶ "
    } else if item.is_watched {
        "✓ "
    } else {
        "  "
    };
    if item.is_watched && !item.is_selected && !item.is_open {
        print!("{}", Theme::fg(&theme.colors.watched_fg));
        print!("{marker}");
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{marker}");
    }

    let title_width = region.width.saturating_sub(2 + YEAR_WIDTH);
    let title = fit(&item.title, title_width);
    helpers::render_highlighted_text(&title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(title_width.saturating_sub(char_len(&title))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", helpers::pad(&format!(" {}", item.year), YEAR_WIDTH));
    print!("{}", Theme::reset());
}
