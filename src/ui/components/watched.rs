//! Watched list panel with summary statistics.

use super::{render_panel_title, Region};
use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SummaryLine, WatchedPanel, WatchedRow};

const STATS_WIDTH: usize = 22;

/// Renders the watched panel into `region`.
pub fn render_watched(region: Region, panel: &WatchedPanel, theme: &Theme) {
    render_panel_title(region, "Movies you watched", panel.collapsed, panel.is_focused, theme);
    if region.height < 2 {
        return;
    }

    render_summary(region.row + 1, region, &panel.summary, theme);

    if panel.collapsed || region.height < 3 {
        return;
    }

    let body = region.below(2);
    if let Some(message) = &panel.empty_message {
        position_cursor(body.row, body.col);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", pad(&format!("  {message}"), body.width));
        print!("{}", Theme::reset());
        return;
    }

    for (offset, item) in panel.rows.iter().take(body.height).enumerate() {
        render_row(body.row + offset, body, item, theme);
    }
}

fn render_summary(row: usize, region: Region, summary: &SummaryLine, theme: &Theme) {
    position_cursor(row, region.col);
    let text = format!(
        "  {}  ★ {}  you {}  ⏱ {}",
        summary.count, summary.catalog_rating, summary.user_rating, summary.runtime
    );
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad(&text, region.width));
    print!("{}", Theme::reset());
}

fn render_row(row: usize, region: Region, item: &WatchedRow, theme: &Theme) {
    position_cursor(row, region.col);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("{}", pad(&format!("  {}", item.title), region.width.saturating_sub(STATS_WIDTH)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.star_fg));
    }
    let stats = format!(" ★{} ☆{} {}", item.catalog_rating, item.user_rating, item.runtime);
    print!("{}", pad(&stats, STATS_WIDTH.min(region.width)));
    print!("{}", Theme::reset());
}
