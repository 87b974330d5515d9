//! Composable UI component renderers.
//!
//! Each component draws one part of the screen into the rows and columns it
//! is handed.
//!
//! # Components
//!
//! - [`nav`]: Logo, search box and result count
//! - [`results`]: Search result list
//! - [`detail`]: Open title with the star rating widget
//! - [`watched`]: Watchlist with summary statistics
//! - [`footer`]: Notice line and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Nav]
//! [Border]
//! [Results]          │ [Detail or Watched]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod footer;
mod nav;
mod results;
mod watched;

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListStatus, SidePanel, UIViewModel};

use detail::render_detail;
use footer::{render_footer, render_notice};
use nav::render_nav;
use results::render_results;
use watched::render_watched;

/// First row of the panels.
const PANELS_TOP: usize = 4;

/// Rectangle of the screen handed to a component, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    /// The part of the region below its first `skip` rows.
    #[must_use]
    pub const fn below(self, skip: usize) -> Self {
        Self {
            row: self.row + skip,
            col: self.col,
            width: self.width,
            height: self.height.saturating_sub(skip),
        }
    }
}

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Vertical separator between the two panels.
fn render_separator(region: Region, color: &str) {
    print!("{}", Theme::fg(color));
    for offset in 0..region.height {
        position_cursor(region.row + offset, region.col);
        print!("│");
    }
    print!("{}", Theme::reset());
}

/// Panel heading such as `[-] Results (10)`, bold when focused.
fn render_panel_title(region: Region, title: &str, collapsed: bool, focused: bool, theme: &Theme) {
    if region.height == 0 {
        return;
    }
    position_cursor(region.row, region.col);
    let toggle = if collapsed { "[+]" } else { "[-]" };
    if focused {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", pad(&format!("{toggle} {title}"), region.width));
    print!("{}", Theme::reset());
}

/// Single status line in place of a list.
fn render_status(region: Region, status: &ListStatus, theme: &Theme) {
    if region.height == 0 {
        return;
    }
    let (text, color) = match status {
        ListStatus::Loading => ("Loading...", &theme.colors.text_dim),
        ListStatus::Error(message) => (message.as_str(), &theme.colors.error_fg),
        ListStatus::Empty(message) => (message.as_str(), &theme.colors.text_dim),
        ListStatus::Ready => return,
    };
    position_cursor(region.row, region.col);
    print!("{}", Theme::fg(color));
    print!("{}", pad(&format!("  {text}"), region.width));
    print!("{}", Theme::reset());
}

/// Renders the whole screen for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;
    current_row = render_nav(current_row, &vm.nav, theme, cols);
    render_border(current_row, &theme.colors.border, cols);

    let notice_row = rows.saturating_sub(3);
    let panel_height = notice_row.saturating_sub(PANELS_TOP);
    let split = cols / 2;

    let left = Region { row: PANELS_TOP, col: 1, width: split.saturating_sub(1), height: panel_height };
    let separator = Region { row: PANELS_TOP, col: split, width: 1, height: panel_height };
    let right = Region {
        row: PANELS_TOP,
        col: split + 2,
        width: cols.saturating_sub(split + 2),
        height: panel_height,
    };

    render_results(left, &vm.results, theme);
    render_separator(separator, &theme.colors.border);
    match &vm.side {
        SidePanel::Detail(view) => render_detail(right, view, theme),
        SidePanel::Watched(panel) => render_watched(right, panel, theme),
    }

    render_notice(notice_row, vm.notice.as_deref(), theme, cols);
    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_shrinks_from_the_top() {
        let region = Region { row: 4, col: 1, width: 30, height: 10 };
        assert_eq!(region.below(2), Region { row: 6, col: 1, width: 30, height: 8 });
        assert_eq!(region.below(20).height, 0);
    }
}
