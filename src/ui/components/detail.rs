//! Detail panel of the open title, with the rating widget.

use super::{render_status, Region};
use crate::ui::helpers::{pad, position_cursor, star_parts, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailInfo, DetailView, ListStatus};

/// Renders the detail panel into `region`.
pub fn render_detail(region: Region, view: &DetailView, theme: &Theme) {
    match view {
        DetailView::Loading => render_status(region, &ListStatus::Loading, theme),
        DetailView::Error(message) => render_status(region, &ListStatus::Error(message.clone()), theme),
        DetailView::Loaded(info) => render_loaded(region, info, theme),
    }
}

/// A styled line of the detail panel.
enum Line {
    Title(String),
    Dim(String),
    Star(String),
    Text(String),
    Stars,
    Blank,
}

fn render_loaded(region: Region, info: &DetailInfo, theme: &Theme) {
    let width = region.width.saturating_sub(2);
    let mut lines = vec![
        Line::Title(info.title.clone()),
        Line::Dim(info.subtitle.clone()),
    ];
    if !info.genre.is_empty() {
        lines.push(Line::Dim(info.genre.clone()));
    }
    lines.push(Line::Star(format!("★ {}", info.catalog_rating)));
    lines.push(Line::Blank);

    if let Some(previous) = info.previous_rating {
        lines.push(Line::Text(format!("You rated this movie {previous} ★ before")));
    }
    lines.push(Line::Stars);
    if info.can_confirm {
        let changes = if info.adjustments == 1 { "change" } else { "changes" };
        lines.push(Line::Dim(format!("Enter: add to list ({} {changes})", info.adjustments)));
    } else {
        lines.push(Line::Dim("Press 1-9 or 0 to rate".to_string()));
    }
    lines.push(Line::Blank);

    lines.extend(wrap(&info.plot, width).into_iter().map(Line::Text));
    if !info.cast.is_empty() {
        lines.push(Line::Blank);
        lines.extend(wrap(&format!("Starring {}", info.cast), width).into_iter().map(Line::Dim));
    }
    if !info.director.is_empty() {
        lines.extend(wrap(&format!("Directed by {}", info.director), width).into_iter().map(Line::Dim));
    }

    for (offset, line) in lines.iter().take(region.height).enumerate() {
        position_cursor(region.row + offset, region.col);
        print!("  ");
        match line {
            Line::Title(text) => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
                print!("{}", pad(text, width));
            }
            Line::Dim(text) => {
                print!("{}", Theme::fg(&theme.colors.text_dim));
                print!("{}", pad(text, width));
            }
            Line::Star(text) => {
                print!("{}", Theme::fg(&theme.colors.star_fg));
                print!("{}", pad(text, width));
            }
            Line::Text(text) => {
                print!("{}", Theme::fg(&theme.colors.text_normal));
                print!("{}", pad(text, width));
            }
            Line::Stars => {
                let (filled, empty, label) = star_parts(&info.stars);
                if info.stars.value.is_some() {
                    print!("{}", Theme::fg(&theme.colors.star_fg));
                } else {
                    print!("{}", Theme::dim());
                    print!("{}", Theme::fg(&theme.colors.star_fg));
                }
                print!("{filled}");
                print!("{}", Theme::reset());
                print!("{}", Theme::fg(&theme.colors.text_dim));
                print!("{empty}{label}");
            }
            Line::Blank => print!("{}", " ".repeat(width)),
        }
        print!("{}", Theme::reset());
    }
}
