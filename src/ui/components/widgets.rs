use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, ListItem, Paragraph, Wrap};

use crate::session::{EditMode, EmptyState, HeaderView, Notice, RowView};
use crate::ui::components::theme::{ThemePalette, key_style};
use crate::ui::data::checkbox;
use crate::ui::shortcuts;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

pub fn search_bar(
    query: &str,
    palette: ThemePalette,
    loading: bool,
    tick: usize,
) -> Paragraph<'static> {
    let title = if loading {
        format!("Search GitHub users {}", spinner_frame(tick))
    } else {
        "Search GitHub users".to_string()
    };
    let line = if query.is_empty() {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(palette.accent)),
            Span::styled("Search GitHub users...", palette.hint_style()),
            Span::styled("▎", Style::default().fg(palette.accent)),
        ])
    } else {
        Line::from(Span::styled(
            format!("/ {query}▎"),
            Style::default().fg(palette.accent),
        ))
    };

    Paragraph::new(line).block(
        Block::default()
            .title(Span::styled(title, palette.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent_alt)),
    )
}

pub fn header_bar(header: HeaderView, palette: ThemePalette) -> Paragraph<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    match header.mode {
        EditMode::Browsing if header.can_edit => {
            spans.push(Span::styled("✎ Edit ", palette.title()));
            spans.push(Span::styled(shortcuts::EDIT, key_style(palette)));
        }
        EditMode::Browsing => {}
        EditMode::Editing => {
            let (mark, mark_style) = if header.all_selected {
                ("◉", palette.selected_style())
            } else {
                ("○", Style::default().fg(palette.accent))
            };
            spans.push(Span::styled(format!("{mark} Select All "), mark_style));
            spans.push(Span::styled(shortcuts::SELECT_ALL, key_style(palette)));
            if header.selected > 0 {
                spans.push(Span::raw(format!("   {} selected", header.selected)));
            }
            if header.bulk_actions {
                spans.push(Span::raw("   "));
                spans.push(Span::styled("⧉ duplicate ", palette.title()));
                spans.push(Span::styled(shortcuts::DUPLICATE, key_style(palette)));
                spans.push(Span::raw("  "));
                spans.push(Span::styled("🗑 delete ", palette.danger_style()));
                spans.push(Span::styled(shortcuts::DELETE, key_style(palette)));
            }
            spans.push(Span::raw("   "));
            spans.push(Span::styled("Done ", palette.title()));
            spans.push(Span::styled(shortcuts::DONE, key_style(palette)));
        }
    }
    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border_style()),
    )
}

pub fn user_row(row: RowView<'_>, idx: usize, palette: ThemePalette) -> ListItem<'static> {
    let item = row.item;
    let mut spans: Vec<Span<'static>> = Vec::new();
    if let Some(mark) = checkbox(&row) {
        let style = if row.is_selected {
            palette.selected_style()
        } else {
            Style::default().fg(palette.accent)
        };
        spans.push(Span::styled(format!("{mark} "), style));
    }
    spans.push(Span::styled(
        format!("{:<12} ", item.id.to_string()),
        palette.hint_style(),
    ));
    spans.push(Span::styled(
        format!("{:<24} ", item.login),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!("{:<12} ", item.kind),
        palette.kind_style(&item.kind),
    ));
    spans.push(Span::styled(
        format!("{:>7.2}  ", item.score),
        palette.hint_style(),
    ));
    spans.push(Span::styled("View profile", Style::default().fg(palette.accent)));

    ListItem::new(Line::from(spans)).style(palette.stripe(idx))
}

pub fn empty_state(
    state: EmptyState,
    palette: ThemePalette,
    tick: usize,
) -> Paragraph<'static> {
    let text = match state {
        EmptyState::Loading => format!("{} {}", spinner_frame(tick), state.message()),
        _ => state.message().to_string(),
    };
    Paragraph::new(Line::from(Span::styled(text, palette.hint_style())))
        .alignment(Alignment::Center)
}

pub fn notice_popup(notice: Notice, palette: ThemePalette) -> Paragraph<'static> {
    let border = match notice {
        Notice::RateLimited => Style::default().fg(palette.accent_alt),
        Notice::RequestFailed => palette.danger_style(),
    };
    Paragraph::new(vec![
        Line::from(notice.body()),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} OK", shortcuts::DISMISS),
            key_style(palette),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(notice.title(), palette.title()))
            .borders(Borders::ALL)
            .border_style(border),
    )
}
