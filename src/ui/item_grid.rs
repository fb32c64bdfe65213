use crate::api::Item;
use crate::app::event::ListScope;
use crate::app::state::AppState;
use crate::ui::text::{spinner, truncate};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

/// Card height including borders.
const CARD_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, scope: ListScope) {
    let list = state.list(scope);
    let title = match scope {
        ListScope::All => " All Items ",
        ListScope::Mine => " My Items ",
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.loading {
        let line = Line::from(vec![
            Span::styled(
                format!("{} ", spinner(state.tick_count)),
                Style::default().fg(Theme::ACCENT_GREEN),
            ),
            Span::styled("Loading items...", Theme::secondary()),
        ]);
        render_centered(frame, inner, line);
        return;
    }

    if list.items.is_empty() {
        let message = match scope {
            ListScope::All => "No items found.",
            ListScope::Mine => "You haven't added any items yet.",
        };
        render_centered(frame, inner, Line::from(Span::styled(message, Theme::muted())));
        return;
    }

    if inner.height < CARD_HEIGHT || inner.width < 12 {
        return;
    }

    let columns = state.config.ui.grid_columns.max(1);
    let rows_total = list.items.len().div_ceil(columns);
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;

    // Scroll so the selected card's row stays on screen
    let selected_row = list.selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let grid_width = inner.width.saturating_sub(1);
    let card_width = grid_width / columns as u16;

    for (row_offset, row) in (first_row..rows_total).take(visible_rows).enumerate() {
        for col in 0..columns {
            let index = row * columns + col;
            let Some(item) = list.items.get(index) else {
                break;
            };
            let card_area = Rect::new(
                inner.x + col as u16 * card_width,
                inner.y + row_offset as u16 * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            );
            render_card(frame, card_area, item, index == list.selected);
        }
    }

    if rows_total > visible_rows {
        let scrollbar_area = Rect::new(inner.x + grid_width, inner.y, 1, inner.height);
        let mut scrollbar_state =
            ScrollbarState::new(rows_total.saturating_sub(visible_rows)).position(first_row);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Style::default().fg(Theme::ACCENT_GREEN))
                .track_style(Style::default().fg(Theme::BORDER_DIM)),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &Item, selected: bool) {
    let (border_style, border_type) = if selected {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };
    let text_width = area.width.saturating_sub(4) as usize;

    let block = Block::default()
        .title(format!(" {} ", truncate(&item.name, text_width)))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(Theme::popup_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description = item.description.as_deref().unwrap_or("");
    let images = match item.image_ids.len() {
        0 => "No images".to_string(),
        1 => "1 image".to_string(),
        n => format!("{} images", n),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(item.display_price(), Theme::price()),
            Span::styled(format!("  Qty {}", item.quantity), Theme::secondary()),
        ]),
        Line::from(Span::styled(truncate(description, text_width), Theme::text())),
        Line::from(Span::styled(images, Theme::muted())),
        Line::from(Span::styled(
            truncate(item.owner_email.as_deref().unwrap_or("unknown seller"), text_width),
            Theme::muted(),
        )),
    ];
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner.inner(Margin::new(1, 0)));
}

fn render_centered(frame: &mut Frame, area: Rect, line: Line) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}
