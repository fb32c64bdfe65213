use crate::app::state::AppState;
use crate::ui::form_view::{self, FIELD_HEIGHT};
use crate::ui::text::spinner;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Add New Item ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Never show the form to a logged-out user
    if !state.session.is_authenticated() {
        return;
    }

    let form = &state.add_item_form;
    let form_width = inner.width.min(72);
    let form_height = form.fields.len() as u16 * FIELD_HEIGHT;
    let form_area = Rect::new(
        inner.x + inner.width.saturating_sub(form_width) / 2,
        inner.y + 1,
        form_width,
        form_height.min(inner.height.saturating_sub(1)),
    );
    let active = !state.modals.any_open() && !state.submitting_item;
    form_view::render(frame, form_area, form, active);

    let status_y = form_area.bottom() + 1;
    if status_y >= inner.bottom() {
        return;
    }
    let line = if state.submitting_item {
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner(state.tick_count)),
                Style::default().fg(Theme::ACCENT_GREEN),
            ),
            Span::styled("Adding item...", Theme::secondary()),
        ])
    } else {
        Line::from(vec![
            Span::styled("Tab", Theme::key_hint()),
            Span::styled(" Next field  ", Theme::secondary()),
            Span::styled("Ctrl+S", Theme::key_hint()),
            Span::styled(" Submit  ", Theme::secondary()),
            Span::styled("Esc", Theme::key_hint()),
            Span::styled(" Cancel", Theme::secondary()),
        ])
    };
    let status_area = Rect::new(form_area.x, status_y, form_area.width, 1);
    frame.render_widget(Paragraph::new(line), status_area);
}
