use crate::app::state::*;
use crate::store::ModalKind;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = vec![Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    )];

    // Key hints for whatever currently has input
    let hints = match state.modals.topmost() {
        Some(ModalKind::Login) | Some(ModalKind::Signup) => "Enter submit · Esc close",
        Some(ModalKind::ItemDetail) => "Esc close",
        Some(ModalKind::ConfirmDelete) => "y confirm · n cancel",
        None => match state.view {
            View::AllItems => "←↑↓→ move · Enter open · r refresh · q quit",
            View::MyItems => "←↑↓→ move · Enter open · d delete · r refresh · q quit",
            View::AddItem => "Tab next · Ctrl+S submit · Esc cancel",
        },
    };

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + hints.width() + 2);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" {} ", hints),
        Style::default().fg(Theme::ACCENT_AMBER).bg(Theme::ACCENT_FOREST),
    ));

    let paragraph = Paragraph::new(Line::from(parts));
    frame.render_widget(paragraph, area);
}
