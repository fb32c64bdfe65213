use crate::app::state::AppState;
use crate::store::Severity;
use crate::ui::text::truncate;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Draw the current notice as a one-line toast in the top-right corner,
/// just below the nav bar.
pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(notice) = state.notices.visible() else {
        return;
    };
    let area = frame.area();
    if area.height < 3 || area.width < 10 {
        return;
    }

    let (icon, style) = match notice.severity {
        Severity::Success => ("✔", Theme::success()),
        Severity::Error => ("✖", Theme::error()),
    };
    let max = (area.width as usize).saturating_sub(8);
    let text = format!(" {} {} ", icon, truncate(&notice.message, max));
    let width = (text.width() as u16).min(area.width.saturating_sub(2));
    let toast = Rect::new(area.right().saturating_sub(width + 1), area.y + 1, width, 1);

    frame.render_widget(Clear, toast);
    frame.render_widget(Paragraph::new(Span::styled(text, style)), toast);
}
