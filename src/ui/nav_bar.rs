use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const TABS: [(View, &str); 3] = [
    (View::AllItems, "F1"),
    (View::MyItems, "F2"),
    (View::AddItem, "F3"),
];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let bg = Style::default().bg(Theme::BG_ELEVATED);
    let muted = bg.fg(Theme::TEXT_SECONDARY);
    let sep = Span::styled(" │ ", Style::default().fg(Theme::BORDER_DIM).bg(Theme::BG_ELEVATED));

    let mut left: Vec<Span> = vec![
        Span::styled(
            " ◆ MongoMart",
            Style::default()
                .fg(Theme::ACCENT_GREEN)
                .bg(Theme::BG_ELEVATED)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
    ];

    for (view, key) in TABS {
        let style = if state.view == view {
            Theme::tab_active()
        } else {
            Theme::tab_inactive()
        };
        left.push(Span::styled(format!(" {} {} ", key, view.title()), style));
        left.push(Span::styled(" ", bg));
    }

    let right: Vec<Span> = match state.user_email() {
        Some(email) => vec![
            Span::styled(
                email.to_string(),
                Style::default()
                    .fg(Theme::TEXT_PRIMARY)
                    .bg(Theme::BG_ELEVATED)
                    .add_modifier(Modifier::BOLD),
            ),
            sep.clone(),
            Span::styled("F8 Logout ", muted),
        ],
        None => vec![
            Span::styled("F6 Login", muted),
            sep.clone(),
            Span::styled("F7 Sign Up ", muted),
        ],
    };

    // Pad so the account section sits at the right edge
    let used: usize = left
        .iter()
        .chain(right.iter())
        .map(|s| s.content.width())
        .sum();
    let remaining = (area.width as usize).saturating_sub(used);

    let mut spans = left;
    spans.push(Span::styled(" ".repeat(remaining), bg));
    spans.extend(right);

    let paragraph = Paragraph::new(Line::from(spans)).style(bg);
    frame.render_widget(paragraph, area);
}
