//! Overlay panels, drawn over the current view in registry order.

use crate::app::state::AppState;
use crate::store::ModalKind;
use crate::ui::form_view::{self, FIELD_HEIGHT};
use crate::ui::layout::centered_popup;
use crate::ui::text::spinner;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, state: &AppState) {
    let topmost = state.modals.topmost();
    for kind in state.modals.open_modals() {
        let active = topmost == Some(kind);
        match kind {
            ModalKind::Login | ModalKind::Signup => render_auth(frame, state, kind, active),
            ModalKind::ItemDetail => render_detail(frame, state),
            ModalKind::ConfirmDelete => render_confirm(frame, state),
        }
    }
}

/// Clear `area` and draw the popup frame. Returns the inner area.
fn popup_frame(frame: &mut Frame, area: Rect, title: &str, accent: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(accent))
        .style(Theme::popup_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn help_line(keys: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in keys {
        spans.push(Span::styled(*key, Theme::key_hint()));
        spans.push(Span::styled(format!(" {}  ", label), Theme::secondary()));
    }
    Line::from(spans)
}

fn render_auth(frame: &mut Frame, state: &AppState, kind: ModalKind, active: bool) {
    let (form, pending, switch_hint) = match kind {
        ModalKind::Login => (&state.login_form, state.login_pending, ("F7", "Sign up")),
        _ => (&state.signup_form, state.signup_pending, ("F6", "Log in")),
    };

    let height = form.fields.len() as u16 * FIELD_HEIGHT + 4;
    let popup = centered_popup(frame.area(), 50, 0, 44, height);
    let inner = popup_frame(frame, popup, kind.title(), Theme::ACCENT_GREEN);
    if inner.height < 3 {
        return;
    }

    let fields_area = Rect::new(
        inner.x + 1,
        inner.y + 1,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(2),
    );
    form_view::render(frame, fields_area, form, active && !pending);

    let footer = if pending {
        let label = if kind == ModalKind::Login {
            "Logging in..."
        } else {
            "Signing up..."
        };
        Line::from(vec![
            Span::styled(
                format!(" {} ", spinner(state.tick_count)),
                Style::default().fg(Theme::ACCENT_GREEN),
            ),
            Span::styled(label, Theme::secondary()),
        ])
    } else {
        help_line(&[("Enter", "Submit"), ("Tab", "Next"), switch_hint, ("Esc", "Close")])
    };
    let footer_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn render_detail(frame: &mut Frame, state: &AppState) {
    let popup = centered_popup(frame.area(), 60, 60, 50, 16);
    let inner = popup_frame(frame, popup, ModalKind::ItemDetail.title(), Theme::ACCENT_GREEN);
    if inner.height < 3 {
        return;
    }
    let body_area = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height - 1,
    );

    let Some(item) = state.detail.item.as_ref() else {
        let line = Line::from(vec![
            Span::styled(
                format!("{} ", spinner(state.tick_count)),
                Style::default().fg(Theme::ACCENT_GREEN),
            ),
            Span::styled("Loading item...", Theme::secondary()),
        ]);
        frame.render_widget(Paragraph::new(line), body_area);
        return;
    };

    let label = |text: &'static str| Span::styled(format!("{:<13}", text), Theme::secondary());
    let images = if item.image_ids.is_empty() {
        "0".to_string()
    } else {
        format!("{} ({})", item.image_ids.len(), item.image_ids.join(", "))
    };

    let mut lines = vec![
        Line::from(Span::styled(item.name.clone(), Theme::title())),
        Line::default(),
        Line::from(vec![label("Images:"), Span::styled(images, Theme::text())]),
        Line::from(vec![
            label("Description:"),
            Span::styled(
                item.description.clone().unwrap_or_else(|| "N/A".to_string()),
                Theme::text(),
            ),
        ]),
        Line::from(vec![label("Price:"), Span::styled(item.display_price(), Theme::price())]),
        Line::from(vec![
            label("Quantity:"),
            Span::styled(item.quantity.to_string(), Theme::text()),
        ]),
        Line::from(vec![label("Item ID:"), Span::styled(item.id.clone(), Theme::muted())]),
        Line::from(vec![
            label("Owner:"),
            Span::styled(
                item.owner_email.clone().unwrap_or_else(|| "N/A".to_string()),
                Theme::text(),
            ),
        ]),
    ];
    if state.detail.loading {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", spinner(state.tick_count)),
                Style::default().fg(Theme::ACCENT_GREEN),
            ),
            Span::styled("Refreshing...", Theme::muted()),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        body_area,
    );

    let mut keys = vec![("Esc", "Close")];
    if !item.image_ids.is_empty() {
        keys.push((
            "s",
            if state.detail.saving_images {
                "Saving..."
            } else {
                "Save images"
            },
        ));
    }
    if state.owns_detail_item() {
        keys.push(("d", "Delete item"));
    }
    let footer_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
    frame.render_widget(Paragraph::new(help_line(&keys)), footer_area);
}

fn render_confirm(frame: &mut Frame, state: &AppState) {
    let item_id = state.modals.payload(ModalKind::ConfirmDelete).unwrap_or("");
    let name = state
        .all_items
        .items
        .iter()
        .chain(state.my_items.items.iter())
        .chain(state.detail.item.iter())
        .find(|item| item.id == item_id)
        .map(|item| item.name.as_str())
        .unwrap_or(item_id);

    let popup = centered_popup(frame.area(), 40, 0, 44, 7);
    let inner = popup_frame(frame, popup, ModalKind::ConfirmDelete.title(), Theme::ACCENT_RED);
    if inner.height < 3 {
        return;
    }

    let lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled(" Are you sure you want to delete ", Theme::text()),
            Span::styled(format!("\"{}\"", name), Theme::title()),
            Span::styled("?", Theme::text()),
        ]),
    ];
    let body_area = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body_area);

    let footer_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
    frame.render_widget(
        Paragraph::new(help_line(&[("y", "Delete"), ("n", "Cancel")])),
        footer_area,
    );
}
