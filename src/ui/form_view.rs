use crate::app::form::{Form, TextField};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Rows taken by one field box.
pub const FIELD_HEIGHT: u16 = 3;

/// Draw every field of `form` top to bottom inside `area`. The focused field
/// gets the terminal cursor when `active`.
pub fn render(frame: &mut Frame, area: Rect, form: &Form, active: bool) {
    for (i, field) in form.fields.iter().enumerate() {
        let y = area.y + i as u16 * FIELD_HEIGHT;
        if y + FIELD_HEIGHT > area.bottom() {
            break;
        }
        let field_area = Rect::new(area.x, y, area.width, FIELD_HEIGHT);
        render_field(frame, field_area, field, active && i == form.focused);
    }
}

fn render_field(frame: &mut Frame, area: Rect, field: &TextField, focused: bool) {
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .title_style(if focused { Theme::title() } else { Theme::secondary() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Keep the cursor in view on long input
    let display = field.display();
    let cursor = field.display_cursor();
    let width = inner.width as usize;
    let skip = (cursor + 1).saturating_sub(width);
    let shown: String = display.chars().skip(skip).take(width).collect();

    frame.render_widget(Paragraph::new(shown).style(Theme::text()), inner);

    if focused {
        let cursor_x = inner.x + (cursor - skip) as u16;
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}
