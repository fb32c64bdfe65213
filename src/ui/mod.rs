mod add_item;
mod form_view;
mod item_grid;
mod layout;
mod modal;
mod nav_bar;
mod notice;
mod status_bar;
mod text;
mod theme;

use crate::app::event::ListScope;
use crate::app::state::{AppState, View};
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    nav_bar::render(frame, app_layout.nav_bar, state);
    match state.view {
        View::AllItems => item_grid::render(frame, app_layout.content, state, ListScope::All),
        View::MyItems => item_grid::render(frame, app_layout.content, state, ListScope::Mine),
        View::AddItem => add_item::render(frame, app_layout.content, state),
    }
    status_bar::render(frame, app_layout.status_bar, state);

    // Overlays last so they sit on top
    modal::render(frame, state);
    notice::render(frame, state);
}
