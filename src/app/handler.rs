use crate::api::ItemId;
use crate::app::action::Action;
use crate::app::event::{ApiEvent, AppEvent, ListScope};
use crate::app::form::Form;
use crate::app::state::*;
use crate::store::ModalKind;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;
use tracing::{debug, info, warn};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::Api(api_event) => {
            state.dirty = true;
            handle_api_event(state, api_event)
        }
        AppEvent::Tick => {
            handle_tick(state);
            vec![]
        }
    }
}

/// Actions to run once the event loop is up: the initial All Items fetch.
pub fn startup(state: &mut AppState) -> Vec<Action> {
    navigate(state, View::AllItems)
}

fn handle_tick(state: &mut AppState) {
    state.tick_count = state.tick_count.wrapping_add(1);
    if state.notices.clear_expired(Instant::now()) {
        state.dirty = true;
    }
    // Keep the spinner moving.
    if state.is_loading() {
        state.dirty = true;
    }
}

/// Switch to `view`. Protected views bounce to All Items with the login
/// modal open when nobody is signed in.
pub fn navigate(state: &mut AppState, view: View) -> Vec<Action> {
    state.modals.close_all();
    state.detail = DetailState::default();
    state.dirty = true;

    match view {
        View::AllItems => {
            state.view = View::AllItems;
            vec![state.begin_fetch(ListScope::All)]
        }
        View::MyItems if !state.session.is_authenticated() => {
            require_login(state, "Please log in to view your items.")
        }
        View::AddItem if !state.session.is_authenticated() => {
            require_login(state, "Please login to add items.")
        }
        View::MyItems => {
            state.view = View::MyItems;
            vec![state.begin_fetch(ListScope::Mine)]
        }
        View::AddItem => {
            state.view = View::AddItem;
            vec![]
        }
    }
}

fn require_login(state: &mut AppState, message: &str) -> Vec<Action> {
    state.notices.error(message);
    let mut actions = Vec::new();
    if state.view != View::AllItems {
        state.view = View::AllItems;
        actions.push(state.begin_fetch(ListScope::All));
    }
    state.modals.open(ModalKind::Login, None);
    actions
}

fn logout(state: &mut AppState) -> Vec<Action> {
    if !state.session.is_authenticated() {
        debug!("logout ignored, no session");
        return vec![];
    }
    state.session.logout();
    state.my_items = ItemList::default();
    state.add_item_form.reset();
    let actions = navigate(state, View::AllItems);
    state.notices.success("Logged out successfully.");
    actions
}

fn open_login(state: &mut AppState) {
    state.modals.close(ModalKind::Signup);
    state.modals.open(ModalKind::Login, None);
}

fn open_signup(state: &mut AppState) {
    state.modals.close(ModalKind::Login);
    state.modals.open(ModalKind::Signup, None);
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    match key.code {
        KeyCode::F(1) => return navigate(state, View::AllItems),
        KeyCode::F(2) => return navigate(state, View::MyItems),
        KeyCode::F(3) => return navigate(state, View::AddItem),
        KeyCode::F(5) => return refresh(state),
        KeyCode::F(6) => {
            open_login(state);
            return vec![];
        }
        KeyCode::F(7) => {
            open_signup(state);
            return vec![];
        }
        KeyCode::F(8) => return logout(state),
        _ => {}
    }

    // The topmost modal captures all remaining input
    if let Some(kind) = state.modals.topmost() {
        return match kind {
            ModalKind::Login | ModalKind::Signup => handle_auth_modal_key(state, kind, key),
            ModalKind::ItemDetail => handle_detail_key(state, key),
            ModalKind::ConfirmDelete => handle_confirm_key(state, key),
        };
    }

    match state.view {
        View::AllItems | View::MyItems => handle_list_key(state, key),
        View::AddItem => handle_add_item_key(state, key),
    }
}

fn refresh(state: &mut AppState) -> Vec<Action> {
    match state.current_scope() {
        Some(scope) => vec![state.begin_fetch(scope)],
        None => vec![],
    }
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Some(scope) = state.current_scope() else {
        return vec![];
    };
    let columns = state.config.ui.grid_columns.max(1) as isize;

    match key.code {
        KeyCode::Left => state.list_mut(scope).move_by(-1),
        KeyCode::Right => state.list_mut(scope).move_by(1),
        KeyCode::Up => state.list_mut(scope).move_by(-columns),
        KeyCode::Down => state.list_mut(scope).move_by(columns),
        KeyCode::Home => state.list_mut(scope).selected = 0,
        KeyCode::End => {
            let list = state.list_mut(scope);
            list.selected = list.items.len().saturating_sub(1);
        }
        KeyCode::Enter => return open_detail(state, scope),
        KeyCode::Char('d') if scope == ListScope::Mine => {
            if let Some(id) = state.list(scope).selected_item().map(|i| i.id.clone()) {
                state.modals.open(ModalKind::ConfirmDelete, Some(id));
            }
        }
        KeyCode::Char('r') => return refresh(state),
        KeyCode::Char('1') => return navigate(state, View::AllItems),
        KeyCode::Char('2') => return navigate(state, View::MyItems),
        KeyCode::Char('3') | KeyCode::Char('a') => return navigate(state, View::AddItem),
        KeyCode::Char('l') => open_login(state),
        KeyCode::Char('s') => open_signup(state),
        KeyCode::Char('o') => return logout(state),
        KeyCode::Char('q') => return vec![Action::Quit],
        _ => {}
    }
    vec![]
}

fn open_detail(state: &mut AppState, scope: ListScope) -> Vec<Action> {
    let Some(item) = state.list(scope).selected_item().cloned() else {
        return vec![];
    };
    let item_id = item.id.clone();
    state.modals.open(ModalKind::ItemDetail, Some(item_id.clone()));
    // Show the list copy until the fresh one arrives.
    state.detail = DetailState {
        item: Some(item),
        loading: true,
        saving_images: false,
    };
    vec![Action::FetchItem { item_id }]
}

fn handle_detail_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.modals.close(ModalKind::ItemDetail);
            state.detail = DetailState::default();
        }
        KeyCode::Char('d') => {
            if state.owns_detail_item() {
                let id = state.detail.item.as_ref().map(|i| i.id.clone());
                state.modals.open(ModalKind::ConfirmDelete, id);
            }
        }
        KeyCode::Char('s') => return save_images(state),
        _ => {}
    }
    vec![]
}

fn save_images(state: &mut AppState) -> Vec<Action> {
    if state.detail.saving_images {
        return vec![];
    }
    let Some(item) = state.detail.item.as_ref() else {
        return vec![];
    };
    if item.image_ids.is_empty() {
        state.notices.error("This item has no images to save.");
        return vec![];
    }
    let action = Action::SaveImages {
        item_id: item.id.clone(),
        item_name: item.name.clone(),
        image_ids: item.image_ids.clone(),
    };
    state.detail.saving_images = true;
    vec![action]
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            let item_id = state.modals.payload(ModalKind::ConfirmDelete).map(str::to_string);
            state.modals.close(ModalKind::ConfirmDelete);
            match item_id {
                Some(item_id) => vec![Action::DeleteItem { item_id }],
                None => vec![],
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.modals.close(ModalKind::ConfirmDelete);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_auth_modal_key(state: &mut AppState, kind: ModalKind, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            state.modals.close(kind);
            return vec![];
        }
        KeyCode::Enter => return submit_credentials(state, kind),
        _ => {}
    }

    let Some(form) = state.form_for(kind) else {
        return vec![];
    };
    edit_form(form, key);
    vec![]
}

/// Focus movement and text editing shared by every form.
fn edit_form(form: &mut Form, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        _ => {
            if let Some(field) = form.focused_field_mut() {
                field.handle_key(key);
            }
        }
    }
}

fn submit_credentials(state: &mut AppState, kind: ModalKind) -> Vec<Action> {
    let pending = match kind {
        ModalKind::Login => state.login_pending,
        _ => state.signup_pending,
    };
    if pending {
        return vec![];
    }
    let Some(form) = state.form_for(kind) else {
        return vec![];
    };
    let email = form.value(0).trim().to_string();
    let password = form.value(1).to_string();
    if email.is_empty() || password.is_empty() {
        state.notices.error("Email and password are required.");
        return vec![];
    }

    if kind == ModalKind::Login {
        state.login_pending = true;
        vec![Action::Login { email, password }]
    } else {
        state.signup_pending = true;
        vec![Action::Signup { email, password }]
    }
}

fn handle_add_item_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if !state.session.is_authenticated() {
        return require_login(state, "Please login to add items.");
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => navigate(state, View::AllItems),
        KeyCode::Char('s') if ctrl => submit_item(state),
        KeyCode::Enter => {
            let form = &state.add_item_form;
            if form.focused + 1 >= form.fields.len() {
                submit_item(state)
            } else {
                state.add_item_form.focus_next();
                vec![]
            }
        }
        _ => {
            edit_form(&mut state.add_item_form, key);
            vec![]
        }
    }
}

fn submit_item(state: &mut AppState) -> Vec<Action> {
    if state.submitting_item {
        return vec![];
    }
    match state.add_item_form.to_new_item() {
        Ok(item) => {
            state.submitting_item = true;
            vec![Action::CreateItem(item)]
        }
        Err(e) => {
            state.notices.error(e.to_string());
            vec![]
        }
    }
}

// ---------------------------------------------------------------------------
// Settled remote calls
// ---------------------------------------------------------------------------

pub fn handle_api_event(state: &mut AppState, event: ApiEvent) -> Vec<Action> {
    match event {
        ApiEvent::LoggedIn(result) => {
            state.login_pending = false;
            match state.session.complete_login(result) {
                Ok(identity) => {
                    info!(email = %identity.email, "login complete");
                    state.notices.success("Login successful!");
                    state.login_form.reset();
                    state.modals.close(ModalKind::Login);
                }
                Err(message) => state.notices.error(message),
            }
            vec![]
        }
        ApiEvent::SignedUp(result) => {
            state.signup_pending = false;
            match result {
                Ok(response) => {
                    info!(email = %response.email, active = response.is_active, "signup complete");
                    state.notices.success("Signup successful! Please log in.");
                    state.signup_form.reset();
                    state.login_form.reset();
                    if let Some(field) = state.login_form.fields.first_mut() {
                        response.email.chars().for_each(|c| field.insert_char(c));
                    }
                    state.login_form.focused = 1;
                    open_login(state);
                }
                Err(e) => {
                    warn!(error = %e, "signup failed");
                    state
                        .notices
                        .error(e.user_message("Signup failed. Please try again."));
                }
            }
            vec![]
        }
        ApiEvent::ItemsLoaded { scope, seq, result } => {
            match state.list_mut(scope).apply(seq, result) {
                Ok(true) => {}
                Ok(false) => debug!(?scope, seq, "dropping stale item list"),
                Err(e) => {
                    warn!(?scope, status = ?e.status(), error = %e, "item list fetch failed");
                    let fallback = match scope {
                        ListScope::All => "Failed to load items.",
                        ListScope::Mine => "Failed to load your items.",
                    };
                    state.notices.error(e.user_message(fallback));
                }
            }
            vec![]
        }
        ApiEvent::ItemLoaded { item_id, result } => {
            if state.modals.payload(ModalKind::ItemDetail) != Some(item_id.as_str()) {
                debug!(item = %item_id, "detail modal moved on, dropping item");
                return vec![];
            }
            state.detail.loading = false;
            match result {
                Ok(item) => state.detail.item = Some(item),
                Err(e) => {
                    warn!(item = %item_id, status = ?e.status(), error = %e, "item fetch failed");
                    state
                        .notices
                        .error(e.user_message("Failed to fetch item details."));
                    state.modals.close(ModalKind::ItemDetail);
                    state.detail = DetailState::default();
                }
            }
            vec![]
        }
        ApiEvent::ItemCreated(result) => {
            state.submitting_item = false;
            match result {
                Ok(item) => {
                    info!(item = %item.id, name = %item.name, "item created");
                    state.add_item_form.reset();
                    let actions = navigate(state, View::MyItems);
                    state.notices.success("Item added successfully!");
                    actions
                }
                Err(e) => {
                    warn!(error = %e, "item creation failed");
                    state.notices.error(e.user_message("Failed to add item."));
                    vec![]
                }
            }
        }
        ApiEvent::ItemDeleted { item_id, result } => {
            match result {
                Ok(()) => {
                    info!(item = %item_id, "item deleted");
                    close_detail_for(state, &item_id);
                    state.remove_item(&item_id);
                    state.notices.success("Item deleted successfully!");
                }
                Err(e) => {
                    warn!(
                        item = %item_id,
                        status = ?e.status(),
                        error = %e,
                        "item deletion failed"
                    );
                    state
                        .notices
                        .error(e.user_message(&format!("Failed to delete item {}.", item_id)));
                }
            }
            vec![]
        }
        ApiEvent::ImagesSaved { item_id, result } => {
            if state.detail.item.as_ref().is_some_and(|i| i.id == item_id) {
                state.detail.saving_images = false;
            }
            match result {
                Ok(paths) if paths.is_empty() => {
                    state.notices.error("This item has no images to save.");
                }
                Ok(paths) => {
                    state.notices.success(format!(
                        "Saved {} image(s) to {}",
                        paths.len(),
                        state.config.storage.download_dir.display()
                    ));
                }
                Err(e) => {
                    warn!(item = %item_id, error = %e, "saving images failed");
                    state.notices.error(e.user_message("Failed to save images."));
                }
            }
            vec![]
        }
    }
}

fn close_detail_for(state: &mut AppState, item_id: &ItemId) {
    if state.modals.payload(ModalKind::ItemDetail) == Some(item_id.as_str()) {
        state.modals.close(ModalKind::ItemDetail);
        state.detail = DetailState::default();
    }
    if state.modals.payload(ModalKind::ConfirmDelete) == Some(item_id.as_str()) {
        state.modals.close(ModalKind::ConfirmDelete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError, Item, TokenResponse};
    use crate::config::AppConfig;
    use crate::store::session::tests::{token_for, MemoryCredentialStore};
    use crate::store::Session;
    use reqwest::StatusCode;
    use rust_decimal::Decimal;

    fn test_state() -> AppState {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        let session = Session::new(Box::new(MemoryCredentialStore::default()), client);
        AppState::new(AppConfig::default(), session)
    }

    fn logged_in_state(email: &str) -> AppState {
        let mut state = test_state();
        let token = token_for(&format!(r#"{{"sub":"{}"}}"#, email));
        state.session.set_credential(Some(token));
        state
    }

    fn item(id: &str, owner: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: None,
            price: Decimal::new(1999, 2),
            quantity: 1,
            owner_email: Some(owner.to_string()),
            image_ids: vec![],
        }
    }

    fn press(state: &mut AppState, code: KeyCode) -> Vec<Action> {
        handle_event(
            state,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn fetch_seq(actions: &[Action], want: ListScope) -> u64 {
        actions
            .iter()
            .find_map(|a| match a {
                Action::FetchItems { scope, seq } if *scope == want => Some(*seq),
                _ => None,
            })
            .expect("fetch action")
    }

    fn visible_message(state: &AppState) -> Option<String> {
        state.notices.visible().map(|n| n.message.clone())
    }

    #[test]
    fn test_startup_fetches_all_items() {
        let mut state = test_state();
        let actions = startup(&mut state);
        assert_eq!(state.view, View::AllItems);
        assert!(state.all_items.loading);
        fetch_seq(&actions, ListScope::All);
    }

    #[test]
    fn test_add_item_logged_out_opens_login() {
        let mut state = test_state();
        startup(&mut state);

        let actions = navigate(&mut state, View::AddItem);
        assert!(actions.is_empty());
        assert_eq!(state.view, View::AllItems);
        assert!(state.modals.is_open(ModalKind::Login));
        assert_eq!(visible_message(&state).as_deref(), Some("Please login to add items."));
    }

    #[test]
    fn test_my_items_logged_out_opens_login() {
        let mut state = test_state();
        navigate(&mut state, View::MyItems);
        assert_eq!(state.view, View::AllItems);
        assert!(state.modals.is_open(ModalKind::Login));
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Please log in to view your items.")
        );
    }

    #[test]
    fn test_navigation_closes_modals() {
        let mut state = logged_in_state("a@b.c");
        state.modals.open(ModalKind::ItemDetail, Some("1".into()));
        state.modals.open(ModalKind::ConfirmDelete, Some("1".into()));

        navigate(&mut state, View::MyItems);
        assert!(!state.modals.any_open());
        assert_eq!(state.view, View::MyItems);
    }

    #[test]
    fn test_stale_list_response_is_ignored() {
        let mut state = test_state();
        let first = fetch_seq(&startup(&mut state), ListScope::All);
        let second = fetch_seq(&press(&mut state, KeyCode::Char('r')), ListScope::All);
        assert!(second > first);

        handle_api_event(
            &mut state,
            ApiEvent::ItemsLoaded {
                scope: ListScope::All,
                seq: second,
                result: Ok(vec![item("new", "a@b.c")]),
            },
        );
        handle_api_event(
            &mut state,
            ApiEvent::ItemsLoaded {
                scope: ListScope::All,
                seq: first,
                result: Ok(vec![item("old", "a@b.c")]),
            },
        );
        assert_eq!(state.all_items.items.len(), 1);
        assert_eq!(state.all_items.items[0].id, "new");
        assert!(!state.all_items.loading);
    }

    #[test]
    fn test_list_failure_shows_status_and_empties_list() {
        let mut state = test_state();
        state.all_items.items = vec![item("1", "a@b.c")];
        let seq = fetch_seq(&startup(&mut state), ListScope::All);

        handle_api_event(
            &mut state,
            ApiEvent::ItemsLoaded {
                scope: ListScope::All,
                seq,
                result: Err(ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "")),
            },
        );
        assert!(state.all_items.items.is_empty());
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Request failed with status code 500")
        );
    }

    #[test]
    fn test_login_modal_submit_and_result() {
        let mut state = test_state();
        press(&mut state, KeyCode::F(6));
        assert_eq!(state.modals.topmost(), Some(ModalKind::Login));

        assert!(press(&mut state, KeyCode::Enter).is_empty());
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Email and password are required.")
        );

        type_text(&mut state, "ann@example.com");
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "hunter2");
        let actions = press(&mut state, KeyCode::Enter);
        match actions.as_slice() {
            [Action::Login { email, password }] => {
                assert_eq!(email, "ann@example.com");
                assert_eq!(password, "hunter2");
            }
            other => panic!("unexpected actions: {:?}", other),
        }
        assert!(state.login_pending);

        handle_api_event(
            &mut state,
            ApiEvent::LoggedIn(Ok(TokenResponse {
                access_token: token_for(r#"{"sub":"ann@example.com"}"#),
                token_type: "bearer".into(),
            })),
        );
        assert!(!state.login_pending);
        assert_eq!(state.user_email(), Some("ann@example.com"));
        assert!(!state.modals.is_open(ModalKind::Login));
        assert_eq!(state.login_form.value(0), "");
        assert_eq!(visible_message(&state).as_deref(), Some("Login successful!"));
    }

    #[test]
    fn test_login_failure_keeps_modal_open() {
        let mut state = test_state();
        state.modals.open(ModalKind::Login, None);
        state.login_pending = true;

        handle_api_event(
            &mut state,
            ApiEvent::LoggedIn(Err(ApiError::from_status(
                StatusCode::BAD_REQUEST,
                r#"{"detail":"Incorrect email or password"}"#,
            ))),
        );
        assert!(state.modals.is_open(ModalKind::Login));
        assert!(!state.session.is_authenticated());
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Incorrect email or password")
        );
    }

    #[test]
    fn test_signup_success_switches_to_login() {
        let mut state = test_state();
        state.modals.open(ModalKind::Signup, None);

        handle_api_event(
            &mut state,
            ApiEvent::SignedUp(Ok(crate::api::SignupResponse {
                email: "new@example.com".into(),
                is_active: true,
            })),
        );
        assert!(!state.modals.is_open(ModalKind::Signup));
        assert!(state.modals.is_open(ModalKind::Login));
        assert_eq!(state.login_form.value(0), "new@example.com");
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Signup successful! Please log in.")
        );
    }

    #[test]
    fn test_delete_removes_exactly_one_item() {
        let mut state = logged_in_state("a@b.c");
        state.all_items.items = vec![item("1", "a@b.c"), item("2", "a@b.c"), item("3", "x@y.z")];
        state.my_items.items = vec![item("1", "a@b.c"), item("2", "a@b.c")];

        handle_api_event(
            &mut state,
            ApiEvent::ItemDeleted {
                item_id: "2".into(),
                result: Ok(()),
            },
        );
        let ids: Vec<_> = state.all_items.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(state.my_items.items.len(), 1);
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Item deleted successfully!")
        );
    }

    #[test]
    fn test_delete_failure_leaves_list_untouched() {
        let mut state = logged_in_state("a@b.c");
        state.my_items.items = vec![item("1", "a@b.c")];

        handle_api_event(
            &mut state,
            ApiEvent::ItemDeleted {
                item_id: "1".into(),
                result: Err(ApiError::Io(std::io::Error::other(""))),
            },
        );
        assert_eq!(state.my_items.items.len(), 1);
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Failed to delete item 1.")
        );
    }

    #[test]
    fn test_detail_delete_offered_only_to_owner() {
        let mut state = logged_in_state("a@b.c");
        state.all_items.items = vec![item("mine", "a@b.c"), item("theirs", "x@y.z")];
        state.all_items.selected = 1;

        let actions = press(&mut state, KeyCode::Enter);
        assert!(matches!(
            actions.as_slice(),
            [Action::FetchItem { item_id }] if item_id == "theirs"
        ));
        press(&mut state, KeyCode::Char('d'));
        assert!(!state.modals.is_open(ModalKind::ConfirmDelete));

        press(&mut state, KeyCode::Esc);
        state.all_items.selected = 0;
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.modals.payload(ModalKind::ConfirmDelete), Some("mine"));
    }

    #[test]
    fn test_detail_response_for_other_item_is_ignored() {
        let mut state = test_state();
        state.modals.open(ModalKind::ItemDetail, Some("b".into()));
        state.detail.loading = true;

        handle_api_event(
            &mut state,
            ApiEvent::ItemLoaded {
                item_id: "a".into(),
                result: Ok(item("a", "x@y.z")),
            },
        );
        assert!(state.detail.item.is_none());
        assert!(state.detail.loading);
    }

    #[test]
    fn test_detail_failure_closes_modal() {
        let mut state = test_state();
        state.modals.open(ModalKind::ItemDetail, Some("a".into()));

        handle_api_event(
            &mut state,
            ApiEvent::ItemLoaded {
                item_id: "a".into(),
                result: Err(ApiError::from_status(StatusCode::NOT_FOUND, "")),
            },
        );
        assert!(!state.modals.is_open(ModalKind::ItemDetail));
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Request failed with status code 404")
        );
    }

    #[test]
    fn test_add_item_validation_error_makes_no_call() {
        let mut state = logged_in_state("a@b.c");
        navigate(&mut state, View::AddItem);
        type_text(&mut state, "Chair");
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "cheap");

        let actions = handle_event(
            &mut state,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(
                KeyCode::Char('s'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(actions.is_empty());
        assert!(!state.submitting_item);
        assert!(visible_message(&state).unwrap().contains("Price"));
    }

    #[test]
    fn test_item_created_navigates_to_my_items() {
        let mut state = logged_in_state("a@b.c");
        navigate(&mut state, View::AddItem);
        type_text(&mut state, "Chair");
        state.submitting_item = true;

        let actions = handle_api_event(&mut state, ApiEvent::ItemCreated(Ok(item("9", "a@b.c"))));
        assert_eq!(state.view, View::MyItems);
        assert_eq!(state.add_item_form.value(0), "");
        fetch_seq(&actions, ListScope::Mine);
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Item added successfully!")
        );
    }

    #[test]
    fn test_logout_while_logged_out_is_silent() {
        let mut state = test_state();
        state.view = View::MyItems;

        let actions = press(&mut state, KeyCode::F(8));
        assert!(actions.is_empty());
        assert_eq!(visible_message(&state), None);
        assert_eq!(state.view, View::MyItems);
        assert!(state.modals.topmost().is_none());
    }

    #[test]
    fn test_logout_returns_to_all_items() {
        let mut state = logged_in_state("a@b.c");
        navigate(&mut state, View::MyItems);

        let actions = press(&mut state, KeyCode::F(8));
        assert!(!state.session.is_authenticated());
        assert_eq!(state.view, View::AllItems);
        fetch_seq(&actions, ListScope::All);
        assert_eq!(
            visible_message(&state).as_deref(),
            Some("Logged out successfully.")
        );
    }

    #[test]
    fn test_login_my_items_delete_flow() {
        let mut state = test_state();
        startup(&mut state);

        handle_api_event(
            &mut state,
            ApiEvent::LoggedIn(Ok(TokenResponse {
                access_token: token_for(r#"{"sub":"a@b.c"}"#),
                token_type: "bearer".into(),
            })),
        );
        let seq = fetch_seq(&press(&mut state, KeyCode::F(2)), ListScope::Mine);
        handle_api_event(
            &mut state,
            ApiEvent::ItemsLoaded {
                scope: ListScope::Mine,
                seq,
                result: Ok(vec![item("1", "a@b.c"), item("2", "a@b.c")]),
            },
        );

        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.modals.payload(ModalKind::ConfirmDelete), Some("2"));

        let actions = press(&mut state, KeyCode::Char('y'));
        assert!(matches!(actions.as_slice(), [Action::DeleteItem { item_id }] if item_id == "2"));
        assert!(!state.modals.any_open());

        handle_api_event(
            &mut state,
            ApiEvent::ItemDeleted {
                item_id: "2".into(),
                result: Ok(()),
            },
        );
        let ids: Vec<_> = state.my_items.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
        assert_eq!(state.my_items.selected, 0);
    }

    #[test]
    fn test_save_images_without_images() {
        let mut state = test_state();
        state.modals.open(ModalKind::ItemDetail, Some("1".into()));
        state.detail.item = Some(item("1", "x@y.z"));

        assert!(press(&mut state, KeyCode::Char('s')).is_empty());
        assert!(!state.detail.saving_images);

        state.detail.item.as_mut().unwrap().image_ids = vec!["img".into()];
        let actions = press(&mut state, KeyCode::Char('s'));
        assert!(matches!(
            actions.as_slice(),
            [Action::SaveImages { image_ids, .. }] if image_ids.len() == 1
        ));
        assert!(state.detail.saving_images);
    }
}
