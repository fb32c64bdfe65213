use crate::api::{ApiError, Item};
use crate::app::action::Action;
use crate::app::event::{ListScope, RequestSeq};
use crate::app::form::Form;
use crate::config::AppConfig;
use crate::store::{ModalKind, ModalRegistry, NoticeBoard, Session};
use std::time::Duration;

/// Top-level pages reachable from the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    AllItems,
    MyItems,
    AddItem,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::AllItems => "All Items",
            View::MyItems => "My Items",
            View::AddItem => "Add Item",
        }
    }
}

/// A disposable copy of one server-side list.
#[derive(Debug, Default)]
pub struct ItemList {
    pub items: Vec<Item>,
    pub loading: bool,
    pub selected: usize,
    /// Tag of the most recent fetch issued for this list.
    pub latest_seq: RequestSeq,
}

impl ItemList {
    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    /// Apply a settled fetch. Returns `false` if `seq` is not the latest
    /// fetch for this list and the result was dropped.
    pub fn apply(
        &mut self,
        seq: RequestSeq,
        result: Result<Vec<Item>, ApiError>,
    ) -> Result<bool, ApiError> {
        if seq != self.latest_seq {
            return Ok(false);
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.clamp_selection();
                Ok(true)
            }
            Err(e) => {
                self.items.clear();
                self.selected = 0;
                Err(e)
            }
        }
    }

    /// Remove the item with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.clamp_selection();
        self.items.len() != before
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }
}

/// Content of the item detail modal.
#[derive(Debug, Default)]
pub struct DetailState {
    pub item: Option<Item>,
    pub loading: bool,
    pub saving_images: bool,
}

pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub modals: ModalRegistry,
    pub notices: NoticeBoard,
    pub view: View,
    pub all_items: ItemList,
    pub my_items: ItemList,
    pub detail: DetailState,
    pub login_form: Form,
    pub signup_form: Form,
    pub add_item_form: Form,
    pub login_pending: bool,
    pub signup_pending: bool,
    pub submitting_item: bool,
    pub next_seq: RequestSeq,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, session: Session) -> Self {
        let notices = NoticeBoard::new(Duration::from_millis(config.ui.notice_duration_ms));
        Self {
            config,
            session,
            modals: ModalRegistry::new(),
            notices,
            view: View::AllItems,
            all_items: ItemList::default(),
            my_items: ItemList::default(),
            detail: DetailState::default(),
            login_form: Form::credentials(),
            signup_form: Form::credentials(),
            add_item_form: Form::add_item(),
            login_pending: false,
            signup_pending: false,
            submitting_item: false,
            next_seq: 0,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn list(&self, scope: ListScope) -> &ItemList {
        match scope {
            ListScope::All => &self.all_items,
            ListScope::Mine => &self.my_items,
        }
    }

    pub fn list_mut(&mut self, scope: ListScope) -> &mut ItemList {
        match scope {
            ListScope::All => &mut self.all_items,
            ListScope::Mine => &mut self.my_items,
        }
    }

    /// The list shown by the current view, if it is a list view.
    pub fn current_scope(&self) -> Option<ListScope> {
        match self.view {
            View::AllItems => Some(ListScope::All),
            View::MyItems => Some(ListScope::Mine),
            View::AddItem => None,
        }
    }

    /// Mark `scope` as loading and tag a new fetch for it.
    pub fn begin_fetch(&mut self, scope: ListScope) -> Action {
        self.next_seq += 1;
        let seq = self.next_seq;
        let list = self.list_mut(scope);
        list.loading = true;
        list.latest_seq = seq;
        self.dirty = true;
        Action::FetchItems { scope, seq }
    }

    /// Drop a deleted item from every local list.
    pub fn remove_item(&mut self, id: &str) {
        let in_all = self.all_items.remove(id);
        let in_mine = self.my_items.remove(id);
        if in_all || in_mine {
            self.dirty = true;
        }
        if self.detail.item.as_ref().is_some_and(|item| item.id == id) {
            self.detail.item = None;
        }
    }

    pub fn user_email(&self) -> Option<&str> {
        self.session.identity().map(|i| i.email.as_str())
    }

    /// Whether the signed-in user owns the item shown in the detail modal.
    /// Display-only; the server decides whether a delete is allowed.
    pub fn owns_detail_item(&self) -> bool {
        match (&self.detail.item, self.user_email()) {
            (Some(item), Some(email)) => item.is_owned_by(email),
            _ => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.all_items.loading
            || self.my_items.loading
            || self.detail.loading
            || self.detail.saving_images
            || self.login_pending
            || self.signup_pending
            || self.submitting_item
    }

    pub fn form_for(&mut self, kind: ModalKind) -> Option<&mut Form> {
        match kind {
            ModalKind::Login => Some(&mut self.login_form),
            ModalKind::Signup => Some(&mut self.signup_form),
            _ => None,
        }
    }

    pub fn status_line(&self) -> String {
        let who = match self.user_email() {
            Some(email) => format!("Signed in as {}", email),
            None => "Not signed in".to_string(),
        };
        let count = match self.current_scope() {
            Some(scope) if !self.list(scope).loading => {
                format!(" | {} items", self.list(scope).items.len())
            }
            _ => String::new(),
        };
        format!("{} | {}{}", who, self.config.api.base_url, count)
    }
}
