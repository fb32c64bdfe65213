use crate::api::{ItemId, NewItem};
use crate::app::event::{ListScope, RequestSeq};

/// Side effects requested by the handler, carried out by the dispatcher.
#[derive(Debug)]
pub enum Action {
    Login { email: String, password: String },
    Signup { email: String, password: String },
    FetchItems { scope: ListScope, seq: RequestSeq },
    FetchItem { item_id: ItemId },
    CreateItem(NewItem),
    DeleteItem { item_id: ItemId },
    SaveImages { item_id: ItemId, item_name: String, image_ids: Vec<String> },
    Quit,
}

impl Action {
    /// Short name for logs. Never includes credentials.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Login { .. } => "login",
            Action::Signup { .. } => "signup",
            Action::FetchItems { .. } => "fetch_items",
            Action::FetchItem { .. } => "fetch_item",
            Action::CreateItem(_) => "create_item",
            Action::DeleteItem { .. } => "delete_item",
            Action::SaveImages { .. } => "save_images",
            Action::Quit => "quit",
        }
    }
}
