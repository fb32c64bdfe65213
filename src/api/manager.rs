//! Runs remote calls off the UI loop.
//!
//! Each [`Action`] that needs the network is spawned as its own task; the
//! settled result comes back to the event loop as an [`AppEvent::Api`].
//! In-flight calls are never cancelled or coordinated with each other.

use super::client::ApiClient;
use super::error::ApiError;
use crate::app::action::Action;
use crate::app::event::{ApiEvent, AppEvent, ListScope};
use crate::files;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct ApiManager {
    client: ApiClient,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    download_dir: PathBuf,
}

impl ApiManager {
    pub fn new(
        client: ApiClient,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            event_tx,
            download_dir,
        }
    }

    /// Start the remote call behind `action`. `Quit` is not a remote call
    /// and is ignored here.
    pub fn dispatch(&self, action: Action) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        debug!(action = action.kind(), "dispatching");

        match action {
            Action::Login { email, password } => {
                tokio::spawn(async move {
                    let result = client.login(&email, &password).await;
                    send(&tx, ApiEvent::LoggedIn(result));
                });
            }
            Action::Signup { email, password } => {
                tokio::spawn(async move {
                    let result = client.signup(&email, &password).await;
                    send(&tx, ApiEvent::SignedUp(result));
                });
            }
            Action::FetchItems { scope, seq } => {
                tokio::spawn(async move {
                    let result = match scope {
                        ListScope::All => client.list_items().await,
                        ListScope::Mine => client.list_user_items().await,
                    };
                    send(&tx, ApiEvent::ItemsLoaded { scope, seq, result });
                });
            }
            Action::FetchItem { item_id } => {
                tokio::spawn(async move {
                    let result = client.get_item(&item_id).await;
                    send(&tx, ApiEvent::ItemLoaded { item_id, result });
                });
            }
            Action::CreateItem(item) => {
                tokio::spawn(async move {
                    let result = client.create_item(&item).await;
                    send(&tx, ApiEvent::ItemCreated(result));
                });
            }
            Action::DeleteItem { item_id } => {
                tokio::spawn(async move {
                    let result = client.delete_item(&item_id).await;
                    send(&tx, ApiEvent::ItemDeleted { item_id, result });
                });
            }
            Action::SaveImages {
                item_id,
                item_name,
                image_ids,
            } => {
                let download_dir = self.download_dir.clone();
                tokio::spawn(async move {
                    let result =
                        save_images(&client, &download_dir, &item_name, &image_ids).await;
                    send(&tx, ApiEvent::ImagesSaved { item_id, result });
                });
            }
            Action::Quit => {}
        }
    }
}

fn send(tx: &mpsc::UnboundedSender<AppEvent>, event: ApiEvent) {
    if tx.send(AppEvent::Api(event)).is_err() {
        debug!("event loop gone, dropping API result");
    }
}

/// Download every image of an item into `download_dir`.
pub async fn save_images(
    client: &ApiClient,
    download_dir: &std::path::Path,
    item_name: &str,
    image_ids: &[String],
) -> Result<Vec<PathBuf>, ApiError> {
    tokio::fs::create_dir_all(download_dir).await?;

    let mut saved = Vec::with_capacity(image_ids.len());
    for (index, image_id) in image_ids.iter().enumerate() {
        let (bytes, content_type) = client.fetch_file(image_id).await?;
        let name = files::image_file_name(item_name, index, content_type.as_deref());
        let path = files::safe_download_path(download_dir, &name).ok_or_else(|| {
            ApiError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Could not create a safe download path for '{}'", name),
            ))
        })?;
        tokio::fs::write(&path, &bytes).await?;
        saved.push(path);
    }
    if saved.is_empty() {
        warn!(item = %item_name, "item has no images to save");
    }
    Ok(saved)
}
