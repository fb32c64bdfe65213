use crate::api::{ApiError, Item, ItemId, SignupResponse, TokenResponse};
use crossterm::event::Event as CrosstermEvent;
use std::path::PathBuf;

/// Monotonic tag for list fetches; only the latest per view is applied.
pub type RequestSeq = u64;

/// Which item list a fetch populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    Mine,
}

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A remote call settled
    Api(ApiEvent),

    /// Tick for notice expiry and spinner animation
    Tick,
}

#[derive(Debug)]
pub enum ApiEvent {
    LoggedIn(Result<TokenResponse, ApiError>),
    SignedUp(Result<SignupResponse, ApiError>),
    ItemsLoaded {
        scope: ListScope,
        seq: RequestSeq,
        result: Result<Vec<Item>, ApiError>,
    },
    ItemLoaded {
        item_id: ItemId,
        result: Result<Item, ApiError>,
    },
    ItemCreated(Result<Item, ApiError>),
    ItemDeleted {
        item_id: ItemId,
        result: Result<(), ApiError>,
    },
    ImagesSaved {
        item_id: ItemId,
        result: Result<Vec<PathBuf>, ApiError>,
    },
}
