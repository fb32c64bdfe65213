//! Remote MongoMart API: HTTP client, wire types, errors, and the background
//! dispatcher that turns actions into calls.

pub mod client;
pub mod error;
pub mod manager;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use manager::ApiManager;
pub use types::{FormError, Item, ItemId, NewItem, SignupResponse, TokenResponse};
