//! Wire types for the MongoMart API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub type ItemId = String;

/// A catalog item as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    #[serde(alias = "_id")]
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub image_ids: Vec<String>,
}

impl Item {
    /// Price formatted with two decimals, e.g. `$19.90`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price.round_dp(2))
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email.as_deref() == Some(email)
    }
}

fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /login` and `POST /signup`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Response of `POST /signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub email: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A validated item creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    pub images: Vec<PathBuf>,
}

/// Why the add-item form could not be turned into a [`NewItem`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Item name is required.")]
    MissingName,
    #[error("Price must be a non-negative number, got \"{0}\".")]
    InvalidPrice(String),
    #[error("Quantity must be a non-negative whole number, got \"{0}\".")]
    InvalidQuantity(String),
}

impl NewItem {
    /// Build a creation request from raw form text.
    ///
    /// `images` is a comma-separated list of local file paths; blank entries
    /// are skipped.
    pub fn from_form(
        name: &str,
        description: &str,
        price: &str,
        quantity: &str,
        images: &str,
    ) -> Result<Self, FormError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let price_text = price.trim();
        let price = Decimal::from_str(price_text)
            .ok()
            .filter(|p| !p.is_sign_negative())
            .ok_or_else(|| FormError::InvalidPrice(price_text.to_string()))?;

        let quantity_text = quantity.trim();
        let quantity = quantity_text
            .parse::<u32>()
            .map_err(|_| FormError::InvalidQuantity(quantity_text.to_string()))?;

        let description = Some(description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let images = images
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();

        Ok(Self {
            name: name.to_string(),
            description,
            price,
            quantity,
            images,
        })
    }

    /// Price as sent in the multipart body, without trailing zeros.
    pub fn price_field(&self) -> String {
        self.price.normalize().to_string()
    }

    pub fn quantity_field(&self) -> String {
        self.quantity.to_string()
    }
}

/// Guess an image MIME type from a file extension.
pub fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
