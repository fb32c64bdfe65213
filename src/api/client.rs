//! HTTP client for the MongoMart API.
//!
//! Wraps a shared `reqwest::Client` and the current bearer credential. Every
//! request made through [`ApiClient`] carries `Authorization: Bearer <token>`
//! when a credential is installed.

use super::error::ApiError;
use super::types::{image_mime, Credentials, Item, NewItem, SignupResponse, TokenResponse};
use reqwest::{multipart, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use tracing::{debug, instrument};

/// Cheaply cloneable handle; clones share the bearer credential.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mongomart-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                bearer: RwLock::new(None),
            }),
        })
    }

    /// Install or clear the bearer credential attached to requests.
    pub fn set_bearer(&self, token: Option<String>) {
        if let Ok(mut guard) = self.inner.bearer.write() {
            *guard = token;
        }
    }

    pub fn bearer(&self) -> Option<String> {
        self.inner.bearer.read().ok().and_then(|g| g.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        let builder = self.inner.http.request(method, url);
        match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(%status, body = %body, "API request failed");
        Err(ApiError::from_status(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let bytes = Self::send(builder).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = Credentials { email, password };
        Self::send_json(self.request(Method::POST, "/login").json(&body)).await
    }

    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, ApiError> {
        let body = Credentials { email, password };
        Self::send_json(self.request(Method::POST, "/signup").json(&body)).await
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        Self::send_json(self.request(Method::GET, "/items/")).await
    }

    #[instrument(skip(self))]
    pub async fn list_user_items(&self) -> Result<Vec<Item>, ApiError> {
        Self::send_json(self.request(Method::GET, "/user/items")).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: &str) -> Result<Item, ApiError> {
        Self::send_json(self.request(Method::GET, &format!("/items/{}", item_id))).await
    }

    /// Create an item with a multipart body. Image files are read from disk
    /// at call time; the transport sets the multipart boundary header.
    #[instrument(skip(self, item), fields(name = %item.name, images = item.images.len()))]
    pub async fn create_item(&self, item: &NewItem) -> Result<Item, ApiError> {
        let mut form = multipart::Form::new()
            .text("name", item.name.clone())
            .text("price", item.price_field())
            .text("quantity", item.quantity_field());
        if let Some(ref description) = item.description {
            form = form.text("description", description.clone());
        }
        for path in &item.images {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            let part = multipart::Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(image_mime(path))?;
            form = form.part("files", part);
        }
        Self::send_json(self.request(Method::POST, "/items").multipart(form)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: &str) -> Result<(), ApiError> {
        Self::send(self.request(Method::DELETE, &format!("/items/{}", item_id))).await?;
        Ok(())
    }

    /// Download a stored image. Returns the bytes and the reported content type.
    #[instrument(skip(self))]
    pub async fn fetch_file(&self, file_id: &str) -> Result<(Vec<u8>, Option<String>), ApiError> {
        let response = Self::send(self.request(Method::GET, &format!("/file/{}", file_id))).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), content_type))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::extract::{Multipart, Path};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::io::Write;

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub(crate) async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn bearer_of(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
    }

    fn item_json(id: &str, owner: &str) -> Value {
        json!({
            "id": id,
            "name": format!("item {}", id),
            "description": null,
            "price": 1.5,
            "quantity": 2,
            "owner_email": owner,
            "image_ids": []
        })
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let router = Router::new().route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "a@b.c" && body["password"] == "pw" {
                    (StatusCode::OK, Json(json!({"access_token": "tok", "token_type": "bearer"})))
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"detail": "Incorrect email or password"})),
                    )
                }
            }),
        );
        let client = ApiClient::new(&spawn_server(router).await).unwrap();

        let token = client.login("a@b.c", "pw").await.unwrap();
        assert_eq!(token.access_token, "tok");

        let err = client.login("a@b.c", "nope").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
        assert_eq!(err.user_message("Login failed."), "Incorrect email or password");
    }

    #[tokio::test]
    async fn test_bearer_attached_only_when_present() {
        let router = Router::new().route(
            "/user/items",
            get(|headers: HeaderMap| async move {
                match bearer_of(&headers) {
                    Some(token) if token == "tok" => {
                        (StatusCode::OK, Json(json!([item_json("1", "a@b.c")])))
                    }
                    _ => (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"detail": "Not authenticated"})),
                    ),
                }
            }),
        );
        let client = ApiClient::new(&spawn_server(router).await).unwrap();

        let err = client.list_user_items().await.unwrap_err();
        assert_eq!(err.detail(), Some("Not authenticated"));

        client.set_bearer(Some("tok".into()));
        let items = client.list_user_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner_email.as_deref(), Some("a@b.c"));

        client.set_bearer(None);
        assert!(client.list_user_items().await.is_err());
    }

    #[tokio::test]
    async fn test_list_get_and_delete() {
        let router = Router::new()
            .route(
                "/items/",
                get(|| async { Json(json!([item_json("1", "x@y.z"), item_json("2", "x@y.z")])) }),
            )
            .route(
                "/items/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "1" {
                        (StatusCode::OK, Json(item_json("1", "x@y.z")))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({"detail": "Item not found"})))
                    }
                })
                .delete(|Path(_id): Path<String>| async { Json(json!({"message": "deleted"})) }),
            );
        let client = ApiClient::new(&spawn_server(router).await).unwrap();

        let items = client.list_items().await.unwrap();
        assert_eq!(items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), ["1", "2"]);

        let item = client.get_item("1").await.unwrap();
        assert_eq!(item.price, Decimal::new(15, 1));

        let err = client.get_item("9").await.unwrap_err();
        assert_eq!(err.user_message("Failed to fetch item details."), "Item not found");

        client.delete_item("1").await.unwrap();
    }

    #[tokio::test]
    async fn test_create_item_sends_typed_multipart() {
        let router = Router::new().route(
            "/items",
            post(|headers: HeaderMap, mut multipart: Multipart| async move {
                assert_eq!(bearer_of(&headers).as_deref(), Some("tok"));
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                assert!(content_type.starts_with("multipart/form-data; boundary="));

                let mut name = String::new();
                let mut price = None;
                let mut quantity = None;
                let mut files = Vec::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let field_name = field.name().unwrap_or_default().to_string();
                    match field_name.as_str() {
                        "files" => {
                            let file_name = field.file_name().unwrap_or_default().to_string();
                            let mime = field.content_type().unwrap_or_default().to_string();
                            let bytes = field.bytes().await.unwrap();
                            files.push((file_name, mime, bytes.len()));
                        }
                        "price" => price = field.text().await.unwrap().parse::<f64>().ok(),
                        "quantity" => quantity = field.text().await.unwrap().parse::<i64>().ok(),
                        "name" => name = field.text().await.unwrap(),
                        _ => {}
                    }
                }
                let (Some(price), Some(quantity)) = (price, quantity) else {
                    return (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({"detail": [{"msg": "value is not a valid number"}]})),
                    );
                };
                assert_eq!(files, vec![("photo.png".to_string(), "image/png".to_string(), 4)]);
                (
                    StatusCode::OK,
                    Json(json!({
                        "id": "new",
                        "name": name,
                        "price": price,
                        "quantity": quantity,
                        "owner_email": "a@b.c",
                        "image_ids": ["img1"]
                    })),
                )
            }),
        );
        let client = ApiClient::new(&spawn_server(router).await).unwrap();
        client.set_bearer(Some("tok".into()));

        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("photo.png");
        std::fs::File::create(&image).unwrap().write_all(b"\x89PNG").unwrap();

        let new_item = NewItem::from_form(
            "Lamp",
            "",
            "19.99",
            "3",
            image.to_str().unwrap(),
        )
        .unwrap();
        let created = client.create_item(&new_item).await.unwrap();
        assert_eq!(created.id, "new");
        assert_eq!(created.price, Decimal::new(1999, 2));
        assert_eq!(created.quantity, 3);
        assert_eq!(created.image_ids, vec!["img1".to_string()]);
    }

    #[tokio::test]
    async fn test_create_item_missing_file_is_io_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let new_item =
            NewItem::from_form("Lamp", "", "1", "1", "/definitely/not/here.png").unwrap();
        let err = client.create_item(&new_item).await.unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }

    #[tokio::test]
    async fn test_fetch_file_returns_bytes() {
        let router = Router::new().route(
            "/file/{id}",
            get(|Path(id): Path<String>| async move {
                ([("content-type", "image/jpeg")], id.into_bytes())
            }),
        );
        let client = ApiClient::new(&spawn_server(router).await).unwrap();
        let (bytes, mime) = client.fetch_file("abc").await.unwrap();
        assert_eq!(bytes, b"abc");
        assert_eq!(mime.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.list_items().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!err.user_message("Failed to load items.").is_empty());
    }
}
