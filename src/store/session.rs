//! Session store: the bearer credential and the identity decoded from it.
//!
//! The identity is read from the credential's payload without verifying its
//! signature. It is used for display and for the cosmetic "is owner" check
//! only; the server enforces every permission.

use crate::api::{ApiClient, ApiError, TokenResponse};
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Durable storage for the current credential.
pub trait CredentialStore: Send {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
}

/// Keeps the credential in a single file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&mut self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Who the current credential says the user is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
}

/// Extract the identity from a three-part token's middle segment.
pub fn decode_identity(token: &str) -> Option<Identity> {
    let mut parts = token.split('.');
    let (_, payload, _) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    if claims.sub.trim().is_empty() {
        return None;
    }
    Some(Identity { email: claims.sub })
}

const UNREADABLE_TOKEN: &str = "Login failed: the server returned an unreadable token.";

struct Credential {
    token: String,
    identity: Identity,
}

/// The current session. A credential is held only together with the identity
/// decoded from it.
pub struct Session {
    credential: Option<Credential>,
    store: Box<dyn CredentialStore>,
    client: ApiClient,
}

impl Session {
    pub fn new(store: Box<dyn CredentialStore>, client: ApiClient) -> Self {
        Self {
            credential: None,
            store,
            client,
        }
    }

    /// Load the persisted credential, if any. An undecodable one is discarded.
    pub fn restore(&mut self) -> Option<&Identity> {
        let stored = self.store.load();
        if stored.is_some() {
            debug!("restoring persisted credential");
        }
        self.set_credential(stored)
    }

    /// Install a new credential, or clear the session with `None`.
    pub fn set_credential(&mut self, token: Option<String>) -> Option<&Identity> {
        let decoded = token.and_then(|token| match decode_identity(&token) {
            Some(identity) => Some(Credential { token, identity }),
            None => {
                debug!("credential payload could not be decoded, clearing session");
                None
            }
        });

        match decoded {
            Some(credential) => {
                if let Err(e) = self.store.save(&credential.token) {
                    warn!(error = %e, "failed to persist credential");
                }
                self.client.set_bearer(Some(credential.token.clone()));
                info!(email = %credential.identity.email, "session established");
                self.credential = Some(credential);
            }
            None => {
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "failed to clear persisted credential");
                }
                self.client.set_bearer(None);
                self.credential = None;
            }
        }
        self.identity()
    }

    /// Apply the settled result of `POST /login`.
    ///
    /// On failure nothing changes and the returned message explains why.
    pub fn complete_login(
        &mut self,
        result: Result<TokenResponse, ApiError>,
    ) -> Result<Identity, String> {
        match result {
            Ok(response) => {
                if !response.token_type.eq_ignore_ascii_case("bearer") {
                    debug!(token_type = %response.token_type, "unexpected token type");
                }
                if decode_identity(&response.access_token).is_none() {
                    warn!("login returned an undecodable token");
                    return Err(UNREADABLE_TOKEN.to_string());
                }
                self.set_credential(Some(response.access_token))
                    .cloned()
                    .ok_or_else(|| UNREADABLE_TOKEN.to_string())
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                Err(e.user_message("Login failed. Please check your credentials."))
            }
        }
    }

    pub fn logout(&mut self) {
        self.set_credential(None);
        info!("logged out");
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.credential.as_ref().map(|c| &c.identity)
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}
