//! Shared UI state containers: session, modals, and the transient notice.
//!
//! Each is an owned value living in [`crate::app::state::AppState`] and is
//! handed to the handler and renderer by reference.

pub mod modal;
pub mod notice;
pub mod session;

pub use modal::{ModalKind, ModalRegistry};
pub use notice::{NoticeBoard, Severity};
pub use session::{FileCredentialStore, Session};
