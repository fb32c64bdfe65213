//! Modal coordinator: which overlay panels are open, and with what payload.

use crate::api::ItemId;
use std::collections::BTreeMap;

/// Every overlay the client knows about, in drawing order (last is on top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModalKind {
    Login,
    Signup,
    ItemDetail,
    ConfirmDelete,
}

impl ModalKind {
    pub const ALL: [ModalKind; 4] = [
        ModalKind::Login,
        ModalKind::Signup,
        ModalKind::ItemDetail,
        ModalKind::ConfirmDelete,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ModalKind::Login => "Login",
            ModalKind::Signup => "Sign Up",
            ModalKind::ItemDetail => "Item Details",
            ModalKind::ConfirmDelete => "Delete Item",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalEntry {
    pub open: bool,
    pub payload: Option<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRegistry {
    entries: BTreeMap<ModalKind, ModalEntry>,
}

impl Default for ModalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalRegistry {
    /// A registry with every modal registered and closed.
    pub fn new() -> Self {
        Self {
            entries: ModalKind::ALL
                .iter()
                .map(|&kind| (kind, ModalEntry::default()))
                .collect(),
        }
    }

    /// Open `kind`, replacing any payload it had.
    pub fn open(&mut self, kind: ModalKind, payload: Option<ItemId>) {
        let entry = self.entries.entry(kind).or_default();
        entry.open = true;
        entry.payload = payload;
    }

    pub fn close(&mut self, kind: ModalKind) {
        let entry = self.entries.entry(kind).or_default();
        entry.open = false;
        entry.payload = None;
    }

    pub fn close_all(&mut self) {
        for entry in self.entries.values_mut() {
            *entry = ModalEntry::default();
        }
    }

    #[cfg(test)]
    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.entries.get(&kind).is_some_and(|e| e.open)
    }

    /// Payload of `kind`, only while it is open.
    pub fn payload(&self, kind: ModalKind) -> Option<&str> {
        self.entries
            .get(&kind)
            .filter(|e| e.open)
            .and_then(|e| e.payload.as_deref())
    }

    #[cfg(test)]
    pub fn entry(&self, kind: ModalKind) -> Option<&ModalEntry> {
        self.entries.get(&kind)
    }

    /// Open modals in drawing order.
    pub fn open_modals(&self) -> impl Iterator<Item = ModalKind> + '_ {
        self.entries
            .iter()
            .filter(|(_, e)| e.open)
            .map(|(&kind, _)| kind)
    }

    /// The modal that receives keyboard input.
    pub fn topmost(&self) -> Option<ModalKind> {
        self.open_modals().last()
    }

    pub fn any_open(&self) -> bool {
        self.entries.values().any(|e| e.open)
    }
}
