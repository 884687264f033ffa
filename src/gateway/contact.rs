use serde::{Deserialize, Serialize};

use super::transport::Record;

/// Example domain entity carried by the gateway.
///
/// `email` is the natural key used for per-row view state; `id` is only
/// known once the gateway has stored the contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
}

/// Fields the user fills in before saving.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Record for Contact {
    type Draft = ContactDraft;

    fn from_draft(id: u64, draft: ContactDraft) -> Self {
        Self {
            id: Some(id),
            name: draft.name,
            email: draft.email,
        }
    }
}
