//! Wire DTOs for the wallet identity endpoint.
//!
//! DESIGN
//! ======
//! The backend has shipped two spellings of the identity payload
//! (`userId`/`fullName` and `subject`/`name`). Both are accepted, so the
//! loader's success rule only has to look at the resolved id.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Identity of the signed-in principal. Replaced wholesale, never patched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque subject identifier.
    pub id: String,
    /// Display name.
    pub full_name: String,
    pub email: String,
}

/// Subject identifier as sent by the backend: a string or a bare number.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Text(String),
    Number(serde_json::Number),
}

impl SubjectId {
    /// Usable id, if any. Blank strings and zero do not identify anyone.
    #[must_use]
    pub fn into_id(self) -> Option<String> {
        match self {
            Self::Text(text) => (!text.trim().is_empty()).then_some(text),
            Self::Number(n) => (n.as_u64() != Some(0)).then(|| n.to_string()),
        }
    }
}

/// Body of `GET /api/wallet/me`.
///
/// Each spelling is its own field so a payload carrying both parses; the
/// wallet spelling wins when both are usable.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct IdentityResponse {
    #[serde(default, rename = "userId")]
    pub user_id: Option<SubjectId>,
    #[serde(default)]
    pub subject: Option<SubjectId>,
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl IdentityResponse {
    /// Convert into a profile when a subject id is present and usable.
    #[must_use]
    pub fn into_profile(self) -> Option<UserProfile> {
        let id = self
            .user_id
            .and_then(SubjectId::into_id)
            .or_else(|| self.subject.and_then(SubjectId::into_id))?;
        Some(UserProfile {
            id,
            full_name: self.full_name.or(self.name).unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}
