//! Blog entries and their owner reference.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{UserId, UserSummary};

/// Error returned when an entry identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformatted id")]
pub struct EntryIdError;

/// Stable entry identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId(Uuid);

impl EntryId {
    /// Parse an identifier taken from a path or payload.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EntryIdError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| EntryIdError)
    }

    /// Wrap an already parsed UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<EntryId> for String {
    fn from(value: EntryId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for EntryId {
    type Error = EntryIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Owner reference carried by an entry.
///
/// Repositories return `Reference` from plain reads and `Summary` from the
/// joined reads used by listing and lookup. On the wire a reference is the
/// bare id string and a summary is `{id, username, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryOwner {
    /// Plain owner identifier.
    Reference(UserId),
    /// Owner expanded to its public summary.
    Summary(UserSummary),
}

impl EntryOwner {
    /// Identifier of the owning user regardless of expansion.
    pub fn id(&self) -> &UserId {
        match self {
            Self::Reference(id) => id,
            Self::Summary(summary) => &summary.id,
        }
    }

    /// Whether the owner has been expanded to a summary.
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}

/// A blog entry.
///
/// ## Invariants
/// - `title` and `url` are non-empty (enforced by entry validation).
/// - The owner is fixed at creation; only `likes` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    id: EntryId,
    title: String,
    author: String,
    url: String,
    likes: i64,
    #[serde(rename = "user")]
    owner: EntryOwner,
}

impl Entry {
    /// Assemble an entry from stored or validated parts.
    pub fn new(
        id: EntryId,
        content: EntryContent,
        likes: i64,
        owner: EntryOwner,
    ) -> Self {
        let EntryContent { title, author, url } = content;
        Self {
            id,
            title,
            author,
            url,
            likes,
            owner,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author name, empty when not supplied.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Link to the post.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Like counter.
    pub fn likes(&self) -> i64 {
        self.likes
    }

    /// Owner reference, expanded or plain.
    pub fn owner(&self) -> &EntryOwner {
        &self.owner
    }

    /// Replace the owner reference with its expanded summary.
    ///
    /// Summaries for a different user are ignored; ownership is immutable.
    #[must_use]
    pub fn with_owner_summary(mut self, summary: UserSummary) -> Self {
        if summary.id == *self.owner.id() {
            self.owner = EntryOwner::Summary(summary);
        }
        self
    }

    /// Collapse an expanded owner back to its plain identifier.
    #[must_use]
    pub fn with_owner_reference(mut self) -> Self {
        self.owner = EntryOwner::Reference(*self.owner.id());
        self
    }

    /// Set the like counter.
    #[must_use]
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = likes;
        self
    }
}

/// Text fields of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryContent {
    /// Entry title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Link to the post.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Username};
    use rstest::{fixture, rstest};
    use serde_json::json;

    const OWNER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const ENTRY: &str = "6f1c8a52-3a7e-4d0b-9a4b-64a1d8f2c001";

    #[fixture]
    fn owner_id() -> UserId {
        UserId::new(OWNER).expect("owner id")
    }

    #[fixture]
    fn entry(owner_id: UserId) -> Entry {
        Entry::new(
            EntryId::new(ENTRY).expect("entry id"),
            EntryContent {
                title: "React patterns".to_owned(),
                author: "Michael Chan".to_owned(),
                url: "https://reactpatterns.com/".to_owned(),
            },
            7,
            EntryOwner::Reference(owner_id),
        )
    }

    fn summary_for(id: UserId) -> UserSummary {
        UserSummary {
            id,
            username: Username::new("root").expect("username"),
            name: DisplayName::new("Superuser").expect("name"),
        }
    }

    #[rstest]
    #[case("")]
    #[case("123")]
    #[case("5a422a851b54a676234d17f7")]
    fn entry_id_rejects_non_uuid(#[case] raw: &str) {
        assert_eq!(EntryId::new(raw), Err(EntryIdError));
    }

    #[rstest]
    fn plain_reference_serialises_as_string(entry: Entry) {
        let value = serde_json::to_value(&entry).expect("serialise entry");
        assert_eq!(
            value,
            json!({
                "id": ENTRY,
                "title": "React patterns",
                "author": "Michael Chan",
                "url": "https://reactpatterns.com/",
                "likes": 7,
                "user": OWNER,
            })
        );
    }

    #[rstest]
    fn expanded_owner_serialises_as_summary(entry: Entry, owner_id: UserId) {
        let value = serde_json::to_value(entry.with_owner_summary(summary_for(owner_id)))
            .expect("serialise entry");
        assert_eq!(
            value.get("user"),
            Some(&json!({ "id": OWNER, "username": "root", "name": "Superuser" }))
        );
        assert!(value.get("__v").is_none());
        assert!(value.get("_id").is_none());
    }

    #[rstest]
    fn summary_for_another_user_is_ignored(entry: Entry) {
        let expanded = entry.clone().with_owner_summary(summary_for(UserId::random()));
        assert_eq!(expanded, entry);
        assert!(!expanded.owner().is_expanded());
    }

    #[rstest]
    fn owner_id_is_stable_across_expansion(entry: Entry, owner_id: UserId) {
        let expanded = entry.with_owner_summary(summary_for(owner_id));
        assert_eq!(expanded.owner().id(), &owner_id);
        assert!(expanded.owner().is_expanded());
    }
}
