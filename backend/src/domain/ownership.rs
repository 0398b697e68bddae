//! Ownership checks guarding entry mutation.

use crate::domain::{Entry, User};

/// Message reported when a caller tries to remove someone else's entry.
pub const OWNERSHIP_DENIED_MESSAGE: &str = "unauthorized: only the creator can delete this entry";

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDecision {
    /// The caller owns the entry.
    Allowed,
    /// The caller is somebody else.
    Denied,
}

impl OwnershipDecision {
    /// Whether the decision permits mutation.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decide whether `identity` may mutate `entry`.
///
/// Compares identifiers by value and performs no I/O. Loading the entry and
/// reporting a missing one is the caller's job.
///
/// # Examples
/// ```
/// use bloglist::domain::{
///     authorize, DisplayName, Entry, EntryContent, EntryId, EntryOwner, OwnershipDecision,
///     PasswordHash, User, UserId, Username,
/// };
///
/// let owner = User::new(
///     UserId::random(),
///     Username::new("root").unwrap(),
///     DisplayName::new("Superuser").unwrap(),
///     PasswordHash::new("hash").unwrap(),
/// );
/// let entry = Entry::new(
///     EntryId::random(),
///     EntryContent { title: "T".into(), author: String::new(), url: "U".into() },
///     0,
///     EntryOwner::Reference(*owner.id()),
/// );
/// assert_eq!(authorize(&entry, &owner), OwnershipDecision::Allowed);
/// ```
pub fn authorize(entry: &Entry, identity: &User) -> OwnershipDecision {
    if entry.owner().id() == identity.id() {
        OwnershipDecision::Allowed
    } else {
        OwnershipDecision::Denied
    }
}
