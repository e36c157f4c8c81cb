//! Members of the hierarchy and their capabilities

use serde::{Deserialize, Serialize};

/// Opaque, address-like identity of a participant
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Administrative capabilities held by a member
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Permissions {
    /// May recruit new members
    pub can_add: bool,
    /// May evict members
    pub can_remove: bool,
}

impl Permissions {
    pub const fn new(can_add: bool, can_remove: bool) -> Self {
        Self { can_add, can_remove }
    }

    /// Both capabilities, as held by the admin
    pub const fn all() -> Self {
        Self::new(true, true)
    }

    pub const fn none() -> Self {
        Self::new(false, false)
    }

    /// True when every capability in `requested` is also held by `self`
    pub fn contains(&self, requested: &Permissions) -> bool {
        (!requested.can_add || self.can_add) && (!requested.can_remove || self.can_remove)
    }
}

/// Stored record for a live member
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The member this record describes
    pub id: UserId,
    /// Recruiting member, `None` only for the admin
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent: Option<UserId>,
    /// Capabilities granted at admission
    pub permissions: Permissions,
    /// Direct children in insertion order
    #[serde(default)]
    pub children: Vec<UserId>,
}

impl UserRecord {
    pub fn new(id: UserId, parent: Option<UserId>, permissions: Permissions) -> Self {
        Self {
            id,
            parent,
            permissions,
            children: Vec::new(),
        }
    }

    /// The root record for the admin
    pub fn root(admin: UserId) -> Self {
        Self::new(admin, None, Permissions::all())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn can_add(&self) -> bool {
        self.permissions.can_add
    }

    pub fn can_remove(&self) -> bool {
        self.permissions.can_remove
    }

    pub fn has_child(&self, child: &UserId) -> bool {
        self.children.contains(child)
    }

    /// Append a child, keeping insertion order
    pub fn push_child(&mut self, child: UserId) {
        self.children.push(child);
    }

    /// Remove a child by value; returns whether it was present
    pub fn remove_child(&mut self, child: &UserId) -> bool {
        match self.children.iter().position(|c| c == child) {
            Some(idx) => {
                self.children.remove(idx);
                true
            }
            None => false,
        }
    }
}

/// Externally visible projection of a member: `(parent, can_add, can_remove, is_member)`
///
/// Identities without a record project to the zero view, so "never admitted"
/// and "removed" are indistinguishable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserView {
    pub parent: Option<UserId>,
    pub can_add: bool,
    pub can_remove: bool,
    pub is_member: bool,
}

impl From<&UserRecord> for UserView {
    fn from(record: &UserRecord) -> Self {
        Self {
            parent: record.parent.clone(),
            can_add: record.permissions.can_add,
            can_remove: record.permissions.can_remove,
            is_member: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_containment() {
        let all = Permissions::all();
        let add_only = Permissions::new(true, false);
        let remove_only = Permissions::new(false, true);

        assert!(all.contains(&add_only));
        assert!(all.contains(&remove_only));
        assert!(add_only.contains(&Permissions::none()));
        assert!(!add_only.contains(&all));
        assert!(!add_only.contains(&remove_only));
        assert!(!Permissions::none().contains(&add_only));
    }

    #[test]
    fn test_child_ordering() {
        let mut record = UserRecord::root(UserId::new("admin"));
        record.push_child(UserId::new("a"));
        record.push_child(UserId::new("b"));
        record.push_child(UserId::new("c"));

        assert!(record.remove_child(&UserId::new("b")));
        assert!(!record.remove_child(&UserId::new("b")));
        assert_eq!(record.children, vec![UserId::new("a"), UserId::new("c")]);
    }

    #[test]
    fn test_default_view_is_absent() {
        let view = UserView::default();
        assert_eq!(view.parent, None);
        assert!(!view.can_add);
        assert!(!view.can_remove);
        assert!(!view.is_member);
    }

    #[test]
    fn test_view_from_record() {
        let record = UserRecord::new(
            UserId::new("u1"),
            Some(UserId::new("admin")),
            Permissions::new(true, false),
        );
        let view = UserView::from(&record);
        assert_eq!(view.parent, Some(UserId::new("admin")));
        assert!(view.can_add);
        assert!(!view.can_remove);
        assert!(view.is_member);
    }
}
