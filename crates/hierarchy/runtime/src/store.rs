//! Membership Store — records and the parent/children relation
//!
//! The store is the source of truth for "who's in" and who recruited whom.
//! It does not make decisions: permission, capacity and payment checks
//! belong to the admission gate and removal engine.

use hierarchy_types::{HierarchyError, HierarchyResult, Permissions, UserId, UserRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owned hierarchy state: records keyed by identity plus capacity accounting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MembershipStore {
    admin: UserId,
    capacity: usize,
    occupancy: usize,
    users: HashMap<UserId, UserRecord>,
}

impl MembershipStore {
    /// Create a store holding only the admin record
    pub fn new(admin: UserId, capacity: usize) -> HierarchyResult<Self> {
        if capacity == 0 {
            return Err(HierarchyError::InvalidCapacity);
        }

        let mut users = HashMap::new();
        users.insert(admin.clone(), UserRecord::root(admin.clone()));

        Ok(Self {
            admin,
            capacity,
            occupancy: 1,
            users,
        })
    }

    /// Insert a new leaf under `parent_id`
    ///
    /// Appends the new member to the parent's children and bumps occupancy.
    /// Returns the new occupancy.
    pub fn insert(
        &mut self,
        new_id: UserId,
        parent_id: &UserId,
        permissions: Permissions,
    ) -> HierarchyResult<usize> {
        if self.users.contains_key(&new_id) {
            return Err(HierarchyError::DuplicateMember);
        }
        let parent = self
            .users
            .get_mut(parent_id)
            .ok_or(HierarchyError::NotAMember)?;
        parent.push_child(new_id.clone());

        let record = UserRecord::new(new_id.clone(), Some(parent_id.clone()), permissions);
        self.users.insert(new_id, record);
        self.occupancy += 1;

        Ok(self.occupancy)
    }

    /// Delete the record for `target_id` and unlink it from its parent
    ///
    /// The target's own children are left untouched; the removal engine
    /// re-parents them before calling this.
    pub fn remove_leaf_or_internal(&mut self, target_id: &UserId) -> HierarchyResult<UserRecord> {
        let record = self
            .users
            .remove(target_id)
            .ok_or(HierarchyError::NotAMember)?;

        if let Some(parent_id) = &record.parent {
            if let Some(parent) = self.users.get_mut(parent_id) {
                parent.remove_child(target_id);
            }
        }
        self.occupancy -= 1;

        Ok(record)
    }

    /// Move `child_id` to the end of `new_parent_id`'s children
    pub fn reparent(&mut self, child_id: &UserId, new_parent_id: &UserId) -> HierarchyResult<()> {
        if !self.users.contains_key(new_parent_id) {
            return Err(HierarchyError::NotAMember);
        }
        let child = self
            .users
            .get_mut(child_id)
            .ok_or(HierarchyError::NotAMember)?;
        let old_parent = child.parent.replace(new_parent_id.clone());

        if let Some(old_parent_id) = old_parent {
            if let Some(old_parent) = self.users.get_mut(&old_parent_id) {
                old_parent.remove_child(child_id);
            }
        }
        if let Some(new_parent) = self.users.get_mut(new_parent_id) {
            new_parent.push_child(child_id.clone());
        }

        Ok(())
    }

    // --- Query methods ---

    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.get(id)
    }

    pub fn is_member(&self, id: &UserId) -> bool {
        self.users.contains_key(id)
    }

    /// Direct children in insertion order; empty for non-members
    pub fn children_of(&self, id: &UserId) -> &[UserId] {
        self.users
            .get(id)
            .map(|r| r.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_free_slot(&self) -> bool {
        self.occupancy < self.capacity
    }

    pub fn admin(&self) -> &UserId {
        &self.admin
    }

    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    pub fn record_count(&self) -> usize {
        self.users.len()
    }
}
