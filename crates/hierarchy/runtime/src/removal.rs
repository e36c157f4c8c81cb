//! Removal Engine — eviction with repromotion
//!
//! When a member with children is removed, its earliest-recruited child
//! takes the vacated position under the grandparent and every other child
//! is re-parented under that promoted child, after its existing children.
//! No deeper rebalancing happens.

use crate::MembershipStore;
use hierarchy_types::{HierarchyError, HierarchyResult, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a successful removal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    /// The removed member
    pub removed: UserId,
    /// Parent the removed member was attached to
    pub parent: UserId,
    /// Child moved up into the vacated position, if any
    pub promoted: Option<UserId>,
    /// Siblings of the promoted child now attached beneath it
    pub reparented: Vec<UserId>,
    /// Occupancy after the removal
    pub occupancy: usize,
}

/// Stateless validator and repromotion driver over a [`MembershipStore`]
#[derive(Clone, Copy, Debug, Default)]
pub struct RemovalEngine;

impl RemovalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run every precondition; returns the target's parent on success
    pub fn validate(
        &self,
        store: &MembershipStore,
        caller: &UserId,
        target: &UserId,
    ) -> HierarchyResult<UserId> {
        let caller = store.get(caller).ok_or(HierarchyError::NotAMember)?;

        if !caller.can_remove() {
            return Err(HierarchyError::RemovePermissionDenied);
        }

        if target == store.admin() {
            return Err(HierarchyError::ProtectedNode);
        }

        let target = store.get(target).ok_or(HierarchyError::NotAMember)?;
        target.parent.clone().ok_or(HierarchyError::ProtectedNode)
    }

    /// Validate, repromote the target's children, then delete the target
    pub fn remove(
        &self,
        store: &mut MembershipStore,
        caller: &UserId,
        target: &UserId,
    ) -> HierarchyResult<Removal> {
        let parent = self.validate(store, caller, target)?;
        let kids = store.children_of(target).to_vec();

        let (promoted, reparented) = match kids.split_first() {
            Some((promoted, rest)) => {
                store.reparent(promoted, &parent)?;
                debug!(promoted = %promoted, parent = %parent, "Child promoted");

                for child in rest {
                    store.reparent(child, promoted)?;
                    debug!(child = %child, parent = %promoted, "Sibling re-parented");
                }
                (Some(promoted.clone()), rest.to_vec())
            }
            None => (None, Vec::new()),
        };

        store.remove_leaf_or_internal(target)?;

        Ok(Removal {
            removed: target.clone(),
            parent,
            promoted,
            reparented,
            occupancy: store.occupancy(),
        })
    }
}
