//! Structural invariant checks over a [`MembershipStore`]

use crate::MembershipStore;
use hierarchy_types::{InvariantViolation, Permissions, UserId};
use std::collections::{HashSet, VecDeque};

/// Verify that the store is a well-formed tree rooted at the admin
///
/// Checks occupancy bounds, the single-root rule, parent/children
/// consistency in both directions, and that every record is reachable from
/// the admin (which also rules out cycles).
pub fn check_store(store: &MembershipStore) -> Result<(), InvariantViolation> {
    let admin_id = store.admin();
    let admin = store
        .get(admin_id)
        .ok_or_else(|| InvariantViolation::MissingAdmin(admin_id.clone()))?;
    if !admin.is_root() || admin.permissions != Permissions::all() {
        return Err(InvariantViolation::MalformedAdmin);
    }

    let actual = store.record_count();
    if store.occupancy() != actual {
        return Err(InvariantViolation::OccupancyMismatch {
            recorded: store.occupancy(),
            actual,
        });
    }
    if store.occupancy() == 0 || store.occupancy() > store.capacity() {
        return Err(InvariantViolation::OccupancyOutOfBounds {
            occupancy: store.occupancy(),
            capacity: store.capacity(),
        });
    }

    for record in store.records() {
        match &record.parent {
            None if &record.id != admin_id => {
                return Err(InvariantViolation::ExtraRoot(record.id.clone()));
            }
            None => {}
            Some(parent_id) => {
                let parent = store.get(parent_id).ok_or_else(|| {
                    InvariantViolation::DanglingParent {
                        user: record.id.clone(),
                        parent: parent_id.clone(),
                    }
                })?;
                if !parent.has_child(&record.id) {
                    return Err(InvariantViolation::ParentNotLinked {
                        user: record.id.clone(),
                        parent: parent_id.clone(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for child_id in &record.children {
            if !seen.insert(child_id) {
                return Err(InvariantViolation::DuplicateChild {
                    parent: record.id.clone(),
                    child: child_id.clone(),
                });
            }
            let linked = store
                .get(child_id)
                .is_some_and(|child| child.parent.as_ref() == Some(&record.id));
            if !linked {
                return Err(InvariantViolation::ChildNotLinked {
                    parent: record.id.clone(),
                    child: child_id.clone(),
                });
            }
        }
    }

    let mut reached: HashSet<&UserId> = HashSet::new();
    let mut queue = VecDeque::from([admin_id]);
    while let Some(id) = queue.pop_front() {
        if reached.insert(id) {
            queue.extend(store.children_of(id));
        }
    }
    if reached.len() != actual {
        let mut unreachable: Vec<&UserId> = store
            .records()
            .map(|r| &r.id)
            .filter(|id| !reached.contains(id))
            .collect();
        unreachable.sort();
        if let Some(first) = unreachable.first() {
            return Err(InvariantViolation::Unreachable((*first).clone()));
        }
    }

    Ok(())
}
