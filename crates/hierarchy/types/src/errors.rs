//! Error types for hierarchy operations

use crate::{Amount, UserId};

/// Reasons an admission or removal is refused
///
/// The `Display` strings are the reason strings observed by existing
/// consumers and must not change.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("You don't exist in hierarchy")]
    NotAMember,

    #[error("You don't have add permission")]
    AddPermissionDenied,

    #[error("You can't add users with permissions that you don't have")]
    PermissionEscalation,

    #[error("User exists")]
    DuplicateMember,

    #[error("Hierarchy total size exceeded")]
    CapacityExceeded,

    #[error("Price must be greater then sended")]
    InsufficientPayment { required: Amount, offered: Amount },

    #[error("You don't have remove permission")]
    RemovePermissionDenied,

    #[error("You can't remove admin")]
    ProtectedNode,

    #[error("Hierarchy capacity must be positive")]
    InvalidCapacity,

    #[error("Emission rate must be positive")]
    InvalidEmissionRate,

    #[error("Payment rejected: {0}")]
    PaymentRejected(String),
}

/// Result type alias for hierarchy operations
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// A structural invariant that does not hold for a hierarchy state
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("Admin record missing: {0}")]
    MissingAdmin(UserId),

    #[error("Admin must be the root with every capability")]
    MalformedAdmin,

    #[error("Extra root record: {0}")]
    ExtraRoot(UserId),

    #[error("Occupancy {recorded} does not match {actual} live records")]
    OccupancyMismatch { recorded: usize, actual: usize },

    #[error("Occupancy {occupancy} outside 1..={capacity}")]
    OccupancyOutOfBounds { occupancy: usize, capacity: usize },

    #[error("Member {user} points at missing parent {parent}")]
    DanglingParent { user: UserId, parent: UserId },

    #[error("Member {user} is not listed among the children of {parent}")]
    ParentNotLinked { user: UserId, parent: UserId },

    #[error("{parent} lists {child} as a child, but its parent differs")]
    ChildNotLinked { parent: UserId, child: UserId },

    #[error("{parent} lists {child} more than once")]
    DuplicateChild { parent: UserId, child: UserId },

    #[error("Member {0} is not reachable from the admin")]
    Unreachable(UserId),
}
