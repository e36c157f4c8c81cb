//! Hierarchy Registry Domain Types
//!
//! This crate defines the data model for a capacity-bounded, tree-shaped
//! registry of members with inherited administrative capabilities.
//!
//! # Key Concepts
//!
//! - **Member**: a live participant, identified by an opaque address-like
//!   [`UserId`].
//! - **Admin**: the unique root member. Created once, never removable.
//! - **Capability**: `can_add` (may recruit) or `can_remove` (may evict),
//!   fixed when the member is admitted. A member never receives a capability
//!   its recruiter lacked.
//! - **Capacity**: fixed upper bound on the number of live members.
//! - **Pricing policy**: how the admission price of the next slot is derived
//!   from capacity, occupancy and the emission rate.
//!
//! # Architecture
//!
//! Pure types crate. The state machine that enforces the invariants lives in
//! `hierarchy-runtime`.

#![deny(unsafe_code)]

mod amount;
mod errors;
mod pricing;
mod user;

pub use amount::*;
pub use errors::*;
pub use pricing::*;
pub use user::*;
