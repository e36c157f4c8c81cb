//! Hierarchy Registry Runtime
//!
//! Maintains a capacity-bounded tree of members with inherited
//! capabilities and a pay-to-join admission rule.
//!
//! # Components
//!
//! - [`MembershipStore`]: records and the parent/children relation.
//! - [`AdmissionGate`]: permission, containment, capacity and payment checks
//!   in front of the store's insert.
//! - [`PricingEngine`]: price of the next slot under a [`PricingPolicy`].
//! - [`RemovalEngine`]: eviction with deterministic repromotion of the
//!   removed member's children.
//! - [`Hierarchy`]: the operation surface tying the above together, with a
//!   [`PaymentCollector`] seam invoked after every successful admission.
//!
//! [`PricingPolicy`]: hierarchy_types::PricingPolicy

#![deny(unsafe_code)]

mod admission;
mod hierarchy;
pub mod invariants;
mod payment;
mod pricing;
mod removal;
mod store;

pub use admission::{Admission, AdmissionGate, AdmissionRequest};
pub use hierarchy::Hierarchy;
pub use payment::{NoopCollector, PaymentCollector, PaymentLedger, PaymentReceipt};
pub use pricing::PricingEngine;
pub use removal::{Removal, RemovalEngine};
pub use store::MembershipStore;

pub use hierarchy_types::*;
