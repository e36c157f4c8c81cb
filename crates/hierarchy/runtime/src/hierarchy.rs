//! Hierarchy — the external operation surface
//!
//! Sequences the admission gate, pricing engine and removal engine over a
//! single owned [`MembershipStore`]. Every operation either completes with
//! all invariants re-established or fails without changing any state.

use crate::invariants::check_store;
use crate::{
    Admission, AdmissionGate, AdmissionRequest, MembershipStore, NoopCollector, PaymentCollector,
    PricingEngine, Removal, RemovalEngine,
};
use hierarchy_types::{
    Amount, HierarchyResult, InvariantViolation, Permissions, PricingConfig, UserId, UserView,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A capacity-bounded tree of members rooted at the admin
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hierarchy {
    store: MembershipStore,
    pricing: PricingEngine,
}

impl Hierarchy {
    /// Create a hierarchy with the default flat pricing
    pub fn create(admin: UserId, capacity: usize) -> HierarchyResult<Self> {
        Self::with_pricing(admin, capacity, PricingConfig::default())
    }

    /// Create a hierarchy with an explicit pricing configuration
    pub fn with_pricing(
        admin: UserId,
        capacity: usize,
        pricing: PricingConfig,
    ) -> HierarchyResult<Self> {
        let pricing = PricingEngine::new(pricing)?;
        let store = MembershipStore::new(admin.clone(), capacity)?;

        info!(
            admin = %admin,
            capacity = capacity,
            policy = %pricing.config().policy,
            "Hierarchy created"
        );

        Ok(Self { store, pricing })
    }

    /// Recruit `new_id` under `caller`; returns the new occupancy
    pub fn add_user(
        &mut self,
        caller: &UserId,
        new_id: UserId,
        can_add: bool,
        can_remove: bool,
        payment: Amount,
    ) -> HierarchyResult<usize> {
        self.add_user_with(caller, new_id, can_add, can_remove, payment, &mut NoopCollector)
    }

    /// Recruit `new_id` and hand the payment to `collector`
    ///
    /// The collector runs only after validation and the insert have
    /// completed. If it refuses the payment the insert is undone.
    pub fn add_user_with<C: PaymentCollector + ?Sized>(
        &mut self,
        caller: &UserId,
        new_id: UserId,
        can_add: bool,
        can_remove: bool,
        payment: Amount,
        collector: &mut C,
    ) -> HierarchyResult<usize> {
        let request = AdmissionRequest::new(
            caller.clone(),
            new_id,
            Permissions::new(can_add, can_remove),
            payment,
        );
        let admission = self.admit(&request)?;

        if let Err(e) = collector.collect(caller, admission.price, payment) {
            self.store.remove_leaf_or_internal(&request.new_id)?;
            warn!(
                caller = %caller,
                user = %request.new_id,
                error = %e,
                "Payment refused, admission rolled back"
            );
            return Err(e);
        }

        Ok(admission.occupancy)
    }

    /// Validate and apply an admission without involving a collector
    pub fn admit(&mut self, request: &AdmissionRequest) -> HierarchyResult<Admission> {
        let gate = AdmissionGate::new(&self.pricing);
        match gate.admit(&mut self.store, request) {
            Ok(admission) => {
                info!(
                    caller = %request.caller,
                    user = %request.new_id,
                    can_add = request.permissions.can_add,
                    can_remove = request.permissions.can_remove,
                    price = %admission.price,
                    occupancy = admission.occupancy,
                    "User added"
                );
                Ok(admission)
            }
            Err(e) => {
                warn!(
                    caller = %request.caller,
                    user = %request.new_id,
                    reason = %e,
                    "Admission refused"
                );
                Err(e)
            }
        }
    }

    /// Evict `target`; returns the new occupancy
    pub fn remove_user(&mut self, caller: &UserId, target: &UserId) -> HierarchyResult<usize> {
        self.remove(caller, target).map(|removal| removal.occupancy)
    }

    /// Evict `target` and report how its children were repromoted
    pub fn remove(&mut self, caller: &UserId, target: &UserId) -> HierarchyResult<Removal> {
        match RemovalEngine::new().remove(&mut self.store, caller, target) {
            Ok(removal) => {
                info!(
                    caller = %caller,
                    user = %target,
                    promoted = ?removal.promoted,
                    reparented = removal.reparented.len(),
                    occupancy = removal.occupancy,
                    "User removed"
                );
                Ok(removal)
            }
            Err(e) => {
                warn!(caller = %caller, user = %target, reason = %e, "Removal refused");
                Err(e)
            }
        }
    }

    // --- Query methods ---

    /// Capacity fixed at creation
    pub fn total_size(&self) -> usize {
        self.store.capacity()
    }

    /// Current number of live members, admin included
    pub fn size(&self) -> usize {
        self.store.occupancy()
    }

    /// `(parent, can_add, can_remove, is_member)` for any identity
    pub fn users(&self, id: &UserId) -> UserView {
        self.store.get(id).map(UserView::from).unwrap_or_default()
    }

    /// Direct children of `id` in insertion order
    pub fn get_user_children(&self, id: &UserId) -> Vec<UserId> {
        self.store.children_of(id).to_vec()
    }

    /// Price of the next admission
    pub fn calculate_price(&self) -> Amount {
        self.pricing.calculate_price(&self.store)
    }

    pub fn admin(&self) -> &UserId {
        self.store.admin()
    }

    pub fn pricing(&self) -> &PricingConfig {
        self.pricing.config()
    }

    pub fn store(&self) -> &MembershipStore {
        &self.store
    }

    /// Verify every structural invariant of the current state
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        check_store(&self.store)
    }
}
