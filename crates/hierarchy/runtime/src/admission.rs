//! Admission Gate — validates and performs recruitment of new members
//!
//! Checks run in a fixed order and the first failure decides the error:
//! caller membership, caller add capability, capability containment,
//! duplicate identity, capacity, then payment. Nothing is mutated until
//! every check has passed.

use crate::{MembershipStore, PricingEngine};
use hierarchy_types::{Amount, HierarchyError, HierarchyResult, Permissions, UserId};
use serde::{Deserialize, Serialize};

/// A request by `caller` to recruit `new_id`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRequest {
    pub caller: UserId,
    pub new_id: UserId,
    pub permissions: Permissions,
    pub payment: Amount,
}

impl AdmissionRequest {
    pub fn new(caller: UserId, new_id: UserId, permissions: Permissions, payment: Amount) -> Self {
        Self {
            caller,
            new_id,
            permissions,
            payment,
        }
    }
}

/// Outcome of a successful admission
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// The price the payment was checked against
    pub price: Amount,
    /// Payment above the price, left to the payment collaborator
    pub surplus: Amount,
    /// Occupancy after the insert
    pub occupancy: usize,
}

/// Stateless validator in front of [`MembershipStore::insert`]
#[derive(Clone, Copy, Debug)]
pub struct AdmissionGate<'a> {
    pricing: &'a PricingEngine,
}

impl<'a> AdmissionGate<'a> {
    pub fn new(pricing: &'a PricingEngine) -> Self {
        Self { pricing }
    }

    /// Run every precondition; returns the price on success
    pub fn validate(
        &self,
        store: &MembershipStore,
        request: &AdmissionRequest,
    ) -> HierarchyResult<Amount> {
        let caller = store
            .get(&request.caller)
            .ok_or(HierarchyError::NotAMember)?;

        if !caller.can_add() {
            return Err(HierarchyError::AddPermissionDenied);
        }

        if !caller.permissions.contains(&request.permissions) {
            return Err(HierarchyError::PermissionEscalation);
        }

        if store.is_member(&request.new_id) {
            return Err(HierarchyError::DuplicateMember);
        }

        if !store.has_free_slot() {
            return Err(HierarchyError::CapacityExceeded);
        }

        let price = self.pricing.calculate_price(store);
        if request.payment < price {
            return Err(HierarchyError::InsufficientPayment {
                required: price,
                offered: request.payment,
            });
        }

        Ok(price)
    }

    /// Validate, then insert the new member under the caller
    pub fn admit(
        &self,
        store: &mut MembershipStore,
        request: &AdmissionRequest,
    ) -> HierarchyResult<Admission> {
        let price = self.validate(store, request)?;
        let occupancy =
            store.insert(request.new_id.clone(), &request.caller, request.permissions)?;

        Ok(Admission {
            price,
            surplus: request.payment.saturating_sub(price),
            occupancy,
        })
    }
}
