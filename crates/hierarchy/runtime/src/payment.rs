//! Payment collaborator seam
//!
//! The hierarchy only checks that an admission payment covers the price.
//! Custody of the funds belongs to a [`PaymentCollector`], which is invoked
//! after the admission has been validated and applied.

use chrono::{DateTime, Utc};
use hierarchy_types::{Amount, HierarchyResult, UserId};
use serde::{Deserialize, Serialize};

/// External collaborator that takes custody of admission payments
pub trait PaymentCollector {
    /// Accept `offered` from `payer` for an admission priced at `price`
    ///
    /// Returning an error rolls the admission back.
    fn collect(&mut self, payer: &UserId, price: Amount, offered: Amount) -> HierarchyResult<()>;
}

/// Collector that accepts every payment without recording it
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCollector;

impl PaymentCollector for NoopCollector {
    fn collect(&mut self, _payer: &UserId, _price: Amount, _offered: Amount) -> HierarchyResult<()> {
        Ok(())
    }
}

/// Record of one collected admission payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub receipt_id: String,
    pub payer: UserId,
    pub price: Amount,
    pub offered: Amount,
    pub surplus: Amount,
    pub received_at: DateTime<Utc>,
}

/// In-memory ledger of collected payments
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PaymentLedger {
    receipts: Vec<PaymentReceipt>,
    total_received: Amount,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipts(&self) -> &[PaymentReceipt] {
        &self.receipts
    }

    pub fn receipt_count(&self) -> usize {
        self.receipts.len()
    }

    /// Sum of every payment accepted, surplus included
    pub fn total_received(&self) -> Amount {
        self.total_received
    }

    pub fn receipts_for(&self, payer: &UserId) -> Vec<&PaymentReceipt> {
        self.receipts.iter().filter(|r| &r.payer == payer).collect()
    }
}

impl PaymentCollector for PaymentLedger {
    fn collect(&mut self, payer: &UserId, price: Amount, offered: Amount) -> HierarchyResult<()> {
        self.receipts.push(PaymentReceipt {
            receipt_id: uuid::Uuid::new_v4().to_string(),
            payer: payer.clone(),
            price,
            offered,
            surplus: offered.saturating_sub(price),
            received_at: Utc::now(),
        });
        self.total_received = self.total_received.saturating_add(offered);
        Ok(())
    }
}
