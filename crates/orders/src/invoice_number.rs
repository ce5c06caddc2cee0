//! Invoice number assignment.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Produces invoice identifiers, synchronously at order-creation time.
///
/// The format is opaque to the rest of the system; the contract is global
/// uniqueness, even under concurrent checkouts.
pub trait InvoiceNumberGenerator: Send + Sync {
    fn next_invoice_number(&self) -> String;
}

/// `<prefix>-<epoch seconds>-<sequence>`.
///
/// The sequence component is a process-wide atomic counter, so two checkouts
/// landing in the same second cannot collide the way a timestamp-plus-random
/// scheme can. The order store independently rejects duplicate invoice
/// numbers as a second line of defense for multi-process deployments.
#[derive(Debug)]
pub struct SequencedInvoiceNumbers {
    prefix: String,
    sequence: AtomicU64,
}

impl SequencedInvoiceNumbers {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sequence: AtomicU64::new(0),
        }
    }
}

impl InvoiceNumberGenerator for SequencedInvoiceNumbers {
    fn next_invoice_number(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", self.prefix, Utc::now().timestamp(), seq)
    }
}
