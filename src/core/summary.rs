use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::TriageError;
use super::types::{Bucket, Invoice, TriageResult};

/// Aggregate view of a triaged batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageSummary {
    /// Number of invoices in the batch.
    pub total_invoices: usize,
    /// Invoice count per bucket. Buckets with no invoices are omitted.
    pub counts_by_bucket: BTreeMap<Bucket, usize>,
    /// Sum of amounts over all non-CLEAN invoices, rounded to cents.
    /// Written as an exact JSON number.
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub total_amount_at_risk: Decimal,
}

impl TriageSummary {
    /// Summarize triage results.
    ///
    /// Fails if the amount at risk exceeds the range of [`Decimal`].
    pub fn from_results(results: &[(Invoice, TriageResult)]) -> Result<Self, TriageError> {
        let mut counts_by_bucket = BTreeMap::new();
        let mut at_risk = Decimal::ZERO;

        for (inv, res) in results {
            *counts_by_bucket.entry(res.bucket()).or_insert(0) += 1;
            if res.bucket().is_exception() {
                at_risk = at_risk.checked_add(inv.amount()).ok_or_else(|| {
                    TriageError::Arithmetic(format!(
                        "amount at risk overflowed at invoice '{}'",
                        inv.invoice_id()
                    ))
                })?;
            }
        }

        Ok(Self {
            total_invoices: results.len(),
            counts_by_bucket,
            total_amount_at_risk: at_risk.round_dp(2),
        })
    }

    /// Count for one bucket, zero if absent.
    pub fn count(&self, bucket: Bucket) -> usize {
        self.counts_by_bucket.get(&bucket).copied().unwrap_or(0)
    }

    /// Number of invoices routed to a human queue.
    pub fn exception_count(&self) -> usize {
        self.total_invoices.saturating_sub(self.count(Bucket::Clean))
    }
}
