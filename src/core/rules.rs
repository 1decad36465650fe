//! The individual triage checks.
//!
//! Every rule is a pure function over a single [`Invoice`]. A rule returns
//! `Some` when its exception applies and `None` otherwise; rules never look
//! at each other's outcomes, so each can be tested and reordered alone.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use super::types::{Bucket, Invoice, TriageResult};

/// Invoices strictly above this amount need manual review.
pub const AMOUNT_OUTLIER_THRESHOLD: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Payment terms accepted without vendor-management review.
pub const ALLOWED_PAYMENT_TERMS: &[&str] = &["NET30", "NET45", "NET60"];

static TAX_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{8,15}$").expect("Invalid tax ID pattern"));

/// Check a vendor tax ID: 8 to 15 ASCII letters or digits, nothing else.
pub fn is_valid_tax_id(tax_id: &str) -> bool {
    TAX_ID_RE.is_match(tax_id)
}

/// MISSING_PO: no purchase order reference.
pub fn missing_po(inv: &Invoice) -> Option<TriageResult> {
    (!inv.has_po()).then(|| TriageResult::for_bucket(Bucket::MissingPo))
}

/// NO_GRN: a PO exists but the goods receipt is flagged as not posted.
///
/// Guarded on PO presence so it never contradicts [`missing_po`].
pub fn no_grn(inv: &Invoice) -> Option<TriageResult> {
    (inv.has_po() && inv.grn_missing()).then(|| TriageResult::for_bucket(Bucket::NoGrn))
}

/// TAX_DATA_ISSUE: vendor tax ID missing or malformed.
pub fn tax_data_issue(inv: &Invoice) -> Option<TriageResult> {
    let tax_id = inv.tax_id();
    (tax_id.is_empty() || !is_valid_tax_id(tax_id))
        .then(|| TriageResult::for_bucket(Bucket::TaxDataIssue))
}

/// AMOUNT_OUTLIER: amount strictly greater than [`AMOUNT_OUTLIER_THRESHOLD`].
pub fn amount_outlier(inv: &Invoice) -> Option<TriageResult> {
    (inv.amount() > AMOUNT_OUTLIER_THRESHOLD)
        .then(|| TriageResult::for_bucket(Bucket::AmountOutlier))
}

/// TERMS_MISMATCH: payment terms outside [`ALLOWED_PAYMENT_TERMS`].
///
/// Comparison is exact; `net30` is not standard.
pub fn terms_mismatch(inv: &Invoice) -> Option<TriageResult> {
    (!ALLOWED_PAYMENT_TERMS.contains(&inv.payment_terms()))
        .then(|| TriageResult::for_bucket(Bucket::TermsMismatch))
}
