use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::builder::parse_amount;
use super::error::ValidationError;

/// Literal placeholder some upstream systems export instead of an empty PO.
pub const PO_NULL_PLACEHOLDER: &str = "NULL";

/// An accounts-payable invoice as received from the source system.
///
/// Construct through [`Invoice::try_from`] on an [`InvoiceRecord`] or through
/// [`InvoiceBuilder`](super::InvoiceBuilder). Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    invoice_id: String,
    vendor_id: String,
    invoice_date: String,
    due_date: String,
    currency: String,
    amount: Decimal,
    po_number: String,
    grn_received: String,
    tax_id: String,
    payment_terms: String,
    bank_account_last4: String,
}

impl Invoice {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        invoice_id: String,
        vendor_id: String,
        invoice_date: String,
        due_date: String,
        currency: String,
        amount: Decimal,
        po_number: String,
        grn_received: String,
        tax_id: String,
        payment_terms: String,
        bank_account_last4: String,
    ) -> Self {
        Self {
            invoice_id,
            vendor_id,
            invoice_date,
            due_date,
            currency,
            amount,
            po_number,
            grn_received,
            tax_id,
            payment_terms,
            bank_account_last4,
        }
    }

    pub fn invoice_id(&self) -> &str {
        &self.invoice_id
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    /// Invoice date as delivered; not parsed.
    pub fn invoice_date(&self) -> &str {
        &self.invoice_date
    }

    /// Due date as delivered; not parsed.
    pub fn due_date(&self) -> &str {
        &self.due_date
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Gross amount, never negative.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn po_number(&self) -> &str {
        &self.po_number
    }

    /// Goods receipt flag, `"Y"` or `"N"`. Anything else counts as received.
    pub fn grn_received(&self) -> &str {
        &self.grn_received
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn payment_terms(&self) -> &str {
        &self.payment_terms
    }

    pub fn bank_account_last4(&self) -> &str {
        &self.bank_account_last4
    }

    /// Whether a purchase order reference is present.
    ///
    /// Both the empty string and the literal `NULL` mean "no PO".
    pub fn has_po(&self) -> bool {
        !(self.po_number.is_empty() || self.po_number == PO_NULL_PLACEHOLDER)
    }

    /// Whether the goods receipt is explicitly flagged as not posted.
    pub fn grn_missing(&self) -> bool {
        self.grn_received == "N"
    }
}

/// One input row with its eleven columns as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_id: String,
    pub vendor_id: String,
    pub invoice_date: String,
    pub due_date: String,
    pub currency: String,
    pub amount: String,
    pub po_number: String,
    pub grn_received: String,
    pub tax_id: String,
    pub payment_terms: String,
    pub bank_account_last4: String,
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = ValidationError;

    /// Only `amount` is coerced; every other column is carried verbatim.
    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        let amount =
            parse_amount(&record.amount).map_err(|e| e.for_invoice(record.invoice_id.clone()))?;
        Ok(Self::from_parts(
            record.invoice_id,
            record.vendor_id,
            record.invoice_date,
            record.due_date,
            record.currency,
            amount,
            record.po_number,
            record.grn_received,
            record.tax_id,
            record.payment_terms,
            record.bank_account_last4,
        ))
    }
}

/// Exception bucket an invoice is sorted into.
///
/// Declaration order matches rule priority, with `Clean` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bucket {
    /// No purchase order reference.
    MissingPo,
    /// PO present but goods receipt not posted.
    NoGrn,
    /// Vendor tax ID missing or malformed.
    TaxDataIssue,
    /// Amount above the review threshold.
    AmountOutlier,
    /// Payment terms outside the standard set.
    TermsMismatch,
    /// No exception; eligible for automatic payment.
    Clean,
}

impl Bucket {
    /// All buckets in priority order.
    pub const ALL: [Bucket; 6] = [
        Self::MissingPo,
        Self::NoGrn,
        Self::TaxDataIssue,
        Self::AmountOutlier,
        Self::TermsMismatch,
        Self::Clean,
    ];

    /// Code written to the results table.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPo => "MISSING_PO",
            Self::NoGrn => "NO_GRN",
            Self::TaxDataIssue => "TAX_DATA_ISSUE",
            Self::AmountOutlier => "AMOUNT_OUTLIER",
            Self::TermsMismatch => "TERMS_MISMATCH",
            Self::Clean => "CLEAN",
        }
    }

    /// Parse from the results-table code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.code() == code)
    }

    /// Queue that owns invoices in this bucket.
    pub fn owner_queue(&self) -> &'static str {
        match self {
            Self::MissingPo => "AP-Helpdesk",
            Self::NoGrn => "Receiving",
            Self::TaxDataIssue => "Vendor-MDM",
            Self::AmountOutlier => "AP-Triage",
            Self::TermsMismatch => "AP-VendorMgmt",
            Self::Clean => "AP-AutoPay",
        }
    }

    /// Standard explanation attached to this bucket.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingPo => "PO missing",
            Self::NoGrn => "Goods receipt not posted",
            Self::TaxDataIssue => "Tax ID missing/invalid",
            Self::AmountOutlier => "High value invoice requires review",
            Self::TermsMismatch => "Payment terms not standard",
            Self::Clean => "Pass",
        }
    }

    /// Whether invoices in this bucket need human attention.
    pub fn is_exception(&self) -> bool {
        *self != Self::Clean
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of triaging one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageResult {
    bucket: Bucket,
    owner_queue: String,
    reason: String,
}

impl TriageResult {
    pub fn new(bucket: Bucket, owner_queue: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            bucket,
            owner_queue: owner_queue.into(),
            reason: reason.into(),
        }
    }

    /// Result with the bucket's standard owner queue and reason.
    pub fn for_bucket(bucket: Bucket) -> Self {
        Self::new(bucket, bucket.owner_queue(), bucket.reason())
    }

    /// The fallthrough result when no rule fires.
    pub fn clean() -> Self {
        Self::for_bucket(Bucket::Clean)
    }

    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    pub fn owner_queue(&self) -> &str {
        &self.owner_queue
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
