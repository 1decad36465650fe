use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::Invoice;

static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("Invalid numeric pattern")
});

/// Parse a monetary amount into a non-negative [`Decimal`].
///
/// Surrounding whitespace is ignored. Plain (`1250.50`) and scientific
/// (`1.2505e3`) notation are accepted. Numbers outside the [`Decimal`]
/// range, or with more digits than it can hold exactly, are rejected
/// rather than rounded.
pub fn parse_amount(text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("amount", "amount must not be empty"));
    }

    let scientific = trimmed.contains(['e', 'E']);
    let parsed = if scientific {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str(trimmed)
    };

    let amount = parsed.map_err(|_| {
        let message = if NUMERIC_RE.is_match(trimmed) {
            format!("'{trimmed}' is out of range for a decimal amount")
        } else {
            format!("'{trimmed}' is not a valid decimal number")
        };
        ValidationError::new("amount", message)
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new(
            "amount",
            format!("amount {amount} must not be negative"),
        ));
    }

    if !scientific && amount.abs().normalize().to_string() != canonical_digits(trimmed) {
        return Err(ValidationError::new(
            "amount",
            format!("'{trimmed}' has more precision than a decimal amount can hold"),
        ));
    }

    // normalise "-0" so it compares and prints as zero
    Ok(amount.abs())
}

/// Plain-notation number without sign, leading integer zeros or trailing
/// fraction zeros, i.e. how a normalized [`Decimal`] displays it.
fn canonical_digits(text: &str) -> String {
    let unsigned = text.trim_start_matches(['+', '-']);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int = match int.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    match frac.trim_end_matches('0') {
        "" => int.to_string(),
        frac => format!("{int}.{frac}"),
    }
}

/// Builder for constructing invoices in code.
///
/// ```
/// use ap_triage::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new("INV-1001", "V-17")
///     .po_number("PO-88")
///     .grn_received("Y")
///     .tax_id("AB12CD34")
///     .payment_terms("NET30")
///     .amount(dec!(420.00))
///     .build()
///     .unwrap();
///
/// assert_eq!(triage(&invoice).bucket(), Bucket::Clean);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceBuilder {
    invoice_id: String,
    vendor_id: String,
    invoice_date: String,
    due_date: String,
    currency: String,
    amount: Decimal,
    amount_text: Option<String>,
    po_number: String,
    grn_received: String,
    tax_id: String,
    payment_terms: String,
    bank_account_last4: String,
}

impl InvoiceBuilder {
    pub fn new(invoice_id: impl Into<String>, vendor_id: impl Into<String>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            vendor_id: vendor_id.into(),
            ..Default::default()
        }
    }

    pub fn invoice_date(mut self, date: impl Into<String>) -> Self {
        self.invoice_date = date.into();
        self
    }

    pub fn due_date(mut self, date: impl Into<String>) -> Self {
        self.due_date = date.into();
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self.amount_text = None;
        self
    }

    /// Set the amount from raw text; it is parsed in [`build`](Self::build).
    pub fn amount_text(mut self, text: impl Into<String>) -> Self {
        self.amount_text = Some(text.into());
        self
    }

    pub fn po_number(mut self, po: impl Into<String>) -> Self {
        self.po_number = po.into();
        self
    }

    pub fn grn_received(mut self, flag: impl Into<String>) -> Self {
        self.grn_received = flag.into();
        self
    }

    pub fn tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = tax_id.into();
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = terms.into();
        self
    }

    pub fn bank_account_last4(mut self, last4: impl Into<String>) -> Self {
        self.bank_account_last4 = last4.into();
        self
    }

    /// Build the invoice, rejecting unparseable or negative amounts.
    pub fn build(self) -> Result<Invoice, ValidationError> {
        let amount = match &self.amount_text {
            Some(text) => {
                parse_amount(text).map_err(|e| e.for_invoice(self.invoice_id.clone()))?
            }
            None if self.amount.is_sign_negative() && !self.amount.is_zero() => {
                return Err(ValidationError::new(
                    "amount",
                    format!("amount {} must not be negative", self.amount),
                )
                .for_invoice(self.invoice_id));
            }
            None => self.amount.abs(),
        };

        Ok(Invoice::from_parts(
            self.invoice_id,
            self.vendor_id,
            self.invoice_date,
            self.due_date,
            self.currency,
            amount,
            self.po_number,
            self.grn_received,
            self.tax_id,
            self.payment_terms,
            self.bank_account_last4,
        ))
    }
}
