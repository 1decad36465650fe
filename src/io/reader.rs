use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::core::{Invoice, InvoiceRecord, TriageError};

/// Columns every input file must carry, in any order.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "invoice_id",
    "vendor_id",
    "invoice_date",
    "due_date",
    "currency",
    "amount",
    "po_number",
    "grn_received",
    "tax_id",
    "payment_terms",
    "bank_account_last4",
];

/// Read invoices from a CSV file.
pub fn read_invoices(path: impl AsRef<Path>) -> Result<Vec<Invoice>, TriageError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TriageError::io(path, e))?;
    let invoices = read_invoices_from(file)?;
    debug!(path = %path.display(), count = invoices.len(), "read invoices");
    Ok(invoices)
}

/// Read invoices from any CSV source.
///
/// The header is checked before any row is parsed. Extra columns are
/// ignored; row order is preserved.
pub fn read_invoices_from(source: impl std::io::Read) -> Result<Vec<Invoice>, TriageError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    let present: BTreeSet<&str> = headers.iter().collect();
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();
    missing.sort();
    if !missing.is_empty() {
        return Err(TriageError::Schema { missing });
    }

    let mut invoices = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line());
        let record: InvoiceRecord = row.deserialize(Some(&headers))?;
        let invoice = Invoice::try_from(record).map_err(|e| match line {
            Some(line) => e.at_line(line),
            None => e,
        })?;
        invoices.push(invoice);
    }
    Ok(invoices)
}
