use std::fs::{self, File};
use std::path::Path;

use tracing::debug;

use super::{BatchReport, OutputConfig};
use crate::core::{Invoice, TriageError, TriageResult, TriageSummary};

/// Header of the results table.
pub const RESULT_COLUMNS: [&str; 4] = ["invoice_id", "triage_bucket", "owner_queue", "reason"];

/// Write the results table and summary for a triaged batch.
///
/// `out_dir` is created (with parents) if it does not exist. Existing
/// artifacts with the same names are overwritten.
pub fn write_results(
    out_dir: impl AsRef<Path>,
    results: &[(Invoice, TriageResult)],
    config: &OutputConfig,
) -> Result<BatchReport, TriageError> {
    let out_dir = out_dir.as_ref();
    // computed first so an overflow leaves the output directory untouched
    let summary = TriageSummary::from_results(results)?;
    fs::create_dir_all(out_dir).map_err(|e| TriageError::io(out_dir, e))?;

    let results_path = out_dir.join(&config.results_file);
    let file = File::create(&results_path).map_err(|e| TriageError::io(&results_path, e))?;
    write_results_to(file, results)?;
    debug!(path = %results_path.display(), rows = results.len(), "wrote results table");

    let summary_path = out_dir.join(&config.summary_file);
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&summary_path, json).map_err(|e| TriageError::io(&summary_path, e))?;
    debug!(path = %summary_path.display(), "wrote summary");

    Ok(BatchReport {
        results_path,
        summary_path,
        summary,
    })
}

/// Write the results table to any sink.
pub fn write_results_to(
    sink: impl std::io::Write,
    results: &[(Invoice, TriageResult)],
) -> Result<(), TriageError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(RESULT_COLUMNS)?;
    for (inv, res) in results {
        writer.write_record([
            inv.invoice_id(),
            res.bucket().code(),
            res.owner_queue(),
            res.reason(),
        ])?;
    }
    writer.flush().map_err(|e| TriageError::io("<results>", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, RuleEngine};
    use rust_decimal_macros::dec;

    fn batch() -> Vec<(Invoice, TriageResult)> {
        RuleEngine::standard().triage_all(vec![
            InvoiceBuilder::new("INV-1", "V-1")
                .po_number("PO-1")
                .grn_received("Y")
                .tax_id("AB12CD34")
                .payment_terms("NET30")
                .amount(dec!(100))
                .build()
                .unwrap(),
            InvoiceBuilder::new("INV-2", "V-1")
                .tax_id("AB12CD34")
                .payment_terms("NET30")
                .amount(dec!(250.75))
                .build()
                .unwrap(),
        ])
    }

    #[test]
    fn table_layout() {
        let mut buf = Vec::new();
        write_results_to(&mut buf, &batch()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "invoice_id,triage_bucket,owner_queue,reason");
        assert_eq!(lines[1], "INV-1,CLEAN,AP-AutoPay,Pass");
        assert_eq!(lines[2], "INV-2,MISSING_PO,AP-Helpdesk,PO missing");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn reason_with_slash_is_unquoted() {
        let results = RuleEngine::standard().triage_all(vec![
            InvoiceBuilder::new("INV-3", "V-1")
                .po_number("PO-1")
                .payment_terms("NET30")
                .build()
                .unwrap(),
        ]);
        let mut buf = Vec::new();
        write_results_to(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("INV-3,TAX_DATA_ISSUE,Vendor-MDM,Tax ID missing/invalid"));
    }

    #[test]
    fn creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        let report = write_results(&out, &batch(), &OutputConfig::default()).unwrap();

        assert_eq!(report.results_path, out.join("triage_results.csv"));
        assert_eq!(report.summary_path, out.join("summary.json"));
        assert!(report.results_path.exists());
        assert_eq!(report.summary.total_invoices, 2);
        assert_eq!(report.summary.total_amount_at_risk, dec!(250.75));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.summary_path).unwrap()).unwrap();
        assert_eq!(json["total_invoices"], 2);
        assert_eq!(json["total_amount_at_risk"], 250.75);
    }

    #[test]
    fn custom_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::io::OutputConfigBuilder::new()
            .results_file("r.csv")
            .summary_file("s.json")
            .build();
        let report = write_results(dir.path(), &batch(), &config).unwrap();
        assert!(dir.path().join("r.csv").exists());
        assert!(dir.path().join("s.json").exists());
        assert_eq!(report.summary_path, dir.path().join("s.json"));
    }
}
