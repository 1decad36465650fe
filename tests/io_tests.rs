#![cfg(feature = "io")]

use std::fs;
use std::path::PathBuf;

use ap_triage::core::*;
use ap_triage::io::*;
use rust_decimal_macros::dec;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/invoices.csv")
}

#[test]
fn fixture_buckets() {
    let invoices = read_invoices(fixture()).unwrap();
    let results = RuleEngine::standard().triage_all(invoices);
    let got: Vec<(&str, Bucket)> = results
        .iter()
        .map(|(i, r)| (i.invoice_id(), r.bucket()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("INV-1001", Bucket::Clean),
            ("INV-1002", Bucket::MissingPo),
            ("INV-1003", Bucket::NoGrn),
            ("INV-1004", Bucket::TaxDataIssue),
            ("INV-1005", Bucket::AmountOutlier),
            ("INV-1006", Bucket::TermsMismatch),
            ("INV-1007", Bucket::Clean),
            ("INV-1008", Bucket::MissingPo),
        ]
    );
}

#[test]
fn batch_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let report = run_batch(
        fixture(),
        &out,
        &RuleEngine::standard(),
        &OutputConfig::default(),
    )
    .unwrap();

    let table = fs::read_to_string(out.join("triage_results.csv")).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "invoice_id,triage_bucket,owner_queue,reason");
    assert_eq!(lines[2], "INV-1002,MISSING_PO,AP-Helpdesk,PO missing");
    assert_eq!(lines[3], "INV-1003,NO_GRN,Receiving,Goods receipt not posted");
    assert_eq!(lines[8], "INV-1008,MISSING_PO,AP-Helpdesk,PO missing");

    // 480.25 + 3300.10 + 220.00 + 15000.00 + 75.50 + 999.99
    assert_eq!(report.summary.total_amount_at_risk, dec!(20075.84));
    assert_eq!(report.summary.total_invoices, 8);
    assert_eq!(report.summary.count(Bucket::MissingPo), 2);
    assert_eq!(report.summary.count(Bucket::Clean), 2);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["total_invoices"], 8);
    assert_eq!(json["counts_by_bucket"]["MISSING_PO"], 2);
    assert_eq!(json["counts_by_bucket"]["NO_GRN"], 1);
    assert_eq!(json["counts_by_bucket"]["TAX_DATA_ISSUE"], 1);
    assert_eq!(json["counts_by_bucket"]["AMOUNT_OUTLIER"], 1);
    assert_eq!(json["counts_by_bucket"]["TERMS_MISMATCH"], 1);
    assert_eq!(json["counts_by_bucket"]["CLEAN"], 2);
    assert_eq!(json["total_amount_at_risk"], 20075.84);
}

#[test]
fn schema_error_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "invoice_id,vendor_id\nINV-1,V-1\n").unwrap();
    let out = dir.path().join("out");

    let err = run_batch(&input, &out, &RuleEngine::standard(), &OutputConfig::default())
        .unwrap_err();
    assert!(matches!(err, TriageError::Schema { ref missing } if missing.len() == 9));
    assert!(!out.exists());
}

#[test]
fn validation_error_aborts_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    let mut text = fs::read_to_string(fixture()).unwrap();
    text.push_str("INV-1009,V-108,2026-02-08,2026-03-10,USD,-5,PO-1,Y,AB12CD34,NET30,8888\n");
    fs::write(&input, text).unwrap();
    let out = dir.path().join("out");

    let err = run_batch(&input, &out, &RuleEngine::standard(), &OutputConfig::default())
        .unwrap_err();
    match err {
        TriageError::Validation(v) => {
            assert_eq!(v.line, Some(10));
            assert_eq!(v.invoice_id.as_deref(), Some("INV-1009"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(!out.exists());
}

const HEADER: &str = "invoice_id,vendor_id,invoice_date,due_date,currency,amount,po_number,grn_received,tax_id,payment_terms,bank_account_last4\n";

#[test]
fn overflowing_total_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("huge.csv");
    let row = |id: &str| format!("{id},V-1,,,USD,79228162514264337593543950335,,Y,AB12CD34,NET30,\n");
    fs::write(&input, format!("{HEADER}{}{}", row("INV-1"), row("INV-2"))).unwrap();
    let out = dir.path().join("out");

    let err = run_batch(&input, &out, &RuleEngine::standard(), &OutputConfig::default())
        .unwrap_err();
    assert!(matches!(err, TriageError::Arithmetic(_)), "{err:?}");
    assert!(!out.exists());
}

#[test]
fn summary_json_keeps_large_totals_exact() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("large.csv");
    fs::write(
        &input,
        format!("{HEADER}INV-1,V-1,,,USD,1234567890123456.78,,Y,AB12CD34,NET30,\n"),
    )
    .unwrap();
    let out = dir.path().join("out");

    let report = run_batch(&input, &out, &RuleEngine::standard(), &OutputConfig::default())
        .unwrap();
    assert_eq!(report.summary.total_amount_at_risk, dec!(1234567890123456.78));
    let json = fs::read_to_string(out.join("summary.json")).unwrap();
    assert!(json.contains("\"total_amount_at_risk\": 1234567890123456.78"), "{json}");
}
