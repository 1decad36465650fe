//! Batch input and output.
//!
//! Reads invoices from a comma-separated file and writes two artifacts
//! into an output directory:
//! - `triage_results.csv`: one row per invoice, in input order
//! - `summary.json`: invoice count, count per bucket, amount at risk
//!
//! # Example
//!
//! ```no_run
//! use ap_triage::core::RuleEngine;
//! use ap_triage::io::*;
//!
//! let invoices = read_invoices("invoices.csv").unwrap();
//! let results = RuleEngine::standard().triage_all(invoices);
//! let report = write_results("out", &results, &OutputConfig::default()).unwrap();
//! println!("{} exceptions", report.summary.exception_count());
//! ```

mod reader;
mod writer;

use std::path::PathBuf;

use crate::core::{RuleEngine, TriageError, TriageSummary};

pub use reader::*;
pub use writer::*;

/// File names of the batch artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Per-invoice results table.
    pub results_file: String,
    /// Aggregated summary.
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_file: "triage_results.csv".into(),
            summary_file: "summary.json".into(),
        }
    }
}

/// Builder for [`OutputConfig`].
///
/// ```
/// use ap_triage::io::OutputConfigBuilder;
///
/// let config = OutputConfigBuilder::new().summary_file("batch-17.json").build();
/// assert_eq!(config.results_file, "triage_results.csv");
/// ```
#[derive(Debug, Default)]
pub struct OutputConfigBuilder {
    config: OutputConfig,
}

impl OutputConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results table file name.
    pub fn results_file(mut self, name: impl Into<String>) -> Self {
        self.config.results_file = name.into();
        self
    }

    /// Set the summary file name.
    pub fn summary_file(mut self, name: impl Into<String>) -> Self {
        self.config.summary_file = name.into();
        self
    }

    pub fn build(self) -> OutputConfig {
        self.config
    }
}

/// What a finished batch produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Path of the written results table.
    pub results_path: PathBuf,
    /// Path of the written summary.
    pub summary_path: PathBuf,
    /// The summary that was written.
    pub summary: TriageSummary,
}

/// Read `input`, triage every invoice with `engine`, and write the
/// artifacts into `out_dir`.
///
/// Any schema, validation or I/O failure aborts before output is written.
pub fn run_batch(
    input: impl AsRef<std::path::Path>,
    out_dir: impl AsRef<std::path::Path>,
    engine: &RuleEngine,
    config: &OutputConfig,
) -> Result<BatchReport, TriageError> {
    let invoices = read_invoices(input)?;
    let results = engine.triage_all(invoices);
    write_results(out_dir, &results, config)
}
