//! # ap-triage
//!
//! Sorts accounts-payable invoices into exception buckets before human
//! review and routes each bucket to the queue that owns it.
//!
//! Every invoice runs through an ordered list of rules; the first rule
//! that fires decides the bucket, and an invoice no rule objects to is
//! `CLEAN`. All monetary values use [`rust_decimal::Decimal`] so the
//! high-value threshold is exact.
//!
//! ## Quick Start
//!
//! ```rust
//! use ap_triage::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-1", "V-1")
//!     .po_number("")
//!     .tax_id("")
//!     .amount(dec!(100))
//!     .payment_terms("NET30")
//!     .build()
//!     .unwrap();
//!
//! let result = RuleEngine::standard().triage(&invoice);
//! assert_eq!(result.bucket(), Bucket::MissingPo);
//! assert_eq!(result.owner_queue(), "AP-Helpdesk");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Invoice model, rules, engine, summary |
//! | `io` | CSV input, results table and summary JSON output |
//! | `cli` | The `ap-triage` command-line tool |
//!
//! All three are enabled by default.

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "io")]
pub mod io;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
