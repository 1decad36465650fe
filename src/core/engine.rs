use tracing::trace;

use super::rules;
use super::types::{Invoice, TriageResult};

/// Signature shared by all triage checks.
pub type RuleFn = fn(&Invoice) -> Option<TriageResult>;

/// A named triage check.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable identifier used in logs (e.g. "missing_po").
    pub name: &'static str,
    /// The check itself.
    pub check: RuleFn,
}

impl Rule {
    pub const fn new(name: &'static str, check: RuleFn) -> Self {
        Self { name, check }
    }

    pub fn evaluate(&self, invoice: &Invoice) -> Option<TriageResult> {
        (self.check)(invoice)
    }
}

/// The production rule order.
///
/// Order matters: an invoice lacking both a PO and a tax ID lands in
/// MISSING_PO because that rule runs first.
pub fn standard_rules() -> Vec<Rule> {
    vec![
        Rule::new("missing_po", rules::missing_po),
        Rule::new("no_grn", rules::no_grn),
        Rule::new("tax_data_issue", rules::tax_data_issue),
        Rule::new("amount_outlier", rules::amount_outlier),
        Rule::new("terms_mismatch", rules::terms_mismatch),
    ]
}

/// Applies an ordered list of rules, first match wins.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Create an engine evaluating `rules` in the given order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Engine with [`standard_rules`].
    pub fn standard() -> Self {
        Self::new(standard_rules())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Triage one invoice.
    ///
    /// Returns the result of the first rule that fires, or
    /// [`TriageResult::clean`] when none does.
    pub fn triage(&self, invoice: &Invoice) -> TriageResult {
        for rule in &self.rules {
            if let Some(result) = rule.evaluate(invoice) {
                trace!(
                    invoice_id = invoice.invoice_id(),
                    rule = rule.name,
                    bucket = %result.bucket(),
                    "rule matched"
                );
                return result;
            }
        }
        trace!(invoice_id = invoice.invoice_id(), "no rule matched");
        TriageResult::clean()
    }

    /// Triage a batch, keeping input order.
    pub fn triage_all(&self, invoices: Vec<Invoice>) -> Vec<(Invoice, TriageResult)> {
        invoices
            .into_iter()
            .map(|inv| {
                let result = self.triage(&inv);
                (inv, result)
            })
            .collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Triage one invoice with the standard rule order.
pub fn triage(invoice: &Invoice) -> TriageResult {
    RuleEngine::standard().triage(invoice)
}
