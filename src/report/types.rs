// report/types.rs
//
// Structured projection of one raw compliance report.

use serde::{Deserialize, Serialize};

/// Structured compliance report for one platform.
///
/// Every field is always populated; extraction failures are resolved to the
/// per-section placeholder text so rendering never has to special-case a
/// missing section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReport {
    /// Topic / key entities / sentiment prose
    pub summary: String,
    /// Free-text verdict label ("Recommended", "Caution Advised", ...)
    pub verdict_text: String,
    /// Decimal digit run (nominally 1-10) or "N/A"; unit-less, not validated
    pub risk_score: String,
    pub rule_analysis: String,
    pub advisory: String,
}

/// Outcome of parsing one raw report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportContent {
    /// Segmentation succeeded; all sections populated
    Structured(ParsedReport),
    /// Raw text too short or marked incomplete; caller should show it verbatim
    Degraded,
}
