//! Non-fatal layout diagnostics.

use thiserror::Error;

/// Problems detected while arranging. None of them abort the pass; the
/// layout keeps the best result it has and records the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutDiagnostic {
    #[error("arrange pass produced no valid aggregate measurement")]
    MissingMeasurement,

    #[error("arrange did not converge after {iterations} iterations")]
    NotConverged { iterations: u32 },
}
