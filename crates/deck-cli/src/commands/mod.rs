pub mod check;
pub mod fmt;
pub mod show;

use pimdeck::validate::Violation;
use std::path::Path;

/// Prints every violation of a deck, one per line.
pub(crate) fn report_violations(path: &Path, violations: &[Violation]) {
    eprintln!(
        "{}: {} violation(s):",
        path.display(),
        violations.len()
    );
    for violation in violations {
        eprintln!("  - {}", violation);
    }
}
