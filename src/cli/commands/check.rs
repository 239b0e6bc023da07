//! Data-set integrity check

use crate::curriculum::{CurriculumStore, IntegrityReport};
use anyhow::{bail, Result};

/// Print the integrity report. Fails when there is anything to report.
pub fn run_check_command(store: &CurriculumStore) -> Result<()> {
    let report = store.check_integrity();
    print!("{}", format_report(store, &report));
    if !report.is_clean() {
        bail!("{} integrity finding(s) in curriculum data", report.findings().len());
    }
    Ok(())
}

pub fn format_report(store: &CurriculumStore, report: &IntegrityReport) -> String {
    let mut out = format!(
        "{} units, {} issues, {} mappings\n",
        store.units().len(),
        store.issues().len(),
        store.mappings().len()
    );
    if report.is_clean() {
        out.push_str("OK: no integrity problems found\n");
    } else {
        for finding in report.findings() {
            out.push_str("  - ");
            out.push_str(&finding);
            out.push('\n');
        }
    }
    out
}
