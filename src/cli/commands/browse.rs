//! Listing commands for units, issues and their mappings

use crate::curriculum::{CurriculumStore, EnvIssue, GradeLevel, MappingMatch, ScienceUnit};
use anyhow::Result;
use std::fmt::Write;
use tracing::debug;

/// Shown when a unit has no mapped issues
pub const NO_MAPPINGS_MESSAGE: &str = "此單元尚無建議的對應議題。";

pub fn run_units_command(
    store: &CurriculumStore,
    grade: Option<GradeLevel>,
    subject: Option<String>,
) -> Result<()> {
    let units = store.units_filtered(grade, subject.as_deref());
    debug!("Listing {} of {} units", units.len(), store.units().len());
    if units.is_empty() {
        println!("No science units match the given filters.");
        return Ok(());
    }
    print!("{}", format_units(&units));
    Ok(())
}

pub fn run_issues_command(store: &CurriculumStore) -> Result<()> {
    let issues: Vec<&EnvIssue> = store.issues().iter().collect();
    if issues.is_empty() {
        println!("No environmental issues defined.");
        return Ok(());
    }
    print!("{}", format_issues(store, &issues));
    Ok(())
}

/// Print the mappings of `unit_id`. Unknown units and units without
/// mappings both end in the empty-state message.
pub fn run_mappings_command(store: &CurriculumStore, unit_id: &str) -> Result<()> {
    let matches = store.find_mappings_for_unit(unit_id);
    print!("{}", format_mappings(store.unit(unit_id), &matches));
    Ok(())
}

pub fn format_units(units: &[&ScienceUnit]) -> String {
    let mut out = String::new();
    for unit in units {
        let _ = writeln!(
            out,
            "{:<8} {}  {:<14} {}  {} [{}]",
            unit.id,
            unit.grade,
            unit.category().label(),
            unit.subject,
            unit.topic,
            unit.code
        );
    }
    out
}

/// One line per issue, followed by the units curated for it
pub fn format_issues(store: &CurriculumStore, issues: &[&EnvIssue]) -> String {
    let mut out = String::new();
    for issue in issues {
        let _ = write!(
            out,
            "{:<8} {:<14} {} / {} [{}]",
            issue.id,
            issue.category().label(),
            issue.theme,
            issue.sub_theme,
            issue.code
        );
        let units: Vec<&str> = store
            .find_units_for_issue(&issue.id)
            .into_iter()
            .map(|(_, unit)| unit.id.as_str())
            .collect();
        if !units.is_empty() {
            let _ = write!(out, " -> {}", units.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn format_mappings(unit: Option<&ScienceUnit>, matches: &[MappingMatch<'_>]) -> String {
    let mut out = String::new();

    if let Some(unit) = unit {
        let _ = writeln!(out, "{} {} ({}, {})", unit.id, unit.topic, unit.subject, unit.grade);
        let _ = writeln!(out, "課綱內容：{}", unit.description);
        out.push('\n');
    }

    if matches.is_empty() {
        let _ = writeln!(out, "{NO_MAPPINGS_MESSAGE}");
        return out;
    }

    for (idx, m) in matches.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{}. [{}] {} {} ({})",
            idx + 1,
            m.issue.code,
            m.issue.id,
            m.issue.sub_theme,
            m.issue.theme
        );
        let _ = writeln!(out, "   議題實質內涵：{}", m.issue.content);
        let _ = writeln!(out, "   關聯性：{}", m.mapping.relevance);
        let _ = writeln!(out, "   範例活動：{}", m.mapping.example_activity);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_store;

    #[test]
    fn test_format_mappings_lists_resolved_issues_in_order() {
        let store = sample_store();
        let matches = store.find_mappings_for_unit("U1");
        let out = format_mappings(store.unit("U1"), &matches);

        assert!(out.starts_with("U1 單元 U1"));
        let first = out.find("1. [海 JI2] I2").unwrap();
        let second = out.find("2. [海 JI1] I1").unwrap();
        assert!(first < second);
        assert!(out.contains("關聯性：U1 與 I2 的關聯"));
        assert!(out.contains("範例活動：U1 x I1 活動"));
        assert!(!out.contains("I404"));
        assert!(!out.contains(NO_MAPPINGS_MESSAGE));
    }

    #[test]
    fn test_format_mappings_empty_state() {
        let store = sample_store();
        let matches = store.find_mappings_for_unit("U3");
        let out = format_mappings(store.unit("U3"), &matches);
        assert!(out.starts_with("U3 "));
        assert!(out.trim_end().ends_with(NO_MAPPINGS_MESSAGE));
    }

    #[test]
    fn test_format_mappings_unknown_unit() {
        let out = format_mappings(None, &[]);
        assert_eq!(out, format!("{NO_MAPPINGS_MESSAGE}\n"));
    }

    #[test]
    fn test_format_units_one_line_each() {
        let store = sample_store();
        let units: Vec<&ScienceUnit> = store.units().iter().collect();
        let out = format_units(&units);
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().next().unwrap().starts_with("U1 "));
        assert!(out.contains("國中"));
        assert!(out.contains("physics"));
    }

    #[test]
    fn test_format_issues_one_line_each() {
        let store = sample_store();
        let issues: Vec<&EnvIssue> = store.issues().iter().collect();
        let out = format_issues(&store, &issues);
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("海洋教育 (Marine Edu) / 子題 I1"));
        assert!(out.lines().all(|line| line.contains("marine")));
    }

    #[test]
    fn test_format_issues_lists_curated_units() {
        let store = sample_store();
        let issues: Vec<&EnvIssue> = store.issues().iter().collect();
        let lines: Vec<String> = format_issues(&store, &issues)
            .lines()
            .map(str::to_string)
            .collect();
        assert!(lines[0].ends_with("[海 JI1] -> U1"));
        assert!(lines[1].ends_with("[海 JI2] -> U1"));
        assert!(lines[2].ends_with("[海 JI3] -> U2"));

        let unmapped = CurriculumStore::new(vec![], store.issues().to_vec(), vec![]);
        let issues: Vec<&EnvIssue> = unmapped.issues().iter().collect();
        assert!(!format_issues(&unmapped, &issues).contains("->"));
    }
}
