//! Mapping lookup engine
//!
//! Matching is purely by explicit curation: results follow the order of the
//! mapping table and are never re-ranked.

use super::{CurriculumStore, EnvIssue, GradeLevel, Mapping, ScienceUnit};
use tracing::debug;

/// A curated mapping resolved to its issue record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingMatch<'a> {
    pub mapping: &'a Mapping,
    pub issue: &'a EnvIssue,
}

impl CurriculumStore {
    /// All mappings for `unit_id`, each resolved to its issue.
    ///
    /// Unknown units yield an empty list. Mappings whose issue does not exist
    /// are dropped.
    pub fn find_mappings_for_unit(&self, unit_id: &str) -> Vec<MappingMatch<'_>> {
        self.mappings()
            .iter()
            .filter(|mapping| mapping.science_unit_id == unit_id)
            .filter_map(|mapping| match self.issue(&mapping.env_issue_id) {
                Some(issue) => Some(MappingMatch { mapping, issue }),
                None => {
                    debug!(
                        "Skipping mapping {} -> {}: issue not found",
                        mapping.science_unit_id, mapping.env_issue_id
                    );
                    None
                }
            })
            .collect()
    }

    /// Units curated for `issue_id`, in mapping-table order
    pub fn find_units_for_issue(&self, issue_id: &str) -> Vec<(&Mapping, &ScienceUnit)> {
        self.mappings()
            .iter()
            .filter(|mapping| mapping.env_issue_id == issue_id)
            .filter_map(|mapping| {
                let unit = self.unit(&mapping.science_unit_id);
                if unit.is_none() {
                    debug!(
                        "Skipping mapping {} -> {}: unit not found",
                        mapping.science_unit_id, mapping.env_issue_id
                    );
                }
                unit.map(|unit| (mapping, unit))
            })
            .collect()
    }

    /// Units matching an optional grade and an optional subject keyword.
    /// The keyword matches a case-insensitive substring of the subject or the
    /// subject's category key (`physics`, `earth-science`, ...).
    pub fn units_filtered(
        &self,
        grade: Option<GradeLevel>,
        subject: Option<&str>,
    ) -> Vec<&ScienceUnit> {
        let subject = subject.map(|s| s.trim().to_lowercase());
        self.units()
            .iter()
            .filter(|unit| grade.map_or(true, |grade| unit.grade == grade))
            .filter(|unit| match &subject {
                Some(keyword) => {
                    unit.subject.to_lowercase().contains(keyword.as_str())
                        || unit.category().label() == keyword
                }
                None => true,
            })
            .collect()
    }
}
