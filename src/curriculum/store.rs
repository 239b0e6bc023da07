//! Immutable curriculum tables loaded once at startup

use super::{EnvIssue, Mapping, ScienceUnit};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN_DATA: &str = include_str!("../../data/curriculum.yaml");

/// Serialized form of the three curriculum tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumData {
    #[serde(default)]
    pub units: Vec<ScienceUnit>,
    #[serde(default)]
    pub issues: Vec<EnvIssue>,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
}

/// Read-only store of science units, issues and their curated mappings
#[derive(Debug, Clone)]
pub struct CurriculumStore {
    units: Vec<ScienceUnit>,
    issues: Vec<EnvIssue>,
    mappings: Vec<Mapping>,
}

/// Data-integrity findings for a set of curriculum tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// (mapping index, missing unit id)
    pub dangling_units: Vec<(usize, String)>,
    /// (mapping index, missing issue id)
    pub dangling_issues: Vec<(usize, String)>,
    pub duplicate_unit_ids: Vec<String>,
    pub duplicate_issue_ids: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_units.is_empty()
            && self.dangling_issues.is_empty()
            && self.duplicate_unit_ids.is_empty()
            && self.duplicate_issue_ids.is_empty()
    }

    /// Human-readable findings, one per line
    pub fn findings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (index, id) in &self.dangling_units {
            lines.push(format!("mapping #{index} references unknown unit '{id}'"));
        }
        for (index, id) in &self.dangling_issues {
            lines.push(format!("mapping #{index} references unknown issue '{id}'"));
        }
        for id in &self.duplicate_unit_ids {
            lines.push(format!("duplicate unit id '{id}'"));
        }
        for id in &self.duplicate_issue_ids {
            lines.push(format!("duplicate issue id '{id}'"));
        }
        lines
    }
}

impl CurriculumStore {
    /// Build a store from in-memory tables.
    ///
    /// Dangling mapping references are accepted; lookups skip them.
    pub fn new(units: Vec<ScienceUnit>, issues: Vec<EnvIssue>, mappings: Vec<Mapping>) -> Self {
        Self {
            units,
            issues,
            mappings,
        }
    }

    /// The seed data set shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_DATA)
    }

    /// Parse a YAML document with `units`, `issues` and `mappings` lists.
    ///
    /// Duplicate unit or issue ids are rejected. Dangling mapping references
    /// are logged and kept.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let data: CurriculumData = serde_yaml::from_str(content)?;
        Self::from_data(data)
    }

    /// Load a data set from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading curriculum data from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from `path` when given, otherwise use the built-in data set
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn from_data(data: CurriculumData) -> Result<Self> {
        let store = Self::new(data.units, data.issues, data.mappings);
        let report = store.check_integrity();

        if !report.duplicate_unit_ids.is_empty() || !report.duplicate_issue_ids.is_empty() {
            let mut ids = report.duplicate_unit_ids.clone();
            ids.extend(report.duplicate_issue_ids.iter().cloned());
            return Err(Error::Validation(format!(
                "Duplicate curriculum ids: {}",
                ids.join(", ")
            )));
        }

        for finding in report.findings() {
            warn!("Curriculum data integrity: {}", finding);
        }

        debug!(
            "Curriculum store ready: {} units, {} issues, {} mappings",
            store.units.len(),
            store.issues.len(),
            store.mappings.len()
        );
        Ok(store)
    }

    pub fn units(&self) -> &[ScienceUnit] {
        &self.units
    }

    pub fn issues(&self) -> &[EnvIssue] {
        &self.issues
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn unit(&self, id: &str) -> Option<&ScienceUnit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn issue(&self, id: &str) -> Option<&EnvIssue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Scan the tables for dangling references and duplicate ids
    pub fn check_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        let mut seen = HashSet::new();
        for unit in &self.units {
            if !seen.insert(unit.id.as_str()) && !report.duplicate_unit_ids.contains(&unit.id) {
                report.duplicate_unit_ids.push(unit.id.clone());
            }
        }

        let mut seen = HashSet::new();
        for issue in &self.issues {
            if !seen.insert(issue.id.as_str()) && !report.duplicate_issue_ids.contains(&issue.id)
            {
                report.duplicate_issue_ids.push(issue.id.clone());
            }
        }

        for (index, mapping) in self.mappings.iter().enumerate() {
            if self.unit(&mapping.science_unit_id).is_none() {
                report
                    .dangling_units
                    .push((index, mapping.science_unit_id.clone()));
            }
            if self.issue(&mapping.env_issue_id).is_none() {
                report
                    .dangling_issues
                    .push((index, mapping.env_issue_id.clone()));
            }
        }

        report
    }
}
