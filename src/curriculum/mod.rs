//! Curriculum data model
//!
//! Science units from the national curriculum, environmental-education issues,
//! and the curated mappings that pair them. All records are immutable once a
//! [`CurriculumStore`] has been built.

pub mod lookup;
pub mod store;

pub use lookup::MappingMatch;
pub use store::{CurriculumData, CurriculumStore, IntegrityReport};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Education stage a science unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradeLevel {
    #[serde(alias = "國小")]
    Elementary,
    #[serde(alias = "國中")]
    JuniorHigh,
    #[serde(alias = "高中")]
    SeniorHigh,
}

impl GradeLevel {
    /// Label used in prompts and listings
    pub fn label(&self) -> &'static str {
        match self {
            GradeLevel::Elementary => "國小",
            GradeLevel::JuniorHigh => "國中",
            GradeLevel::SeniorHigh => "高中",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GradeLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elementary" | "國小" => Ok(GradeLevel::Elementary),
            "junior-high" | "junior_high" | "國中" => Ok(GradeLevel::JuniorHigh),
            "senior-high" | "senior_high" | "高中" => Ok(GradeLevel::SeniorHigh),
            other => Err(Error::Validation(format!(
                "Unknown grade level '{other}' (expected elementary, junior-high or senior-high)"
            ))),
        }
    }
}

/// A natural-science curriculum unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScienceUnit {
    pub id: String,
    pub grade: GradeLevel,
    pub subject: String,
    pub topic: String,
    /// Curriculum standard code, unique within a subject
    pub code: String,
    pub description: String,
}

impl ScienceUnit {
    pub fn category(&self) -> SubjectCategory {
        SubjectCategory::classify(&self.subject)
    }
}

/// An environmental-education issue (environment, disaster prevention, marine, SDGs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvIssue {
    pub id: String,
    pub theme: String,
    pub sub_theme: String,
    pub code: String,
    /// Substantive content of the issue
    pub content: String,
}

impl EnvIssue {
    pub fn category(&self) -> IssueCategory {
        IssueCategory::classify(&self.theme)
    }
}

/// Curated link between a science unit and an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub science_unit_id: String,
    pub env_issue_id: String,
    /// Why the unit and the issue belong together
    pub relevance: String,
    pub example_activity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectCategory {
    Physics,
    Chemistry,
    Biology,
    EarthScience,
    Other,
}

impl SubjectCategory {
    /// Classify a free-text subject by keyword
    pub fn classify(subject: &str) -> Self {
        let lower = subject.to_lowercase();
        if subject.contains("物理") || lower.contains("physics") {
            SubjectCategory::Physics
        } else if subject.contains("化學") || lower.contains("chemistry") {
            SubjectCategory::Chemistry
        } else if subject.contains("生物") || lower.contains("biology") {
            SubjectCategory::Biology
        } else if subject.contains("地球科學") || lower.contains("earth science") {
            SubjectCategory::EarthScience
        } else {
            SubjectCategory::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubjectCategory::Physics => "physics",
            SubjectCategory::Chemistry => "chemistry",
            SubjectCategory::Biology => "biology",
            SubjectCategory::EarthScience => "earth-science",
            SubjectCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    Climate,
    Energy,
    Disaster,
    Marine,
    Sdg,
    Sustainability,
    Other,
}

impl IssueCategory {
    /// Classify an issue theme by keyword. The first matching keyword wins.
    pub fn classify(theme: &str) -> Self {
        if theme.contains("氣候") {
            IssueCategory::Climate
        } else if theme.contains("能源") {
            IssueCategory::Energy
        } else if theme.contains("災害") || theme.contains("防災") {
            IssueCategory::Disaster
        } else if theme.contains("海洋") {
            IssueCategory::Marine
        } else if theme.contains("SDG") {
            IssueCategory::Sdg
        } else if theme.contains("永續") || theme.contains("倫理") {
            IssueCategory::Sustainability
        } else {
            IssueCategory::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Climate => "climate",
            IssueCategory::Energy => "energy",
            IssueCategory::Disaster => "disaster",
            IssueCategory::Marine => "marine",
            IssueCategory::Sdg => "sdg",
            IssueCategory::Sustainability => "sustainability",
            IssueCategory::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_level_parsing() {
        assert_eq!(
            "senior-high".parse::<GradeLevel>().unwrap(),
            GradeLevel::SeniorHigh
        );
        assert_eq!("國中".parse::<GradeLevel>().unwrap(), GradeLevel::JuniorHigh);
        assert_eq!(
            " Elementary ".parse::<GradeLevel>().unwrap(),
            GradeLevel::Elementary
        );
        assert!("college".parse::<GradeLevel>().is_err());
    }

    #[test]
    fn test_grade_level_yaml_accepts_labels() {
        let grade: GradeLevel = serde_yaml::from_str("高中").unwrap();
        assert_eq!(grade, GradeLevel::SeniorHigh);
        let grade: GradeLevel = serde_yaml::from_str("junior-high").unwrap();
        assert_eq!(grade, GradeLevel::JuniorHigh);
    }

    #[test]
    fn test_subject_classification() {
        assert_eq!(
            SubjectCategory::classify("物理 (Physics)"),
            SubjectCategory::Physics
        );
        assert_eq!(
            SubjectCategory::classify("化學 (Chemistry)"),
            SubjectCategory::Chemistry
        );
        assert_eq!(SubjectCategory::classify("Biology"), SubjectCategory::Biology);
        assert_eq!(
            SubjectCategory::classify("地球科學"),
            SubjectCategory::EarthScience
        );
        assert_eq!(SubjectCategory::classify("數學"), SubjectCategory::Other);
    }

    #[test]
    fn test_issue_classification_order() {
        assert_eq!(
            IssueCategory::classify("氣候變遷 (Climate Change)"),
            IssueCategory::Climate
        );
        assert_eq!(
            IssueCategory::classify("能源資源永續利用"),
            IssueCategory::Energy
        );
        assert_eq!(
            IssueCategory::classify("災害防救 (Disaster Prevention)"),
            IssueCategory::Disaster
        );
        assert_eq!(
            IssueCategory::classify("海洋教育 (Marine Edu)"),
            IssueCategory::Marine
        );
        // "SDGs 永續發展目標" mentions 永續 too, SDG is checked first
        assert_eq!(IssueCategory::classify("SDGs 永續發展目標"), IssueCategory::Sdg);
        assert_eq!(IssueCategory::classify("環境倫理"), IssueCategory::Sustainability);
        assert_eq!(IssueCategory::classify("交通安全"), IssueCategory::Other);
    }
}
