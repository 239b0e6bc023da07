//! Testing utilities and fixtures
//!
//! Mock backends and small curriculum data sets for exercising the
//! lookup, prompt and generation paths without network access.

pub mod mocks;

pub use mocks::{MockTextGenerator, MockTextGeneratorBuilder};

use crate::curriculum::{CurriculumStore, EnvIssue, GradeLevel, Mapping, ScienceUnit};
use crate::generation::GenerationClient;
use std::sync::Arc;

pub fn sample_unit(id: &str) -> ScienceUnit {
    ScienceUnit {
        id: id.to_string(),
        grade: GradeLevel::JuniorHigh,
        subject: "理化 (Physics & Chemistry)".to_string(),
        topic: format!("單元 {id}"),
        code: format!("Ba-IV-{id}"),
        description: format!("單元 {id} 的內容說明"),
    }
}

pub fn sample_issue(id: &str) -> EnvIssue {
    EnvIssue {
        id: id.to_string(),
        theme: "海洋教育 (Marine Edu)".to_string(),
        sub_theme: format!("子題 {id}"),
        code: format!("海 J{id}"),
        content: format!("議題 {id} 的實質內涵"),
    }
}

pub fn sample_mapping(unit_id: &str, issue_id: &str) -> Mapping {
    Mapping {
        science_unit_id: unit_id.to_string(),
        env_issue_id: issue_id.to_string(),
        relevance: format!("{unit_id} 與 {issue_id} 的關聯"),
        example_activity: format!("{unit_id} x {issue_id} 活動"),
    }
}

/// Store with units `U1` (two mappings plus one dangling), `U2` (one mapping)
/// and `U3` (no mappings), and issues `I1`..`I3`
pub fn sample_store() -> CurriculumStore {
    CurriculumStore::new(
        vec![sample_unit("U1"), sample_unit("U2"), sample_unit("U3")],
        vec![sample_issue("I1"), sample_issue("I2"), sample_issue("I3")],
        vec![
            sample_mapping("U1", "I2"),
            sample_mapping("U1", "I404"),
            sample_mapping("U2", "I3"),
            sample_mapping("U1", "I1"),
        ],
    )
}

/// Generation client over a mock backend, returning the mock for inspection
pub fn mock_client(mock: MockTextGenerator) -> (GenerationClient, Arc<MockTextGenerator>) {
    let mock = Arc::new(mock);
    let client = GenerationClient::new(mock.clone(), "mock-model");
    (client, mock)
}
