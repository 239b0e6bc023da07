//! Prompt preview and generation commands

use crate::cli::args::GenerationArgs;
use crate::config::BackendConfig;
use crate::curriculum::CurriculumStore;
use crate::generation::GenerationClient;
use crate::prompt::{build_prompt, GenerationRequest, TaskType};
use crate::session::GeneratorSession;
use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

/// Shown when a session finishes without anything to display
pub const NO_CONTENT_MESSAGE: &str = "尚無內容";

/// Resolve the ids in `args` against the store
pub fn build_request(store: &CurriculumStore, args: &GenerationArgs) -> Result<GenerationRequest> {
    let unit = store
        .unit(&args.unit_id)
        .ok_or_else(|| anyhow!("Unknown science unit '{}'", args.unit_id))?;
    let issue = store
        .issue(&args.issue_id)
        .ok_or_else(|| anyhow!("Unknown environmental issue '{}'", args.issue_id))?;

    if let Some(note) = non_standard_task_note(&args.task) {
        warn!("{}", note);
    }

    let request = GenerationRequest::new(unit.clone(), issue.clone(), args.task.clone());
    Ok(match &args.extra {
        Some(extra) => request.with_custom_prompt(extra.clone()),
        None => request,
    })
}

/// Explains that a free-form task gets no outline section, or `None` for
/// the standard task types
pub fn non_standard_task_note(task: &TaskType) -> Option<String> {
    let standard = TaskType::standard();
    if standard.contains(task) {
        return None;
    }
    let keys: Vec<&str> = standard.iter().map(|t| t.key()).collect();
    Some(format!(
        "Task '{}' is not one of {}; no outline section will be requested",
        task.key(),
        keys.join(", ")
    ))
}

pub fn run_prompt_command(store: &CurriculumStore, args: &GenerationArgs) -> Result<()> {
    let request = build_request(store, args)?;
    print!("{}", build_prompt(&request));
    Ok(())
}

pub async fn run_generate_command(
    store: &CurriculumStore,
    backend: &BackendConfig,
    args: &GenerationArgs,
) -> Result<()> {
    let request = build_request(store, args)?;
    let client =
        GenerationClient::from_config(backend).context("Failed to set up generation backend")?;
    let output = generate(request, &client).await;
    println!("{output}");
    Ok(())
}

/// Drive a session through one generation and return what it displays
pub async fn generate(request: GenerationRequest, client: &GenerationClient) -> String {
    info!(
        "Generating {} for {} x {}",
        request.task_type.key(),
        request.unit.id,
        request.issue.id
    );

    let mut session = GeneratorSession::new();
    session.set_task_type(request.task_type);
    if let Some(extra) = request.custom_prompt {
        session.set_custom_prompt(extra);
    }
    session.select_pair(request.unit, request.issue);

    let shown = session.run(client).await.map(str::to_string);
    match shown {
        Some(text) => text,
        None => {
            warn!("Session finished in state {} without a result", session.state());
            NO_CONTENT_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::TEACHER_REQUIREMENTS_HEADER;
    use crate::testing::{mock_client, sample_store, MockTextGenerator};

    fn args(unit: &str, issue: &str) -> GenerationArgs {
        GenerationArgs {
            unit_id: unit.to_string(),
            issue_id: issue.to_string(),
            task: TaskType::LessonPlan,
            extra: None,
        }
    }

    #[test]
    fn test_build_request_resolves_ids() {
        let store = sample_store();
        let mut args = args("U2", "I3");
        args.extra = Some("戶外觀察".to_string());
        let request = build_request(&store, &args).unwrap();
        assert_eq!(request.unit.id, "U2");
        assert_eq!(request.issue.id, "I3");
        assert_eq!(request.custom_requirements(), Some("戶外觀察"));
    }

    #[test]
    fn test_build_request_rejects_unknown_ids() {
        let store = sample_store();
        let err = build_request(&store, &args("U9", "I1")).unwrap_err();
        assert!(err.to_string().contains("Unknown science unit 'U9'"));
        let err = build_request(&store, &args("U1", "I404")).unwrap_err();
        assert!(err.to_string().contains("Unknown environmental issue 'I404'"));
    }

    #[test]
    fn test_non_standard_task_note() {
        for task in TaskType::standard() {
            assert_eq!(non_standard_task_note(&task), None);
        }
        let note = non_standard_task_note(&TaskType::Other("學習單".to_string())).unwrap();
        assert!(note.contains("'學習單'"));
        assert!(note.contains("lesson-plan, material, assessment, ppt-outline"));
    }

    #[tokio::test]
    async fn test_generate_returns_backend_text_and_sends_prompt() {
        let store = sample_store();
        let mut args = args("U1", "I2");
        args.extra = Some("兩節課".to_string());
        let request = build_request(&store, &args).unwrap();
        let expected_prompt = build_prompt(&request);

        let (client, mock) = mock_client(MockTextGenerator::builder().with_text("# 教案").build());
        assert_eq!(generate(request, &client).await, "# 教案");

        let prompt = mock.last_prompt().unwrap();
        assert_eq!(prompt, expected_prompt);
        assert!(prompt.contains(&format!("{TEACHER_REQUIREMENTS_HEADER}: 兩節課")));
    }
}
