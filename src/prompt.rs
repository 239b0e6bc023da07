//! Prompt construction for teaching-material generation
//!
//! A prompt is assembled from fixed sections in a fixed order:
//!
//! 1. role framing and the kind of material requested
//! 2. the teaching background (unit and issue fields, verbatim)
//! 3. the teacher's extra requirements, only when non-blank
//! 4. output-format and quality instructions
//! 5. a task-specific outline for lesson plans, assessments and slide decks
//!
//! Building is pure: the same request always yields the same bytes.

use crate::curriculum::{EnvIssue, ScienceUnit};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const ROLE_HEADER: &str = "你是一位專業的自然科學教師與環境教育專家。";
pub const BACKGROUND_HEADER: &str = "【教學背景】";
pub const TEACHER_REQUIREMENTS_HEADER: &str = "【老師的額外要求】";
pub const LESSON_PLAN_HEADER: &str = "教案格式建議包含：";
pub const ASSESSMENT_HEADER: &str = "請提供多元評量方式，例如：";
pub const PPT_OUTLINE_HEADER: &str = "請以投影片大綱形式呈現，每一頁包含：";

/// Kind of teaching material to generate
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TaskType {
    #[default]
    LessonPlan,
    TeachingMaterial,
    Assessment,
    PptOutline,
    /// Any other requested material, named by its label
    Other(String),
}

impl TaskType {
    /// The four task types offered to teachers
    pub fn standard() -> [TaskType; 4] {
        [
            TaskType::LessonPlan,
            TaskType::TeachingMaterial,
            TaskType::Assessment,
            TaskType::PptOutline,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            TaskType::LessonPlan => "教案 (Lesson Plan)",
            TaskType::TeachingMaterial => "教材 (Material)",
            TaskType::Assessment => "評量 (Assessment)",
            TaskType::PptOutline => "投影片大綱 (PPT Outline)",
            TaskType::Other(label) => label,
        }
    }

    /// Short key accepted on the command line
    pub fn key(&self) -> &str {
        match self {
            TaskType::LessonPlan => "lesson-plan",
            TaskType::TeachingMaterial => "material",
            TaskType::Assessment => "assessment",
            TaskType::PptOutline => "ppt-outline",
            TaskType::Other(label) => label,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskType {
    type Err = Infallible;

    /// Accepts keys and labels case-insensitively; anything else becomes `Other`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let task = match trimmed.to_lowercase().as_str() {
            "lesson-plan" | "lesson_plan" | "lessonplan" | "教案" | "教案 (lesson plan)" => {
                TaskType::LessonPlan
            }
            "material" | "teaching-material" | "teaching_material" | "教材"
            | "教材 (material)" => TaskType::TeachingMaterial,
            "assessment" | "評量" | "評量 (assessment)" => TaskType::Assessment,
            "ppt-outline" | "ppt_outline" | "ppt" | "投影片大綱" | "投影片大綱 (ppt outline)" => {
                TaskType::PptOutline
            }
            _ => TaskType::Other(trimmed.to_string()),
        };
        Ok(task)
    }
}

/// Everything needed to build one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub unit: ScienceUnit,
    pub issue: EnvIssue,
    pub task_type: TaskType,
    pub custom_prompt: Option<String>,
}

impl GenerationRequest {
    pub fn new(unit: ScienceUnit, issue: EnvIssue, task_type: TaskType) -> Self {
        Self {
            unit,
            issue,
            task_type,
            custom_prompt: None,
        }
    }

    pub fn with_custom_prompt(mut self, custom_prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(custom_prompt.into());
        self
    }

    /// The teacher's extra text, or `None` when absent or blank
    pub fn custom_requirements(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Build the full prompt for a request
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut sections = vec![
        role_section(&request.task_type),
        background_section(&request.unit, &request.issue),
    ];

    if let Some(text) = request.custom_requirements() {
        sections.push(format!("{TEACHER_REQUIREMENTS_HEADER}: {text}"));
    }

    sections.push(output_instructions(&request.issue));

    if let Some(suffix) = task_suffix(&request.task_type, &request.issue) {
        sections.push(suffix);
    }

    let mut prompt = sections.join("\n\n");
    prompt.push('\n');
    prompt
}

fn role_section(task_type: &TaskType) -> String {
    format!(
        "{ROLE_HEADER}\n請根據以下資訊，生成一份{}。",
        task_type.label()
    )
}

fn background_section(unit: &ScienceUnit, issue: &EnvIssue) -> String {
    [
        BACKGROUND_HEADER.to_string(),
        format!("- 教育階段: {}", unit.grade.label()),
        format!(
            "- 自然科單元: {} - {} (課綱代碼: {})",
            unit.subject, unit.topic, unit.code
        ),
        format!("- 自然科內容說明: {}", unit.description),
        format!(
            "- 融入議題: {} - {} (議題代碼: {})",
            issue.theme, issue.sub_theme, issue.code
        ),
        format!("- 議題實質內涵: {}", issue.content),
    ]
    .join("\n")
}

fn output_instructions(issue: &EnvIssue) -> String {
    format!(
        "請以繁體中文 (Traditional Chinese) 輸出，並使用 Markdown 格式編排，使其易於閱讀。\n\
         \n\
         重點要求：\n\
         1. 內容應具體、可行，並強調科學知識與{}的結合。\n\
         2. 如果涉及 SDGs (永續發展目標)，請明確指出對應的具體目標 (Target) 與如何在課程中實踐。\n\
         3. 若為防災或海洋教育，請強調台灣在地的實例與應用。",
        issue.theme
    )
}

/// Task-specific outline requirements. Teaching material and unrecognized
/// task types have none.
pub fn task_suffix(task_type: &TaskType, issue: &EnvIssue) -> Option<String> {
    match task_type {
        TaskType::LessonPlan => Some(format!(
            "{LESSON_PLAN_HEADER}\n\
             1. 單元名稱與教學時間\n\
             2. 學習目標 (結合科學與{})\n\
             3. 核心素養對應\n\
             4. SDGs 關聯性 (若有)\n\
             5. 教學活動流程 (引起動機、發展活動、綜合活動)\n\
             6. 教學資源",
            issue.theme
        )),
        TaskType::Assessment => Some(format!(
            "{ASSESSMENT_HEADER}\n\
             1. 核心概念選擇題 (附詳解)\n\
             2. 情境素養題 (簡答或申論)，請結合真實情境（如台灣的防災案例或海洋生態）。\n\
             3. 實作評量標準 (Rubrics)"
        )),
        TaskType::PptOutline => Some(format!(
            "{PPT_OUTLINE_HEADER}\n\
             - 標題\n\
             - 主要內容點列 (Visualizable points)\n\
             - 講者備忘稿 (Speaker Notes) 建議"
        )),
        TaskType::TeachingMaterial | TaskType::Other(_) => None,
    }
}
