//! Documentation generation job: request, status record and display steps

use crate::entities::file_node::clean_project_name;
use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Server-side job state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    InProgress,
    Completed,
    Failed,
}

/// `GET /generate/status/{key}` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub status: GenerationState,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub current_step: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_time: Option<String>,
}

impl GenerationStatus {
    /// Status shown before the first response arrives
    pub fn initializing() -> Self {
        Self {
            status: GenerationState::InProgress,
            progress: 0.0,
            current_step: "Initializing...".to_string(),
            error: None,
            project_name: None,
            start_time: None,
            completion_time: None,
            failure_time: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.status, GenerationState::InProgress)
    }

    /// The three user-facing steps derived from `progress`
    pub fn steps(&self) -> [GenerationStep; 3] {
        let p = self.progress;
        let state = |done: bool, started: bool| {
            if done {
                StepState::Completed
            } else if started {
                StepState::InProgress
            } else {
                StepState::Pending
            }
        };
        [
            GenerationStep {
                number: 1,
                description: "Fetching files from the codebase",
                state: state(p >= 20.0, p > 0.0),
            },
            GenerationStep {
                number: 2,
                description: "Analyzing the code",
                state: state(p >= 40.0, p >= 20.0),
            },
            GenerationStep {
                number: 3,
                description: "Generating the document",
                state: state(p >= 100.0, p >= 40.0),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStep {
    pub number: u8,
    pub description: &'static str,
    pub state: StepState,
}

/// `POST /generate` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Option<String>,
    pub root_path: String,
    pub project_name: String,
    pub selected_items: Vec<String>,
    pub file_model: String,
    pub folder_model: String,
    pub project_model: String,
}

/// Models chosen for each documentation level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelChoice {
    pub file_model: String,
    pub folder_model: String,
    pub project_model: String,
}

impl GenerateRequest {
    /// Assemble the request from the setup state.
    pub fn new(
        user_id: Option<String>,
        project_name: &str,
        selected_items: Vec<String>,
        models: ModelChoice,
    ) -> DomainResult<Self> {
        if selected_items.is_empty() {
            return Err(DomainError::EmptySelection);
        }
        let project = clean_project_name(project_name).to_string();
        let root_path = derive_root_path(&project, &selected_items[0]);
        Ok(Self {
            user_id,
            root_path,
            project_name: project,
            selected_items,
            file_model: models.file_model,
            folder_model: models.folder_model,
            project_model: models.project_model,
        })
    }
}

/// `POST /generate` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub progress_key: String,
}

/// Server-relative root of the uploaded project.
///
/// The first selected path is split on either separator; the segments from
/// index 1 up to and including the one after the project segment are joined
/// with `\` and prefixed with `./`. Without a project segment the result is `./`.
pub fn derive_root_path(project_name: &str, first_selected: &str) -> String {
    let parts: Vec<&str> = first_selected.split(['/', '\\']).collect();
    let end = parts
        .iter()
        .position(|part| *part == project_name)
        .map(|idx| (idx + 2).min(parts.len()))
        .unwrap_or(1);
    let tail = if end > 1 { &parts[1..end] } else { &[][..] };
    format!("./{}", tail.join("\\"))
}
