//! Generator session
//!
//! Tracks the current unit/issue selection, the chosen task type and extra
//! requirements, and the single generation that may be in flight. Results are
//! tied to the selection they were requested for: changing the unit or issue
//! drops the displayed result and invalidates any outstanding request.

use crate::curriculum::{EnvIssue, ScienceUnit};
use crate::generation::GenerationClient;
use crate::prompt::{build_prompt, GenerationRequest, TaskType};
use std::fmt;
use tracing::debug;

/// Observable state of a [`GeneratorSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Unit or issue not selected
    Idle,
    /// Both selected, nothing generated yet
    Ready,
    /// A request is in flight
    Generating,
    /// A result is available
    Displaying,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Ready => "ready",
            SessionState::Generating => "generating",
            SessionState::Displaying => "displaying",
        };
        f.write_str(name)
    }
}

/// Handle for one dispatched generation
///
/// Only the ticket of the latest dispatch can complete the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    epoch: u64,
    request: GenerationRequest,
}

impl GenerationTicket {
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn prompt(&self) -> String {
        build_prompt(&self.request)
    }
}

#[derive(Debug, Default)]
pub struct GeneratorSession {
    unit: Option<ScienceUnit>,
    issue: Option<EnvIssue>,
    task_type: TaskType,
    custom_prompt: String,
    in_flight: Option<u64>,
    result: Option<String>,
    epoch: u64,
}

impl GeneratorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.is_some() {
            SessionState::Generating
        } else if self.result.is_some() {
            SessionState::Displaying
        } else if self.unit.is_some() && self.issue.is_some() {
            SessionState::Ready
        } else {
            SessionState::Idle
        }
    }

    pub fn unit(&self) -> Option<&ScienceUnit> {
        self.unit.as_ref()
    }

    pub fn issue(&self) -> Option<&EnvIssue> {
        self.issue.as_ref()
    }

    pub fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    pub fn custom_prompt(&self) -> &str {
        &self.custom_prompt
    }

    /// The displayed result, if any
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn can_generate(&self) -> bool {
        matches!(self.state(), SessionState::Ready | SessionState::Displaying)
    }

    /// Select or clear the science unit. A different unit drops the result.
    pub fn select_unit(&mut self, unit: Option<ScienceUnit>) {
        let changed = self.unit.as_ref().map(|u| &u.id) != unit.as_ref().map(|u| &u.id);
        self.unit = unit;
        if changed {
            self.selection_changed("unit");
        }
    }

    /// Select or clear the environmental issue. A different issue drops the result.
    pub fn select_issue(&mut self, issue: Option<EnvIssue>) {
        let changed = self.issue.as_ref().map(|i| &i.id) != issue.as_ref().map(|i| &i.id);
        self.issue = issue;
        if changed {
            self.selection_changed("issue");
        }
    }

    /// Select a unit and an issue in one step
    pub fn select_pair(&mut self, unit: ScienceUnit, issue: EnvIssue) {
        self.select_unit(Some(unit));
        self.select_issue(Some(issue));
    }

    pub fn set_task_type(&mut self, task_type: TaskType) {
        self.task_type = task_type;
    }

    pub fn set_custom_prompt(&mut self, custom_prompt: impl Into<String>) {
        self.custom_prompt = custom_prompt.into();
    }

    /// Dispatch a generation for the current selection.
    ///
    /// Returns `None` without changing anything when the selection is
    /// incomplete or a request is already in flight. Otherwise the previous
    /// result is dropped right away.
    pub fn begin(&mut self) -> Option<GenerationTicket> {
        if self.in_flight.is_some() {
            debug!("Generation already in flight, ignoring request");
            return None;
        }
        let (unit, issue) = match (&self.unit, &self.issue) {
            (Some(unit), Some(issue)) => (unit.clone(), issue.clone()),
            _ => {
                debug!("Selection incomplete, nothing to generate");
                return None;
            }
        };

        let previous = self.state();
        self.epoch += 1;
        self.in_flight = Some(self.epoch);
        self.result = None;
        debug!(
            "Session {} -> {} ({} x {}, {})",
            previous,
            self.state(),
            unit.id,
            issue.id,
            self.task_type.key()
        );

        let request = GenerationRequest::new(unit, issue, self.task_type.clone())
            .with_custom_prompt(self.custom_prompt.clone());
        Some(GenerationTicket {
            epoch: self.epoch,
            request,
        })
    }

    /// Deliver the result for `ticket`. Returns `false` when the ticket is
    /// stale and the text was discarded.
    pub fn complete(&mut self, ticket: GenerationTicket, text: String) -> bool {
        if self.in_flight != Some(ticket.epoch) {
            debug!("Discarding result of superseded request #{}", ticket.epoch);
            return false;
        }
        self.in_flight = None;
        self.result = Some(text);
        debug!("Session {} -> {}", SessionState::Generating, self.state());
        true
    }

    /// Dispatch, generate and complete in one go
    pub async fn run(&mut self, client: &GenerationClient) -> Option<&str> {
        let ticket = self.begin()?;
        let text = client.generate(&ticket.prompt()).await;
        self.complete(ticket, text);
        self.result()
    }

    fn selection_changed(&mut self, what: &str) {
        let previous = self.state();
        if self.in_flight.take().is_some() {
            debug!("{} changed, invalidating request #{}", what, self.epoch);
        }
        self.result = None;
        let current = self.state();
        if previous != current {
            debug!("Session {} -> {} ({} changed)", previous, current, what);
        }
    }
}
