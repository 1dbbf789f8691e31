//! Confirmation/Loading Workflow
//!
//! Sensitive actions (new game, load, save) go through a three-step sequence:
//!
//! ```text
//! Idle -> AwaitingConfirmation(request) -> Running(task) -> Idle
//! ```
//!
//! At most one instance is outstanding at a time. The state is a tagged
//! enum, so "confirming while loading" simply cannot be expressed.
//!
//! The workflow only sequences; applying the pending action to the save
//! store and narrative progress is the controller's job.

pub mod confirmation;
pub mod loading;

pub use confirmation::{ConfirmationKind, ConfirmationRequest};
pub use loading::{LoadingDurations, LoadingKind, LoadingTask, PendingAction};

use crate::error::FlowError;
use crate::save::SlotId;
use std::time::Instant;

/// Where the workflow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    AwaitingConfirmation(ConfirmationRequest),
    Running(LoadingTask),
}

pub struct ConfirmationWorkflow {
    state: WorkflowState,
    durations: LoadingDurations,
}

impl ConfirmationWorkflow {
    pub fn new(durations: LoadingDurations) -> Self {
        ConfirmationWorkflow {
            state: WorkflowState::Idle,
            durations,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == WorkflowState::Idle
    }

    pub fn durations(&self) -> &LoadingDurations {
        &self.durations
    }

    pub fn pending_confirmation(&self) -> Option<&ConfirmationRequest> {
        match &self.state {
            WorkflowState::AwaitingConfirmation(request) => Some(request),
            _ => None,
        }
    }

    pub fn loading_task(&self) -> Option<&LoadingTask> {
        match &self.state {
            WorkflowState::Running(task) => Some(task),
            _ => None,
        }
    }

    /// Opens a confirmation dialog
    ///
    /// Fails with `WorkflowBusy` if a confirmation or loading task is
    /// already outstanding; the outstanding one is left untouched.
    pub fn request_confirmation(
        &mut self,
        kind: ConfirmationKind,
        target_slot: Option<SlotId>,
    ) -> Result<ConfirmationRequest, FlowError> {
        if !self.is_idle() {
            return Err(FlowError::WorkflowBusy);
        }

        let request = ConfirmationRequest::new(kind, target_slot);
        self.state = WorkflowState::AwaitingConfirmation(request);
        tracing::info!("Confirmation requested: {:?} (slot {:?})", kind, request.target_slot);
        Ok(request)
    }

    /// Takes the outstanding confirmation, returning the workflow to Idle
    pub fn take_confirmation(&mut self) -> Result<ConfirmationRequest, FlowError> {
        match self.state {
            WorkflowState::AwaitingConfirmation(request) => {
                self.state = WorkflowState::Idle;
                Ok(request)
            }
            _ => Err(FlowError::NoPendingConfirmation),
        }
    }

    /// Starts the loading period for an answered confirmation
    pub fn start(&mut self, action: PendingAction, now: Instant) -> Result<&LoadingTask, FlowError> {
        if !self.is_idle() {
            return Err(FlowError::WorkflowBusy);
        }

        let duration = self.durations.for_kind(action.kind());
        tracing::info!("Loading started: {:?} ({} ms)", action.kind(), duration.as_millis());
        self.state = WorkflowState::Running(LoadingTask::new(action, now, duration));

        match &self.state {
            WorkflowState::Running(task) => Ok(task),
            _ => Err(FlowError::WorkflowBusy),
        }
    }

    /// Hands back the running task once its duration has elapsed
    ///
    /// The workflow is Idle again when this returns `Some`.
    pub fn poll(&mut self, now: Instant) -> Option<LoadingTask> {
        let finished = matches!(&self.state, WorkflowState::Running(task) if task.is_finished(now));
        if !finished {
            return None;
        }

        match std::mem::replace(&mut self.state, WorkflowState::Idle) {
            WorkflowState::Running(task) => Some(task),
            _ => None,
        }
    }

    /// Hard reset: drops whatever is outstanding without applying it
    pub fn abandon(&mut self) -> WorkflowState {
        let previous = std::mem::replace(&mut self.state, WorkflowState::Idle);
        match &previous {
            WorkflowState::Idle => {}
            WorkflowState::AwaitingConfirmation(request) => {
                tracing::warn!("Abandoned confirmation {:?}", request.kind);
            }
            WorkflowState::Running(task) => {
                tracing::warn!("Abandoned {:?} task, nothing committed", task.kind());
            }
        }
        previous
    }
}

impl Default for ConfirmationWorkflow {
    fn default() -> Self {
        Self::new(LoadingDurations::default())
    }
}
