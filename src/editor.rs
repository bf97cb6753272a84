//! Plan-editor flow: which plan the form is working on, and what happens
//! to the form when a save fails.

use crate::error::{AppError, Result};
use crate::models::PlanDraft;
use crate::repositories::PlanRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    /// Blank form for a brand new plan.
    Creating,
    /// Form pre-populated from an existing plan; saving replaces that
    /// plan in place.
    Editing { workout_id: i64 },
    /// A save is in flight.
    Saving { editing_id: Option<i64> },
}

#[derive(Debug, Default)]
pub struct PlanEditor {
    state: EditorState,
    form: PlanDraft,
}

impl PlanEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn form(&self) -> &PlanDraft {
        &self.form
    }

    /// The screen binds its inputs here while Creating or Editing.
    pub fn form_mut(&mut self) -> &mut PlanDraft {
        &mut self.form
    }

    pub fn begin_create(&mut self) {
        self.form = PlanDraft::default();
        self.state = EditorState::Creating;
    }

    pub fn begin_edit(&mut self, workout_id: i64, current: PlanDraft) {
        self.form = current;
        self.state = EditorState::Editing { workout_id };
    }

    pub fn cancel(&mut self) {
        self.form = PlanDraft::default();
        self.state = EditorState::Idle;
    }

    /// Save the form through the repository. Success clears the form and
    /// returns to Idle; failure returns to the form state with everything
    /// the user typed intact.
    pub async fn save(&mut self, repo: &PlanRepository) -> Result<i64> {
        let editing_id = match self.state {
            EditorState::Creating => None,
            EditorState::Editing { workout_id } => Some(workout_id),
            _ => return Err(AppError::Internal("no plan form open".to_string())),
        };

        self.state = EditorState::Saving { editing_id };
        match repo.save_plan(&self.form, editing_id).await {
            Ok(workout_id) => {
                self.form = PlanDraft::default();
                self.state = EditorState::Idle;
                Ok(workout_id)
            }
            Err(err) => {
                self.state = match editing_id {
                    Some(workout_id) => EditorState::Editing { workout_id },
                    None => EditorState::Creating,
                };
                Err(err)
            }
        }
    }
}
