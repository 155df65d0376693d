use crate::config::{Labels, SelectionScope, SubmitLabelRule, SurveyConfig};
use crate::core::ItemId;
use crate::core::flow::{Flow, StepStatus};
use crate::core::notification::{Notification, SubmittedValues};
use crate::core::selection::Selection;
use crate::core::validation::{Validator, at_least_one, run_validators};
use crate::data::{StepCollection, StepDefinition};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),
    #[error("every step has already been submitted")]
    Completed,
}

/// Step index plus checked ids for a single form session.
///
/// The index runs over `0..size()` while the form is active and rests at
/// `size()` once every step has been submitted. It never moves backwards.
pub struct FormController {
    steps: Arc<StepCollection>,
    flow: Flow,
    scope: SelectionScope,
    label_rule: SubmitLabelRule,
    labels: Labels,
    validators: Vec<Validator>,
    selections: Vec<Selection>,
    history: Vec<Notification>,
}

impl FormController {
    pub fn new(steps: Arc<StepCollection>, config: &SurveyConfig) -> Self {
        let slots = match config.selection_scope {
            SelectionScope::Carried => 1,
            SelectionScope::PerStep => steps.size().max(1),
        };
        let mut selections = vec![Selection::new(); slots];
        selections[0] = config.initial_selection.iter().map(String::as_str).collect();

        Self {
            flow: Flow::new(steps.size()),
            steps,
            scope: config.selection_scope,
            label_rule: config.label_rule,
            validators: vec![at_least_one(config.labels.validation.clone())],
            labels: config.labels.clone(),
            selections,
            history: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn steps(&self) -> &StepCollection {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.flow.current_index()
    }

    pub fn total(&self) -> usize {
        self.flow.len()
    }

    pub fn is_complete(&self) -> bool {
        self.flow.is_finished()
    }

    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.steps.get(self.flow.current_index())
    }

    pub fn current_key(&self) -> Option<&str> {
        self.steps.key(self.flow.current_index())
    }

    pub fn step_status(&self, index: usize) -> StepStatus {
        self.flow.status_at(index)
    }

    pub fn selection(&self) -> &Selection {
        &self.selections[self.slot()]
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection().contains(id)
    }

    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Flips `id` in the active selection. Returns whether it is now checked.
    pub fn toggle_item(&mut self, id: impl Into<ItemId>) -> bool {
        if self.is_complete() {
            return false;
        }
        let slot = self.slot();
        self.selections[slot].toggle(id)
    }

    /// Re-runs the selection validators without submitting.
    pub fn validate(&self) -> Result<(), SubmitError> {
        run_validators(&self.validators, self.selection()).map_err(SubmitError::Validation)
    }

    pub fn submit(&mut self) -> Result<Notification, SubmitError> {
        if self.is_complete() {
            return Err(SubmitError::Completed);
        }

        let step = self.flow.current_index();
        let key = self.current_key().unwrap_or_default().to_string();
        if let Err(err) = self.validate() {
            tracing::debug!(step, %key, error = %err, "submit rejected");
            return Err(err);
        }

        let values = SubmittedValues {
            items: self.selection().to_vec(),
        };
        let notification =
            Notification::submitted(step, self.labels.notification_title.clone(), values);

        self.flow.advance();
        tracing::info!(step, %key, items = ?notification.values.items, "step submitted");
        self.history.push(notification.clone());
        Ok(notification)
    }

    /// "Passo {current} de {total}", with `current` clamped once complete.
    pub fn progress_label(&self) -> String {
        let total = self.total();
        let current = (self.current_index() + 1).min(total);
        self.labels.progress(current, total)
    }

    pub fn is_final_step(&self) -> bool {
        match self.label_rule {
            SubmitLabelRule::LastStep => self.flow.is_last(),
            SubmitLabelRule::Legacy => self.current_index().checked_sub(1) == Some(self.total()),
        }
    }

    pub fn submit_label(&self) -> &str {
        if self.is_final_step() {
            &self.labels.submit
        } else {
            &self.labels.next
        }
    }

    fn slot(&self) -> usize {
        match self.scope {
            SelectionScope::Carried => 0,
            SelectionScope::PerStep => self.flow.current_index().min(self.selections.len() - 1),
        }
    }
}
