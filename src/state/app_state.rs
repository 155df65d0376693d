use crate::core::controller::{FormController, SubmitError};
use crate::core::notification::Notification;
use crate::data::Item;
use crate::state::toast::ToastQueue;

/// Everything the renderer reads: the form controller plus view-only state
/// (item cursor, inline validation message, visible toast).
pub struct AppState {
    form: FormController,
    cursor: usize,
    validation_error: Option<String>,
    toasts: ToastQueue,
    should_exit: bool,
}

impl AppState {
    pub fn new(form: FormController) -> Self {
        Self {
            form,
            cursor: 0,
            validation_error: None,
            toasts: ToastQueue::new(),
            should_exit: false,
        }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn into_form(self) -> FormController {
        self.form
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn current_items(&self) -> &[Item] {
        self.form
            .current_step()
            .map(|step| step.items.as_slice())
            .unwrap_or(&[])
    }

    /// Moves the item cursor by `delta`, wrapping at both ends.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let len = self.current_items().len();
        if len == 0 {
            return false;
        }
        let next = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        let len = self.current_items().len();
        if len == 0 {
            return false;
        }
        let next = index.min(len - 1);
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    pub fn toggle_focused(&mut self) -> bool {
        self.toggle_at(self.cursor)
    }

    /// Toggles the item at `index` on the current step and moves the cursor
    /// there.
    pub fn toggle_at(&mut self, index: usize) -> bool {
        let Some(id) = self
            .form
            .current_step()
            .and_then(|step| step.item(index))
            .map(|item| item.id.clone())
        else {
            return false;
        };
        self.cursor = index;
        self.form.toggle_item(id);

        // Once a submit has failed, the message follows the selection live.
        if self.validation_error.is_some() && self.form.validate().is_ok() {
            self.validation_error = None;
        }
        true
    }

    pub fn submit(&mut self) -> Result<Notification, SubmitError> {
        match self.form.submit() {
            Ok(notification) => {
                self.validation_error = None;
                self.cursor = 0;
                if self.form.is_complete() {
                    self.should_exit = true;
                }
                Ok(notification)
            }
            Err(err) => {
                if let SubmitError::Validation(message) = &err {
                    self.validation_error = Some(message.clone());
                }
                Err(err)
            }
        }
    }
}
