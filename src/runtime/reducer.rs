use crate::core::controller::SubmitError;
use crate::runtime::effect::Effect;
use crate::runtime::event::AppEvent;
use crate::runtime::intent::Intent;
use crate::runtime::scheduler::SchedulerCommand;
use crate::state::app_state::AppState;
use std::time::Duration;

pub const TOAST_KEY: &str = "toast";

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut AppState, intent: Intent, toast_timeout: Duration) -> Vec<Effect> {
        match intent {
            Intent::Exit => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            Intent::Submit => Self::handle_submit(state, toast_timeout),
            Intent::CursorUp => render_if(state.move_cursor(-1)),
            Intent::CursorDown => render_if(state.move_cursor(1)),
            Intent::CursorFirst => render_if(state.set_cursor(0)),
            Intent::CursorLast => render_if(state.set_cursor(usize::MAX)),
            Intent::ToggleFocused => render_if(state.toggle_focused()),
            Intent::ToggleIndex(index) => render_if(state.toggle_at(index)),
            Intent::DismissToast => render_if(state.toasts_mut().dismiss()),
            Intent::Tick | Intent::Noop => vec![],
        }
    }

    fn handle_submit(state: &mut AppState, toast_timeout: Duration) -> Vec<Effect> {
        match state.submit() {
            Ok(notification) => vec![
                Effect::Notify(notification),
                Effect::Schedule(SchedulerCommand::Debounce {
                    key: TOAST_KEY.to_string(),
                    delay: toast_timeout,
                    event: AppEvent::Intent(Intent::DismissToast),
                }),
                Effect::RequestRender,
            ],
            Err(SubmitError::Validation(message)) => {
                tracing::debug!(step = state.form().current_index(), %message, "validation failed");
                vec![Effect::RequestRender]
            }
            Err(SubmitError::Completed) => {
                state.request_exit();
                vec![]
            }
        }
    }
}

fn render_if(changed: bool) -> Vec<Effect> {
    if changed {
        vec![Effect::RequestRender]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurveyConfig;
    use crate::core::controller::FormController;
    use crate::data::StepCollection;

    const TIMEOUT: Duration = Duration::from_millis(500);

    fn state() -> AppState {
        let steps = StepCollection::bundled().expect("bundled");
        AppState::new(FormController::new(steps, &SurveyConfig::default()))
    }

    #[test]
    fn successful_submit_notifies_and_schedules_dismissal() {
        let mut state = state();
        let effects = Reducer::reduce(&mut state, Intent::Submit, TIMEOUT);

        assert_eq!(effects.len(), 3);
        match &effects[0] {
            Effect::Notify(notification) => {
                assert_eq!(notification.values.items, vec!["1"]);
            }
            other => panic!("expected notify, got {other:?}"),
        }
        assert_eq!(
            effects[1],
            Effect::Schedule(SchedulerCommand::Debounce {
                key: TOAST_KEY.to_string(),
                delay: TIMEOUT,
                event: AppEvent::Intent(Intent::DismissToast),
            })
        );
        assert_eq!(state.form().current_index(), 1);
    }

    #[test]
    fn invalid_submit_only_rerenders() {
        let mut state = state();
        Reducer::reduce(&mut state, Intent::ToggleIndex(0), TIMEOUT);
        let effects = Reducer::reduce(&mut state, Intent::Submit, TIMEOUT);
        assert_eq!(effects, vec![Effect::RequestRender]);
        assert_eq!(state.form().current_index(), 0);
        assert!(state.validation_error().is_some());
    }

    #[test]
    fn cursor_and_toggle_intents_drive_selection() {
        let mut state = state();
        Reducer::reduce(&mut state, Intent::CursorDown, TIMEOUT);
        Reducer::reduce(&mut state, Intent::CursorDown, TIMEOUT);
        Reducer::reduce(&mut state, Intent::ToggleFocused, TIMEOUT);
        assert!(state.form().is_selected("3"));

        Reducer::reduce(&mut state, Intent::CursorLast, TIMEOUT);
        assert_eq!(state.cursor(), state.current_items().len() - 1);
        assert!(Reducer::reduce(&mut state, Intent::CursorLast, TIMEOUT).is_empty());
    }

    #[test]
    fn dismiss_without_toast_is_silent() {
        let mut state = state();
        assert!(Reducer::reduce(&mut state, Intent::DismissToast, TIMEOUT).is_empty());
        assert!(Reducer::reduce(&mut state, Intent::Tick, TIMEOUT).is_empty());
    }

    #[test]
    fn exit_sets_the_flag() {
        let mut state = state();
        Reducer::reduce(&mut state, Intent::Exit, TIMEOUT);
        assert!(state.should_exit());
    }
}
