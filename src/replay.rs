use crate::core::ItemId;
use crate::core::controller::FormController;
use crate::core::notification::{NotificationSink, SinkError};
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Toggle(ItemId),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("unknown action `{0}` (expected `toggle:<id>` or `submit`)")]
    Unknown(String),
    #[error("`toggle` needs an item id, as in `toggle:2`")]
    MissingId,
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("submit") {
            return Ok(Self::Submit);
        }
        match text.split_once(':') {
            Some((verb, id)) if verb.trim().eq_ignore_ascii_case("toggle") => {
                let id = id.trim();
                if id.is_empty() {
                    Err(ActionParseError::MissingId)
                } else {
                    Ok(Self::Toggle(ItemId::new(id)))
                }
            }
            _ if text.eq_ignore_ascii_case("toggle") => Err(ActionParseError::MissingId),
            _ => Err(ActionParseError::Unknown(text.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("failed to report rejected submit: {0}")]
    Report(#[source] std::io::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub submitted: usize,
    pub rejected: usize,
    pub completed: bool,
}

/// Applies `actions` in order. Notifications go to `sink`; validation
/// failures are reported on `errors` and the replay carries on.
pub fn replay<W: Write>(
    form: &mut FormController,
    actions: &[Action],
    sink: &mut dyn NotificationSink,
    errors: &mut W,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();

    for action in actions {
        match action {
            Action::Toggle(id) => {
                form.toggle_item(id.clone());
            }
            Action::Submit => {
                let step = form.current_index();
                match form.submit() {
                    Ok(notification) => {
                        sink.notify(&notification)?;
                        summary.submitted += 1;
                    }
                    Err(err) => {
                        writeln!(errors, "step {step}: {err}").map_err(ReplayError::Report)?;
                        summary.rejected += 1;
                    }
                }
            }
        }
    }

    summary.completed = form.is_complete();
    Ok(summary)
}
