use serde::Serialize;
use std::io::Write;
use thiserror::Error;

pub const DEFAULT_NOTIFICATION_TITLE: &str = "You submitted the following values:";

/// Values submitted for one step, shaped as `{"items": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedValues {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Index of the step that was submitted.
    pub step: usize,
    pub title: String,
    /// Pretty-printed JSON of `values`, ready for display.
    pub description: String,
    pub values: SubmittedValues,
}

impl Notification {
    pub fn submitted(step: usize, title: impl Into<String>, values: SubmittedValues) -> Self {
        let description = serde_json::to_string_pretty(&values)
            .unwrap_or_else(|_| format!("{:?}", values.items));
        Self {
            step,
            title: title.into(),
            description,
            values,
        }
    }

    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({ "items": self.values.items })
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to encode notification: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write notification: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives a notification after every successful submit.
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification) -> Result<(), SinkError>;
}

#[derive(Serialize)]
struct JsonLine<'a> {
    step: usize,
    title: &'a str,
    values: &'a SubmittedValues,
}

/// Writes one compact JSON object per notification.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> NotificationSink for JsonLinesSink<W> {
    fn notify(&mut self, notification: &Notification) -> Result<(), SinkError> {
        let line = JsonLine {
            step: notification.step,
            title: &notification.title,
            values: &notification.values,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
