pub mod config;
pub mod core;
pub mod data;
pub mod replay;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;

pub use config::SurveyConfig;
pub use core::controller::{FormController, SubmitError};
pub use core::notification::{JsonLinesSink, Notification, NotificationSink};
pub use data::{DataError, StepCollection};
