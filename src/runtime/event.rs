use crate::runtime::intent::Intent;
use crate::terminal::TerminalEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Terminal(TerminalEvent),
    Intent(Intent),
}
