use crate::core::notification::Notification;
use crate::runtime::scheduler::SchedulerCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notification),
    Schedule(SchedulerCommand),
    RequestRender,
}
