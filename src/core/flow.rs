#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

/// Forward-only step counter. `current == len()` is the terminal state.
#[derive(Debug, Clone)]
pub struct Flow {
    current: usize,
    statuses: Vec<StepStatus>,
}

impl Flow {
    pub fn new(len: usize) -> Self {
        let mut statuses = vec![StepStatus::Pending; len];
        if let Some(first) = statuses.first_mut() {
            *first = StepStatus::Active;
        }
        Self {
            current: 0,
            statuses,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.statuses.len()
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.statuses.len()
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        self.statuses
            .get(index)
            .copied()
            .unwrap_or(StepStatus::Pending)
    }

    /// Marks the current step done and moves to the next one, possibly the
    /// terminal state. Returns `false` when already finished.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Done;
        }
        self.current += 1;
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Active;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Flow, StepStatus};

    #[test]
    fn advances_into_terminal_state_and_stops() {
        let mut flow = Flow::new(2);
        assert_eq!(flow.status_at(0), StepStatus::Active);
        assert!(!flow.is_last());

        assert!(flow.advance());
        assert!(flow.is_last());
        assert_eq!(flow.status_at(0), StepStatus::Done);
        assert_eq!(flow.status_at(1), StepStatus::Active);

        assert!(flow.advance());
        assert!(flow.is_finished());
        assert_eq!(flow.current_index(), 2);

        assert!(!flow.advance());
        assert_eq!(flow.current_index(), 2);
    }

    #[test]
    fn empty_flow_starts_finished() {
        let flow = Flow::new(0);
        assert!(flow.is_empty());
        assert!(flow.is_finished());
    }
}
