#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Exit,
    Submit,
    CursorUp,
    CursorDown,
    CursorFirst,
    CursorLast,
    ToggleFocused,
    /// Toggle the n-th item (zero based) of the current step.
    ToggleIndex(usize),
    DismissToast,
    Tick,
    Noop,
}
