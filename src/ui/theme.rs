use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub description: Style,
    pub cursor: Style,
    pub checked: Style,
    pub unchecked: Style,
    pub error: Style,
    pub progress: Style,
    pub button: Style,
    pub toast_title: Style,
    pub toast_body: Style,
    pub hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new().bold(),
            description: Style::new().color(Color::DarkGrey),
            cursor: Style::new().color(Color::Cyan).bold(),
            checked: Style::new().color(Color::Green),
            unchecked: Style::new(),
            error: Style::new().color(Color::Red),
            progress: Style::new(),
            button: Style::new().color(Color::Black).background(Color::White).bold(),
            toast_title: Style::new().color(Color::White).bold(),
            toast_body: Style::new().color(Color::Cyan),
            hint: Style::new().color(Color::DarkGrey),
        }
    }
}

impl Theme {
    /// No colors or attributes, for terminals that should stay monochrome.
    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            description: Style::new(),
            cursor: Style::new(),
            checked: Style::new(),
            unchecked: Style::new(),
            error: Style::new(),
            progress: Style::new(),
            button: Style::new(),
            toast_title: Style::new(),
            toast_body: Style::new(),
            hint: Style::new(),
        }
    }
}
