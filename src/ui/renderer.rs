use crate::core::controller::FormController;
use crate::core::flow::StepStatus;
use crate::state::app_state::AppState;
use crate::terminal::TerminalSize;
use crate::ui::span::{Span, SpanLine, truncate_line};
use crate::ui::theme::Theme;

const HINT: &str = "↑/↓ move · space toggle · 1-9 pick · enter submit · esc quit";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
}

impl RenderFrame {
    /// Frame text without styling, one string per line.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }
}

#[derive(Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(&self, state: &AppState, size: TerminalSize) -> RenderFrame {
        let mut lines: Vec<SpanLine> = Vec::new();
        let form = state.form();
        let theme = &self.theme;

        if let Some(step) = form.current_step() {
            lines.push(vec![Span::styled(step.title.clone(), theme.title)]);
            if !step.description.is_empty() {
                lines.push(vec![Span::styled(
                    step.description.clone(),
                    theme.description,
                )]);
            }
            lines.push(Vec::new());

            for (index, item) in step.items.iter().enumerate() {
                let focused = index == state.cursor();
                let checked = form.is_selected(item.id.as_str());
                let marker = if focused {
                    Span::styled("› ", theme.cursor)
                } else {
                    Span::new("  ")
                };
                let (mark, mark_style) = if checked {
                    ("[x]", theme.checked)
                } else {
                    ("[ ]", theme.unchecked)
                };
                let label_style = if focused { theme.cursor } else { Default::default() };
                lines.push(vec![
                    marker,
                    Span::styled(mark, mark_style),
                    Span::new(" "),
                    Span::styled(item.label.clone(), label_style),
                ]);
            }

            if let Some(message) = state.validation_error() {
                lines.push(vec![Span::styled(format!("  {message}"), theme.error)]);
            }

            lines.push(Vec::new());
            lines.push(vec![Span::styled(form.progress_label(), theme.progress)]);
            lines.push(self.step_trail(form));
            lines.push(vec![Span::styled(
                format!(" {} ", form.submit_label()),
                theme.button,
            )]);
        } else {
            lines.push(vec![Span::styled(form.progress_label(), theme.progress)]);
            lines.push(self.step_trail(form));
        }

        if let Some(toast) = state.toasts().current() {
            lines.push(Vec::new());
            lines.push(vec![Span::styled(toast.title.clone(), theme.toast_title)]);
            for body_line in toast.description.lines() {
                lines.push(vec![Span::styled(format!("  {body_line}"), theme.toast_body)]);
            }
        }

        lines.push(Vec::new());
        lines.push(vec![Span::styled(HINT, theme.hint)]);

        let width = size.width as usize;
        RenderFrame {
            lines: lines
                .into_iter()
                .map(|line| truncate_line(line, width))
                .collect(),
        }
    }

    /// One marker per step: done, active or still pending.
    fn step_trail(&self, form: &FormController) -> SpanLine {
        let mut line = Vec::new();
        for (index, step) in form.steps().steps().iter().enumerate() {
            if index > 0 {
                line.push(Span::new("  "));
            }
            let (marker, style) = match form.step_status(index) {
                StepStatus::Done => ("✓", self.theme.checked),
                StepStatus::Active => ("●", self.theme.cursor),
                StepStatus::Pending => ("○", self.theme.hint),
            };
            line.push(Span::styled(format!("{marker} {}", step.key), style));
        }
        line
    }
}
