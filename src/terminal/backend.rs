use crate::ui::renderer::RenderFrame;
use crate::ui::span::{SpanLine, truncate_line};
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, MoveToColumn, MoveUp, Show};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers as CrosstermKeyModifiers,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    AltScreen,

    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Home,
    End,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(TerminalSize),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    mode: RenderMode,
    /// Rows painted by the previous inline render.
    inline_drawn: usize,
    last_frame: Vec<SpanLine>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            mode: RenderMode::default(),
            inline_drawn: 0,
            last_frame: Vec::new(),
        })
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        match self.mode {
            RenderMode::AltScreen => {
                execute!(self.stdout, EnterAlternateScreen, DisableLineWrap, Hide)
            }
            RenderMode::Inline => execute!(self.stdout, DisableLineWrap, Hide),
        }
    }

    /// Restores the terminal. Alt-screen runs reprint their last frame so the
    /// final state stays visible in the scrollback.
    pub fn exit(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        match self.mode {
            RenderMode::AltScreen => {
                execute!(self.stdout, LeaveAlternateScreen, EnableLineWrap, Show)?;
                let last_frame = std::mem::take(&mut self.last_frame);
                for line in &last_frame {
                    self.write_span_line(line)?;
                    self.stdout.write_all(b"\n")?;
                }
            }
            RenderMode::Inline => {
                execute!(self.stdout, EnableLineWrap, Show)?;
                self.stdout.write_all(b"\n")?;
            }
        }
        self.stdout.flush()
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(TerminalEvent::Key(map_key_event(key)))
            }
            CrosstermEvent::Resize(width, height) => {
                Ok(TerminalEvent::Resize(TerminalSize { width, height }))
            }
            _ => Ok(TerminalEvent::Tick),
        }
    }

    pub fn render_frame(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let width = self.size.width as usize;
        let height = self.size.height as usize;
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.last_frame = frame
            .lines
            .iter()
            .map(|line| truncate_line(line.clone(), width.saturating_sub(1)))
            .collect();

        match self.mode {
            RenderMode::AltScreen => self.render_altscreen(height),
            RenderMode::Inline => self.render_inline(height),
        }
    }

    fn render_altscreen(&mut self, height: usize) -> io::Result<()> {
        let lines = std::mem::take(&mut self.last_frame);
        queue!(
            self.stdout,
            BeginSynchronizedUpdate,
            MoveTo(0, 0),
            Clear(ClearType::All)
        )?;
        for (row, line) in lines.iter().take(height).enumerate() {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            self.write_span_line(line)?;
        }
        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.last_frame = lines;
        self.stdout.flush()
    }

    fn render_inline(&mut self, height: usize) -> io::Result<()> {
        let lines = std::mem::take(&mut self.last_frame);
        let visible = lines.len().min(height.saturating_sub(1)).max(1);

        queue!(self.stdout, BeginSynchronizedUpdate, MoveToColumn(0))?;
        if self.inline_drawn > 1 {
            queue!(self.stdout, MoveUp((self.inline_drawn - 1) as u16))?;
        }
        queue!(self.stdout, Clear(ClearType::FromCursorDown))?;

        for (idx, line) in lines.iter().take(visible).enumerate() {
            if idx > 0 {
                queue!(self.stdout, Print("\r\n"))?;
            }
            self.write_span_line(line)?;
        }
        queue!(self.stdout, EndSynchronizedUpdate)?;

        self.inline_drawn = visible;
        self.last_frame = lines;
        self.stdout.flush()
    }

    fn write_span_line(&mut self, line: &SpanLine) -> io::Result<()> {
        for span in line {
            if span.text.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(self.stdout, Print(span.text.as_str()))?;
            if !span.style.is_plain() {
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        Ok(())
    }
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out.0 |= KeyModifiers::SHIFT.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out.0 |= KeyModifiers::CONTROL.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out.0 |= KeyModifiers::ALT.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_mapping_keeps_every_flag() {
        let mapped = map_key_modifiers(CrosstermKeyModifiers::CONTROL | CrosstermKeyModifiers::SHIFT);
        assert!(mapped.contains(KeyModifiers::CONTROL));
        assert!(mapped.contains(KeyModifiers::SHIFT));
        assert!(!mapped.contains(KeyModifiers::ALT));
    }

    #[test]
    fn unmapped_keys_become_unknown() {
        assert_eq!(map_key_code(CrosstermKeyCode::F(5)), KeyCode::Unknown);
        assert_eq!(map_key_code(CrosstermKeyCode::Char(' ')), KeyCode::Char(' '));
    }
}
