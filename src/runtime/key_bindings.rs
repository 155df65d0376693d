use crate::runtime::intent::Intent;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Intent>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, intent: Intent) {
        self.bindings.insert(key, intent);
    }

    pub fn resolve(&self, event: KeyEvent) -> Intent {
        if let Some(intent) = self.bindings.get(&KeyBinding::from_event(event)) {
            return intent.clone();
        }
        // Digits pick items directly: '1' is the first item.
        match event.code {
            KeyCode::Char(ch @ '1'..='9') if event.modifiers == KeyModifiers::NONE => {
                Intent::ToggleIndex(ch as usize - '1' as usize)
            }
            _ => Intent::Noop,
        }
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Intent::Exit);
        self.bind(KeyBinding::key(KeyCode::Esc), Intent::Exit);
        self.bind(KeyBinding::key(KeyCode::Enter), Intent::Submit);
        self.bind(KeyBinding::key(KeyCode::Char(' ')), Intent::ToggleFocused);

        self.bind(KeyBinding::key(KeyCode::Up), Intent::CursorUp);
        self.bind(KeyBinding::key(KeyCode::Char('k')), Intent::CursorUp);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Intent::CursorUp,
        );
        self.bind(KeyBinding::key(KeyCode::Down), Intent::CursorDown);
        self.bind(KeyBinding::key(KeyCode::Char('j')), Intent::CursorDown);
        self.bind(KeyBinding::key(KeyCode::Tab), Intent::CursorDown);
        self.bind(KeyBinding::key(KeyCode::Home), Intent::CursorFirst);
        self.bind(KeyBinding::key(KeyCode::End), Intent::CursorLast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_form_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Enter)),
            Intent::Submit
        );
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Char(' '))),
            Intent::ToggleFocused
        );
        assert_eq!(
            bindings.resolve(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            }),
            Intent::Exit
        );
    }

    #[test]
    fn digits_toggle_items_by_position() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Char('1'))),
            Intent::ToggleIndex(0)
        );
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Char('9'))),
            Intent::ToggleIndex(8)
        );
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Char('0'))),
            Intent::Noop
        );
    }

    #[test]
    fn rebinding_overrides_defaults() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyBinding::key(KeyCode::Esc), Intent::DismissToast);
        bindings.bind(KeyBinding::key(KeyCode::Char('q')), Intent::Exit);
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Esc)),
            Intent::DismissToast
        );
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Char('q'))),
            Intent::Exit
        );
    }
}
