pub mod backend;

pub use backend::{
    KeyCode, KeyEvent, KeyModifiers, RenderMode, Terminal, TerminalEvent, TerminalSize,
};
