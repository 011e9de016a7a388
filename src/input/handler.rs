use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// Table from raw key symbols to actions
///
/// The snake never sees keys; rebinding only touches this table.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    bindings: HashMap<String, Action>,
}

impl Controller {
    /// Empty controller, every key unbound
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with WASD, arrow keys, Escape for pause, Enter to start, Q to quit and +/- for speed
    pub fn with_default_bindings() -> Self {
        let mut controller = Self::new();
        controller.bind(Action::Move(Direction::Up), &["w", "W", "ArrowUp"]);
        controller.bind(Action::Move(Direction::Left), &["a", "A", "ArrowLeft"]);
        controller.bind(Action::Move(Direction::Down), &["s", "S", "ArrowDown"]);
        controller.bind(Action::Move(Direction::Right), &["d", "D", "ArrowRight"]);
        controller.bind(Action::Pause, &["Escape"]);
        controller.bind(Action::Start, &["Enter"]);
        controller.bind(Action::Quit, &["q", "Q"]);
        controller.bind(Action::SpeedUp, &["+", "="]);
        controller.bind(Action::SpeedDown, &["-", "_"]);
        controller
    }

    /// Bind `action` to every key in `keys`; a later binding for a key replaces the earlier one
    pub fn bind(&mut self, action: Action, keys: &[&str]) {
        for key in keys {
            self.bindings.insert((*key).to_string(), action);
        }
    }

    /// Action bound to `key`, if any. Unbound keys are not an error.
    pub fn resolve(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Keys bound to `action`, sorted for display
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Whether the event is Ctrl+C, which always quits regardless of bindings
pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Symbol a terminal key event is looked up by
pub fn key_symbol(key: &KeyEvent) -> Option<String> {
    let symbol = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        _ => return None,
    };
    Some(symbol)
}
