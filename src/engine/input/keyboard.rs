// Keyboard bindings and listener
//
// The core unifier never reads the keyboard. Each adapter owns a listener
// with its own binding table and ORs it in on top of the unified state.

use super::button::{ButtonSnapshot, DirectionVector, LogicalButton};
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps physical keys to logical buttons
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    /// Key to button
    bindings: HashMap<KeyCode, LogicalButton>,

    /// Reverse mapping for quick lookups (button -> all keys)
    button_to_keys: HashMap<LogicalButton, Vec<KeyCode>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bindings from a list of pairs
    pub fn from_bindings(bindings: impl IntoIterator<Item = (KeyCode, LogicalButton)>) -> Self {
        let mut table = Self::new();
        for (key, button) in bindings {
            table.bind(key, button);
        }
        table
    }

    /// Bind a key to a button, replacing the key's previous binding
    pub fn bind(&mut self, key: KeyCode, button: LogicalButton) {
        self.unbind_key(key);
        self.bindings.insert(key, button);
        self.button_to_keys.entry(button).or_default().push(key);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(button) = self.bindings.remove(&key) {
            if let Some(keys) = self.button_to_keys.get_mut(&button) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.button_to_keys.remove(&button);
                }
            }
        }
    }

    /// Unbind every key for a button
    pub fn unbind_button(&mut self, button: LogicalButton) {
        if let Some(keys) = self.button_to_keys.remove(&button) {
            for key in keys {
                self.bindings.remove(&key);
            }
        }
    }

    pub fn get(&self, key: KeyCode) -> Option<LogicalButton> {
        self.bindings.get(&key).copied()
    }

    pub fn keys_for(&self, button: LogicalButton) -> Vec<KeyCode> {
        self.button_to_keys.get(&button).cloned().unwrap_or_default()
    }

    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.bindings.contains_key(&key)
    }

    pub fn has_binding(&self, button: LogicalButton) -> bool {
        self.button_to_keys.contains_key(&button)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.button_to_keys.clear();
    }
}

/// Tracks held keys for one consumer
#[derive(Debug, Clone, Default)]
pub struct KeyboardListener {
    bindings: KeyBindings,

    /// Bound keys currently held down
    held: HashSet<KeyCode>,
}

impl KeyboardListener {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> bool {
        match event.physical_key {
            PhysicalKey::Code(code) => self.handle_key(code, event.state, event.repeat),
            PhysicalKey::Unidentified(_) => false,
        }
    }

    /// Record a key transition
    /// Returns true when the key is bound; auto-repeat presses are ignored
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) -> bool {
        if !self.bindings.is_bound(code) {
            return false;
        }
        match state {
            ElementState::Pressed => {
                if !repeat {
                    self.held.insert(code);
                }
            }
            ElementState::Released => {
                self.held.remove(&code);
            }
        }
        true
    }

    /// Release every key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Buttons with at least one bound key held
    pub fn snapshot(&self) -> ButtonSnapshot {
        ButtonSnapshot::from_pressed(self.held.iter().filter_map(|key| self.bindings.get(*key)))
    }

    /// Digital direction from held directional keys
    pub fn direction(&self) -> DirectionVector {
        self.snapshot().digital_direction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wasd() -> KeyBindings {
        KeyBindings::from_bindings([
            (KeyCode::KeyW, LogicalButton::Up),
            (KeyCode::KeyA, LogicalButton::Left),
            (KeyCode::KeyS, LogicalButton::Down),
            (KeyCode::KeyD, LogicalButton::Right),
            (KeyCode::ArrowLeft, LogicalButton::Left),
            (KeyCode::Space, LogicalButton::A),
        ])
    }

    #[test]
    fn test_bind_and_lookup() {
        let bindings = wasd();
        assert_eq!(bindings.get(KeyCode::KeyA), Some(LogicalButton::Left));
        assert_eq!(bindings.get(KeyCode::KeyQ), None);
        assert_eq!(bindings.len(), 6);
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = wasd();
        bindings.bind(KeyCode::Space, LogicalButton::B);
        assert_eq!(bindings.get(KeyCode::Space), Some(LogicalButton::B));
        assert!(!bindings.has_binding(LogicalButton::A));
    }

    #[test]
    fn test_keys_for_and_unbind_button() {
        let mut bindings = wasd();
        let keys = bindings.keys_for(LogicalButton::Left);
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&KeyCode::KeyA));
        assert!(keys.contains(&KeyCode::ArrowLeft));

        bindings.unbind_button(LogicalButton::Left);
        assert!(!bindings.is_bound(KeyCode::KeyA));
        assert!(!bindings.is_bound(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_unbind_key_keeps_other_keys() {
        let mut bindings = wasd();
        bindings.unbind_key(KeyCode::KeyA);
        assert!(bindings.has_binding(LogicalButton::Left));
        assert_eq!(bindings.keys_for(LogicalButton::Left), vec![KeyCode::ArrowLeft]);
    }

    #[test]
    fn test_clear() {
        let mut bindings = wasd();
        bindings.clear();
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_held_key_sets_direction() {
        let mut keyboard = KeyboardListener::new(wasd());
        assert!(keyboard.handle_key(KeyCode::KeyA, ElementState::Pressed, false));
        assert_eq!(keyboard.direction(), DirectionVector { x: -1.0, y: 0.0 });

        keyboard.handle_key(KeyCode::KeyA, ElementState::Released, false);
        assert!(keyboard.direction().is_zero());
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut keyboard = KeyboardListener::new(wasd());
        assert!(!keyboard.handle_key(KeyCode::KeyQ, ElementState::Pressed, false));
        assert!(keyboard.snapshot().is_empty());
    }

    #[test]
    fn test_repeat_does_not_press() {
        let mut keyboard = KeyboardListener::new(wasd());
        keyboard.handle_key(KeyCode::Space, ElementState::Pressed, true);
        assert!(!keyboard.snapshot().is_pressed(LogicalButton::A));
    }

    #[test]
    fn test_two_keys_same_button() {
        let mut keyboard = KeyboardListener::new(wasd());
        keyboard.handle_key(KeyCode::KeyA, ElementState::Pressed, false);
        keyboard.handle_key(KeyCode::ArrowLeft, ElementState::Pressed, false);
        keyboard.handle_key(KeyCode::KeyA, ElementState::Released, false);
        assert!(keyboard.snapshot().is_pressed(LogicalButton::Left));
    }

    #[test]
    fn test_release_all() {
        let mut keyboard = KeyboardListener::new(wasd());
        keyboard.handle_key(KeyCode::KeyD, ElementState::Pressed, false);
        keyboard.release_all();
        assert!(keyboard.snapshot().is_empty());
    }
}
