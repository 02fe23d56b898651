// Adapter profiles: alias vocabulary plus keyboard bindings

use crate::engine::input::button::LogicalButton;
use crate::engine::input::error::InputError;
use crate::engine::input::keyboard::KeyBindings;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Names of the built-in profiles
pub const BUILTIN_PROFILES: &[&str] = &["arcade", "platformer", "menu"];

/// Naming conventions of one consuming framework
#[derive(Debug, Clone)]
pub struct AdapterProfile {
    name: String,

    /// Alias to the buttons that trigger it (any of them)
    aliases: HashMap<String, Vec<LogicalButton>>,

    keyboard: KeyBindings,
}

impl AdapterProfile {
    /// Empty profile; raw button names still resolve
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: HashMap::new(),
            keyboard: KeyBindings::new(),
        }
    }

    /// Add (or extend) an alias
    pub fn alias(mut self, alias: &str, buttons: &[LogicalButton]) -> Self {
        let entry = self.aliases.entry(alias.to_string()).or_default();
        for button in buttons {
            if !entry.contains(button) {
                entry.push(*button);
            }
        }
        self
    }

    /// Bind a key for this profile's keyboard listener
    pub fn bind_key(mut self, key: KeyCode, button: LogicalButton) -> Self {
        self.keyboard.bind(key, button);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyboard(&self) -> &KeyBindings {
        &self.keyboard
    }

    /// Resolve an alias or a raw button name
    /// Aliases shadow raw names of the same spelling
    pub fn resolve(&self, name: &str) -> Vec<LogicalButton> {
        if let Some(buttons) = self.aliases.get(name) {
            return buttons.clone();
        }
        LogicalButton::from_name(name).into_iter().collect()
    }

    /// Iterate aliases in no particular order
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &[LogicalButton])> {
        self.aliases
            .iter()
            .map(|(alias, buttons)| (alias.as_str(), buttons.as_slice()))
    }

    /// Look up a built-in profile by name
    pub fn by_name(name: &str) -> Result<Self, InputError> {
        match name {
            "arcade" => Ok(Self::arcade()),
            "platformer" => Ok(Self::platformer()),
            "menu" => Ok(Self::menu()),
            other => Err(InputError::UnknownProfile(other.to_string())),
        }
    }

    /// Shooter/arcade vocabulary with WASD and arrows
    pub fn arcade() -> Self {
        Self::new("arcade")
            .alias("jump", &[LogicalButton::A])
            .alias("fire", &[LogicalButton::B])
            .alias("action", &[LogicalButton::X])
            .alias("special", &[LogicalButton::Y])
            .alias("pause", &[LogicalButton::Start])
            .alias("back", &[LogicalButton::Select])
            .with_movement_keys()
            .bind_key(KeyCode::Space, LogicalButton::A)
            .bind_key(KeyCode::KeyJ, LogicalButton::B)
            .bind_key(KeyCode::KeyK, LogicalButton::X)
            .bind_key(KeyCode::KeyL, LogicalButton::Y)
            .bind_key(KeyCode::Enter, LogicalButton::Start)
            .bind_key(KeyCode::Escape, LogicalButton::Select)
    }

    /// Side-scroller vocabulary with arrows and Z/X/C
    pub fn platformer() -> Self {
        Self::new("platformer")
            .alias("jump", &[LogicalButton::A])
            .alias("dash", &[LogicalButton::B])
            .alias("attack", &[LogicalButton::X])
            .alias("pause", &[LogicalButton::Start])
            .bind_key(KeyCode::ArrowUp, LogicalButton::Up)
            .bind_key(KeyCode::ArrowDown, LogicalButton::Down)
            .bind_key(KeyCode::ArrowLeft, LogicalButton::Left)
            .bind_key(KeyCode::ArrowRight, LogicalButton::Right)
            .bind_key(KeyCode::KeyZ, LogicalButton::A)
            .bind_key(KeyCode::KeyX, LogicalButton::X)
            .bind_key(KeyCode::KeyC, LogicalButton::B)
            .bind_key(KeyCode::Enter, LogicalButton::Start)
    }

    /// Menu navigation vocabulary
    pub fn menu() -> Self {
        Self::new("menu")
            .alias("confirm", &[LogicalButton::A, LogicalButton::Start])
            .alias("cancel", &[LogicalButton::B, LogicalButton::Select])
            .with_movement_keys()
            .bind_key(KeyCode::Enter, LogicalButton::Start)
            .bind_key(KeyCode::Space, LogicalButton::A)
            .bind_key(KeyCode::Escape, LogicalButton::Select)
            .bind_key(KeyCode::Backspace, LogicalButton::B)
    }

    fn with_movement_keys(self) -> Self {
        self.bind_key(KeyCode::KeyW, LogicalButton::Up)
            .bind_key(KeyCode::KeyA, LogicalButton::Left)
            .bind_key(KeyCode::KeyS, LogicalButton::Down)
            .bind_key(KeyCode::KeyD, LogicalButton::Right)
            .bind_key(KeyCode::ArrowUp, LogicalButton::Up)
            .bind_key(KeyCode::ArrowLeft, LogicalButton::Left)
            .bind_key(KeyCode::ArrowDown, LogicalButton::Down)
            .bind_key(KeyCode::ArrowRight, LogicalButton::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_resolve_by_name() {
        for name in BUILTIN_PROFILES {
            let profile = AdapterProfile::by_name(name).unwrap();
            assert_eq!(profile.name(), *name);
            assert!(!profile.keyboard().is_empty());
        }
        assert!(matches!(
            AdapterProfile::by_name("phaser"),
            Err(InputError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_alias_resolution() {
        let profile = AdapterProfile::arcade();
        assert_eq!(profile.resolve("jump"), vec![LogicalButton::A]);
        assert_eq!(profile.resolve("pause"), vec![LogicalButton::Start]);
        assert_eq!(profile.resolve("lb"), vec![LogicalButton::Lb]);
        assert!(profile.resolve("teleport").is_empty());
    }

    #[test]
    fn test_multi_button_alias() {
        let profile = AdapterProfile::menu();
        assert_eq!(
            profile.resolve("confirm"),
            vec![LogicalButton::A, LogicalButton::Start]
        );
    }

    #[test]
    fn test_alias_extension_skips_duplicates() {
        let profile = AdapterProfile::new("custom")
            .alias("go", &[LogicalButton::A])
            .alias("go", &[LogicalButton::A, LogicalButton::Rt]);
        assert_eq!(profile.resolve("go"), vec![LogicalButton::A, LogicalButton::Rt]);
    }

    #[test]
    fn test_no_duplicate_keys_in_arcade() {
        let profile = AdapterProfile::arcade();
        assert_eq!(profile.keyboard().get(KeyCode::KeyA), Some(LogicalButton::Left));
        assert_eq!(profile.keyboard().get(KeyCode::Space), Some(LogicalButton::A));
        assert_eq!(profile.keyboard().len(), 14);
    }
}
