// Menu state machine

/// Where the menu is in its one-way lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    /// Selection moves with directional input
    #[default]
    Browsing,
    /// A card was confirmed; the menu is leaving
    Transitioning { card: usize },
}

impl MenuState {
    /// Check if the menu accepts navigation
    pub fn is_browsing(&self) -> bool {
        matches!(self, Self::Browsing)
    }

    /// Transitioning never ends for the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Transitioning { .. } => "transitioning",
        }
    }
}

/// Tracks the menu state and how long it has been held
#[derive(Debug, Default)]
pub struct MenuStateMachine {
    current: MenuState,
    state_time: f32,
}

impl MenuStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MenuState {
        self.current
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Move to a new state
    /// Returns false when the transition is not allowed
    pub fn transition(&mut self, next: MenuState) -> bool {
        if self.current.is_terminal() || self.current == next {
            return false;
        }
        self.current = next;
        self.state_time = 0.0;
        true
    }

    /// Advance the state clock
    pub fn update(&mut self, dt: f32) {
        self.state_time += dt;
    }
}
