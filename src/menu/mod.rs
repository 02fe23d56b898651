// Card-selection menu
//
// A single-screen consumer of the unified input: directional intent moves
// the selection, a confirm edge leaves the menu for the selected card.

pub mod deployments;
mod state;

pub use deployments::{
    DeploymentFetcher, DeploymentRecord, FetchError, FetchPoll, PLACEHOLDER_LABEL,
};
pub use state::{MenuState, MenuStateMachine};

use crate::config::{CardConfig, MenuConfig};
use crate::core::math::Rect;
use crate::engine::input::{ControlState, LogicalButton};
use crate::engine::renderer::QuadBatch;
use glam::{Vec2, Vec4};
use log::{debug, info, warn};

/// Axis magnitude that counts as a navigation request
pub const NAV_THRESHOLD: f32 = 0.5;

/// Seconds before another move can fire
pub const NAV_COOLDOWN: f32 = 0.18;

/// Buttons that confirm the selected card
pub const CONFIRM_BUTTONS: [LogicalButton; 2] = [LogicalButton::A, LogicalButton::Start];

const CARD_COLOR: Vec4 = Vec4::new(0.16, 0.18, 0.26, 1.0);
const SELECTED_COLOR: Vec4 = Vec4::new(0.24, 0.3, 0.5, 1.0);
const HIGHLIGHT_COLOR: Vec4 = Vec4::new(0.95, 0.75, 0.2, 1.0);
const LOADING_COLOR: Vec4 = Vec4::new(0.4, 0.4, 0.45, 1.0);
const UPDATED_COLOR: Vec4 = Vec4::new(0.3, 0.8, 0.45, 1.0);
const CONFIRMED_COLOR: Vec4 = Vec4::new(0.3, 0.8, 0.45, 1.0);

/// One selectable entry
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub url: String,
    /// "Loading..." until deployment metadata says otherwise
    pub label: String,
}

impl From<&CardConfig> for Card {
    fn from(config: &CardConfig) -> Self {
        Self {
            id: config.id.clone(),
            title: config.title.clone(),
            url: config.url.clone(),
            label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

impl Card {
    pub fn has_update_label(&self) -> bool {
        self.label != PLACEHOLDER_LABEL
    }
}

/// Emitted when the menu leaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Navigate { id: String, url: String },
}

/// Which way the selection wants to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStep {
    Previous,
    Next,
}

impl NavStep {
    /// Read intent from the dominant axis; left/up is previous
    pub fn from_direction(x: f32, y: f32) -> Option<Self> {
        let (value, magnitude) = if x.abs() >= y.abs() {
            (x, x.abs())
        } else {
            (y, y.abs())
        };
        if magnitude <= NAV_THRESHOLD {
            return None;
        }
        Some(if value < 0.0 {
            Self::Previous
        } else {
            Self::Next
        })
    }
}

/// The card menu
#[derive(Debug)]
pub struct Menu {
    cards: Vec<Card>,
    selected: usize,
    state: MenuStateMachine,

    /// Intent that last moved the selection, cleared when input returns to rest
    last_step: Option<NavStep>,
    cooldown: f32,

    fetcher: Option<DeploymentFetcher>,
}

impl Menu {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            selected: 0,
            state: MenuStateMachine::new(),
            last_step: None,
            cooldown: 0.0,
            fetcher: None,
        }
    }

    /// Build from config and start the deployment fetch if an endpoint is set
    pub fn from_config(config: &MenuConfig) -> Self {
        let mut menu = Self::new(config.cards.iter().map(Card::from).collect());
        if let Some(url) = &config.deployments_url {
            match DeploymentFetcher::spawn(url) {
                Ok(fetcher) => menu.start_fetch(fetcher),
                Err(e) => warn!("Deployment labels disabled: {}", e),
            }
        }
        info!("Menu ready with {} cards", menu.cards.len());
        menu
    }

    /// Attach a fetch whose result `poll_deployments` will apply
    pub fn start_fetch(&mut self, fetcher: DeploymentFetcher) {
        self.fetcher = Some(fetcher);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected)
    }

    pub fn state(&self) -> MenuState {
        self.state.state()
    }

    /// Process one frame of input
    pub fn update(&mut self, controls: &impl ControlState, dt: f32) -> Option<MenuEvent> {
        self.state.update(dt);
        if !self.state.state().is_browsing() || self.cards.is_empty() {
            return None;
        }

        if controls.any_just_pressed(&CONFIRM_BUTTONS) {
            return self.confirm();
        }

        self.cooldown = (self.cooldown - dt).max(0.0);
        let direction = controls.direction();
        match NavStep::from_direction(direction.x, direction.y) {
            None => self.last_step = None,
            Some(step) if Some(step) != self.last_step && self.cooldown <= 0.0 => {
                self.step(step);
                self.last_step = Some(step);
                self.cooldown = NAV_COOLDOWN;
            }
            Some(_) => {}
        }
        None
    }

    fn step(&mut self, step: NavStep) {
        let count = self.cards.len();
        self.selected = match step {
            NavStep::Previous => (self.selected + count - 1) % count,
            NavStep::Next => (self.selected + 1) % count,
        };
        debug!("Menu selection -> {}", self.selected);
    }

    fn confirm(&mut self) -> Option<MenuEvent> {
        let card = self.cards.get(self.selected)?;
        let event = MenuEvent::Navigate {
            id: card.id.clone(),
            url: card.url.clone(),
        };
        self.state.transition(MenuState::Transitioning {
            card: self.selected,
        });
        info!("Menu confirmed '{}'", card.id);
        Some(event)
    }

    /// Replace placeholders for cards with a usable deployment date
    pub fn apply_deployments(&mut self, records: &[DeploymentRecord]) {
        for record in records {
            let Some(label) = record.label() else {
                continue;
            };
            for card in self.cards.iter_mut().filter(|card| card.id == record.id) {
                card.label = label.clone();
            }
        }
    }

    /// Apply a finished fetch, if any, without blocking
    pub fn poll_deployments(&mut self) {
        let Some(fetcher) = &mut self.fetcher else {
            return;
        };
        match fetcher.poll() {
            FetchPoll::Pending => {}
            FetchPoll::Ready(records) => {
                self.apply_deployments(&records);
                self.fetcher = None;
            }
            FetchPoll::Closed => {
                debug!("Deployment fetch closed without data");
                self.fetcher = None;
            }
        }
    }

    /// Card rectangles for a window of the given size, left to right
    pub fn card_rects(&self, viewport: Vec2) -> Vec<Rect> {
        let count = self.cards.len();
        if count == 0 {
            return Vec::new();
        }
        let gap = viewport.x * 0.03;
        let width = ((viewport.x - gap * (count as f32 + 1.0)) / count as f32)
            .min(viewport.y * 0.45)
            .max(1.0);
        let height = width * 1.3;
        let total = width * count as f32 + gap * (count as f32 - 1.0);
        let left = (viewport.x - total) / 2.0;
        let top = (viewport.y - height) / 2.0 - viewport.y * 0.05;

        (0..count)
            .map(|i| Rect::new(left + i as f32 * (width + gap), top, width, height))
            .collect()
    }

    /// Emit quads for every card
    pub fn draw(&self, batch: &mut QuadBatch, viewport: Vec2) {
        let confirmed = match self.state.state() {
            MenuState::Transitioning { card } => Some(card),
            MenuState::Browsing => None,
        };

        for (i, (card, rect)) in self.cards.iter().zip(self.card_rects(viewport)).enumerate() {
            let selected = i == self.selected;
            batch.push_rect(rect, if selected { SELECTED_COLOR } else { CARD_COLOR });

            // Status strip along the bottom edge
            let strip = Rect::new(
                rect.min.x,
                rect.max().y - rect.size.y * 0.08,
                rect.size.x,
                rect.size.y * 0.08,
            );
            let status = if card.has_update_label() {
                UPDATED_COLOR
            } else {
                LOADING_COLOR
            };
            batch.push_rect(strip, status);

            if confirmed == Some(i) {
                batch.push_outline(rect, rect.size.x * 0.04, CONFIRMED_COLOR);
            } else if selected {
                batch.push_outline(rect, rect.size.x * 0.03, HIGHLIGHT_COLOR);
            }
        }
    }
}
