// Unified touch, gamepad and keyboard input with a card menu on top

pub mod config;
pub mod core;
pub mod engine;
pub mod menu;
