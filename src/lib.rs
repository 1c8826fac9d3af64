pub mod clock;
pub mod constants;
pub mod engine;
pub mod ghost;
pub mod maze;
pub mod notifications;
pub mod pacman;
pub mod rng;
pub mod settings;
pub mod state;
pub mod strategy;
pub mod types;

pub use engine::Game;
pub use settings::{GameSettings, SettingsError};
